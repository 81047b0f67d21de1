//! 引擎主入口
//!
//! 定义Engine结构和主运行循环

use crate::config::{EngineConfig, LoggingConfig};
use crate::particles::population::Population;
use crate::particles::spawn::StarSpawner;
use crate::platform::winit::WinitWindow;
use crate::platform::{PlatformEvent, Surface, Viewport, Window};
use crate::render::canvas::Canvas;
use crate::render::frame::{FrameRenderer, FrameStats};
use crate::render::presenter::{GpuPresenter, WindowSurface};
use rand::rngs::ThreadRng;
use rand::Rng;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};

use super::error::{EngineError, EngineResult};
use super::time::{Clock, FramePacer, SystemClock};

/// 统计日志间隔（秒）
const REPORT_INTERVAL: f64 = 5.0;

/// 星空引擎
///
/// `Engine` 持有显示表面、时钟、帧节奏、种群和随机源，负责：
/// - 校验配置并生成初始种群
/// - 每帧渲染、提交并推进帧节奏
/// - 响应窗口尺寸变化与退出请求
///
/// 表面、时钟和随机源都是泛型参数，测试中可以换成 `Canvas`、
/// `ManualClock` 和固定种子的 `StdRng`。
///
/// # 示例
///
/// ```no_run
/// use starburst::core::WindowEngine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     WindowEngine::run()?;
///     Ok(())
/// }
/// ```
pub struct Engine<S: Surface, C: Clock, R: Rng> {
    config: EngineConfig,
    surface: S,
    clock: C,
    pacer: FramePacer,
    population: Population,
    renderer: FrameRenderer,
    rng: R,
    last_stats: FrameStats,
    last_report: f64,
}

impl<S: Surface, C: Clock, R: Rng> Engine<S, C, R> {
    /// 校验配置并生成初始种群
    pub fn new(config: EngineConfig, surface: S, clock: C, mut rng: R) -> EngineResult<Self> {
        config.validate()?;

        let spawner = StarSpawner::new(&config.stars, &config.trail)?;
        let now = clock.now();
        let population = Population::new(
            spawner,
            &config.population,
            surface.viewport(),
            now,
            &mut rng,
        )?;

        Ok(Self {
            pacer: FramePacer::new(config.timing.target_fps, now),
            renderer: FrameRenderer::new(&config.stars),
            config,
            surface,
            clock,
            population,
            rng,
            last_stats: FrameStats::default(),
            last_report: now,
        })
    }

    /// 渲染并提交一帧
    ///
    /// 提交失败会终止主循环，单个图元的失败只记入统计。
    pub fn frame(&mut self) -> EngineResult<FrameStats> {
        let now = self.clock.now();
        let stats = self.renderer.render_frame(
            &mut self.surface,
            &mut self.population,
            now,
            &mut self.rng,
        );
        self.surface.present()?;
        self.pacer.frame_done(now);
        self.last_stats = stats;

        if now - self.last_report >= REPORT_INTERVAL {
            self.last_report = now;
            tracing::info!(
                target: "engine",
                stars = self.population.len(),
                target_stars = self.population.target(),
                trail_samples = self.population.trail_samples(),
                trail_dropped = self.population.trail_dropped(),
                fps = self.pacer.measured_fps(),
                "Frame stats"
            );
        }
        Ok(stats)
    }

    /// 处理平台事件，返回是否继续运行
    pub fn handle_event(&mut self, event: PlatformEvent) -> EngineResult<bool> {
        match event {
            PlatformEvent::Resized(viewport) => {
                tracing::debug!(
                    target: "engine",
                    width = viewport.width,
                    height = viewport.height,
                    "Surface resized"
                );
                self.surface.resize(viewport);
                Ok(true)
            }
            PlatformEvent::Redraw => {
                self.frame()?;
                Ok(true)
            }
            PlatformEvent::Quit => Ok(false),
        }
    }

    /// 窗口标题：星体数量与实测帧率
    pub fn title(&self) -> String {
        format!(
            "{} | {} stars | {:.0} fps",
            self.config.window.title,
            self.population.len(),
            self.pacer.measured_fps()
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// 上一帧的统计
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

/// 桌面窗口上运行的引擎
pub type WindowEngine = Engine<WindowSurface, SystemClock, ThreadRng>;

impl WindowEngine {
    /// 运行引擎主循环
    pub fn run() -> EngineResult<()> {
        let (mut config, source) = EngineConfig::load_or_default()?;
        config.apply_env_overrides();

        initialize_logging(&config.logging);
        match source {
            Some(path) => {
                tracing::info!(target: "engine", "Loaded config from {}", path.display())
            }
            None => tracing::info!(target: "engine", "No config file found, using defaults"),
        }

        let event_loop = EventLoop::new()
            .map_err(|e| EngineError::EventLoop(format!("Failed to create event loop: {}", e)))?;
        let window = WinitWindow::try_new(&event_loop, &config.window)?;

        let presenter = pollster::block_on(GpuPresenter::new(window.shared()))?;
        let surface = WindowSurface::new(Canvas::new(window.viewport()), presenter);

        let mut engine = Self::new(config, surface, SystemClock::new(), rand::thread_rng())?;
        window.set_title(&engine.title());

        Self::run_event_loop(event_loop, window, &mut engine)?;

        tracing::info!(
            target: "engine",
            frames = engine.pacer.frame_count(),
            "Engine shutting down"
        );
        Ok(())
    }

    fn run_event_loop(
        event_loop: EventLoop<()>,
        window: WinitWindow,
        engine: &mut Self,
    ) -> EngineResult<()> {
        let mut failure: Option<EngineError> = None;
        let title_every = u64::from(engine.config.timing.target_fps.max(1));

        let result = event_loop.run(|event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                let Some(platform_event) = translate_window_event(&event) else {
                    return;
                };
                match engine.handle_event(platform_event) {
                    Ok(true) => {
                        if platform_event == PlatformEvent::Redraw
                            && engine.pacer.frame_count() % title_every == 0
                        {
                            window.set_title(&engine.title());
                        }
                    }
                    Ok(false) => {
                        tracing::info!(target: "engine", "Quit requested");
                        elwt.exit();
                    }
                    Err(e) => {
                        tracing::error!(target: "engine", "Frame failed: {}", e);
                        failure = Some(e);
                        elwt.exit();
                    }
                }
            }
            Event::AboutToWait => {
                if engine.pacer.should_render(engine.clock.now()) {
                    window.request_redraw();
                }
                let deadline = engine.clock.instant_at(engine.pacer.next_deadline());
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {}
        });

        result.map_err(|e| EngineError::EventLoop(format!("Event loop error: {}", e)))?;
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 将窗口事件映射为引擎关心的平台事件
pub fn translate_window_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::Quit),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key: Key::Named(NamedKey::Escape),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } => Some(PlatformEvent::Quit),
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized(Viewport::new(
            size.width,
            size.height,
        ))),
        WindowEvent::RedrawRequested => Some(PlatformEvent::Redraw),
        _ => None,
    }
}

/// 初始化日志系统
///
/// `RUST_LOG` 存在时优先使用，否则按配置的级别过滤。
pub fn initialize_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.as_directive()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    tracing::info!(target: "engine", "Engine starting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ManualClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use winit::dpi::PhysicalSize;

    fn test_engine(config: EngineConfig) -> Engine<Canvas, ManualClock, StdRng> {
        Engine::new(
            config,
            Canvas::new(Viewport::new(120, 90)),
            ManualClock::new(0.0),
            StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    #[test]
    fn test_new_spawns_initial_population() {
        let engine = test_engine(EngineConfig::default());
        let pop = engine.population();
        assert!(pop.len() >= 1 && pop.len() <= 100);
        assert_eq!(pop.len(), pop.target());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.timing.target_fps = 0;
        let result = Engine::new(
            config,
            Canvas::new(Viewport::new(10, 10)),
            ManualClock::new(0.0),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_frame_presents_and_paces() {
        let mut engine = test_engine(EngineConfig::default());
        engine.clock().advance(1.0);
        let stats = engine.frame().unwrap();

        assert_eq!(engine.surface().presented_frames(), 1);
        assert_eq!(engine.pacer().frame_count(), 1);
        assert_eq!(engine.last_stats(), stats);
        assert!(!engine.pacer().should_render(engine.clock().now()));
    }

    #[test]
    fn test_handle_event() {
        let mut engine = test_engine(EngineConfig::default());

        assert!(engine
            .handle_event(PlatformEvent::Resized(Viewport::new(64, 32)))
            .unwrap());
        assert_eq!(engine.surface().viewport(), Viewport::new(64, 32));

        assert!(engine.handle_event(PlatformEvent::Redraw).unwrap());
        assert_eq!(engine.surface().presented_frames(), 1);

        assert!(!engine.handle_event(PlatformEvent::Quit).unwrap());
    }

    #[test]
    fn test_title_contains_star_count() {
        let engine = test_engine(EngineConfig::default());
        let title = engine.title();
        assert!(title.starts_with("Dynamic Firework Stars"));
        assert!(title.contains(&format!("{} stars", engine.population().len())));
    }

    #[test]
    fn test_translate_window_event() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(PlatformEvent::Quit)
        );
        assert_eq!(
            translate_window_event(&WindowEvent::Resized(PhysicalSize::new(300, 200))),
            Some(PlatformEvent::Resized(Viewport::new(300, 200)))
        );
        assert_eq!(
            translate_window_event(&WindowEvent::RedrawRequested),
            Some(PlatformEvent::Redraw)
        );
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
