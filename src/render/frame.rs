//! 帧渲染器
//!
//! 编排一帧：清屏、调整种群数量、移除过期星体，然后为每个存活星体
//! 绘制辐条并渲染拖尾。提交与节流由引擎负责。
//!
//! ## 辐条几何
//!
//! ```text
//! for j in 0..floor(length):
//!     offset = j (偶数) | -j (奇数)
//!     for side in 0..side_count:
//!         angle    = side * 2π / side_count + phase
//!         endpoint = origin + offset * (cos angle, sin angle)
//! ```

use crate::config::StarConfig;
use crate::core::error::RenderError;
use crate::particles::population::{Population, PopulationChange};
use crate::particles::star::{step_offset, FrameSnapshot, Star, StarLaws};
use crate::platform::surface::Surface;
use crate::render::color::{color_at, Rgb};
use glam::IVec2;
use rand::Rng;

/// 单帧统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// 本帧绘制的星体数
    pub stars: usize,
    /// 绘制的辐条线段数
    pub spokes: usize,
    /// 绘制的拖尾圆点数
    pub trail_dots: usize,
    /// 因过期移除的星体数
    pub retired: usize,
    /// 过期移除的拖尾采样点数
    pub trail_pruned: usize,
    /// 绘制失败次数
    pub draw_failures: usize,
}

/// 帧渲染器
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    laws: StarLaws,
    apply_opacity: bool,
    background: Rgb,
}

impl FrameRenderer {
    pub fn new(config: &StarConfig) -> Self {
        Self {
            laws: StarLaws::from(config),
            apply_opacity: config.apply_opacity,
            background: Rgb::BLACK,
        }
    }

    pub fn laws(&self) -> &StarLaws {
        &self.laws
    }

    /// 渲染完整一帧（不提交）
    pub fn render_frame<S, R>(
        &self,
        surface: &mut S,
        population: &mut Population,
        now: f64,
        rng: &mut R,
    ) -> FrameStats
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut stats = FrameStats::default();
        surface.clear(self.background);

        let viewport = surface.viewport();
        match population.step(now, viewport, rng) {
            PopulationChange::Spawned => {
                tracing::trace!(target: "render", live = population.len(), "Star spawned")
            }
            PopulationChange::Evicted => {
                tracing::trace!(target: "render", live = population.len(), "Star evicted")
            }
            PopulationChange::Unchanged => {}
        }

        stats.retired = population.retire_expired(now);

        for star in population.stars_mut() {
            self.render_star(surface, star, now, &mut stats);
        }

        if stats.draw_failures > 0 {
            tracing::warn!(
                target: "render",
                failures = stats.draw_failures,
                "Frame completed with failed draw calls"
            );
        }
        stats
    }

    /// 绘制单个星体的辐条和拖尾
    ///
    /// 过期星体不产生任何绘制调用。
    pub fn render_star<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        star: &mut Star,
        now: f64,
        stats: &mut FrameStats,
    ) {
        let Some(snapshot) = star.snapshot(now, &self.laws) else {
            return;
        };
        stats.stars += 1;

        let mut last_error: Option<RenderError> = None;
        for j in 0..snapshot.steps() {
            let offset = step_offset(j);
            for side in 0..star.side_count {
                let endpoint = spoke_endpoint(star, &snapshot, side, offset);
                let color = self.spoke_color(endpoint, &snapshot);

                match surface.draw_line(star.origin, endpoint, star.stroke_width, color) {
                    Ok(()) => stats.spokes += 1,
                    Err(e) => {
                        stats.draw_failures += 1;
                        last_error = Some(e);
                    }
                }
                star.trail.push(endpoint, color, now);
            }
        }
        if let Some(e) = last_error {
            tracing::debug!(target: "render", "Spoke draw failed: {}", e);
        }

        let trail = star.trail.render(surface, now, star.stroke_width);
        stats.trail_dots += trail.drawn;
        stats.trail_pruned += trail.pruned;
        stats.draw_failures += trail.failed;
    }

    fn spoke_color(&self, endpoint: IVec2, snapshot: &FrameSnapshot) -> Rgb {
        let color = color_at(
            endpoint.x as f64,
            endpoint.y as f64,
            snapshot.phase,
            snapshot.age,
        );
        if self.apply_opacity {
            color.scaled(snapshot.opacity)
        } else {
            color
        }
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(&StarConfig::default())
    }
}

/// 辐条端点，坐标向零截断到像素
pub fn spoke_endpoint(star: &Star, snapshot: &FrameSnapshot, side: u32, offset: f64) -> IVec2 {
    let angle = star.spoke_angle(side, snapshot.phase);
    IVec2::new(
        (star.origin.x as f64 + offset * angle.cos()) as i32,
        (star.origin.y as f64 + offset * angle.sin()) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::star::{StarKind, StarParams};
    use crate::particles::trail::TrailBuffer;
    use crate::platform::surface::Viewport;
    use crate::render::canvas::Canvas;

    fn cross_star() -> Star {
        Star::new(
            StarParams {
                kind: StarKind::Exploding,
                origin: IVec2::new(50, 50),
                ..StarParams::default()
            },
            0.0,
            TrailBuffer::default(),
        )
    }

    #[test]
    fn test_spoke_endpoints_axis_aligned() {
        let star = cross_star();
        let snapshot = FrameSnapshot {
            age: 0.0,
            phase: 0.0,
            length: 20.0,
            opacity: 1.0,
        };
        assert_eq!(spoke_endpoint(&star, &snapshot, 0, 10.0), IVec2::new(60, 50));
        assert_eq!(spoke_endpoint(&star, &snapshot, 2, 10.0), IVec2::new(40, 50));
        // 奇数步向反方向
        assert_eq!(spoke_endpoint(&star, &snapshot, 0, -3.0), IVec2::new(47, 50));
    }

    #[test]
    fn test_render_star_counts_and_trail() {
        let renderer = FrameRenderer::default();
        let mut canvas = Canvas::new(Viewport::new(100, 100));
        let mut star = cross_star();
        let mut stats = FrameStats::default();

        // age 5 => length 20 => 20 步 × 4 条辐条
        renderer.render_star(&mut canvas, &mut star, 5.0, &mut stats);
        assert_eq!(stats.stars, 1);
        assert_eq!(stats.spokes, 80);
        assert_eq!(star.trail.len(), 80);
        // 线宽 1 => 圆点半径 0，不计为失败
        assert_eq!(stats.trail_dots, 80);
        assert_eq!(stats.draw_failures, 0);
        assert!(canvas.lit_pixels() > 0);
    }

    #[test]
    fn test_expired_star_draws_nothing() {
        let renderer = FrameRenderer::default();
        let mut canvas = Canvas::new(Viewport::new(100, 100));
        let mut star = cross_star();
        let mut stats = FrameStats::default();

        renderer.render_star(&mut canvas, &mut star, 10.0, &mut stats);
        assert_eq!(stats, FrameStats::default());
        assert_eq!(canvas.lit_pixels(), 0);
    }

    #[test]
    fn test_zero_sided_star_draws_no_spokes() {
        let renderer = FrameRenderer::default();
        let mut canvas = Canvas::new(Viewport::new(100, 100));
        let mut star = Star::new(
            StarParams {
                side_count: 0,
                origin: IVec2::new(50, 50),
                ..StarParams::default()
            },
            0.0,
            TrailBuffer::default(),
        );
        let mut stats = FrameStats::default();

        renderer.render_star(&mut canvas, &mut star, 5.0, &mut stats);
        assert_eq!(stats.stars, 1);
        assert_eq!(stats.spokes, 0);
        assert!(star.trail.is_empty());
        assert_eq!(canvas.lit_pixels(), 0);
    }

    #[test]
    fn test_opacity_applied_when_enabled() {
        let config = StarConfig {
            apply_opacity: true,
            ..Default::default()
        };
        let renderer = FrameRenderer::new(&config);
        let mut canvas = Canvas::new(Viewport::new(100, 100));
        let mut star = cross_star();
        let mut stats = FrameStats::default();

        // age 0.0 => opacity 0 => 所有颜色为黑
        renderer.render_star(&mut canvas, &mut star, 0.0, &mut stats);
        assert!(stats.spokes > 0);
        assert!(star.trail.iter().all(|s| s.color == Rgb::BLACK));
        assert_eq!(canvas.lit_pixels(), 0);
    }
}
