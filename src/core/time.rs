//! 时间源与帧节奏
//!
//! - `Clock`: 以秒为单位提供当前时间（f64，亚秒精度）
//! - `SystemClock`: 基于单调时钟 `Instant`，从引擎启动开始计时
//! - `ManualClock`: 手动推进的时钟，用于测试和离线渲染
//! - `FramePacer`: 目标帧率节流，给出下一帧的截止时间，不占用 CPU 空转

use std::cell::Cell;
use std::time::{Duration, Instant};

/// 时间源抽象
pub trait Clock {
    /// 当前时间（秒）
    fn now(&self) -> f64;
}

/// 单调系统时钟
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// 将时钟秒数换算回 `Instant`
    pub fn instant_at(&self, seconds: f64) -> Instant {
        self.start + Duration::from_secs_f64(seconds.max(0.0))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// 手动时钟
///
/// 时间只在调用 `advance`/`set` 时变化。
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// 帧节奏控制器
///
/// 主循环在两帧之间阻塞到 `next_deadline`，从而把吞吐量限制在目标帧率。
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_interval: f64,
    next_deadline: f64,
    frame_count: u64,
    fps_window_start: f64,
    fps_window_frames: u32,
    measured_fps: f32,
}

impl FramePacer {
    pub fn new(target_fps: u32, now: f64) -> Self {
        Self {
            frame_interval: 1.0 / target_fps.max(1) as f64,
            next_deadline: now,
            frame_count: 0,
            fps_window_start: now,
            fps_window_frames: 0,
            measured_fps: 0.0,
        }
    }

    /// 下一帧允许开始的时间
    pub fn next_deadline(&self) -> f64 {
        self.next_deadline
    }

    /// 是否到达下一帧的截止时间
    pub fn should_render(&self, now: f64) -> bool {
        now >= self.next_deadline
    }

    /// 记录一帧完成，推进截止时间
    ///
    /// 落后超过一帧时直接从 `now` 重新对齐，避免追帧。
    pub fn frame_done(&mut self, now: f64) {
        self.frame_count += 1;
        self.next_deadline += self.frame_interval;
        if self.next_deadline < now {
            self.next_deadline = now + self.frame_interval;
        }

        self.fps_window_frames += 1;
        let window = now - self.fps_window_start;
        if window >= 1.0 {
            self.measured_fps = (self.fps_window_frames as f64 / window) as f32;
            self.fps_window_start = now;
            self.fps_window_frames = 0;
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// 最近一秒的实测帧率
    pub fn measured_fps(&self) -> f32 {
        self.measured_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(10.0);
        assert_eq!(clock.now(), 10.0);
        clock.advance(2.5);
        assert_eq!(clock.now(), 12.5);
        clock.set(1.0);
        assert_eq!(clock.now(), 1.0);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let t2 = clock.now();
        assert!(t2 > t1);
    }

    #[test]
    fn test_pacer_throttles_to_target() {
        let mut pacer = FramePacer::new(60, 0.0);
        assert!(pacer.should_render(0.0));
        pacer.frame_done(0.001);

        // 未到下一帧
        assert!(!pacer.should_render(0.010));
        assert!(pacer.should_render(1.0 / 60.0));
        assert_eq!(pacer.frame_count(), 1);
    }

    #[test]
    fn test_pacer_realigns_when_late() {
        let mut pacer = FramePacer::new(60, 0.0);
        pacer.frame_done(0.5);
        assert!((pacer.next_deadline() - (0.5 + 1.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pacer_measures_fps() {
        let mut pacer = FramePacer::new(10, 0.0);
        for i in 1..=11 {
            pacer.frame_done(i as f64 * 0.1);
        }
        assert!((pacer.measured_fps() - 10.0).abs() < 0.5);
    }
}
