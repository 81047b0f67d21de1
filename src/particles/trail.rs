//! 拖尾缓冲
//!
//! 记录每个已绘制的辐条端点，按年龄淡出为圆点，超过淡出时间后移除。
//! 渲染与剪枝在同一次遍历中完成（`VecDeque::retain` 原地过滤），
//! 剩余采样点既不会被跳过也不会被重复绘制。

use crate::core::error::RenderError;
use crate::platform::surface::Surface;
use crate::render::color::Rgb;
use glam::IVec2;
use std::collections::VecDeque;

/// 默认淡出时间（秒）
pub const DEFAULT_FADE_SECONDS: f64 = 5.0;
/// 默认容量上限
pub const DEFAULT_MAX_SAMPLES: usize = 200_000;

/// 拖尾采样点，创建后不可变
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: IVec2,
    pub color: Rgb,
    pub emitted_at: f64,
}

/// 一次拖尾渲染的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrailRenderStats {
    /// 绘制的圆点数
    pub drawn: usize,
    /// 过期移除的采样点数
    pub pruned: usize,
    /// 绘制失败次数
    pub failed: usize,
}

/// 带容量上限的拖尾缓冲
///
/// 超出容量时丢弃最旧的采样点。
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    samples: VecDeque<TrailSample>,
    fade_seconds: f64,
    max_samples: usize,
    dropped: u64,
}

impl TrailBuffer {
    pub fn new(fade_seconds: f64, max_samples: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            fade_seconds,
            max_samples: max_samples.max(1),
            dropped: 0,
        }
    }

    /// 追加一个采样点，O(1) 均摊
    pub fn push(&mut self, position: IVec2, color: Rgb, now: f64) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
            self.dropped += 1;
        }
        self.samples.push_back(TrailSample {
            position,
            color,
            emitted_at: now,
        });
    }

    /// 淡出系数 `max(0, 1 - age / fade)`
    pub fn fade_factor(&self, age: f64) -> f64 {
        fade_at(age, self.fade_seconds)
    }

    /// 绘制所有存活采样点并移除过期采样点
    ///
    /// 圆点半径为 `stroke_width / 2`（整数除法），颜色按淡出系数缩放。
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        now: f64,
        stroke_width: u32,
    ) -> TrailRenderStats {
        let fade_seconds = self.fade_seconds;
        let radius = stroke_width / 2;
        let mut stats = TrailRenderStats::default();
        let mut last_error: Option<RenderError> = None;

        self.samples.retain(|sample| {
            let age = now - sample.emitted_at;
            if is_expired(age, fade_seconds) {
                stats.pruned += 1;
                return false;
            }
            let color = sample.color.scaled(fade_at(age, fade_seconds));
            match surface.fill_circle(sample.position, radius, color) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    stats.failed += 1;
                    last_error = Some(e);
                }
            }
            true
        });

        if let Some(e) = last_error {
            tracing::warn!(target: "particles", failed = stats.failed, "Trail draw failed: {}", e);
        }
        stats
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn fade_seconds(&self) -> f64 {
        self.fade_seconds
    }

    /// 因容量上限被丢弃的采样点总数
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// 年龄达到淡出时间即过期
fn is_expired(age: f64, fade_seconds: f64) -> bool {
    age >= fade_seconds
}

fn fade_at(age: f64, fade_seconds: f64) -> f64 {
    (1.0 - age / fade_seconds).max(0.0)
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SECONDS, DEFAULT_MAX_SAMPLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::Canvas;
    use crate::platform::surface::Viewport;

    #[test]
    fn test_push_and_len() {
        let mut trail = TrailBuffer::default();
        trail.push(IVec2::new(1, 2), Rgb::WHITE, 0.0);
        trail.push(IVec2::new(3, 4), Rgb::WHITE, 0.1);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.iter().next().unwrap().position, IVec2::new(1, 2));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut trail = TrailBuffer::new(5.0, 3);
        for i in 0..5 {
            trail.push(IVec2::new(i, 0), Rgb::WHITE, i as f64);
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.dropped(), 2);
        assert_eq!(trail.iter().next().unwrap().position, IVec2::new(2, 0));
    }

    #[test]
    fn test_fade_factor() {
        let trail = TrailBuffer::default();
        assert_eq!(trail.fade_factor(0.0), 1.0);
        assert!((trail.fade_factor(2.5) - 0.5).abs() < 1e-12);
        assert_eq!(trail.fade_factor(5.0), 0.0);
        assert_eq!(trail.fade_factor(7.0), 0.0);
    }

    #[test]
    fn test_render_prunes_stale_samples() {
        let mut canvas = Canvas::new(Viewport::new(64, 64));
        let mut trail = TrailBuffer::default();
        trail.push(IVec2::new(10, 10), Rgb::WHITE, 0.0);
        trail.push(IVec2::new(20, 20), Rgb::WHITE, 2.5);

        let stats = trail.render(&mut canvas, 5.0, 3);
        assert_eq!(stats.pruned, 1);
        assert_eq!(stats.drawn, 1);
        assert_eq!(trail.len(), 1);

        // 被剪掉的点没有绘制
        assert_eq!(canvas.pixel(10, 10), Some(Rgb::BLACK));
        // 年龄 2.5s => 系数 0.5 => 127
        assert_eq!(canvas.pixel(20, 20), Some(Rgb::new(127, 127, 127)));
    }
}
