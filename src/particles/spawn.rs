//! 星体随机生成
//!
//! 所有参数在出生时一次性采样。目标长度服从偏向短辐条的加权分布：
//! 长度 `l` 的权重为 `length_weight_base - l`。

use super::star::{Star, StarKind, StarParams};
use super::trail::TrailBuffer;
use crate::config::{ConfigError, ConfigResult, StarConfig, TrailConfig};
use crate::platform::surface::Viewport;
use glam::IVec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::f64::consts::TAU;

/// 星体生成器
#[derive(Debug, Clone)]
pub struct StarSpawner {
    config: StarConfig,
    trail: TrailConfig,
    lengths: Vec<u32>,
    length_dist: WeightedIndex<u32>,
}

impl StarSpawner {
    /// 根据配置构建生成器
    ///
    /// # 错误
    ///
    /// 任一采样范围为空、权重全为零或拖尾参数无效时返回
    /// `ConfigError::ValidationError`。
    pub fn new(config: &StarConfig, trail: &TrailConfig) -> ConfigResult<Self> {
        config.validate()?;
        trail.validate()?;

        let lengths: Vec<u32> = (config.min_length..=config.max_length).collect();
        let weights = lengths
            .iter()
            .map(|&l| config.length_weight_base.saturating_sub(l));
        let length_dist = WeightedIndex::new(weights).map_err(|e| {
            ConfigError::ValidationError(format!("Invalid star length distribution: {}", e))
        })?;

        Ok(Self {
            config: config.clone(),
            trail: trail.clone(),
            lengths,
            length_dist,
        })
    }

    /// 采样一个目标长度
    pub fn sample_length<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.lengths[self.length_dist.sample(rng)]
    }

    /// 长度 `l` 的相对权重
    pub fn length_weight(&self, length: u32) -> u32 {
        if length < self.config.min_length || length > self.config.max_length {
            return 0;
        }
        self.config.length_weight_base.saturating_sub(length)
    }

    /// 空拖尾缓冲
    pub fn new_trail(&self) -> TrailBuffer {
        TrailBuffer::new(self.trail.fade_seconds, self.trail.max_samples)
    }

    /// 在视口内生成一个新星体
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, viewport: Viewport, now: f64) -> Star {
        let c = &self.config;
        let kind = StarKind::ALL[rng.gen_range(0..StarKind::ALL.len())];
        let origin = IVec2::new(
            rng.gen_range(0..=viewport.width) as i32,
            rng.gen_range(0..=viewport.height) as i32,
        );
        let phase = rng.gen_range(0.0..TAU);
        let color_phase = [
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
        ];
        let params = StarParams {
            kind,
            origin,
            side_count: rng.gen_range(c.min_sides..=c.max_sides),
            lifetime_seconds: rng.gen_range(c.min_lifetime..=c.max_lifetime),
            target_length: self.sample_length(rng),
            stroke_width: rng.gen_range(c.min_stroke..=c.max_stroke),
        };

        Star::new(params, now, self.new_trail())
        .with_phase(phase)
        .with_color_phase(color_phase)
    }

    pub fn config(&self) -> &StarConfig {
        &self.config
    }
}
