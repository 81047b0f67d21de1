use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 种群配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// 目标数量下限（含）
    pub min_stars: u32,

    /// 目标数量上限（含）
    pub max_stars: u32,

    /// 重新抽取目标数量的间隔（秒）
    pub retarget_interval: f64,
}

impl_default!(PopulationConfig {
    min_stars: 1,
    max_stars: 100,
    retarget_interval: 5.0,
});

impl PopulationConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_stars > self.max_stars {
            return Err(ConfigError::ValidationError(
                "population.min_stars exceeds max_stars".to_string(),
            ));
        }
        if !(self.retarget_interval > 0.0) {
            return Err(ConfigError::ValidationError(
                "population.retarget_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// 单个星体的采样范围与生命周期常量
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// 辐条数量范围
    pub min_sides: u32,
    pub max_sides: u32,

    /// 寿命范围（整数秒）
    pub min_lifetime: u32,
    pub max_lifetime: u32,

    /// 目标辐条长度范围
    pub min_length: u32,
    pub max_length: u32,

    /// 长度权重基数：长度 `l` 的权重为 `length_weight_base - l`
    pub length_weight_base: u32,

    /// 线宽范围
    pub min_stroke: u32,
    pub max_stroke: u32,

    /// 淡入/淡出时长（秒）
    pub fade_duration: f64,

    /// 旋转角速度（弧度/秒）
    pub rotation_speed: f64,

    /// 是否把不透明度乘进辐条颜色
    pub apply_opacity: bool,
}

impl_default!(StarConfig {
    min_sides: 1,
    max_sides: 13,
    min_lifetime: 5,
    max_lifetime: 15,
    min_length: 5,
    max_length: 50,
    length_weight_base: 56,
    min_stroke: 1,
    max_stroke: 3,
    fade_duration: 2.0,
    rotation_speed: 0.1,
    apply_opacity: false,
});

impl StarConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        let ranges = [
            ("sides", self.min_sides, self.max_sides),
            ("lifetime", self.min_lifetime, self.max_lifetime),
            ("length", self.min_length, self.max_length),
            ("stroke", self.min_stroke, self.max_stroke),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(ConfigError::ValidationError(format!(
                    "stars.min_{name} exceeds max_{name}"
                )));
            }
        }
        if self.min_sides == 0 {
            return Err(ConfigError::ValidationError(
                "stars.min_sides must be at least 1".to_string(),
            ));
        }
        if self.min_lifetime == 0 {
            return Err(ConfigError::ValidationError(
                "stars.min_lifetime must be at least 1".to_string(),
            ));
        }
        if self.length_weight_base <= self.max_length {
            return Err(ConfigError::ValidationError(
                "stars.length_weight_base must exceed max_length".to_string(),
            ));
        }
        if !(self.fade_duration > 0.0) {
            return Err(ConfigError::ValidationError(
                "stars.fade_duration must be positive".to_string(),
            ));
        }
        if !self.rotation_speed.is_finite() {
            return Err(ConfigError::ValidationError(
                "stars.rotation_speed must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// 拖尾配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// 采样点淡出到黑色所需时间（秒）
    pub fade_seconds: f64,

    /// 每个星体最多保留的采样点数
    pub max_samples: usize,
}

impl_default!(TrailConfig {
    fade_seconds: 5.0,
    max_samples: 200_000,
});

impl TrailConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.fade_seconds > 0.0) {
            return Err(ConfigError::ValidationError(
                "trail.fade_seconds must be positive".to_string(),
            ));
        }
        if self.max_samples == 0 {
            return Err(ConfigError::ValidationError(
                "trail.max_samples must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PopulationConfig::default().validate().is_ok());
        assert!(StarConfig::default().validate().is_ok());
        assert!(TrailConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = StarConfig {
            min_sides: 5,
            max_sides: 2,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config validation error: stars.min_sides exceeds max_sides"
        );
    }

    #[test]
    fn test_weight_base_must_exceed_max_length() {
        let config = StarConfig {
            length_weight_base: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_fade_rejected() {
        let config = TrailConfig {
            fade_seconds: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
