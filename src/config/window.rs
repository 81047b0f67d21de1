use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// 窗口标题
    pub title: String,

    /// 初始宽度（像素）
    pub width: u32,

    /// 初始高度（像素）
    pub height: u32,

    /// 是否允许调整大小
    pub resizable: bool,
}

impl_default!(WindowConfig {
    title: "Dynamic Firework Stars".to_string(),
    width: 800,
    height: 600,
    resizable: true,
});

impl WindowConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(
                "Window size must be non-zero".to_string(),
            ));
        }
        if self.width > 16384 || self.height > 16384 {
            return Err(ConfigError::ValidationError(
                "Window size exceeds 16384".to_string(),
            ));
        }
        Ok(())
    }
}

/// 帧节奏配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// 目标帧率
    pub target_fps: u32,
}

impl_default!(TimingConfig { target_fps: 60 });

impl TimingConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target_fps == 0 || self.target_fps > 1000 {
            return Err(ConfigError::ValidationError(
                "Invalid target FPS".to_string(),
            ));
        }
        Ok(())
    }
}
