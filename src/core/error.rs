//! 统一错误处理模块
//!
//! 提供引擎范围内的统一错误类型定义
//!
//! ## 错误类型分层
//!
//! - **模拟层**: 星体生命周期、颜色场、拖尾缓冲都是全函数，没有可恢复错误
//! - **渲染层** (`RenderError`): 显示表面、GPU 设备、帧提交
//! - **配置层** (`config::ConfigError`): 文件读取、解析、校验
//!
//! `EngineError` 汇总以上所有错误，作为主循环的终止信号向上传播。

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Event loop error: {0}")]
    EventLoop(String),
}

/// 渲染系统错误
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),

    #[error("Failed to request adapter: no compatible GPU found")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    DeviceRequest(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Draw call failed: {0}")]
    DrawFailed(String),
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let render_err = RenderError::Surface("lost".to_string());
        let engine_err: EngineError = render_err.into();
        assert!(matches!(engine_err, EngineError::Render(_)));
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = ConfigError::ValidationError("target_fps".to_string());
        let engine_err: EngineError = config_err.into();
        assert!(matches!(engine_err, EngineError::Config(_)));
        assert_eq!(
            engine_err.to_string(),
            "Config error: Config validation error: target_fps"
        );
    }

    #[test]
    fn test_error_display() {
        let err = RenderError::NoAdapter;
        assert_eq!(
            err.to_string(),
            "Failed to request adapter: no compatible GPU found"
        );
    }
}
