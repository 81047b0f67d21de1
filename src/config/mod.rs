/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖和校验
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod particles;
pub mod window;

pub use particles::{PopulationConfig, StarConfig, TrailConfig};
pub use window::{TimingConfig, WindowConfig};

/// 引擎配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 引擎主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 帧节奏配置
    #[serde(default)]
    pub timing: TimingConfig,

    /// 种群配置
    #[serde(default)]
    pub population: PopulationConfig,

    /// 星体配置
    #[serde(default)]
    pub stars: StarConfig,

    /// 拖尾配置
    #[serde(default)]
    pub trail: TrailConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// 从任意键值来源覆盖配置
    ///
    /// 无法解析的值保持原配置不变。
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // 窗口配置
        if let Some(width) = lookup("STARBURST_WINDOW_WIDTH").and_then(|v| v.parse().ok()) {
            self.window.width = width;
        }
        if let Some(height) = lookup("STARBURST_WINDOW_HEIGHT").and_then(|v| v.parse().ok()) {
            self.window.height = height;
        }

        // 帧节奏
        if let Some(fps) = lookup("STARBURST_TARGET_FPS").and_then(|v| v.parse().ok()) {
            self.timing.target_fps = fps;
        }

        // 种群与星体
        if let Some(max) = lookup("STARBURST_MAX_STARS").and_then(|v| v.parse().ok()) {
            self.population.max_stars = max;
        }
        if let Some(apply) = lookup("STARBURST_APPLY_OPACITY").and_then(|v| v.parse().ok()) {
            self.stars.apply_opacity = apply;
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.window.validate()?;
        self.timing.validate()?;
        self.population.validate()?;
        self.stars.validate()?;
        self.trail.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./starburst.toml
    /// 2. ./starburst.json
    /// 3. ~/.config/starburst/config.toml
    /// 4. 使用默认配置
    ///
    /// 返回配置及其来源路径（默认配置时为 `None`）。此时日志系统尚未
    /// 初始化，来源由调用方在初始化日志后输出。
    pub fn load_or_default() -> ConfigResult<(Self, Option<PathBuf>)> {
        let mut candidates = vec![
            PathBuf::from("starburst.toml"),
            PathBuf::from("starburst.json"),
        ];
        if let Some(home) = env::var_os("HOME") {
            candidates.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("starburst")
                    .join("config.toml"),
            );
        }
        Self::load_first(&candidates)
    }

    /// 加载第一个存在的候选文件
    ///
    /// 只跳过不存在的文件；存在但无法读取或解析的文件返回错误。
    pub fn load_first(candidates: &[PathBuf]) -> ConfigResult<(Self, Option<PathBuf>)> {
        for path in candidates {
            let loaded = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => Self::from_json_file(path),
                _ => Self::from_toml_file(path),
            };
            match loaded {
                Ok(config) => return Ok((config, Some(path.clone()))),
                Err(ConfigError::FileError(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(ConfigError::ParseError(msg)) => {
                    return Err(ConfigError::ParseError(format!("{}: {}", path.display(), msg)))
                }
                Err(e) => return Err(e),
            }
        }

        // 使用默认配置
        Ok((Self::default(), None))
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: LogLevel,
}

crate::impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` 指令字符串
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
