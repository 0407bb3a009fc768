/// 宿主配置系统
///
/// 提供宿主（`Game`）构造时使用的固定配置记录，支持 TOML/JSON 解析与校验。
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::impl_default;

/// 配置错误
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

/// 渲染模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererType {
    /// 由宿主自行选择
    Auto,
    Canvas,
    #[serde(rename = "webgl")]
    WebGl,
    /// 不输出画面
    Headless,
}

/// 宿主主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// 渲染模式
    #[serde(rename = "type")]
    pub renderer: RendererType,
    /// 视口宽度
    pub width: u32,
    /// 视口高度
    pub height: u32,
    /// 挂载目标标识
    pub parent: String,
    /// 目标帧率
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// 加载器配置
    #[serde(default)]
    pub loader: LoaderConfig,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_fps() -> u32 {
    60
}

impl_default!(GameConfig {
    renderer: RendererType::Auto,
    width: 1024,
    height: 768,
    parent: String::new(),
    fps: default_fps(),
    loader: LoaderConfig::default(),
    logging: LoggingConfig::default(),
});

impl GameConfig {
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

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 序列化为TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::ValidationError(
                "fps must be greater than 0".to_string(),
            ));
        }
        self.loader.validate()
    }
}

/// 加载器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 每帧最多处理的加载请求数
    pub max_parallel: usize,
}

impl_default!(LoaderConfig { max_parallel: 32 });

impl LoaderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_parallel == 0 {
            return Err(ConfigError::ValidationError(
                "loader.max_parallel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
    /// 是否输出目标名（engine / scene / loader ...）
    pub with_target: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    with_target: true,
});

impl LoggingConfig {
    /// 组合过滤指令：配置级别在前，`RUST_LOG` 指令追加在后
    ///
    /// 针对单个 target 的环境指令只影响该 target，其余 target 仍使用配置级别。
    pub fn filter_directives(&self, env: Option<&str>) -> String {
        let mut directives = self.level.as_directive().to_string();
        if let Some(env) = env.map(str::trim).filter(|env| !env.is_empty()) {
            directives.push(',');
            directives.push_str(env);
        }
        directives
    }
}

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
