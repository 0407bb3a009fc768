//! 统一错误处理模块
//!
//! 提供引擎范围内的统一错误类型定义
//!
//! ## 错误类型分层
//!
//! - **资源层** (`AssetError`): 资源读取、解码、关联
//! - **插件层** (`PluginError`): 插件注册与启动
//! - **场景层** (`SceneError`): 场景生命周期钩子
//! - **动画层** (`AnimationError`): 骨架创建与动画播放
//!
//! `EngineError` 通过 `#[from]` 汇总以上所有错误。

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Host already destroyed")]
    Destroyed,
}

/// 资源管理错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Asset not found: {path}")]
    NotFound { path: String },

    #[error("Failed to load asset: {path}, reason: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Invalid asset format: {path}, expected: {expected}")]
    InvalidFormat { path: String, expected: String },

    #[error("Asset decode error: {0}")]
    Decode(String),
}

/// 插件错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("Duplicate plugin: {0}")]
    DuplicatePlugin(String),

    #[error("Plugin not installed: {0}")]
    NotInstalled(String),

    #[error("Plugin not started: {0}")]
    NotStarted(String),

    #[error("Missing dependency: {0} requires {1}")]
    MissingDependency(String, String),
}

/// 场景错误
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Duplicate scene key: {0}")]
    DuplicateScene(String),

    #[error("Scene not found: {0}")]
    NotFound(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Display object not found")]
    DisplayObjectMissing,

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// 动画错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Armature runtime not started (is DragonBonesPlugin installed?)")]
    RuntimeMissing,

    #[error("Bundle not loaded: {0}")]
    BundleNotLoaded(String),

    #[error("Armature not found: {armature} in bundle {key}")]
    UnknownArmature { key: String, armature: String },

    #[error("Animation clip not found: {0}")]
    UnknownClip(String),
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
pub type AssetResult<T> = Result<T, AssetError>;
pub type PluginResult<T> = Result<T, PluginError>;
pub type SceneResult<T> = Result<T, SceneError>;
pub type AnimationResult<T> = Result<T, AnimationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let asset_err = AssetError::NotFound {
            path: "biped_tex.png".to_string(),
        };
        let engine_err: EngineError = asset_err.into();
        assert!(matches!(engine_err, EngineError::Asset(_)));

        let scene_err: SceneError = AnimationError::UnknownClip("run".to_string()).into();
        let engine_err: EngineError = scene_err.into();
        assert!(matches!(engine_err, EngineError::Scene(SceneError::Animation(_))));
    }

    #[test]
    fn test_error_display() {
        let err = AnimationError::UnknownClip("idle_west".to_string());
        assert_eq!(err.to_string(), "Animation clip not found: idle_west");

        let err = PluginError::DuplicatePlugin("DragonBonesPlugin".to_string());
        assert_eq!(err.to_string(), "Duplicate plugin: DragonBonesPlugin");
    }
}
