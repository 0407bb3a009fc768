//! 核心模块
//!
//! 包含宿主的核心功能：
//! - `engine` - 宿主入口和运行循环
//! - `resources` - ECS资源定义
//! - `error` - 错误类型定义

pub mod engine;
pub mod error;
pub mod resources;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{
    AnimationError, AnimationResult, AssetError, AssetResult, EngineError, EngineResult,
    PluginError, PluginResult, SceneError, SceneResult,
};

// 重新导出主要类型
pub use engine::{Game, StopHandle};
pub use resources::Time;
