//! 内置插件模块

pub mod dragonbones;

// 重新导出内置插件
pub use dragonbones::{DragonBonesPlugin, DRAGONBONES_PLUGIN_KEY};
