//! 插件系统核心
//!
//! 插件通过 `PluginRegistry` 显式安装到宿主上，随宿主销毁而关闭。

use bevy_ecs::prelude::*;

/// 插件版本信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PluginVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

/// 插件依赖信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDependency {
    pub name: String,
}

/// 插件元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    pub name: String,
    pub version: PluginVersion,
    pub description: String,
    pub dependencies: Vec<PluginDependency>,
}

/// 引擎插件 Trait
pub trait EnginePlugin: Send + Sync {
    /// 插件名称
    fn name(&self) -> &'static str;

    /// 插件版本
    fn version(&self) -> PluginVersion {
        PluginVersion::new(1, 0, 0)
    }

    /// 插件描述
    fn description(&self) -> &'static str {
        ""
    }

    /// 插件依赖（启动前必须处于激活状态的插件 key）
    fn dependencies(&self) -> Vec<PluginDependency> {
        Vec::new()
    }

    /// 启动阶段 - 写入运行时资源
    fn startup(&self, _world: &mut World) {}

    /// 更新阶段 - 每帧调用
    fn update(&self, _world: &mut World) {}

    /// 关闭阶段 - 清理资源
    fn shutdown(&self, _world: &mut World) {}

    /// 获取插件元数据
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: self.name().to_string(),
            version: self.version(),
            description: self.description().to_string(),
            dependencies: self.dependencies(),
        }
    }
}

pub mod registry;
pub use registry::PluginRegistry;

// 内置插件
pub mod builtin;
