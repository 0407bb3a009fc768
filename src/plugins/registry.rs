//! 插件注册表
//!
//! 管理宿主安装的所有插件。注册表按安装顺序保存插件，`start: true` 的插件在
//! 宿主启动时激活；关闭按激活顺序的逆序进行。

use super::{EnginePlugin, PluginMetadata};
use crate::core::error::{PluginError, PluginResult};
use bevy_ecs::world::World;

struct PluginEntry {
    key: String,
    plugin: Box<dyn EnginePlugin>,
    start: bool,
}

#[derive(Default)]
pub struct PluginRegistry {
    entries: Vec<PluginEntry>,
    /// 已激活插件的 key，按激活顺序
    active: Vec<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 安装插件
    pub fn install<P: EnginePlugin + 'static>(
        &mut self,
        key: impl Into<String>,
        plugin: P,
        start: bool,
    ) -> PluginResult<&mut Self> {
        let key = key.into();

        // 检查重复插件
        if self.has_plugin(&key) {
            return Err(PluginError::DuplicatePlugin(key));
        }

        tracing::debug!(target: "plugin", %key, name = plugin.name(), start, "plugin installed");
        self.entries.push(PluginEntry {
            key,
            plugin: Box::new(plugin),
            start,
        });
        Ok(self)
    }

    /// 激活所有 `start: true` 的插件（按安装顺序）
    pub fn boot(&mut self, world: &mut World) -> PluginResult<()> {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.start)
            .map(|e| e.key.clone())
            .collect();
        for key in keys {
            if !self.is_active(&key) {
                self.start(&key, world)?;
            }
        }
        Ok(())
    }

    /// 激活已安装的插件
    pub fn start(&mut self, key: &str, world: &mut World) -> PluginResult<()> {
        if self.is_active(key) {
            return Ok(());
        }
        let entry = self
            .entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| PluginError::NotInstalled(key.to_string()))?;

        // 检查依赖
        for dep in entry.plugin.dependencies() {
            if !self.is_active(&dep.name) {
                return Err(PluginError::MissingDependency(key.to_string(), dep.name));
            }
        }

        entry.plugin.startup(world);
        tracing::info!(target: "plugin", key, version = ?entry.plugin.version(), "plugin started");
        self.active.push(key.to_string());
        Ok(())
    }

    /// 停止已激活的插件
    pub fn stop(&mut self, key: &str, world: &mut World) -> PluginResult<()> {
        let position = self
            .active
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| PluginError::NotStarted(key.to_string()))?;

        if let Some(entry) = self.entries.iter().find(|e| e.key == key) {
            entry.plugin.shutdown(world);
        }
        self.active.remove(position);
        tracing::info!(target: "plugin", key, "plugin stopped");
        Ok(())
    }

    /// 更新所有已激活插件
    pub fn update_all(&self, world: &mut World) {
        for key in &self.active {
            if let Some(entry) = self.entries.iter().find(|e| &e.key == key) {
                entry.plugin.update(world);
            }
        }
    }

    /// 关闭所有插件（反向顺序）
    pub fn shutdown_all(&mut self, world: &mut World) {
        while let Some(key) = self.active.pop() {
            if let Some(entry) = self.entries.iter().find(|e| e.key == key) {
                entry.plugin.shutdown(world);
                tracing::info!(target: "plugin", %key, "plugin stopped");
            }
        }
    }

    /// 关闭并移除所有插件
    pub fn clear(&mut self, world: &mut World) {
        self.shutdown_all(world);
        self.entries.clear();
    }

    /// 检查插件是否已安装
    pub fn has_plugin(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.iter().any(|k| k == key)
    }

    /// 已安装插件的 key（安装顺序）
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    /// 已激活插件的 key（激活顺序）
    pub fn started_keys(&self) -> Vec<&str> {
        self.active.iter().map(String::as_str).collect()
    }

    /// 安装时标记为 `start: true` 的插件 key
    pub fn autostart_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.start)
            .map(|e| e.key.as_str())
            .collect()
    }

    /// 获取插件元数据列表
    pub fn list_plugins(&self) -> Vec<PluginMetadata> {
        self.entries.iter().map(|e| e.plugin.metadata()).collect()
    }

    /// 获取插件数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::PluginDependency;
    use bevy_ecs::prelude::*;

    #[derive(Resource, Default)]
    struct CallLog(Vec<String>);

    struct Tracker {
        name: &'static str,
        deps: Vec<&'static str>,
    }

    impl Tracker {
        fn new(name: &'static str) -> Self {
            Self { name, deps: Vec::new() }
        }

        fn push(&self, world: &mut World, what: &str) {
            world
                .get_resource_or_insert_with(CallLog::default)
                .0
                .push(format!("{}:{}", self.name, what));
        }
    }

    impl EnginePlugin for Tracker {
        fn name(&self) -> &'static str {
            self.name
        }

        fn dependencies(&self) -> Vec<PluginDependency> {
            self.deps
                .iter()
                .map(|d| PluginDependency { name: d.to_string() })
                .collect()
        }

        fn startup(&self, world: &mut World) {
            self.push(world, "startup");
        }

        fn update(&self, world: &mut World) {
            self.push(world, "update");
        }

        fn shutdown(&self, world: &mut World) {
            self.push(world, "shutdown");
        }
    }

    fn log(world: &World) -> Vec<String> {
        world.resource::<CallLog>().0.clone()
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut registry = PluginRegistry::new();
        registry.install("A", Tracker::new("A"), true).unwrap();
        assert!(matches!(
            registry.install("A", Tracker::new("A"), false),
            Err(PluginError::DuplicatePlugin(key)) if key == "A"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_boot_starts_only_autostart_plugins() {
        let mut world = World::new();
        let mut registry = PluginRegistry::new();
        registry.install("A", Tracker::new("A"), true).unwrap();
        registry.install("B", Tracker::new("B"), false).unwrap();

        registry.boot(&mut world).unwrap();
        assert_eq!(registry.started_keys(), ["A"]);
        assert_eq!(registry.keys(), ["A", "B"]);
        assert_eq!(registry.autostart_keys(), ["A"]);
        assert!(!registry.is_active("B"));
        let names: Vec<String> = registry.list_plugins().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["A", "B"]);

        registry.start("B", &mut world).unwrap();
        registry.update_all(&mut world);
        registry.shutdown_all(&mut world);

        assert_eq!(
            log(&world),
            [
                "A:startup",
                "B:startup",
                "A:update",
                "B:update",
                "B:shutdown",
                "A:shutdown"
            ]
        );
        assert!(registry.started_keys().is_empty());
    }

    #[test]
    fn test_dependency_must_be_active() {
        let mut world = World::new();
        let mut registry = PluginRegistry::new();
        registry.install("Base", Tracker::new("Base"), false).unwrap();
        registry
            .install("Child", Tracker { name: "Child", deps: vec!["Base"] }, false)
            .unwrap();

        assert_eq!(
            registry.start("Child", &mut world),
            Err(PluginError::MissingDependency(
                "Child".to_string(),
                "Base".to_string()
            ))
        );
        registry.start("Base", &mut world).unwrap();
        registry.start("Child", &mut world).unwrap();
        assert_eq!(registry.started_keys(), ["Base", "Child"]);
    }

    #[test]
    fn test_unknown_and_inactive_plugins() {
        let mut world = World::new();
        let mut registry = PluginRegistry::new();
        assert_eq!(
            registry.start("Nope", &mut world),
            Err(PluginError::NotInstalled("Nope".to_string()))
        );
        registry.install("A", Tracker::new("A"), false).unwrap();
        assert_eq!(
            registry.stop("A", &mut world),
            Err(PluginError::NotStarted("A".to_string()))
        );
    }

    #[test]
    fn test_clear_shuts_down_and_empties() {
        let mut world = World::new();
        let mut registry = PluginRegistry::new();
        registry.install("A", Tracker::new("A"), true).unwrap();
        registry.boot(&mut world).unwrap();

        registry.clear(&mut world);
        assert!(registry.is_empty());
        assert_eq!(log(&world), ["A:startup", "A:shutdown"]);
    }
}
