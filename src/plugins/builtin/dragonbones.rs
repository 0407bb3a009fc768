//! DragonBones 插件
//!
//! 启动时写入 `ArmatureFactory`，使场景可以从已加载的资源包创建骨架；
//! 每帧按 `Time::delta_seconds` 推进所有骨架的动画。

use crate::animation::{advance_armatures, ArmatureFactory};
use crate::core::resources::Time;
use crate::plugins::{EnginePlugin, PluginVersion};
use bevy_ecs::world::World;

/// 插件默认安装 key
pub const DRAGONBONES_PLUGIN_KEY: &str = "DragonBonesPlugin";

#[derive(Debug, Default, Clone, Copy)]
pub struct DragonBonesPlugin;

impl DragonBonesPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl EnginePlugin for DragonBonesPlugin {
    fn name(&self) -> &'static str {
        DRAGONBONES_PLUGIN_KEY
    }

    fn version(&self) -> PluginVersion {
        PluginVersion::new(5, 6, 0)
    }

    fn description(&self) -> &'static str {
        "Skeletal animation: armature factory and per-frame animation clock"
    }

    fn startup(&self, world: &mut World) {
        world.insert_resource(ArmatureFactory::default());
    }

    fn update(&self, world: &mut World) {
        let delta = world
            .get_resource::<Time>()
            .map(|t| t.delta_seconds)
            .unwrap_or_default();
        advance_armatures(world, delta);
    }

    fn shutdown(&self, world: &mut World) {
        if let Some(factory) = world.remove_resource::<ArmatureFactory>() {
            tracing::debug!(target: "dragonbones", built = factory.built(), "armature factory released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::PluginRegistry;

    #[test]
    fn test_factory_lifecycle() {
        let mut world = World::new();
        let mut registry = PluginRegistry::new();
        registry
            .install(DRAGONBONES_PLUGIN_KEY, DragonBonesPlugin::new(), true)
            .unwrap();

        assert!(!world.contains_resource::<ArmatureFactory>());
        registry.boot(&mut world).unwrap();
        assert!(world.contains_resource::<ArmatureFactory>());

        registry.shutdown_all(&mut world);
        assert!(!world.contains_resource::<ArmatureFactory>());
    }

    #[test]
    fn test_update_without_time_is_noop() {
        let mut world = World::new();
        DragonBonesPlugin.startup(&mut world);
        DragonBonesPlugin.update(&mut world);
        assert_eq!(world.resource::<ArmatureFactory>().built(), 0);
    }

    #[test]
    fn test_metadata() {
        let metadata = DragonBonesPlugin.metadata();
        assert_eq!(metadata.name, "DragonBonesPlugin");
        assert_eq!(metadata.version, PluginVersion::new(5, 6, 0));
        assert!(metadata.dependencies.is_empty());
    }
}
