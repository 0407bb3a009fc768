//! 骨架显示对象与工厂

use super::player::AnimationState;
use crate::core::error::{AnimationError, AnimationResult};
use crate::resources::BundleCache;
use bevy_ecs::prelude::*;
use glam::Vec2;

/// 骨架显示对象组件
#[derive(Component, Debug, Clone)]
pub struct ArmatureDisplay {
    /// 资源包 key
    pub key: String,
    pub armature_name: String,
    pub position: Vec2,
    pub animation: AnimationState,
}

impl ArmatureDisplay {
    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.position = Vec2::new(x, y);
        self
    }
}

/// 骨架工厂，由 `DragonBonesPlugin` 在启动时写入 `World`
#[derive(Resource, Debug, Default)]
pub struct ArmatureFactory {
    built: u64,
}

impl ArmatureFactory {
    /// 已创建的骨架数量
    pub fn built(&self) -> u64 {
        self.built
    }

    /// 从已加载的资源包创建骨架实体
    ///
    /// `armature_name` 为空时使用资源包中的第一个骨架；骨架的 `defaultActions`
    /// 会在创建时执行。
    pub fn build(world: &mut World, key: &str, armature_name: &str) -> AnimationResult<Entity> {
        if !world.contains_resource::<ArmatureFactory>() {
            return Err(AnimationError::RuntimeMissing);
        }

        let bundle = world
            .get_resource::<BundleCache>()
            .and_then(|cache| cache.get(key))
            .ok_or_else(|| AnimationError::BundleNotLoaded(key.to_string()))?;

        let armature = bundle.skeleton.armature(armature_name).ok_or_else(|| {
            AnimationError::UnknownArmature {
                key: key.to_string(),
                armature: armature_name.to_string(),
            }
        })?;

        let frame_rate = armature.frame_rate(bundle.skeleton.frame_rate);
        let mut animation = AnimationState::from_armature(armature, frame_rate);
        if let Some(default) = armature.default_animation() {
            if let Err(e) = animation.play(default) {
                tracing::warn!(target: "dragonbones", key, error = %e, "default action ignored");
            }
        }

        let display = ArmatureDisplay {
            key: key.to_string(),
            armature_name: armature.name.clone(),
            position: Vec2::ZERO,
            animation,
        };
        let entity = world.spawn(display).id();

        world.resource_mut::<ArmatureFactory>().built += 1;
        tracing::debug!(target: "dragonbones", key, armature = %armature.name, ?entity, "armature built");
        Ok(entity)
    }
}

/// 按帧推进所有骨架的动画
pub fn advance_armatures(world: &mut World, delta_seconds: f32) {
    let mut query = world.query::<&mut ArmatureDisplay>();
    for mut display in query.iter_mut(world) {
        display.animation.advance(delta_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::cache::tests::{png_bytes, ATLAS_JSON, SKELETON_JSON};
    use crate::resources::DragonBonesBundle;

    fn world_with_bundle() -> World {
        let mut world = World::new();
        let mut cache = BundleCache::new();
        cache.insert(
            DragonBonesBundle::decode(
                "kenny",
                &png_bytes(2, 2),
                ATLAS_JSON.as_bytes(),
                SKELETON_JSON.as_bytes(),
            )
            .unwrap(),
        );
        world.insert_resource(cache);
        world
    }

    #[test]
    fn test_build_requires_runtime() {
        let mut world = world_with_bundle();
        assert_eq!(
            ArmatureFactory::build(&mut world, "kenny", ""),
            Err(AnimationError::RuntimeMissing)
        );
    }

    #[test]
    fn test_build_requires_loaded_bundle() {
        let mut world = world_with_bundle();
        world.insert_resource(ArmatureFactory::default());
        assert_eq!(
            ArmatureFactory::build(&mut world, "robot", ""),
            Err(AnimationError::BundleNotLoaded("robot".to_string()))
        );
        assert!(matches!(
            ArmatureFactory::build(&mut world, "kenny", "tail"),
            Err(AnimationError::UnknownArmature { .. })
        ));
    }

    #[test]
    fn test_build_applies_default_action() {
        let mut world = world_with_bundle();
        world.insert_resource(ArmatureFactory::default());

        let entity = ArmatureFactory::build(&mut world, "kenny", "").unwrap();
        let display = world.get::<ArmatureDisplay>(entity).unwrap();
        assert_eq!(display.key, "kenny");
        assert_eq!(display.armature_name, "biped");
        assert_eq!(display.position, Vec2::ZERO);
        assert_eq!(display.animation.last_animation_name(), Some("idle_south"));
        assert_eq!(world.resource::<ArmatureFactory>().built(), 1);
    }

    #[test]
    fn test_advance_armatures() {
        let mut world = world_with_bundle();
        world.insert_resource(ArmatureFactory::default());
        let entity = ArmatureFactory::build(&mut world, "kenny", "").unwrap();

        advance_armatures(&mut world, 0.5);
        let display = world.get::<ArmatureDisplay>(entity).unwrap();
        assert!((display.animation.current_time() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_position_setters() {
        let mut world = world_with_bundle();
        world.insert_resource(ArmatureFactory::default());
        let entity = ArmatureFactory::build(&mut world, "kenny", "").unwrap();

        let mut display = world.get_mut::<ArmatureDisplay>(entity).unwrap();
        display.set_x(200.0);
        display.set_y(350.0);
        assert_eq!((display.x(), display.y()), (200.0, 350.0));
        display.set_position(1.0, 2.0);
        assert_eq!(display.position, Vec2::new(1.0, 2.0));
    }
}
