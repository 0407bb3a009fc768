//! 场景钩子上下文

use super::camera::Cameras;
use crate::animation::{ArmatureDisplay, ArmatureFactory};
use crate::core::error::{SceneError, SceneResult};
use crate::resources::Loader;
use bevy_ecs::prelude::*;

/// 场景生命周期钩子收到的上下文
///
/// 只在钩子调用期间存在，借用场景自身的相机、加载器和对象列表以及宿主的 `World`。
pub struct SceneContext<'a> {
    key: &'a str,
    pub cameras: &'a mut Cameras,
    pub load: &'a mut Loader,
    pub world: &'a mut World,
    entities: &'a mut Vec<Entity>,
}

impl<'a> SceneContext<'a> {
    pub fn new(
        key: &'a str,
        cameras: &'a mut Cameras,
        load: &'a mut Loader,
        world: &'a mut World,
        entities: &'a mut Vec<Entity>,
    ) -> Self {
        Self {
            key,
            cameras,
            load,
            world,
            entities,
        }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// 从已加载的资源包创建骨架，对象归属于当前场景
    pub fn add_armature(&mut self, key: &str) -> SceneResult<Entity> {
        self.add_armature_named(key, "")
    }

    pub fn add_armature_named(&mut self, key: &str, armature_name: &str) -> SceneResult<Entity> {
        let entity = ArmatureFactory::build(self.world, key, armature_name)?;
        self.entities.push(entity);
        Ok(entity)
    }

    pub fn armature(&self, entity: Entity) -> Option<&ArmatureDisplay> {
        self.world.get::<ArmatureDisplay>(entity)
    }

    pub fn armature_mut(&mut self, entity: Entity) -> SceneResult<Mut<'_, ArmatureDisplay>> {
        self.world
            .get_mut::<ArmatureDisplay>(entity)
            .ok_or(SceneError::DisplayObjectMissing)
    }

    /// 当前场景创建的对象
    pub fn entities(&self) -> &[Entity] {
        self.entities
    }
}
