//! 场景管理器
//!
//! 驱动每个场景的生命周期。状态只在 `advance` 中迁移：
//!
//! - `Pending`: 调用 `preload`，启动加载器，进入 `Loading`
//! - `Loading`: 每帧处理至多 `max_parallel` 个请求；队列清空后调用一次 `create`，进入 `Running`
//! - `Running`: 每帧调用 `update`

use super::camera::Cameras;
use super::context::SceneContext;
use super::Scene;
use crate::config::GameConfig;
use crate::core::error::{SceneError, SceneResult};
use crate::core::resources::Time;
use crate::resources::{AssetSource, BundleCache, Loader};
use bevy_ecs::prelude::*;

/// 场景状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    /// 已注册，未启动
    Idle,
    /// 等待下一帧执行 `preload`
    Pending,
    Loading,
    Running,
    Shutdown,
}

/// 场景及其运行时状态
pub struct SceneRecord {
    key: String,
    scene: Box<dyn Scene>,
    pub status: SceneStatus,
    pub cameras: Cameras,
    pub loader: Loader,
    pub entities: Vec<Entity>,
    /// 钩子返回的错误（已记录日志）
    pub errors: Vec<String>,
}

impl SceneRecord {
    pub fn key(&self) -> &str {
        &self.key
    }

    fn report(&mut self, hook: &str, error: SceneError) {
        tracing::error!(target: "scene", scene = %self.key, hook, %error, "scene hook failed");
        self.errors.push(format!("{}: {}", hook, error));
    }
}

/// 场景管理器
pub struct SceneManager {
    scenes: Vec<SceneRecord>,
    viewport: (u32, u32),
    max_parallel: usize,
}

impl SceneManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scenes: Vec::new(),
            viewport: (config.width, config.height),
            max_parallel: config.loader.max_parallel,
        }
    }

    /// 注册场景；`autostart` 为真时在下一帧开始生命周期
    pub fn add(&mut self, scene: Box<dyn Scene>, autostart: bool) -> SceneResult<()> {
        let key = scene.key().to_string();
        if self.get(&key).is_some() {
            return Err(SceneError::DuplicateScene(key));
        }

        tracing::debug!(target: "scene", scene = %key, autostart, "scene added");
        self.scenes.push(SceneRecord {
            key,
            scene,
            status: if autostart {
                SceneStatus::Pending
            } else {
                SceneStatus::Idle
            },
            cameras: Cameras::new(self.viewport.0, self.viewport.1),
            loader: Loader::new(),
            entities: Vec::new(),
            errors: Vec::new(),
        });
        Ok(())
    }

    /// 启动一个未运行的场景
    pub fn start(&mut self, key: &str) -> SceneResult<()> {
        let record = self
            .get_mut(key)
            .ok_or_else(|| SceneError::NotFound(key.to_string()))?;
        if matches!(record.status, SceneStatus::Idle | SceneStatus::Shutdown) {
            record.status = SceneStatus::Pending;
            record.loader = Loader::new();
            record.errors.clear();
        }
        Ok(())
    }

    /// 推进所有场景一帧
    pub fn advance(&mut self, world: &mut World, source: &dyn AssetSource) {
        let time = world.get_resource::<Time>().copied().unwrap_or_default();
        let budget = self.max_parallel;

        for record in &mut self.scenes {
            if record.status == SceneStatus::Pending {
                Self::run_preload(record, world);
            }

            if record.status == SceneStatus::Loading {
                let complete = {
                    let mut cache = world.get_resource_or_insert_with(BundleCache::default);
                    record.loader.process(source, &mut cache, budget)
                };
                if complete {
                    Self::run_create(record, world);
                }
            } else if record.status == SceneStatus::Running {
                let SceneRecord {
                    key,
                    scene,
                    cameras,
                    loader,
                    entities,
                    ..
                } = record;
                let mut ctx = SceneContext::new(key, cameras, loader, world, entities);
                scene.update(&mut ctx, &time);
            }
        }
    }

    fn run_preload(record: &mut SceneRecord, world: &mut World) {
        let result = {
            let SceneRecord {
                key,
                scene,
                cameras,
                loader,
                entities,
                ..
            } = &mut *record;
            let mut ctx = SceneContext::new(key, cameras, loader, world, entities);
            scene.preload(&mut ctx)
        };
        if let Err(e) = result {
            record.report("preload", e);
        }

        tracing::info!(target: "scene", scene = %record.key, requests = record.loader.pending(), "loading");
        record.loader.start();
        record.status = SceneStatus::Loading;
    }

    fn run_create(record: &mut SceneRecord, world: &mut World) {
        let result = {
            let SceneRecord {
                key,
                scene,
                cameras,
                loader,
                entities,
                ..
            } = &mut *record;
            let mut ctx = SceneContext::new(key, cameras, loader, world, entities);
            scene.create(&mut ctx)
        };
        if let Err(e) = result {
            record.report("create", e);
        }

        record.status = SceneStatus::Running;
        tracing::info!(target: "scene", scene = %record.key, objects = record.entities.len(), "scene running");
    }

    /// 关闭场景并销毁其创建的对象
    pub fn shutdown(&mut self, key: &str, world: &mut World) -> SceneResult<()> {
        let record = self
            .get_mut(key)
            .ok_or_else(|| SceneError::NotFound(key.to_string()))?;
        Self::shutdown_record(record, world);
        Ok(())
    }

    pub fn shutdown_all(&mut self, world: &mut World) {
        for record in &mut self.scenes {
            Self::shutdown_record(record, world);
        }
    }

    fn shutdown_record(record: &mut SceneRecord, world: &mut World) {
        if matches!(record.status, SceneStatus::Idle | SceneStatus::Shutdown) {
            return;
        }
        for entity in record.entities.drain(..) {
            world.despawn(entity);
        }
        record.status = SceneStatus::Shutdown;
        tracing::info!(target: "scene", scene = %record.key, "scene shut down");
    }

    pub fn get(&self, key: &str) -> Option<&SceneRecord> {
        self.scenes.iter().find(|r| r.key == key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut SceneRecord> {
        self.scenes.iter_mut().find(|r| r.key == key)
    }

    pub fn status(&self, key: &str) -> Option<SceneStatus> {
        self.get(key).map(|r| r.status)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.scenes.iter().map(|r| r.key.as_str()).collect()
    }

    /// 获取场景数量
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}
