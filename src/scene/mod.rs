//! 场景系统
//!
//! 场景以 `Scene` trait 描述，由 `SceneManager` 按固定的两阶段生命周期驱动：
//! `preload` 登记资源 → 加载器完成 → `create` 创建对象 → 每帧 `update`。

pub mod camera;
pub mod context;
pub mod manager;

pub use camera::{Camera, Cameras, Color};
pub use context::SceneContext;
pub use manager::{SceneManager, SceneRecord, SceneStatus};

use crate::core::error::SceneResult;
use crate::core::resources::Time;

/// 场景
pub trait Scene {
    /// 场景 key（宿主内唯一）
    fn key(&self) -> &str;

    /// 登记加载请求；在 `create` 之前调用一次
    fn preload(&mut self, _ctx: &mut SceneContext<'_>) -> SceneResult<()> {
        Ok(())
    }

    /// 加载完成后调用一次
    fn create(&mut self, _ctx: &mut SceneContext<'_>) -> SceneResult<()> {
        Ok(())
    }

    /// 每帧调用
    fn update(&mut self, _ctx: &mut SceneContext<'_>, _time: &Time) {}
}

/// 所有场景共享的 `preload` 前置步骤，由场景在自己的 `preload` 开头调用
pub fn base_preload(ctx: &mut SceneContext<'_>) {
    tracing::debug!(
        target: "scene",
        scene = ctx.key(),
        queued = ctx.load.pending(),
        "preload"
    );
}

/// 所有场景共享的 `create` 前置步骤
pub fn base_create(ctx: &mut SceneContext<'_>) {
    tracing::debug!(
        target: "scene",
        scene = ctx.key(),
        viewport = ?(ctx.cameras.main.width, ctx.cameras.main.height),
        "create"
    );
}
