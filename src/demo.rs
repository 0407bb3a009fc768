//! 单场景演示
//!
//! 400x300 的 WebGL 宿主，全局启动 `DragonBonesPlugin`；场景 "Game" 在 `preload`
//! 中把背景设为白色并加载 "kenny" 资源包，在 `create` 中创建骨架、播放
//! "idle_south"，并把骨架放在视口中心下方 200 个单位处。

use crate::config::{GameConfig, RendererType};
use crate::core::error::{EngineResult, PluginResult, SceneResult};
use crate::core::Game;
use crate::plugins::builtin::{DragonBonesPlugin, DRAGONBONES_PLUGIN_KEY};
use crate::plugins::PluginRegistry;
use crate::resources::{AssetRef, MemorySource};
use crate::scene::{base_create, base_preload, Scene, SceneContext};

pub const SCENE_KEY: &str = "Game";
pub const BUNDLE_KEY: &str = "kenny";
pub const IDLE_CLIP: &str = "idle_south";
pub const BACKGROUND_COLOR: &str = "#FFFFFF";
/// 骨架相对视口中心的纵向偏移，可能落在 300 高的视口之外
pub const VERTICAL_OFFSET: f32 = 200.0;

pub const TEXTURE_IMAGE: AssetRef = AssetRef::from_static("biped_tex.png");
pub const TEXTURE_ATLAS: AssetRef = AssetRef::from_static("biped_tex.json");
pub const SKELETON: AssetRef = AssetRef::from_static("biped_ske.json");

static TEXTURE_IMAGE_BYTES: &[u8] = include_bytes!("../assets/biped_tex.png");
static TEXTURE_ATLAS_BYTES: &[u8] = include_bytes!("../assets/biped_tex.json");
static SKELETON_BYTES: &[u8] = include_bytes!("../assets/biped_ske.json");

/// 编译期嵌入的资源
pub fn embedded_assets() -> MemorySource {
    MemorySource::new()
        .with_static(&TEXTURE_IMAGE, TEXTURE_IMAGE_BYTES)
        .with_static(&TEXTURE_ATLAS, TEXTURE_ATLAS_BYTES)
        .with_static(&SKELETON, SKELETON_BYTES)
}

pub fn game_config() -> GameConfig {
    GameConfig {
        renderer: RendererType::WebGl,
        width: 400,
        height: 300,
        parent: "phaser-example".to_string(),
        ..GameConfig::default()
    }
}

pub fn plugin_registry() -> PluginResult<PluginRegistry> {
    let mut registry = PluginRegistry::new();
    registry.install(DRAGONBONES_PLUGIN_KEY, DragonBonesPlugin::new(), true)?;
    Ok(registry)
}

/// 演示场景
#[derive(Debug, Default)]
pub struct GameScene;

impl GameScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene for GameScene {
    fn key(&self) -> &str {
        SCENE_KEY
    }

    fn preload(&mut self, ctx: &mut SceneContext<'_>) -> SceneResult<()> {
        base_preload(ctx);
        ctx.cameras.main.set_background_color(BACKGROUND_COLOR)?;
        ctx.load
            .dragonbone(BUNDLE_KEY, TEXTURE_IMAGE, TEXTURE_ATLAS, SKELETON);
        Ok(())
    }

    fn create(&mut self, ctx: &mut SceneContext<'_>) -> SceneResult<()> {
        base_create(ctx);
        let entity = ctx.add_armature(BUNDLE_KEY)?;
        let (center_x, center_y) = (ctx.cameras.main.center_x(), ctx.cameras.main.center_y());

        let mut display = ctx.armature_mut(entity)?;
        display.animation.play(IDLE_CLIP)?;
        display.set_x(center_x);
        display.set_y(center_y + VERTICAL_OFFSET);
        Ok(())
    }
}

/// 用指定配置构造演示宿主
pub fn build_game_with(config: GameConfig) -> EngineResult<Game> {
    Game::new(
        config,
        plugin_registry()?,
        vec![Box::new(GameScene::new())],
        embedded_assets(),
    )
}

pub fn build_game() -> EngineResult<Game> {
    build_game_with(game_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SkeletonData;
    use crate::resources::TextureAtlas;

    #[test]
    fn test_embedded_skeleton_has_idle_clip() {
        let json = std::str::from_utf8(SKELETON_BYTES).unwrap();
        let skeleton = SkeletonData::from_json(json).unwrap();
        let armature = skeleton.armature("").unwrap();
        assert!(armature.animation(IDLE_CLIP).is_some());
        assert_eq!(armature.animation(IDLE_CLIP).unwrap().play_times, 0);
    }

    #[test]
    fn test_embedded_atlas_matches_image_path() {
        let atlas = TextureAtlas::from_json(std::str::from_utf8(TEXTURE_ATLAS_BYTES).unwrap()).unwrap();
        assert_eq!(atlas.image_path, TEXTURE_IMAGE.path());
        assert!(!atlas.is_empty());
    }

    #[test]
    fn test_registry_has_single_started_plugin() {
        let registry = plugin_registry().unwrap();
        assert_eq!(registry.keys(), [DRAGONBONES_PLUGIN_KEY]);
        assert_eq!(registry.autostart_keys(), [DRAGONBONES_PLUGIN_KEY]);
    }
}
