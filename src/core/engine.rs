//! 宿主主入口
//!
//! 定义 `Game` 结构和主运行循环

use crate::animation::ArmatureDisplay;
use crate::config::{GameConfig, LoggingConfig};
use crate::plugins::PluginRegistry;
use crate::resources::{AssetSource, BundleCache};
use crate::scene::{Scene, SceneManager};
use bevy_ecs::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::{EngineError, EngineResult};
use super::resources::Time;

/// 游戏宿主
///
/// `Game` 负责：
/// - 校验配置并持有插件注册表
/// - 启动 `start: true` 的插件
/// - 按帧驱动场景生命周期
/// - 销毁时关闭场景与插件
///
/// # 示例
///
/// ```no_run
/// use armature_demo::core::Game;
/// use armature_demo::config::GameConfig;
/// use armature_demo::plugins::PluginRegistry;
/// use armature_demo::resources::MemorySource;
///
/// let mut game = Game::new(
///     GameConfig::default(),
///     PluginRegistry::new(),
///     Vec::new(),
///     MemorySource::new(),
/// )?;
/// game.run()?;
/// # Ok::<(), armature_demo::core::EngineError>(())
/// ```
///
/// # 生命周期
///
/// 1. **构造阶段**：校验配置，写入 `Time`/`BundleCache`，启动插件，注册场景
/// 2. **运行阶段**：每帧推进场景，再更新插件
/// 3. **销毁阶段**：关闭场景（销毁对象），逆序关闭插件
pub struct Game {
    config: GameConfig,
    plugins: PluginRegistry,
    scenes: SceneManager,
    world: World,
    source: Box<dyn AssetSource>,
    running: Arc<AtomicBool>,
    destroyed: bool,
}

/// 用于从其他线程停止主循环
#[derive(Clone, Debug)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Game {
    /// 构造宿主；第一个场景自动启动
    pub fn new(
        config: GameConfig,
        mut plugins: PluginRegistry,
        scenes: Vec<Box<dyn Scene>>,
        source: impl AssetSource + 'static,
    ) -> EngineResult<Self> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(Time::default());
        world.insert_resource(BundleCache::new());

        tracing::info!(
            target: "engine",
            renderer = ?config.renderer,
            width = config.width,
            height = config.height,
            parent = %config.parent,
            "game starting"
        );

        plugins.boot(&mut world)?;

        let mut manager = SceneManager::new(&config);
        for (index, scene) in scenes.into_iter().enumerate() {
            manager.add(scene, index == 0)?;
        }

        Ok(Self {
            config,
            plugins,
            scenes: manager,
            world,
            source: Box::new(source),
            running: Arc::new(AtomicBool::new(true)),
            destroyed: false,
        })
    }

    /// 初始化日志系统
    ///
    /// 日志级别来自配置，`RUST_LOG` 可以进一步细化。重复调用无副作用。
    pub fn init_logging(config: &LoggingConfig) {
        use tracing_subscriber::EnvFilter;

        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = EnvFilter::try_new(config.filter_directives(env.as_deref()))
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init();
    }

    /// 推进一帧
    pub fn step(&mut self, delta_seconds: f32) -> EngineResult<()> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }

        self.world.resource_mut::<Time>().advance(delta_seconds);
        self.scenes.advance(&mut self.world, self.source.as_ref());
        self.plugins.update_all(&mut self.world);
        Ok(())
    }

    /// 以固定帧间隔推进指定帧数（不休眠）
    pub fn run_frames(&mut self, frames: u32) -> EngineResult<()> {
        let delta = self.frame_duration().as_secs_f32();
        for _ in 0..frames {
            self.step(delta)?;
        }
        Ok(())
    }

    /// 按 `config.fps` 运行主循环，直到 `StopHandle::stop` 被调用（至少执行一帧）
    pub fn run(&mut self) -> EngineResult<()> {
        let frame = self.frame_duration();
        tracing::info!(target: "engine", fps = self.config.fps, "main loop started");

        // 第一帧使用标称帧间隔
        let mut last = Instant::now().checked_sub(frame).unwrap_or_else(Instant::now);
        loop {
            let start = Instant::now();
            let delta = start.duration_since(last);
            last = start;

            self.step(delta.as_secs_f32())?;
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            }
        }

        tracing::info!(target: "engine", "main loop stopped");
        Ok(())
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.fps.max(1) as f64)
    }

    /// 销毁宿主：关闭场景、逆序关闭并移除插件
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.running.store(false, Ordering::SeqCst);
        self.scenes.shutdown_all(&mut self.world);
        self.plugins.clear(&mut self.world);
        self.destroyed = true;
        tracing::info!(target: "engine", "game destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// 当前所有骨架显示对象
    pub fn armatures(&mut self) -> Vec<(Entity, ArmatureDisplay)> {
        let mut query = self.world.query::<(Entity, &ArmatureDisplay)>();
        query
            .iter(&self.world)
            .map(|(entity, display)| (entity, display.clone()))
            .collect()
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::builtin::{DragonBonesPlugin, DRAGONBONES_PLUGIN_KEY};
    use crate::resources::MemorySource;
    use crate::scene::{SceneContext, SceneStatus};
    use crate::core::error::SceneResult;

    struct Empty;

    impl Scene for Empty {
        fn key(&self) -> &str {
            "Empty"
        }

        fn create(&mut self, ctx: &mut SceneContext<'_>) -> SceneResult<()> {
            ctx.cameras.main.set_background_color("#000")?;
            Ok(())
        }
    }

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry
            .install(DRAGONBONES_PLUGIN_KEY, DragonBonesPlugin, true)
            .unwrap();
        registry
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.fps = 0;
        let result = Game::new(config, PluginRegistry::new(), Vec::new(), MemorySource::new());
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_step_drives_first_scene() {
        let mut game = Game::new(
            GameConfig::default(),
            registry(),
            vec![Box::new(Empty)],
            MemorySource::new(),
        )
        .unwrap();
        assert_eq!(game.plugins().started_keys(), [DRAGONBONES_PLUGIN_KEY]);
        assert_eq!(game.scenes().status("Empty"), Some(SceneStatus::Pending));

        game.run_frames(3).unwrap();
        assert_eq!(game.scenes().status("Empty"), Some(SceneStatus::Running));
        assert_eq!(game.world().resource::<Time>().frame, 3);
        assert!(game.armatures().is_empty());
    }

    #[test]
    fn test_mutable_accessors() {
        let mut game = Game::new(
            GameConfig::default(),
            registry(),
            vec![Box::new(Empty)],
            MemorySource::new(),
        )
        .unwrap();

        assert!(matches!(
            game.scenes_mut().add(Box::new(Empty), false),
            Err(crate::core::error::SceneError::DuplicateScene(key)) if key == "Empty"
        ));
        game.scenes_mut().start("Empty").unwrap();
        assert_eq!(game.scenes().status("Empty"), Some(SceneStatus::Pending));

        game.world_mut().resource_mut::<Time>().advance(0.5);
        assert_eq!(game.world().resource::<Time>().frame, 1);
        assert_eq!(game.world().resource::<Time>().delta_seconds, 0.5);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut game = Game::new(
            GameConfig::default(),
            registry(),
            vec![Box::new(Empty)],
            MemorySource::new(),
        )
        .unwrap();
        game.run_frames(1).unwrap();

        game.destroy();
        game.destroy();
        assert!(game.is_destroyed());
        assert!(game.plugins().is_empty());
        assert_eq!(game.scenes().status("Empty"), Some(SceneStatus::Shutdown));
        assert!(matches!(game.step(0.016), Err(EngineError::Destroyed)));
    }

    #[test]
    fn test_stop_handle_ends_run() {
        let mut game = Game::new(
            GameConfig::default(),
            PluginRegistry::new(),
            Vec::new(),
            MemorySource::new(),
        )
        .unwrap();
        let handle = game.stop_handle();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            handle.stop();
        });

        game.run().unwrap();
        stopper.join().unwrap();
        assert!(game.world().resource::<Time>().frame > 0);
    }
}
