//! # Armature Demo
//!
//! A headless 2D game host wired to a DragonBones-style skeletal-animation plugin,
//! driving a single demo scene that loads a character rig and plays one clip.
//!
//! ## Architecture Design
//!
//! - **Host** (`core::Game`): fixed configuration, explicit plugin registry, frame loop
//! - **Plugins** (`plugins`): installed per host, started at boot, shut down on destroy
//! - **Scenes** (`scene`): `preload` → loader → `create` → `update`
//! - **Animation** (`animation`): armature display objects and clip playback
//!
//! ### Example
//!
//! ```no_run
//! let mut game = armature_demo::demo::build_game()?;
//! game.run()?;
//! # Ok::<(), armature_demo::core::EngineError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Host, errors and shared ECS resources
//! - [`config`]: Host configuration
//! - [`plugins`]: Plugin trait, registry and the DragonBones plugin
//! - [`scene`]: Scene lifecycle, context and cameras
//! - [`resources`]: Asset sources, loader and bundle cache
//! - [`animation`]: Skeleton descriptor index, armatures and playback
//! - [`demo`]: The single-scene demo

/// Core host functionality including the main loop and error types
pub mod core;
/// Configuration system
pub mod config;
/// Plugin system
pub mod plugins;
/// Scene management
pub mod scene;
/// Resource loading for texture images, atlases and skeletons
pub mod resources;
/// Skeletal animation display objects
pub mod animation;
/// The demo scene bootstrapper
pub mod demo;
