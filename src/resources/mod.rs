//! 资源管理
//!
//! - `source`: 字节来源（内存 / 目录）
//! - `loader`: 场景加载队列与加载事件
//! - `atlas`: DragonBones 纹理图集
//! - `cache`: 已加载资源包缓存

pub mod atlas;
pub mod cache;
pub mod loader;
pub mod source;

pub use atlas::{AtlasRegion, FrameRect, TextureAtlas};
pub use cache::{BundleCache, DragonBonesBundle, TextureImage};
pub use loader::{LoadEvent, LoadRequest, Loader, LoaderState};
pub use source::{AssetRef, AssetSource, FileSource, MemorySource};
