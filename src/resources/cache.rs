//! 已加载资源包缓存

use super::atlas::TextureAtlas;
use crate::animation::SkeletonData;
use crate::core::error::{AssetError, AssetResult};
use bevy_ecs::prelude::*;
use image::GenericImageView;
use std::collections::HashMap;
use std::sync::Arc;

/// 解码后的纹理图像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
}

impl TextureImage {
    pub fn decode(bytes: &[u8]) -> AssetResult<Self> {
        let image = image::load_from_memory(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
        let (width, height) = image.dimensions();
        Ok(Self { width, height })
    }
}

/// 同一个 key 下的纹理图像 + 图集 + 骨架描述
#[derive(Debug, Clone)]
pub struct DragonBonesBundle {
    pub key: String,
    pub texture: TextureImage,
    pub atlas: TextureAtlas,
    pub skeleton: SkeletonData,
}

impl DragonBonesBundle {
    /// 三个部分任意一个解码失败，整个资源包都不会生成
    pub fn decode(
        key: impl Into<String>,
        texture: &[u8],
        atlas: &[u8],
        skeleton: &[u8],
    ) -> AssetResult<Self> {
        let texture = TextureImage::decode(texture)?;
        let atlas = TextureAtlas::from_json(utf8(atlas, "texture atlas")?)?
            .with_image_size(texture.width, texture.height);
        let skeleton = SkeletonData::from_json(utf8(skeleton, "skeleton")?)?;

        Ok(Self {
            key: key.into(),
            texture,
            atlas,
            skeleton,
        })
    }
}

fn utf8<'a>(bytes: &'a [u8], what: &str) -> AssetResult<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| AssetError::InvalidFormat {
        path: what.to_string(),
        expected: format!("utf-8 json ({})", e),
    })
}

/// 资源包缓存 (key -> bundle)
#[derive(Resource, Debug, Default)]
pub struct BundleCache {
    bundles: HashMap<String, Arc<DragonBonesBundle>>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入资源包；key 已存在时保留旧值并返回 `false`
    pub fn insert(&mut self, bundle: DragonBonesBundle) -> bool {
        if self.bundles.contains_key(&bundle.key) {
            return false;
        }
        self.bundles.insert(bundle.key.clone(), Arc::new(bundle));
        true
    }

    pub fn get(&self, key: &str) -> Option<Arc<DragonBonesBundle>> {
        self.bundles.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bundles.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<DragonBonesBundle>> {
        self.bundles.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
