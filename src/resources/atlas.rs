use crate::core::error::{AssetError, AssetResult};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtlasFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image_path: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default, rename = "SubTexture")]
    sub_textures: Vec<SubTexture>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubTexture {
    name: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    #[serde(default)]
    rotated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AtlasRegion {
    pub frame: FrameRect,
    pub rotated: bool,
    pub uv_off: [f32; 2],
    pub uv_scale: [f32; 2],
}

/// DragonBones texture atlas (`*_tex.json`)
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    pub name: String,
    pub image_path: String,
    pub size: [u32; 2],
    regions: HashMap<String, AtlasRegion>,
}

impl TextureAtlas {
    pub fn from_json(data: &str) -> AssetResult<Self> {
        let file: AtlasFile = serde_json::from_str(data).map_err(|e| AssetError::InvalidFormat {
            path: "texture atlas".to_string(),
            expected: format!("DragonBones atlas json ({})", e),
        })?;

        let mut atlas = Self {
            name: file.name,
            image_path: file.image_path,
            size: [file.width, file.height],
            regions: HashMap::new(),
        };
        for sub in file.sub_textures {
            let frame = FrameRect {
                x: sub.x,
                y: sub.y,
                w: sub.width,
                h: sub.height,
            };
            atlas.regions.insert(
                sub.name,
                AtlasRegion {
                    frame,
                    rotated: sub.rotated,
                    uv_off: [0.0; 2],
                    uv_scale: [0.0; 2],
                },
            );
        }
        atlas.recompute_uvs();
        Ok(atlas)
    }

    /// Atlases exported without `width`/`height` take the decoded image size.
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        if self.size[0] == 0 || self.size[1] == 0 {
            self.size = [width, height];
            self.recompute_uvs();
        }
        self
    }

    fn recompute_uvs(&mut self) {
        let wf = if self.size[0] == 0 { 1.0 } else { self.size[0] as f32 };
        let hf = if self.size[1] == 0 { 1.0 } else { self.size[1] as f32 };
        for region in self.regions.values_mut() {
            let fr = region.frame;
            region.uv_off = [fr.x as f32 / wf, fr.y as f32 / hf];
            region.uv_scale = [fr.w as f32 / wf, fr.h as f32 / hf];
        }
    }

    pub fn get(&self, name: &str) -> Option<([f32; 2], [f32; 2])> {
        self.regions.get(name).map(|r| (r.uv_off, r.uv_scale))
    }

    pub fn region(&self, name: &str) -> Option<&AtlasRegion> {
        self.regions.get(name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATLAS: &str = r#"{
        "name": "biped",
        "imagePath": "biped_tex.png",
        "width": 64,
        "height": 32,
        "SubTexture": [
            {"name": "head", "x": 0, "y": 0, "width": 32, "height": 32},
            {"name": "body", "x": 32, "y": 16, "width": 16, "height": 16, "rotated": true}
        ]
    }"#;

    #[test]
    fn test_parse_atlas() {
        let atlas = TextureAtlas::from_json(ATLAS).unwrap();
        assert_eq!(atlas.name, "biped");
        assert_eq!(atlas.image_path, "biped_tex.png");
        assert_eq!(atlas.size, [64, 32]);
        assert_eq!(atlas.len(), 2);

        let (off, scale) = atlas.get("body").unwrap();
        assert_eq!(off, [0.5, 0.5]);
        assert_eq!(scale, [0.25, 0.5]);
        assert!(atlas.region("body").unwrap().rotated);
        assert!(atlas.get("tail").is_none());
    }

    #[test]
    fn test_size_from_image() {
        let atlas = TextureAtlas::from_json(
            r#"{"SubTexture":[{"name":"a","x":8,"y":8,"width":8,"height":8}]}"#,
        )
        .unwrap()
        .with_image_size(16, 16);
        assert_eq!(atlas.size, [16, 16]);
        assert_eq!(atlas.get("a"), Some(([0.5, 0.5], [0.5, 0.5])));
    }

    #[test]
    fn test_invalid_atlas() {
        assert!(matches!(
            TextureAtlas::from_json("not json"),
            Err(AssetError::InvalidFormat { .. })
        ));
    }
}
