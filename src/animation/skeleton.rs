//! 骨架描述（`*_ske.json`）
//!
//! 只读取创建骨架与播放动画所需的索引信息：骨架名、骨骼层级、动画名、时长与播放次数。
//! 时间轴、插槽、蒙皮等字段会被忽略。

use crate::core::error::{AssetError, AssetResult};
use serde::Deserialize;

fn default_frame_rate() -> u32 {
    24
}

fn default_play_times() -> u32 {
    1
}

/// 缺省时长为 1 帧
fn default_duration() -> u32 {
    1
}

/// 骨架描述文件
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    #[serde(default, rename = "armature")]
    pub armatures: Vec<ArmatureData>,
}

/// 单个骨架
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmatureData {
    pub name: String,
    /// 缺省时继承 `SkeletonData::frame_rate`
    #[serde(default)]
    pub frame_rate: Option<u32>,
    #[serde(default, rename = "bone")]
    pub bones: Vec<BoneData>,
    #[serde(default, rename = "animation")]
    pub animations: Vec<AnimationData>,
    #[serde(default)]
    pub default_actions: Vec<ActionData>,
}

/// 骨骼节点
#[derive(Debug, Clone, Deserialize)]
pub struct BoneData {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// 动画片段索引
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationData {
    pub name: String,
    /// 时长（帧）
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// 0 表示无限循环
    #[serde(default = "default_play_times")]
    pub play_times: u32,
}

/// 默认动作
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    #[serde(default)]
    pub goto_and_play: Option<String>,
}

impl SkeletonData {
    pub fn from_json(data: &str) -> AssetResult<Self> {
        let skeleton: SkeletonData =
            serde_json::from_str(data).map_err(|e| AssetError::InvalidFormat {
                path: "skeleton".to_string(),
                expected: format!("DragonBones skeleton json ({})", e),
            })?;

        if skeleton.armatures.is_empty() {
            return Err(AssetError::InvalidFormat {
                path: skeleton.name,
                expected: "at least one armature".to_string(),
            });
        }
        if skeleton.frame_rate == 0 {
            return Err(AssetError::InvalidFormat {
                path: skeleton.name,
                expected: "frameRate > 0".to_string(),
            });
        }
        Ok(skeleton)
    }

    /// 按名称查找骨架；空名称返回第一个骨架
    pub fn armature(&self, name: &str) -> Option<&ArmatureData> {
        if name.is_empty() {
            return self.armatures.first();
        }
        self.armatures.iter().find(|a| a.name == name)
    }

    pub fn armature_names(&self) -> impl Iterator<Item = &str> {
        self.armatures.iter().map(|a| a.name.as_str())
    }
}

impl ArmatureData {
    pub fn frame_rate(&self, skeleton_rate: u32) -> u32 {
        match self.frame_rate {
            Some(rate) if rate > 0 => rate,
            _ => skeleton_rate,
        }
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationData> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// `defaultActions` 中第一个 `gotoAndPlay`
    pub fn default_animation(&self) -> Option<&str> {
        self.default_actions
            .iter()
            .find_map(|action| action.goto_and_play.as_deref())
    }

    pub fn root_bones(&self) -> impl Iterator<Item = &BoneData> {
        self.bones.iter().filter(|b| b.parent.is_none())
    }
}

impl AnimationData {
    pub fn duration_seconds(&self, frame_rate: u32) -> f32 {
        if frame_rate == 0 {
            return 0.0;
        }
        self.duration as f32 / frame_rate as f32
    }
}
