//! 骨架动画模块
//!
//! 提供 DragonBones 骨架描述索引、骨架显示对象和动画播放控制。
//!
//! ## 使用示例
//!
//! ```rust
//! use armature_demo::animation::{AnimationState, Clip};
//!
//! let mut state = AnimationState::new(vec![Clip {
//!     name: "idle_south".to_string(),
//!     duration: 2.0,
//!     play_times: 0,
//! }]);
//! state.play("idle_south").unwrap();
//! state.advance(0.016);
//! assert_eq!(state.last_animation_name(), Some("idle_south"));
//! ```

pub mod armature;
pub mod player;
pub mod skeleton;

pub use armature::{advance_armatures, ArmatureDisplay, ArmatureFactory};
pub use player::{AnimationState, Clip};
pub use skeleton::{ActionData, AnimationData, ArmatureData, BoneData, SkeletonData};
