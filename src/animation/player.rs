use super::skeleton::ArmatureData;
use crate::core::error::{AnimationError, AnimationResult};

/// 可播放的动画片段
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    /// 持续时间 (秒)
    pub duration: f32,
    /// 播放次数，0 为无限循环
    pub play_times: u32,
}

/// 骨架动画播放状态
///
/// 只维护当前片段、播放时间和已完成的循环次数，不做骨骼姿态求值。
#[derive(Debug, Clone)]
pub struct AnimationState {
    clips: Vec<Clip>,
    current: Option<usize>,
    /// 当前片段内的播放时间 (秒)
    current_time: f32,
    completed_loops: u32,
    playing: bool,
    /// 播放速度 (1.0 = 正常速度)
    pub time_scale: f32,
}

impl AnimationState {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            current: None,
            current_time: 0.0,
            completed_loops: 0,
            playing: false,
            time_scale: 1.0,
        }
    }

    pub fn from_armature(armature: &ArmatureData, frame_rate: u32) -> Self {
        let clips = armature
            .animations
            .iter()
            .map(|a| Clip {
                name: a.name.clone(),
                duration: a.duration_seconds(frame_rate),
                play_times: a.play_times,
            })
            .collect();
        Self::new(clips)
    }

    /// 从头播放指定片段，循环次数沿用片段自身的 `playTimes`
    pub fn play(&mut self, name: &str) -> AnimationResult<()> {
        let index = self
            .clips
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| AnimationError::UnknownClip(name.to_string()))?;

        self.current = Some(index);
        self.current_time = 0.0;
        self.completed_loops = 0;
        self.playing = true;
        tracing::debug!(target: "dragonbones", clip = name, "play");
        Ok(())
    }

    /// 停止播放，保留当前片段和时间
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// 推进播放时间
    pub fn advance(&mut self, delta_seconds: f32) {
        if !self.playing {
            return;
        }
        let Some(clip) = self.current.and_then(|i| self.clips.get(i)) else {
            return;
        };
        let (duration, play_times) = (clip.duration, clip.play_times);

        // 单帧片段：播放一次即完成
        if duration <= 0.0 {
            if play_times != 0 {
                self.completed_loops = play_times;
                self.playing = false;
            }
            return;
        }

        let step = delta_seconds * self.time_scale;
        if step.is_finite() {
            self.current_time += step.max(0.0);
        }
        if self.current_time < duration {
            return;
        }

        let loops = (self.current_time / duration) as u32;
        if play_times == 0 {
            self.completed_loops = self.completed_loops.saturating_add(loops);
            self.current_time %= duration;
        } else {
            self.completed_loops = self.completed_loops.saturating_add(loops);
            if self.completed_loops >= play_times {
                self.completed_loops = play_times;
                self.current_time = duration;
                self.playing = false;
            } else {
                self.current_time %= duration;
            }
        }
    }

    /// 最近一次 `play` 的片段名
    pub fn last_animation_name(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.clips.get(i))
            .map(|c| c.name.as_str())
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_completed(&self) -> bool {
        match self.current.and_then(|i| self.clips.get(i)) {
            Some(clip) => clip.play_times != 0 && self.completed_loops >= clip.play_times,
            None => false,
        }
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn completed_loops(&self) -> u32 {
        self.completed_loops
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.clips.iter().any(|c| c.name == name)
    }

    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|c| c.name.as_str())
    }
}
