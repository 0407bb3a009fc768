//! ECS 资源定义

use bevy_ecs::prelude::*;

/// 帧时间资源
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Time {
    /// 上一帧耗时（秒）
    pub delta_seconds: f32,
    /// 自启动以来的累计时间（秒）
    pub elapsed_seconds: f64,
    /// 已执行的帧数
    pub frame: u64,
}

impl Time {
    /// 负数、NaN 与无穷大的帧间隔按 0 处理
    pub fn advance(&mut self, delta_seconds: f32) {
        self.delta_seconds = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.elapsed_seconds += self.delta_seconds as f64;
        self.frame += 1;
    }
}
