//! 场景加载器
//!
//! `preload` 中登记加载请求，宿主在之后的帧里逐批处理；队列清空后加载器进入
//! `Complete`，场景的 `create` 才会被调用。单个请求失败只产生 `FileError` 事件，
//! 不会阻止加载器完成。

use super::cache::{BundleCache, DragonBonesBundle};
use super::source::{AssetRef, AssetSource};
use crate::core::error::AssetResult;
use std::collections::VecDeque;

/// DragonBones 资源包加载请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub key: String,
    pub texture: AssetRef,
    pub atlas: AssetRef,
    pub skeleton: AssetRef,
}

/// 加载事件
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// 资源包已解码并写入缓存
    FileComplete { key: String },
    /// 缓存中已有同名资源包，请求被跳过
    FileSkipped { key: String },
    FileError { key: String, reason: String },
    /// 本轮所有请求处理完毕
    Complete { loaded: usize, failed: usize },
}

/// 加载器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Loading,
    Complete,
}

#[derive(Debug)]
pub struct Loader {
    queue: VecDeque<LoadRequest>,
    requests: Vec<LoadRequest>,
    events: Vec<LoadEvent>,
    state: LoaderState,
    loaded: usize,
    failed: usize,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            requests: Vec::new(),
            events: Vec::new(),
            state: LoaderState::Idle,
            loaded: 0,
            failed: 0,
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个 DragonBones 资源包（纹理图像、图集描述、骨架描述）
    pub fn dragonbone(
        &mut self,
        key: impl Into<String>,
        texture: AssetRef,
        atlas: AssetRef,
        skeleton: AssetRef,
    ) -> &mut Self {
        let request = LoadRequest {
            key: key.into(),
            texture,
            atlas,
            skeleton,
        };
        tracing::debug!(target: "loader", key = %request.key, "dragonbone queued");
        self.queue.push_back(request.clone());
        self.requests.push(request);
        self
    }

    /// 本轮登记过的所有请求（含已处理的）
    pub fn requests(&self) -> &[LoadRequest] {
        &self.requests
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == LoaderState::Complete
    }

    pub fn events(&self) -> &[LoadEvent] {
        &self.events
    }

    /// 已处理请求所占比例
    pub fn progress(&self) -> f32 {
        if self.requests.is_empty() {
            return 1.0;
        }
        (self.loaded + self.failed) as f32 / self.requests.len() as f32
    }

    /// 开始处理队列；队列为空时立即完成
    pub fn start(&mut self) {
        self.state = LoaderState::Loading;
        if self.queue.is_empty() {
            self.finish();
        }
    }

    /// 处理至多 `budget` 个请求，返回加载器是否已完成
    pub fn process(&mut self, source: &dyn AssetSource, cache: &mut BundleCache, budget: usize) -> bool {
        if self.state != LoaderState::Loading {
            return self.is_complete();
        }

        for _ in 0..budget.max(1) {
            let Some(request) = self.queue.pop_front() else {
                break;
            };

            if cache.contains(&request.key) {
                tracing::warn!(target: "loader", key = %request.key, "bundle already cached, skipping");
                self.loaded += 1;
                self.events.push(LoadEvent::FileSkipped { key: request.key });
                continue;
            }

            match fetch(source, &request) {
                Ok(bundle) => {
                    tracing::info!(
                        target: "loader",
                        key = %request.key,
                        texture = %request.texture,
                        width = bundle.texture.width,
                        height = bundle.texture.height,
                        "bundle loaded"
                    );
                    cache.insert(bundle);
                    self.loaded += 1;
                    self.events.push(LoadEvent::FileComplete { key: request.key });
                }
                Err(e) => {
                    tracing::warn!(target: "loader", key = %request.key, error = %e, "bundle failed to load");
                    self.failed += 1;
                    self.events.push(LoadEvent::FileError {
                        key: request.key,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if self.queue.is_empty() {
            self.finish();
        }
        self.is_complete()
    }

    fn finish(&mut self) {
        self.state = LoaderState::Complete;
        self.events.push(LoadEvent::Complete {
            loaded: self.loaded,
            failed: self.failed,
        });
        tracing::debug!(target: "loader", loaded = self.loaded, failed = self.failed, "load complete");
    }
}

fn fetch(source: &dyn AssetSource, request: &LoadRequest) -> AssetResult<DragonBonesBundle> {
    let texture = source.read(&request.texture)?;
    let atlas = source.read(&request.atlas)?;
    let skeleton = source.read(&request.skeleton)?;
    DragonBonesBundle::decode(request.key.clone(), &texture, &atlas, &skeleton)
}
