//! 资源来源
//!
//! `AssetSource` 抽象了字节的读取位置：编译期嵌入的内存资源或磁盘目录。

use crate::core::error::{AssetError, AssetResult};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

/// 资源引用（相对路径）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    path: Cow<'static, str>,
}

impl AssetRef {
    pub const fn from_static(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
        }
    }

    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Cow::Owned(path.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// 资源读取接口
pub trait AssetSource {
    fn read(&self, asset: &AssetRef) -> AssetResult<Vec<u8>>;
}

/// 内存资源来源
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册编译期嵌入的字节
    pub fn with_static(mut self, asset: &AssetRef, bytes: &'static [u8]) -> Self {
        self.entries
            .insert(asset.path().to_string(), Cow::Borrowed(bytes));
        self
    }

    pub fn insert(&mut self, asset: &AssetRef, bytes: Vec<u8>) {
        self.entries.insert(asset.path().to_string(), Cow::Owned(bytes));
    }

    pub fn contains(&self, asset: &AssetRef) -> bool {
        self.entries.contains_key(asset.path())
    }
}

impl AssetSource for MemorySource {
    fn read(&self, asset: &AssetRef) -> AssetResult<Vec<u8>> {
        self.entries
            .get(asset.path())
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| AssetError::NotFound {
                path: asset.path().to_string(),
            })
    }
}

/// 磁盘目录资源来源
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileSource {
    fn read(&self, asset: &AssetRef) -> AssetResult<Vec<u8>> {
        let path = self.root.join(asset.path());
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound {
                path: path.display().to_string(),
            },
            _ => AssetError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })
    }
}
