pub mod codec;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tubeframe_core::profile::FrameProfile;

use crate::codec::{Decoded, decode, decode_profile, encode_profile, to_pretty_vec};

pub const PROFILE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum IoError {
    #[error("malformed {record} record: field `{key}` {detail}")]
    MalformedInput {
        record: String,
        key: String,
        detail: &'static str,
    },
    #[error("invalid profile identity {id:?}: {reason}")]
    InvalidIdentity { id: String, reason: &'static str },
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse file {path:?}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize profile record: {0}")]
    SerializeError(#[source] serde_json::Error),
    #[error("expected a frame profile record, found {0}")]
    UnexpectedRecord(String),
}

impl IoError {
    pub(crate) fn malformed(record: &str, key: &str, detail: &'static str) -> Self {
        Self::MalformedInput {
            record: record.to_string(),
            key: key.to_string(),
            detail,
        }
    }

    fn invalid_identity(id: &str, reason: &'static str) -> Self {
        Self::InvalidIdentity {
            id: id.to_string(),
            reason,
        }
    }
}

pub trait ProfileLoader {
    fn load(&self, path: &Path) -> Result<Decoded, IoError>;
}

pub trait ProfileSaver {
    /// 保存到 `directory/<id>.json`，返回写入的路径。
    fn save(&self, profile: &FrameProfile, directory: &Path) -> Result<PathBuf, IoError>;
}

/// 标识必须可直接作为文件名：非空、不含路径分隔符或 NUL、不是 `.` / `..`。
pub fn validate_identity(id: &str) -> Result<(), IoError> {
    if id.is_empty() {
        return Err(IoError::invalid_identity(id, "identity is empty"));
    }
    if id.contains(['/', '\\']) {
        return Err(IoError::invalid_identity(
            id,
            "identity contains a path separator",
        ));
    }
    if id.contains('\0') {
        return Err(IoError::invalid_identity(id, "identity contains NUL"));
    }
    if id == "." || id == ".." {
        return Err(IoError::invalid_identity(
            id,
            "identity is a relative path component",
        ));
    }
    Ok(())
}

/// 计算型材文件路径。标识中常含 `.`（如 `0.100`），因此直接拼接扩展名而非 `with_extension`。
pub fn profile_path(directory: &Path, id: &str) -> Result<PathBuf, IoError> {
    validate_identity(id)?;
    Ok(directory.join(format!("{id}.{PROFILE_EXTENSION}")))
}

/// 单个型材保存失败的记录。
#[derive(Debug)]
pub struct CatalogFailure {
    pub id: String,
    pub error: IoError,
}

/// 批量保存结果：成功写入的路径与逐条失败。
#[derive(Debug, Default)]
pub struct CatalogReport {
    pub saved: Vec<PathBuf>,
    pub failures: Vec<CatalogFailure>,
}

impl CatalogReport {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.saved.len() + self.failures.len()
    }
}

/// JSON 型材文件的读写入口。
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonProfileStore;

impl JsonProfileStore {
    pub fn new() -> Self {
        Self
    }

    /// 读取文件并要求其为型材记录。
    pub fn load_profile(&self, path: &Path) -> Result<FrameProfile, IoError> {
        let value = read_json(path)?;
        decode_profile(value)
    }

    /// 依次保存全部型材；单个失败不会中断其余条目。
    pub fn save_all<'a>(
        &self,
        profiles: impl IntoIterator<Item = &'a FrameProfile>,
        directory: &Path,
    ) -> CatalogReport {
        let mut report = CatalogReport::default();
        for profile in profiles {
            match self.save(profile, directory) {
                Ok(path) => report.saved.push(path),
                Err(error) => report.failures.push(CatalogFailure {
                    id: profile.id().to_string(),
                    error,
                }),
            }
        }
        report
    }
}

impl ProfileLoader for JsonProfileStore {
    fn load(&self, path: &Path) -> Result<Decoded, IoError> {
        decode(read_json(path)?)
    }
}

impl ProfileSaver for JsonProfileStore {
    fn save(&self, profile: &FrameProfile, directory: &Path) -> Result<PathBuf, IoError> {
        let path = profile_path(directory, profile.id())?;
        let bytes = to_pretty_vec(&encode_profile(profile))?;
        fs::write(&path, bytes).map_err(|source| IoError::WriteError {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value, IoError> {
    let data = fs::read(path).map_err(|source| IoError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| IoError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}
