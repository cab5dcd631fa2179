use std::path::PathBuf;

use thiserror::Error;
use tubeframe_engine::errors::EngineError;
use tubeframe_io::IoError;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("创建输出目录 {path:?} 失败: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("型材目录未完整生成：{failed}/{total} 项失败")]
    CatalogIncomplete { failed: usize, total: usize },
}
