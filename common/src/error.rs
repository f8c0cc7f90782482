//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
