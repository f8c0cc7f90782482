use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfiguratorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カタログの取得元が利用できません: {0}")]
    SourceUnavailable(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Interaction(String),

    #[error(transparent)]
    Common(#[from] configurator_common::Error),
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;
