use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データ取得エラー: {0}")]
    Fetch(String),

    #[error("組み合わせ番号が範囲外です: {index}（{count}件）")]
    InvalidCombo { index: usize, count: usize },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] timeline_common::Error),
}

impl From<reqwest::Error> for TimelineError {
    fn from(err: reqwest::Error) -> Self {
        TimelineError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
