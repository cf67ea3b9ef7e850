use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error(".xlsxファイルがありません: {0}")]
    NoWorkbook(String),

    #[error(".xlsxファイルが複数あります（{count}件）: {dir}")]
    AmbiguousWorkbook { dir: String, count: usize },

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("{0}の値が空です")]
    EmptySheet(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("約束されたセル数と異なります: {0}")]
    Arity(shot_import_common::Error),

    #[error(transparent)]
    Validation(shot_import_common::Error),

    #[error("ストアエラー: {0}")]
    Store(#[from] StoreError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<shot_import_common::Error> for ImportError {
    fn from(err: shot_import_common::Error) -> Self {
        match err {
            shot_import_common::Error::Arity { .. } => ImportError::Arity(err),
            other => ImportError::Validation(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
