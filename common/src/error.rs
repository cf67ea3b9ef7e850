//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{value} does not match the {pattern} format")]
    Format { pattern: &'static str, value: String },

    #[error("{value} cannot be used as {domain}")]
    Domain { domain: &'static str, value: String },

    #[error("row {row} has {found} cells, expected {expected}")]
    Arity { row: usize, found: usize, expected: usize },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
