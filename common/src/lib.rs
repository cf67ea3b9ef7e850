//! Shot Import Common Library
//!
//! 取り込みの読み取り経路（レポート）と書き込み経路（適用）で共有される
//! 検証器と行レコード

pub mod error;
pub mod pattern;
pub mod task;
pub mod domain;
pub mod record;

pub use error::{Error, Result};
pub use pattern::{naming_patterns, NamingPattern, NamingPatterns};
pub use task::{normalize_task, valid_task, DEFAULT_TASKS};
pub use domain::{valid_asset_type, valid_shot_type, ASSET_TYPES, SHOT_TYPES};
pub use record::{classify_row, guard_rows, Column, Record, RowDisposition, HEADER_LABEL, ROW_ARITY};
