//! Shot Import
//!
//! 制作管理シートを検証し、メタデータストアへ項目単位で反映する。

pub mod apply;
pub mod cli;
pub mod config;
pub mod datetime;
pub mod error;
pub mod report;
pub mod sheet;
pub mod store;

pub use apply::{apply_rows, ApplyOptions, ErrorItem};
pub use report::{report_rows, BatchReport, FieldIssue, RecordChecker, RowReport};
pub use store::{JsonStore, MetadataStore};
