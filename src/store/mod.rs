//! メタデータストア
//!
//! 取り込みが行う更新操作をトレイトとして定義する。
//! 各操作は (プロジェクト, 名前) で対象を指定し、個別に確定する。

mod json;
mod types;

pub use json::JsonStore;
pub use types::{Comment, Item, ItemKind, Source};

use thiserror::Error;

/// ハンドルIN/OUTのフレーム項目名
pub const FRAME_HANDLE_IN: &str = "handlein";
pub const FRAME_HANDLE_OUT: &str = "handleout";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("プロジェクトが存在しません: {0}")]
    ProjectNotFound(String),

    #[error("{project}に{name}が存在しません")]
    ItemNotFound { project: String, name: String },

    #[error("{project}に{name}が既に存在します")]
    DuplicateItem { project: String, name: String },

    #[error("フレーム項目が不正です: {0}")]
    InvalidFrameKey(String),

    #[error("ストアのバージョンが対応していません: {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Validation(#[from] shot_import_common::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 取り込みが使用する更新操作
pub trait MetadataStore {
    fn set_shot_type(&mut self, project: &str, name: &str, shot_type: &str) -> StoreResult<()>;

    /// 作業内容を設定し、記入者を記録する。`overwrite` が偽なら既存の内容に追記する。
    fn set_note(
        &mut self,
        project: &str,
        name: &str,
        author: &str,
        note: &str,
        overwrite: bool,
    ) -> StoreResult<String>;

    fn add_comment(
        &mut self,
        project: &str,
        name: &str,
        author: &str,
        date: &str,
        text: &str,
    ) -> StoreResult<()>;

    fn add_source(
        &mut self,
        project: &str,
        name: &str,
        author: &str,
        title: &str,
        path: &str,
    ) -> StoreResult<()>;

    fn set_deadline_3d(&mut self, project: &str, name: &str, date: &str) -> StoreResult<()>;

    fn set_deadline_2d(&mut self, project: &str, name: &str, date: &str) -> StoreResult<()>;

    fn set_findate(&mut self, project: &str, name: &str, date: &str) -> StoreResult<()>;

    fn set_finver(&mut self, project: &str, name: &str, version: &str) -> StoreResult<()>;

    fn set_tags(&mut self, project: &str, name: &str, tags: &[String]) -> StoreResult<()>;

    fn set_rnum(&mut self, project: &str, name: &str, rnum: &str) -> StoreResult<()>;

    /// `key` は [`FRAME_HANDLE_IN`] / [`FRAME_HANDLE_OUT`]
    fn set_frame(&mut self, project: &str, name: &str, key: &str, frame: i32) -> StoreResult<()>;

    fn set_just_timecode_in(
        &mut self,
        project: &str,
        name: &str,
        timecode: &str,
    ) -> StoreResult<()>;
}
