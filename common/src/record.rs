//! シート行のレコード定義
//!
//! シートの1行（15セル）を列位置で名前付きフィールドに割り当てる。
//! 行を処理できるか（ヘッダー・セル数不正・処理対象）の判定はデコードとは別に行う。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 1行のセル数
pub const ROW_ARITY: usize = 15;

/// 名前列のタイトル（この値を持つ行はヘッダーとして読み飛ばす）
pub const HEADER_LABEL: &str = "샷네임";

/// シートの列（並び順 = セル位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    ShotType,
    Note,
    Comment,
    Link,
    Ddline3d,
    Ddline2d,
    Findate,
    Finver,
    Tags,
    Rnum,
    HandleIn,
    HandleOut,
    JustTimecodeIn,
    JustTimecodeOut,
}

impl Column {
    pub const ALL: [Column; ROW_ARITY] = [
        Column::Name,
        Column::ShotType,
        Column::Note,
        Column::Comment,
        Column::Link,
        Column::Ddline3d,
        Column::Ddline2d,
        Column::Findate,
        Column::Finver,
        Column::Tags,
        Column::Rnum,
        Column::HandleIn,
        Column::HandleOut,
        Column::JustTimecodeIn,
        Column::JustTimecodeOut,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// シート上の列タイトル
    pub fn label(&self) -> &'static str {
        match self {
            Column::Name => HEADER_LABEL,
            Column::ShotType => "샷타입",
            Column::Note => "작업내용",
            Column::Comment => "수정사항",
            Column::Link => "링크자료",
            Column::Ddline3d => "3D마감",
            Column::Ddline2d => "2D마감",
            Column::Findate => "FIN날짜",
            Column::Finver => "FIN버전",
            Column::Tags => "태그",
            Column::Rnum => "롤넘버",
            Column::HandleIn => "핸들IN",
            Column::HandleOut => "핸들OUT",
            Column::JustTimecodeIn => "JUST타임코드IN",
            Column::JustTimecodeOut => "JUST타임코드OUT",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// デコード済みの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    pub shot_type: String,              // 2d, 3d
    pub note: String,                   // 作業内容
    pub comment: String,                // 修正事項
    pub link: String,                   // リンク資料（タイトル:パス、改行区切り）
    pub ddline_3d: String,
    pub ddline_2d: String,
    pub findate: String,
    pub finver: String,
    pub tags: String,                   // カンマ区切り
    pub rnum: String,                   // ロール番号
    pub handle_in: String,
    pub handle_out: String,
    pub just_timecode_in: String,
    pub just_timecode_out: String,

    /// 書式・列挙値エラーの件数（レポート時に設定）
    #[serde(default)]
    pub error_count: usize,
}

impl Record {
    /// セル列を位置どおりにフィールドへ割り当てる
    pub fn decode(cells: &[String; ROW_ARITY]) -> Self {
        let [
            name,
            shot_type,
            note,
            comment,
            link,
            ddline_3d,
            ddline_2d,
            findate,
            finver,
            tags,
            rnum,
            handle_in,
            handle_out,
            just_timecode_in,
            just_timecode_out,
        ] = cells.clone();
        Self {
            name,
            shot_type,
            note,
            comment,
            link,
            ddline_3d,
            ddline_2d,
            findate,
            finver,
            tags,
            rnum,
            handle_in,
            handle_out,
            just_timecode_in,
            just_timecode_out,
            error_count: 0,
        }
    }

    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::ShotType => &self.shot_type,
            Column::Note => &self.note,
            Column::Comment => &self.comment,
            Column::Link => &self.link,
            Column::Ddline3d => &self.ddline_3d,
            Column::Ddline2d => &self.ddline_2d,
            Column::Findate => &self.findate,
            Column::Finver => &self.finver,
            Column::Tags => &self.tags,
            Column::Rnum => &self.rnum,
            Column::HandleIn => &self.handle_in,
            Column::HandleOut => &self.handle_out,
            Column::JustTimecodeIn => &self.just_timecode_in,
            Column::JustTimecodeOut => &self.just_timecode_out,
        }
    }
}

/// 行の処理可否
#[derive(Debug, PartialEq, Eq)]
pub enum RowDisposition<'a> {
    /// ヘッダー行（読み飛ばす）
    Header,
    /// セル数不正（バッチ全体を中止する）
    Malformed { found: usize },
    /// デコード可能
    Proceed(&'a [String; ROW_ARITY]),
}

/// 行を分類する
pub fn classify_row<'a>(cells: &'a [String], header: &str) -> RowDisposition<'a> {
    let cells: &[String; ROW_ARITY] = match cells.try_into() {
        Ok(cells) => cells,
        Err(_) => return RowDisposition::Malformed { found: cells.len() },
    };
    if cells[Column::Name.index()] == header {
        return RowDisposition::Header;
    }
    RowDisposition::Proceed(cells)
}

/// バッチ全体のセル数を事前に検査する
///
/// 行番号は1始まり。
pub fn guard_rows<R: AsRef<[String]>>(rows: &[R], header: &str) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if let RowDisposition::Malformed { found } = classify_row(row.as_ref(), header) {
            return Err(Error::Arity {
                row: i + 1,
                found,
                expected: ROW_ARITY,
            });
        }
    }
    Ok(())
}
