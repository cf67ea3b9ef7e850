//! シート内容のストアへの適用
//!
//! 各行を列順に処理し、入力のあるフィールドごとに1回ずつ更新を呼ぶ。
//! 失敗したフィールドはエラー一覧に記録して次のフィールドへ進む。
//! 再試行・ロールバック・中断は行わない。

use crate::datetime::{to_full_time, DateError};
use crate::error::Result;
use crate::store::{MetadataStore, StoreError, FRAME_HANDLE_IN, FRAME_HANDLE_OUT};
use serde::{Deserialize, Serialize};
use shot_import_common::{classify_row, guard_rows, Column, Record, RowDisposition, HEADER_LABEL};
use std::num::ParseIntError;
use thiserror::Error;

/// 適用に失敗した項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorItem {
    pub name: String,
    pub error: String,
}

/// フィールド単位の失敗
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("整数ではありません: {value} ({source})")]
    Integer {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(transparent)]
    Date(#[from] DateError),

    #[error("タイトル:パス形式ではありません: {0}")]
    Source(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 適用オプション
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub project: String,
    /// 作業内容・コメント・資料の記入者
    pub author: String,
    /// 作業内容を上書きする（偽なら追記）
    pub overwrite: bool,
    pub century_hint: u32,
    pub header: String,
}

impl ApplyOptions {
    pub fn new(project: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            author: author.into(),
            overwrite: false,
            century_hint: crate::config::DEFAULT_CENTURY_HINT,
            header: HEADER_LABEL.to_string(),
        }
    }
}

/// シートの行をストアに適用し、失敗した項目を順に返す
///
/// セル数が不正な行が1つでもあれば、何も適用せずにエラーを返す。
/// 空の一覧は全項目の成功を意味する。
pub fn apply_rows<S, R>(store: &mut S, rows: &[R], options: &ApplyOptions) -> Result<Vec<ErrorItem>>
where
    S: MetadataStore + ?Sized,
    R: AsRef<[String]>,
{
    guard_rows(rows, &options.header)?;

    let mut errors = Vec::new();
    let mut applied_rows = 0;
    for row in rows {
        let cells = match classify_row(row.as_ref(), &options.header) {
            RowDisposition::Proceed(cells) => cells,
            RowDisposition::Header | RowDisposition::Malformed { .. } => continue,
        };
        let record = Record::decode(cells);
        apply_record(store, &record, options, &mut errors);
        applied_rows += 1;
    }

    tracing::info!(
        project = %options.project,
        rows = applied_rows,
        errors = errors.len(),
        "sheet applied"
    );
    Ok(errors)
}

/// 1行分のフィールドを列順に適用する
fn apply_record<S: MetadataStore + ?Sized>(
    store: &mut S,
    record: &Record,
    options: &ApplyOptions,
    errors: &mut Vec<ErrorItem>,
) {
    let name = record.name.as_str();

    for column in Column::ALL {
        let value = record.get(column);
        if value.is_empty() || column == Column::Name {
            continue;
        }

        // リンク資料は1行ごとに独立した更新
        if column == Column::Link {
            for line in value.split('\n') {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(err) = apply_source(store, name, line, options) {
                    push_error(errors, name, column, err);
                }
            }
            continue;
        }

        match apply_field(store, name, column, value, options) {
            Ok(()) => tracing::debug!(name, column = %column, "field applied"),
            Err(err) => push_error(errors, name, column, err),
        }
    }
}

fn push_error(errors: &mut Vec<ErrorItem>, name: &str, column: Column, err: FieldError) {
    tracing::warn!(name, column = %column, error = %err, "field not applied");
    errors.push(ErrorItem {
        name: name.to_string(),
        error: err.to_string(),
    });
}

fn apply_source<S: MetadataStore + ?Sized>(
    store: &mut S,
    name: &str,
    line: &str,
    options: &ApplyOptions,
) -> std::result::Result<(), FieldError> {
    // 最初の ':' で分割（パス側の ':' は保持）
    let (title, path) = line
        .split_once(':')
        .ok_or_else(|| FieldError::Source(line.to_string()))?;
    store.add_source(&options.project, name, &options.author, title, path)?;
    Ok(())
}

fn apply_field<S: MetadataStore + ?Sized>(
    store: &mut S,
    name: &str,
    column: Column,
    value: &str,
    options: &ApplyOptions,
) -> std::result::Result<(), FieldError> {
    let project = options.project.as_str();

    match column {
        Column::ShotType => store.set_shot_type(project, name, value)?,
        Column::Note => {
            store.set_note(project, name, &options.author, value, options.overwrite)?;
        }
        Column::Comment => {
            let date = chrono::Local::now().to_rfc3339();
            store.add_comment(project, name, &options.author, &date, value)?;
        }
        Column::Ddline3d => {
            let date = to_full_time(options.century_hint, value)?;
            store.set_deadline_3d(project, name, &date)?;
        }
        Column::Ddline2d => {
            let date = to_full_time(options.century_hint, value)?;
            store.set_deadline_2d(project, name, &date)?;
        }
        Column::Findate => {
            let date = to_full_time(options.century_hint, value)?;
            store.set_findate(project, name, &date)?;
        }
        Column::Finver => store.set_finver(project, name, value)?,
        Column::Tags => {
            let tags: Vec<String> = value.split(',').map(String::from).collect();
            store.set_tags(project, name, &tags)?;
        }
        Column::Rnum => store.set_rnum(project, name, value)?,
        Column::HandleIn => store.set_frame(project, name, FRAME_HANDLE_IN, parse_frame(value)?)?,
        Column::HandleOut => store.set_frame(project, name, FRAME_HANDLE_OUT, parse_frame(value)?)?,
        Column::JustTimecodeIn => store.set_just_timecode_in(project, name, value)?,
        // OUT専用の更新がないため、IN と同じ更新を使う
        Column::JustTimecodeOut => store.set_just_timecode_in(project, name, value)?,
        Column::Name | Column::Link => {}
    }
    Ok(())
}

fn parse_frame(value: &str) -> std::result::Result<i32, FieldError> {
    value.parse::<i32>().map_err(|source| FieldError::Integer {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreResult;
    use shot_import_common::ROW_ARITY;

    /// 呼び出しを記録し、指定した操作を失敗させるストア
    #[derive(Default)]
    struct RecordingStore {
        calls: Vec<String>,
        fail_on: Vec<&'static str>,
    }

    impl RecordingStore {
        fn record(&mut self, op: &'static str, detail: String) -> StoreResult<()> {
            self.calls.push(format!("{} {}", op, detail));
            if self.fail_on.contains(&op) {
                return Err(StoreError::InvalidFrameKey(format!("{} rejected", op)));
            }
            Ok(())
        }
    }

    impl MetadataStore for RecordingStore {
        fn set_shot_type(&mut self, _: &str, name: &str, shot_type: &str) -> StoreResult<()> {
            self.record("shottype", format!("{}={}", name, shot_type))
        }
        fn set_note(
            &mut self,
            _: &str,
            name: &str,
            _: &str,
            note: &str,
            overwrite: bool,
        ) -> StoreResult<String> {
            self.record("note", format!("{}={}/{}", name, note, overwrite))?;
            Ok(note.to_string())
        }
        fn add_comment(
            &mut self,
            _: &str,
            name: &str,
            _: &str,
            _: &str,
            text: &str,
        ) -> StoreResult<()> {
            self.record("comment", format!("{}={}", name, text))
        }
        fn add_source(
            &mut self,
            _: &str,
            name: &str,
            _: &str,
            title: &str,
            path: &str,
        ) -> StoreResult<()> {
            self.record("source", format!("{}={}|{}", name, title, path))
        }
        fn set_deadline_3d(&mut self, _: &str, name: &str, date: &str) -> StoreResult<()> {
            self.record("ddline3d", format!("{}={}", name, date))
        }
        fn set_deadline_2d(&mut self, _: &str, name: &str, date: &str) -> StoreResult<()> {
            self.record("ddline2d", format!("{}={}", name, date))
        }
        fn set_findate(&mut self, _: &str, name: &str, date: &str) -> StoreResult<()> {
            self.record("findate", format!("{}={}", name, date))
        }
        fn set_finver(&mut self, _: &str, name: &str, version: &str) -> StoreResult<()> {
            self.record("finver", format!("{}={}", name, version))
        }
        fn set_tags(&mut self, _: &str, name: &str, tags: &[String]) -> StoreResult<()> {
            self.record("tags", format!("{}={}", name, tags.join("|")))
        }
        fn set_rnum(&mut self, _: &str, name: &str, rnum: &str) -> StoreResult<()> {
            self.record("rnum", format!("{}={}", name, rnum))
        }
        fn set_frame(&mut self, _: &str, name: &str, key: &str, frame: i32) -> StoreResult<()> {
            self.record("frame", format!("{}:{}={}", name, key, frame))
        }
        fn set_just_timecode_in(&mut self, _: &str, name: &str, timecode: &str) -> StoreResult<()> {
            self.record("justin", format!("{}={}", name, timecode))
        }
    }

    fn row(fill: &[(Column, &str)]) -> Vec<String> {
        let mut cells = vec![String::new(); ROW_ARITY];
        for (column, value) in fill {
            cells[column.index()] = value.to_string();
        }
        cells
    }

    fn options() -> ApplyOptions {
        ApplyOptions::new("circle", "kim")
    }

    #[test]
    fn test_fields_applied_in_column_order() {
        let rows = vec![row(&[
            (Column::Name, "SS_0010"),
            (Column::JustTimecodeOut, "01:00:10:00"),
            (Column::ShotType, "3d"),
            (Column::Tags, "fx,comp"),
            (Column::HandleIn, "8"),
            (Column::Findate, "2019-02-01"),
        ])];
        let mut store = RecordingStore::default();
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            store.calls,
            vec![
                "shottype SS_0010=3d",
                "findate SS_0010=2019-02-01T00:00:00+00:00",
                "tags SS_0010=fx|comp",
                "frame SS_0010:handlein=8",
                "justin SS_0010=01:00:10:00",
            ]
        );
    }

    #[test]
    fn test_empty_cells_never_call_store() {
        let rows = vec![row(&[(Column::Name, "SS_0010")])];
        let mut store = RecordingStore::default();
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();
        assert!(errors.is_empty());
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_failure_continues_with_next_field() {
        let rows = vec![
            row(&[
                (Column::Name, "SS_0010"),
                (Column::Note, "rotoscope"),
                (Column::Finver, "v03"),
            ]),
            row(&[(Column::Name, "SS_0020"), (Column::Note, "paint")]),
        ];
        let mut store = RecordingStore { fail_on: vec!["note"], ..Default::default() };
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();

        // 作業内容は失敗、同じ行のFINバージョンと次の行は処理される
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].name, "SS_0010");
        assert_eq!(errors[1].name, "SS_0020");
        assert!(store.calls.contains(&"finver SS_0010=v03".to_string()));
        assert!(!store.calls.iter().any(|c| c.starts_with("shottype")));
    }

    #[test]
    fn test_handle_parse_error_skips_field() {
        let rows = vec![row(&[
            (Column::Name, "SS_0010"),
            (Column::HandleIn, "8f"),
            (Column::HandleOut, "+12"),
        ])];
        let mut store = RecordingStore::default();
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].error.contains("8f"));
        assert_eq!(store.calls, vec!["frame SS_0010:handleout=12"]);
    }

    #[test]
    fn test_date_parse_error() {
        let rows = vec![row(&[(Column::Name, "SS_0010"), (Column::Ddline2d, "next week")])];
        let mut store = RecordingStore::default();
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_two_digit_year_uses_fixed_hint() {
        let rows = vec![row(&[(Column::Name, "SS_0010"), (Column::Ddline3d, "190301")])];
        let mut store = RecordingStore::default();
        apply_rows(&mut store, &rows, &options()).unwrap();
        assert_eq!(store.calls, vec!["ddline3d SS_0010=1919-03-01T00:00:00+00:00"]);
    }

    #[test]
    fn test_sources_split_per_line() {
        let rows = vec![row(&[
            (Column::Name, "SS_0010"),
            (Column::Link, "plate:/show/plate.mov\nbroken line\n\nref:http://host/ref"),
        ])];
        let mut store = RecordingStore::default();
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].error.contains("broken line"));
        assert_eq!(
            store.calls,
            vec![
                "source SS_0010=plate|/show/plate.mov",
                "source SS_0010=ref|http://host/ref",
            ]
        );
    }

    #[test]
    fn test_each_failing_source_reported() {
        let rows = vec![row(&[(Column::Name, "SS_0010"), (Column::Link, "a:1\nb:2")])];
        let mut store = RecordingStore { fail_on: vec!["source"], ..Default::default() };
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(store.calls.len(), 2);
    }

    #[test]
    fn test_timecode_out_uses_timecode_in_update() {
        let rows = vec![row(&[
            (Column::Name, "SS_0010"),
            (Column::JustTimecodeIn, "01:00:00:00"),
            (Column::JustTimecodeOut, "01:00:05:00"),
        ])];
        let mut store = RecordingStore::default();
        apply_rows(&mut store, &rows, &options()).unwrap();
        assert_eq!(
            store.calls,
            vec!["justin SS_0010=01:00:00:00", "justin SS_0010=01:00:05:00"]
        );
    }

    #[test]
    fn test_header_row_skipped() {
        let rows = vec![
            row(&[(Column::Name, HEADER_LABEL), (Column::ShotType, "샷타입")]),
            row(&[(Column::Name, "SS_0010"), (Column::ShotType, "2d")]),
        ];
        let mut store = RecordingStore::default();
        let errors = apply_rows(&mut store, &rows, &options()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(store.calls, vec!["shottype SS_0010=2d"]);
    }

    #[test]
    fn test_arity_error_before_any_mutation() {
        let mut short = row(&[(Column::Name, "SS_0020")]);
        short.pop();
        let rows = vec![row(&[(Column::Name, "SS_0010"), (Column::Finver, "v01")]), short];
        let mut store = RecordingStore::default();

        let result = apply_rows(&mut store, &rows, &options());
        assert!(matches!(result, Err(crate::error::ImportError::Arity(_))));
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_overwrite_flag_forwarded() {
        let rows = vec![row(&[(Column::Name, "SS_0010"), (Column::Note, "n")])];
        let mut store = RecordingStore::default();
        let mut opts = options();
        opts.overwrite = true;
        apply_rows(&mut store, &rows, &opts).unwrap();
        assert_eq!(store.calls, vec!["note SS_0010=n/true"]);
    }

    #[test]
    fn test_error_item_serializes_pascal_case() {
        let item = ErrorItem { name: "SS_0010".into(), error: "failed".into() };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"Name":"SS_0010","Error":"failed"}"#);
    }
}
