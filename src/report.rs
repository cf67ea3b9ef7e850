//! 取り込み前の検証レポート
//!
//! ストアを変更せずに各行の書式・列挙値エラーを数える。
//! ここで数えたエラーは適用時のエラーとは独立している。

use crate::datetime::to_full_time;
use crate::error::Result;
use serde::Serialize;
use shot_import_common::{
    classify_row, guard_rows, valid_shot_type, Column, NamingPattern, NamingPatterns, Record,
    RowDisposition,
};

/// 1フィールドの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub column: Column,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    pub record: Record,
    pub issues: Vec<FieldIssue>,
}

/// バッチ全体のレポート
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub rows: Vec<RowReport>,
    pub total_errors: usize,
}

impl BatchReport {
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|r| &r.record)
    }
}

/// レコード単位の検証器
pub struct RecordChecker<'a> {
    patterns: &'a NamingPatterns,
    century_hint: u32,
}

impl<'a> RecordChecker<'a> {
    pub fn new(patterns: &'a NamingPatterns, century_hint: u32) -> Self {
        Self { patterns, century_hint }
    }

    /// 入力のあるフィールドを検証し、`error_count` を設定する
    pub fn check_record(&self, record: &mut Record) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        for column in Column::ALL {
            let value = record.get(column);
            // 名前以外は空欄なら検証しない
            if value.is_empty() && column != Column::Name {
                continue;
            }
            if let Some(message) = self.check_field(column, value) {
                issues.push(FieldIssue {
                    column,
                    value: value.to_string(),
                    message,
                });
            }
        }

        record.error_count = issues.len();
        issues
    }

    fn check_field(&self, column: Column, value: &str) -> Option<String> {
        match column {
            Column::Name => {
                if self.patterns.is_shot_name(value) || self.patterns.is_asset_name(value) {
                    None
                } else {
                    self.patterns
                        .check(NamingPattern::ShotName, value)
                        .err()
                        .map(|e| e.to_string())
                }
            }
            Column::ShotType => valid_shot_type(value).err().map(|e| e.to_string()),
            Column::Link => value
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .find(|line| !line.contains(':'))
                .map(|line| format!("タイトル:パス形式ではありません: {}", line)),
            Column::Ddline3d | Column::Ddline2d | Column::Findate => {
                to_full_time(self.century_hint, value).err().map(|e| e.to_string())
            }
            Column::Rnum => self
                .patterns
                .check(NamingPattern::RollMedia, value)
                .err()
                .map(|e| e.to_string()),
            Column::HandleIn | Column::HandleOut => value
                .parse::<i32>()
                .err()
                .map(|e| format!("整数ではありません: {} ({})", value, e)),
            _ => None,
        }
    }
}

/// シートの行を検証してレポートを作る
///
/// セル数が不正な行があればバッチ全体をエラーとし、ヘッダー行は除外する。
pub fn report_rows<R: AsRef<[String]>>(
    rows: &[R],
    header: &str,
    checker: &RecordChecker<'_>,
) -> Result<BatchReport> {
    guard_rows(rows, header)?;

    let mut report = BatchReport::default();
    for row in rows {
        let cells = match classify_row(row.as_ref(), header) {
            RowDisposition::Proceed(cells) => cells,
            RowDisposition::Header | RowDisposition::Malformed { .. } => continue,
        };
        let mut record = Record::decode(cells);
        let issues = checker.check_record(&mut record);
        report.total_errors += record.error_count;
        report.rows.push(RowReport { record, issues });
    }

    tracing::info!(
        rows = report.rows.len(),
        errors = report.total_errors,
        "validation report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shot_import_common::{naming_patterns, HEADER_LABEL, ROW_ARITY};

    fn checker() -> RecordChecker<'static> {
        RecordChecker::new(naming_patterns(), 19)
    }

    fn record(fill: &[(Column, &str)]) -> Record {
        let mut cells = vec![String::new(); ROW_ARITY];
        for (column, value) in fill {
            cells[column.index()] = value.to_string();
        }
        let cells: &[String; ROW_ARITY] = cells.as_slice().try_into().unwrap();
        Record::decode(cells)
    }

    #[test]
    fn test_clean_record() {
        let mut r = record(&[
            (Column::Name, "SS_0010"),
            (Column::ShotType, "3d"),
            (Column::Link, "plate:/show/plate.mov\nref:http://example.com/ref"),
            (Column::Ddline3d, "2019-02-01"),
            (Column::Rnum, "00_A03C001_180113_A001"),
            (Column::HandleIn, "8"),
            (Column::HandleOut, "-4"),
        ]);
        assert!(checker().check_record(&mut r).is_empty());
        assert_eq!(r.error_count, 0);
    }

    #[test]
    fn test_asset_name_accepted() {
        let mut r = record(&[(Column::Name, "stone01")]);
        assert!(checker().check_record(&mut r).is_empty());
    }

    #[test]
    fn test_counts_each_failing_field() {
        let mut r = record(&[
            (Column::Name, "SS-0010"),
            (Column::ShotType, "4d"),
            (Column::Link, "no colon here"),
            (Column::Findate, "someday"),
            (Column::Rnum, "a03c001"),
            (Column::HandleIn, "eight"),
            (Column::Note, "free text is never checked"),
        ]);
        let issues = checker().check_record(&mut r);
        assert_eq!(r.error_count, 6);
        let columns: Vec<Column> = issues.iter().map(|i| i.column).collect();
        assert_eq!(
            columns,
            vec![
                Column::Name,
                Column::ShotType,
                Column::Link,
                Column::Findate,
                Column::Rnum,
                Column::HandleIn
            ]
        );
        assert!(issues[1].message.contains("4d"));
    }

    #[test]
    fn test_empty_name_is_error() {
        let mut r = record(&[]);
        checker().check_record(&mut r);
        assert_eq!(r.error_count, 1);
    }

    #[test]
    fn test_report_skips_header_and_sums() {
        let mut header = vec![String::new(); ROW_ARITY];
        header[0] = HEADER_LABEL.to_string();
        let mut bad = vec![String::new(); ROW_ARITY];
        bad[0] = "SS_0020".to_string();
        bad[1] = "2D".to_string();
        bad[11] = "x".to_string();
        let mut good = vec![String::new(); ROW_ARITY];
        good[0] = "SS_0010".to_string();
        let rows = vec![header, good, bad];

        let report = report_rows(&rows, HEADER_LABEL, &checker()).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_errors, 2);
        let names: Vec<&str> = report.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["SS_0010", "SS_0020"]);
    }

    #[test]
    fn test_report_arity_is_fatal() {
        let rows = vec![vec![String::new(); ROW_ARITY], vec![String::new(); 14]];
        assert!(report_rows(&rows, HEADER_LABEL, &checker()).is_err());
    }
}
