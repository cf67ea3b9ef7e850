//! ワークブックの読み込み
//!
//! アップロード先ディレクトリから .xlsx を1つ特定し、
//! シートの各行を文字列セルの並びとして取り出す。

use crate::error::{ImportError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "XLSX"];

/// 入力パスからワークブックを特定する
///
/// ファイルならそのまま、ディレクトリなら直下の .xlsx がちょうど1つであること。
pub fn find_workbook(input: &Path) -> Result<PathBuf> {
    if !input.exists() {
        return Err(ImportError::FileNotFound(input.display().to_string()));
    }
    if input.is_file() {
        return Ok(input.to_path_buf());
    }

    let mut workbooks: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_workbook(p))
        .collect();

    match workbooks.len() {
        0 => Err(ImportError::NoWorkbook(input.display().to_string())),
        1 => Ok(workbooks.remove(0)),
        count => Err(ImportError::AmbiguousWorkbook {
            dir: input.display().to_string(),
            count,
        }),
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .map(|ext| WORKBOOK_EXTENSIONS.iter().any(|&e| e == ext.to_string_lossy()))
        .unwrap_or(false)
}

/// シートの全行を文字列セルとして読み込む
pub fn read_rows(path: &Path, sheet: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(ImportError::SheetNotFound(sheet.to_string()));
    }
    let range = workbook.worksheet_range(sheet)?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    if rows.is_empty() {
        return Err(ImportError::EmptySheet(sheet.to_string()));
    }
    tracing::debug!(path = %path.display(), sheet, rows = rows.len(), "sheet loaded");

    Ok(rows)
}

/// セル値を文字列に変換する（整数値の浮動小数は小数点なし）
///
/// 日付書式のセルはシリアル値ではなく `YYYY-MM-DD` にする。
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}
