//! 日付文字列の正規化
//!
//! シートに入力された締切・完了日をRFC 3339形式に変換する。
//! 2桁年は呼び出し側が渡す世紀ヒントで補完する（常に 19 が渡される。
//! 2000年以降の2桁年は1900年代として解釈される既知の制限）。

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("日付形式ではありません: {0}")]
    Unsupported(String),

    #[error("存在しない日付です: {0}")]
    Invalid(String),
}

/// 日付文字列をRFC 3339（00:00 UTC）に変換する
///
/// # Arguments
/// * `century_hint` - 2桁年に付与する世紀（19 → 19YY）
/// * `input` - `YYYY-MM-DD`, `YYYYMMDD`, `YYMMDD`, `YY-MM-DD`, RFC 3339
pub fn to_full_time(century_hint: u32, input: &str) -> Result<String, DateError> {
    lazy_static::lazy_static! {
        // 区切りは - . / または無し。数字は ASCII のみ
        static ref FULL_YEAR_RE: Regex =
            Regex::new(r"^([0-9]{4})[-./]?([0-9]{2})[-./]?([0-9]{2})$").unwrap();
        static ref SHORT_YEAR_RE: Regex =
            Regex::new(r"^([0-9]{2})[-./]?([0-9]{2})[-./]?([0-9]{2})$").unwrap();
    }

    let input = input.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(time.to_rfc3339());
    }

    let (year, month, day) = if let Some(cap) = FULL_YEAR_RE.captures(input) {
        (parse_part(&cap[1], input)?, parse_part(&cap[2], input)?, parse_part(&cap[3], input)?)
    } else if let Some(cap) = SHORT_YEAR_RE.captures(input) {
        let yy = parse_part(&cap[1], input)?;
        let year = century_hint
            .checked_mul(100)
            .and_then(|base| base.checked_add(yy))
            .ok_or_else(|| DateError::Invalid(input.to_string()))?;
        (year, parse_part(&cap[2], input)?, parse_part(&cap[3], input)?)
    } else {
        return Err(DateError::Unsupported(input.to_string()));
    };

    let year = i32::try_from(year).map_err(|_| DateError::Invalid(input.to_string()))?;
    let midnight = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DateError::Invalid(input.to_string()))?;

    Ok(Utc.from_utc_datetime(&midnight).to_rfc3339())
}

fn parse_part(digits: &str, input: &str) -> Result<u32, DateError> {
    digits
        .parse::<u32>()
        .map_err(|_| DateError::Unsupported(input.to_string()))
}
