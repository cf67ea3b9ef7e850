//! タスク名の正規化
//!
//! 歴史的経緯で残っている別名を正式名に寄せる。
//! 別名は段階的に廃止する予定だが、既存データとの互換のため維持する。

use crate::error::{Error, Result};
use std::collections::HashMap;

/// 正式なタスク一覧（設定で上書きされない場合に使用）
pub const DEFAULT_TASKS: &[&str] = &[
    "model", "mm", "layout", "ani", "fx", "mg", "temp1", "previz", "fur", "sim",
    "crowd", "light", "comp", "matte", "env", "concept",
];

lazy_static::lazy_static! {
    /// 小文字化した別名 → 正式名
    static ref TASK_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // fursim はショット作業、fur はアセット作業での呼び名
        m.insert("fursim", "fur");
        m.insert("lookdev", "light");
        m.insert("look", "light");
        m.insert("rig", "sim");
        m
    };
}

/// タスク名を正式名（小文字）に変換する
///
/// 別名表にない名前は小文字化のみ行う。
pub fn normalize_task(task: &str) -> String {
    let lower = task.to_lowercase();
    match TASK_ALIASES.get(lower.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => lower,
    }
}

/// タスク名が一覧のいずれかと同じ正式名になるか検証する
///
/// 一覧側も正規化してから比較するため、一覧に別名が含まれていても一致する。
pub fn valid_task<S: AsRef<str>>(input: &str, tasks: &[S]) -> Result<()> {
    let wanted = normalize_task(input);
    if tasks.iter().any(|t| normalize_task(t.as_ref()) == wanted) {
        return Ok(());
    }
    Err(Error::Domain {
        domain: "task",
        value: input.to_string(),
    })
}
