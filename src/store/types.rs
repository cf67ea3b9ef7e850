use serde::{Deserialize, Serialize};
use shot_import_common::naming_patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Shot,
    Asset,
}

impl ItemKind {
    /// 名前の形式から種類を判定する（SS_0010 → ショット, stone01 → アセット）
    pub fn detect(name: &str) -> Option<Self> {
        let patterns = naming_patterns();
        if patterns.is_shot_name(name) {
            Some(ItemKind::Shot)
        } else if patterns.is_asset_name(name) {
            Some(ItemKind::Asset)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub date: String,
    pub author: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub author: String,
    pub title: String,
    pub path: String,
}

/// ストアに保存されるショット/アセット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub asset_type: String,
    pub shot_type: String,
    /// 正規化済みタスク名
    pub tasks: Vec<String>,
    pub note: String,
    /// 最後に作業内容を更新した記入者
    pub note_author: String,
    pub comments: Vec<Comment>,
    pub sources: Vec<Source>,
    pub ddline_3d: String,
    pub ddline_2d: String,
    pub findate: String,
    pub finver: String,
    pub tags: Vec<String>,
    pub rnum: String,
    pub handle_in: Option<i32>,
    pub handle_out: Option<i32>,
    pub just_timecode_in: String,
    pub just_timecode_out: String,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }
}
