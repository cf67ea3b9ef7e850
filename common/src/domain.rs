//! 列挙値の検証（アセットタイプ・ショットタイプ）

use crate::error::{Error, Result};

pub const ASSET_TYPES: &[&str] = &[
    "char", "comp", "env", "fx", "matte", "plant", "prop", "vehicle", "concept",
];

pub const SHOT_TYPES: &[&str] = &["2d", "3d"];

/// アセットタイプが有効か検証する（大文字小文字を区別）
pub fn valid_asset_type(asset_type: &str) -> Result<()> {
    check_member(ASSET_TYPES, "asset type", asset_type)
}

/// ショットタイプが有効か検証する（大文字小文字を区別）
pub fn valid_shot_type(shot_type: &str) -> Result<()> {
    check_member(SHOT_TYPES, "shot type", shot_type)
}

fn check_member(set: &[&str], domain: &'static str, value: &str) -> Result<()> {
    if set.contains(&value) {
        Ok(())
    } else {
        Err(Error::Domain {
            domain,
            value: value.to_string(),
        })
    }
}
