//! 命名規則の検証
//!
//! 解像度・ショット名・アセット名・ロールメディアの4形式を判定する。
//! パターンは起動時に一度だけコンパイルし、以降は参照で共有する。

use crate::error::{Error, Result};
use regex::Regex;

// 数字は ASCII の [0-9] のみ（regex の \d は Unicode 数字に一致する）

/// 解像度: 2048x1080 形式（末尾のみアンカー）
const IMAGE_SIZE: &str = r"[0-9]{2,5}[xX][0-9]{2,5}$";
/// ショット名: SS_0010 形式
const SHOT_NAME: &str = r"^[a-zA-Z0-9]+_[a-zA-Z0-9]+$";
/// アセット名: stone01 形式
const ASSET_NAME: &str = r"^[a-zA-Z0-9]+$";
/// ロールメディア: 00_A03C001_180113_A001 形式
///
/// Alexa: N_AAAACCCC_YYMMDD_RRRR（順番_リール名_年月日_ユニークコード）
const ROLL_MEDIA: &str = r"^[0-9]+_[A-Z0-9]+_[0-9]+_[A-Z0-9]+$";

/// 命名規則の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPattern {
    ImageSize,
    ShotName,
    AssetName,
    RollMedia,
}

impl NamingPattern {
    pub const ALL: [NamingPattern; 4] = [
        NamingPattern::ImageSize,
        NamingPattern::ShotName,
        NamingPattern::AssetName,
        NamingPattern::RollMedia,
    ];

    /// エラーメッセージ用の名前
    pub fn label(&self) -> &'static str {
        match self {
            NamingPattern::ImageSize => "image size",
            NamingPattern::ShotName => "shot name",
            NamingPattern::AssetName => "asset name",
            NamingPattern::RollMedia => "roll media",
        }
    }
}

impl std::fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// コンパイル済みパターン一式
#[derive(Debug, Clone)]
pub struct NamingPatterns {
    image_size: Regex,
    shot_name: Regex,
    asset_name: Regex,
    roll_media: Regex,
}

impl NamingPatterns {
    pub fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            image_size: Regex::new(IMAGE_SIZE)?,
            shot_name: Regex::new(SHOT_NAME)?,
            asset_name: Regex::new(ASSET_NAME)?,
            roll_media: Regex::new(ROLL_MEDIA)?,
        })
    }

    pub fn is_image_size(&self, value: &str) -> bool {
        self.image_size.is_match(value)
    }

    pub fn is_shot_name(&self, value: &str) -> bool {
        self.shot_name.is_match(value)
    }

    pub fn is_asset_name(&self, value: &str) -> bool {
        self.asset_name.is_match(value)
    }

    pub fn is_roll_media(&self, value: &str) -> bool {
        self.roll_media.is_match(value)
    }

    pub fn matches(&self, pattern: NamingPattern, value: &str) -> bool {
        match pattern {
            NamingPattern::ImageSize => self.is_image_size(value),
            NamingPattern::ShotName => self.is_shot_name(value),
            NamingPattern::AssetName => self.is_asset_name(value),
            NamingPattern::RollMedia => self.is_roll_media(value),
        }
    }

    /// 不一致をエラー値として返す
    pub fn check(&self, pattern: NamingPattern, value: &str) -> Result<()> {
        if self.matches(pattern, value) {
            Ok(())
        } else {
            Err(Error::Format {
                pattern: pattern.label(),
                value: value.to_string(),
            })
        }
    }
}

lazy_static::lazy_static! {
    static ref PATTERNS: NamingPatterns =
        NamingPatterns::compile().expect("built-in naming patterns must compile");
}

/// プロセス共通のパターン一式
pub fn naming_patterns() -> &'static NamingPatterns {
    &PATTERNS
}

pub fn is_image_size(value: &str) -> bool {
    PATTERNS.is_image_size(value)
}

pub fn is_shot_name(value: &str) -> bool {
    PATTERNS.is_shot_name(value)
}

pub fn is_asset_name(value: &str) -> bool {
    PATTERNS.is_asset_name(value)
}

pub fn is_roll_media(value: &str) -> bool {
    PATTERNS.is_roll_media(value)
}
