use clap::{Parser, Subcommand, ValueEnum};
use shot_import_common::{
    naming_patterns, valid_asset_type, valid_shot_type, valid_task, NamingPattern,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shot-import")]
#[command(about = "制作管理シートの検証・一括更新ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// シートを検証して行ごとのエラー数を表示（ストアは変更しない）
    Report {
        /// .xlsxファイル、または.xlsxを1つだけ含むフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// シート名（省略時は設定値）
        #[arg(long)]
        sheet: Option<String>,

        /// レポートをJSONで保存
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// シートの内容をストアに適用
    Apply {
        /// .xlsxファイル、または.xlsxを1つだけ含むフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 対象プロジェクト
        #[arg(short, long)]
        project: String,

        /// 作業内容を上書き（省略時は追記）
        #[arg(long)]
        overwrite: bool,

        /// 確認せずに適用
        #[arg(short, long)]
        yes: bool,

        /// シート名（省略時は設定値）
        #[arg(long)]
        sheet: Option<String>,

        /// ストアファイル（省略時は設定値）
        #[arg(long)]
        store: Option<PathBuf>,

        /// エラー一覧をJSONで保存
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// ストアにショット/アセットを登録
    Item {
        /// ショット名（SS_0010）またはアセット名（stone01）
        #[arg(required = true)]
        name: String,

        /// 対象プロジェクト
        #[arg(short, long)]
        project: String,

        /// アセットタイプ
        #[arg(long)]
        asset_type: Option<String>,

        /// タスク（複数指定可）
        #[arg(short, long = "task")]
        tasks: Vec<String>,

        /// ストアファイル（省略時は設定値）
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// 値を1つ検証
    Check {
        /// 検証の種類
        #[arg(value_enum)]
        kind: CheckKind,

        /// 検証する値
        value: String,
    },

    /// 設定を表示/編集
    Config {
        /// ストアファイルを設定
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// 記入者名を設定
        #[arg(long)]
        set_author: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    /// 解像度（2048x1080）
    Size,
    /// ショット名（SS_0010）
    Shot,
    /// アセット名（stone01）
    Asset,
    /// ロールメディア（00_A03C001_180113_A001）
    Roll,
    /// タスク名
    Task,
    /// アセットタイプ
    AssetType,
    /// ショットタイプ
    ShotType,
}

impl CheckKind {
    /// 値を検証する（タスクは `tasks` を正式一覧として使用）
    pub fn check<S: AsRef<str>>(&self, value: &str, tasks: &[S]) -> shot_import_common::Result<()> {
        let patterns = naming_patterns();
        match self {
            CheckKind::Size => patterns.check(NamingPattern::ImageSize, value),
            CheckKind::Shot => patterns.check(NamingPattern::ShotName, value),
            CheckKind::Asset => patterns.check(NamingPattern::AssetName, value),
            CheckKind::Roll => patterns.check(NamingPattern::RollMedia, value),
            CheckKind::Task => valid_task(value, tasks),
            CheckKind::AssetType => valid_asset_type(value),
            CheckKind::ShotType => valid_shot_type(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from([
            "shot-import", "apply", "upload", "--project", "circle", "--overwrite", "-y",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply { input, project, overwrite, yes, .. } => {
                assert_eq!(input, PathBuf::from("upload"));
                assert_eq!(project, "circle");
                assert!(overwrite);
                assert!(yes);
            }
            _ => panic!("apply expected"),
        }
    }

    #[test]
    fn test_parse_check_kind() {
        let cli = Cli::try_parse_from(["shot-import", "check", "asset-type", "prop"]).unwrap();
        match cli.command {
            Commands::Check { kind, value } => {
                assert_eq!(kind, CheckKind::AssetType);
                assert_eq!(value, "prop");
            }
            _ => panic!("check expected"),
        }
    }

    #[test]
    fn test_parse_item_tasks() {
        let cli = Cli::try_parse_from([
            "shot-import", "item", "stone01", "-p", "circle", "-t", "fur", "-t", "lookdev",
        ])
        .unwrap();
        match cli.command {
            Commands::Item { tasks, .. } => assert_eq!(tasks, vec!["fur", "lookdev"]),
            _ => panic!("item expected"),
        }
    }

    #[test]
    fn test_check_kinds() {
        let tasks = shot_import_common::DEFAULT_TASKS;
        assert!(CheckKind::Size.check("plate_2048x1080", tasks).is_ok());
        assert!(CheckKind::Shot.check("SS_0010", tasks).is_ok());
        assert!(CheckKind::Asset.check("stone_01", tasks).is_err());
        assert!(CheckKind::Roll.check("00_A03C001_180113_A001", tasks).is_ok());
        assert!(CheckKind::Task.check("fursim", tasks).is_ok());
        assert!(CheckKind::AssetType.check("xyz", tasks).is_err());
        assert!(CheckKind::ShotType.check("2d", tasks).is_ok());
    }

    #[test]
    fn test_apply_requires_project() {
        assert!(Cli::try_parse_from(["shot-import", "apply", "upload"]).is_err());
    }
}
