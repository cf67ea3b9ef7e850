use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dialoguer::Confirm;
use shot_import::{apply_rows, ApplyOptions, JsonStore, RecordChecker};
use shot_import::{cli, config, report, sheet};
use shot_import_common::naming_patterns;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "shot_import=debug"
    } else {
        "shot_import=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Report { input, sheet: sheet_arg, json } => {
            println!("📋 shot-import - シート検証\n");

            let workbook = sheet::find_workbook(&input)?;
            let sheet_name = sheet_arg.unwrap_or_else(|| config.sheet.clone());
            let rows = sheet::read_rows(&workbook, &sheet_name)?;
            println!("✔ {} ({}行)\n", workbook.display(), rows.len());

            let checker = RecordChecker::new(naming_patterns(), config.century_hint);
            let batch = report::report_rows(&rows, &config.header_label, &checker)?;

            for row in &batch.rows {
                let mark = if row.record.error_count == 0 { "✔" } else { "✘" };
                println!("{} {} (エラー {}件)", mark, row.record.name, row.record.error_count);
                for issue in &row.issues {
                    println!("    - {}: {}", issue.column, issue.message);
                }
            }
            println!("\n合計エラー: {}件", batch.total_errors);

            if let Some(path) = json {
                let content = serde_json::to_string_pretty(&batch)?;
                std::fs::write(&path, content)
                    .with_context(|| format!("レポートの保存に失敗: {}", path.display()))?;
                println!("✔ レポートを保存: {}", path.display());
            }
        }

        Commands::Apply { input, project, overwrite, yes, sheet: sheet_arg, store, output } => {
            println!("🚀 shot-import - シート適用\n");

            let workbook = sheet::find_workbook(&input)?;
            let sheet_name = sheet_arg.unwrap_or_else(|| config.sheet.clone());
            let rows = sheet::read_rows(&workbook, &sheet_name)?;

            let store_path = config.resolve_store_path(store)?;
            let mut db = JsonStore::open(&store_path)
                .with_context(|| format!("ストアを開けません: {}", store_path.display()))?;

            if !yes {
                let proceed = Confirm::new()
                    .with_prompt(format!(
                        "{} ({}行) を {} に適用しますか？",
                        workbook.display(),
                        rows.len(),
                        project
                    ))
                    .default(false)
                    .interact()
                    .context("確認入力に失敗")?;
                if !proceed {
                    println!("中止しました");
                    return Ok(());
                }
            }

            let mut options = ApplyOptions::new(project, config.get_author());
            options.overwrite = overwrite;
            options.century_hint = config.century_hint;
            options.header = config.header_label.clone();

            let errors = apply_rows(&mut db, &rows, &options)?;
            db.save()?;

            if errors.is_empty() {
                println!("✅ すべての項目を適用しました");
            } else {
                println!("⚠ {}件の項目を適用できませんでした:", errors.len());
                for item in &errors {
                    println!("  {}: {}", item.name, item.error);
                }
            }

            if let Some(path) = output {
                let content = serde_json::to_string_pretty(&errors)?;
                std::fs::write(&path, content)
                    .with_context(|| format!("エラー一覧の保存に失敗: {}", path.display()))?;
                println!("✔ エラー一覧を保存: {}", path.display());
            }
        }

        Commands::Item { name, project, asset_type, tasks, store } => {
            let store_path = config.resolve_store_path(store)?;
            let mut db = JsonStore::open(&store_path)?;
            let item = db.add_item(&project, &name, asset_type.as_deref(), &tasks, &config.tasks)?;
            let kind = item.kind;
            db.save()?;
            println!("✔ {} を {} に登録しました ({:?})", name, project, kind);
        }

        Commands::Check { kind, value } => match kind.check(&value, &config.tasks) {
            Ok(()) => println!("✔ {}", value),
            Err(e) => {
                println!("✘ {}", e);
                std::process::exit(1);
            }
        },

        Commands::Config { set_store, set_author, show } => {
            let mut config = config;

            if let Some(path) = set_store {
                config.set_store_path(path)?;
                println!("✔ ストアファイルを設定しました");
            }

            if let Some(author) = set_author {
                config.set_author(author)?;
                println!("✔ 記入者名を設定しました");
            }

            if show {
                println!("設定:");
                println!("  シート: {}", config.sheet);
                println!("  ヘッダー: {}", config.header_label);
                println!("  ストア: {}", config.resolve_store_path(None)?.display());
                println!("  記入者: {}", config.get_author());
                println!("  世紀ヒント: {}", config.century_hint);
                println!("  タスク: {}", config.tasks.join(", "));
            }
        }
    }

    Ok(())
}
