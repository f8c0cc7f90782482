use anyhow::Context;
use chair_configurator::{assets, cli, config, error, loader};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use configurator_common::{Catalog, CatalogEntry, Configurator};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::List { ref category, ref search, all, json } => {
            let mut configurator = build_configurator(&cli, &config).await?;

            let entries = if all {
                configurator.clear_filter()
            } else if let Some(term) = search {
                configurator.filter_by_search(term)
            } else if let Some(category) = category {
                configurator.filter_by_category(category)
            } else {
                configurator.visible_set()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
                if let Some(active) = configurator.index().active_category() {
                    println!("\nカテゴリ: {}", active);
                }
            }
        }

        Commands::Categories => {
            let configurator = build_configurator(&cli, &config).await?;
            let active = configurator.index().active_category().map(str::to_string);

            println!("🏷️ カテゴリ一覧\n");
            for (category, count) in configurator.index().catalog().categories() {
                let marker = if active.as_deref() == Some(category.as_str()) { "*" } else { " " };
                println!("{} {} ({}件)", marker, category, count);
            }
        }

        Commands::Select { ref name, verify, ref root } => {
            let mut configurator = build_configurator(&cli, &config).await?;
            configurator.subscribe(|event| {
                println!("📡 選択: {} ({})", event.name(), event.category());
            });

            match name {
                Some(name) => {
                    if !configurator.pick(name) {
                        println!("⚠ カタログに無い椅子です: {}", name);
                    }
                }
                None => {
                    let entry = choose_interactive(&configurator.visible_set())?;
                    configurator.select(entry);
                }
            }

            println!("✔ アセット: {}", configurator.render_asset());

            if verify {
                let selected = configurator
                    .selected()
                    .cloned()
                    .context("選択中の椅子がありません")?;
                let path = assets::verify_on_disk(&configurator.settings().resolver, &selected, root)?;
                println!("✔ モデルファイルを確認: {}", path.display());
            }
        }

        Commands::Assets { ref root, json } => {
            let catalog = load_catalog(&cli, &config).await?;
            let report = assets::audit(&config.settings().resolver, &catalog, root)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("📦 アセット監査\n");
                println!("  あり: {}件", report.present.len());
                for name in &report.missing {
                    println!("  ✘ モデル無し: {}", name);
                }
                for name in &report.orphaned {
                    println!("  ? カタログ外: {}", name);
                }
                if report.is_complete() {
                    println!("\n✅ 全ての椅子にモデルがあります");
                }
            }
        }

        Commands::Status => {
            let configurator = build_configurator(&cli, &config).await?;
            println!("{}", serde_json::to_string_pretty(&configurator.snapshot())?);
        }

        Commands::Config { ref set_source_url, ref set_assets_dir, show } => {
            if let Some(url) = set_source_url {
                config.set_source_url(url.clone())?;
                println!("✔ 取得元URLを設定しました");
            }

            if let Some(dir) = set_assets_dir {
                config.set_assets_dir(dir.clone())?;
                println!("✔ アセットフォルダを設定しました");
            }

            if show {
                println!("設定:");
                println!("  取得元: {}", config.catalog_url());
                println!("  アセット: {}/*.{}", config.assets_dir, config.asset_extension);
                println!("  既定の椅子: {}", config.default_chair);
                println!("  既定のカテゴリ: {}", config.default_category);
                println!("  キーワード: {}", config.chair_keywords.join(", "));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

async fn load_catalog(cli: &Cli, config: &Config) -> error::Result<Catalog> {
    let classifier = config.classifier()?;

    let catalog = match (&cli.csv, &cli.source) {
        (Some(path), _) => loader::load(&loader::FileSource::new(path), &classifier).await,
        (None, Some(url)) => {
            let source = loader::HttpSource::new(url, Duration::from_secs(config.timeout_seconds))?;
            loader::load(&source, &classifier).await
        }
        (None, None) => {
            let source = loader::HttpSource::new(config.catalog_url(), Duration::from_secs(config.timeout_seconds))?;
            loader::load(&source, &classifier).await
        }
    };

    if let Some(reason) = fallback_reason(&catalog) {
        println!("⚠ カタログを取得できませんでした（{}）。組み込みカタログを使用します", reason);
    }

    Ok(catalog)
}

async fn build_configurator(cli: &Cli, config: &Config) -> error::Result<Configurator> {
    let catalog = load_catalog(cli, config).await?;
    Ok(Configurator::new(catalog, config.settings()))
}

fn fallback_reason(catalog: &Catalog) -> Option<&str> {
    match catalog.origin() {
        configurator_common::CatalogOrigin::Fallback(reason) => Some(reason.as_str()),
        configurator_common::CatalogOrigin::Remote => None,
    }
}

fn print_entries(entries: &[Arc<CatalogEntry>]) {
    if entries.is_empty() {
        println!("該当する椅子がありません");
        return;
    }

    println!("🪑 {}件\n", entries.len());
    for entry in entries {
        println!("  {:<24} {:<12} {}", entry.display_name(), entry.category, entry.thumbnail_src());
    }
}

fn choose_interactive(entries: &[Arc<CatalogEntry>]) -> error::Result<Arc<CatalogEntry>> {
    if entries.is_empty() {
        return Err(error::ConfiguratorError::Interaction("選択できる椅子がありません".into()));
    }

    let items: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.display_name(), e.category))
        .collect();

    let choice = dialoguer::Select::new()
        .with_prompt("椅子を選択")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| error::ConfiguratorError::Interaction(e.to_string()))?;

    Ok(Arc::clone(&entries[choice]))
}
