use clap::Parser;
use timeline_common::{load_or_empty, Selection, TimelineView};
use timeline_viewer::{cli, config, error, report, source};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::{Result, TimelineError};
use source::DataSource;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// データを読み込んでビューを作る（読み込み失敗は0件として続行）
async fn open_view(config: &Config, data: Option<&str>) -> TimelineView {
    let source = DataSource::parse(&config.resolve_data_source(data));
    tracing::debug!(source = %source, "loading dataset");
    TimelineView::new(load_or_empty(source::load_records(&source).await))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Combos => {
            let view = open_view(&config, cli.data.as_deref()).await;
            println!("{}", report::format_combinations(view.combinations()));
        }

        Commands::Traits => {
            let view = open_view(&config, cli.data.as_deref()).await;
            for name in view.trait_options() {
                println!("{}", name);
            }
        }

        Commands::Themes { trait_name } => {
            let mut view = open_view(&config, cli.data.as_deref()).await;
            view.select_trait(trait_name);
            for name in view.theme_options() {
                println!("{}", name);
            }
        }

        Commands::Show { trait_name, theme, combo, format } => {
            let mut view = open_view(&config, cli.data.as_deref()).await;

            if let Some(index) = combo {
                if !view.select_combination(index) {
                    return Err(TimelineError::InvalidCombo {
                        index,
                        count: view.combinations().len(),
                    });
                }
            } else if trait_name.is_some() || theme.is_some() {
                let current = view.selection().clone();
                view.select(Selection::new(
                    trait_name.unwrap_or(current.trait_name),
                    theme.unwrap_or(current.theme),
                ));
            }

            match format {
                OutputFormat::Text => println!("{}", report::format_show(&view)),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report::ShowReport::from_view(&view))?;
                    println!("{}", json);
                }
            }
        }

        Commands::Config { set_data_path, show } => {
            let mut config = config;

            if let Some(path) = set_data_path {
                config.set_data_path(path)?;
                println!("✔ データソースを設定しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  データソース: {}", config.resolve_data_source(None));
            }
        }
    }

    Ok(())
}
