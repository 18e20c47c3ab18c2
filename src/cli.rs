use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "timeline-viewer")]
#[command(about = "Trait-Theme Timeline データセットの確認ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データソース（CSVファイルのパスまたはURL）
    #[arg(short, long, global = true)]
    pub data: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// (trait, theme) の組み合わせを一覧表示
    Combos,

    /// traitの選択肢を一覧表示
    Traits,

    /// 指定traitのthemeの選択肢を一覧表示
    Themes {
        /// 対象のtrait
        #[arg(short = 't', long = "trait", required = true)]
        trait_name: String,
    },

    /// 選択に一致するレコードを日付順に表示
    Show {
        /// trait（省略時は先頭レコードの値）
        #[arg(short = 't', long = "trait")]
        trait_name: Option<String>,

        /// theme（省略時は先頭レコードの値）
        #[arg(short = 'm', long)]
        theme: Option<String>,

        /// 組み合わせ番号（`combos` の表示番号）
        #[arg(short, long, conflicts_with_all = ["trait_name", "theme"])]
        combo: Option<usize>,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のデータソースを設定
        #[arg(long)]
        set_data_path: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
