use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chair-configurator")]
#[command(about = "チェアカタログの取得・絞り込み・選択ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ローカルCSVからカタログを読み込む
    #[arg(long, global = true, conflicts_with = "source")]
    pub csv: Option<PathBuf>,

    /// カタログ取得元URL（設定より優先）
    #[arg(long, global = true)]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 表示対象の椅子を一覧表示
    List {
        /// カテゴリで絞り込み（完全一致）
        #[arg(short, long)]
        category: Option<String>,

        /// 名前で検索（部分一致、カテゴリより優先）
        #[arg(short, long)]
        search: Option<String>,

        /// 絞り込みなしで全件表示
        #[arg(short, long)]
        all: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// カテゴリ一覧と件数
    Categories,

    /// 椅子を選択してアセットパスを表示
    Select {
        /// 椅子の名前（省略時は対話的に選択）
        name: Option<String>,

        /// モデルファイルの存在を確認
        #[arg(long)]
        verify: bool,

        /// アセットの基準フォルダ
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// アセットフォルダとカタログの突き合わせ
    Assets {
        /// アセットの基準フォルダ
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 状態ダンプ（JSON）
    Status,

    /// 設定を表示/編集
    Config {
        /// カタログ取得元URLを設定
        #[arg(long)]
        set_source_url: Option<String>,

        /// アセットフォルダを設定
        #[arg(long)]
        set_assets_dir: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
