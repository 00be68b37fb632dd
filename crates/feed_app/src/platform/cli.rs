use std::path::PathBuf;

use clap::Parser;

use super::config::OverlapSetting;
use super::logging::LogDestination;

/// Scroll a remote catalog; more items load as you reach the end of the feed.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "catalog-feed", version)]
pub struct Args {
    /// Open the detail view of one catalog key.
    #[arg(long, conflicts_with = "last")]
    pub key: Option<String>,

    /// Open the detail view of the last selected key.
    #[arg(long)]
    pub last: bool,

    /// Config file (RON). Defaults to ./feed.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog API root.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Items rendered per batch.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// What to do when the sentinel shows up while a batch is still loading.
    #[arg(long, value_enum)]
    pub overlap: Option<OverlapSetting>,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Directory holding the persisted selection.
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}
