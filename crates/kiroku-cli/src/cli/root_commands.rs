use clap::{Args, Subcommand, ValueEnum};
use kiroku_core::MediaKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sync every pending catalog record against the media database.
    Sync(SyncArgs),
    /// Resolve one title to its media database identifier.
    Resolve(ResolveArgs),
    /// Aggregate the sequel chain of one media database entry.
    Chain(ChainArgs),
}

/// Media kind as typed on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    #[default]
    Anime,
    Manga,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Anime => Self::Series,
            KindArg::Manga => Self::Print,
        }
    }
}

/// Arguments for `kiroku sync`.
#[derive(Clone, Debug, Args)]
pub struct SyncArgs {
    /// Compute updates without writing them to the catalog.
    #[arg(long)]
    pub dry_run: bool,
    /// Pending records to pass over before starting.
    #[arg(long, default_value_t = 0)]
    pub start: usize,
    /// Maximum number of records to process.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `kiroku resolve`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    pub name: String,
    #[arg(long, value_enum, default_value_t)]
    pub kind: KindArg,
    /// Known identifier; skips the search.
    #[arg(long)]
    pub id: Option<u32>,
}

/// Arguments for `kiroku chain`.
#[derive(Clone, Debug, Args)]
pub struct ChainArgs {
    pub id: u32,
    #[arg(long, value_enum, default_value_t)]
    pub kind: KindArg,
    /// Only list immediate successors instead of walking the chain.
    #[arg(long)]
    pub shallow: bool,
}
