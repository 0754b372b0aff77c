use kiroku_config::KirokuConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &KirokuConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Sync(args) => commands::sync::handle(&args, config, flags).await,
        Commands::Resolve(args) => commands::resolve::handle(&args, config, flags).await,
        Commands::Chain(args) => commands::chain::handle(&args, config, flags).await,
    }
}
