use anyhow::Context;

/// Load `.env` (current directory or nearest parent) and the layered config.
pub fn load_config() -> anyhow::Result<kiroku_config::KirokuConfig> {
    kiroku_config::KirokuConfig::load_with_dotenv().context("failed to load kiroku configuration")
}
