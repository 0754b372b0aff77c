use kiroku_config::KirokuConfig;

/// Log a hint for sections that look unset while matching env vars exist,
/// which usually means a single underscore was used as the separator.
pub fn warn_unconfigured(config: &KirokuConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &KirokuConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.notion.is_configured() && has_env_prefix(&env_keys, "KIROKU_NOTION") {
        warnings.push(
            "Notion config appears default while KIROKU_NOTION* env vars exist. Use double underscores (example: KIROKU_NOTION__TOKEN)."
                .to_string(),
        );
    }

    if !config.search.is_configured() && has_env_prefix(&env_keys, "KIROKU_SEARCH") {
        warnings.push(
            "Search config appears default while KIROKU_SEARCH* env vars exist. Use double underscores (example: KIROKU_SEARCH__API_KEY)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
