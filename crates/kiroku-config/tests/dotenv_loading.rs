//! `.env` handling of `KirokuConfig::load_with_dotenv`.
//!
//! Kept apart from `toml_loading.rs`: dotenvy writes straight into the
//! process environment, so values loaded here must not reach those tests.

use figment::Jail;
use kiroku_config::{ConfigError, KirokuConfig};
use pretty_assertions::assert_eq;

#[test]
fn dotenv_values_flow_through_figment() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "KIROKU_JIKAN__TIMEOUT_SECS=7\n")?;

        let config = KirokuConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.jikan.timeout_secs, 7);
        Ok(())
    });
}

#[test]
fn malformed_dotenv_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "NOT A VALID LINE\n")?;

        let err = KirokuConfig::load_with_dotenv().unwrap_err();
        assert!(matches!(err, ConfigError::Dotenv(_)));
        Ok(())
    });
}
