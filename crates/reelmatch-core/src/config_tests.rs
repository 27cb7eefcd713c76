//! Tests for `config` module
//!
//! Tests touching `REELMATCH_*` variables run serially since the process
//! environment is shared.

use std::io::Write;

use serial_test::serial;

use super::config::*;
use super::error::Error;
use super::index::{BackendKind, NeighborStrategy};
use super::text::StopWords;

struct EnvGuard(&'static str);

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        std::env::set_var(key, value);
        Self(key)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        std::env::remove_var(self.0);
    }
}

#[test]
fn test_defaults() {
    let config = ReelmatchConfig::default();
    assert_eq!(config.recommend.default_k, 10);
    assert_eq!(config.recommend.default_backend, BackendKind::Cosine);
    assert_eq!(config.features.stop_words, StopWords::English);
    assert_eq!(config.features.min_df, 1);
    assert_eq!(config.features.max_features, None);
    assert_eq!(config.index.neighbor_strategy, NeighborStrategy::Exact);
    assert_eq!(config.index.max_connections, 16);
    assert_eq!(config.bench.runs, 10);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_partial_override() {
    let config = ReelmatchConfig::from_toml_str(
        r#"
        [recommend]
        default_k = 5
        default_backend = "nearest_neighbor"

        [index]
        neighbor_strategy = "hnsw"
        ef_search = 32
        "#,
    )
    .expect("valid toml");
    assert_eq!(config.recommend.default_k, 5);
    assert_eq!(config.recommend.default_backend, BackendKind::NearestNeighbor);
    assert_eq!(config.index.neighbor_strategy, NeighborStrategy::Hnsw);
    assert_eq!(config.index.ef_search, 32);
    // Untouched keys keep their defaults.
    assert_eq!(config.index.max_connections, 16);
    assert_eq!(config.bench.runs, 10);
}

#[test]
fn test_validation_rejects_bad_values() {
    for toml in [
        "[recommend]\ndefault_k = 0",
        "[bench]\nruns = 0",
        "[features]\nmax_df = 0.0",
        "[features]\nmax_df = 1.5",
        "[features]\nmax_features = 0",
        "[index]\nmax_connections = 1",
        "[index]\nef_search = 0",
    ] {
        let err = ReelmatchConfig::from_toml_str(toml).expect_err(toml);
        assert!(matches!(err, Error::Config(_)), "{toml}: {err:?}");
    }
}

#[test]
fn test_unknown_backend_is_config_error() {
    let err = ReelmatchConfig::from_toml_str("[recommend]\ndefault_backend = \"annoy\"")
        .expect_err("unknown variant");
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_toml_round_trip() {
    let mut config = ReelmatchConfig::default();
    config.features.max_features = Some(500);
    config.index.neighbor_strategy = NeighborStrategy::Hnsw;
    let text = config.to_toml_string().expect("serializable");
    assert_eq!(ReelmatchConfig::from_toml_str(&text).expect("parses"), config);
}

#[test]
#[serial(env)]
fn test_load_without_file_uses_defaults() {
    let config = ReelmatchConfig::load(None).expect("defaults");
    assert_eq!(config, ReelmatchConfig::default());
}

#[test]
#[serial(env)]
fn test_load_missing_file_is_error() {
    let err = ReelmatchConfig::load(Some(std::path::Path::new("/nonexistent/reelmatch.toml")))
        .expect_err("missing file");
    assert!(matches!(err, Error::Config(msg) if msg.contains("not found")));
}

#[test]
#[serial(env)]
fn test_load_file_then_env_override() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[recommend]\ndefault_k = 7\n\n[bench]\nruns = 3").expect("write");

    let config = ReelmatchConfig::load(Some(file.path())).expect("valid file");
    assert_eq!(config.recommend.default_k, 7);
    assert_eq!(config.bench.runs, 3);

    let _k = EnvGuard::set("REELMATCH_RECOMMEND__DEFAULT_K", "4");
    let _level = EnvGuard::set("REELMATCH_LOGGING__LEVEL", "debug");
    let config = ReelmatchConfig::load(Some(file.path())).expect("valid file");
    assert_eq!(config.recommend.default_k, 4);
    assert_eq!(config.bench.runs, 3);
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial(env)]
fn test_env_invalid_value_is_rejected() {
    let _runs = EnvGuard::set("REELMATCH_BENCH__RUNS", "0");
    assert!(ReelmatchConfig::load(None).is_err());
}
