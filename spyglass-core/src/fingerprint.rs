//! Config fingerprinting — content-addressed run identification.
//!
//! Two runs with byte-identical configs share a fingerprint, so replay
//! outputs can be cached, compared, and deduplicated by ID alone.

use crate::config::StrategyConfig;

/// Deterministic hash of a strategy configuration.
pub fn config_fingerprint(config: &StrategyConfig) -> String {
    let json = serde_json::to_string(config).expect("StrategyConfig serialization failed");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}
