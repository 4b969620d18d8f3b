//! Replication configuration loading.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Prefix of the environment variables the loader reads, like
/// `S3REPL_SOURCE_BUCKET`. The TOML file wins on conflicts.
const ENV_PREFIX: &str = "S3REPL_";

/// The externally supplied replication record.
///
/// Immutable once loaded, passed explicitly to the configurator. The
/// fields are taken at face value; validity of the identifiers is the
/// caller's responsibility.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReplicationConfig {
    pub source_region: String,
    pub source_bucket: String,
    pub destination_bucket: String,
    pub iam_role_arn: String,
}

impl ReplicationConfig {
    /// Load the configuration from `S3REPL_*` environment variables
    /// merged with an optional TOML file (the file wins on conflicts;
    /// a missing file contributes nothing).
    pub fn load(file: &Path) -> Result<Self> {
        let figment = Figment::new()
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Toml::file(file));
        Ok(figment.extract()?)
    }
}
