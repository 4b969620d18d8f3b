//! The replication configurator.
//!
//! Builds the single-rule replication payload for a bucket and submits
//! it with one `set_bucket_replication` call. Cross-region and
//! same-region replication share the construction; they differ only in
//! the destination bucket and the rule ID.
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ReplicationConfig;
use crate::provider::EnvProvider;
use crate::datatype::{
    DeleteMarkerReplication, Destination, ReplicationConfiguration, ReplicationRule,
    ReplicationStatus, ReplicationTime, RuleFilter,
};
use crate::error::Result;
use crate::S3Client;

/// Replication-time threshold submitted with every rule.
pub const REPLICATION_TIME_MINUTES: u32 = 15;

const CONFIG_FILE: &str = "replication.toml";
const LOG_FILE: &str = "logs/replication_logs.txt";

/// Which bucket the rule replicates to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplicationMode {
    /// replicate to the configured destination bucket in another region.
    CrossRegion,
    /// replicate within the source bucket's own region.
    SameRegion,
}

impl ReplicationMode {
    pub fn rule_id(&self) -> &'static str {
        match self {
            ReplicationMode::CrossRegion => "ECommerceCRRRule",
            ReplicationMode::SameRegion => "ECommerceSRRRule",
        }
    }

    pub fn acronym(&self) -> &'static str {
        match self {
            ReplicationMode::CrossRegion => "CRR",
            ReplicationMode::SameRegion => "SRR",
        }
    }

    fn destination_bucket<'a>(&self, config: &'a ReplicationConfig) -> &'a str {
        match self {
            ReplicationMode::CrossRegion => &config.destination_bucket,
            ReplicationMode::SameRegion => &config.source_bucket,
        }
    }

    /// Build the replication configuration this mode submits.
    pub fn configuration(&self, config: &ReplicationConfig) -> ReplicationConfiguration {
        let rule = ReplicationRule {
            id: self.rule_id().to_string(),
            status: ReplicationStatus::Enabled,
            priority: Some(1),
            prefix: Some("".to_string()),
            filter: Some(RuleFilter::default()),
            destination: Destination::new(self.destination_bucket(config)),
            delete_marker_replication: Some(DeleteMarkerReplication {
                status: ReplicationStatus::Disabled,
            }),
            replication_time: Some(ReplicationTime::enabled(REPLICATION_TIME_MINUTES)),
        };
        ReplicationConfiguration {
            role: config.iam_role_arn.clone(),
            rules: vec![rule],
        }
    }
}

/// Submits a replication configuration for the configured source bucket.
pub struct Configurator {
    client: S3Client,
    config: ReplicationConfig,
}

impl Configurator {
    pub fn new(client: S3Client, config: ReplicationConfig) -> Self {
        Self { client, config }
    }

    /// One configuration attempt. All failures propagate to the caller.
    pub async fn configure(&self, mode: ReplicationMode) -> Result<()> {
        let replication = mode.configuration(&self.config);
        self.client
            .set_bucket_replication(&self.config.source_bucket, &replication)
            .await?;
        match mode {
            ReplicationMode::CrossRegion => info!(
                "CRR setup completed from {} to {}",
                self.config.source_bucket, self.config.destination_bucket
            ),
            ReplicationMode::SameRegion => {
                info!("SRR setup completed within {}", self.config.source_bucket)
            }
        }
        Ok(())
    }

    /// One configuration attempt with the credential-error recovery the
    /// entry points rely on: a missing or partial credential failure is
    /// logged, mirrored to stdout and swallowed, so the process still
    /// ends normally. Every other failure propagates unmodified.
    pub async fn run(&self, mode: ReplicationMode) -> Result<()> {
        match self.configure(mode).await {
            Err(err) if err.is_credentials() => {
                error!("Error setting up {}: {}", mode.acronym(), err);
                println!("Error setting up {}: {}", mode.acronym(), err);
                Ok(())
            }
            other => other,
        }
    }
}

fn init_logging() -> Result<()> {
    fs::create_dir_all("logs")?;
    let file = fs::File::options().create(true).append(true).open(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// The shared scaffold of the two entry points: install the file log
/// sink, load `replication.toml`, build a client from the ambient
/// credentials and run one configuration attempt for `mode`.
///
/// Installs the process-wide tracing subscriber, so call it at most
/// once per process.
///
/// ```rust,no_run
/// use s3_replicator::{replicate, ReplicationMode};
/// # async fn example() -> s3_replicator::error::Result<()> {
/// replicate::setup(ReplicationMode::CrossRegion).await
/// # }
/// ```
pub async fn setup(mode: ReplicationMode) -> Result<()> {
    init_logging()?;
    let config = ReplicationConfig::load(Path::new(CONFIG_FILE))?;
    let client = S3Client::builder()
        .region(&config.source_region)
        .provider(EnvProvider)
        .build()?;
    Configurator::new(client, config).run(mode).await
}

#[cfg(test)]
mod tests {
    use super::{ReplicationMode, REPLICATION_TIME_MINUTES};
    use crate::config::ReplicationConfig;
    use crate::datatype::ReplicationStatus;

    fn shop_config() -> ReplicationConfig {
        ReplicationConfig {
            source_region: "us-east-1".to_string(),
            source_bucket: "shop-primary".to_string(),
            destination_bucket: "shop-backup".to_string(),
            iam_role_arn: "arn:aws:iam::123:role/replicate".to_string(),
        }
    }

    #[test]
    fn test_cross_region_configuration() {
        let config = ReplicationMode::CrossRegion.configuration(&shop_config());
        assert_eq!(config.role, "arn:aws:iam::123:role/replicate");
        assert_eq!(config.rules.len(), 1);
        let rule = &config.rules[0];
        assert_eq!(rule.id, "ECommerceCRRRule");
        assert_eq!(rule.destination.bucket, "arn:aws:s3:::shop-backup");
        assert_eq!(rule.destination.storage_class.as_deref(), Some("STANDARD"));
        assert_eq!(rule.priority, Some(1));
        assert_eq!(rule.status, ReplicationStatus::Enabled);
    }

    #[test]
    fn test_same_region_configuration() {
        let config = ReplicationMode::SameRegion.configuration(&shop_config());
        let rule = &config.rules[0];
        assert_eq!(rule.id, "ECommerceSRRRule");
        assert_eq!(rule.destination.bucket, "arn:aws:s3:::shop-primary");
    }

    #[test]
    fn test_fixed_rule_settings() {
        for mode in [ReplicationMode::CrossRegion, ReplicationMode::SameRegion] {
            let config = mode.configuration(&shop_config());
            let rule = &config.rules[0];
            let rt = rule.replication_time.as_ref().unwrap();
            assert_eq!(rt.status, ReplicationStatus::Enabled);
            assert_eq!(rt.time.minutes, REPLICATION_TIME_MINUTES);
            let dmr = rule.delete_marker_replication.as_ref().unwrap();
            assert_eq!(dmr.status, ReplicationStatus::Disabled);
            assert_eq!(rule.prefix.as_deref(), Some(""));
        }
    }
}
