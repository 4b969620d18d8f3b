//! Applies the same-region replication rule to the source bucket.
//!
//! Runs exactly one configuration attempt and exits. Missing ambient
//! credentials are logged and reported on stdout without failing the
//! process; every other failure terminates it abnormally.
use s3_replicator::error::Result;
use s3_replicator::{replicate, ReplicationMode};

#[tokio::main]
async fn main() -> Result<()> {
    replicate::setup(ReplicationMode::SameRegion).await
}
