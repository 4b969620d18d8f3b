use hyper::Method;

use crate::datatype::ReplicationConfiguration;
use crate::error::Result;
use crate::S3Client;

/// Operating the replication configuration of a bucket
impl S3Client {
    /// Check if a bucket exists.
    /// If bucket exists and you have permission to access it, return [Ok(true)], otherwise [Ok(false)]
    /// ## Example
    /// ```rust
    /// # use s3_replicator::S3Client;
    /// # use s3_replicator::error::Result;
    /// # async fn example(s3: S3Client) -> Result<()> {
    /// let exists: bool = s3.bucket_exists("bucket").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        self.executor(Method::HEAD)
            .bucket_name(bucket)
            .send()
            .await
            .map(|res| res.status().is_success())
    }

    /// Get [ReplicationConfiguration] of a bucket.
    /// ## Example
    /// ```rust
    /// # use s3_replicator::{S3Client, error::Result};
    /// # async fn example(s3: S3Client) -> Result<()> {
    /// let config = s3.get_bucket_replication("bucket").await?;
    /// # Ok(())}
    /// ```
    pub async fn get_bucket_replication(&self, bucket: &str) -> Result<ReplicationConfiguration> {
        self.executor(Method::GET)
            .bucket_name(bucket)
            .query("replication", "")
            .send_xml_ok()
            .await
    }

    /// Set [ReplicationConfiguration] of a bucket.
    ///
    /// This is a full replace at the provider: the submitted rule set
    /// overwrites any existing replication rules of the bucket.
    pub async fn set_bucket_replication(
        &self,
        bucket: &str,
        config: &ReplicationConfiguration,
    ) -> Result<()> {
        self.executor(Method::PUT)
            .bucket_name(bucket)
            .query("replication", "")
            .xml(config.to_xml())
            .send_ok()
            .await
            .map(|_| ())
    }

    /// Delete the replication configuration of a bucket.
    pub async fn del_bucket_replication(&self, bucket: &str) -> Result<()> {
        self.executor(Method::DELETE)
            .bucket_name(bucket)
            .query("replication", "")
            .send_ok()
            .await
            .map(|_| ())
    }
}
