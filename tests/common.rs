#![allow(dead_code)]
use s3_replicator::config::ReplicationConfig;
use s3_replicator::provider::StaticProvider;
use s3_replicator::S3Client;

pub fn get_test_client(endpoint: &str) -> S3Client {
    dotenv::dotenv().ok();
    let provider = StaticProvider::new("test-access-key", "test-secret-key", None);

    S3Client::builder()
        .endpoint(endpoint)
        .region("us-east-1")
        .provider(provider)
        .build()
        .unwrap()
}

pub fn shop_config() -> ReplicationConfig {
    ReplicationConfig {
        source_region: "us-east-1".to_string(),
        source_bucket: "shop-primary".to_string(),
        destination_bucket: "shop-backup".to_string(),
        iam_role_arn: "arn:aws:iam::123:role/replicate".to_string(),
    }
}
