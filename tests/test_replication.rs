mod common;

use std::sync::{Arc, Mutex};

use common::{get_test_client, shop_config};
use s3_replicator::error::{CredentialsError, Error};
use s3_replicator::provider::{CredentialFuture, Provider};
use s3_replicator::{Configurator, ReplicationMode, S3Client};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crr_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/shop-primary"))
        .and(query_param("replication", ""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let configurator = Configurator::new(get_test_client(&server.uri()), shop_config());
    configurator
        .configure(ReplicationMode::CrossRegion)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let auth = request.headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=test-access-key/"));
    assert!(request.headers.get("x-amz-content-sha256").is_some());
    assert!(request.headers.get("content-md5").is_some());

    let body = String::from_utf8(request.body.clone()).unwrap();
    assert!(body.contains("<Role>arn:aws:iam::123:role/replicate</Role>"));
    assert!(body.contains("<ID>ECommerceCRRRule</ID>"));
    assert!(body.contains("<Bucket>arn:aws:s3:::shop-backup</Bucket>"));
    assert!(body.contains("<StorageClass>STANDARD</StorageClass>"));
    assert!(body.contains("<Priority>1</Priority>"));
    assert!(body.contains("<Status>Enabled</Status>"));
    assert!(body
        .contains("<DeleteMarkerReplication><Status>Disabled</Status></DeleteMarkerReplication>"));
    assert!(body.contains("<Time><Minutes>15</Minutes></Time>"));
}

#[tokio::test]
async fn test_srr_payload_targets_source_bucket() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/shop-primary"))
        .and(query_param("replication", ""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let configurator = Configurator::new(get_test_client(&server.uri()), shop_config());
    configurator
        .run(ReplicationMode::SameRegion)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(body.contains("<ID>ECommerceSRRRule</ID>"));
    assert!(body.contains("<Bucket>arn:aws:s3:::shop-primary</Bucket>"));
    assert!(!body.contains("shop-backup"));
}

struct NoCredentials;

impl Provider for NoCredentials {
    fn fetch(&self) -> CredentialFuture {
        Box::pin(async { Err(CredentialsError::Missing) })
    }
}

fn client_without_credentials(endpoint: &str) -> S3Client {
    S3Client::builder()
        .endpoint(endpoint)
        .region("us-east-1")
        .provider(NoCredentials)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_missing_credentials_end_normally() {
    // no mock mounted: nothing may reach the server
    let server = MockServer::start().await;
    let configurator = Configurator::new(client_without_credentials(&server.uri()), shop_config());

    configurator
        .run(ReplicationMode::CrossRegion)
        .await
        .unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
}

/// In-memory log sink the capturing subscriber writes to.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl LogSink {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_missing_credentials_log_one_error() {
    let server = MockServer::start().await;
    let sink = LogSink::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer({
            let sink = sink.clone();
            move || sink.clone()
        })
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let configurator = Configurator::new(client_without_credentials(&server.uri()), shop_config());
    configurator
        .run(ReplicationMode::CrossRegion)
        .await
        .unwrap();

    let log = sink.contents();
    assert_eq!(log.matches("ERROR").count(), 1);
    assert!(log.contains("Error setting up CRR: unable to locate credentials"));
}

#[tokio::test]
async fn test_missing_credentials_propagate_from_configure() {
    let server = MockServer::start().await;
    let configurator = Configurator::new(client_without_credentials(&server.uri()), shop_config());

    let err = configurator
        .configure(ReplicationMode::CrossRegion)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Credentials(CredentialsError::Missing)
    ));
}

#[tokio::test]
async fn test_s3_error_propagates() {
    let server = MockServer::start().await;
    let error_body = r#"<?xml version="1.0" encoding="UTF-8"?>
    <Error>
        <Code>NoSuchBucket</Code>
        <Message>The specified bucket does not exist</Message>
        <Resource>/shop-primary</Resource>
        <RequestId>4442587FB7D0A2F9</RequestId>
    </Error>"#;
    Mock::given(method("PUT"))
        .and(path("/shop-primary"))
        .respond_with(ResponseTemplate::new(404).set_body_string(error_body))
        .mount(&server)
        .await;

    let configurator = Configurator::new(get_test_client(&server.uri()), shop_config());
    let err = configurator
        .run(ReplicationMode::CrossRegion)
        .await
        .unwrap_err();
    match err {
        Error::S3Error(e) => assert_eq!(e.code, "NoSuchBucket"),
        other => panic!("expected S3Error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let configurator = Configurator::new(get_test_client(&server.uri()), shop_config());
    let err = configurator
        .configure(ReplicationMode::SameRegion)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownResponse(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_invalid_bucket_name_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = get_test_client(&server.uri());
    let mut config = shop_config();
    config.source_bucket = "Bad..Name".to_string();

    let err = Configurator::new(client, config)
        .configure(ReplicationMode::CrossRegion)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ValueError(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_bucket_replication() {
    let server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
    <ReplicationConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
        <Role>arn:aws:iam::123:role/replicate</Role>
        <Rule>
            <ID>ECommerceCRRRule</ID>
            <Status>Enabled</Status>
            <Priority>1</Priority>
            <Destination>
                <Bucket>arn:aws:s3:::shop-backup</Bucket>
                <StorageClass>STANDARD</StorageClass>
            </Destination>
        </Rule>
    </ReplicationConfiguration>"#;
    Mock::given(method("GET"))
        .and(path("/shop-primary"))
        .and(query_param("replication", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = get_test_client(&server.uri());
    let config = client.get_bucket_replication("shop-primary").await.unwrap();
    assert_eq!(config.role, "arn:aws:iam::123:role/replicate");
    assert_eq!(config.rules[0].destination.bucket, "arn:aws:s3:::shop-backup");
}

#[tokio::test]
async fn test_del_bucket_replication() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/shop-primary"))
        .and(query_param("replication", ""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = get_test_client(&server.uri());
    client.del_bucket_replication("shop-primary").await.unwrap();
}

#[tokio::test]
async fn test_bucket_exists() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/shop-primary"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = get_test_client(&server.uri());
    assert!(client.bucket_exists("shop-primary").await.unwrap());
    assert!(!client.bucket_exists("shop-missing").await.unwrap());
}
