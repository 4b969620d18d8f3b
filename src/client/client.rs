use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result, ValueError};
use crate::provider::Provider;
use crate::signer::sign_request_v4;
use crate::utils::{check_bucket_name, _VALID_ENDPOINT};
use crate::Credentials;
use bytes::Bytes;
use hyper::{header, header::HeaderValue, HeaderMap};
use hyper::{Method, Uri};
use reqwest::Response;

/// A `S3ClientBuilder` can be used to create a [`S3Client`] with custom configuration.
pub struct S3ClientBuilder {
    endpoint: Option<String>,
    region: String,
    agent: String,
    secure: bool,
    virtual_hosted: bool,
    provider: Option<Box<dyn Provider>>,
    client: Option<reqwest::Client>,
}

impl S3ClientBuilder {
    pub fn new() -> Self {
        S3ClientBuilder {
            endpoint: None,
            secure: true,
            virtual_hosted: false,
            region: "us-east-1".to_string(),
            agent: "S3Replicator (Linux; x86_64) s3-replicator".to_string(),
            provider: None,
            client: None,
        }
    }

    /// Set the hostname of the S3 service, `hostname[:port]`.
    ///
    /// A `http://` or `https://` prefix is accepted and also sets
    /// the secure flag.
    ///
    /// Default: `s3.{region}.amazonaws.com`.
    pub fn endpoint<T: Into<String>>(mut self, endpoint: T) -> Self {
        let endpoint: String = endpoint.into();
        if let Some(host) = endpoint.strip_prefix("http://") {
            self.secure = false;
            self.endpoint = Some(host.into());
        } else if let Some(host) = endpoint.strip_prefix("https://") {
            self.secure = true;
            self.endpoint = Some(host.into());
        } else {
            self.endpoint = Some(endpoint);
        }
        self
    }

    /// Set region name of buckets in S3 service.
    ///
    /// Default: `us-east-1`
    pub fn region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = region.into();
        self
    }

    /// Set agent header for the client.
    pub fn agent<T: Into<String>>(mut self, agent: T) -> Self {
        self.agent = agent.into();
        self
    }

    /// Set flag to indicate to use secure (TLS) connection to S3 service or not.
    ///
    /// Default: `true`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set custom http [reqwest::Client].
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set flag to indicate to use Virtual-hosted–style or not.
    ///
    /// In a virtual-hosted–style URI, the bucket name is part of the
    /// domain name in the URL, like `https://bucket-name.s3.region-code.amazonaws.com`
    ///
    /// Default: `false`.
    ///
    /// **Note**: If the endpoint is an IP address, setting Virtual-hosted–style true will cause an error.
    pub fn virtual_hosted_style(mut self, virtual_hosted_style: bool) -> Self {
        self.virtual_hosted = virtual_hosted_style;
        self
    }

    /// Set credentials provider of your account in S3 service.
    ///
    /// **Required**.
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: Provider + 'static,
    {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> std::result::Result<S3Client, ValueError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| format!("s3.{}.amazonaws.com", self.region));
        if !_VALID_ENDPOINT.is_match(&endpoint) {
            return Err("Invalid endpoint".into());
        }
        let provider = self.provider.ok_or("Miss provider")?;

        let agent: HeaderValue = self
            .agent
            .parse()
            .map_err(|_| ValueError::from("Invalid agent"))?;

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut headers = header::HeaderMap::new();
                headers.insert(header::USER_AGENT, agent.clone());
                reqwest::Client::builder()
                    .default_headers(headers)
                    .https_only(self.secure)
                    .build()
                    .map_err(|e| ValueError::new(e.to_string()))?
            }
        };
        Ok(S3Client {
            inner: Arc::new(S3ClientRef {
                endpoint,
                secure: self.secure,
                client,
                virtual_hosted: self.virtual_hosted,
                region: self.region,
                agent,
                provider,
            }),
        })
    }
}

impl Default for S3ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple Storage Service (aka S3) client to perform bucket replication operations.
///
/// You do **not** have to wrap the `S3Client` in an [`Rc`] or [`Arc`] to **reuse** it,
/// because it already uses an [`Arc`] internally.
///
/// ## Create S3Client
/// ```rust
/// use s3_replicator::{provider::StaticProvider, S3Client};
/// let provider = StaticProvider::new("s3-access-key-test", "s3-secret-key-test", None);
/// let s3 = S3Client::builder()
///     .region("us-east-1")
///     .provider(provider)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct S3Client {
    inner: Arc<S3ClientRef>,
}

struct S3ClientRef {
    endpoint: String,
    virtual_hosted: bool,
    secure: bool,
    client: reqwest::Client,
    region: String,
    agent: HeaderValue,
    provider: Box<dyn Provider>,
}

impl S3Client {
    /// get a [`S3ClientBuilder`]
    pub fn builder() -> S3ClientBuilder {
        S3ClientBuilder::new()
    }

    pub fn region(&self) -> &str {
        self.inner.region.as_ref()
    }

    #[inline]
    pub(super) async fn fetch_credentials(&self) -> Result<Credentials> {
        Ok(self.inner.provider.fetch().await?)
    }

    /// Execute HTTP request.
    async fn _url_open(
        &self,
        method: Method,
        uri: String,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response> {
        let response = self
            .inner
            .client
            .request(method, uri)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        Ok(response)
    }

    #[inline]
    pub(super) fn scheme(&self) -> &str {
        if self.inner.secure {
            "https"
        } else {
            "http"
        }
    }

    /// build uri for a bucket
    pub(super) fn _build_uri(&self, bucket: Option<String>) -> String {
        let scheme = self.scheme();
        let endpoint = self.inner.endpoint.as_str();
        match bucket {
            Some(b) => {
                if self.inner.virtual_hosted {
                    format!("{scheme}://{b}.{endpoint}")
                } else {
                    format!("{scheme}://{endpoint}/{b}")
                }
            }
            None => format!("{scheme}://{endpoint}"),
        }
    }

    pub async fn _execute(
        &self,
        method: Method,
        region: &str,
        bucket_name: Option<String>,
        body: Bytes,
        headers: Option<HeaderMap>,
        query_params: Option<String>,
    ) -> Result<Response> {
        // check bucket_name
        if let Some(bucket_name) = &bucket_name {
            check_bucket_name(bucket_name)?;
        }
        // build uri
        let uri = self._build_uri(bucket_name);

        // add query to uri
        let uri = if let Some(query) = query_params {
            format!("{}?{}", uri, query)
        } else {
            uri
        };
        let mut headers = headers.unwrap_or_default();
        headers.insert(header::USER_AGENT, self.inner.agent.clone());
        let credentials = self.fetch_credentials().await?;
        let uri = Uri::from_str(&uri).map_err(|e| Error::ValueError(e.to_string()))?;
        sign_request_v4(&method, &uri, &mut headers, region, &body, &credentials)?;
        self._url_open(method, uri.to_string(), headers, body).await
    }

    #[inline]
    pub fn executor(&self, method: Method) -> super::BaseExecutor {
        super::BaseExecutor::new(method, self)
    }
}
