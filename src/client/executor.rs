use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method};
use reqwest::Response;

use super::{QueryMap, S3Client};
use crate::datatype::FromXml;
use crate::error::{Error, Result, S3Error};
use crate::utils::md5sum_hash;

/// An executor builds the S3 request.
/// ```rust
/// use hyper::Method;
/// use reqwest::Response;
/// use s3_replicator::S3Client;
/// use s3_replicator::error::Result;
///
/// async fn get_replication(s3: S3Client) -> Result<Response> {
///     let executor = s3.executor(Method::GET);
///     let res: Response = executor
///         .bucket_name("bucket")
///         .query("replication", "")
///         .send_ok()
///         .await?;
///     Ok(res)
/// }
/// ```
pub struct BaseExecutor<'a> {
    method: Method,
    region: String,
    bucket_name: Option<String>,
    body: Bytes,
    headers: HeaderMap,
    querys: QueryMap,
    client: &'a S3Client,
    build_err: Result<()>,
}

impl<'a> BaseExecutor<'a> {
    pub fn new(method: Method, client: &'a S3Client) -> Self {
        Self {
            method,
            region: client.region().to_string(),
            bucket_name: None,
            body: Bytes::new(),
            headers: HeaderMap::new(),
            client,
            querys: QueryMap::new(),
            build_err: Ok(()),
        }
    }

    /// Set the bucket name.
    pub fn bucket_name<T: Into<String>>(mut self, name: T) -> Self {
        self.bucket_name = Some(name.into());
        self
    }

    /// Set the region.
    pub fn region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = region.into();
        self
    }

    /// Set the request body.
    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Set an xml document as body and set its md5 header.
    pub fn xml(self, xml: String) -> Self {
        let body = Bytes::from(xml);
        let md5 = md5sum_hash(&body);
        self.body(body).header("Content-MD5", md5)
    }

    /// Inserts a key-value pair into the request header.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<Error>,
    {
        let key = <HeaderName as TryFrom<K>>::try_from(key).map_err(Into::into);
        let value = <HeaderValue as TryFrom<V>>::try_from(value).map_err(Into::into);
        match (key, value) {
            (Ok(key), Ok(val)) => {
                self.headers.insert(key, val);
            }
            (Err(e), _) => self.build_err = Err(e),
            (_, Err(e)) => self.build_err = Err(e),
        };
        self
    }

    /// Inserts a key-value pair into the query map.
    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.querys.insert(key.into(), value.into());
        self
    }

    /// Send an HTTP request to S3 and return a Result<[Response]>.
    ///
    /// note: this is just a response from the s3 service, probably a wrong response.
    pub async fn send(self) -> Result<Response> {
        self.build_err?;
        let query = self.querys.to_query_string();
        self.client
            ._execute(
                self.method,
                &self.region,
                self.bucket_name,
                self.body,
                Some(self.headers),
                Some(query),
            )
            .await
    }

    /// Send an HTTP request to S3 and return a Result<[Response]>.
    ///
    /// This checks if the request is a legitimate S3 response.
    pub async fn send_ok(self) -> Result<Response> {
        let res = self.send().await?;
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let text = res.text().await?;
            match S3Error::try_from(text.as_str()) {
                Ok(s) => Err(s)?,
                Err(_) => Err(Error::UnknownResponse(status)),
            }
        }
    }

    /// Send an HTTP request to S3 and return a Result<[String]>.
    ///
    /// This checks if the request is a legitimate S3 response.
    pub async fn send_text_ok(self) -> Result<String> {
        let res = self.send_ok().await?;
        let text = res.text().await?;
        Ok(text)
    }

    /// Send an HTTP request to S3 and convert to an xml struct.
    ///
    /// This checks if the request is a legitimate S3 response.
    pub(crate) async fn send_xml_ok<T>(self) -> Result<T>
    where
        T: FromXml,
    {
        let text = self.send_text_ok().await?;
        Ok(T::from_xml(&text)?)
    }
}
