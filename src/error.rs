//! Error and Result module.
use core::fmt;
use hyper::header::{InvalidHeaderName, InvalidHeaderValue};
use serde::Deserialize;
use std::{convert::Infallible, error::Error as StdError};
use std::{fmt::Display, result};

/// A `Result` typedef to use with the `s3-replicator::error` type
pub type Result<T> = result::Result<T, Error>;

/// inducate an illegal variable was used.
#[derive(Debug)]
pub struct ValueError(String);

impl ValueError {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }
}

impl Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value error: {}", self.0)
    }
}

impl StdError for ValueError {}

impl From<&str> for ValueError {
    fn from(err: &str) -> Self {
        Self(err.to_string())
    }
}

impl From<InvalidHeaderValue> for ValueError {
    fn from(err: InvalidHeaderValue) -> Self {
        ValueError(err.to_string())
    }
}

impl From<InvalidHeaderName> for ValueError {
    fn from(err: InvalidHeaderName) -> Self {
        ValueError(err.to_string())
    }
}

impl From<Infallible> for ValueError {
    fn from(err: Infallible) -> Self {
        ValueError(err.to_string())
    }
}

/// The ambient credentials could not be resolved.
///
/// This is the only error class the configurator recovers from locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// no credentials found in the calling environment.
    Missing,
    /// credentials were found but one half of the pair is absent.
    Partial(&'static str),
}

impl Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::Missing => write!(f, "unable to locate credentials"),
            CredentialsError::Partial(var) => {
                write!(f, "partial credentials found, missing: {}", var)
            }
        }
    }
}

impl StdError for CredentialsError {}

/// XML parsing error.
#[derive(Debug)]
pub struct XmlError(String);

impl Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xmlerror: {}", self.0)
    }
}

impl StdError for XmlError {}

impl From<quick_xml::DeError> for XmlError {
    fn from(err: quick_xml::DeError) -> Self {
        Self(err.to_string())
    }
}

/// S3 service returned error response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", rename = "Error")]
pub struct S3Error {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub resource: String,
    pub request_id: String,
    pub host_id: Option<String>,
    pub bucket_name: Option<String>,
}

impl std::fmt::Display for S3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S3Error: {}", self.message)
    }
}

impl StdError for S3Error {}

impl TryFrom<&str> for S3Error {
    type Error = XmlError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Ok(quick_xml::de::from_str(value)?)
    }
}

/// The error type of this crate.
#[derive(Debug)]
pub enum Error {
    /// inducate an illegal variable was used.
    ValueError(String),

    /// indicate the ambient credentials are missing or incomplete.
    Credentials(CredentialsError),

    /// indicate configuration loading failed.
    Config(figment::Error),

    /// indicate XML parsing error.
    XmlError(XmlError),

    /// indicate S3 service returned error response.
    S3Error(S3Error),

    /// indicate S3 service returned invalid or no error response.
    HttpError(reqwest::Error),

    /// indicate the http response returned is not expected by S3.
    UnknownResponse(reqwest::StatusCode),

    /// indicate I/O error, had on an S3 operation or the log sink.
    IoError(std::io::Error),
}

impl Error {
    /// whether this error belongs to the locally recoverable credential class.
    pub fn is_credentials(&self) -> bool {
        matches!(self, Error::Credentials(_))
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Credentials(e) => Some(e),
            Error::S3Error(e) => e.source(),
            Error::HttpError(e) => Some(e),
            _ => None,
        }
    }
}

#[rustfmt::skip]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Error::ValueError(e) => write!(f, "{}", e),
            Error::Credentials(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "{}", e),
            Error::XmlError(e) => write!(f, "{}", e),
            Error::S3Error(e) => write!(f, "{}", e),
            Error::HttpError(e) => write!(f, "{}", e),
            Error::UnknownResponse(status) => write!(f, "Unexpected HTTP response, status: {}", status),
            Error::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl From<S3Error> for Error {
    fn from(err: S3Error) -> Self {
        Error::S3Error(err)
    }
}

impl<T: Into<ValueError>> From<T> for Error {
    fn from(err: T) -> Self {
        Error::ValueError(err.into().0)
    }
}

impl From<CredentialsError> for Error {
    fn from(err: CredentialsError) -> Self {
        Error::Credentials(err)
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err)
    }
}

impl From<XmlError> for Error {
    fn from(err: XmlError) -> Self {
        Error::XmlError(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::ValueError(err.to_string());
        }
        Self::HttpError(err)
    }
}
