//! Credential provider
use std::{env, future::Future, pin::Pin};

use crate::error::CredentialsError;
use crate::Credentials;

pub type CredentialFuture =
    Pin<Box<dyn Future<Output = Result<Credentials, CredentialsError>> + Send>>;

/// define Credential retriever.
///
/// Fetching is fallible: a provider reports whether the ambient
/// credentials are absent or only half present.
pub trait Provider: Send + Sync {
    fn fetch(&self) -> CredentialFuture;
}

#[derive(Debug, Clone)]
pub struct StaticProvider(Credentials);

impl StaticProvider {
    pub fn new<T: Into<String>>(ak: T, sk: T, st: Option<String>) -> Self {
        Self(Credentials::new(ak, sk, st))
    }
}

impl Provider for StaticProvider {
    fn fetch(&self) -> CredentialFuture {
        let cred = self.0.clone();
        Box::pin(async move { Ok(cred) })
    }
}

/// load Credentials from AWS environment variables.
/// - `AWS_ACCESS_KEY_ID` or `AWS_ACCESS_KEY`
/// - `AWS_SECRET_ACCESS_KEY` or `AWS_SECRET_KEY`
/// - `AWS_SESSION_TOKEN`
#[derive(Debug, Clone, Default)]
pub struct EnvProvider;

impl EnvProvider {
    fn read() -> Result<Credentials, CredentialsError> {
        let ak = env::var("AWS_ACCESS_KEY_ID").or_else(|_| env::var("AWS_ACCESS_KEY"));
        let sk = env::var("AWS_SECRET_ACCESS_KEY").or_else(|_| env::var("AWS_SECRET_KEY"));
        let st = env::var("AWS_SESSION_TOKEN").ok();
        match (ak, sk) {
            (Ok(ak), Ok(sk)) => Ok(Credentials::new(ak, sk, st)),
            (Err(_), Err(_)) => Err(CredentialsError::Missing),
            (Ok(_), Err(_)) => Err(CredentialsError::Partial("AWS_SECRET_ACCESS_KEY")),
            (Err(_), Ok(_)) => Err(CredentialsError::Partial("AWS_ACCESS_KEY_ID")),
        }
    }
}

impl Provider for EnvProvider {
    fn fetch(&self) -> CredentialFuture {
        Box::pin(async { Self::read() })
    }
}
