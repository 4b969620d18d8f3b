#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]

pub mod client;
pub mod config;
mod credentials;
pub mod datatype;
pub mod error;
pub mod provider;
pub mod replicate;
mod signer;
pub mod time;
mod utils;

pub use crate::client::S3Client;
pub use crate::credentials::Credentials;
pub use crate::replicate::{Configurator, ReplicationMode};
pub use crate::signer::sign_request_v4;
