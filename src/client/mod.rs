//! S3 client
mod client;
mod executor;
mod operate_replication;
mod querymap;

pub use client::*;
pub use executor::BaseExecutor;
pub use querymap::QueryMap;
