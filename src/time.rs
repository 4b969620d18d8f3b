//! Time formatter for S3 APIs.
use chrono::{DateTime, Utc};

/// wrap of `chrono::Utc`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UtcTime(DateTime<Utc>);

impl UtcTime {
    #[inline]
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns current utc time
    #[inline]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// format date to ISO8601, like`20230910T082643Z`
    ///
    /// Used in S3 signatures.
    #[inline]
    pub fn aws_format_time(&self) -> String {
        self.0.format("%Y%m%dT%H%M%SZ").to_string()
    }

    /// format date to aws date.
    ///
    /// Used in S3 signatures
    #[inline]
    pub fn aws_format_date(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl From<DateTime<Utc>> for UtcTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl Default for UtcTime {
    /// default: current utc time.
    fn default() -> Self {
        Self::now()
    }
}
