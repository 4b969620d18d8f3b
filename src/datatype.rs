//! Data types of the bucket replication API.
use serde::Deserialize;

use crate::error::XmlError;

/// Parse a struct from a response XML document.
pub trait FromXml: Sized {
    fn from_xml(xml: &str) -> Result<Self, XmlError>;
}

/// Build `arn:aws:s3:::{bucket}` from a bucket name.
#[inline]
pub fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{}", bucket)
}

/// Valid Values: Enabled | Disabled
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum ReplicationStatus {
    Enabled,
    Disabled,
}

impl ReplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicationStatus::Enabled => "Enabled",
            ReplicationStatus::Disabled => "Disabled",
        }
    }
}

/// Where replicated objects land.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    /// ARN of the destination bucket, like `arn:aws:s3:::shop-backup`.
    pub bucket: String,
    /// Valid Values: STANDARD | STANDARD_IA | ...
    pub storage_class: Option<String>,
}

impl Destination {
    /// destination of given bucket name, stored as `STANDARD`.
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket_arn(bucket),
            storage_class: Some("STANDARD".to_string()),
        }
    }
}

/// Whether delete markers replicate along with objects.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMarkerReplication {
    pub status: ReplicationStatus,
}

/// Container of the replication-time threshold.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicationTimeValue {
    pub minutes: u32,
}

/// S3 Replication Time Control setting of a rule.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicationTime {
    pub status: ReplicationStatus,
    pub time: ReplicationTimeValue,
}

impl ReplicationTime {
    pub fn enabled(minutes: u32) -> Self {
        Self {
            status: ReplicationStatus::Enabled,
            time: ReplicationTimeValue { minutes },
        }
    }
}

/// Which objects a rule applies to. Left empty: the rule covers the
/// whole bucket, the legacy rule-level `Prefix` carries the filter.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RuleFilter {
    pub prefix: Option<String>,
}

/// One declarative replication policy of a bucket.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicationRule {
    #[serde(rename = "ID")]
    pub id: String,
    pub status: ReplicationStatus,
    pub priority: Option<u32>,
    pub prefix: Option<String>,
    pub filter: Option<RuleFilter>,
    pub destination: Destination,
    pub delete_marker_replication: Option<DeleteMarkerReplication>,
    pub replication_time: Option<ReplicationTime>,
}

impl ReplicationRule {
    fn to_xml(&self) -> String {
        let mut result = "<Rule>".to_string();
        result += &format!("<ID>{}</ID>", self.id);
        result += &format!("<Status>{}</Status>", self.status.as_str());
        if let Some(priority) = self.priority {
            result += &format!("<Priority>{}</Priority>", priority);
        }
        if let Some(prefix) = &self.prefix {
            result += &format!("<Prefix>{}</Prefix>", prefix);
        }
        if let Some(filter) = &self.filter {
            result += "<Filter>";
            if let Some(prefix) = &filter.prefix {
                result += &format!("<Prefix>{}</Prefix>", prefix);
            }
            result += "</Filter>";
        }
        result += "<Destination>";
        result += &format!("<Bucket>{}</Bucket>", self.destination.bucket);
        if let Some(storage_class) = &self.destination.storage_class {
            result += &format!("<StorageClass>{}</StorageClass>", storage_class);
        }
        result += "</Destination>";
        if let Some(dmr) = &self.delete_marker_replication {
            result += &format!(
                "<DeleteMarkerReplication><Status>{}</Status></DeleteMarkerReplication>",
                dmr.status.as_str()
            );
        }
        if let Some(rt) = &self.replication_time {
            result += &format!(
                "<ReplicationTime><Status>{}</Status><Time><Minutes>{}</Minutes></Time></ReplicationTime>",
                rt.status.as_str(),
                rt.time.minutes
            );
        }
        result += "</Rule>";
        result
    }
}

/// Object representation of the request XML of `set_bucket_replication`
/// API and the response XML of `get_bucket_replication` API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicationConfiguration {
    /// ARN of the IAM role S3 assumes when replicating on the owner's behalf.
    pub role: String,
    #[serde(rename = "Rule", default)]
    pub rules: Vec<ReplicationRule>,
}

impl ReplicationConfiguration {
    pub fn to_xml(&self) -> String {
        let mut result =
            "<ReplicationConfiguration xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">"
                .to_string();
        result += &format!("<Role>{}</Role>", self.role);
        for rule in &self.rules {
            result += &rule.to_xml();
        }
        result += "</ReplicationConfiguration>";
        result
    }
}

impl FromXml for ReplicationConfiguration {
    fn from_xml(xml: &str) -> Result<Self, XmlError> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

impl TryFrom<&str> for ReplicationConfiguration {
    type Error = XmlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_xml(value)
    }
}
