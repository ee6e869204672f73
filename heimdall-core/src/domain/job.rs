//! Job domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single entry of the `/jobs` response
///
/// The stores never look inside a summary; they keep the server's JSON as-is
/// and hand it to whoever renders it. Use [`JobSummary::as_flink_job`] for a
/// typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobSummary(serde_json::Value);

impl JobSummary {
    /// Wraps a raw JSON value
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrows the raw JSON value
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Interprets the summary as a Flink job record
    ///
    /// Returns `None` if the value is not an object or a known field has an
    /// unexpected type.
    pub fn as_flink_job(&self) -> Option<FlinkJob> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

impl From<serde_json::Value> for JobSummary {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Typed view of a Flink job as reported by the monitoring API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlinkJob {
    pub id: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    /// Epoch milliseconds
    pub start_time: Option<i64>,
    pub short_image: Option<String>,
    pub flink_version: Option<String>,
    pub parallelism: Option<u32>,
    #[serde(default)]
    pub resources: BTreeMap<String, FlinkJobResources>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Resources requested by one Flink component (job manager, task manager)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlinkJobResources {
    pub replicas: Option<u32>,
    pub cpu: Option<String>,
    pub mem: Option<String>,
}

/// Describes why a fetch failed
///
/// Network failures, non-2xx responses and undecodable bodies all collapse
/// into this one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    /// Builds a failure descriptor from any displayable error
    pub fn from_error(error: &impl fmt::Display) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The latest published state of the job list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub items: Vec<JobSummary>,
    pub error: Option<FetchFailure>,
    pub loaded: bool,
}

impl JobSnapshot {
    /// Snapshot after a successful fetch
    pub fn loaded(items: Vec<JobSummary>) -> Self {
        Self {
            items,
            error: None,
            loaded: true,
        }
    }

    /// Snapshot after a failed fetch that is shown to the user
    pub fn failed(items: Vec<JobSummary>, failure: FetchFailure) -> Self {
        Self {
            items,
            error: Some(failure),
            loaded: true,
        }
    }
}
