//! File report projection
//!
//! Only the fields the report view consumes are deserialized; everything else
//! in the payload is ignored. Missing optional blocks default to zero/blank.

use super::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Engine verdict categories counted in `last_analysis_stats`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
pub enum StatCategory {
    Malicious,
    #[strum(to_string = "Confirmed Timeout")]
    ConfirmedTimeout,
    Timeout,
    Failure,
    Harmless,
    Suspicious,
    #[strum(to_string = "Type unsupported")]
    TypeUnsupported,
    Undetected,
}

/// Per-category engine counts
///
/// The API spells two keys with hyphens; both spellings are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisStats {
    pub malicious: u32,
    pub suspicious: u32,
    pub undetected: u32,
    pub harmless: u32,
    pub timeout: u32,
    #[serde(alias = "confirmed-timeout")]
    pub confirmed_timeout: u32,
    pub failure: u32,
    #[serde(alias = "type-unsupported")]
    pub type_unsupported: u32,
}

impl AnalysisStats {
    pub fn get(&self, category: StatCategory) -> u32 {
        match category {
            StatCategory::Malicious => self.malicious,
            StatCategory::ConfirmedTimeout => self.confirmed_timeout,
            StatCategory::Timeout => self.timeout,
            StatCategory::Failure => self.failure,
            StatCategory::Harmless => self.harmless,
            StatCategory::Suspicious => self.suspicious,
            StatCategory::TypeUnsupported => self.type_unsupported,
            StatCategory::Undetected => self.undetected,
        }
    }

    /// Counts in display order
    pub fn iter(&self) -> impl Iterator<Item = (StatCategory, u32)> + '_ {
        StatCategory::iter().map(move |category| (category, self.get(category)))
    }

    /// Sum of all categories, in `u64` since each count is a full `u32`
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| u64::from(count)).sum()
    }

    /// Engines that reported the file as malicious or suspicious
    pub fn flagged(&self) -> u64 {
        u64::from(self.malicious) + u64::from(self.suspicious)
    }
}

/// One engine's verdict from `last_analysis_results`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineVerdict {
    pub engine_name: Option<String>,
    pub category: Option<String>,
    pub result: Option<String>,
}

/// Analysis results for one content hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub hash: String,
    /// First submitted name; blank when the service has none
    pub display_name: String,
    pub stats: AnalysisStats,
    pub type_description: Option<String>,
    pub times_submitted: Option<u64>,
    /// Unix seconds
    pub last_analysis_date: Option<i64>,
    /// Keyed by engine, in engine-name order
    pub engines: Vec<EngineVerdict>,
}

impl AnalysisReport {
    pub fn last_analysis_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.last_analysis_date
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    }

    /// Verdicts from engines that flagged the file
    pub fn flagged_engines(&self) -> impl Iterator<Item = &EngineVerdict> {
        self.engines.iter().filter(|verdict| {
            matches!(
                verdict.category.as_deref(),
                Some("malicious") | Some("suspicious")
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct FileReportPayload {
    data: FileObject,
}

#[derive(Debug, Deserialize)]
struct FileObject {
    attributes: FileAttributesPayload,
}

// Option-wrapped so explicit nulls are tolerated as well as absent keys
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileAttributesPayload {
    names: Option<Vec<String>>,
    last_analysis_stats: Option<AnalysisStats>,
    type_description: Option<String>,
    times_submitted: Option<u64>,
    last_analysis_date: Option<i64>,
    last_analysis_results: Option<BTreeMap<String, Option<EngineVerdict>>>,
}

/// Map a `GET /files/{hash}` body into a report
pub fn parse_report(hash: &str, body: &str) -> ServiceResult<AnalysisReport> {
    let payload: FileReportPayload =
        serde_json::from_str(body).map_err(|source| ServiceError::Payload {
            operation: "fetch report",
            source,
        })?;
    let attributes = payload.data.attributes;

    let display_name = attributes
        .names
        .and_then(|names| names.into_iter().next())
        .unwrap_or_default();

    let engines = attributes
        .last_analysis_results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, verdict)| {
            verdict.map(|mut verdict| {
                verdict.engine_name.get_or_insert(key);
                verdict
            })
        })
        .collect();

    Ok(AnalysisReport {
        hash: hash.to_string(),
        display_name,
        stats: attributes.last_analysis_stats.unwrap_or_default(),
        type_description: attributes.type_description,
        times_submitted: attributes.times_submitted,
        last_analysis_date: attributes.last_analysis_date,
        engines,
    })
}
