//! Remote analysis service seam
//!
//! The orchestrator only talks to this trait, so tests can substitute a
//! scripted service for the HTTP client.

use super::report::AnalysisReport;
use super::submission::SubmissionOutcome;
use async_trait::async_trait;
use std::path::Path;

/// Operations the scan workflow needs from the remote service
///
/// Implementations never fail: transport and payload problems collapse into a
/// rejected submission or a missing report.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Upload through the regular file endpoint
    async fn submit_small(&self, token: &str, path: &Path) -> SubmissionOutcome;

    /// Upload through the large-file mechanism
    async fn submit_large(&self, token: &str, path: &Path) -> SubmissionOutcome;

    /// Latest analysis for a content hash, if one can be retrieved
    async fn fetch_report(&self, token: &str, hash: &str) -> Option<AnalysisReport>;
}
