//! Remote Analysis Service
//!
//! Submission and report retrieval against the VirusTotal v3 API, behind the
//! [`AnalysisService`] trait. Failures never propagate: a submission either
//! succeeds or is rejected, and a report is either available or absent.

pub mod api;
pub mod client;
pub mod error;
pub mod report;
pub mod submission;
pub mod traits;

pub use client::{ClientConfig, VirusTotalClient, DEFAULT_BASE_URL};
pub use error::{ServiceError, ServiceResult};
pub use report::{AnalysisReport, AnalysisStats, EngineVerdict, StatCategory};
pub use submission::SubmissionOutcome;
pub use traits::AnalysisService;
