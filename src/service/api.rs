//! Service API
//!
//! Public surface of the remote service module, mirroring `scanner::api` and
//! `storage::api`.

// HTTP client and configuration
pub use crate::service::client::{ClientConfig, VirusTotalClient, DEFAULT_BASE_URL};

// Trait seam used by the orchestrator
pub use crate::service::traits::AnalysisService;

// Data types
pub use crate::service::report::{AnalysisReport, AnalysisStats, EngineVerdict, StatCategory};
pub use crate::service::submission::SubmissionOutcome;

// Error handling
pub use crate::service::error::{ServiceError, ServiceResult};
