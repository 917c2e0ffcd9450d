//! Test helpers for scanner unit tests
//!
//! These are separate from the integration helpers in tests/common/, which
//! drive the real HTTP client against a canned server.

use crate::scanner::orchestrator::ScanOrchestrator;
use crate::service::{AnalysisReport, AnalysisService, SubmissionOutcome};
use crate::storage::StorageLayout;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const TEST_TOKEN: &str = "test-api-key";

/// Call recorded by [`ScriptedService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Small { token: String, path: PathBuf },
    Large { token: String, path: PathBuf },
    Report { token: String, hash: String },
}

/// Service double returning fixed answers and recording every call
pub struct ScriptedService {
    outcome: SubmissionOutcome,
    report: Option<AnalysisReport>,
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<ServiceCall>>,
}

impl ScriptedService {
    pub fn accepting(id: &str) -> Self {
        Self {
            outcome: SubmissionOutcome::accepted(id),
            report: None,
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            outcome: SubmissionOutcome::rejected(),
            ..Self::accepting("unused")
        }
    }

    pub fn with_report(mut self, report: AnalysisReport) -> Self {
        self.report = Some(report);
        self
    }

    /// Hold submissions until the gate is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl AnalysisService for ScriptedService {
    async fn submit_small(&self, token: &str, path: &Path) -> SubmissionOutcome {
        self.record(ServiceCall::Small {
            token: token.to_string(),
            path: path.to_path_buf(),
        });
        self.wait_for_gate().await;
        self.outcome.clone()
    }

    async fn submit_large(&self, token: &str, path: &Path) -> SubmissionOutcome {
        self.record(ServiceCall::Large {
            token: token.to_string(),
            path: path.to_path_buf(),
        });
        self.wait_for_gate().await;
        self.outcome.clone()
    }

    async fn fetch_report(&self, token: &str, hash: &str) -> Option<AnalysisReport> {
        self.record(ServiceCall::Report {
            token: token.to_string(),
            hash: hash.to_string(),
        });
        self.report.clone()
    }
}

/// Orchestrator over a temporary storage root, plus a handle to its service
pub struct Harness {
    pub orchestrator: Arc<ScanOrchestrator>,
    pub service: Arc<ScriptedService>,
    pub temp: tempfile::TempDir,
}

impl Harness {
    pub fn new(service: ScriptedService) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let service = Arc::new(service);
        let orchestrator = Arc::new(ScanOrchestrator::new(
            service.clone(),
            StorageLayout::new(temp.path().join("state")),
        ));
        Self {
            orchestrator,
            service,
            temp,
        }
    }

    /// Harness with the API key already configured
    pub fn with_token(service: ScriptedService) -> Self {
        let harness = Self::new(service);
        harness.orchestrator.set_credential(TEST_TOKEN).unwrap();
        harness
    }

    /// Write a file of `size` bytes into the scratch area
    pub fn write_file(&self, name: &str, size: usize) -> PathBuf {
        let path = self.temp.path().join(name);
        let content: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        std::fs::write(&path, content).unwrap();
        path
    }
}
