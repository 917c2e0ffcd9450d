//! VirusTotal v3 HTTP client
//!
//! Every request carries the API key in `x-apikey` and asks for JSON. Upload
//! bodies are streamed from disk as multipart forms.

use super::error::{ServiceError, ServiceResult};
use super::report::{parse_report, AnalysisReport};
use super::submission::{parse_submission, parse_upload_url, SubmissionOutcome};
use super::traits::AnalysisService;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://www.virustotal.com/api/v3";

const API_KEY_HEADER: &str = "x-apikey";
const ACCEPT_JSON: &str = "application/json";
const FILE_FIELD: &str = "file";

/// Connection settings for the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub struct VirusTotalClient {
    http: reqwest::Client,
    base_url: String,
}

impl VirusTotalClient {
    pub fn new(config: ClientConfig) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vtdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ServiceError::ClientBuild { source })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.base_url)
    }

    async fn upload_to(
        &self,
        token: &str,
        url: &str,
        path: &Path,
    ) -> ServiceResult<SubmissionOutcome> {
        let form = Form::new().part(FILE_FIELD, file_part(path).await?);

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                operation: "submit file",
                source,
            })?;

        let body = success_body(response, "submit file").await?;
        parse_submission(&body)
    }

    async fn request_upload_url(&self, token: &str) -> ServiceResult<String> {
        let response = self
            .http
            .get(format!("{}/upload_url", self.files_url()))
            .header(API_KEY_HEADER, token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                operation: "request upload URL",
                source,
            })?;

        let body = success_body(response, "request upload URL").await?;
        parse_upload_url(&body)
    }

    async fn try_submit_small(&self, token: &str, path: &Path) -> ServiceResult<SubmissionOutcome> {
        self.upload_to(token, &self.files_url(), path).await
    }

    async fn try_submit_large(&self, token: &str, path: &Path) -> ServiceResult<SubmissionOutcome> {
        let upload_url = self.request_upload_url(token).await?;
        log::debug!("Large file upload URL obtained");
        self.upload_to(token, &upload_url, path).await
    }

    async fn try_fetch_report(&self, token: &str, hash: &str) -> ServiceResult<AnalysisReport> {
        let response = self
            .http
            .get(format!("{}/{}", self.files_url(), hash))
            .header(API_KEY_HEADER, token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                operation: "fetch report",
                source,
            })?;

        let body = success_body(response, "fetch report").await?;
        parse_report(hash, &body)
    }
}

#[async_trait]
impl AnalysisService for VirusTotalClient {
    async fn submit_small(&self, token: &str, path: &Path) -> SubmissionOutcome {
        collapse_submission(self.try_submit_small(token, path).await)
    }

    async fn submit_large(&self, token: &str, path: &Path) -> SubmissionOutcome {
        collapse_submission(self.try_submit_large(token, path).await)
    }

    async fn fetch_report(&self, token: &str, hash: &str) -> Option<AnalysisReport> {
        match self.try_fetch_report(token, hash).await {
            Ok(report) => Some(report),
            Err(e) => {
                log::warn!("Report for {} unavailable: {}", hash, e);
                None
            }
        }
    }
}

fn collapse_submission(result: ServiceResult<SubmissionOutcome>) -> SubmissionOutcome {
    match result {
        Ok(outcome) => {
            if !outcome.success {
                log::warn!("Submission response carried no analysis id");
            }
            outcome
        }
        Err(e) => {
            log::warn!("Submission failed: {}", e);
            SubmissionOutcome::rejected()
        }
    }
}

async fn success_body(response: reqwest::Response, operation: &'static str) -> ServiceResult<String> {
    let status = response.status();
    log::debug!("{}: HTTP {}", operation, status.as_u16());

    if !status.is_success() {
        return Err(ServiceError::Status {
            operation,
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| ServiceError::Transport { operation, source })
}

/// Multipart part that streams the file with a declared length
async fn file_part(path: &Path) -> ServiceResult<Part> {
    let file_error = |source| ServiceError::File {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(file_error)?;
    let length = file.metadata().await.map_err(file_error)?.len();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FILE_FIELD.to_string());

    let body = reqwest::Body::wrap_stream(tokio_util::io::ReaderStream::new(file));
    Ok(Part::stream_with_length(body, length).file_name(file_name))
}
