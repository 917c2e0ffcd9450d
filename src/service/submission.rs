//! Submission responses
//!
//! A submission is accepted when the response carries `data.id`. The
//! large-file flow first asks for a one-shot upload URL in `data`.

use super::error::{ServiceError, ServiceResult};
use serde::Deserialize;

/// Result of one upload attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub success: bool,
    /// Remote analysis id when the service accepted the file
    pub submission_id: Option<String>,
}

impl SubmissionOutcome {
    pub fn accepted(submission_id: impl Into<String>) -> Self {
        Self {
            success: true,
            submission_id: Some(submission_id.into()),
        }
    }

    pub fn rejected() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionPayload {
    data: SubmissionData,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadUrlPayload {
    data: String,
}

/// Interpret a submission response body
///
/// A well-formed body without an id is a rejection, not an error.
pub fn parse_submission(body: &str) -> ServiceResult<SubmissionOutcome> {
    let payload: SubmissionPayload =
        serde_json::from_str(body).map_err(|source| ServiceError::Payload {
            operation: "submit file",
            source,
        })?;

    Ok(match payload.data.id {
        Some(id) => SubmissionOutcome::accepted(id),
        None => SubmissionOutcome::rejected(),
    })
}

/// Extract the one-shot upload URL for large files
pub fn parse_upload_url(body: &str) -> ServiceResult<String> {
    let payload: UploadUrlPayload =
        serde_json::from_str(body).map_err(|source| ServiceError::Payload {
            operation: "request upload URL",
            source,
        })?;
    Ok(payload.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_with_id_is_accepted() {
        let outcome = parse_submission(r#"{"data":{"id":"abc"}}"#).unwrap();
        assert_eq!(outcome, SubmissionOutcome::accepted("abc"));
    }

    #[test]
    fn test_submission_with_real_shape_is_accepted() {
        let body = r#"{
            "data": {
                "type": "analysis",
                "id": "NjY0MjRlOTFjMDIyYTkyNWM0NjU2NWQzYWNlMzFmZmI6MTQ3NTA0ODI3Nw==",
                "links": {"self": "https://www.virustotal.com/api/v3/analyses/NjY0"}
            }
        }"#;
        let outcome = parse_submission(body).unwrap();
        assert!(outcome.success);
        assert!(outcome.submission_id.unwrap().starts_with("NjY0"));
    }

    #[test]
    fn test_null_or_missing_id_is_rejected_without_error() {
        assert_eq!(
            parse_submission(r#"{"data":{"id":null}}"#).unwrap(),
            SubmissionOutcome::rejected()
        );
        assert_eq!(
            parse_submission(r#"{"data":{}}"#).unwrap(),
            SubmissionOutcome::rejected()
        );
    }

    #[test]
    fn test_error_payload_is_a_parse_error() {
        let body = r#"{"error":{"code":"WrongCredentialsError","message":"Wrong API key"}}"#;
        assert!(matches!(
            parse_submission(body),
            Err(ServiceError::Payload { .. })
        ));
        assert!(parse_submission("").is_err());
    }

    #[test]
    fn test_parse_upload_url() {
        let body = r#"{"data":"https://www.virustotal.com/_ah/upload/AMmfu6b"}"#;
        assert_eq!(
            parse_upload_url(body).unwrap(),
            "https://www.virustotal.com/_ah/upload/AMmfu6b"
        );
        assert!(parse_upload_url(r#"{"data":{"id":"x"}}"#).is_err());
    }
}
