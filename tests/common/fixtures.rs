//! Canned API payloads and scratch files

use std::path::{Path, PathBuf};

pub const TOKEN: &str = "integration-key";

/// SHA-256 of "abc"
pub const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

pub fn submission_body(id: &str) -> String {
    format!(r#"{{"data":{{"type":"analysis","id":"{}"}}}}"#, id)
}

pub const UPLOAD_URL_BODY: &str = r#"{"data":"{base}/upload/one-shot"}"#;

pub const REPORT_BODY: &str = r#"{
    "data": {
        "id": "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        "type": "file",
        "attributes": {
            "names": ["abc.txt"],
            "type_description": "Text",
            "times_submitted": 2,
            "last_analysis_date": 1700000000,
            "last_analysis_stats": {
                "malicious": 1,
                "suspicious": 0,
                "undetected": 65,
                "harmless": 0,
                "timeout": 0,
                "confirmed-timeout": 0,
                "failure": 0,
                "type-unsupported": 7
            },
            "last_analysis_results": {
                "Alpha": {"engine_name": "Alpha", "category": "malicious", "result": "EICAR"},
                "Beta": {"engine_name": "Beta", "category": "undetected", "result": null}
            }
        }
    }
}"#;

/// Write `content` to `dir/name`
pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
