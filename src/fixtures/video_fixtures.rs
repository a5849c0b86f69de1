//! Video job fixtures

use serde_json::json;

pub const JOB_ID: &str = "task_01jx5example";
pub const GENERATION_ID: &str = "gen_01jx5example";

/// Fake MP4 payload; only the byte identity matters to the client.
pub const MP4_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom";

pub fn job_created_response() -> serde_json::Value {
    json!({
        "object": "video.generation.job",
        "id": JOB_ID,
        "status": "queued",
        "created_at": 1_745_000_000,
        "generations": []
    })
}

pub fn job_status_response(status: &str) -> serde_json::Value {
    json!({
        "object": "video.generation.job",
        "id": JOB_ID,
        "status": status,
        "generations": []
    })
}

pub fn job_succeeded_response() -> serde_json::Value {
    json!({
        "object": "video.generation.job",
        "id": JOB_ID,
        "status": "succeeded",
        "finished_at": 1_745_000_090,
        "generations": [{
            "object": "video.generation",
            "id": GENERATION_ID,
            "job_id": JOB_ID,
            "width": 1920,
            "height": 1080,
            "n_seconds": 5,
            "prompt": "a lighthouse at dusk"
        }]
    })
}

pub fn job_failed_response(message: &str) -> serde_json::Value {
    json!({
        "object": "video.generation.job",
        "id": JOB_ID,
        "status": "failed",
        "failure_reason": "internal_error",
        "error": { "code": "internal_error", "message": message },
        "generations": []
    })
}
