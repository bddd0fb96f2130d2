//! Task data model and outcome normalization.
//!
//! Tasks are owned by the remote service. The client never mutates one; it
//! only reads snapshots via the query endpoint, and repeated reads may
//! observe the same state or a later one. `success` and `fail` are
//! terminal. The ordering of the pre-terminal states is advisory only —
//! any of them may be skipped between polls.

use crate::decode;
use kieai_core::SdkError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state reported by the jobs endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Accepted, not yet queued.
    Waiting,
    /// Queued for a worker.
    Queuing,
    /// Generation in progress.
    Generating,
    /// Terminal success.
    Success,
    /// Terminal failure.
    Fail,
}

impl TaskState {
    /// Returns whether no further transitions can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Fail)
    }
}

/// Legacy numeric status encoding used by the image-era endpoints.
///
/// Callers treat both failure codes as the same terminal failure category;
/// the distinct code is preserved for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum GenerationFlag {
    /// Still generating (`0`).
    Generating,
    /// Terminal success (`1`).
    Success,
    /// The task itself failed (`2`).
    TaskFailed,
    /// Generation failed after the task was accepted (`3`).
    GenerateFailed,
}

impl GenerationFlag {
    /// Returns the wire code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Generating => 0,
            Self::Success => 1,
            Self::TaskFailed => 2,
            Self::GenerateFailed => 3,
        }
    }

    /// Returns whether no further transitions can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Generating)
    }

    /// Returns whether the flag is one of the two failure codes.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::TaskFailed | Self::GenerateFailed)
    }
}

impl TryFrom<u8> for GenerationFlag {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Generating),
            1 => Ok(Self::Success),
            2 => Ok(Self::TaskFailed),
            3 => Ok(Self::GenerateFailed),
            other => Err(format!("unknown status flag {other}")),
        }
    }
}

/// Wire shape of a task record as returned by the query endpoint.
///
/// `param` and `resultJson` arrive as opaque JSON-encoded strings;
/// [`Task::from_record`] decodes them. `failCode` is a string on some
/// routes and a number on others, so it is normalized while
/// deserializing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Server-assigned task identifier.
    pub task_id: String,
    /// Route key of the model that owns the task.
    #[serde(default)]
    pub model: String,
    /// Current lifecycle state.
    pub state: TaskState,
    /// JSON-encoded request input.
    #[serde(default)]
    pub param: String,
    /// JSON-encoded result payload, present once terminal success.
    #[serde(default)]
    pub result_json: Option<String>,
    /// Fail code, present once terminal failure.
    #[serde(default, deserialize_with = "string_or_number")]
    pub fail_code: Option<String>,
    /// Fail message, present once terminal failure.
    #[serde(default)]
    pub fail_msg: Option<String>,
    /// Creation timestamp (epoch milliseconds).
    #[serde(default)]
    pub create_time: Option<i64>,
    /// Completion timestamp, null until terminal.
    #[serde(default)]
    pub complete_time: Option<i64>,
    /// Total processing time in milliseconds, null until terminal.
    #[serde(default)]
    pub cost_time: Option<i64>,
    /// Last update timestamp.
    #[serde(default)]
    pub update_time: Option<i64>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Number(code) => code.to_string(),
        Repr::Text(code) => code,
    }))
}

/// A decoded task snapshot.
///
/// `R` is the capability-defined result payload. Both server-encoded fields
/// follow the lenient-decode contract of [`decode`]: a malformed `param`
/// degrades to an empty map and a malformed `resultJson` degrades to
/// `None`; neither raises.
#[derive(Debug, Clone)]
pub struct Task<R> {
    /// Server-assigned task identifier.
    pub task_id: String,
    /// Route key of the model that owns the task.
    pub model: String,
    /// Current lifecycle state.
    pub state: TaskState,
    /// Decoded request input.
    pub param: Map<String, Value>,
    /// Decoded result payload, present once the task succeeded.
    pub result: Option<R>,
    /// Raw result payload as delivered by the server.
    pub result_json: Option<String>,
    /// Fail code, present once the task failed.
    pub fail_code: Option<String>,
    /// Fail message, present once the task failed.
    pub fail_msg: Option<String>,
    /// Creation timestamp (epoch milliseconds).
    pub create_time: Option<i64>,
    /// Completion timestamp, null until terminal.
    pub complete_time: Option<i64>,
    /// Total processing time in milliseconds, null until terminal.
    pub cost_time: Option<i64>,
}

impl<R: DeserializeOwned> Task<R> {
    /// Decodes a wire record.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            param: decode::object_or_empty(&record.param),
            result: decode::value_or_none(record.result_json.as_deref()),
            task_id: record.task_id,
            model: record.model,
            state: record.state,
            result_json: record.result_json,
            fail_code: record.fail_code,
            fail_msg: record.fail_msg,
            create_time: record.create_time,
            complete_time: record.complete_time,
            cost_time: record.cost_time,
        }
    }
}

/// Diagnostics carried by a failed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Provider fail code, verbatim.
    pub code: Option<String>,
    /// Provider fail message, verbatim.
    pub message: Option<String>,
}

/// Normalized three-way classification of a task snapshot.
///
/// Capability encodings differ (string states on the jobs routes, numeric
/// flags on the legacy routes, per-capability state strings elsewhere).
/// Each is collapsed into this type immediately after a fetch so the
/// polling loop never branches on a capability-specific encoding.
#[derive(Debug, Clone)]
pub enum TaskOutcome<R> {
    /// Not terminal yet.
    Pending,
    /// Terminal success with the decoded result payload.
    Succeeded(R),
    /// Terminal failure with provider diagnostics.
    Failed(TaskFailure),
}

/// Snapshot types that can classify themselves into a [`TaskOutcome`].
pub trait IntoOutcome {
    /// The success payload type.
    type Output;

    /// Classifies the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Validation`] when the snapshot is terminal
    /// success but its result payload could not be decoded — the lossy
    /// fetch contract keeps such a snapshot readable, but a caller asking
    /// for the outcome needs the payload.
    fn into_outcome(self) -> Result<TaskOutcome<Self::Output>, SdkError>;
}

impl<R> IntoOutcome for Task<R> {
    type Output = R;

    fn into_outcome(self) -> Result<TaskOutcome<R>, SdkError> {
        match self.state {
            TaskState::Success => match self.result {
                Some(result) => Ok(TaskOutcome::Succeeded(result)),
                None => Err(SdkError::validation(format!(
                    "task '{}' succeeded but its result payload could not be decoded (raw: {:?})",
                    self.task_id, self.result_json
                ))),
            },
            TaskState::Fail => Ok(TaskOutcome::Failed(TaskFailure {
                code: self.fail_code,
                message: self.fail_msg,
            })),
            TaskState::Waiting | TaskState::Queuing | TaskState::Generating => {
                Ok(TaskOutcome::Pending)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct VideoResult {
        result_urls: Vec<String>,
    }

    #[test]
    fn state_deserializes_lowercase() {
        let state: TaskState = serde_json::from_str("\"queuing\"").unwrap();
        assert_eq!(state, TaskState::Queuing);
        assert!(!state.is_terminal());
        assert!(TaskState::Fail.is_terminal());
    }

    #[test]
    fn generation_flag_round_trips_codes() {
        for code in 0..=3u8 {
            let flag = GenerationFlag::try_from(code).unwrap();
            assert_eq!(flag.code(), code);
        }
        assert!(GenerationFlag::try_from(7).is_err());
        assert!(GenerationFlag::TaskFailed.is_failure());
        assert!(GenerationFlag::GenerateFailed.is_failure());
        assert!(!GenerationFlag::Success.is_failure());
    }

    #[test]
    fn record_accepts_numeric_and_string_fail_codes() {
        let numeric: TaskRecord = serde_json::from_value(json!({
            "taskId": "T1", "model": "x", "state": "fail", "failCode": 501
        }))
        .unwrap();
        assert_eq!(numeric.fail_code.as_deref(), Some("501"));

        let text: TaskRecord = serde_json::from_value(json!({
            "taskId": "T1", "model": "x", "state": "fail", "failCode": "E_CONTENT"
        }))
        .unwrap();
        assert_eq!(text.fail_code.as_deref(), Some("E_CONTENT"));
    }

    #[test]
    fn success_outcome_carries_result() {
        let record: TaskRecord = serde_json::from_value(json!({
            "taskId": "T1",
            "model": "x",
            "state": "success",
            "param": "{\"prompt\":\"a cat\"}",
            "resultJson": "{\"resultUrls\":[\"https://x/y.mp4\"]}"
        }))
        .unwrap();
        let task: Task<VideoResult> = Task::from_record(record);
        match task.into_outcome().unwrap() {
            TaskOutcome::Succeeded(result) => {
                assert_eq!(result.result_urls, vec!["https://x/y.mp4"]);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn fail_outcome_preserves_diagnostics() {
        let record: TaskRecord = serde_json::from_value(json!({
            "taskId": "T1", "model": "x", "state": "fail",
            "failCode": "422", "failMsg": "flagged prompt"
        }))
        .unwrap();
        let task: Task<VideoResult> = Task::from_record(record);
        match task.into_outcome().unwrap() {
            TaskOutcome::Failed(failure) => {
                assert_eq!(failure.code.as_deref(), Some("422"));
                assert_eq!(failure.message.as_deref(), Some("flagged prompt"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_success_result_is_an_error() {
        let record: TaskRecord = serde_json::from_value(json!({
            "taskId": "T1", "model": "x", "state": "success",
            "resultJson": "not valid json"
        }))
        .unwrap();
        let task: Task<VideoResult> = Task::from_record(record);
        assert!(task.result.is_none());
        assert!(task.into_outcome().is_err());
    }
}
