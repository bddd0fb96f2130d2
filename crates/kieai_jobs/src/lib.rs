//! The generic asynchronous job protocol for Kie.ai generation tasks.
//!
//! Every model capability speaks the same protocol: submit a request and
//! receive a task id, poll the task until it reaches a terminal state, and
//! treat inbound webhook callbacks as nothing more than a signal to
//! re-fetch authoritative state. This crate provides that protocol once so
//! capability crates never re-implement wire handling:
//!
//! - [`JobsModule`] — the typed submit/fetch/verify-callback handle for one
//!   model route of the shared jobs endpoints.
//! - [`Task`] / [`TaskState`] / [`GenerationFlag`] — the task data model and
//!   both of its wire state encodings.
//! - [`TaskOutcome`] / [`IntoOutcome`] — the normalized three-way
//!   classification every encoding collapses into right after a fetch.
//! - [`decode`] — the lenient parse-or-default utilities for
//!   server-encoded task fields.
//! - [`wait`] — the bounded polling loop.

pub mod decode;
mod module;
pub mod task;
pub mod wait;

pub use module::{CREATE_TASK_PATH, CreatedTask, JobsModule, RECORD_INFO_PATH};
pub use task::{
    GenerationFlag, IntoOutcome, Task, TaskFailure, TaskOutcome, TaskRecord, TaskState,
};
pub use wait::{WaitOptions, poll_until_terminal};
