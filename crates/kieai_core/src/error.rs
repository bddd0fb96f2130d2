//! Error taxonomy for the Kie.ai client.
//!
//! Every failure that crosses a crate boundary is an [`SdkError`]. Lower
//! layers translate reqwest and serde failures into one of these kinds;
//! nothing propagates a raw, untyped error to a caller. The only failures
//! recovered silently are the documented lossy decodes of server-encoded
//! task fields (see `kieai_jobs`).

use core::time::Duration;

/// Failure kind of an [`SdkError`].
///
/// Mirrors the error variants one-to-one so callers can branch without
/// destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration rejected at client construction.
    ConfigInvalid,
    /// Non-success HTTP status or API envelope code.
    HttpFailure,
    /// Lookup of a plugin name that was never registered.
    PluginNotRegistered,
    /// Registration under a name that is already taken.
    PluginDuplicate,
    /// A required plugin dependency is not registered.
    DependencyMissing,
    /// A dependency version constraint was not satisfied (reserved).
    DependencyVersionMismatch,
    /// Caller input failed a field-level check.
    Validation,
    /// A bounded operation ran out of time.
    Timeout,
    /// The request never produced a usable HTTP response.
    Network,
    /// A remote task reached the failed terminal state.
    TaskFailed,
    /// Anything that fits no other kind.
    Unknown,
}

/// Errors produced by the client.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Configuration rejected at client construction.
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// What was wrong with the provided value.
        message: String,
        /// How to fix it.
        hint: Option<String>,
    },

    /// The API answered with a non-success HTTP status or envelope code.
    #[error("api request failed ({method} {url}): {message} (code {code})")]
    HttpFailure {
        /// Request method.
        method: &'static str,
        /// Full request URL.
        url: String,
        /// HTTP status code or business `code` from the envelope.
        code: i64,
        /// Server-provided message.
        message: String,
    },

    /// Lookup of a plugin name that was never registered.
    #[error("plugin '{name}' is not registered")]
    PluginNotRegistered {
        /// The requested plugin name.
        name: String,
        /// How to fix it.
        hint: String,
    },

    /// Registration under a name that is already taken.
    #[error("plugin '{name}' is already registered")]
    PluginDuplicate {
        /// The conflicting plugin name.
        name: String,
    },

    /// A required plugin dependency is not registered.
    #[error("plugin '{plugin}' requires '{dependency}' to be registered first")]
    DependencyMissing {
        /// The plugin being registered.
        plugin: String,
        /// The missing dependency.
        dependency: String,
    },

    /// A dependency version constraint was not satisfied.
    ///
    /// Reserved for the version-compatibility extension point; the current
    /// registration path never produces it.
    #[error("plugin '{plugin}' requires '{dependency}' {required}, found {found}")]
    DependencyVersionMismatch {
        /// The plugin being registered.
        plugin: String,
        /// The dependency whose version was checked.
        dependency: String,
        /// The declared requirement.
        required: String,
        /// The registered version.
        found: String,
    },

    /// Caller input failed a field-level check.
    #[error("validation failed: {message}")]
    Validation {
        /// What was wrong.
        message: String,
        /// The offending field, when one can be named.
        field: Option<&'static str>,
    },

    /// A bounded operation ran out of time.
    #[error("timed out after {limit:?} while {operation}")]
    Timeout {
        /// The bound that elapsed.
        limit: Duration,
        /// What was being waited on.
        operation: String,
    },

    /// The request never produced a usable HTTP response.
    #[error("network error ({method} {url}): {message}")]
    Network {
        /// Request method.
        method: &'static str,
        /// Full request URL.
        url: String,
        /// Description of the failure.
        message: String,
        /// The underlying error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A remote task reached the failed terminal state.
    ///
    /// Distinct from [`Timeout`](Self::Timeout) so callers can tell "the
    /// remote job failed" apart from "we gave up waiting".
    #[error("task '{task_id}' failed{}{}",
        .code.as_deref().map(|c| format!(" (code {c})")).unwrap_or_default(),
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    TaskFailed {
        /// The failed task.
        task_id: String,
        /// Server fail code, verbatim.
        code: Option<String>,
        /// Server fail message, verbatim.
        message: Option<String>,
    },

    /// Anything that fits no other kind.
    #[error("unknown error: {message}")]
    Unknown {
        /// Description of the failure.
        message: String,
        /// The underlying error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SdkError {
    /// Creates a [`Validation`](Self::Validation) error without a named field.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a [`Validation`](Self::Validation) error naming the offending field.
    pub fn validation_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field),
        }
    }

    /// Creates a [`ConfigInvalid`](Self::ConfigInvalid) error.
    pub fn config(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Creates a [`PluginNotRegistered`](Self::PluginNotRegistered) error
    /// with the standard remediation hint.
    pub fn plugin_not_registered(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::PluginNotRegistered {
            hint: format!("register '{name}' with KieClient::register before resolving it"),
            name,
        }
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigInvalid { .. } => ErrorKind::ConfigInvalid,
            Self::HttpFailure { .. } => ErrorKind::HttpFailure,
            Self::PluginNotRegistered { .. } => ErrorKind::PluginNotRegistered,
            Self::PluginDuplicate { .. } => ErrorKind::PluginDuplicate,
            Self::DependencyMissing { .. } => ErrorKind::DependencyMissing,
            Self::DependencyVersionMismatch { .. } => ErrorKind::DependencyVersionMismatch,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network { .. } => ErrorKind::Network,
            Self::TaskFailed { .. } => ErrorKind::TaskFailed,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Returns true for configuration errors.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::ConfigInvalid
    }

    /// Returns true for plugin registration and lookup errors.
    #[must_use]
    pub fn is_plugin_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::PluginNotRegistered
                | ErrorKind::PluginDuplicate
                | ErrorKind::DependencyMissing
                | ErrorKind::DependencyVersionMismatch
        )
    }

    /// Returns true for errors raised on the network path.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::HttpFailure | ErrorKind::Timeout | ErrorKind::Network
        )
    }
}
