use thiserror::Error;

/// Fatal at startup: plugin unknown, schema mismatch, missing credentials.
///
/// Surfaced to the user and propagated out of `Runtime::build`; never
/// caught by a plugin's own run loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown plugin type `{0}`")]
    UnknownPlugin(String),
    #[error("plugin `{name}` does not implement the `{capability}` capability")]
    WrongCapability { name: String, capability: &'static str },
    #[error("missing required config field `{0}`")]
    MissingField(&'static str),
    #[error("config field `{field}` has the wrong type: {detail}")]
    WrongType { field: &'static str, detail: String },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Network timeout, socket closed, device unavailable.
///
/// Logged with its cause; the operation that produced it is skipped and
/// the next tick proceeds. Never propagated as a fault.
#[derive(Debug, Error)]
pub enum TransientIo {
    #[error("operation timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("connection lost: {0}")]
    ConnectionLost(String),
    #[error("device unavailable: {0}")]
    Unavailable(String),
}

/// An unparseable message from a subscribed topic. Logged; message dropped.
#[derive(Debug, Error)]
#[error("protocol mismatch: {0}")]
pub struct ProtocolMismatch(pub String);

/// Anything else. Logged; the owning task continues.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Unknown(pub String);

/// Failure classification a [`crate::connector::Connector`] returns from
/// `connect()`. `Timeout` and `ConnectionLost` are never retried by the
/// dispatcher — the connector itself decides whether to retry internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("connector operation exceeded its configured timeout")]
    Timeout,
    #[error("connector transport is gone: {0}")]
    ConnectionLost(String),
    #[error("connector is unrecoverably misconfigured: {0}")]
    Fatal(String),
}
