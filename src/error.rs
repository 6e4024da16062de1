use thiserror::Error;

/// Failure reported by the host for a single API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("{call} failed (HRESULT {hresult:#010x})")]
    Failed { call: &'static str, hresult: i32 },

    #[error("connection is closed")]
    Closed,

    #[error("no SimConnect backend compiled in (enable the `simconnect` feature on Windows)")]
    Unavailable,
}

/// A receive buffer that can't be turned into a [`Message`](crate::recv::Message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{tag} needs {needed} bytes, got {actual}")]
    Truncated {
        tag: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("header declares {declared} bytes but buffer holds {actual}")]
    SizeMismatch { declared: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("subscription id {0} is already registered")]
    DuplicateSubscription(u32),

    #[error(transparent)]
    Host(#[from] HostError),
}
