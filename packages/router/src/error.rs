//! Error types for the router.

use rio_fop::{Errno, FopKind, RoutingKey};
use rio_layout::Plane;
use thiserror::Error;

/// Why an operation was completed without a reply from a subvolume.
///
/// Every variant terminates the operation; the router never retries.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The operation kind is not routable at all.
    #[error("operation not supported: {kind}")]
    NotSupported { kind: FopKind },

    /// No usable file identity in the operation's addressing.
    #[error("missing gfid for operation {kind}")]
    MissingIdentity { kind: FopKind },

    /// The layout has no owner for the key.
    #[error("unable to find {plane} subvolume for gfid {key}")]
    UnresolvedSubvolume { plane: Plane, key: RoutingKey },

    /// The call could not be delivered to the resolved subvolume.
    #[error("forwarding {kind} to subvolume {subvolume} failed: {source}")]
    Forwarding {
        kind: FopKind,
        subvolume: String,
        source: ForwardError,
    },
}

impl RouteError {
    /// The error number a filesystem caller sees for this failure.
    pub fn errno(&self) -> Errno {
        match self {
            RouteError::NotSupported { .. } => Errno::ENOTSUP,
            RouteError::MissingIdentity { .. } => Errno::EINVAL,
            RouteError::UnresolvedSubvolume { .. } => Errno::EINVAL,
            RouteError::Forwarding { .. } => Errno::ENOTCONN,
        }
    }
}

/// Failures of the call-forwarding substrate.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The subvolume has no live connection.
    #[error("subvolume {0} is not connected")]
    Disconnected(String),

    /// Transport-specific failure.
    #[error("transport error: {0}")]
    Transport(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// The pending call was released without a reply ever arriving.
    #[error("call released without a reply")]
    Dropped,
}

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;
