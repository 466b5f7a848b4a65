//! Errors raised while building layouts.

use thiserror::Error;

use crate::Plane;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A layout needs at least one subvolume to own its buckets.
    #[error("no subvolumes given for the {plane} layout")]
    NoSubvolumes { plane: Plane },

    /// The same subvolume appears twice in one layout.
    #[error("subvolume {name} listed more than once in the {plane} layout")]
    DuplicateSubvolume { plane: Plane, name: String },
}
