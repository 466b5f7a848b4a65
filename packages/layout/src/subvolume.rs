//! Planes and subvolumes.

use std::fmt;
use std::sync::Arc;

/// Which half of the filesystem a subvolume serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    Metadata,
    Data,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::Metadata => f.write_str("metadata"),
            Plane::Data => f.write_str("data"),
        }
    }
}

/// A routing target.
///
/// The `index` is the subvolume's position in its plane's list and is opaque
/// to the router; the forwarding substrate uses it (or the name) to find the
/// connection to call through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subvolume {
    name: Arc<str>,
    plane: Plane,
    index: usize,
}

impl Subvolume {
    pub fn new(name: impl Into<Arc<str>>, plane: Plane, index: usize) -> Self {
        Self {
            name: name.into(),
            plane,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Subvolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
