//! The layout resolution interface.

use std::fmt;
use std::sync::Arc;

use rio_fop::RoutingKey;

use crate::{Plane, Subvolume};

/// Resolve a routing key to its owning subvolume.
///
/// Implementations must be deterministic for a fixed layout version and safe
/// to query concurrently through `&self`; any caching or internal locking is
/// their own business.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn LayoutResolver>`.
pub trait LayoutResolver: Send + Sync {
    /// Returns `None` when no subvolume owns the key.
    fn resolve(&self, key: &RoutingKey) -> Option<Subvolume>;
}

impl<T: LayoutResolver + ?Sized> LayoutResolver for Arc<T> {
    fn resolve(&self, key: &RoutingKey) -> Option<Subvolume> {
        self.as_ref().resolve(key)
    }
}

impl<T: LayoutResolver + ?Sized> LayoutResolver for Box<T> {
    fn resolve(&self, key: &RoutingKey) -> Option<Subvolume> {
        self.as_ref().resolve(key)
    }
}

/// The metadata and data layouts, queried independently.
#[derive(Clone)]
pub struct Layouts {
    metadata: Arc<dyn LayoutResolver>,
    data: Arc<dyn LayoutResolver>,
}

impl Layouts {
    pub fn new<M, D>(metadata: M, data: D) -> Self
    where
        M: LayoutResolver + 'static,
        D: LayoutResolver + 'static,
    {
        Self {
            metadata: Arc::new(metadata),
            data: Arc::new(data),
        }
    }

    /// Build from already shared resolvers.
    pub fn from_shared(metadata: Arc<dyn LayoutResolver>, data: Arc<dyn LayoutResolver>) -> Self {
        Self { metadata, data }
    }

    /// The layout for one plane.
    pub fn plane(&self, plane: Plane) -> &dyn LayoutResolver {
        match plane {
            Plane::Metadata => self.metadata.as_ref(),
            Plane::Data => self.data.as_ref(),
        }
    }

    /// Resolve against exactly one plane's layout; the other is not touched.
    pub fn resolve(&self, plane: Plane, key: &RoutingKey) -> Option<Subvolume> {
        self.plane(plane).resolve(key)
    }
}

impl fmt::Debug for Layouts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layouts").finish_non_exhaustive()
    }
}
