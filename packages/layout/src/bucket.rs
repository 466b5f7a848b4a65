//! Static bucket layout.
//!
//! The GFID space is split into [`BUCKET_COUNT`] buckets by the GFID's first
//! two bytes. Buckets are dealt out round-robin over the ordered subvolume
//! list, so bucket `b` belongs to subvolume `b % n`.

use std::collections::HashSet;
use std::sync::Arc;

use rio_fop::{Gfid, RoutingKey};
use tracing::debug;

use crate::{LayoutError, LayoutResolver, Plane, Subvolume};

/// Number of buckets the GFID space is split into.
pub const BUCKET_COUNT: usize = 1 << 16;

/// A fixed GFID-bucket to subvolume map for one plane.
#[derive(Debug, Clone)]
pub struct BucketLayout {
    plane: Plane,
    subvolumes: Vec<Subvolume>,
}

impl BucketLayout {
    /// Build a layout over the given subvolume names, in order.
    pub fn new<I, S>(plane: Plane, names: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let mut seen = HashSet::new();
        let mut subvolumes = Vec::new();
        for name in names {
            let name: Arc<str> = name.into();
            if !seen.insert(name.clone()) {
                return Err(LayoutError::DuplicateSubvolume {
                    plane,
                    name: name.to_string(),
                });
            }
            subvolumes.push(Subvolume::new(name, plane, subvolumes.len()));
        }

        if subvolumes.is_empty() {
            return Err(LayoutError::NoSubvolumes { plane });
        }

        debug!(
            %plane,
            subvolumes = subvolumes.len(),
            "built static bucket layout"
        );
        Ok(Self { plane, subvolumes })
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn subvolumes(&self) -> &[Subvolume] {
        &self.subvolumes
    }

    /// The bucket a GFID falls in.
    pub fn bucket_of(gfid: &Gfid) -> u16 {
        let bytes = gfid.as_bytes();
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    /// Generate a new GFID that lands in the same bucket as `parent`.
    ///
    /// Used to co-locate a new file's inode with its directory, so both are
    /// owned by the same metadata subvolume.
    pub fn colocated_gfid(parent: &Gfid) -> Gfid {
        let mut bytes = *Gfid::generate().as_bytes();
        let [hi, lo] = Self::bucket_of(parent).to_be_bytes();
        bytes[0] = hi;
        bytes[1] = lo;
        Gfid::from_bytes(bytes)
    }
}

impl LayoutResolver for BucketLayout {
    fn resolve(&self, key: &RoutingKey) -> Option<Subvolume> {
        let bucket = Self::bucket_of(&key.gfid()) as usize;
        self.subvolumes.get(bucket % self.subvolumes.len()).cloned()
    }
}
