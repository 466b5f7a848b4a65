//! Operation classification.
//!
//! [`ROUTE_TABLE`] is the single source of truth for which operations are
//! routable, which plane they go to, how their routing key is found, and
//! which attribute structures in their replies get cleansed. Everything
//! downstream is generic over the row it gets from here.

use rio_fop::FopKind;
use rio_layout::Plane;

/// How an operation is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Rejected without routing.
    Unsupported,
    /// Routed on the metadata plane by the parent's identity.
    MetadataEntry,
    /// Routed on the metadata plane by the target's identity.
    MetadataInode,
    /// Routed on the metadata plane by the fd's file identity.
    MetadataDescriptor,
    /// Routed on the data plane by the fd's file identity.
    DataDescriptor,
}

impl Category {
    /// The plane whose layout resolves this category, if routable.
    pub fn plane(&self) -> Option<Plane> {
        match self {
            Category::Unsupported => None,
            Category::MetadataEntry | Category::MetadataInode | Category::MetadataDescriptor => {
                Some(Plane::Metadata)
            }
            Category::DataDescriptor => Some(Plane::Data),
        }
    }
}

/// Which attribute structures of a successful reply are cleansed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReplyShape {
    /// Reply returned as is.
    #[default]
    Passthrough,
    /// One post-operation attribute structure.
    PostOnly,
    /// Pre- and post-operation attribute structures.
    PrePost,
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub shape: ReplyShape,
}

use Category::*;
use ReplyShape::*;

/// Every known operation kind, exactly once.
pub const ROUTE_TABLE: &[(FopKind, Category, ReplyShape)] = &[
    // Entry operations go to the subvolume holding the parent.
    (FopKind::Lookup, MetadataEntry, Passthrough),
    (FopKind::Mkdir, MetadataEntry, Passthrough),
    (FopKind::Create, MetadataEntry, Passthrough),
    // Inode operations.
    (FopKind::Stat, MetadataInode, Passthrough),
    (FopKind::Truncate, MetadataInode, Passthrough),
    (FopKind::Open, MetadataInode, Passthrough),
    (FopKind::Setxattr, MetadataInode, Passthrough),
    (FopKind::Getxattr, MetadataInode, Passthrough),
    (FopKind::Removexattr, MetadataInode, Passthrough),
    (FopKind::Access, MetadataInode, Passthrough),
    (FopKind::Inodelk, MetadataInode, Passthrough),
    (FopKind::Entrylk, MetadataInode, Passthrough),
    (FopKind::Xattrop, MetadataInode, Passthrough),
    (FopKind::Setattr, MetadataInode, Passthrough),
    (FopKind::Lease, MetadataInode, Passthrough),
    (FopKind::Getactivelk, MetadataInode, Passthrough),
    (FopKind::Setactivelk, MetadataInode, Passthrough),
    // Fd operations served by the metadata plane.
    (FopKind::Flush, MetadataDescriptor, Passthrough),
    (FopKind::Fsyncdir, MetadataDescriptor, Passthrough),
    (FopKind::Ftruncate, MetadataDescriptor, Passthrough),
    (FopKind::Fstat, MetadataDescriptor, Passthrough),
    (FopKind::Lk, MetadataDescriptor, Passthrough),
    (FopKind::Finodelk, MetadataDescriptor, Passthrough),
    (FopKind::Fentrylk, MetadataDescriptor, Passthrough),
    (FopKind::Fxattrop, MetadataDescriptor, Passthrough),
    (FopKind::Fsetxattr, MetadataDescriptor, Passthrough),
    (FopKind::Fgetxattr, MetadataDescriptor, Passthrough),
    (FopKind::Fsetattr, MetadataDescriptor, Passthrough),
    (FopKind::Fremovexattr, MetadataDescriptor, Passthrough),
    // Fd operations served by the data plane.
    (FopKind::Readv, DataDescriptor, PostOnly),
    (FopKind::Writev, DataDescriptor, PrePost),
    (FopKind::Rchecksum, DataDescriptor, Passthrough),
    (FopKind::Fallocate, DataDescriptor, PrePost),
    (FopKind::Discard, DataDescriptor, PrePost),
    (FopKind::Zerofill, DataDescriptor, PrePost),
    (FopKind::Seek, DataDescriptor, Passthrough),
    // Not routable yet.
    (FopKind::Mknod, Unsupported, Passthrough),
    (FopKind::Unlink, Unsupported, Passthrough),
    (FopKind::Rmdir, Unsupported, Passthrough),
    (FopKind::Symlink, Unsupported, Passthrough),
    (FopKind::Rename, Unsupported, Passthrough),
    (FopKind::Link, Unsupported, Passthrough),
    (FopKind::Statfs, Unsupported, Passthrough),
    (FopKind::Ipc, Unsupported, Passthrough),
    (FopKind::Compound, Unsupported, Passthrough),
    (FopKind::Icreate, Unsupported, Passthrough),
    (FopKind::Namelink, Unsupported, Passthrough),
    (FopKind::Readlink, Unsupported, Passthrough),
    (FopKind::Opendir, Unsupported, Passthrough),
    (FopKind::Discover, Unsupported, Passthrough),
    (FopKind::Fsync, Unsupported, Passthrough),
    (FopKind::Readdir, Unsupported, Passthrough),
    (FopKind::Readdirp, Unsupported, Passthrough),
    (FopKind::Getspec, Unsupported, Passthrough),
];

/// The table row for `kind`.
///
/// A kind missing from the table is unsupported rather than guessed at.
pub fn lookup(kind: FopKind) -> Classification {
    ROUTE_TABLE
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|&(_, category, shape)| Classification { category, shape })
        .unwrap_or(Classification {
            category: Unsupported,
            shape: Passthrough,
        })
}

/// The category of `kind`.
pub fn classify(kind: FopKind) -> Category {
    lookup(kind).category
}
