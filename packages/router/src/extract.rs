//! Routing key extraction.
//!
//! Derives the GFID an operation is routed by from its addressing. Pure: the
//! caller decides what to log.

use rio_fop::{Addressing, Fd, FopKind, Gfid, Loc, Operation, RoutingKey};

use crate::classify::Category;
use crate::error::RouteError;

/// Extract the routing key of `operation` for its `category`.
///
/// Addressing that does not fit the category (say, an fd for an inode
/// operation) has no usable identity and fails like a null GFID would.
pub fn extract(operation: &Operation, category: Category) -> Result<RoutingKey, RouteError> {
    let kind = operation.kind;
    let gfid = match (category, &operation.addressing) {
        (Category::Unsupported, _) => return Err(RouteError::NotSupported { kind }),
        (Category::MetadataEntry, Addressing::Entry(loc) | Addressing::Inode(loc)) => {
            // A nameless lookup has no parent to route by; it is resolved
            // through the inode itself.
            if kind == FopKind::Lookup && loc.is_nameless() {
                target_gfid(loc)
            } else {
                parent_gfid(loc)
            }
        }
        (Category::MetadataInode, Addressing::Entry(loc) | Addressing::Inode(loc)) => {
            target_gfid(loc)
        }
        (Category::MetadataDescriptor | Category::DataDescriptor, Addressing::Descriptor(fd)) => {
            fd_gfid(fd)
        }
        _ => Gfid::NULL,
    };

    RoutingKey::new(gfid).ok_or(RouteError::MissingIdentity { kind })
}

fn parent_gfid(loc: &Loc) -> Gfid {
    match &loc.parent {
        Some(parent) if !parent.gfid.is_null() => parent.gfid,
        _ => loc.pargfid,
    }
}

fn target_gfid(loc: &Loc) -> Gfid {
    match &loc.inode {
        Some(inode) if !inode.gfid.is_null() => inode.gfid,
        _ => loc.gfid,
    }
}

fn fd_gfid(fd: &Fd) -> Gfid {
    fd.inode.as_ref().map_or(Gfid::NULL, |inode| inode.gfid)
}
