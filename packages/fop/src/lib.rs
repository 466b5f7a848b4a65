//! RIO file operation model.
//!
//! This crate holds the vocabulary shared by every RIO layer. It has no
//! routing logic of its own:
//! - `Gfid` / `RoutingKey`: 128-bit file identities
//! - `FopKind`: the fixed enumeration of filesystem operations
//! - `Addressing`: how an operation names its target (entry, inode, fd)
//! - `Operation`: an immutable request travelling down the graph
//! - `Iatt`: file attributes, with data-plane cleansing
//! - `Reply`: the result travelling back up
//!
//! # Example
//!
//! ```rust
//! use rio_fop::{Addressing, FopKind, Gfid, Inode, Loc, Operation};
//!
//! let parent = Inode::shared(Gfid::ROOT);
//! let op = Operation::new(FopKind::Mkdir, Addressing::Entry(Loc::entry(parent, "docs")));
//! assert_eq!(op.kind.name(), "mkdir");
//! ```

mod errno;
mod gfid;
mod iatt;
mod kind;
mod loc;
mod operation;
mod reply;

pub use errno::Errno;
pub use gfid::{Gfid, RoutingKey};
pub use iatt::{IaType, Iatt};
pub use kind::{FopKind, UnknownFop};
pub use loc::{Addressing, Fd, Inode, Loc};
pub use operation::{Operation, Xdata};
pub use reply::{Reply, ReplyAttrs};

pub use bytes::Bytes;
