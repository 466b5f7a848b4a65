//! RIO: request routing for a distributed filesystem split into a metadata
//! plane and a data plane.
//!
//! - [`fop`]: operations, file identities, attributes and replies
//! - [`layout`]: planes, subvolumes and layout resolution
//! - [`router`]: classification, dispatch and reply normalization
//!
//! The most used types are re-exported at the crate root.

pub use rio_fop as fop;
pub use rio_layout as layout;
pub use rio_router as router;

pub use rio_fop::{Addressing, Errno, Fd, FopKind, Gfid, Inode, Loc, Operation, Reply};
pub use rio_layout::{BucketLayout, LayoutResolver, Layouts, Plane, Subvolume};
pub use rio_router::{Completion, ForwardError, Forwarder, RouteError, Router, RouterConfig};
