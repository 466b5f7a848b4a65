//! RIO layouts.
//!
//! A layout maps a file identity to the subvolume that owns it. RIO keeps two
//! independent layouts, one per plane:
//! - the metadata layout, for naming, attributes and locks
//! - the data layout, for file content
//!
//! The router only ever queries layouts through [`LayoutResolver`]. How a
//! layout is partitioned or rebalanced is up to the implementation;
//! [`BucketLayout`] is the bundled static one.
//!
//! # Example
//!
//! ```rust
//! use rio_fop::{Gfid, RoutingKey};
//! use rio_layout::{BucketLayout, LayoutResolver, Plane};
//!
//! let layout = BucketLayout::new(Plane::Data, ["ds-0", "ds-1"]).unwrap();
//! let key = RoutingKey::new(Gfid::generate()).unwrap();
//! let owner = layout.resolve(&key).unwrap();
//! assert_eq!(owner.plane(), Plane::Data);
//! ```

mod bucket;
mod error;
mod resolver;
mod subvolume;

pub use bucket::{BucketLayout, BUCKET_COUNT};
pub use error::LayoutError;
pub use resolver::{LayoutResolver, Layouts};
pub use subvolume::{Plane, Subvolume};
