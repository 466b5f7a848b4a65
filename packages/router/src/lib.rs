//! RIO request routing.
//!
//! RIO splits a volume into a metadata plane and a data plane, each with its
//! own set of subvolumes. The [`Router`] takes every file operation entering
//! the client and sends it to the one subvolume that owns it:
//!
//! 1. [`classify`] the operation kind into a [`Category`]
//! 2. [`extract`] the [`RoutingKey`](rio_fop::RoutingKey) from its addressing
//! 3. resolve the key on the category's plane
//! 4. forward the operation through a [`Forwarder`]
//! 5. [`normalize`] the reply and complete the caller
//!
//! Each operation is forwarded at most once and its caller completed exactly
//! once. Failures before forwarding complete the caller with a
//! [`RouteError`] and never reach the forwarder.
//!
//! # Example
//!
//! ```rust,ignore
//! use rio_fop::{Addressing, FopKind, Gfid, Inode, Loc, Operation};
//! use rio_router::{Router, RouterConfig};
//!
//! let config = RouterConfig::load("router.json")?;
//! let router = Router::from_config(config, my_forwarder)?;
//!
//! let op = Operation::new(
//!     FopKind::Mkdir,
//!     Addressing::Entry(Loc::entry(Inode::shared(Gfid::ROOT), "docs")),
//! );
//! let reply = router.call(op).await?;
//! ```

mod classify;
mod config;
mod dispatch;
mod error;
mod extract;
mod normalize;
mod pending;
mod router;

pub use classify::{classify, lookup, Category, Classification, ReplyShape, ROUTE_TABLE};
pub use config::{ConfigError, LayoutKind, RouterConfig, SUBVOLUME_SEPARATOR};
pub use dispatch::{Dispatcher, Forwarder};
pub use error::{ForwardError, Result, RouteError};
pub use extract::extract;
pub use normalize::{is_stale, normalize};
pub use pending::{Completion, Continuation, PendingCall};
pub use router::{Route, Router};
