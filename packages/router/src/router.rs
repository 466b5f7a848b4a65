//! The routing state machine.

use std::sync::Arc;

use rio_fop::{Addressing, Operation, Reply, RoutingKey};
use rio_layout::{Layouts, Subvolume};
use tracing::{debug, error, info};

use crate::classify::{lookup, Category, ReplyShape};
use crate::config::{ConfigError, RouterConfig};
use crate::dispatch::{Dispatcher, Forwarder};
use crate::error::{Result, RouteError};
use crate::extract::extract;
use crate::pending::Completion;

/// Where an operation goes, and how its reply comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub category: Category,
    pub shape: ReplyShape,
    pub key: RoutingKey,
    pub subvolume: Subvolume,
}

/// Routes each operation to the one subvolume that owns it.
///
/// Classification, key extraction and layout resolution happen synchronously
/// in [`Router::submit`]; only the forwarded call itself runs asynchronously.
/// A routing failure completes the caller right away without touching the
/// forwarder.
///
/// The router holds no per-operation state and is shared through `&self`.
#[derive(Debug, Clone)]
pub struct Router {
    layouts: Layouts,
    dispatcher: Dispatcher,
    config: Arc<RouterConfig>,
}

impl Router {
    pub fn new<F: Forwarder + 'static>(
        layouts: Layouts,
        forwarder: F,
        config: RouterConfig,
    ) -> Self {
        Self {
            layouts,
            dispatcher: Dispatcher::new(forwarder),
            config: Arc::new(config),
        }
    }

    /// Build the configured layouts and a router over them.
    pub fn from_config<F: Forwarder + 'static>(
        config: RouterConfig,
        forwarder: F,
    ) -> std::result::Result<Self, ConfigError> {
        let layouts = config.build_layouts()?;
        info!(
            metadata = %config.metadata_subvolumes,
            data = %config.data_subvolumes,
            layout = ?config.layout,
            "router configured"
        );
        Ok(Self::new(layouts, forwarder, config))
    }

    pub fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Decide where `operation` goes without dispatching it.
    pub fn route(&self, operation: &Operation) -> Result<Route> {
        let kind = operation.kind;
        let row = lookup(kind);

        let Some(plane) = row.category.plane() else {
            debug!(fop = %kind, "operation not supported");
            return Err(RouteError::NotSupported { kind });
        };

        let key = extract(operation, row.category).inspect_err(|e| {
            if let RouteError::MissingIdentity { .. } = e {
                match &operation.addressing {
                    Addressing::Entry(loc) | Addressing::Inode(loc) => {
                        error!(fop = %kind, %loc, "missing gfid")
                    }
                    Addressing::Descriptor(fd) => {
                        error!(fop = %kind, flags = fd.flags, "missing gfid on fd")
                    }
                }
            }
        })?;

        let Some(subvolume) = self.layouts.resolve(plane, &key) else {
            error!(fop = %kind, %plane, gfid = %key, "unable to find subvolume");
            return Err(RouteError::UnresolvedSubvolume { plane, key });
        };

        Ok(Route {
            category: row.category,
            shape: row.shape,
            key,
            subvolume,
        })
    }

    /// Route and forward `operation`.
    ///
    /// Must be called from within a tokio runtime for the forwarded call to
    /// run; the returned completion resolves exactly once.
    pub fn submit(&self, operation: Operation) -> Completion {
        let kind = operation.kind;
        let route = match self.route(&operation) {
            Ok(route) => route,
            Err(e) => return Completion::failed(kind, e),
        };

        if self.config.debug {
            info!(fop = %kind, gfid = %route.key, subvolume = %route.subvolume, "dispatching");
        } else {
            debug!(fop = %kind, gfid = %route.key, subvolume = %route.subvolume, "dispatching");
        }

        self.dispatcher.dispatch(operation, route.subvolume, route.shape)
    }

    /// Route and forward `operation`, then wait for its reply.
    pub async fn call(&self, operation: Operation) -> Result<Reply> {
        self.submit(operation).await
    }
}
