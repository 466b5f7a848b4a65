//! Operations: the requests the router receives.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::{Addressing, FopKind};

/// Opaque extra data carried with requests and replies.
pub type Xdata = BTreeMap<String, Bytes>;

/// A filesystem request.
///
/// The payload holds the kind-specific arguments (offsets, modes, buffers,
/// ...). The router never looks inside it; it only reads `kind` and
/// `addressing` and forwards everything else unchanged.
#[derive(Debug, Clone)]
pub struct Operation {
    pub kind: FopKind,
    pub addressing: Addressing,
    pub payload: Bytes,
    pub xdata: Xdata,
}

impl Operation {
    pub fn new(kind: FopKind, addressing: Addressing) -> Self {
        Self {
            kind,
            addressing,
            payload: Bytes::new(),
            xdata: Xdata::new(),
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_xdata(mut self, xdata: Xdata) -> Self {
        self.xdata = xdata;
        self
    }
}
