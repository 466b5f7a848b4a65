//! Replies from forwarded operations.

use bytes::Bytes;

use crate::{Errno, Iatt, Xdata};

/// Attribute structures embedded in a reply.
///
/// The shape depends on the operation kind; the router only cleanses the
/// `Post` and `PrePost` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyAttrs {
    #[default]
    None,
    /// Attributes after the operation (e.g. readv, stat).
    Post(Iatt),
    /// Attributes before and after a modifying operation (e.g. writev).
    PrePost { pre: Iatt, post: Iatt },
    /// Lookup result: the inode and its parent after the call.
    Lookup { buf: Iatt, postparent: Iatt },
    /// Entry creation result: the new inode and its parent around the call.
    Entry {
        buf: Iatt,
        preparent: Iatt,
        postparent: Iatt,
    },
}

/// The result of a forwarded operation.
///
/// `op_ret` is negative on failure, in which case `op_errno` says why. On
/// success `op_ret` is kind-specific (bytes read, 0, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub op_ret: i32,
    pub op_errno: Errno,
    pub attrs: ReplyAttrs,
    pub payload: Bytes,
    pub xdata: Xdata,
}

impl Reply {
    pub fn success(op_ret: i32) -> Self {
        Self {
            op_ret,
            op_errno: Errno::NONE,
            attrs: ReplyAttrs::None,
            payload: Bytes::new(),
            xdata: Xdata::new(),
        }
    }

    pub fn failure(errno: Errno) -> Self {
        Self {
            op_ret: -1,
            op_errno: errno,
            attrs: ReplyAttrs::None,
            payload: Bytes::new(),
            xdata: Xdata::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: ReplyAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_xdata(mut self, xdata: Xdata) -> Self {
        self.xdata = xdata;
        self
    }

    pub fn is_success(&self) -> bool {
        self.op_ret >= 0
    }

    /// The error number of a failed reply.
    pub fn errno(&self) -> Option<Errno> {
        if self.is_success() {
            None
        } else {
            Some(self.op_errno)
        }
    }
}
