//! Reply normalization.
//!
//! Data subvolumes keep no authoritative inode metadata: their ownership,
//! link count, device and change time are artefacts of how the data file
//! is stored. Before a data plane reply reaches the caller those fields are
//! cleansed so they cannot be mistaken for the file's real metadata. Size,
//! block counts and data timestamps are kept.

use rio_fop::{Errno, FopKind, Reply, ReplyAttrs};
use rio_layout::Subvolume;
use tracing::{debug, warn};

use crate::classify::ReplyShape;

/// Apply the cleansing `shape` asks for to a reply from `subvolume`.
///
/// Failure replies are returned unchanged. So are replies whose attributes
/// do not have the expected shape. Normalizing twice is the same as once.
pub fn normalize(
    kind: FopKind,
    subvolume: &Subvolume,
    shape: ReplyShape,
    mut reply: Reply,
) -> Reply {
    if !reply.is_success() {
        if is_stale(&reply) {
            warn!(
                fop = %kind,
                %subvolume,
                "stale reply, the layout may have moved; passing it through"
            );
        }
        return reply;
    }

    match (shape, &mut reply.attrs) {
        (ReplyShape::PostOnly, ReplyAttrs::Post(buf)) => buf.cleanse_data(),
        (ReplyShape::PrePost, ReplyAttrs::PrePost { pre, post }) => {
            pre.cleanse_data();
            post.cleanse_data();
        }
        _ => {}
    }
    debug!(fop = %kind, %subvolume, ?shape, "normalized reply");
    reply
}

/// A failure reply saying the subvolume no longer owns the file.
pub fn is_stale(reply: &Reply) -> bool {
    reply.errno() == Some(Errno::ESTALE)
}
