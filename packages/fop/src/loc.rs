//! Operation addressing: locations, in-memory inodes and descriptors.

use std::fmt;
use std::sync::Arc;

use crate::Gfid;

/// The in-memory file object an operation may already have resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub gfid: Gfid,
}

impl Inode {
    pub fn new(gfid: Gfid) -> Self {
        Self { gfid }
    }

    /// Create an inode behind an `Arc`, the form locations and fds hold.
    pub fn shared(gfid: Gfid) -> Arc<Self> {
        Arc::new(Self::new(gfid))
    }
}

/// A location: either a name under a parent, or a file identity, or both.
///
/// Resolved in-memory objects (`parent`, `inode`) are preferred over the raw
/// identity fields (`pargfid`, `gfid`) carried alongside them.
#[derive(Debug, Clone, Default)]
pub struct Loc {
    pub path: Option<String>,
    pub name: Option<String>,
    pub parent: Option<Arc<Inode>>,
    pub pargfid: Gfid,
    pub inode: Option<Arc<Inode>>,
    pub gfid: Gfid,
}

impl Loc {
    /// A named location under a resolved parent.
    pub fn entry(parent: Arc<Inode>, name: impl Into<String>) -> Self {
        Self {
            pargfid: parent.gfid,
            parent: Some(parent),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// A named location under a parent known only by its raw GFID.
    pub fn under(pargfid: Gfid, name: impl Into<String>) -> Self {
        Self {
            pargfid,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// A nameless location of a resolved inode.
    pub fn of_inode(inode: Arc<Inode>) -> Self {
        Self {
            gfid: inode.gfid,
            inode: Some(inode),
            ..Default::default()
        }
    }

    /// A nameless location known only by its raw GFID.
    pub fn of_gfid(gfid: Gfid) -> Self {
        Self {
            gfid,
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_inode(mut self, inode: Arc<Inode>) -> Self {
        self.inode = Some(inode);
        self
    }

    pub fn with_gfid(mut self, gfid: Gfid) -> Self {
        self.gfid = gfid;
        self
    }

    /// True when the location is not addressed by a name under a parent.
    ///
    /// That is the case without a name, or with neither a parent inode nor a
    /// raw parent GFID. A parent inode whose GFID is still null does count as
    /// a parent: the location is named, it just cannot be resolved yet.
    pub fn is_nameless(&self) -> bool {
        self.name.is_none() || (self.parent.is_none() && self.pargfid.is_null())
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name={} path={} pargfid={} gfid={}",
            self.name.as_deref().unwrap_or("NULL"),
            self.path.as_deref().unwrap_or("NULL"),
            self.pargfid,
            self.gfid
        )
    }
}

/// An open file descriptor.
///
/// The underlying file object may not be known yet (anonymous fds).
#[derive(Debug, Clone, Default)]
pub struct Fd {
    pub inode: Option<Arc<Inode>>,
    pub flags: i32,
}

impl Fd {
    pub fn new(inode: Arc<Inode>) -> Self {
        Self {
            inode: Some(inode),
            flags: 0,
        }
    }

    /// An fd with no associated file object.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }
}

/// How an operation addresses its target.
#[derive(Debug, Clone)]
pub enum Addressing {
    /// A name under a parent directory.
    Entry(Loc),
    /// A file by identity.
    Inode(Loc),
    /// An already-opened file.
    Descriptor(Fd),
}

impl Addressing {
    pub fn loc(&self) -> Option<&Loc> {
        match self {
            Addressing::Entry(loc) | Addressing::Inode(loc) => Some(loc),
            Addressing::Descriptor(_) => None,
        }
    }

    pub fn fd(&self) -> Option<&Fd> {
        match self {
            Addressing::Descriptor(fd) => Some(fd),
            _ => None,
        }
    }
}

impl fmt::Display for Addressing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addressing::Entry(loc) => write!(f, "entry({})", loc),
            Addressing::Inode(loc) => write!(f, "inode({})", loc),
            Addressing::Descriptor(fd) => match &fd.inode {
                Some(inode) => write!(f, "fd(gfid={})", inode.gfid),
                None => write!(f, "fd(no inode)"),
            },
        }
    }
}
