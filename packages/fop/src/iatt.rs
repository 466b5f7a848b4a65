//! File attributes and data-plane cleansing.

use crate::Gfid;

/// File type as reported in attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IaType {
    #[default]
    Invalid,
    Regular,
    Directory,
    Symlink,
    Block,
    Char,
    Fifo,
    Socket,
}

/// File attributes returned by a subvolume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Iatt {
    pub gfid: Gfid,
    pub ino: u64,
    pub dev: u64,
    pub ia_type: IaType,
    /// Permission bits.
    pub prot: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub size: u64,
    pub blksize: u32,
    pub blocks: u64,
    pub atime: i64,
    pub atime_nsec: u32,
    pub mtime: i64,
    pub mtime_nsec: u32,
    pub ctime: i64,
    pub ctime_nsec: u32,
}

impl Iatt {
    /// Strip the fields a data subvolume must not report to its caller.
    ///
    /// A data subvolume is authoritative for the file's content: size, block
    /// usage, and access/modification times. Its device, inode number, link
    /// count and rdev describe its private backing object, and ownership,
    /// permissions and ctime belong to the metadata plane. Those are reset.
    ///
    /// Idempotent.
    pub fn cleanse_data(&mut self) {
        self.dev = 0;
        self.ino = 0;
        self.nlink = 0;
        self.rdev = 0;
        self.uid = 0;
        self.gid = 0;
        self.prot = 0;
        self.ctime = 0;
        self.ctime_nsec = 0;
    }

    /// Copy of these attributes after [`Iatt::cleanse_data`].
    pub fn cleansed_data(mut self) -> Self {
        self.cleanse_data();
        self
    }
}
