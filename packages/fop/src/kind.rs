//! The fixed enumeration of file operations.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file operation: {0}")]
pub struct UnknownFop(pub String);

macro_rules! fops {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A filesystem operation kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FopKind {
            $($variant),+
        }

        impl FopKind {
            /// Every operation kind, in declaration order.
            pub const ALL: &'static [FopKind] = &[$(FopKind::$variant),+];

            /// Lowercase operation name, as used in logs and configuration.
            pub fn name(&self) -> &'static str {
                match self {
                    $(FopKind::$variant => $name),+
                }
            }
        }

        impl FromStr for FopKind {
            type Err = UnknownFop;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(FopKind::$variant),)+
                    other => Err(UnknownFop(other.to_string())),
                }
            }
        }
    };
}

fops! {
    Lookup => "lookup",
    Stat => "stat",
    Fstat => "fstat",
    Truncate => "truncate",
    Ftruncate => "ftruncate",
    Access => "access",
    Readlink => "readlink",
    Mknod => "mknod",
    Mkdir => "mkdir",
    Unlink => "unlink",
    Rmdir => "rmdir",
    Symlink => "symlink",
    Rename => "rename",
    Link => "link",
    Create => "create",
    Open => "open",
    Readv => "readv",
    Writev => "writev",
    Flush => "flush",
    Fsync => "fsync",
    Opendir => "opendir",
    Readdir => "readdir",
    Readdirp => "readdirp",
    Fsyncdir => "fsyncdir",
    Statfs => "statfs",
    Setxattr => "setxattr",
    Getxattr => "getxattr",
    Fsetxattr => "fsetxattr",
    Fgetxattr => "fgetxattr",
    Removexattr => "removexattr",
    Fremovexattr => "fremovexattr",
    Lk => "lk",
    Inodelk => "inodelk",
    Finodelk => "finodelk",
    Entrylk => "entrylk",
    Fentrylk => "fentrylk",
    Rchecksum => "rchecksum",
    Xattrop => "xattrop",
    Fxattrop => "fxattrop",
    Setattr => "setattr",
    Fsetattr => "fsetattr",
    Fallocate => "fallocate",
    Discard => "discard",
    Zerofill => "zerofill",
    Ipc => "ipc",
    Seek => "seek",
    Lease => "lease",
    Compound => "compound",
    Getactivelk => "getactivelk",
    Setactivelk => "setactivelk",
    Icreate => "icreate",
    Namelink => "namelink",
    Discover => "discover",
    Getspec => "getspec",
}

impl fmt::Display for FopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
