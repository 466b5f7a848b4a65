//! POSIX error numbers carried in replies.

use std::fmt;

/// An error number as returned by a subvolume or produced by the router.
///
/// Values follow Linux numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Errno(pub i32);

impl Errno {
    pub const NONE: Errno = Errno(0);
    pub const ENOENT: Errno = Errno(2);
    pub const EIO: Errno = Errno(5);
    pub const EBADF: Errno = Errno(9);
    pub const ENOMEM: Errno = Errno(12);
    pub const EINVAL: Errno = Errno(22);
    pub const ENODATA: Errno = Errno(61);
    pub const EREMOTE: Errno = Errno(66);
    pub const ENOTSUP: Errno = Errno(95);
    pub const ENOTCONN: Errno = Errno(107);
    /// Also returned when the subvolume no longer owns the file.
    pub const ESTALE: Errno = Errno(116);

    pub fn code(&self) -> i32 {
        self.0
    }

    fn symbol(&self) -> Option<&'static str> {
        Some(match *self {
            Errno::NONE => "0",
            Errno::ENOENT => "ENOENT",
            Errno::EIO => "EIO",
            Errno::EBADF => "EBADF",
            Errno::ENOMEM => "ENOMEM",
            Errno::EINVAL => "EINVAL",
            Errno::ENODATA => "ENODATA",
            Errno::EREMOTE => "EREMOTE",
            Errno::ENOTSUP => "ENOTSUP",
            Errno::ENOTCONN => "ENOTCONN",
            Errno::ESTALE => "ESTALE",
            _ => return None,
        })
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => write!(f, "errno {}", self.0),
        }
    }
}

impl From<i32> for Errno {
    fn from(code: i32) -> Self {
        Errno(code)
    }
}
