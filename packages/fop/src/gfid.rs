//! File identities.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// A 128-bit globally unique file identity.
///
/// The all-zero value is the sentinel for "absent" and never names a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Gfid(Uuid);

impl Gfid {
    /// The "absent" sentinel.
    pub const NULL: Gfid = Gfid(Uuid::nil());

    /// Identity of the volume root directory.
    pub const ROOT: Gfid = Gfid(Uuid::from_u128(1));

    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Gfid(Uuid::new_v4())
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Gfid(Uuid::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for Gfid {
    fn from(uuid: Uuid) -> Self {
        Gfid(uuid)
    }
}

impl FromStr for Gfid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Gfid)
    }
}

impl fmt::Display for Gfid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A GFID that is known not to be the null sentinel.
///
/// Layouts are only ever queried with a `RoutingKey`, so the "never all-zero
/// when used for lookup" invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutingKey(Gfid);

impl RoutingKey {
    /// Returns `None` for the null GFID.
    pub fn new(gfid: Gfid) -> Option<Self> {
        if gfid.is_null() {
            None
        } else {
            Some(RoutingKey(gfid))
        }
    }

    pub fn gfid(&self) -> Gfid {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
