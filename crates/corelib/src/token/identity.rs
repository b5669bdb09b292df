//! Fixed-width 128-bit identity shared by keys and node ids.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Width of an identity in bytes.
pub const IDENTITY_SIZE: usize = 16;

/// A 16-byte value ordered byte-lexicographically (byte 0 is most
/// significant).
///
/// Ordering is the derived array ordering, which is exactly big-endian
/// unsigned comparison of the 128-bit value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity([u8; IDENTITY_SIZE]);

impl Identity {
    /// The smallest identity (all bytes `0x00`).
    pub const MIN: Identity = Identity([0x00; IDENTITY_SIZE]);
    /// The largest identity (all bytes `0xFF`).
    pub const MAX: Identity = Identity([0xFF; IDENTITY_SIZE]);

    /// Wrap raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Identity(bytes)
    }

    /// Draw a uniformly random identity from the operating system's CSPRNG.
    ///
    /// # Panics
    ///
    /// Panics if the OS entropy source fails. Without entropy no node can
    /// establish an identity or placement, so there is nothing to degrade to.
    pub fn random() -> Self {
        let mut bytes = [0u8; IDENTITY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Identity(bytes)
    }

    /// MD5 digest of the UTF-8 bytes of `input`.
    pub fn from_md5(input: &str) -> Self {
        Identity(md5::compute(input.as_bytes()).0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; IDENTITY_SIZE] {
        &self.0
    }

    /// The identity as a big-endian `u128`.
    #[inline]
    pub fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl From<[u8; IDENTITY_SIZE]> for Identity {
    fn from(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Identity(bytes)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl FromStr for Identity {
    type Err = Error;

    /// Parse exactly 32 hex digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != IDENTITY_SIZE * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidIdentity(s.to_string()));
        }
        let value =
            u128::from_str_radix(s, 16).map_err(|_| Error::InvalidIdentity(s.to_string()))?;
        Ok(Identity(value.to_be_bytes()))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
