// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-size digest of a fingerprint string.
//!
//! Fingerprints of deep types get long; the versioning step may record this
//! 16-byte MD5 digest instead of the full text. Equal fingerprints always
//! produce equal digests.

use std::fmt;
use std::str::FromStr;

use hex::FromHexError;
use md5::{Digest, Md5};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DigestError;

const DIGEST_LEN: usize = 16;

/// MD5 digest of a fingerprint, rendered as lower-case hex.
///
/// # Example
///
/// ```
/// use shapehash::FingerprintDigest;
///
/// let digest = FingerprintDigest::compute("System.String-City|System.String-Street");
/// let parsed: FingerprintDigest = digest.to_string().parse().unwrap();
/// assert_eq!(digest, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FingerprintDigest([u8; DIGEST_LEN]);

impl FingerprintDigest {
    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Digest the UTF-8 bytes of `fingerprint`.
    pub fn compute(fingerprint: &str) -> Self {
        let mut hasher = Md5::new();
        hasher.update(fingerprint.as_bytes());
        let result = hasher.finalize();

        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&result[..DIGEST_LEN]);
        Self(bytes)
    }
}

impl fmt::Debug for FingerprintDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FingerprintDigest({})", self)
    }
}

impl fmt::Display for FingerprintDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for FingerprintDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| match e {
            FromHexError::InvalidHexCharacter { c, .. } => DigestError::InvalidHex(c),
            _ => DigestError::InvalidLength {
                expected: DIGEST_LEN * 2,
                found: s.len(),
            },
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for FingerprintDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FingerprintDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<[u8; DIGEST_LEN]> for FingerprintDigest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for FingerprintDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
