//! SHA-256 content digests.
//!
//! Copyright (c) 2025 stylepack contributors

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 256-bit content digest, rendered as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Digest raw bytes.
    pub fn of_bytes(bytes: impl AsRef<[u8]>) -> Self {
        let mut out = [0u8; 32];
        out.copy_from_slice(&Sha256::digest(bytes.as_ref()));
        Self(out)
    }

    /// Digest a string's UTF-8 bytes.
    pub fn of_str(content: &str) -> Self {
        Self::of_bytes(content.as_bytes())
    }

    /// Digest the canonical JSON serialization of `value`.
    ///
    /// Maps must be `BTreeMap`s (or structs) so key order is stable.
    pub fn of_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_vec(value)?;
        Ok(Self::of_bytes(canonical))
    }

    /// Hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ContentDigest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| format!("invalid digest {:?}: {}", s, e))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| format!("digest {:?} is not 32 bytes", s))?;
        Ok(Self(array))
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            ContentDigest::of_str("Hello, world!").to_hex(),
            "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3"
        );
    }

    #[test]
    fn test_parse_roundtrip_and_rejects_bad_input() {
        let digest = ContentDigest::of_str("body {}");
        assert_eq!(digest.to_hex().parse::<ContentDigest>().unwrap(), digest);

        assert!("zz".parse::<ContentDigest>().is_err());
        assert!("abcd".parse::<ContentDigest>().is_err());
    }

    #[test]
    fn test_json_digest_is_key_order_independent() {
        let mut a = BTreeMap::new();
        a.insert("b", 1);
        a.insert("a", 2);
        let mut b = BTreeMap::new();
        b.insert("a", 2);
        b.insert("b", 1);
        assert_eq!(
            ContentDigest::of_json(&a).unwrap(),
            ContentDigest::of_json(&b).unwrap()
        );
    }
}
