//! Printable account addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::keyring::{KeyringError, KeyringResult};

/// Account address: the 32-byte Ed25519 public key, printed as 0x-hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Wrap a raw public key.
    pub fn from_public(public: [u8; 32]) -> Self {
        Self(public)
    }

    /// The raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = KeyringError;

    fn from_str(s: &str) -> KeyringResult<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|_| KeyringError::InvalidAddress(s.to_string()))?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| KeyringError::InvalidAddress(s.to_string()))?;
        Ok(Self(raw))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let address = Address::from_public([7u8; 32]);
        let printed = address.to_string();
        assert!(printed.starts_with("0x"));
        assert_eq!(printed.len(), 66);
        assert_eq!(printed.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_parse_without_prefix() {
        let address = Address::from_public([1u8; 32]);
        let bare = hex::encode(address.as_bytes());
        assert_eq!(bare.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("0xzz".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("".parse::<Address>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let address = Address::from_public([9u8; 32]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{address}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
