//! # Networks
//!
//! A network is named by its passphrase, and identified on the wire by
//! `SHA256(passphrase)`. The network ID is the first thing hashed into every
//! signature base, so a transaction signed for testnet is worthless on the
//! public network, and vice versa.
//!
//! | Network | Passphrase |
//! |---------|------------|
//! | Public  | `"Public Global Stellar Network ; September 2015"` |
//! | Testnet | `"Test SDF Network ; September 2015"` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{
    PUBLIC_HORIZON_URL, PUBLIC_NETWORK_PASSPHRASE, TESTNET_HORIZON_URL,
    TESTNET_NETWORK_PASSPHRASE,
};
use crate::crypto::sha256;

/// A Stellar network: passphrase plus the derived 32-byte ID.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NetworkRepr", into = "NetworkRepr")]
pub struct Network {
    passphrase: String,
    id: [u8; 32],
}

impl Network {
    pub fn new(passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        let id = sha256(passphrase.as_bytes());
        Self { passphrase, id }
    }

    pub fn public() -> Self {
        Self::new(PUBLIC_NETWORK_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_NETWORK_PASSPHRASE)
    }

    /// `"public"` and `"testnet"` (also `"pubnet"`, `"mainnet"`) select the
    /// well-known networks; anything else is taken as a custom passphrase.
    pub fn from_name_or_passphrase(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "public" | "pubnet" | "mainnet" => Self::public(),
            "testnet" | "test" => Self::testnet(),
            _ => Self::new(value),
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn network_id(&self) -> &[u8; 32] {
        &self.id
    }

    /// SDF's Horizon for the well-known networks, `None` for custom ones.
    pub fn default_horizon_url(&self) -> Option<&'static str> {
        match self.passphrase.as_str() {
            PUBLIC_NETWORK_PASSPHRASE => Some(PUBLIC_HORIZON_URL),
            TESTNET_NETWORK_PASSPHRASE => Some(TESTNET_HORIZON_URL),
            _ => None,
        }
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network({:?})", self.passphrase)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.passphrase)
    }
}

#[derive(Serialize, Deserialize)]
struct NetworkRepr {
    passphrase: String,
}

impl From<NetworkRepr> for Network {
    fn from(repr: NetworkRepr) -> Self {
        Network::new(repr.passphrase)
    }
}

impl From<Network> for NetworkRepr {
    fn from(network: Network) -> Self {
        NetworkRepr {
            passphrase: network.passphrase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnet_id() {
        assert_eq!(
            hex::encode(Network::testnet().network_id()),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn test_public_id() {
        assert_eq!(
            hex::encode(Network::public().network_id()),
            "7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979"
        );
    }

    #[test]
    fn test_custom_network() {
        let custom = Network::new("Standalone Network ; February 2017");
        assert_ne!(custom, Network::testnet());
        assert_eq!(custom.default_horizon_url(), None);
        assert_eq!(custom.passphrase(), "Standalone Network ; February 2017");
    }

    #[test]
    fn test_names_resolve() {
        assert_eq!(Network::from_name_or_passphrase("TESTNET"), Network::testnet());
        assert_eq!(Network::from_name_or_passphrase("public"), Network::public());
        assert_eq!(
            Network::public().default_horizon_url(),
            Some("https://horizon.stellar.org")
        );
    }

    #[test]
    fn test_serde_keeps_only_passphrase() {
        let json = serde_json::to_string(&Network::testnet()).unwrap();
        assert_eq!(json, r#"{"passphrase":"Test SDF Network ; September 2015"}"#);
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Network::testnet());
    }
}
