//! Custom serde helpers for SDK types and Horizon wire formats.

/// Byte fields as lowercase hex strings.
///
/// Works for `Vec<u8>` and fixed arrays alike.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes.as_ref()))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: TryFrom<Vec<u8>>,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let len = bytes.len();
        T::try_from(bytes)
            .map_err(|_| serde::de::Error::custom(format!("unexpected byte length {len}")))
    }
}

/// Stroop amounts shown as decimal strings (`105000000` as `"10.5"`).
pub mod amount {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::amount::{from_network_amount, to_network_amount};

    pub fn serialize<S>(stroops: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&from_network_amount(*stroops))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        to_network_amount(s.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Horizon sends 64-bit integers (sequence numbers, ids) as JSON strings.
pub mod string_i64 {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid integer '{s}': {e}")))
    }
}
