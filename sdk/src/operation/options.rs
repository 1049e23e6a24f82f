//! `SetOptions`: every field optional, only the set ones change.

use serde::{Deserialize, Serialize};

use super::{operation_kind, OperationError};
use crate::config::HOME_DOMAIN_MAX_BYTES;
use crate::crypto::PublicKey;
use crate::signer::Signer;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

/// Account flag bits for `set_flags` / `clear_flags`.
pub mod flags {
    pub const AUTH_REQUIRED: u32 = 0x1;
    pub const AUTH_REVOCABLE: u32 = 0x2;
    pub const AUTH_IMMUTABLE: u32 = 0x4;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_destination: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_flags: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flags: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub med_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_domain: Option<String>,
    /// Weight 0 removes the signer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<Signer>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inflation_destination(mut self, account: PublicKey) -> Self {
        self.inflation_destination = Some(account);
        self
    }

    pub fn clear_flags(mut self, flags: u32) -> Self {
        self.clear_flags = Some(flags);
        self
    }

    pub fn set_flags(mut self, flags: u32) -> Self {
        self.set_flags = Some(flags);
        self
    }

    pub fn master_weight(mut self, weight: u8) -> Self {
        self.master_weight = Some(weight.into());
        self
    }

    pub fn thresholds(mut self, low: u8, med: u8, high: u8) -> Self {
        self.low_threshold = Some(low.into());
        self.med_threshold = Some(med.into());
        self.high_threshold = Some(high.into());
        self
    }

    pub fn home_domain(mut self, domain: impl Into<String>) -> Result<Self, OperationError> {
        let domain = domain.into();
        if domain.len() > HOME_DOMAIN_MAX_BYTES {
            return Err(OperationError::HomeDomainTooLong(domain.len()));
        }
        self.home_domain = Some(domain);
        Ok(self)
    }

    pub fn signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }
}

impl XdrEncode for SetOptions {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_optional(self.inflation_destination.as_ref())?;
        writer.write_optional(self.clear_flags.as_ref())?;
        writer.write_optional(self.set_flags.as_ref())?;
        writer.write_optional(self.master_weight.as_ref())?;
        writer.write_optional(self.low_threshold.as_ref())?;
        writer.write_optional(self.med_threshold.as_ref())?;
        writer.write_optional(self.high_threshold.as_ref())?;
        match &self.home_domain {
            Some(domain) => {
                writer.write_bool(true);
                writer.write_string(domain, HOME_DOMAIN_MAX_BYTES)?;
            }
            None => writer.write_bool(false),
        }
        writer.write_optional(self.signer.as_ref())
    }
}

impl XdrDecode for SetOptions {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            inflation_destination: reader.read_optional()?,
            clear_flags: reader.read_optional()?,
            set_flags: reader.read_optional()?,
            master_weight: reader.read_optional()?,
            low_threshold: reader.read_optional()?,
            med_threshold: reader.read_optional()?,
            high_threshold: reader.read_optional()?,
            home_domain: if reader.read_bool()? {
                Some(reader.read_string(HOME_DOMAIN_MAX_BYTES)?)
            } else {
                None
            },
            signer: reader.read_optional()?,
        })
    }
}

operation_kind!(SetOptions);
