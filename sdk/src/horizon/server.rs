//! Async Horizon facade: submit envelopes, load accounts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::HorizonError;
use super::transport::{HorizonTransport, HttpTransport};
use crate::account::{Account, MuxedAccount, Thresholds};
use crate::config::{MEMO_REQUIRED_DATA_KEY, MEMO_REQUIRED_DATA_VALUE};
use crate::error::Result;
use crate::network::Network;
use crate::signer::Signer;
use crate::transaction::{Envelope, SignableEnvelope};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The transaction resource Horizon returns for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,
    #[serde(default)]
    pub ledger: Option<u32>,
    #[serde(default)]
    pub successful: Option<bool>,
    #[serde(default)]
    pub envelope_xdr: Option<String>,
    #[serde(default)]
    pub result_xdr: Option<String>,
    #[serde(default)]
    pub fee_charged: Option<String>,
}

/// The subset of Horizon's account resource the SDK uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
    #[serde(deserialize_with = "crate::serde_util::string_i64::deserialize")]
    pub sequence: i64,
    pub thresholds: Thresholds,
    #[serde(default)]
    pub signers: Vec<Signer>,
    /// Account data entries, values base64-encoded.
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl AccountRecord {
    /// SEP-29: `config.memo_required` set to `"1"`.
    pub fn requires_memo(&self) -> bool {
        self.data.get(MEMO_REQUIRED_DATA_KEY).map(String::as_str)
            == Some(MEMO_REQUIRED_DATA_VALUE)
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// A Horizon instance reached through `T`.
///
/// `network` is used to parse envelopes handed over as raw XDR.
#[derive(Debug, Clone)]
pub struct Server<T = HttpTransport> {
    transport: T,
    network: Network,
}

impl Server<HttpTransport> {
    pub fn new(horizon_url: &str, network: Network) -> std::result::Result<Self, HorizonError> {
        Ok(Self::with_transport(HttpTransport::new(horizon_url)?, network))
    }
}

impl<T: HorizonTransport> Server<T> {
    pub fn with_transport(transport: T, network: Network) -> Self {
        Self { transport, network }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits `envelope`, running the memo-required pre-flight first unless
    /// `skip_memo_required_check` is set.
    pub async fn submit_transaction(
        &self,
        envelope: &Envelope,
        skip_memo_required_check: bool,
    ) -> Result<TransactionResponse> {
        if !skip_memo_required_check {
            self.check_memo_required(envelope).await?;
        }
        let encoded = envelope.to_xdr()?;
        debug!(hash = %envelope.hash_hex()?, "posting envelope");
        let body = self.transport.submit(&encoded).await?.into_success()?;
        let response: TransactionResponse =
            serde_json::from_str(&body).map_err(HorizonError::from)?;
        info!(hash = %response.hash, ledger = ?response.ledger, "transaction accepted");
        Ok(response)
    }

    /// Same as [`Self::submit_transaction`] for an envelope already in
    /// base64 form. The XDR is parsed only for the memo check and is posted
    /// as given.
    pub async fn submit_transaction_xdr(
        &self,
        envelope_xdr: &str,
        skip_memo_required_check: bool,
    ) -> Result<TransactionResponse> {
        if !skip_memo_required_check {
            let envelope = Envelope::from_xdr(envelope_xdr, self.network.clone())?;
            self.check_memo_required(&envelope).await?;
        }
        let body = self.transport.submit(envelope_xdr).await?.into_success()?;
        Ok(serde_json::from_str(&body).map_err(HorizonError::from)?)
    }

    /// Fetches the raw account resource. `M...` addresses are resolved to
    /// their underlying `G...` account.
    pub async fn account_record(&self, account_id: &str) -> Result<AccountRecord> {
        let account: MuxedAccount = account_id.parse()?;
        let body = self
            .transport
            .account(&account.account_id())
            .await?
            .into_success()?;
        Ok(serde_json::from_str(&body).map_err(HorizonError::from)?)
    }

    /// Current sequence number, thresholds and signers of `account_id`,
    /// ready to feed a [`crate::transaction::TransactionBuilder`].
    pub async fn load_account(&self, account_id: &str) -> Result<Account> {
        let account: MuxedAccount = account_id.parse()?;
        let record = self.account_record(account_id).await?;
        debug!(account = %record.account_id, sequence = record.sequence, "loaded account");
        Ok(Account {
            account,
            sequence: record.sequence,
            thresholds: Some(record.thresholds),
            signers: record.signers,
        })
    }

    /// SEP-29 pre-flight.
    ///
    /// Only runs when the memo is `None`. Fee bumps are checked through
    /// their inner transaction. Destinations that do not exist yet are
    /// skipped; any other lookup failure aborts the submission.
    pub async fn check_memo_required(
        &self,
        envelope: &Envelope,
    ) -> std::result::Result<(), HorizonError> {
        let tx = envelope.inner_transaction();
        if !tx.memo.is_none() {
            return Ok(());
        }

        for (operation_index, destination) in tx.memo_required_destinations() {
            let account_id = destination.account_id();
            let reply = self.transport.account(&account_id).await?;
            if reply.status == 404 {
                debug!(%account_id, "destination not found, skipping memo check");
                continue;
            }
            let record: AccountRecord = serde_json::from_str(&reply.into_success()?)?;
            if record.requires_memo() {
                warn!(%account_id, operation_index, "destination requires a memo");
                return Err(HorizonError::AccountRequiresMemo {
                    account_id,
                    operation_index,
                });
            }
            debug!(%account_id, "destination does not require a memo");
        }
        Ok(())
    }
}
