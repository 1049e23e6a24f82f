//! Blocking wrapper around the async [`super::Server`].
//!
//! Each blocking server owns a current-thread tokio runtime and drives the
//! async code to completion on it. Do not call these methods from inside
//! another tokio runtime; use the async server there.

use tokio::runtime::{Builder, Runtime};

use super::error::HorizonError;
use super::server::{self, AccountRecord, TransactionResponse};
use super::transport::{HorizonTransport, HttpTransport};
use crate::account::Account;
use crate::error::Result;
use crate::network::Network;
use crate::transaction::Envelope;

pub struct Server<T = HttpTransport> {
    inner: server::Server<T>,
    runtime: Runtime,
}

impl Server<HttpTransport> {
    pub fn new(horizon_url: &str, network: Network) -> std::result::Result<Self, HorizonError> {
        Self::with_transport(HttpTransport::new(horizon_url)?, network)
    }
}

impl<T: HorizonTransport> Server<T> {
    pub fn with_transport(transport: T, network: Network) -> std::result::Result<Self, HorizonError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HorizonError::Connection(format!("failed to start runtime: {e}")))?;
        Ok(Self {
            inner: server::Server::with_transport(transport, network),
            runtime,
        })
    }

    /// The async server underneath.
    pub fn as_async(&self) -> &server::Server<T> {
        &self.inner
    }

    pub fn submit_transaction(
        &self,
        envelope: &Envelope,
        skip_memo_required_check: bool,
    ) -> Result<TransactionResponse> {
        self.runtime
            .block_on(self.inner.submit_transaction(envelope, skip_memo_required_check))
    }

    pub fn submit_transaction_xdr(
        &self,
        envelope_xdr: &str,
        skip_memo_required_check: bool,
    ) -> Result<TransactionResponse> {
        self.runtime
            .block_on(self.inner.submit_transaction_xdr(envelope_xdr, skip_memo_required_check))
    }

    pub fn account_record(&self, account_id: &str) -> Result<AccountRecord> {
        self.runtime.block_on(self.inner.account_record(account_id))
    }

    pub fn load_account(&self, account_id: &str) -> Result<Account> {
        self.runtime.block_on(self.inner.load_account(account_id))
    }
}
