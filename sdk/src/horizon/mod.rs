//! # Horizon Facade
//!
//! The only part of the SDK that does I/O. It submits envelopes and loads
//! accounts; everything else (building, encoding, signing) happens in the
//! core before anything reaches this module.
//!
//! ```text
//! transport.rs : HorizonTransport trait + reqwest HttpTransport
//! server.rs    : async Server<T>, memo-required pre-flight, account loading
//! blocking.rs  : the same Server driven on a private current-thread runtime
//! error.rs     : HorizonError and Horizon's problem document
//! ```
//!
//! No retries happen here. A failed submission comes back as a
//! [`HorizonError`] carrying the server's problem document, and the caller
//! decides whether resubmitting is safe.

pub mod blocking;
pub mod error;
pub mod server;
pub mod transport;

pub use error::{HorizonError, Problem};
pub use server::{AccountRecord, Server, TransactionResponse};
pub use transport::{HorizonTransport, HttpReply, HttpTransport};
