//! # Protocol Configuration & Constants
//!
//! Every magic number the SDK depends on lives here. Most of them are fixed
//! by the Stellar protocol's XDR schema, which means changing them doesn't
//! make the SDK more flexible, it makes it produce transactions that
//! validators reject.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Passphrase of the public (main) network.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the SDF test network.
pub const TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Horizon instance run by SDF for the public network.
pub const PUBLIC_HORIZON_URL: &str = "https://horizon.stellar.org";

/// Horizon instance run by SDF for the test network.
pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

// ---------------------------------------------------------------------------
// Fees & amounts
// ---------------------------------------------------------------------------

/// Minimum fee per operation, in stroops.
pub const BASE_FEE: u32 = 100;

/// Number of decimal places carried by every asset amount.
pub const AMOUNT_DECIMALS: u32 = 7;

/// One whole unit of an asset, in stroops (10^7).
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Largest representable amount, in stroops.
pub const MAX_AMOUNT_STROOPS: i64 = i64::MAX;

// ---------------------------------------------------------------------------
// XDR limits
// ---------------------------------------------------------------------------

/// `Operation operations<100>` in `Transaction`.
pub const MAX_OPERATIONS: usize = 100;

/// `DecoratedSignature signatures<20>` in every envelope.
pub const MAX_SIGNATURES: usize = 20;

/// `string text<28>` in `Memo`.
pub const MEMO_TEXT_MAX_BYTES: usize = 28;

/// `Asset path<5>` in both path payment operations.
pub const MAX_PATH_LENGTH: usize = 5;

/// `string32 homeDomain` in `SetOptionsOp`.
pub const HOME_DOMAIN_MAX_BYTES: usize = 32;

/// `string64 dataName` in `ManageDataOp`.
pub const DATA_NAME_MAX_BYTES: usize = 64;

/// `opaque DataValue<64>` in `ManageDataOp`.
pub const DATA_VALUE_MAX_BYTES: usize = 64;

/// `opaque Signature<64>`; also the Ed25519 signature size.
pub const SIGNATURE_MAX_BYTES: usize = 64;

/// Signature hints are the last four bytes of the signer key.
pub const SIGNATURE_HINT_LENGTH: usize = 4;

/// Asset codes are 1 to 12 alphanumeric characters.
pub const ASSET_CODE_MAX_LENGTH: usize = 12;

/// Codes up to this length use the `CREDIT_ALPHANUM4` encoding.
pub const ASSET_CODE4_MAX_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

/// Account data key checked by the SEP-29 memo-required pre-flight.
pub const MEMO_REQUIRED_DATA_KEY: &str = "config.memo_required";

/// Base64 of `"1"`: the value that turns the memo requirement on.
pub const MEMO_REQUIRED_DATA_VALUE: &str = "MQ==";

/// Request timeout for the HTTP transport.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// `max_time` value meaning "no upper bound".
pub const TIMEOUT_INFINITE: u64 = 0;
