//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! client.

// Crypto constants
/// SM2 public key of the backend counterpart, uncompressed SEC1 point
/// encoding (leading `04`). The matching private key never leaves the
/// backend. Overridable at startup via configuration.
pub const SM2_PUBLIC_KEY: &str = "04535ae65ad7809a9600fa58ca27cda8785dfb964f566d61365d64f3b4307208a42cf5202aa0e7f163216c69f37f0e71287d573d88351bc794dba78d5e6abc2bd8";

/// Distinguishing identifier used for SM2 signatures (GB/T 32918 default).
/// Both ends of a deployment must agree on this value.
pub const SM2_DIST_ID: &str = "1234567812345678";

// Request client configuration
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;

// Application shell configuration
pub const DEFAULT_BASE_PATH: &str = "/chameleon/";

// Upload constraints enforced before anything leaves the client
pub const MAX_UPLOAD_BYTES: usize = 6 * 1024 * 1024;
pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
