pub use anyhow::{anyhow, Error, Result};

/// Returned when account enumeration succeeds but yields nothing to use as the
/// default signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("account enumeration returned no signers")]
pub struct NoSigners;
