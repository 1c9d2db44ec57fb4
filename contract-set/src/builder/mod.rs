//! Per-contract builders. Every builder in a [`ContractSet`](crate::ContractSet)
//! holds the constructor for its contract and the signer binding the set was
//! created with.

mod attach_only;
mod deploy_or_attach;

pub use attach_only::AttachOnly;
pub use deploy_or_attach::DeployOrAttach;

use crate::factory::{AccountSource, Factory, FactoryConstructor};
use std::fmt;
use std::sync::Arc;

/// The contract instance produced by a constructor's factory.
pub type Contract<C> = <<C as FactoryConstructor>::Factory as Factory>::Contract;

/// The deploy arguments accepted by a constructor's factory.
pub type Args<C> = <<C as FactoryConstructor>::Factory as Factory>::Args;

/// Binds one contract's constructor to a signer. Implemented by the two
/// builder flavours so that sets and generated structs can rebuild them on
/// `connect`.
pub trait Builder<C: FactoryConstructor>: Sized {
    /// State shared by all builders of a set which survives `connect`.
    type Context: Clone;

    fn bind(
        name: &str,
        constructor: Arc<C>,
        context: &Self::Context,
        signer: Option<C::Signer>,
    ) -> Self;

    fn constructor(&self) -> &Arc<C>;
}

/// Where a deploying set gets its signer from when nothing else is given.
pub enum SignerSource<S> {
    /// Ask the runtime for its accounts and use the first one. Enumeration is
    /// deferred until a deploy or attach actually needs it.
    Accounts(Arc<dyn AccountSource<S>>),
    /// A signer or provider fixed up front. No enumeration ever happens.
    Fixed(S),
}

impl<S> SignerSource<S> {
    pub fn accounts(source: impl AccountSource<S> + 'static) -> Self {
        SignerSource::Accounts(Arc::new(source))
    }

    /// Splits into the account source, if any, and the initial signer, if any.
    pub fn into_parts(self) -> (Option<Arc<dyn AccountSource<S>>>, Option<S>) {
        match self {
            SignerSource::Accounts(accounts) => (Some(accounts), None),
            SignerSource::Fixed(signer) => (None, Some(signer)),
        }
    }
}

impl<S: Clone> Clone for SignerSource<S> {
    fn clone(&self) -> Self {
        match self {
            SignerSource::Accounts(accounts) => SignerSource::Accounts(accounts.clone()),
            SignerSource::Fixed(signer) => SignerSource::Fixed(signer.clone()),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for SignerSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerSource::Accounts(_) => f.debug_tuple("Accounts").finish(),
            SignerSource::Fixed(signer) => f.debug_tuple("Fixed").field(signer).finish(),
        }
    }
}
