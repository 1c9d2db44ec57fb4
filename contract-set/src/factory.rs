use crate::error::Result;
use async_trait::async_trait;
use web3::types::Address;

/// Something that knows how to produce a [`Factory`] for one contract type,
/// optionally bound to a signer. A compiled artifact is the usual example.
///
/// The `Signer` may be anything able to sign or read: a node-managed account,
/// a wallet, or a read-only provider handle.
pub trait FactoryConstructor: Send + Sync {
    type Signer: Clone + Send + Sync + 'static;
    type Factory: Factory<Signer = Self::Signer>;

    fn construct(&self, signer: Option<Self::Signer>) -> Result<Self::Factory>;
}

#[async_trait(?Send)]
pub trait Factory: Send + Sync {
    type Signer;
    type Args: Send;
    type Contract: Connect<Self::Signer> + Send;

    async fn deploy(&self, args: Self::Args) -> Result<Self::Contract>;

    fn attach(&self, address: Address) -> Result<Self::Contract>;
}

/// Rebinds a contract instance to another signer or provider. The original
/// instance is left untouched.
pub trait Connect<S>: Sized {
    fn connect(&self, signer: S) -> Result<Self>;
}

/// Enumerates the signers available in the current runtime, the first of which
/// is treated as the default.
#[async_trait(?Send)]
pub trait AccountSource<S>: Send + Sync {
    async fn get_signers(&self) -> Result<Vec<S>>;
}
