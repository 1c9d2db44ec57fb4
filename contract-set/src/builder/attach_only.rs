use super::{Builder, Contract};
use crate::error::Result;
use crate::factory::{Factory, FactoryConstructor};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use web3::types::Address;

/// Attaches to already deployed instances of a contract. Used when nothing can
/// enumerate accounts, so there is no default to deploy with.
pub struct AttachOnly<C: FactoryConstructor> {
    name: Arc<str>,
    constructor: Arc<C>,
    signer: Option<C::Signer>,
}

impl<C: FactoryConstructor> AttachOnly<C> {
    pub fn new(name: &str, constructor: C, signer: Option<C::Signer>) -> Self {
        Self::bind(name, Arc::new(constructor), &(), signer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signer(&self) -> Option<&C::Signer> {
        self.signer.as_ref()
    }

    /// Attaches with `signer`, else the bound signer, else nothing at all.
    pub fn attach(&self, address: Address, signer: Option<C::Signer>) -> Result<Contract<C>> {
        let signer = signer.or_else(|| self.signer.clone());
        debug!(contract = %self.name, ?address, signed = signer.is_some(), "attaching");
        self.constructor.construct(signer)?.attach(address)
    }
}

impl<C: FactoryConstructor> Builder<C> for AttachOnly<C> {
    type Context = ();

    fn bind(name: &str, constructor: Arc<C>, _: &(), signer: Option<C::Signer>) -> Self {
        Self {
            name: name.into(),
            constructor,
            signer,
        }
    }

    fn constructor(&self) -> &Arc<C> {
        &self.constructor
    }
}

impl<C: FactoryConstructor> Clone for AttachOnly<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            constructor: self.constructor.clone(),
            signer: self.signer.clone(),
        }
    }
}

impl<C: FactoryConstructor> fmt::Debug for AttachOnly<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachOnly")
            .field("name", &self.name)
            .field("bound", &self.signer.is_some())
            .finish()
    }
}
