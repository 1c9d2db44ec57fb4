use super::{Args, Builder, Contract, SignerSource};
use crate::error::{NoSigners, Result};
use crate::factory::{AccountSource, Connect, Factory, FactoryConstructor};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use web3::types::Address;

/// Deploys new instances of a contract or attaches to existing ones.
///
/// Without an explicit signer the builder falls back to its bound signer, and
/// when it has none of those either, to the first account of its
/// [`AccountSource`]. Enumeration happens at call time, never at construction.
pub struct DeployOrAttach<C: FactoryConstructor> {
    name: Arc<str>,
    constructor: Arc<C>,
    signer: Option<C::Signer>,
    accounts: Option<Arc<dyn AccountSource<C::Signer>>>,
}

impl<C: FactoryConstructor> DeployOrAttach<C> {
    pub fn new(name: &str, constructor: C, source: SignerSource<C::Signer>) -> Self {
        let (accounts, signer) = source.into_parts();
        Self::bind(name, Arc::new(constructor), &accounts, signer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signer this builder was bound to, if any.
    pub fn signer(&self) -> Option<&C::Signer> {
        self.signer.as_ref()
    }

    /// Deploys a fresh instance using the bound signer, or the first
    /// enumerated account when unbound.
    pub async fn deploy(&self, args: Args<C>) -> Result<Contract<C>> {
        let signer = match &self.signer {
            Some(signer) => signer.clone(),
            None => self.default_signer().await?,
        };
        debug!(contract = %self.name, "deploying");
        let factory = self.constructor.construct(Some(signer))?;
        factory.deploy(args).await
    }

    /// Attaches to a deployed instance at `address`.
    ///
    /// `signer` takes precedence over the bound signer. When the builder has no
    /// account source, the instance is attached unsigned and then connected to
    /// the resolved signer or provider. That path has no await point, so the
    /// returned future completes on its first poll.
    pub async fn attach(&self, address: Address, signer: Option<C::Signer>) -> Result<Contract<C>> {
        let signer = signer.or_else(|| self.signer.clone());
        debug!(contract = %self.name, ?address, "attaching");

        if self.accounts.is_some() {
            let signer = match signer {
                Some(signer) => signer,
                None => self.default_signer().await?,
            };
            return self.constructor.construct(Some(signer))?.attach(address);
        }

        let contract = self.constructor.construct(None)?.attach(address)?;
        match signer {
            Some(signer) => contract.connect(signer),
            None => Ok(contract),
        }
    }

    async fn default_signer(&self) -> Result<C::Signer> {
        let accounts = self.accounts.as_ref().ok_or(NoSigners)?;
        trace!(contract = %self.name, "enumerating accounts for default signer");
        let signers = accounts.get_signers().await?;
        signers.into_iter().next().ok_or_else(|| NoSigners.into())
    }
}

impl<C: FactoryConstructor> Builder<C> for DeployOrAttach<C> {
    type Context = Option<Arc<dyn AccountSource<C::Signer>>>;

    fn bind(
        name: &str,
        constructor: Arc<C>,
        context: &Self::Context,
        signer: Option<C::Signer>,
    ) -> Self {
        Self {
            name: name.into(),
            constructor,
            signer,
            accounts: context.clone(),
        }
    }

    fn constructor(&self) -> &Arc<C> {
        &self.constructor
    }
}

impl<C: FactoryConstructor> Clone for DeployOrAttach<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            constructor: self.constructor.clone(),
            signer: self.signer.clone(),
            accounts: self.accounts.clone(),
        }
    }
}

impl<C: FactoryConstructor> fmt::Debug for DeployOrAttach<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployOrAttach")
            .field("name", &self.name)
            .field("bound", &self.signer.is_some())
            .field("enumerates", &self.accounts.is_some())
            .finish()
    }
}
