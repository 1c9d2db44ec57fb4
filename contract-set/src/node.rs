//! Collaborators backed by a node over web3: compiled artifacts as factory
//! constructors, node-managed accounts as signers.

use crate::error::{anyhow, Result};
use crate::factory::{AccountSource, Connect, Factory, FactoryConstructor};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use web3::api::Eth;
use web3::contract::tokens::{Detokenize, Tokenize};
use web3::contract::{Contract, Options};
use web3::types::{Address, H256};
use web3::Transport;

/// The parts of a compiled contract needed to deploy and attach it.
#[derive(Debug)]
struct Compiled {
    name: String,
    abi: ethabi::Contract,
    abi_json: Vec<u8>,
    /// Absent for interfaces and abstract contracts, which can only be attached.
    bytecode: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactJson {
    #[serde(default)]
    contract_name: Option<String>,
    abi: serde_json::Value,
    #[serde(default)]
    bytecode: Option<Bytecode>,
}

// Hardhat and truffle store the bytecode as a string, forge nests it in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hex(String),
    Object { object: String },
}

impl Compiled {
    fn from_json(fallback_name: &str, json: &[u8]) -> Result<Self> {
        let artifact: ArtifactJson = serde_json::from_slice(json)?;
        let abi_json = serde_json::to_vec(&artifact.abi)?;
        let abi = ethabi::Contract::load(abi_json.as_slice())?;
        let bytecode = match artifact.bytecode {
            Some(Bytecode::Hex(hex)) | Some(Bytecode::Object { object: hex }) => {
                Some(hex.trim_start_matches("0x").to_owned())
            }
            None => None,
        }
        .filter(|hex| !hex.is_empty());

        Ok(Self {
            name: artifact.contract_name.unwrap_or_else(|| fallback_name.to_owned()),
            abi,
            abi_json,
            bytecode,
        })
    }
}

/// A compiled contract on a particular node. `P` is the tuple of constructor
/// arguments taken by `deploy`. Cheap to clone.
pub struct Artifact<T: Transport, P> {
    compiled: Arc<Compiled>,
    eth: Eth<T>,
    confirmations: usize,
    _params: PhantomData<fn(P)>,
}

impl<T: Transport, P> Artifact<T, P> {
    /// Parses a hardhat, truffle or forge artifact. `name` is used when the
    /// artifact doesn't carry a contract name of its own.
    pub fn from_json(eth: Eth<T>, name: &str, json: &[u8]) -> Result<Self> {
        Ok(Self {
            compiled: Arc::new(Compiled::from_json(name, json)?),
            eth,
            confirmations: 1,
            _params: PhantomData,
        })
    }

    /// Number of confirmations a deployment waits for.
    pub fn confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn name(&self) -> &str {
        &self.compiled.name
    }

    pub fn abi(&self) -> &ethabi::Contract {
        &self.compiled.abi
    }
}

impl<T: Transport, P> Clone for Artifact<T, P> {
    fn clone(&self) -> Self {
        Self {
            compiled: self.compiled.clone(),
            eth: self.eth.clone(),
            confirmations: self.confirmations,
            _params: PhantomData,
        }
    }
}

impl<T: Transport, P> fmt::Debug for Artifact<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("name", &self.compiled.name)
            .field("confirmations", &self.confirmations)
            .finish()
    }
}

impl<T, P> FactoryConstructor for Artifact<T, P>
where
    T: Transport + Send + Sync,
    P: Tokenize + Send,
{
    type Signer = Address;
    type Factory = ArtifactFactory<T, P>;

    fn construct(&self, from: Option<Address>) -> Result<Self::Factory> {
        Ok(ArtifactFactory {
            artifact: self.clone(),
            from,
        })
    }
}

/// An [`Artifact`] bound to the account that sends its transactions.
pub struct ArtifactFactory<T: Transport, P> {
    artifact: Artifact<T, P>,
    from: Option<Address>,
}

#[async_trait(?Send)]
impl<T, P> Factory for ArtifactFactory<T, P>
where
    T: Transport + Send + Sync,
    P: Tokenize + Send,
{
    type Signer = Address;
    type Args = P;
    type Contract = BoundContract<T>;

    async fn deploy(&self, args: P) -> Result<BoundContract<T>> {
        let compiled = &self.artifact.compiled;
        let bytecode = compiled
            .bytecode
            .as_deref()
            .ok_or_else(|| anyhow!("{} has no bytecode to deploy", compiled.name))?;
        let from = self
            .from
            .ok_or_else(|| anyhow!("deploying {} requires a sender", compiled.name))?;

        let contract = Contract::deploy(self.artifact.eth.clone(), &compiled.abi_json)?
            .confirmations(self.artifact.confirmations)
            .execute(bytecode, args, from)
            .await?;

        Ok(BoundContract {
            contract,
            from: Some(from),
        })
    }

    fn attach(&self, address: Address) -> Result<BoundContract<T>> {
        let contract = Contract::new(
            self.artifact.eth.clone(),
            address,
            self.artifact.compiled.abi.clone(),
        );
        Ok(BoundContract {
            contract,
            from: self.from,
        })
    }
}

/// A deployed contract and the account, if any, that calls go out from.
#[derive(Clone)]
pub struct BoundContract<T: Transport> {
    contract: Contract<T>,
    from: Option<Address>,
}

impl<T: Transport> BoundContract<T> {
    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn from(&self) -> Option<Address> {
        self.from
    }

    /// The underlying web3 contract, for anything not wrapped here.
    pub fn contract(&self) -> &Contract<T> {
        &self.contract
    }

    /// Calls a constant function.
    pub async fn query<R: Detokenize>(&self, name: &str, params: impl Tokenize) -> Result<R> {
        Ok(self
            .contract
            .query(name, params, self.from, Options::default(), None)
            .await?)
    }

    /// Sends a transaction calling `name`. Requires a sender.
    pub async fn call(&self, name: &str, params: impl Tokenize) -> Result<H256> {
        let from = self
            .from
            .ok_or_else(|| anyhow!("calling {} requires a sender", name))?;
        Ok(self
            .contract
            .call(name, params, from, Options::default())
            .await?)
    }
}

impl<T: Transport> Connect<Address> for BoundContract<T> {
    fn connect(&self, from: Address) -> Result<Self> {
        Ok(Self {
            contract: self.contract.clone(),
            from: Some(from),
        })
    }
}

impl<T: Transport> fmt::Debug for BoundContract<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundContract")
            .field("address", &self.address())
            .field("from", &self.from)
            .finish()
    }
}

/// The accounts managed by the node, as reported by `eth_accounts`.
#[derive(Clone, Debug)]
pub struct NodeAccounts<T: Transport> {
    eth: Eth<T>,
}

impl<T: Transport> NodeAccounts<T> {
    pub fn new(eth: Eth<T>) -> Self {
        Self { eth }
    }
}

#[async_trait(?Send)]
impl<T: Transport + Send + Sync> AccountSource<Address> for NodeAccounts<T> {
    async fn get_signers(&self) -> Result<Vec<Address>> {
        Ok(self.eth.accounts().await?)
    }
}
