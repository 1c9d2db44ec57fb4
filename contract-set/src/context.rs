use crate::builder::SignerSource;
use crate::error::Result;
use crate::node::{Artifact, NodeAccounts};
use serde::Deserialize;
use std::sync::Arc;
use web3::api::Eth;
use web3::transports::Http;
use web3::types::Address;
use web3::Web3;

/// How to reach a node and whom to send from.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
    pub url: String,
    /// Sender for deployments. When absent the node's first account is used.
    #[serde(default)]
    pub from: Option<Address>,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
}

fn default_confirmations() -> usize {
    1
}

impl NodeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            from: None,
            confirmations: default_confirmations(),
        }
    }

    pub fn from_json(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn connect(&self) -> Result<Context> {
        Context::new(self)
    }
}

/// A type needed to instantiate artifacts. All artifacts loaded through the
/// same Context share its transport. This type is cheap to clone.
#[derive(Clone, Debug)]
pub struct Context(Arc<ContextInner>);

#[derive(Debug)]
struct ContextInner {
    url: String,
    eth: Eth<Http>,
    from: Option<Address>,
    confirmations: usize,
}

impl Context {
    pub fn new(config: &NodeConfig) -> Result<Self> {
        // The node is only talked to on deploy, attach-time enumeration and
        // calls, so a plain Http transport is enough.
        let http = Http::new(&config.url)?;
        let inner = ContextInner {
            url: config.url.clone(),
            eth: Web3::new(http).eth(),
            from: config.from,
            confirmations: config.confirmations,
        };
        Ok(Self(Arc::new(inner)))
    }

    pub fn url(&self) -> &str {
        &self.0.url
    }

    pub fn from(&self) -> Option<Address> {
        self.0.from
    }

    pub fn eth(&self) -> &Eth<Http> {
        &self.0.eth
    }

    /// Loads a compiled artifact to be deployed or attached through this node.
    pub fn artifact<P>(&self, name: &str, json: &[u8]) -> Result<Artifact<Http, P>> {
        Ok(Artifact::from_json(self.0.eth.clone(), name, json)?.confirmations(self.0.confirmations))
    }

    pub fn accounts(&self) -> NodeAccounts<Http> {
        NodeAccounts::new(self.0.eth.clone())
    }

    /// The configured sender if there is one, otherwise the node's accounts.
    pub fn signer_source(&self) -> SignerSource<Address> {
        match self.0.from {
            Some(from) => SignerSource::Fixed(from),
            None => SignerSource::accounts(self.accounts()),
        }
    }
}
