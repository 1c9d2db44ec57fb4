//! Deploy, attach and rebind a whole set of contracts in one go.
//!
//! Given a constructor per contract name, [`build_contracts`] returns a
//! [`ContractSet`] with a builder for each name. Every builder in a set shares
//! one signer binding, and [`ContractSet::connect`] produces a fresh set bound to
//! another signer. For a fixed list of contracts, [`contract_set!`] generates a
//! typed struct doing the same.

mod builder;
mod context;
mod error;
mod factory;
mod node;
mod set;

pub use builder::{Args, AttachOnly, Builder, Contract, DeployOrAttach, SignerSource};
pub use context::{Context, NodeConfig};
pub use error::{Error, NoSigners, Result};
pub use factory::{AccountSource, Connect, Factory, FactoryConstructor};
pub use node::{Artifact, ArtifactFactory, BoundContract, NodeAccounts};
pub use set::{
    build_contracts, build_contracts_read_only, AttachOnlySet, ContractSet, DeployableSet,
};

// Re-export the macros
pub use contract_set_macros::*;

// The macros expand to paths inside this crate.
#[doc(hidden)]
pub mod internal {
    pub use std::sync::Arc;
}
