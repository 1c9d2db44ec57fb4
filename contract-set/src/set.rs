use crate::builder::{AttachOnly, Builder, DeployOrAttach, SignerSource};
use crate::factory::FactoryConstructor;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

type Constructors<C> = Arc<BTreeMap<String, Arc<C>>>;

/// A named collection of builders, all bound to the same signer.
///
/// Sets are values: [`connect`](ContractSet::connect) returns a new set bound to
/// another signer and leaves `self` as it was. The constructors are captured
/// once and shared by every set derived from the first.
pub struct ContractSet<C: FactoryConstructor, B: Builder<C>> {
    constructors: Constructors<C>,
    context: B::Context,
    signer: Option<C::Signer>,
    builders: BTreeMap<String, B>,
}

/// A set whose builders can deploy as well as attach.
pub type DeployableSet<C> = ContractSet<C, DeployOrAttach<C>>;

/// A set whose builders can only attach.
pub type AttachOnlySet<C> = ContractSet<C, AttachOnly<C>>;

/// Builds a set of deploy-or-attach builders, one per named constructor.
///
/// Nothing is called on the constructors or the signer source here; accounts
/// are enumerated lazily by the first deploy or attach that needs them.
pub fn build_contracts<C, I, K>(constructors: I, source: SignerSource<C::Signer>) -> DeployableSet<C>
where
    C: FactoryConstructor,
    I: IntoIterator<Item = (K, C)>,
    K: Into<String>,
{
    let (accounts, signer) = source.into_parts();
    ContractSet::bind(collect(constructors), accounts, signer)
}

/// Builds a set of attach-only builders for contexts that cannot enumerate
/// accounts, such as a read-only provider.
pub fn build_contracts_read_only<C, I, K>(constructors: I) -> AttachOnlySet<C>
where
    C: FactoryConstructor,
    I: IntoIterator<Item = (K, C)>,
    K: Into<String>,
{
    ContractSet::bind(collect(constructors), (), None)
}

fn collect<C, I, K>(constructors: I) -> Constructors<C>
where
    I: IntoIterator<Item = (K, C)>,
    K: Into<String>,
{
    Arc::new(
        constructors
            .into_iter()
            .map(|(name, constructor)| (name.into(), Arc::new(constructor)))
            .collect(),
    )
}

impl<C: FactoryConstructor, B: Builder<C>> ContractSet<C, B> {
    fn bind(constructors: Constructors<C>, context: B::Context, signer: Option<C::Signer>) -> Self {
        let builders = constructors
            .iter()
            .map(|(name, constructor)| {
                let builder = B::bind(name, constructor.clone(), &context, signer.clone());
                (name.clone(), builder)
            })
            .collect();

        Self {
            constructors,
            context,
            signer,
            builders,
        }
    }

    /// Returns a new set with every builder bound to `signer`. The binding of
    /// the new set depends only on `signer`, never on earlier connects.
    pub fn connect(&self, signer: C::Signer) -> Self {
        Self::bind(self.constructors.clone(), self.context.clone(), Some(signer))
    }

    pub fn get(&self, name: &str) -> Option<&B> {
        self.builders.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Contract names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, B> {
        self.builders.iter()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// The signer every builder in this set is bound to.
    pub fn signer(&self) -> Option<&C::Signer> {
        self.signer.as_ref()
    }
}

impl<C: FactoryConstructor, B: Builder<C>> Index<&str> for ContractSet<C, B> {
    type Output = B;

    fn index(&self, name: &str) -> &B {
        match self.builders.get(name) {
            Some(builder) => builder,
            None => panic!("no contract named {:?} in this set", name),
        }
    }
}

impl<'a, C: FactoryConstructor, B: Builder<C>> IntoIterator for &'a ContractSet<C, B> {
    type Item = (&'a String, &'a B);
    type IntoIter = btree_map::Iter<'a, String, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C: FactoryConstructor, B: Builder<C> + Clone> Clone for ContractSet<C, B> {
    fn clone(&self) -> Self {
        Self {
            constructors: self.constructors.clone(),
            context: self.context.clone(),
            signer: self.signer.clone(),
            builders: self.builders.clone(),
        }
    }
}

impl<C: FactoryConstructor, B: Builder<C> + fmt::Debug> fmt::Debug for ContractSet<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.builders.iter()).finish()
    }
}
