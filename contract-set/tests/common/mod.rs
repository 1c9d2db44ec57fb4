#![allow(dead_code)]

use async_trait::async_trait;
use contract_set::{AccountSource, Connect, Factory, FactoryConstructor, Result};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use web3::types::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signer(pub &'static str);

pub const ALICE: Signer = Signer("alice");
pub const BOB: Signer = Signer("bob");
pub const CAROL: Signer = Signer("carol");

/// Everything the mocks were asked to do, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Enumerate,
    Construct(&'static str, Option<Signer>),
    Deploy(&'static str, String),
    Attach(&'static str, Address),
    Connect(&'static str, Signer),
}

#[derive(Clone, Default)]
pub struct Log {
    events: Arc<Mutex<Vec<Event>>>,
    instances: Arc<AtomicUsize>,
}

impl Log {
    pub fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn next_id(&self) -> usize {
        self.instances.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MockError {
    #[error("constructor for {0} exploded")]
    Construct(&'static str),
    #[error("node unreachable")]
    Unreachable,
}

/// A constructor for the contract `name` whose deploy takes `A`.
pub struct Mock<A> {
    name: &'static str,
    log: Log,
    broken: bool,
    _args: PhantomData<fn(A)>,
}

impl<A> Mock<A> {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            broken: false,
            _args: PhantomData,
        }
    }

    pub fn broken(name: &'static str, log: &Log) -> Self {
        Self {
            broken: true,
            ..Self::new(name, log)
        }
    }
}

impl<A: Debug + Send> FactoryConstructor for Mock<A> {
    type Signer = Signer;
    type Factory = MockFactory<A>;

    fn construct(&self, signer: Option<Signer>) -> Result<MockFactory<A>> {
        self.log.push(Event::Construct(self.name, signer));
        if self.broken {
            return Err(MockError::Construct(self.name).into());
        }
        Ok(MockFactory {
            name: self.name,
            signer,
            log: self.log.clone(),
            _args: PhantomData,
        })
    }
}

pub struct MockFactory<A> {
    name: &'static str,
    signer: Option<Signer>,
    log: Log,
    _args: PhantomData<fn(A)>,
}

#[async_trait(?Send)]
impl<A: Debug + Send> Factory for MockFactory<A> {
    type Signer = Signer;
    type Args = A;
    type Contract = Instance;

    async fn deploy(&self, args: A) -> Result<Instance> {
        let args = format!("{:?}", args);
        self.log.push(Event::Deploy(self.name, args.clone()));
        let id = self.log.next_id();
        Ok(Instance {
            id,
            contract: self.name,
            address: Address::from_low_u64_be(0x1000 + id as u64),
            signer: self.signer,
            deployed_with: Some(args),
            log: self.log.clone(),
        })
    }

    fn attach(&self, address: Address) -> Result<Instance> {
        self.log.push(Event::Attach(self.name, address));
        Ok(Instance {
            id: self.log.next_id(),
            contract: self.name,
            address,
            signer: self.signer,
            deployed_with: None,
            log: self.log.clone(),
        })
    }
}

#[derive(Clone)]
pub struct Instance {
    pub id: usize,
    pub contract: &'static str,
    pub address: Address,
    pub signer: Option<Signer>,
    pub deployed_with: Option<String>,
    log: Log,
}

impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("contract", &self.contract)
            .field("signer", &self.signer)
            .finish()
    }
}

impl Connect<Signer> for Instance {
    fn connect(&self, signer: Signer) -> Result<Self> {
        self.log.push(Event::Connect(self.contract, signer));
        Ok(Self {
            id: self.log.next_id(),
            signer: Some(signer),
            ..self.clone()
        })
    }
}

pub struct Accounts {
    signers: Vec<Signer>,
    log: Log,
    unreachable: bool,
}

impl Accounts {
    pub fn new(signers: &[Signer], log: &Log) -> Self {
        Self {
            signers: signers.to_vec(),
            log: log.clone(),
            unreachable: false,
        }
    }

    pub fn unreachable(log: &Log) -> Self {
        Self {
            unreachable: true,
            ..Self::new(&[], log)
        }
    }
}

#[async_trait(?Send)]
impl AccountSource<Signer> for Accounts {
    async fn get_signers(&self) -> Result<Vec<Signer>> {
        self.log.push(Event::Enumerate);
        if self.unreachable {
            return Err(MockError::Unreachable.into());
        }
        Ok(self.signers.clone())
    }
}

pub fn address(n: u64) -> Address {
    Address::from_low_u64_be(n)
}
