//! Library for deploying externally compiled contracts through a JSON-RPC
//! node and keeping track of what got deployed where.
//!
//! Contracts enter the workspace as opaque compiled artifacts (ABI plus
//! bytecode), so all encoding goes through the dynamic ABI machinery rather
//! than generated bindings.

pub mod accounts;
pub mod artifact;
pub mod deploy;
pub mod handle;
pub mod registry;
pub mod stage;

pub use {
    accounts::{AccountsConfig, NamedAccounts},
    artifact::{Artifact, ArtifactStore},
    deploy::{Deployer, ProxyPlan},
    handle::{CallError, ContractHandle},
    registry::{Deployment, Registry},
    stage::{Stage, StageContext, run_stages},
};
