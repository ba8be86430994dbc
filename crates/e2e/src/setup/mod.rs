pub mod asset;

pub use crate::nodes::local_node::{revert_node_state_after, test as run_test};
use {
    alloy::{
        primitives::{Address, U256},
        providers::Provider,
    },
    alloy_dyn_abi::DynSolValue,
    contract_set::Contracts,
    deployment::{ArtifactStore, Deployer, NamedAccounts, Registry, StageContext, run_stages},
    ethrpc::AlloyProvider,
    std::path::PathBuf,
};

/// Initializes tracing for a test. Can be called by every test; only the
/// first call takes effect.
pub fn init() {
    observe::tracing::initialize_reentrant("info,e2e=debug,deployment=debug,contract_set=debug");
}

pub fn to_wei(base: u32) -> U256 {
    U256::from(base) * U256::from(10).pow(U256::from(18))
}

/// Where the compiled contract artifacts live. The contracts are compiled
/// outside this workspace; point `CONTRACT_ARTIFACTS` at the output
/// directory or place it at the workspace root.
pub fn artifacts() -> ArtifactStore {
    let dir = std::env::var_os("CONTRACT_ARTIFACTS")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
        });
    ArtifactStore::new(dir)
}

/// A freshly deployed contract set plus everything tests need to talk to
/// it: the resolved role table and the registry the deployment was recorded
/// in.
pub struct OnchainDeployment {
    pub provider: AlloyProvider,
    pub contracts: Contracts,
    pub accounts: NamedAccounts,
    pub registry: Registry,
}

impl OnchainDeployment {
    /// Deploys the whole contract set from scratch and runs the
    /// post-deployment stages, the same sequence the deploy binary runs.
    pub async fn deploy(provider: AlloyProvider) -> Self {
        init();
        tracing::info!("deploying the contract set to the local node");

        let node_accounts = provider.get_accounts().await.expect("get accounts failed");
        let accounts = contract_set::default_accounts_config()
            .unwrap()
            .resolve(&node_accounts)
            .expect("failed to resolve named accounts");

        let mut registry = Registry::default();
        let deployer = Deployer::new(provider.clone(), accounts.address("deployer").unwrap());
        let contracts = Contracts::deploy(&deployer, &artifacts(), &mut registry, &accounts)
            .await
            .expect("contract set deployment failed");

        let stages = contract_set::stages();
        let mut ctx = StageContext {
            provider: &provider,
            registry: &mut registry,
            accounts: &accounts,
            initial_run: true,
        };
        run_stages(&stages, &mut ctx)
            .await
            .expect("post-deployment stages failed");

        Self {
            provider,
            contracts,
            accounts,
            registry,
        }
    }

    /// The `i`-th account without an assigned role, for use as test actors.
    pub fn other(&self, i: usize) -> Address {
        self.accounts.addresses("others").expect("no spare accounts")[i]
    }

    pub fn named(&self, name: &str) -> Address {
        self.accounts
            .address(name)
            .expect("role missing from the account table")
    }

    /// Funds `to` with Sand out of the initial supply held by `sandAdmin`.
    pub async fn fund_sand(&self, to: Address, amount: U256) {
        self.contracts
            .sand
            .send(
                self.named("sandAdmin"),
                "transfer",
                &[DynSolValue::Address(to), DynSolValue::Uint(amount, 256)],
            )
            .await
            .expect("sand transfer failed");
    }

    /// ERC-20 balance of `owner` in Sand.
    pub async fn sand_balance(&self, owner: Address) -> U256 {
        let outputs = self
            .contracts
            .sand
            .call("balanceOf", &[DynSolValue::Address(owner)])
            .await
            .expect("balanceOf failed");
        outputs[0].as_uint().expect("balanceOf returned non-uint").0
    }
}
