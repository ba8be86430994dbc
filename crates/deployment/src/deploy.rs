use {
    crate::{artifact::Artifact, handle::ContractHandle, registry::Registry},
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes},
        providers::Provider,
        rpc::types::TransactionRequest,
    },
    alloy_dyn_abi::{DynSolValue, JsonAbiExt},
    anyhow::{Context, Result, ensure},
    ethrpc::AlloyProvider,
};

/// Gas limit used for deployment and setup transactions. Matches the block
/// gas limit the local test chain is configured with.
const DEPLOYMENT_GAS: u64 = 6_000_000;

/// Deploys contract artifacts from a funded account, one transaction at a
/// time.
#[derive(Clone, Debug)]
pub struct Deployer {
    provider: AlloyProvider,
    from: Address,
    gas: u64,
}

impl Deployer {
    pub fn new(provider: AlloyProvider, from: Address) -> Self {
        Self {
            provider,
            from,
            gas: DEPLOYMENT_GAS,
        }
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn provider(&self) -> &AlloyProvider {
        &self.provider
    }

    pub fn from(&self) -> Address {
        self.from
    }

    /// Submits a contract-creation transaction for the artifact, waits for
    /// inclusion and returns a handle to the deployed contract.
    pub async fn deploy(
        &self,
        name: &str,
        artifact: &Artifact,
        args: &[DynSolValue],
    ) -> Result<ContractHandle> {
        let mut code = artifact
            .bytecode()
            .with_context(|| format!("cannot deploy {name}"))?
            .to_vec();
        match artifact.abi.constructor() {
            Some(constructor) => {
                code.extend(
                    constructor
                        .abi_encode_input(args)
                        .with_context(|| format!("bad constructor arguments for {name}"))?,
                );
            }
            None => ensure!(
                args.is_empty(),
                "{name} has no constructor but {} arguments were given",
                args.len()
            ),
        }

        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(Bytes::from(code))
            .with_gas_limit(self.gas);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .with_context(|| format!("failed to submit deployment of {name}"))?
            .get_receipt()
            .await
            .with_context(|| format!("deployment of {name} was not mined"))?;
        ensure!(receipt.status(), "deployment of {name} reverted");
        let address = receipt
            .contract_address
            .with_context(|| format!("no contract address in receipt for {name}"))?;
        tracing::info!(
            %address,
            gas_used = receipt.gas_used,
            "contract {name} deployed"
        );

        Ok(ContractHandle::new(
            name,
            address,
            artifact.abi.clone(),
            self.provider.clone(),
        ))
    }

    /// Like [`Self::deploy`] but also records the deployment in the
    /// registry.
    pub async fn deploy_and_register(
        &self,
        registry: &mut Registry,
        name: &str,
        artifact: &Artifact,
        args: &[DynSolValue],
    ) -> Result<ContractHandle> {
        let contract = self.deploy(name, artifact, args).await?;
        registry.record(name, artifact.abi.clone(), args, contract.address());
        Ok(contract)
    }

    /// Deploys a contract behind a proxy:
    ///
    /// 1. deploy the implementation,
    /// 2. encode the initialization call against the implementation ABI,
    /// 3. deploy the proxy with `(implementation, init_calldata)` as
    ///    constructor arguments.
    ///
    /// The proxy is registered under `plan.proxy_name` and the logical
    /// contract under `plan.name` at the proxy address. The returned handle
    /// addresses the proxy through the implementation's interface.
    pub async fn deploy_via_proxy(
        &self,
        registry: &mut Registry,
        plan: ProxyPlan<'_>,
        init_function: &str,
        args: &[DynSolValue],
    ) -> Result<ContractHandle> {
        let implementation = self
            .deploy(
                &format!("{}_implementation", plan.name),
                plan.artifact,
                args,
            )
            .await?;
        let init_data = implementation
            .encode_call(init_function, args)
            .with_context(|| {
                format!(
                    "cannot encode init call {init_function} against {}",
                    plan.name
                )
            })?;

        let proxy = self
            .deploy_and_register(
                registry,
                plan.proxy_name,
                plan.proxy_artifact,
                &[
                    DynSolValue::Address(implementation.address()),
                    DynSolValue::Bytes(init_data.to_vec()),
                ],
            )
            .await?;

        let contract = implementation.at(plan.name, proxy.address());
        registry.record(plan.name, plan.artifact.abi.clone(), args, proxy.address());
        Ok(contract)
    }
}

/// The artifacts involved in a proxy/implementation deployment.
#[derive(Clone, Copy, Debug)]
pub struct ProxyPlan<'a> {
    pub name: &'a str,
    pub artifact: &'a Artifact,
    pub proxy_name: &'a str,
    pub proxy_artifact: &'a Artifact,
}
