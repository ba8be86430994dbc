//! The concrete contract set this harness deploys: the Sand fungible token
//! and the Asset multi-token behind upgradeability proxies, plus the signed
//! auction contract. The contracts themselves are externally authored; this
//! crate only knows their names, constructor wiring and admin roles.

pub mod stages;

use {
    alloy_dyn_abi::DynSolValue,
    anyhow::{Context, Result},
    deployment::{
        AccountsConfig,
        ArtifactStore,
        ContractHandle,
        Deployer,
        NamedAccounts,
        ProxyPlan,
        Registry,
    },
    ethrpc::AlloyProvider,
};

pub const SAND: &str = "Sand";
pub const ASSET: &str = "Asset";
pub const ASSET_SIGNED_AUCTION: &str = "AssetSignedAuction";
pub const SAND_PROXY: &str = "SandProxy";
pub const ASSET_PROXY: &str = "AssetProxy";
pub const PROXY_ARTIFACT: &str = "AdminUpgradeabilityProxy";

/// The role table used when no config file overrides it. Mirrors the
/// production deployment configuration: most admin roles collapse onto
/// `sandAdmin`, test accounts start at index 3.
pub const DEFAULT_NAMED_ACCOUNTS: &str = r#"
[named_accounts]
deployer = 0
sandAdmin = 0
sandBeneficiary = "sandAdmin"
mintingFeeCollector = "sandAdmin"
assetAdmin = "sandAdmin"
assetBouncerAdmin = "sandAdmin"
others = "from:3"
"#;

pub fn default_accounts_config() -> Result<AccountsConfig> {
    AccountsConfig::from_toml(DEFAULT_NAMED_ACCOUNTS)
}

/// Handles to the deployed contract set.
#[derive(Clone, Debug)]
pub struct Contracts {
    pub sand: ContractHandle,
    pub asset: ContractHandle,
    pub asset_signed_auction: ContractHandle,
}

impl Contracts {
    /// Deploys the whole set in dependency order and records everything in
    /// the registry. Post-deployment stages are not run here; callers
    /// decide when reconciliation happens.
    pub async fn deploy(
        deployer: &Deployer,
        artifacts: &ArtifactStore,
        registry: &mut Registry,
        accounts: &NamedAccounts,
    ) -> Result<Self> {
        let proxy_artifact = artifacts.load(PROXY_ARTIFACT)?;

        let sand_artifact = artifacts.load(SAND)?;
        let sand = deployer
            .deploy_via_proxy(
                registry,
                ProxyPlan {
                    name: SAND,
                    artifact: &sand_artifact,
                    proxy_name: SAND_PROXY,
                    proxy_artifact: &proxy_artifact,
                },
                "initSand",
                &[
                    DynSolValue::Address(accounts.address("sandAdmin")?),
                    DynSolValue::Address(accounts.address("sandBeneficiary")?),
                ],
            )
            .await
            .context("failed to deploy Sand")?;

        let asset_artifact = artifacts.load(ASSET)?;
        let asset = deployer
            .deploy_via_proxy(
                registry,
                ProxyPlan {
                    name: ASSET,
                    artifact: &asset_artifact,
                    proxy_name: ASSET_PROXY,
                    proxy_artifact: &proxy_artifact,
                },
                "initAsset",
                &[
                    DynSolValue::Address(sand.address()),
                    DynSolValue::Address(accounts.address("assetAdmin")?),
                    DynSolValue::Address(accounts.address("assetBouncerAdmin")?),
                    DynSolValue::Address(accounts.address("mintingFeeCollector")?),
                ],
            )
            .await
            .context("failed to deploy Asset")?;

        let auction_artifact = artifacts.load(ASSET_SIGNED_AUCTION)?;
        let asset_signed_auction = deployer
            .deploy_and_register(
                registry,
                ASSET_SIGNED_AUCTION,
                &auction_artifact,
                &[
                    DynSolValue::Address(asset.address()),
                    DynSolValue::Address(sand.address()),
                    DynSolValue::Address(accounts.address("assetAdmin")?),
                ],
            )
            .await
            .context("failed to deploy AssetSignedAuction")?;

        Ok(Self {
            sand,
            asset,
            asset_signed_auction,
        })
    }

    /// Recovers handles for a previously deployed set from the registry.
    pub fn deployed(registry: &Registry, provider: &AlloyProvider) -> Result<Self> {
        let contract = |name: &str| {
            registry
                .contract(name, provider)
                .with_context(|| format!("{name} is not in the deployment registry"))
        };
        Ok(Self {
            sand: contract(SAND)?,
            asset: contract(ASSET)?,
            asset_signed_auction: contract(ASSET_SIGNED_AUCTION)?,
        })
    }
}

/// The post-deployment stages for this contract set, in run order.
pub fn stages() -> Vec<Box<dyn deployment::Stage>> {
    vec![Box::new(stages::SetAssetAdmin)]
}
