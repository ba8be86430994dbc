//! Deploys the contract set against an RPC endpoint and runs the
//! post-deployment stages. Idempotent: contracts already present in the
//! deployments file are reused, reconciliation stages only write when
//! on-chain state differs from the configuration.

use {
    alloy::providers::Provider,
    anyhow::{Context, Result},
    clap::Parser,
    contract_set::Contracts,
    deployment::{AccountsConfig, ArtifactStore, Deployer, Registry, StageContext, run_stages},
    std::path::PathBuf,
};

#[derive(Debug, Parser)]
struct Arguments {
    /// HTTP RPC endpoint of the node to deploy to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    rpc_url: String,

    /// Directory containing the compiled contract artifacts
    /// (`<Name>.json`).
    #[clap(long, env, default_value = "artifacts")]
    artifacts: PathBuf,

    /// Deployment registry file. Read if present, written after a
    /// successful run.
    #[clap(long, env, default_value = "deployments.json")]
    deployments: PathBuf,

    /// Optional TOML file with a `[named_accounts]` table. Defaults to the
    /// built-in role table.
    #[clap(long, env)]
    accounts_config: Option<PathBuf>,

    /// Log filter directives.
    #[clap(long, env, default_value = "info,deployment=debug,contract_set=debug")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    observe::tracing::initialize(&args.log_filter, tracing::level_filters::LevelFilter::ERROR);
    tracing::info!(?args, "running contract deployment");

    let provider = ethrpc::provider(&args.rpc_url)?;
    let node_accounts = provider
        .get_accounts()
        .await
        .context("failed to fetch accounts; the node must manage funded accounts")?;

    let accounts_config = match &args.accounts_config {
        Some(path) => {
            let toml = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            AccountsConfig::from_toml(&toml)?
        }
        None => contract_set::default_accounts_config()?,
    };
    let accounts = accounts_config.resolve(&node_accounts)?;

    let mut registry = Registry::load(&args.deployments)?;
    let initial_run = registry.get(contract_set::ASSET).is_none();

    if initial_run {
        let artifacts = ArtifactStore::new(&args.artifacts);
        let deployer = Deployer::new(provider.clone(), accounts.address("deployer")?);
        Contracts::deploy(&deployer, &artifacts, &mut registry, &accounts).await?;
    } else {
        tracing::info!("reusing existing deployment");
    }

    let stages = contract_set::stages();
    let mut ctx = StageContext {
        provider: &provider,
        registry: &mut registry,
        accounts: &accounts,
        initial_run,
    };
    run_stages(&stages, &mut ctx).await?;

    registry.save(&args.deployments)?;
    tracing::info!(deployments = %args.deployments.display(), "deployment complete");
    Ok(())
}
