use {
    crate::{accounts::NamedAccounts, registry::Registry},
    anyhow::Result,
    ethrpc::AlloyProvider,
};

/// Everything a post-deployment stage gets to work with.
pub struct StageContext<'a> {
    pub provider: &'a AlloyProvider,
    pub registry: &'a mut Registry,
    pub accounts: &'a NamedAccounts,
    /// True for the first run against a fresh deployment. Stages use this to
    /// emit one-time log output; reconciliation behavior must not depend on
    /// it.
    pub initial_run: bool,
}

/// A unit of post-deployment setup or reconciliation logic. Stages run
/// sequentially, ordered by name; the numeric prefix convention
/// (`120_set_asset_admin`) makes that ordering explicit.
#[async_trait::async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, ctx: &mut StageContext<'_>) -> Result<()>;
}

/// Runs all stages in name order. A failing stage aborts the run; stages
/// are expected to be idempotent so the whole sequence can simply be rerun.
pub async fn run_stages(stages: &[Box<dyn Stage>], ctx: &mut StageContext<'_>) -> Result<()> {
    let mut order: Vec<usize> = (0..stages.len()).collect();
    order.sort_by_key(|&i| stages[i].name());
    for i in order {
        let stage = &stages[i];
        tracing::debug!(stage = stage.name(), "running stage");
        stage.run(ctx).await?;
    }
    Ok(())
}
