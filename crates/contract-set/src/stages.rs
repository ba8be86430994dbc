use {
    alloy::primitives::Address,
    alloy_dyn_abi::DynSolValue,
    anyhow::{Context, Result},
    deployment::{ContractHandle, Stage, StageContext},
};

/// Reconciles the Asset contract's two admin roles with the named-account
/// table. Idempotent: reads the on-chain value first and only submits a
/// transaction when it differs from the desired address. Asset builds that
/// do not expose an accessor are skipped.
pub struct SetAssetAdmin;

#[async_trait::async_trait]
impl Stage for SetAssetAdmin {
    fn name(&self) -> &str {
        "120_set_asset_admin"
    }

    async fn run(&self, ctx: &mut StageContext<'_>) -> Result<()> {
        let Some(asset) = ctx.registry.contract(crate::ASSET, ctx.provider) else {
            if ctx.initial_run {
                tracing::info!("no Asset deployed");
            }
            return Ok(());
        };
        let deployer = ctx.accounts.address("deployer")?;

        reconcile_role(
            &asset,
            deployer,
            ("admin", "changeAdmin"),
            ctx.accounts.address("assetAdmin")?,
            ctx.initial_run,
        )
        .await?;
        reconcile_role(
            &asset,
            deployer,
            ("bouncerAdmin", "changeBouncerAdmin"),
            ctx.accounts.address("assetBouncerAdmin")?,
            ctx.initial_run,
        )
        .await?;
        Ok(())
    }
}

async fn reconcile_role(
    asset: &ContractHandle,
    from: Address,
    (getter, setter): (&str, &str),
    desired: Address,
    initial_run: bool,
) -> Result<()> {
    // The probe call reverting means this Asset build predates the role;
    // that is not an error for the stage.
    let outputs = match asset.call(getter, &[]).await {
        Ok(outputs) => outputs,
        Err(err) => {
            tracing::info!(%err, "current Asset build does not expose {getter}()");
            return Ok(());
        }
    };
    let current = outputs
        .first()
        .and_then(DynSolValue::as_address)
        .with_context(|| format!("{getter}() did not return an address"))?;

    if current == desired {
        return Ok(());
    }
    if initial_run {
        tracing::info!(%current, %desired, "setting Asset {getter}");
    }
    asset
        .send(from, setter, &[DynSolValue::Address(desired)])
        .await
        .with_context(|| format!("{setter} transaction failed"))?;
    Ok(())
}
