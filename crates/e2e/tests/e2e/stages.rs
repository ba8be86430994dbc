use {
    alloy::{primitives::Address, providers::Provider},
    deployment::{AccountsConfig, ContractHandle, StageContext, run_stages},
    e2e::setup::{OnchainDeployment, run_test},
    ethrpc::AlloyProvider,
};

#[tokio::test]
#[ignore]
async fn local_node_stage_sets_admins_after_deployment() {
    run_test(stage_sets_admins_after_deployment).await;
}

#[tokio::test]
#[ignore]
async fn local_node_stage_reconciles_a_reconfigured_admin() {
    run_test(stage_reconciles_a_reconfigured_admin).await;
}

async fn admin(asset: &ContractHandle, getter: &str) -> Address {
    let outputs = asset.call(getter, &[]).await.expect("accessor missing");
    outputs[0].as_address().unwrap()
}

/// The deploy sequence already runs the stages, so a fresh deployment has
/// both roles pointing at the configured accounts.
async fn stage_sets_admins_after_deployment(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider).await;
    let asset = &deployment.contracts.asset;

    assert_eq!(admin(asset, "admin").await, deployment.named("assetAdmin"));
    assert_eq!(
        admin(asset, "bouncerAdmin").await,
        deployment.named("assetBouncerAdmin")
    );
}

/// Pointing the configuration at a new admin and rerunning the stages moves
/// the on-chain role (the write is authorized because the deployer still
/// holds it), while the other role is left untouched.
async fn stage_reconciles_a_reconfigured_admin(provider: AlloyProvider) {
    let mut deployment = OnchainDeployment::deploy(provider.clone()).await;
    let asset = deployment.contracts.asset.clone();

    let node_accounts = provider.get_accounts().await.unwrap();
    let reconfigured = AccountsConfig::from_toml(
        r#"
        [named_accounts]
        deployer = 0
        assetAdmin = 5
        assetBouncerAdmin = 0
        "#,
    )
    .unwrap()
    .resolve(&node_accounts)
    .unwrap();
    let new_admin = reconfigured.address("assetAdmin").unwrap();
    assert_ne!(admin(&asset, "admin").await, new_admin);

    let stages = contract_set::stages();
    let mut ctx = StageContext {
        provider: &provider,
        registry: &mut deployment.registry,
        accounts: &reconfigured,
        initial_run: false,
    };
    run_stages(&stages, &mut ctx).await.unwrap();

    assert_eq!(admin(&asset, "admin").await, new_admin);
    assert_eq!(
        admin(&asset, "bouncerAdmin").await,
        deployment.named("assetBouncerAdmin")
    );
}
