use {
    contract_set::Contracts,
    deployment::Registry,
    e2e::setup::{OnchainDeployment, run_test},
    ethrpc::AlloyProvider,
};

#[tokio::test]
#[ignore]
async fn local_node_registry_recovers_handles_across_runs() {
    run_test(registry_recovers_handles_across_runs).await;
}

/// Persisting the registry and loading it back yields working handles at
/// the same addresses, without redeploying anything.
async fn registry_recovers_handles_across_runs(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider.clone()).await;

    let file = tempfile::NamedTempFile::new().unwrap();
    deployment.registry.save(file.path()).unwrap();

    let loaded = Registry::load(file.path()).unwrap();
    let recovered = Contracts::deployed(&loaded, &provider).unwrap();

    assert_eq!(recovered.sand.address(), deployment.contracts.sand.address());
    assert_eq!(
        recovered.asset.address(),
        deployment.contracts.asset.address()
    );
    assert_eq!(
        recovered.asset_signed_auction.address(),
        deployment.contracts.asset_signed_auction.address()
    );

    // The recovered handle is live: the admin accessor answers through it.
    let outputs = recovered.asset.call("admin", &[]).await.unwrap();
    assert_eq!(
        outputs[0].as_address(),
        Some(deployment.named("assetAdmin"))
    );
}
