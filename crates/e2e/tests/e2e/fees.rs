use {
    alloy::primitives::U256,
    alloy_dyn_abi::DynSolValue,
    deployment::Deployer,
    e2e::setup::{
        OnchainDeployment,
        artifacts,
        asset::{IPFS_HASH, mint},
        run_test,
    },
    ethrpc::AlloyProvider,
};

const MINTING_FEE: u64 = 100;

#[tokio::test]
#[ignore]
async fn local_node_minting_fee_goes_to_collector_account() {
    run_test(minting_fee_goes_to_collector_account).await;
}

#[tokio::test]
#[ignore]
async fn local_node_minting_fee_goes_to_collector_contract() {
    run_test(minting_fee_goes_to_collector_contract).await;
}

/// Routes the minting fee to `collector` and mints once, paying the fee in
/// Sand.
async fn mint_with_fee(
    deployment: &OnchainDeployment,
    collector: alloy::primitives::Address,
) {
    let creator = deployment.other(0);
    deployment.fund_sand(creator, U256::from(1000)).await;

    deployment
        .contracts
        .asset
        .send(
            deployment.named("mintingFeeCollector"),
            "setFeeCollection",
            &[
                DynSolValue::Address(collector),
                DynSolValue::Address(deployment.contracts.sand.address()),
                DynSolValue::Uint(U256::from(MINTING_FEE), 256),
            ],
        )
        .await
        .expect("setFeeCollection failed");

    mint(
        &deployment.contracts.asset,
        creator,
        MINTING_FEE,
        0,
        IPFS_HASH,
        1,
    )
    .await
    .expect("fee-paying mint failed");
}

async fn minting_fee_goes_to_collector_account(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider).await;
    let collector = deployment.other(3);

    mint_with_fee(&deployment, collector).await;
    assert_eq!(
        deployment.sand_balance(collector).await,
        U256::from(MINTING_FEE)
    );
}

/// The collector can also be a contract; it receives the fee through its
/// token-received hook.
async fn minting_fee_goes_to_collector_contract(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider.clone()).await;
    let owner = deployment.other(4);

    let artifact = artifacts()
        .load("TestMintingFeeCollector")
        .expect("fee collector test artifact missing");
    let receiver = Deployer::new(provider, deployment.other(0))
        .deploy(
            "TestMintingFeeCollector",
            &artifact,
            &[
                DynSolValue::Address(owner),
                DynSolValue::Address(deployment.contracts.asset.address()),
            ],
        )
        .await
        .expect("failed to deploy fee collector contract");

    mint_with_fee(&deployment, receiver.address()).await;
    assert_eq!(
        deployment.sand_balance(receiver.address()).await,
        U256::from(MINTING_FEE)
    );
}
