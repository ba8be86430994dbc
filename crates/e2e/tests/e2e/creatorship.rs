use {
    alloy::primitives::{Address, U256},
    alloy_dyn_abi::DynSolValue,
    deployment::ContractHandle,
    e2e::setup::{
        OnchainDeployment,
        asset::{
            IPFS_HASH,
            generate_token_id,
            mint,
            mint_multiple,
            mint_multiple_with_nfts,
            old_generate_token_id,
        },
        run_test,
    },
    ethrpc::AlloyProvider,
};

#[tokio::test]
#[ignore]
async fn local_node_creator_of_unknown_token_fails() {
    run_test(creator_of_unknown_token_fails).await;
}

#[tokio::test]
#[ignore]
async fn local_node_minting_records_the_creator() {
    run_test(minting_records_the_creator).await;
}

#[tokio::test]
#[ignore]
async fn local_node_creatorship_transfer_covers_all_tokens() {
    run_test(creatorship_transfer_covers_all_tokens).await;
}

async fn creator_of(asset: &ContractHandle, id: U256) -> Option<Address> {
    let outputs = asset
        .call("creatorOf", &[DynSolValue::Uint(id, 256)])
        .await
        .ok()?;
    outputs.first().and_then(DynSolValue::as_address)
}

/// Mints one single token plus one batch with and one without NFTs, all at
/// consecutive uri ids starting at 0. Mirrors the full spread of minting
/// entry points.
async fn mint_spread(asset: &ContractHandle, creator: Address) {
    mint(asset, creator, 0, 0, IPFS_HASH, 4).await.unwrap();
    mint_multiple(asset, creator, &[IPFS_HASH; 3], &[4, 5, 10], 1)
        .await
        .unwrap();
    mint_multiple_with_nfts(asset, creator, &[IPFS_HASH; 5], &[4, 5, 10], 2, 4)
        .await
        .unwrap();
}

/// The supply minted at each consecutive uri id by [`mint_spread`]: the
/// single mint, the plain batch, then the mixed batch with its two
/// trailing NFTs.
const SPREAD_SUPPLIES: [u64; 9] = [4, 4, 5, 10, 4, 5, 10, 1, 1];

/// All token ids produced by [`mint_spread`].
fn spread_ids(creator: Address) -> Vec<U256> {
    SPREAD_SUPPLIES
        .iter()
        .enumerate()
        .map(|(i, &supply)| generate_token_id(creator, supply, i as u64, 0))
        .collect()
}

async fn creator_of_unknown_token_fails(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider).await;
    let asset = &deployment.contracts.asset;
    let creator = deployment.other(0);

    mint(asset, creator, 0, 0, IPFS_HASH, 4).await.unwrap();
    assert_eq!(
        creator_of(asset, generate_token_id(creator, 4, 0, 0)).await,
        Some(creator)
    );
    // Ids from the legacy packing scheme are not recognized.
    assert_eq!(creator_of(asset, old_generate_token_id(creator, 0)).await, None);
}

async fn minting_records_the_creator(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider).await;
    let asset = &deployment.contracts.asset;
    let creator = deployment.other(0);

    mint_spread(asset, creator).await;
    for id in spread_ids(creator) {
        assert_eq!(creator_of(asset, id).await, Some(creator), "token {id}");
    }
    // The last slot was minted as an NFT; the same slot with supply 10 is a
    // different id that does not exist.
    assert_eq!(
        creator_of(asset, generate_token_id(creator, 10, 8, 0)).await,
        None
    );
}

async fn creatorship_transfer_covers_all_tokens(provider: AlloyProvider) {
    let deployment = OnchainDeployment::deploy(provider).await;
    let asset = &deployment.contracts.asset;
    let creator = deployment.other(0);
    let user = deployment.other(1);

    mint_spread(asset, creator).await;
    asset
        .send(
            creator,
            "transferCreatorship",
            &[
                DynSolValue::Address(creator),
                DynSolValue::Address(creator),
                DynSolValue::Address(user),
            ],
        )
        .await
        .unwrap();

    for id in spread_ids(creator) {
        assert_eq!(creator_of(asset, id).await, Some(user), "token {id}");
    }
    // A supply mismatch still addresses a nonexistent token after the
    // transfer.
    assert_eq!(
        creator_of(asset, generate_token_id(creator, 10, 8, 0)).await,
        None
    );
}
