//! Helpers for driving the Asset contract's minting entry points and for
//! reproducing its token-id packing off-chain.

use {
    alloy::{
        primitives::{Address, U256},
        rpc::types::TransactionReceipt,
    },
    alloy_dyn_abi::DynSolValue,
    deployment::{CallError, ContractHandle},
};

pub const IPFS_HASH: &str = "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

/// Token ids pack the creator address into the top 160 bits, the pack id
/// (the caller-chosen uri id plus the index within a batch) above the low
/// 32 bits, and the token's supply into that low field. The same uri slot
/// minted with a different supply is therefore a different, nonexistent id.
pub fn generate_token_id(creator: Address, supply: u64, uri_id: u64, pack_index: u64) -> U256 {
    (address_bits(creator) << 96) | (U256::from(uri_id + pack_index) << 32) | U256::from(supply)
}

/// The packing used by earlier Asset builds, before the supply field and
/// the accompanying shift existed. Kept around to assert that ids from the
/// old scheme are no longer recognized.
pub fn old_generate_token_id(creator: Address, uri_id: u64) -> U256 {
    (address_bits(creator) << 96) | U256::from(uri_id)
}

fn address_bits(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

fn uint(value: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(value), 256)
}

fn empty_bytes() -> DynSolValue {
    DynSolValue::Bytes(Vec::new())
}

/// `mint(creator, fee, id, uri, supply, owner, data)` with the creator both
/// paying and receiving.
pub async fn mint(
    asset: &ContractHandle,
    creator: Address,
    fee: u64,
    uri_id: u64,
    uri: &str,
    supply: u64,
) -> Result<TransactionReceipt, CallError> {
    asset
        .send(
            creator,
            "mint",
            &[
                DynSolValue::Address(creator),
                uint(fee),
                uint(uri_id),
                DynSolValue::String(uri.to_string()),
                uint(supply),
                DynSolValue::Address(creator),
                empty_bytes(),
            ],
        )
        .await
}

/// Mints and extracts the assigned token id from the `TransferSingle`
/// event.
pub async fn mint_and_return_token_id(
    asset: &ContractHandle,
    creator: Address,
    uri: &str,
    supply: u64,
    uri_id: u64,
) -> U256 {
    let receipt = mint(asset, creator, 0, uri_id, uri, supply)
        .await
        .expect("mint failed");
    let events = asset
        .events_from_receipt("TransferSingle", &receipt)
        .expect("no TransferSingle event in mint receipt");
    events[0].body[0]
        .as_uint()
        .expect("TransferSingle id is not a uint")
        .0
}

/// `mintMultiple` packs all metadata uris into one string plus a lengths
/// array.
pub async fn mint_multiple(
    asset: &ContractHandle,
    creator: Address,
    uris: &[&str],
    supplies: &[u64],
    first_uri_id: u64,
) -> Result<TransactionReceipt, CallError> {
    let (packed, lengths) = pack_uris(uris);
    asset
        .send(
            creator,
            "mintMultiple",
            &[
                DynSolValue::Address(creator),
                uint(0),
                uint(first_uri_id),
                DynSolValue::String(packed),
                DynSolValue::Array(lengths),
                DynSolValue::Array(supplies.iter().map(|&supply| uint(supply)).collect()),
                DynSolValue::Address(creator),
                empty_bytes(),
            ],
        )
        .await
}

/// `mintMultipleWithNFT` appends `nft_count` NFTs (supply 1 each) after the
/// listed supplies; their uris are part of the packed string.
pub async fn mint_multiple_with_nfts(
    asset: &ContractHandle,
    creator: Address,
    uris: &[&str],
    supplies: &[u64],
    nft_count: u64,
    first_uri_id: u64,
) -> Result<TransactionReceipt, CallError> {
    let (packed, lengths) = pack_uris(uris);
    asset
        .send(
            creator,
            "mintMultipleWithNFT",
            &[
                DynSolValue::Address(creator),
                uint(0),
                uint(first_uri_id),
                DynSolValue::String(packed),
                DynSolValue::Array(lengths),
                DynSolValue::Array(supplies.iter().map(|&supply| uint(supply)).collect()),
                uint(nft_count),
                DynSolValue::Address(creator),
                empty_bytes(),
            ],
        )
        .await
}

/// Batch-mints `count` tokens that share a base uri (suffixed `_<i>` by the
/// contract) and a supply.
pub async fn mint_tokens_with_same_uri_and_supply(
    asset: &ContractHandle,
    count: usize,
    uri: &str,
    supply: u64,
    creator: Address,
    first_uri_id: u64,
) -> Result<TransactionReceipt, CallError> {
    let uris = vec![uri; count];
    let supplies = vec![supply; count];
    mint_multiple(asset, creator, &uris, &supplies, first_uri_id).await
}

/// Like [`mint_tokens_with_same_uri_and_supply`] but with `nft_count` NFTs
/// appended to the batch.
pub async fn mint_tokens_including_nft_with_same_uri(
    asset: &ContractHandle,
    count: usize,
    uri: &str,
    supply: u64,
    nft_count: u64,
    creator: Address,
    first_uri_id: u64,
) -> Result<TransactionReceipt, CallError> {
    let uris = vec![uri; count + nft_count as usize];
    let supplies = vec![supply; count];
    mint_multiple_with_nfts(asset, creator, &uris, &supplies, nft_count, first_uri_id).await
}

fn pack_uris(uris: &[&str]) -> (String, Vec<DynSolValue>) {
    let packed = uris.concat();
    let lengths = uris.iter().map(|uri| uint(uri.len() as u64)).collect();
    (packed, lengths)
}

/// Asserts that a contract interaction failed with a revert. Reverts
/// surface either as a mined-but-failed receipt or as an RPC error when the
/// node rejects the transaction during gas estimation; transport failures
/// and receipt timeouts stay fatal so they do not masquerade as the
/// expected outcome.
#[track_caller]
pub fn assert_reverted<T: std::fmt::Debug>(result: Result<T, CallError>) {
    match result {
        Err(CallError::Reverted(_)) => (),
        Err(CallError::Rpc(err)) if is_revert_message(&err.to_string()) => (),
        other => panic!("expected a revert, got {other:?}"),
    }
}

fn is_revert_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("revert") || message.contains("vm exception")
}
