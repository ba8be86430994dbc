pub mod node;
mod wallet;

pub use wallet::MutWallet;
use {
    alloy::{
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    anyhow::Result,
};

/// The type-erased provider used throughout the workspace.
pub type AlloyProvider = DynProvider;

/// Creates a provider for the given HTTP RPC endpoint.
pub fn provider(url: &str) -> Result<AlloyProvider> {
    let rpc = ClientBuilder::default().http(url.parse()?);
    Ok(ProviderBuilder::new().connect_client(rpc).erased())
}

/// Creates a provider that signs transactions locally with the given wallet
/// instead of relying on unlocked accounts in the node.
pub fn provider_with_wallet(url: &str, wallet: MutWallet) -> Result<AlloyProvider> {
    let rpc = ClientBuilder::default().http(url.parse()?);
    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc)
        .erased())
}
