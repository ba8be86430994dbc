use {
    alloy::{
        consensus::{TxEnvelope, TypedTransaction},
        network::{EthereumWallet, Network, NetworkWallet, TxSigner},
        primitives::Address,
        signers::{
            Signature,
            local::{MnemonicBuilder, coins_bip39::English},
        },
        transports::impl_future,
    },
    std::{sync::Arc, thread},
    tokio::sync::RwLock,
};

/// A network wallet that allows registering additional signers after
/// construction. Providers take ownership of their wallet, so without this
/// wrapper every account generated mid-test would need its own provider.
#[derive(Debug, Clone)]
pub struct MutWallet(Arc<RwLock<EthereumWallet>>);

impl MutWallet {
    pub fn new(wallet: EthereumWallet) -> Self {
        Self(Arc::new(RwLock::new(wallet)))
    }

    /// Wallet containing the first `count` accounts derived from the
    /// standard developer-node test mnemonic.
    pub fn test_mnemonic(count: u32) -> Self {
        let phrase = "test test test test test test test test test test test junk";
        let mut signers = (0..count).map(|i| {
            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .index(i)
                .unwrap()
                .build()
                .unwrap()
        });

        let mut wallet = EthereumWallet::new(signers.next().unwrap());
        for signer in signers {
            wallet.register_signer(signer);
        }

        Self::new(wallet)
    }

    pub fn register_signer<S>(&self, signer: S)
    where
        S: TxSigner<Signature> + Send + Sync + 'static,
    {
        self.blocking(move |wallet| wallet.blocking_write().register_signer(signer))
    }

    /// Runs a blocking wallet operation on a dedicated thread. The provider
    /// calls into the wallet from sync trait methods while we are inside a
    /// tokio runtime, where blocking on the lock directly would panic.
    fn blocking<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Arc<RwLock<EthereumWallet>>) -> R + Send,
        R: Send,
    {
        let wallet = self.0.clone();
        thread::scope(|scope| {
            scope
                .spawn(move || f(wallet))
                .join()
                .expect("wallet thread panicked")
        })
    }
}

impl<N> NetworkWallet<N> for MutWallet
where
    N: Network<UnsignedTx = TypedTransaction, TxEnvelope = TxEnvelope>,
{
    fn default_signer_address(&self) -> Address {
        self.blocking(|wallet| {
            <EthereumWallet as NetworkWallet<N>>::default_signer_address(&wallet.blocking_read())
        })
    }

    fn has_signer_for(&self, address: &Address) -> bool {
        let address = *address;
        self.blocking(move |wallet| {
            <EthereumWallet as NetworkWallet<N>>::has_signer_for(&wallet.blocking_read(), &address)
        })
    }

    fn signer_addresses(&self) -> impl Iterator<Item = Address> {
        self.blocking(|wallet| {
            <EthereumWallet as NetworkWallet<N>>::signer_addresses(&wallet.blocking_read())
                .collect::<Vec<_>>()
        })
        .into_iter()
    }

    fn sign_transaction_from(
        &self,
        sender: Address,
        tx: N::UnsignedTx,
    ) -> impl_future!(<Output = alloy::signers::Result<N::TxEnvelope>>) {
        async move {
            let wallet = self.0.read().await;
            <EthereumWallet as NetworkWallet<N>>::sign_transaction_from(&wallet, sender, tx).await
        }
    }
}
