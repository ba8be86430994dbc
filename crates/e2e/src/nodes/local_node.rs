use {
    alloy::primitives::U256,
    ethrpc::{AlloyProvider, MutWallet, node::TestNodeApi},
    futures::FutureExt,
    std::{
        future::Future,
        panic::{self, AssertUnwindSafe},
        sync::Mutex,
    },
};

/// Tests running against the shared local node must not interleave.
static NODE_MUTEX: Mutex<()> = Mutex::new(());

const NODE_HOST: &str = "http://127.0.0.1:8545";

/// Runs a test function against the local test node with the chain clock
/// pinned to the current time.
pub async fn test<F, Fut>(test_function: F)
where
    F: FnOnce(AlloyProvider) -> Fut,
    Fut: Future<Output = ()>,
{
    revert_node_state_after(|provider| async move {
        // Start the test at the real current time. Mining an empty block
        // persists the timestamp so it is observable from the latest block.
        let node = TestNodeApi::new(&provider);
        node.set_next_block_timestamp(&chrono::offset::Utc::now())
            .await
            .expect("could not set block timestamp");
        node.mine_pending_block()
            .await
            .expect("could not mine empty block");

        test_function(provider.clone()).await;
    })
    .await;
}

/// Takes a closure and runs it against the local test node. The chain state
/// is snapshotted before the closure runs and restored afterwards, so each
/// test starts from the node's genesis setup.
///
/// Tests going through this function never run simultaneously.
pub async fn revert_node_state_after<F, Fut>(f: F)
where
    F: FnOnce(AlloyProvider) -> Fut,
    Fut: Future<Output = ()>,
{
    // The mutex is expected to become poisoned when a test panics. Only the
    // locked state matters, not the data, so poisoning is ignored.
    let _lock = NODE_MUTEX.lock();

    // Sign locally with the node's well-known test mnemonic instead of
    // relying on unlocked accounts.
    let provider = ethrpc::provider_with_wallet(NODE_HOST, MutWallet::test_mnemonic(20))
        .expect("invalid test node url");
    let resetter = Resetter::new(&provider).await;

    // `catch_unwind` does not catch every kind of panic and the closure may
    // not actually be unwind safe; if the state is not restored the test
    // run is broken anyway, so this is acceptable for a test environment.
    let result = AssertUnwindSafe(f(provider.clone())).catch_unwind().await;

    resetter.reset().await;

    if let Err(err) = result {
        panic::resume_unwind(err);
    }
}

struct Resetter {
    provider: AlloyProvider,
    snapshot_id: U256,
}

impl Resetter {
    async fn new(provider: &AlloyProvider) -> Self {
        let snapshot_id = TestNodeApi::new(provider)
            .snapshot()
            .await
            .expect("test network must support evm_snapshot");
        Self {
            provider: provider.clone(),
            snapshot_id,
        }
    }

    async fn reset(&self) {
        TestNodeApi::new(&self.provider)
            .revert(&self.snapshot_id)
            .await
            .expect("test network must support evm_revert");
    }
}
