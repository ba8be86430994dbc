use {
    crate::AlloyProvider,
    alloy::{primitives::U256, providers::Provider},
    anyhow::{Context, Result},
    chrono::{DateTime, Utc},
};

/// RPC methods that are only available on development nodes (anvil, hardhat,
/// ganache). Used by the test harness to snapshot and rewind chain state
/// between scenarios.
///
/// The relevant methods are documented at
/// https://hardhat.org/hardhat-network/docs/reference#special-testing/debugging-methods
pub struct TestNodeApi<'a> {
    provider: &'a AlloyProvider,
}

impl<'a> TestNodeApi<'a> {
    pub fn new(provider: &'a AlloyProvider) -> Self {
        Self { provider }
    }

    pub async fn snapshot(&self) -> Result<U256> {
        self.provider
            .raw_request("evm_snapshot".into(), ())
            .await
            .context("evm_snapshot failed")
    }

    pub async fn revert(&self, snapshot_id: &U256) -> Result<bool> {
        self.provider
            .raw_request("evm_revert".into(), [snapshot_id])
            .await
            .context("evm_revert failed")
    }

    pub async fn set_next_block_timestamp(&self, datetime: &DateTime<Utc>) -> Result<()> {
        self.provider
            .raw_request::<_, serde_json::Value>(
                "evm_setNextBlockTimestamp".into(),
                [datetime.timestamp()],
            )
            .await
            .context("evm_setNextBlockTimestamp failed")?;
        Ok(())
    }

    pub async fn mine_pending_block(&self) -> Result<()> {
        self.provider
            .raw_request::<_, serde_json::Value>("evm_mine".into(), ())
            .await
            .context("evm_mine failed")?;
        Ok(())
    }
}
