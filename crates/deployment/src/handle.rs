use {
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes, TxHash},
        providers::{PendingTransactionError, Provider},
        rpc::types::{TransactionReceipt, TransactionRequest},
        transports::{RpcError, TransportErrorKind},
    },
    alloy_dyn_abi::{DynSolValue, EventExt, FunctionExt, JsonAbiExt},
    alloy_json_abi::{Event, Function, JsonAbi},
    ethrpc::AlloyProvider,
};

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("contract {contract} has no function `{function}`")]
    UnknownFunction { contract: String, function: String },
    #[error("contract {contract} has no event `{event}`")]
    UnknownEvent { contract: String, event: String },
    #[error("abi encoding/decoding failed: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    Pending(#[from] PendingTransactionError),
}

/// A deployed contract addressed through a runtime ABI.
///
/// The equivalent of instantiating the RPC client's generic contract object
/// with an artifact's ABI: calls are made by function name and dynamically
/// encoded, no generated bindings involved.
#[derive(Clone, Debug)]
pub struct ContractHandle {
    name: String,
    address: Address,
    abi: JsonAbi,
    provider: AlloyProvider,
}

impl ContractHandle {
    pub fn new(
        name: impl Into<String>,
        address: Address,
        abi: JsonAbi,
        provider: AlloyProvider,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            abi,
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Reconnects the handle to the same ABI at a different address. Used
    /// for addressing a proxy through its implementation's interface.
    pub fn at(&self, name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
            abi: self.abi.clone(),
            provider: self.provider.clone(),
        }
    }

    fn function(&self, name: &str) -> Result<&Function, CallError> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| CallError::UnknownFunction {
                contract: self.name.clone(),
                function: name.to_string(),
            })
    }

    fn event(&self, name: &str) -> Result<&Event, CallError> {
        self.abi
            .event(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| CallError::UnknownEvent {
                contract: self.name.clone(),
                event: name.to_string(),
            })
    }

    /// ABI-encodes a call to the named function. Used for constructor-time
    /// initialization data of proxies.
    pub fn encode_call(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes, CallError> {
        let function = self.function(function)?;
        Ok(function.abi_encode_input(args)?.into())
    }

    /// Executes a read-only call and returns the decoded outputs.
    pub async fn call(
        &self,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, CallError> {
        let function = self.function(function)?;
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(Bytes::from(function.abi_encode_input(args)?));
        let output = self.provider.call(tx).await?;
        Ok(function.abi_decode_output(&output)?)
    }

    /// Submits a state-changing transaction from the given account and waits
    /// for it to be mined. Fails if the transaction reverts.
    pub async fn send(
        &self,
        from: Address,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<TransactionReceipt, CallError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.address)
            .with_input(self.encode_call(function, args)?);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await?
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(CallError::Reverted(receipt.transaction_hash));
        }
        Ok(receipt)
    }

    /// Decodes all logs in the receipt that were emitted by this contract
    /// for the named event. Logs of other contracts and other events are
    /// skipped.
    pub fn events_from_receipt(
        &self,
        event: &str,
        receipt: &TransactionReceipt,
    ) -> Result<Vec<DecodedLog>, CallError> {
        let event = self.event(event)?;
        let selector = event.selector();
        let mut decoded = Vec::new();
        for log in receipt.inner.logs() {
            let data = &log.inner.data;
            if log.inner.address != self.address || data.topics().first() != Some(&selector) {
                continue;
            }
            let fields = event.decode_log_parts(data.topics().iter().copied(), &data.data)?;
            decoded.push(DecodedLog {
                indexed: fields.indexed,
                body: fields.body,
            });
        }
        Ok(decoded)
    }
}

/// A single decoded log: the indexed topics followed by the non-indexed
/// data fields, in declaration order within each group.
#[derive(Clone, Debug)]
pub struct DecodedLog {
    pub indexed: Vec<DynSolValue>,
    pub body: Vec<DynSolValue>,
}
