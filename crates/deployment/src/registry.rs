use {
    crate::handle::ContractHandle,
    alloy::primitives::Address,
    alloy_dyn_abi::DynSolValue,
    alloy_json_abi::JsonAbi,
    anyhow::{Context, Result},
    ethrpc::AlloyProvider,
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, path::Path},
};

/// A recorded deployment: everything needed to reconstruct a handle later
/// plus the constructor arguments for reference.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Deployment {
    pub address: Address,
    pub abi: JsonAbi,
    pub args: Vec<serde_json::Value>,
}

/// Named-key store of deployments. Lives in memory during a run and can be
/// persisted as JSON so later stages, test runs or CLI invocations can
/// recover handles without redeploying.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Registry {
    deployments: BTreeMap<String, Deployment>,
}

impl Registry {
    pub fn record(
        &mut self,
        name: impl Into<String>,
        abi: JsonAbi,
        args: &[DynSolValue],
        address: Address,
    ) {
        self.deployments.insert(
            name.into(),
            Deployment {
                address,
                abi,
                args: args.iter().map(arg_to_json).collect(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Deployment> {
        self.deployments.get(name)
    }

    /// Reconstructs a contract handle for a previously registered name.
    pub fn contract(&self, name: &str, provider: &AlloyProvider) -> Option<ContractHandle> {
        let deployment = self.get(name)?;
        Some(ContractHandle::new(
            name,
            deployment.address,
            deployment.abi.clone(),
            provider.clone(),
        ))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.deployments.keys().map(String::as_str)
    }

    /// Loads a registry from disk. A missing file yields an empty registry
    /// so a fresh environment does not need a seed file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read deployments file {}", path.display()))?;
        serde_json::from_str(&json).context("deployments file is not valid JSON")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize registry")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write deployments file {}", path.display()))
    }
}

/// Converts a constructor argument into a JSON value for the registry
/// record. This is metadata for humans and verification tooling, not a
/// round-trippable encoding.
fn arg_to_json(value: &DynSolValue) -> serde_json::Value {
    match value {
        DynSolValue::Address(address) => serde_json::json!(address),
        DynSolValue::Bool(b) => serde_json::json!(b),
        DynSolValue::String(s) => serde_json::json!(s),
        DynSolValue::Bytes(bytes) => serde_json::json!(format!("0x{}", hex::encode(bytes))),
        DynSolValue::FixedBytes(word, size) => {
            serde_json::json!(format!("0x{}", hex::encode(&word[..*size])))
        }
        DynSolValue::Uint(value, _) => serde_json::json!(value.to_string()),
        DynSolValue::Int(value, _) => serde_json::json!(value.to_string()),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) | DynSolValue::Tuple(values) => {
            serde_json::Value::Array(values.iter().map(arg_to_json).collect())
        }
        DynSolValue::Function(f) => serde_json::json!(format!("0x{}", hex::encode(f.as_slice()))),
    }
}
