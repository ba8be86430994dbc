use {
    alloy::primitives::Bytes,
    alloy_json_abi::JsonAbi,
    anyhow::{Context, Result, ensure},
    serde::Deserialize,
    std::path::{Path, PathBuf},
};

/// A compiled contract as produced by a separate compilation step: the ABI
/// and the creation bytecode. Consumed as an opaque input.
///
/// Both the solc standard-JSON shape (`evm.bytecode.object`) and the flat
/// shape some toolchains emit (`bytecode` at the top level) are accepted.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "RawArtifact")]
pub struct Artifact {
    pub abi: JsonAbi,
    bytecode: String,
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<String>,
    #[serde(default)]
    evm: Option<RawEvm>,
}

#[derive(Deserialize)]
struct RawEvm {
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
struct RawBytecode {
    object: String,
}

impl From<RawArtifact> for Artifact {
    fn from(raw: RawArtifact) -> Self {
        let bytecode = raw
            .evm
            .map(|evm| evm.bytecode.object)
            .or(raw.bytecode)
            .unwrap_or_default();
        Self {
            abi: raw.abi,
            bytecode,
        }
    }
}

impl Artifact {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse contract artifact")
    }

    /// The creation bytecode. Fails for abstract contracts, whose artifacts
    /// carry an empty bytecode object.
    pub fn bytecode(&self) -> Result<Bytes> {
        ensure!(
            !self.is_abstract(),
            "bytecode is empty; the contract is likely abstract and missing a function \
             implementation",
        );
        let stripped = self.bytecode.trim_start_matches("0x");
        let bytes = hex::decode(stripped).context("artifact bytecode is not valid hex")?;
        Ok(bytes.into())
    }

    pub fn is_abstract(&self) -> bool {
        self.bytecode.trim_start_matches("0x").is_empty()
    }
}

/// Loads artifacts by contract name from a directory of `<Name>.json` files.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self, name: &str) -> Result<Artifact> {
        let path = self.path(name);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        Artifact::from_json(&json).with_context(|| format!("invalid artifact for {name}"))
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
