use {
    alloy::primitives::Address,
    anyhow::{Context, Result, bail, ensure},
    serde::Deserialize,
    std::collections::{BTreeMap, HashSet},
};

/// How a role name maps to an account, as written in the harness config:
///
/// ```toml
/// [named_accounts]
/// deployer = 0
/// sandAdmin = 0
/// assetAdmin = "sandAdmin"  # alias to another role
/// others = "from:3"         # all remaining accounts starting at index 3
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AccountSpec {
    Index(usize),
    Named(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccountsConfig {
    pub named_accounts: BTreeMap<String, AccountSpec>,
}

impl AccountsConfig {
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("invalid named-accounts config")
    }

    /// Resolves every role against the node's account list. Aliases are
    /// followed transitively; cycles and out-of-range indices are errors.
    pub fn resolve(&self, accounts: &[Address]) -> Result<NamedAccounts> {
        let mut single = BTreeMap::new();
        let mut ranges = BTreeMap::new();
        for (name, spec) in &self.named_accounts {
            let mut visited = HashSet::from([name.as_str()]);
            let mut spec = spec;
            loop {
                match spec {
                    AccountSpec::Index(index) => {
                        let address = accounts.get(*index).copied().with_context(|| {
                            format!(
                                "role {name} wants account index {index} but the node only has \
                                 {} accounts",
                                accounts.len()
                            )
                        })?;
                        single.insert(name.clone(), address);
                        break;
                    }
                    AccountSpec::Named(target) => {
                        if let Some(start) = target.strip_prefix("from:") {
                            let start: usize = start
                                .parse()
                                .with_context(|| format!("role {name}: bad range `{target}`"))?;
                            ensure!(
                                start <= accounts.len(),
                                "role {name}: range starts at {start} but the node only has {} \
                                 accounts",
                                accounts.len()
                            );
                            ranges.insert(name.clone(), accounts[start..].to_vec());
                            break;
                        }
                        if !visited.insert(target.as_str()) {
                            bail!("named-account aliases form a cycle involving {name}");
                        }
                        spec = self
                            .named_accounts
                            .get(target)
                            .with_context(|| format!("role {name} aliases unknown role {target}"))?;
                    }
                }
            }
        }
        Ok(NamedAccounts { single, ranges })
    }
}

/// The resolved named-account table handed to stages and tests.
#[derive(Clone, Debug, Default)]
pub struct NamedAccounts {
    single: BTreeMap<String, Address>,
    ranges: BTreeMap<String, Vec<Address>>,
}

impl NamedAccounts {
    pub fn address(&self, name: &str) -> Result<Address> {
        self.single
            .get(name)
            .copied()
            .with_context(|| format!("no named account `{name}`"))
    }

    /// The account list behind a `from:N` role.
    pub fn addresses(&self, name: &str) -> Result<&[Address]> {
        self.ranges
            .get(name)
            .map(Vec::as_slice)
            .with_context(|| format!("no named account range `{name}`"))
    }
}
