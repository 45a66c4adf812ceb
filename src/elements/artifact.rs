use std::{fs, path::Path};

use alloy::primitives::Bytes;
use anyhow::Context;
use serde::Deserialize;

/// Hardhat-style build artifact. Only the creation bytecode is needed to
/// deploy the new implementation; the rest of the file is ignored.
#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: String,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Loads `<artifacts_dir>/<factory>.json`. A missing file or an artifact
    /// without creation bytecode is fatal: there is nothing to deploy.
    pub fn load(artifacts_dir: &Path, factory: &str) -> anyhow::Result<Self> {
        let path = artifacts_dir.join(format!("{factory}.json"));
        if !path.exists() {
            anyhow::bail!(
                "No deployment provided for factory `{factory}` (missing {})",
                path.display()
            );
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading artifact {}", path.display()))?;
        let artifact: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing artifact {}", path.display()))?;

        if artifact.bytecode.is_empty() {
            anyhow::bail!("No deployment provided for factory `{factory}` (empty bytecode)");
        }

        Ok(artifact)
    }
}
