use std::{fs, path::Path};

use alloy::primitives::Address;
use anyhow::Context;
use serde::Deserialize;

/// On-disk OpenZeppelin upgrades manifest (`.openzeppelin/<network>.json`).
/// Tracks the proxy admin deployed for a given network; proxies and
/// implementations recorded alongside it are not needed here.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    admin: Option<ManifestDeployment>,
}

#[derive(Debug, Deserialize)]
struct ManifestDeployment {
    address: Address,
}

/// Manifest file name used by the upgrades tooling: well-known name for
/// mainnet, `unknown-<chainId>` for everything else.
pub fn manifest_file_name(chain_id: u64) -> String {
    match chain_id {
        1 => "mainnet.json".to_string(),
        _ => format!("unknown-{chain_id}.json"),
    }
}

impl Manifest {
    pub fn for_network(manifest_dir: &Path, chain_id: u64) -> anyhow::Result<Self> {
        let path = manifest_dir.join(manifest_file_name(chain_id));
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading network manifest {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing network manifest {}", path.display()))
    }

    pub fn admin_address(&self) -> Option<Address> {
        self.admin.as_ref().map(|deployment| deployment.address)
    }

    /// The resolved on-chain admin must be the one this manifest records;
    /// anything else is a misconfigured deployment.
    pub fn require_admin(&self, admin: Address) -> anyhow::Result<()> {
        if self.admin_address() != Some(admin) {
            anyhow::bail!("Proxy admin is not the one registered in the network manifest");
        }
        Ok(())
    }
}
