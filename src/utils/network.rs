use alloy::{
    hex::FromHex,
    primitives::{Address, FixedBytes, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    sol,
    transports::http::Http,
};
use anyhow::Context;
use reqwest::Client;

sol! {
    #[sol(rpc)]
    contract GnosisSafe {
        function nonce() public view returns (uint256);
    }
}

const EIP1967_PROXY_ADMIN_SLOT: &str =
    "0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103";

/// Read-only view of the connected chain: chain id, bytecode, the proxy admin
/// slot and the Safe nonce. Everything is read once per run.
pub struct NetworkResolver {
    provider: RootProvider<Http<Client>>,
    chain_id: u64,
}

impl NetworkResolver {
    pub async fn connect(rpc: &str) -> anyhow::Result<Self> {
        let provider = ProviderBuilder::new().on_http(rpc.parse().context("invalid rpc url")?);
        let chain_id = provider
            .get_chain_id()
            .await
            .context("fetching chain id from the provider")?;
        Ok(Self { provider, chain_id })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub async fn get_code_at(&self, address: Address) -> anyhow::Result<Vec<u8>> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .with_context(|| format!("fetching code at {address}"))?;
        Ok(code.to_vec())
    }

    async fn storage_at(
        &self,
        address: Address,
        key: FixedBytes<32>,
    ) -> anyhow::Result<FixedBytes<32>> {
        let storage = self
            .provider
            .get_storage_at(address, U256::from_be_bytes(key.0))
            .await
            .with_context(|| format!("reading storage of {address}"))?;

        Ok(FixedBytes::from_slice(&storage.to_be_bytes_vec()))
    }

    /// Address stored in the proxy's EIP-1967 admin slot; zero when the slot
    /// is empty.
    pub async fn get_proxy_admin(&self, proxy: Address) -> anyhow::Result<Address> {
        let slot = self
            .storage_at(
                proxy,
                FixedBytes::<32>::from_hex(EIP1967_PROXY_ADMIN_SLOT).unwrap(),
            )
            .await?;
        Ok(Address::from_slice(&slot[12..]))
    }

    /// Current nonce of the Safe contract, used as the proposal nonce.
    pub async fn safe_nonce(&self, safe: Address) -> anyhow::Result<U256> {
        let safe = GnosisSafe::new(safe, self.provider.clone());
        Ok(safe
            .nonce()
            .call()
            .await
            .context("reading the safe nonce")?
            ._0)
    }
}
