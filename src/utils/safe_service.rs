use alloy::primitives::{Address, B256};
use anyhow::Context;
use log::debug;
use serde::Serialize;

use crate::elements::safe_tx::SafeTx;

/// Chains with a well-known Safe Transaction Service deployment. The static
/// mapping always wins; the fallback only covers unmapped chains.
pub fn tx_service_url(chain_id: u64, fallback: &str) -> String {
    match chain_id {
        1 => "https://safe-transaction-mainnet.safe.global".to_string(),
        56 => "https://safe-transaction-bsc.safe.global".to_string(),
        137 => "https://safe-transaction-polygon.safe.global".to_string(),
        _ => fallback.to_string(),
    }
}

/// Payload of the transaction service `multisig-transactions` endpoint.
/// Numeric fields go out as decimal strings, which the service accepts for
/// all integer fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    to: Address,
    value: String,
    data: String,
    operation: u8,
    safe_tx_gas: String,
    base_gas: String,
    gas_price: String,
    gas_token: Address,
    refund_receiver: Address,
    nonce: String,
    contract_transaction_hash: B256,
    sender: Address,
    signature: String,
    origin: String,
}

impl ProposalRequest {
    pub fn new(
        tx: &SafeTx,
        safe_tx_hash: B256,
        sender: Address,
        signature: String,
        origin: String,
    ) -> Self {
        Self {
            to: tx.to,
            value: tx.value.to_string(),
            data: tx.data.to_string(),
            operation: tx.operation,
            safe_tx_gas: tx.safeTxGas.to_string(),
            base_gas: tx.baseGas.to_string(),
            gas_price: tx.gasPrice.to_string(),
            gas_token: tx.gasToken,
            refund_receiver: tx.refundReceiver,
            nonce: tx.nonce.to_string(),
            contract_transaction_hash: safe_tx_hash,
            sender,
            signature,
            origin,
        }
    }
}

pub struct SafeServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl SafeServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submits the signed proposal. Any non-success status is fatal and
    /// surfaces the response body.
    pub async fn propose_transaction(
        &self,
        safe: Address,
        proposal: &ProposalRequest,
    ) -> anyhow::Result<()> {
        let url = format!(
            "{}/api/v1/safes/{safe}/multisig-transactions/",
            self.base_url
        );
        debug!("proposing safe transaction to {url}");

        let response = self
            .http
            .post(&url)
            .json(proposal)
            .send()
            .await
            .context("submitting the proposal to the transaction service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("transaction service rejected the proposal ({status}): {body}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::safe_tx::build_safe_transaction;
    use alloy::primitives::{address, bytes, U256};

    const OVERRIDE: &str = "https://safe-transaction.example.com";

    #[test]
    fn mapped_chains_ignore_the_override() {
        assert_eq!(
            tx_service_url(1, OVERRIDE),
            "https://safe-transaction-mainnet.safe.global"
        );
        assert_eq!(
            tx_service_url(56, OVERRIDE),
            "https://safe-transaction-bsc.safe.global"
        );
        assert_eq!(
            tx_service_url(137, OVERRIDE),
            "https://safe-transaction-polygon.safe.global"
        );
    }

    #[test]
    fn unmapped_chain_uses_the_override() {
        assert_eq!(tx_service_url(31337, OVERRIDE), OVERRIDE);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let client = SafeServiceClient::new("https://safe-transaction.example.com/");
        assert_eq!(client.base_url(), "https://safe-transaction.example.com");
    }

    #[test]
    fn proposal_payload_uses_service_field_names() {
        let tx = build_safe_transaction(
            address!("1c479675ad559DC151F6Ec7ed3FbF8ceE79582B6"),
            bytes!("3659cfe6"),
            1_000_000,
            1_000_000,
            0,
            U256::from(3),
        );
        let proposal = ProposalRequest::new(
            &tx,
            B256::ZERO,
            address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xdeadbeef".to_string(),
            "safe-contract-upgrader".to_string(),
        );

        let payload = serde_json::to_value(&proposal).unwrap();
        assert_eq!(payload["safeTxGas"], "1000000");
        assert_eq!(payload["baseGas"], "1000000");
        assert_eq!(payload["gasPrice"], "0");
        assert_eq!(payload["value"], "0");
        assert_eq!(payload["nonce"], "3");
        assert_eq!(payload["data"], "0x3659cfe6");
        assert_eq!(payload["origin"], "safe-contract-upgrader");
        assert!(payload["contractTransactionHash"].is_string());
        assert!(payload["refundReceiver"].is_string());
    }
}
