use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use anyhow::Context;
use log::debug;

use crate::elements::artifact::ContractArtifact;

/// Deploys the new implementation bytecode from the caller's key and returns
/// the deployed address once the receipt is in.
pub async fn deploy_implementation(
    rpc: &str,
    signer: PrivateKeySigner,
    artifact: &ContractArtifact,
) -> anyhow::Result<Address> {
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(rpc.parse().context("invalid rpc url")?);

    debug!(
        "deploying {} ({} bytes of creation code)",
        artifact.contract_name,
        artifact.bytecode.len()
    );

    let tx = TransactionRequest::default().with_deploy_code(artifact.bytecode.clone());
    let receipt = provider
        .send_transaction(tx)
        .await
        .context("sending the implementation deployment transaction")?
        .get_receipt()
        .await
        .context("awaiting the deployment receipt")?;

    receipt
        .contract_address
        .context("deployment receipt carries no contract address")
}
