use std::path::PathBuf;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use anyhow::Context;
use clap::Parser;
use log::info;

mod elements;
mod utils;

use elements::{
    artifact::ContractArtifact,
    manifest::Manifest,
    safe_tx::{build_safe_transaction, sign_safe_transaction},
    upgrade_call::UpgradeCall,
};
use utils::{
    deployer::deploy_implementation,
    network::NetworkResolver,
    safe_service::{tx_service_url, ProposalRequest, SafeServiceClient},
};

pub(crate) const DEFAULT_TX_SERVICE_URL: &str = "https://safe-transaction-mainnet.safe.global";

/// Propose a Safe transaction to upgrade a contract.
#[derive(Debug, Parser)]
struct Args {
    // The name of the factory contract that will be used as new implementation.
    #[clap(short, long)]
    factory: String,

    // The Gnosis Safe address.
    #[clap(long)]
    safe: Address,

    // The proxy contract address to upgrade.
    #[clap(long)]
    proxy: Address,

    #[clap(long, default_value_t = 1_000_000)]
    safe_tx_gas: u64,

    #[clap(long, default_value_t = 1_000_000)]
    base_gas: u64,

    #[clap(long, default_value_t = 0)]
    gas_price: u64,

    #[clap(long, default_value = "safe-contract-upgrader")]
    origin: String,

    // Transaction service endpoint for chains without a well-known one.
    #[clap(long, default_value = DEFAULT_TX_SERVICE_URL)]
    tx_service_url: String,

    #[clap(long)]
    rpc: String,

    // Key of the proposer; also pays for the implementation deployment.
    #[clap(long)]
    private_key: String,

    // Directory holding the hardhat-style build artifacts.
    #[clap(long, default_value = "artifacts")]
    artifacts_dir: PathBuf,

    #[clap(long, default_value = ".openzeppelin")]
    manifest_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::init();

    let signer: PrivateKeySigner = args.private_key.parse().context("invalid private key")?;
    let sender = signer.address();

    let network = NetworkResolver::connect(&args.rpc).await?;
    let chain_id = network.chain_id();
    let service = SafeServiceClient::new(tx_service_url(chain_id, &args.tx_service_url));
    info!(
        "connected to chain {chain_id}, transaction service at {}",
        service.base_url()
    );

    let artifact = ContractArtifact::load(&args.artifacts_dir, &args.factory)?;
    let new_implementation = deploy_implementation(&args.rpc, signer.clone(), &artifact).await?;
    info!("deployed new implementation at {new_implementation}");

    let admin = network.get_proxy_admin(args.proxy).await?;
    let admin_code = network.get_code_at(admin).await?;
    let call = UpgradeCall::classify(args.proxy, admin, &admin_code);

    match &call {
        UpgradeCall::Direct { .. } => info!("proxy {} is directly upgradeable", args.proxy),
        UpgradeCall::AdminMediated { admin, .. } => {
            let manifest = Manifest::for_network(&args.manifest_dir, chain_id)?;
            manifest.require_admin(*admin)?;
            info!("proxy {} is admin-mediated via {admin}", args.proxy);
        }
    }

    let nonce = network.safe_nonce(args.safe).await?;
    let tx = build_safe_transaction(
        call.target(),
        call.calldata(new_implementation),
        args.safe_tx_gas,
        args.base_gas,
        args.gas_price,
        nonce,
    );

    let (safe_tx_hash, signature) = sign_safe_transaction(&signer, args.safe, chain_id, &tx)?;
    let proposal = ProposalRequest::new(&tx, safe_tx_hash, sender, signature, args.origin);
    service.propose_transaction(args.safe, &proposal).await?;

    info!("proposed safe transaction {safe_tx_hash}");

    Ok(())
}
