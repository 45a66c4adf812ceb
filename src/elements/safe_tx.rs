use alloy::{
    hex,
    primitives::{Address, Bytes, B256, U256},
    signers::{local::PrivateKeySigner, SignerSync},
    sol,
    sol_types::{eip712_domain, SolStruct},
};

sol! {
    /// Transaction struct hashed and signed by Safe owners, as defined by the
    /// Safe (>= 1.3.0) contracts.
    struct SafeTx {
        address to;
        uint256 value;
        bytes data;
        uint8 operation;
        uint256 safeTxGas;
        uint256 baseGas;
        uint256 gasPrice;
        address gasToken;
        address refundReceiver;
        uint256 nonce;
    }
}

/// Assembles the Safe transaction for an upgrade call. Value is always zero
/// and the operation is a plain CALL; refunds are left unconfigured.
pub fn build_safe_transaction(
    to: Address,
    data: Bytes,
    safe_tx_gas: u64,
    base_gas: u64,
    gas_price: u64,
    nonce: U256,
) -> SafeTx {
    SafeTx {
        to,
        value: U256::ZERO,
        data,
        operation: 0,
        safeTxGas: U256::from(safe_tx_gas),
        baseGas: U256::from(base_gas),
        gasPrice: U256::from(gas_price),
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        nonce,
    }
}

/// Canonical Safe transaction hash: the EIP-712 signing hash of [SafeTx]
/// under the Safe domain `(chainId, verifyingContract)`.
pub fn safe_transaction_hash(safe: Address, chain_id: u64, tx: &SafeTx) -> B256 {
    let domain = eip712_domain!(
        chain_id: chain_id,
        verifying_contract: safe,
    );
    tx.eip712_signing_hash(&domain)
}

/// Signs the Safe transaction hash with the proposer key. Returns the hash
/// together with the 65-byte `r || s || v` signature, hex-encoded the way the
/// transaction service expects it.
pub fn sign_safe_transaction(
    signer: &PrivateKeySigner,
    safe: Address,
    chain_id: u64,
    tx: &SafeTx,
) -> anyhow::Result<(B256, String)> {
    let hash = safe_transaction_hash(safe, chain_id, tx);
    let signature = signer.sign_hash_sync(&hash)?;
    Ok((hash, format!("0x{}", hex::encode(signature.as_bytes()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes};

    const SAFE: Address = address!("a192d0Ab946e3b4c4E1338dB135A62Ef0e34eDcf");

    fn sample_tx() -> SafeTx {
        build_safe_transaction(
            address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            bytes!("3659cfe6000000000000000000000000000000000000000000000000000000000000dead"),
            1_000_000,
            1_000_000,
            0,
            U256::from(7),
        )
    }

    #[test]
    fn root_type_matches_safe_contracts() {
        assert_eq!(
            SafeTx::eip712_root_type(),
            "SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)"
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let first = safe_transaction_hash(SAFE, 1, &sample_tx());
        let second = safe_transaction_hash(SAFE, 1, &sample_tx());
        assert_eq!(first, second);
    }

    #[test]
    fn hash_depends_on_nonce_and_chain_id() {
        let base = safe_transaction_hash(SAFE, 1, &sample_tx());

        let mut bumped = sample_tx();
        bumped.nonce = U256::from(8);
        assert_ne!(base, safe_transaction_hash(SAFE, 1, &bumped));

        assert_ne!(base, safe_transaction_hash(SAFE, 56, &sample_tx()));
    }

    #[test]
    fn signature_is_65_bytes_and_matches_hash() {
        let signer = PrivateKeySigner::random();
        let tx = sample_tx();

        let expected_hash = safe_transaction_hash(SAFE, 1, &tx);
        let (hash, signature) = sign_safe_transaction(&signer, SAFE, 1, &tx).unwrap();

        assert_eq!(hash, expected_hash);
        assert!(signature.starts_with("0x"));
        // 65 bytes -> "0x" + 130 hex chars.
        assert_eq!(signature.len(), 132);
    }
}
