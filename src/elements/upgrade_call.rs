use alloy::{
    primitives::{Address, Bytes},
    sol,
    sol_types::SolCall,
};

sol! {
    interface ITransparentUpgradeableProxy {
        function upgradeTo(address newImplementation) external;
    }

    interface IProxyAdmin {
        function upgrade(address proxy, address implementation) external;
    }
}

/// The two call shapes a transparent proxy upgrade can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeCall {
    /// The proxy has no separate admin contract and exposes `upgradeTo` itself.
    Direct { proxy: Address },
    /// A ProxyAdmin contract owns the proxy; the upgrade goes through it.
    AdminMediated { admin: Address, proxy: Address },
}

impl UpgradeCall {
    /// Picks the call shape from the proxy's EIP-1967 admin slot contents.
    /// An empty slot or an admin address with no deployed code means the
    /// proxy is upgraded directly.
    pub fn classify(proxy: Address, admin: Address, admin_code: &[u8]) -> Self {
        if admin.is_zero() || admin_code.is_empty() {
            Self::Direct { proxy }
        } else {
            Self::AdminMediated { admin, proxy }
        }
    }

    pub fn target(&self) -> Address {
        match self {
            Self::Direct { proxy } => *proxy,
            Self::AdminMediated { admin, .. } => *admin,
        }
    }

    pub fn calldata(&self, new_implementation: Address) -> Bytes {
        match self {
            Self::Direct { .. } => ITransparentUpgradeableProxy::upgradeToCall {
                newImplementation: new_implementation,
            }
            .abi_encode()
            .into(),
            Self::AdminMediated { proxy, .. } => IProxyAdmin::upgradeCall {
                proxy: *proxy,
                implementation: new_implementation,
            }
            .abi_encode()
            .into(),
        }
    }
}
