pub mod deployer;
pub mod network;
pub mod safe_service;
