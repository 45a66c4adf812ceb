pub mod artifact;
pub mod manifest;
pub mod safe_tx;
pub mod upgrade_call;
