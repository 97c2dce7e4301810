pub mod account;
pub mod constants;
pub mod error;
pub mod params;
pub mod recovery_chain;
pub mod recovery_info;
pub mod transaction;
pub mod types;
pub mod vote;

pub use account::Account;
pub use constants::*;
pub use error::{NovaPayError, RecoveryError};
pub use params::Params;
pub use recovery_chain::chain_start;
pub use recovery_info::{ChainEntry, RecoveryInfo};
pub use transaction::{Transaction, TxKind};
pub use types::*;
pub use vote::{Certificate, Vote};
