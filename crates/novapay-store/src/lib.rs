pub mod accounts;
pub mod transactions;
pub mod votes;

pub use accounts::AccountStore;
pub use transactions::TxStore;
pub use votes::VoteStore;
