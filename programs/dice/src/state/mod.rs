pub mod bet;
pub mod house_ledger;

pub use bet::*;
pub use house_ledger::*;
