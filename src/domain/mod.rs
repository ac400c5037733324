mod category;
mod chart;
mod ledger;
mod money;

pub use category::*;
pub use chart::*;
pub use ledger::*;
pub use money::*;
