mod apply;
mod ledger;
mod plan;

pub use apply::{ApplyOperation, ApplyOutput};
pub use ledger::ReleaseLedger;
pub use plan::{PlanInput, PlanOperation, PlanOutput};
