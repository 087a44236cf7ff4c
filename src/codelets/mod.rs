mod kind;
mod run;

pub use kind::{CodeletKind, StructureCategory};
pub use run::{run_codelet, CodeletOutcome};
