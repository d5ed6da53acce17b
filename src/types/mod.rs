pub mod identifiers;
pub mod kind;

pub use identifiers::DocumentVersion;
pub use kind::{AnalysisKind, Kind, UnknownKind};
