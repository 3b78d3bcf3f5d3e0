pub mod diff;
pub mod engine;
pub mod patch;
pub mod summary;

pub use crate::domain::model::{Patch, PatchKind, PatchOutcome, PatchReport};
pub use crate::domain::ports::{PatchSource, Storage};
pub use crate::utils::error::Result;
pub use engine::{EngineOptions, PatchEngine, PatchRun};
