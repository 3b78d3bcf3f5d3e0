pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::{BuiltinPatchSet, PatchSetConfig};
pub use core::{EngineOptions, PatchEngine, PatchRun};
pub use domain::model::{Patch, PatchKind, PatchOutcome, PatchReport};
pub use utils::error::{PatchError, Result};
