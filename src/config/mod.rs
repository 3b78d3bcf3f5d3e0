pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::patch::DEFAULT_TARGET;
    use crate::core::EngineOptions;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "page-patch")]
    #[command(about = "Apply the analytics fallback patches to a page source file")]
    pub struct CliConfig {
        #[arg(help = "File to patch [default: app/(dashboard)/analytics/page.tsx]")]
        pub target: Option<String>,

        #[arg(long, default_value = ".")]
        pub root: String,

        /// TOML patch set to use instead of the built-in analytics patches
        #[arg(long)]
        pub patches: Option<String>,

        #[arg(long, help = "Show the diff without writing the file")]
        pub dry_run: bool,

        #[arg(long, help = "Keep a timestamped copy of the original file")]
        pub backup: bool,

        #[arg(long, help = "Fail when no patch matches")]
        pub strict: bool,

        #[arg(long, help = "Print the report as JSON")]
        pub json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Explicit target, then the patch set's own target, then the built-in default.
        pub fn resolve_target<'a>(&'a self, patch_set_target: Option<&'a str>) -> &'a str {
            self.target
                .as_deref()
                .or(patch_set_target)
                .unwrap_or(DEFAULT_TARGET)
        }

        pub fn engine_options(&self) -> EngineOptions {
            EngineOptions {
                dry_run: self.dry_run,
                backup: self.backup,
                require_match: self.strict,
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("root", &self.root)?;
            if let Some(target) = &self.target {
                validate_path("target", target)?;
            }
            if let Some(patches) = &self.patches {
                validate_path("patches", patches)?;
            }
            Ok(())
        }
    }

}
