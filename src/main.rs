use clap::Parser;
use page_patch::core::summary::{error_json, summary};
use page_patch::core::PatchSource;
use page_patch::utils::{logger, validation::Validate};
use page_patch::{BuiltinPatchSet, CliConfig, LocalStorage, PatchEngine, PatchError, PatchSetConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // Logging
    if config.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // Validate arguments
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&config, &e);
    }

    // Pick the patch set
    let source: Box<dyn PatchSource> = match &config.patches {
        Some(path) => {
            let patch_set = match PatchSetConfig::from_file(path).and_then(|set| {
                set.validate()?;
                Ok(set)
            }) {
                Ok(set) => set,
                Err(e) => {
                    tracing::error!("❌ Failed to load patch set '{}': {}", path, e);
                    exit_with(&config, &e);
                }
            };
            tracing::info!("📁 Using patch set '{}' from {}", patch_set.patch_set.name, path);
            Box::new(patch_set)
        }
        None => Box::new(BuiltinPatchSet),
    };

    // Build storage and engine
    let target = config.resolve_target(source.default_target()).to_string();
    let storage = LocalStorage::new(config.root.clone());
    let engine = PatchEngine::with_options(storage, source.patches(), config.engine_options());

    match engine.run(&target).await {
        Ok(run) => {
            if config.json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                if config.dry_run && !run.diff.is_empty() {
                    print!("{}", run.diff);
                }
                println!("{}", summary(&run));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Patch run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&config, &e);
        }
    }

    Ok(())
}

/// Reports `error` on stderr (JSON under `--json`) and exits by severity.
fn exit_with(config: &CliConfig, error: &PatchError) -> ! {
    if config.json {
        eprintln!("{}", error_json(error));
    } else {
        eprintln!("❌ {}", error.user_friendly_message());
        eprintln!("💡 {}", error.recovery_suggestion());
    }

    std::process::exit(error.severity().exit_code());
}
