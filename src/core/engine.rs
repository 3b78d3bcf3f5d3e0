use crate::core::diff::unified_diff;
use crate::core::patch::apply_patches;
use crate::domain::model::{Patch, PatchReport};
use crate::domain::ports::Storage;
use crate::utils::error::{PatchError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Compute the result but leave the file untouched.
    pub dry_run: bool,
    /// Write `<file>.<timestamp>.bak` before overwriting.
    pub backup: bool,
    /// Treat a run where no patch matched as an error.
    pub require_match: bool,
}

pub struct PatchEngine<S: Storage> {
    storage: S,
    patches: Vec<Patch>,
    options: EngineOptions,
}

/// Report plus the diff of what changed (empty when nothing did).
#[derive(Debug, Clone, Serialize)]
pub struct PatchRun {
    #[serde(flatten)]
    pub report: PatchReport,
    pub diff: String,
}

impl<S: Storage> PatchEngine<S> {
    pub fn new(storage: S, patches: Vec<Patch>) -> Self {
        Self::with_options(storage, patches, EngineOptions::default())
    }

    pub fn with_options(storage: S, patches: Vec<Patch>, options: EngineOptions) -> Self {
        Self {
            storage,
            patches,
            options,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn run(&self, path: &str) -> Result<PatchRun> {
        let display_path = self.storage.display_path(path);

        if !self.storage.exists(path).await? {
            return Err(PatchError::TargetNotFound { path: display_path });
        }

        // Read
        tracing::info!("📄 Reading {}", display_path);
        let original = self.storage.read_to_string(path).await?;

        // Patch
        tracing::info!("🔧 Applying {} patch(es)", self.patches.len());
        let (patched, outcomes) = apply_patches(&original, &self.patches)?;
        let changed = patched != original;

        let mut report = PatchReport {
            path: display_path,
            outcomes,
            changed,
            written: false,
            backup_path: None,
        };

        if report.is_noop() {
            if self.options.require_match {
                return Err(PatchError::NoPatternMatched { path: report.path });
            }
            tracing::warn!("No patch matched in {}, file left unchanged", report.path);
        } else if !changed {
            tracing::warn!(
                "{} patch(es) matched in {} but the content is unchanged",
                report.applied_count(),
                report.path
            );
        }

        // Unchanged content is never rewritten
        if !changed {
            return Ok(PatchRun {
                report,
                diff: String::new(),
            });
        }

        let diff = unified_diff(path, &original, &patched);

        if self.options.dry_run {
            tracing::info!("🔍 Dry run, not writing {}", report.path);
            return Ok(PatchRun { report, diff });
        }

        // Backup goes down before the original is overwritten
        if self.options.backup {
            let backup = backup_name(path);
            self.storage.write(&backup, &original).await?;
            report.backup_path = Some(self.storage.display_path(&backup));
            tracing::info!("💾 Backup written to {}", self.storage.display_path(&backup));
        }

        // Write
        self.storage.write(path, &patched).await?;
        report.written = true;
        tracing::info!(
            "✅ Wrote {} ({} replacement(s))",
            report.path,
            report.total_replacements()
        );

        Ok(PatchRun { report, diff })
    }
}

fn backup_name(path: &str) -> String {
    format!("{}.{}.bak", path, chrono::Local::now().format("%Y%m%d%H%M%S"))
}
