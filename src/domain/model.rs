use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchKind {
    Literal,
    Regex,
}

/// A single textual substitution. Regex replacements are inserted verbatim,
/// `$` in `replacement` is never treated as a capture reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub name: String,
    pub kind: PatchKind,
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOutcome {
    pub name: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchReport {
    pub path: String,
    pub outcomes: Vec<PatchOutcome>,
    pub changed: bool,
    pub written: bool,
    pub backup_path: Option<String>,
}

impl PatchReport {
    pub fn total_replacements(&self) -> usize {
        self.outcomes.iter().map(|o| o.replacements).sum()
    }

    /// Number of patches that matched at least once.
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.replacements > 0).count()
    }

    /// True when no patch matched at all. A run can match and still leave
    /// the text as it was (`changed == false`), which is not a no-op.
    pub fn is_noop(&self) -> bool {
        self.applied_count() == 0
    }
}
