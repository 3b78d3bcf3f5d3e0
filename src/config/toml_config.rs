use crate::domain::model::{Patch, PatchKind};
use crate::domain::ports::PatchSource;
use crate::utils::error::{PatchError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_regex, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchSetConfig {
    pub patch_set: PatchSetInfo,
    #[serde(default)]
    pub patches: Vec<PatchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchSetInfo {
    pub name: String,
    pub description: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: PatchKind,
    pub find: String,
    pub replace: String,
}

fn default_kind() -> PatchKind {
    PatchKind::Literal
}

fn env_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$(\$?)\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex"))
}

impl PatchSetConfig {
    /// Load a patch set from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment. Unset variables are kept verbatim,
    /// and `$${VAR}` always yields a literal `${VAR}` for template literals in
    /// `find`/`replace`.
    fn substitute_env_vars(content: &str) -> String {
        env_var_regex()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[2];
                if !caps[1].is_empty() {
                    return format!("${{{}}}", var_name);
                }
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("patch_set.name", &self.patch_set.name)?;

        if let Some(target) = &self.patch_set.target {
            validate_path("patch_set.target", target)?;
        }

        if self.patches.is_empty() {
            return Err(PatchError::MissingConfigError {
                field: "patches".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for patch in &self.patches {
            validate_non_empty_string("patches.name", &patch.name)?;
            if !seen.insert(patch.name.as_str()) {
                return Err(PatchError::InvalidConfigValueError {
                    field: "patches.name".to_string(),
                    value: patch.name.clone(),
                    reason: "Duplicate patch name".to_string(),
                });
            }
            if patch.find.is_empty() {
                return Err(PatchError::InvalidConfigValueError {
                    field: format!("patches.{}.find", patch.name),
                    value: String::new(),
                    reason: "Pattern cannot be empty".to_string(),
                });
            }
            if patch.kind == PatchKind::Regex {
                validate_regex(&patch.name, &patch.find)?;
            }
        }

        Ok(())
    }
}

impl PatchSource for PatchSetConfig {
    fn patches(&self) -> Vec<Patch> {
        self.patches
            .iter()
            .map(|p| Patch {
                name: p.name.clone(),
                kind: p.kind,
                pattern: p.find.clone(),
                replacement: p.replace.clone(),
            })
            .collect()
    }

    fn default_target(&self) -> Option<&str> {
        self.patch_set.target.as_deref()
    }
}

impl Validate for PatchSetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// The built-in analytics fixes, exposed through the same seam as TOML sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPatchSet;

impl PatchSource for BuiltinPatchSet {
    fn patches(&self) -> Vec<Patch> {
        crate::core::patch::analytics_fallback_patches()
    }

    fn default_target(&self) -> Option<&str> {
        Some(crate::core::patch::DEFAULT_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_patch_set() {
        let toml_content = r#"
[patch_set]
name = "dashboard-fixes"
target = "app/(dashboard)/page.tsx"

[[patches]]
name = "null-stats"
find = "setStats(null)"
replace = "setStats(mockStats)"

[[patches]]
name = "fetch-data"
kind = "regex"
find = 'const data = await res\.json\(\)'
replace = "const data = (await res.json()) ?? {}"
"#;

        let config = PatchSetConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_target(), Some("app/(dashboard)/page.tsx"));

        let patches = config.patches();
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].kind, PatchKind::Literal);
        assert_eq!(patches[1].kind, PatchKind::Regex);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PAGE_PATCH_TEST_FALLBACK", "fallbackStats");

        let toml_content = r#"
[patch_set]
name = "env"

[[patches]]
name = "fallback"
find = "setStats(null)"
replace = "setStats(${PAGE_PATCH_TEST_FALLBACK})"

[[patches]]
name = "template"
find = "${notAnEnvVar-x}"
replace = "${PAGE_PATCH_TEST_UNSET_VAR}"
"#;

        let config = PatchSetConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.patches[0].replace, "setStats(fallbackStats)");
        assert_eq!(config.patches[1].find, "${notAnEnvVar-x}");
        assert_eq!(config.patches[1].replace, "${PAGE_PATCH_TEST_UNSET_VAR}");

        std::env::remove_var("PAGE_PATCH_TEST_FALLBACK");
    }

    #[test]
    fn test_escaped_placeholder_stays_literal() {
        std::env::set_var("PAGE_PATCH_TEST_TOKEN", "SECRET");

        let toml_content = r#"
[patch_set]
name = "escape"

[[patches]]
name = "template"
find = "`$${PAGE_PATCH_TEST_TOKEN}`"
replace = "`$${PAGE_PATCH_TEST_TOKEN} ${PAGE_PATCH_TEST_TOKEN}`"
"#;

        let config = PatchSetConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.patches[0].find, "`${PAGE_PATCH_TEST_TOKEN}`");
        assert_eq!(config.patches[0].replace, "`${PAGE_PATCH_TEST_TOKEN} SECRET`");

        std::env::remove_var("PAGE_PATCH_TEST_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let no_patches = PatchSetConfig::from_toml_str("[patch_set]\nname = \"empty\"\n").unwrap();
        assert!(matches!(
            no_patches.validate(),
            Err(PatchError::MissingConfigError { .. })
        ));

        let bad_regex = r#"
[patch_set]
name = "bad"

[[patches]]
name = "broken"
kind = "regex"
find = "setStats("
replace = ""
"#;
        let config = PatchSetConfig::from_toml_str(bad_regex).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PatchError::InvalidPattern { .. })
        ));

        let duplicate = r#"
[patch_set]
name = "dup"

[[patches]]
name = "a"
find = "x"
replace = "y"

[[patches]]
name = "a"
find = "z"
replace = "w"
"#;
        let config = PatchSetConfig::from_toml_str(duplicate).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let content = r#"
[patch_set]
name = "x"

[[patches]]
name = "a"
kind = "ast"
find = "x"
replace = "y"
"#;
        assert!(matches!(
            PatchSetConfig::from_toml_str(content),
            Err(PatchError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[patch_set]\nname = \"file-test\"\n\n[[patches]]\nname = \"a\"\nfind = \"x\"\nreplace = \"y\"\n")
            .unwrap();

        let config = PatchSetConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.patch_set.name, "file-test");
    }

    #[test]
    fn test_builtin_set() {
        let builtin = BuiltinPatchSet;
        assert_eq!(builtin.patches().len(), 3);
        assert_eq!(builtin.default_target(), Some(crate::core::patch::DEFAULT_TARGET));
    }
}
