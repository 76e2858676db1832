use std::path::{Path, PathBuf};

/// Environment variable naming a directory of profile CSVs that replace
/// the embedded copies.
pub const PROFILES_ENV_VAR: &str = "OPTIK_PROFILES_DIR";

pub const EXAM_TYPES_FILE: &str = "exam_types.csv";
pub const SUBJECTS_FILE: &str = "subjects.csv";
pub const FIELD_ALIASES_FILE: &str = "field_aliases.csv";

/// Directory from [`PROFILES_ENV_VAR`], if set and non-empty.
pub fn profiles_dir_override() -> Option<PathBuf> {
    std::env::var_os(PROFILES_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn read_profile_file(dir: &Path, name: &str) -> crate::Result<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).map_err(|source| crate::StandardsError::Io { path, source })
}
