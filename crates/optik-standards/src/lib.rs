//! Exam profiles and field-alias tables.
//!
//! The default profiles (LGS, TYT, AYT_SAY) and the header alias table are
//! embedded as CSV and parsed on demand. Setting `OPTIK_PROFILES_DIR` to a
//! directory holding `exam_types.csv`, `subjects.csv` and
//! `field_aliases.csv` replaces the embedded copies.

pub mod aliases;
pub mod embedded;
pub mod error;
pub mod paths;
pub mod profiles;
mod reader;

pub use aliases::{
    answer_key_aliases, load_field_aliases, load_field_aliases_from_dir,
    load_field_aliases_from_str, student_aliases,
};
pub use error::{Result, StandardsError};
pub use paths::{PROFILES_ENV_VAR, profiles_dir_override};
pub use profiles::{find_profile, load_profiles, load_profiles_from_dir, load_profiles_from_str};
