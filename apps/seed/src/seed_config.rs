use std::env;

use timekeep_core::{AppError, AppResult};
use timekeep_domain::AclParseMode;

const DEFAULT_OWNER_SUBJECT: &str = "alice";
const DEFAULT_REVIEWER_SUBJECT: &str = "rita";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub acl_parse_mode: AclParseMode,
    pub owner_subject: String,
    pub reviewer_subject: String,
}

impl SeedConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let acl_parse_mode = match lookup("ACL_PARSE_MODE") {
            Some(value) => AclParseMode::parse(value.as_str())?,
            None => AclParseMode::default(),
        };

        let owner_subject = subject_env(&lookup, "SEED_OWNER_SUBJECT", DEFAULT_OWNER_SUBJECT)?;
        let reviewer_subject =
            subject_env(&lookup, "SEED_REVIEWER_SUBJECT", DEFAULT_REVIEWER_SUBJECT)?;

        if owner_subject == reviewer_subject {
            return Err(AppError::Validation(
                "SEED_OWNER_SUBJECT and SEED_REVIEWER_SUBJECT must differ".to_owned(),
            ));
        }

        Ok(Self {
            acl_parse_mode,
            owner_subject,
            reviewer_subject,
        })
    }
}

fn subject_env(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> AppResult<String> {
    match lookup(name) {
        None => Ok(default.to_owned()),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation(format!("{name} must not be empty")));
            }
            Ok(trimmed.to_owned())
        }
    }
}
