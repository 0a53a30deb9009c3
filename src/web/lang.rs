use crate::utils::error::{Result, RibbitError};
use regex::Regex;
use std::sync::LazyLock;

static LANG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("language tag pattern"));

/// Language segment of the URL, e.g. `en` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lang(String);

impl Lang {
    pub fn parse(value: &str) -> Result<Self> {
        if LANG_PATTERN.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(RibbitError::not_found(format!("language '{}'", value)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
