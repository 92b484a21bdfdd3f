use std::fmt;

use super::DomainError;

pub const MAX_ASSESSMENT_ID_LEN: usize = 128;

/// Caller-supplied identifier that ties a transcript, its grading job and
/// the resulting report together.
///
/// Restricted to ASCII letters, digits, `.`, `_` and `-`: the id is embedded
/// in job handles that are later used as URL path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssessmentId(String);

impl AssessmentId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::EmptyAssessmentId);
        }
        if trimmed.chars().count() > MAX_ASSESSMENT_ID_LEN {
            return Err(DomainError::AssessmentIdTooLong(MAX_ASSESSMENT_ID_LEN));
        }
        if let Some(invalid) = trimmed.chars().find(|c| !is_allowed(*c)) {
            return Err(DomainError::InvalidAssessmentIdChar(invalid));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
