use std::fmt;

use crate::check::CheckFailure;

/// Machine-readable error codes for harness failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidTolerance,
    ConstraintViolated,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InvalidTolerance => "E1003",
            Self::ConstraintViolated => "E2001",
        }
    }

    /// Short human-facing summary for logs and test output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidTolerance => "Invalid comparison tolerance",
            Self::ConstraintViolated => "Candidate violated its constraint",
        }
    }

    /// Optional remediation hint shown next to a failing assertion.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in refcheck.toml and retry."),
            Self::InvalidTolerance => {
                Some("Use finite, non-negative values under [tolerance] in refcheck.toml.")
            }
            Self::ConstraintViolated => {
                Some("Run the reported candidate and the reference on these arguments and compare.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The first constraint entry whose check failed.
///
/// Wraps the check's own [`CheckFailure`] unmodified and records which entry
/// produced it. Available again through [`failure`](Self::failure),
/// [`into_failure`](Self::into_failure) and `Error::source`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{}: constraint #{index}{} violated: {failure}",
    ErrorCode::ConstraintViolated.code(),
    name_suffix(.name.as_deref())
)]
pub struct ConstraintViolation {
    index: usize,
    name: Option<String>,
    #[source]
    failure: CheckFailure,
}

fn name_suffix(name: Option<&str>) -> String {
    name.map(|n| format!(" ({n})")).unwrap_or_default()
}

impl ConstraintViolation {
    pub(crate) const fn new(index: usize, name: Option<String>, failure: CheckFailure) -> Self {
        Self {
            index,
            name,
            failure,
        }
    }

    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConstraintViolated
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    /// Zero-based position of the failing entry, in insertion order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Name given to the failing entry, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The failure exactly as the check returned it.
    #[must_use]
    pub const fn failure(&self) -> &CheckFailure {
        &self.failure
    }

    #[must_use]
    pub fn into_failure(self) -> CheckFailure {
        self.failure
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstraintViolation, ErrorCode};
    use crate::check::CheckFailure;
    use std::collections::HashSet;
    use std::error::Error as _;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::InvalidTolerance,
            ErrorCode::ConstraintViolated,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::ConstraintViolated.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn display_includes_index_and_name() {
        let violation = ConstraintViolation::new(
            2,
            Some("legacy".to_string()),
            CheckFailure::new("outputs differ"),
        );
        assert_eq!(
            violation.to_string(),
            "E2001: constraint #2 (legacy) violated: outputs differ"
        );
    }

    #[test]
    fn display_omits_missing_name() {
        let violation = ConstraintViolation::new(0, None, CheckFailure::new("too small"));
        assert_eq!(
            violation.to_string(),
            "E2001: constraint #0 violated: too small"
        );
    }

    #[test]
    fn source_is_the_check_failure() {
        let failure = CheckFailure::new("boom");
        let violation = ConstraintViolation::new(1, None, failure.clone());
        let source = violation.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
        assert_eq!(violation.hint(), ErrorCode::ConstraintViolated.hint());
        assert_eq!(violation.into_failure(), failure);
    }
}
