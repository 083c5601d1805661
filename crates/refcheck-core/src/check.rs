//! Check procedures: the relation a candidate's output must keep with the
//! reference output.
//!
//! A check is any `Fn(&V, &V, &A) -> CheckResult` receiving the reference
//! output, the candidate output and the shared arguments, in that order.
//! `Ok(())` means the relation holds. The builders below cover the common
//! relations; hand-written closures can use [`ensure`].
//!
//! Ordering checks read left to right as `reference <op> candidate`:
//! [`less_than`] passes when the reference output is smaller.

use std::fmt::{self, Debug};

use crate::config::Tolerance;

/// Outcome of a single check.
pub type CheckResult = Result<(), CheckFailure>;

/// Why a check rejected a candidate output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    message: String,
    reference: Option<String>,
    candidate: Option<String>,
}

impl CheckFailure {
    /// Failure carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reference: None,
            candidate: None,
        }
    }

    /// Failure that also records both outputs (rendered with `Debug`).
    #[must_use]
    pub fn mismatch<V: Debug + ?Sized>(
        message: impl Into<String>,
        reference: &V,
        candidate: &V,
    ) -> Self {
        Self {
            message: message.into(),
            reference: Some(format!("{reference:?}")),
            candidate: Some(format!("{candidate:?}")),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `Debug` rendering of the reference output, when recorded.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// `Debug` rendering of the candidate output, when recorded.
    #[must_use]
    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reference, &self.candidate) {
            (Some(reference), Some(candidate)) => write!(
                f,
                "{} (reference={reference}, candidate={candidate})",
                self.message
            ),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for CheckFailure {}

/// Turn a boolean into a [`CheckResult`], building the failure lazily.
///
/// # Errors
///
/// Returns the failure produced by `failure` when `condition` is false.
pub fn ensure(condition: bool, failure: impl FnOnce() -> CheckFailure) -> CheckResult {
    if condition { Ok(()) } else { Err(failure()) }
}

/// Candidate output must equal the reference output (`PartialEq`).
#[must_use]
pub fn equal<A: ?Sized, V: PartialEq + Debug>() -> impl Fn(&V, &V, &A) -> CheckResult {
    |reference: &V, candidate: &V, _args: &A| {
        ensure(candidate == reference, || {
            CheckFailure::mismatch("outputs are not equal", reference, candidate)
        })
    }
}

/// Passes when `reference < candidate`.
#[must_use]
pub fn less_than<A: ?Sized, V: PartialOrd + Debug>() -> impl Fn(&V, &V, &A) -> CheckResult {
    |reference: &V, candidate: &V, _args: &A| {
        ensure(reference < candidate, || {
            CheckFailure::mismatch("expected reference < candidate", reference, candidate)
        })
    }
}

/// Passes when `reference <= candidate`.
#[must_use]
pub fn less_or_equal<A: ?Sized, V: PartialOrd + Debug>() -> impl Fn(&V, &V, &A) -> CheckResult {
    |reference: &V, candidate: &V, _args: &A| {
        ensure(reference <= candidate, || {
            CheckFailure::mismatch("expected reference <= candidate", reference, candidate)
        })
    }
}

/// Passes when `reference > candidate`.
#[must_use]
pub fn greater_than<A: ?Sized, V: PartialOrd + Debug>() -> impl Fn(&V, &V, &A) -> CheckResult {
    |reference: &V, candidate: &V, _args: &A| {
        ensure(reference > candidate, || {
            CheckFailure::mismatch("expected reference > candidate", reference, candidate)
        })
    }
}

/// Passes when `reference >= candidate`.
#[must_use]
pub fn greater_or_equal<A: ?Sized, V: PartialOrd + Debug>() -> impl Fn(&V, &V, &A) -> CheckResult
{
    |reference: &V, candidate: &V, _args: &A| {
        ensure(reference >= candidate, || {
            CheckFailure::mismatch("expected reference >= candidate", reference, candidate)
        })
    }
}

/// Bounded difference: `|r - c| <= absolute + relative * max(|r|, |c|)`.
///
/// NaN on one side only always fails; NaN on both sides passes. Infinities
/// only match the same infinity.
#[must_use]
pub fn within<A: ?Sized, V: Copy + Into<f64> + Debug>(
    tolerance: Tolerance,
) -> impl Fn(&V, &V, &A) -> CheckResult {
    move |reference: &V, candidate: &V, _args: &A| {
        ensure(
            within_tolerance((*reference).into(), (*candidate).into(), tolerance),
            || {
                CheckFailure::mismatch(
                    format!(
                        "difference exceeds tolerance (absolute={}, relative={})",
                        tolerance.absolute, tolerance.relative
                    ),
                    reference,
                    candidate,
                )
            },
        )
    }
}

#[allow(clippy::float_cmp)] // exact match covers equal infinities
fn within_tolerance(reference: f64, candidate: f64, tolerance: Tolerance) -> bool {
    if reference.is_nan() || candidate.is_nan() {
        return reference.is_nan() && candidate.is_nan();
    }
    if reference == candidate {
        return true;
    }
    if reference.is_infinite() || candidate.is_infinite() {
        return false;
    }
    let diff = (reference - candidate).abs();
    let scale = reference.abs().max(candidate.abs());
    diff <= tolerance.relative.mul_add(scale, tolerance.absolute)
}
