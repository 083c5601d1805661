//! Reference-vs-candidate constraint sets.
//!
//! A [`ConstraintSet`] owns one reference function and an ordered list of
//! [`ConstraintEntry`] values. Every invocation calls the reference once,
//! then walks the entries in insertion order: call the candidate with the
//! same arguments, hand both outputs to the entry's check. The first check
//! that fails ends the walk; later candidates are never called.
//!
//! The reference is never checked against anything. Its output is the
//! ground truth for that invocation and is recomputed on every call.

use std::fmt;

use crate::check::CheckResult;
use crate::error::ConstraintViolation;

/// Boxed function under test. Reference and candidates share this shape.
pub type Function<'f, A, V> = Box<dyn Fn(&A) -> V + 'f>;

/// Boxed check procedure: `(reference_output, candidate_output, args)`.
pub type CheckFn<'f, A, V> = Box<dyn Fn(&V, &V, &A) -> CheckResult + 'f>;

/// A candidate function paired with the check its output must pass.
pub struct ConstraintEntry<'f, A: ?Sized, V> {
    name: Option<String>,
    candidate: Function<'f, A, V>,
    check: CheckFn<'f, A, V>,
}

impl<'f, A: ?Sized, V> ConstraintEntry<'f, A, V> {
    #[must_use]
    pub fn new(
        candidate: impl Fn(&A) -> V + 'f,
        check: impl Fn(&V, &V, &A) -> CheckResult + 'f,
    ) -> Self {
        Self {
            name: None,
            candidate: Box::new(candidate),
            check: Box::new(check),
        }
    }

    /// Label reported in a [`ConstraintViolation`] when this entry fails.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn evaluate(
        &self,
        index: usize,
        reference_output: &V,
        args: &A,
    ) -> Result<(), ConstraintViolation> {
        let output = (self.candidate)(args);
        (self.check)(reference_output, &output, args).map_err(|failure| {
            tracing::debug!(
                entry = index,
                name = self.name.as_deref().unwrap_or(""),
                %failure,
                "constraint violated"
            );
            ConstraintViolation::new(index, self.name.clone(), failure)
        })
    }
}

impl<A: ?Sized, V> fmt::Debug for ConstraintEntry<'_, A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One reference function checked against N candidates.
///
/// Immutable once built: entries are fixed at construction.
pub struct ConstraintSet<'f, A: ?Sized, V> {
    reference: Function<'f, A, V>,
    entries: Vec<ConstraintEntry<'f, A, V>>,
}

impl<'f, A: ?Sized, V> ConstraintSet<'f, A, V> {
    #[must_use]
    pub fn new(
        reference: impl Fn(&A) -> V + 'f,
        entries: Vec<ConstraintEntry<'f, A, V>>,
    ) -> Self {
        Self {
            reference: Box::new(reference),
            entries,
        }
    }

    /// Call the reference and every candidate with `args`, checking each
    /// candidate in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConstraintViolation`]; entries after it are not
    /// evaluated.
    pub fn assert_constraints(&self, args: &A) -> Result<(), ConstraintViolation> {
        let reference_output = (self.reference)(args);
        self.check_entries(&reference_output, args)
    }

    /// Same as [`assert_constraints`](Self::assert_constraints), returning the
    /// reference output when every entry passes.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConstraintViolation`]; no output is returned in
    /// that case.
    pub fn call(&self, args: &A) -> Result<V, ConstraintViolation> {
        let reference_output = (self.reference)(args);
        self.check_entries(&reference_output, args)?;
        Ok(reference_output)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry labels in evaluation order; unnamed entries show as `#<index>`.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().enumerate().map(|(index, entry)| {
            entry
                .name()
                .map_or_else(|| format!("#{index}"), ToString::to_string)
        })
    }

    fn check_entries(&self, reference_output: &V, args: &A) -> Result<(), ConstraintViolation> {
        for (index, entry) in self.entries.iter().enumerate() {
            tracing::trace!(
                entry = index,
                name = entry.name().unwrap_or(""),
                "checking candidate"
            );
            entry.evaluate(index, reference_output, args)?;
        }
        Ok(())
    }
}

impl<A: ?Sized, V> fmt::Debug for ConstraintSet<'_, A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
