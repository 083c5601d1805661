use std::fmt::Debug;
use std::ops::Deref;

use crate::check;
use crate::set::{ConstraintEntry, ConstraintSet, Function};

/// A [`ConstraintSet`] whose every candidate must return exactly what the
/// reference returns.
///
/// Equality is `V: PartialEq`, so structured outputs compare field by field
/// (deep equality as the type defines it), never by identity.
/// `assert_constraints` and `call` come from the inner set through `Deref`.
#[derive(Debug)]
pub struct IdenticalFunctionSet<'f, A: ?Sized, V> {
    inner: ConstraintSet<'f, A, V>,
}

impl<'f, A, V> IdenticalFunctionSet<'f, A, V>
where
    A: ?Sized + 'f,
    V: PartialEq + Debug + 'f,
{
    #[must_use]
    pub fn new(reference: impl Fn(&A) -> V + 'f, candidates: Vec<Function<'f, A, V>>) -> Self {
        let entries = candidates
            .into_iter()
            .map(|candidate| ConstraintEntry::new(candidate, check::equal()))
            .collect();
        Self {
            inner: ConstraintSet::new(reference, entries),
        }
    }

    /// Like [`new`](Self::new), labelling each candidate for failure reports.
    #[must_use]
    pub fn from_named<N: Into<String>>(
        reference: impl Fn(&A) -> V + 'f,
        candidates: Vec<(N, Function<'f, A, V>)>,
    ) -> Self {
        let entries = candidates
            .into_iter()
            .map(|(name, candidate)| {
                ConstraintEntry::new(candidate, check::equal()).named(name)
            })
            .collect();
        Self {
            inner: ConstraintSet::new(reference, entries),
        }
    }
}

impl<'f, A: ?Sized, V> Deref for IdenticalFunctionSet<'f, A, V> {
    type Target = ConstraintSet<'f, A, V>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
