//! The validation capability a form is built around.

use crate::error::FormError;
use crate::issues::ValidationFailure;
use crate::reconstruct::Reconstructor;
use crate::shape::Shape;
use crate::value::{FlatEntry, FormValue};

/// Outcome of a non-throwing validation pass.
pub type SafeParse<T> = Result<T, ValidationFailure>;

/// Validates a reconstructed tree into a typed output.
///
/// Implementations report every problem as an [`crate::Issue`] whose path
/// points into the input tree.
pub trait Schema {
    type Output;

    fn safe_parse(&self, value: &FormValue) -> SafeParse<Self::Output>;

    fn parse(&self, value: &FormValue) -> Result<Self::Output, ValidationFailure> {
        self.safe_parse(value)
    }

    /// Shape used to type-check chain navigation. `None` leaves chains untyped.
    fn shape(&self) -> Option<&Shape> {
        None
    }
}

impl<S: Schema + ?Sized> Schema for &S {
    type Output = S::Output;

    fn safe_parse(&self, value: &FormValue) -> SafeParse<Self::Output> {
        (**self).safe_parse(value)
    }

    fn parse(&self, value: &FormValue) -> Result<Self::Output, ValidationFailure> {
        (**self).parse(value)
    }

    fn shape(&self) -> Option<&Shape> {
        (**self).shape()
    }
}

/// Reconstruct `entries` and validate the result, failing on either step.
pub fn parse_form<S, I>(schema: &S, entries: I) -> Result<S::Output, FormError>
where
    S: Schema + ?Sized,
    I: IntoIterator<Item = FlatEntry>,
{
    let tree = Reconstructor::default().reconstruct(entries)?;
    Ok(schema.parse(&tree)?)
}

/// Reconstruct `entries` and validate the result. Structural errors fail
/// outright; validation failures are returned in the inner result.
pub fn safe_parse_form<S, I>(
    schema: &S,
    entries: I,
) -> Result<SafeParse<S::Output>, FormError>
where
    S: Schema + ?Sized,
    I: IntoIterator<Item = FlatEntry>,
{
    let tree = Reconstructor::default().reconstruct(entries)?;
    Ok(schema.safe_parse(&tree))
}
