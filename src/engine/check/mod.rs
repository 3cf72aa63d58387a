pub mod registry;
pub mod validator;

use crate::domain::document::Document;
use crate::domain::error::ValidationError;
use crate::domain::report::{CheckEvent, ValidationOutcome};

pub use registry::Registry;

/// Runs every registered rule against the document, stopping at the first violation.
pub fn execute_check<F>(
    document: &Document,
    registry: &Registry,
    on_event: F,
) -> Result<ValidationOutcome, ValidationError>
where
    F: FnMut(CheckEvent<'_>),
{
    validator::validate(document, registry, on_event)
}
