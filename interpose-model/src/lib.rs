//! Record models for interpose.
//!
//! Declarative helpers that sit on top of the facade:
//! - [`Record`] — an insertion-ordered JSON record with typed accessors
//! - [`ValidationModel`] — per-field predicates, failing with every bad field
//! - [`TransformModel`] — per-field transforms producing a new record
//! - [`FieldCheck`] — serializable checks loadable from JSON or TOML
//! - [`ValidatingPolicy`] — a trap set that rejects writes failing their checks
//! - [`pipe`] / [`Pipe`] — left-to-right function application
//!
//! These are consumers of `interpose-facade`; nothing here changes how the
//! facade itself mediates operations.

mod check;
mod error;
mod model;
mod pipe;
mod policy;
mod record;

pub use check::{
    CheckKind, DEFAULT_DATE_FORMATS, FieldCheck, is_date_string, is_non_empty_string, parse_date,
    whole_years_between,
};
pub use error::{ModelError, ModelResult};
pub use model::{TransformModel, ValidationModel};
pub use pipe::{Pipe, pipe};
pub use policy::ValidatingPolicy;
pub use record::Record;
