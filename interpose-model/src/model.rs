//! Validation and transformation models.
//!
//! Both models are ordered lists of `(field, function)` pairs. Declaration
//! order is significant: validation reports failures in that order, and a
//! transform lays out its output fields in that order.

use crate::{FieldCheck, ModelError, ModelResult, Record};
use serde_json::Value;
use std::fmt;

type Predicate = Box<dyn Fn(Option<&Value>) -> bool + Send + Sync>;
type Transform = Box<dyn Fn(Option<&Value>, &Record) -> Value + Send + Sync>;

/// Field-to-predicate map.
///
/// ```
/// use interpose_model::{Record, ValidationModel, is_non_empty_string};
/// use serde_json::json;
///
/// let user = ValidationModel::new()
///     .field("fname", is_non_empty_string)
///     .field("lname", is_non_empty_string);
///
/// let record = Record::from_json(json!({"fname": "Dave", "lname": "  "})).unwrap();
/// let err = user.validate(&record).unwrap_err();
/// assert_eq!(err.to_string(), "validation failures: lname");
/// ```
#[derive(Default)]
pub struct ValidationModel {
    fields: Vec<(String, Predicate)>,
}

impl ValidationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate for `field`. The predicate sees `None` when the
    /// field is absent.
    #[must_use]
    pub fn field(
        mut self,
        field: impl Into<String>,
        predicate: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fields.push((field.into(), Box::new(predicate)));
        self
    }

    /// Builds a model from declarative checks, one predicate per check.
    pub fn from_checks(checks: impl IntoIterator<Item = FieldCheck>) -> Self {
        checks.into_iter().fold(Self::new(), |model, check| {
            let field = check.field.clone();
            model.field(field, move |value| check.passes(value))
        })
    }

    /// Names of the fields that fail, in declaration order.
    pub fn failures(&self, record: &Record) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(field, predicate)| !predicate(record.get(field)))
            .map(|(field, _)| field.clone())
            .collect()
    }

    /// Succeeds if every predicate passes; otherwise lists every failing field.
    pub fn validate(&self, record: &Record) -> ModelResult<()> {
        let fields = self.failures(record);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation { fields })
        }
    }

    /// Validates and hands the record back, for chaining.
    pub fn check(&self, record: Record) -> ModelResult<Record> {
        self.validate(&record)?;
        Ok(record)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for ValidationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(field, _)| field))
            .finish()
    }
}

/// Output-field-to-transform map.
///
/// Each transform receives the source record's value under the same field
/// name (`None` if absent) and the whole source record, so outputs can be
/// renamed or derived from several inputs.
#[derive(Default)]
pub struct TransformModel {
    fields: Vec<(String, Transform)>,
}

impl TransformModel {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(
        mut self,
        field: impl Into<String>,
        transform: impl Fn(Option<&Value>, &Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.fields.push((field.into(), Box::new(transform)));
        self
    }

    /// Builds a new record holding exactly the declared fields, in order.
    /// Source fields the model does not name are dropped.
    pub fn transform(&self, source: &Record) -> Record {
        self.fields
            .iter()
            .map(|(field, transform)| (field.clone(), transform(source.get(field), source)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for TransformModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(field, _)| field))
            .finish()
    }
}
