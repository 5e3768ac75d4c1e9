//! Option Adapter
//!
//! Projects arbitrary option records onto `(value, label)` pairs. Each side
//! is read either by field name (through the record's serde projection) or
//! by a caller-supplied function.

use std::fmt;
use std::sync::Arc;

use gpui::SharedString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// How one side of an option is read
pub enum Accessor<T, R> {
    /// Read a named field of the serialized record
    ByField(SharedString),
    /// Compute the result from the record
    ByFunction(Arc<dyn Fn(&T) -> R + Send + Sync>),
}

impl<T, R> Accessor<T, R> {
    /// Read the field called `name`
    pub fn field(name: impl Into<SharedString>) -> Self {
        Self::ByField(name.into())
    }

    /// Compute the result with `f`
    pub fn function(f: impl Fn(&T) -> R + Send + Sync + 'static) -> Self {
        Self::ByFunction(Arc::new(f))
    }
}

impl<T, R> Clone for Accessor<T, R> {
    fn clone(&self) -> Self {
        match self {
            Self::ByField(name) => Self::ByField(name.clone()),
            Self::ByFunction(f) => Self::ByFunction(f.clone()),
        }
    }
}

impl<T, R> fmt::Debug for Accessor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByField(name) => f.debug_tuple("ByField").field(name).finish(),
            Self::ByFunction(_) => f.write_str("ByFunction(..)"),
        }
    }
}

/// Label and value accessors for one option type
pub struct OptionAdapter<T, V> {
    label: Accessor<T, String>,
    value: Accessor<T, V>,
}

impl<T, V> Default for OptionAdapter<T, V> {
    /// Reads `label` and `value` fields
    fn default() -> Self {
        Self {
            label: Accessor::field("label"),
            value: Accessor::field("value"),
        }
    }
}

impl<T, V> Clone for OptionAdapter<T, V> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            value: self.value.clone(),
        }
    }
}

impl<T, V> fmt::Debug for OptionAdapter<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionAdapter")
            .field("label", &self.label)
            .field("value", &self.value)
            .finish()
    }
}

impl<T, V> OptionAdapter<T, V> {
    pub fn new(label: Accessor<T, String>, value: Accessor<T, V>) -> Self {
        Self { label, value }
    }

    /// Replace the label accessor
    pub fn with_label(mut self, label: Accessor<T, String>) -> Self {
        self.label = label;
        self
    }

    /// Replace the value accessor
    pub fn with_value(mut self, value: Accessor<T, V>) -> Self {
        self.value = value;
        self
    }
}

impl<T, V> OptionAdapter<T, V>
where
    T: Serialize,
    V: DeserializeOwned,
{
    /// Resolve the display label of `option` (the `index`-th source record)
    pub fn label(&self, index: usize, option: &T) -> Result<SharedString> {
        match &self.label {
            Accessor::ByFunction(f) => Ok(f(option).into()),
            Accessor::ByField(name) => {
                let record = serde_json::to_value(option)?;
                label_from_field(&record, name, index)
            }
        }
    }

    /// Resolve the value of `option` (the `index`-th source record)
    pub fn value(&self, index: usize, option: &T) -> Result<V> {
        match &self.value {
            Accessor::ByFunction(f) => Ok(f(option)),
            Accessor::ByField(name) => {
                let record = serde_json::to_value(option)?;
                value_from_field(&record, name, index)
            }
        }
    }

    /// Resolve both sides, serializing the record at most once
    pub fn project(&self, index: usize, option: &T) -> Result<(V, SharedString)> {
        let mut record: Option<Value> = None;

        let value = match &self.value {
            Accessor::ByFunction(f) => f(option),
            Accessor::ByField(name) => {
                let record = record.insert(serde_json::to_value(option)?);
                value_from_field(record, name, index)?
            }
        };
        let label = match &self.label {
            Accessor::ByFunction(f) => f(option).into(),
            Accessor::ByField(name) => {
                let record = match record.take() {
                    Some(record) => record,
                    None => serde_json::to_value(option)?,
                };
                label_from_field(&record, name, index)?
            }
        };

        Ok((value, label))
    }
}

fn read_field<'a>(record: &'a Value, name: &str, index: usize) -> Result<&'a Value> {
    match record.get(name) {
        Some(Value::Null) | None => Err(Error::MissingField {
            field: name.to_string(),
            index,
        }),
        Some(value) => Ok(value),
    }
}

fn label_from_field(record: &Value, name: &str, index: usize) -> Result<SharedString> {
    let label = match read_field(record, name, index)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    Ok(label.into())
}

fn value_from_field<V: DeserializeOwned>(record: &Value, name: &str, index: usize) -> Result<V> {
    let raw = read_field(record, name, index)?;
    serde_json::from_value(raw.clone()).map_err(|source| Error::FieldType {
        field: name.to_string(),
        index,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Plain {
        label: String,
        value: u32,
    }

    #[derive(Serialize)]
    struct Photo {
        id: u64,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        album: Option<String>,
    }

    #[test]
    fn default_reads_label_and_value_fields() {
        let adapter = OptionAdapter::<Plain, u32>::default();
        let option = Plain {
            label: "Bakı".to_string(),
            value: 7,
        };

        let (value, label) = adapter.project(0, &option).expect("projection failed");
        assert_eq!(value, 7);
        assert_eq!(label.to_string(), "Bakı");
    }

    #[test]
    fn function_accessors_skip_serialization() {
        let adapter = OptionAdapter::new(
            Accessor::function(|p: &Photo| format!("{} - {}", p.id, p.title)),
            Accessor::function(|p: &Photo| p.id),
        );
        let option = Photo {
            id: 3,
            title: "sunset".to_string(),
            album: None,
        };

        assert_eq!(adapter.label(0, &option).expect("label").to_string(), "3 - sunset");
        assert_eq!(adapter.value(0, &option).expect("value"), 3);
    }

    #[test]
    fn numeric_field_label_is_stringified() {
        let adapter: OptionAdapter<Photo, u64> =
            OptionAdapter::new(Accessor::field("id"), Accessor::field("id"));
        let option = Photo {
            id: 42,
            title: String::new(),
            album: None,
        };

        let (value, label) = adapter.project(5, &option).expect("projection failed");
        assert_eq!(value, 42);
        assert_eq!(label.to_string(), "42");
    }

    #[test]
    fn missing_field_fails_fast() {
        let adapter: OptionAdapter<Photo, u64> =
            OptionAdapter::new(Accessor::field("album"), Accessor::field("id"));
        let option = Photo {
            id: 1,
            title: "x".to_string(),
            album: None,
        };

        let err = adapter
            .project(9, &option)
            .expect_err("missing field must fail");
        assert!(matches!(err, Error::MissingField { ref field, index: 9 } if field == "album"));
    }

    #[test]
    fn wrong_value_type_is_reported() {
        let adapter: OptionAdapter<Photo, u64> =
            OptionAdapter::new(Accessor::field("title"), Accessor::field("title"));
        let option = Photo {
            id: 1,
            title: "not a number".to_string(),
            album: None,
        };

        let err = adapter
            .value(2, &option)
            .expect_err("text is not a u64");
        assert!(matches!(err, Error::FieldType { index: 2, .. }));
    }
}
