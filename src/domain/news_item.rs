use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record from the remote collection.
///
/// Every field is passed through unmodified; only the configured identifier
/// field takes part in change detection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsItem {
    fields: Map<String, Value>,
}

impl NewsItem {
    /// Returns `None` unless `value` is a JSON object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Identifier of this item, compared as a string.
    /// Numeric identifiers are rendered in decimal.
    pub fn id(&self, id_field: &str) -> Option<String> {
        match self.fields.get(id_field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    /// Publication date as sent by the source (the `data` field)
    pub fn date(&self) -> Option<&str> {
        self.text("data")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}
