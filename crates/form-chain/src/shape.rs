//! Normalized description of a schema's shape.
//!
//! A schema is inspected once and turned into a [`Shape`] tree. Field chains
//! walk this tree to validate navigation steps, and [`crate::input_props`]
//! reads the checks to derive HTML input attributes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Object {
        fields: IndexMap<String, Shape>,
    },
    Array {
        items: Box<Shape>,
    },
    String {
        #[serde(default)]
        checks: Vec<StringCheck>,
    },
    Number {
        #[serde(default)]
        checks: Vec<NumberCheck>,
    },
    Boolean,
    Date {
        #[serde(default)]
        checks: Vec<DateCheck>,
    },
    File,
    /// Accepts anything; navigation below it is untyped.
    Any,
    Optional {
        inner: Box<Shape>,
    },
    Nullable {
        inner: Box<Shape>,
    },
    Default {
        inner: Box<Shape>,
        value: Value,
    },
    /// A refinement or transform around the inner shape.
    Effects {
        inner: Box<Shape>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StringCheck {
    Min { value: usize },
    Max { value: usize },
    Length { value: usize },
    Regex { pattern: String },
    Email,
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumberCheck {
    Min { value: f64 },
    Max { value: f64 },
    Int,
    MultipleOf { value: f64 },
}

/// Date bounds as ISO 8601 date strings (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateCheck {
    Min { value: String },
    Max { value: String },
}

impl Shape {
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Shape)>) -> Self {
        Shape::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn array(items: Shape) -> Self {
        Shape::Array {
            items: Box::new(items),
        }
    }

    pub fn string() -> Self {
        Shape::String { checks: Vec::new() }
    }

    pub fn string_with(checks: Vec<StringCheck>) -> Self {
        Shape::String { checks }
    }

    pub fn number() -> Self {
        Shape::Number { checks: Vec::new() }
    }

    pub fn number_with(checks: Vec<NumberCheck>) -> Self {
        Shape::Number { checks }
    }

    pub fn date() -> Self {
        Shape::Date { checks: Vec::new() }
    }

    pub fn date_with(checks: Vec<DateCheck>) -> Self {
        Shape::Date { checks }
    }

    pub fn optional(self) -> Self {
        Shape::Optional {
            inner: Box::new(self),
        }
    }

    pub fn nullable(self) -> Self {
        Shape::Nullable {
            inner: Box::new(self),
        }
    }

    /// Nullable and optional, wrapped in that order.
    pub fn nullish(self) -> Self {
        self.nullable().optional()
    }

    pub fn with_default(self, value: impl Into<Value>) -> Self {
        Shape::Default {
            inner: Box::new(self),
            value: value.into(),
        }
    }

    pub fn refined(self) -> Self {
        Shape::Effects {
            inner: Box::new(self),
        }
    }

    /// The wrapped shape, if this is a wrapper variant.
    pub fn inner(&self) -> Option<&Shape> {
        match self {
            Shape::Optional { inner }
            | Shape::Nullable { inner }
            | Shape::Default { inner, .. }
            | Shape::Effects { inner } => Some(inner),
            _ => None,
        }
    }

    /// Strips every optional/nullable/default/effects wrapper.
    pub fn unwrapped(&self) -> &Shape {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }

    /// Whether any wrapper makes the value optional or nullable.
    pub fn is_optional(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                Shape::Optional { .. } | Shape::Nullable { .. } => return true,
                _ => match current.inner() {
                    Some(inner) => current = inner,
                    None => return false,
                },
            }
        }
    }

    /// Declared shape of an object field, looking through wrappers.
    pub fn field(&self, name: &str) -> Option<&Shape> {
        match self.unwrapped() {
            Shape::Object { fields } => fields.get(name),
            _ => None,
        }
    }

    /// Element shape of an array, looking through wrappers.
    pub fn element(&self) -> Option<&Shape> {
        match self.unwrapped() {
            Shape::Array { items } => Some(items),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Object { .. } => "object",
            Shape::Array { .. } => "array",
            Shape::String { .. } => "string",
            Shape::Number { .. } => "number",
            Shape::Boolean => "boolean",
            Shape::Date { .. } => "date",
            Shape::File => "file",
            Shape::Any => "any",
            Shape::Optional { .. } => "optional",
            Shape::Nullable { .. } => "nullable",
            Shape::Default { .. } => "default",
            Shape::Effects { .. } => "effects",
        }
    }
}
