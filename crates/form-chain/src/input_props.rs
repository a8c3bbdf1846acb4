//! HTML input attributes derived from a field's declared shape.
//!
//! ```
//! use form_chain::{input_props, FieldChain, Navigate, Shape, StringCheck};
//! use serde_json::json;
//!
//! let shape = Shape::object([(
//!     "username",
//!     Shape::string_with(vec![StringCheck::Min { value: 3 }]),
//! )]);
//! let fields = FieldChain::with_shape("signup", &shape);
//! let props = input_props(&fields.at("username")?.props());
//!
//! assert_eq!(
//!     serde_json::to_value(&props).unwrap(),
//!     json!({
//!         "type": "text",
//!         "name": "username",
//!         "id": "signup:username",
//!         "required": true,
//!         "minLength": 3
//!     })
//! );
//! # Ok::<(), form_chain::ChainError>(())
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::fields::FieldProps;
use crate::shape::{DateCheck, NumberCheck, Shape, StringCheck};

/// A `min`/`max`/`step` attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputProps {
    #[serde(rename = "type")]
    pub input_type: &'static str,
    pub name: String,
    pub id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<AttrValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<AttrValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<AttrValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(rename = "aria-invalid", skip_serializing_if = "std::ops::Not::not")]
    pub aria_invalid: bool,
    #[serde(rename = "aria-errormessage", skip_serializing_if = "Option::is_none")]
    pub aria_errormessage: Option<String>,
}

impl InputProps {
    fn for_field(props: &FieldProps<'_>) -> Self {
        Self {
            input_type: "text",
            name: props.name.clone(),
            id: props.id.clone(),
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            step: None,
            default_value: None,
            aria_invalid: false,
            aria_errormessage: None,
        }
    }

    fn apply_string(&mut self, checks: &[StringCheck]) {
        self.input_type = "text";
        for check in checks {
            match check {
                StringCheck::Min { value } => self.min_length = Some(*value),
                StringCheck::Max { value } => self.max_length = Some(*value),
                StringCheck::Length { value } => {
                    self.min_length = Some(*value);
                    self.max_length = Some(*value);
                }
                StringCheck::Regex { pattern } => self.pattern = Some(pattern.clone()),
                StringCheck::Email => self.input_type = "email",
                StringCheck::Url => self.input_type = "url",
            }
        }
    }

    fn apply_number(&mut self, checks: &[NumberCheck]) {
        self.input_type = "number";
        self.step = Some(AttrValue::Text("any".to_string()));
        for check in checks {
            match check {
                NumberCheck::Min { value } => self.min = Some(AttrValue::Number(*value)),
                NumberCheck::Max { value } => self.max = Some(AttrValue::Number(*value)),
                // integers use the browser's default step of 1
                NumberCheck::Int => {
                    if matches!(&self.step, Some(AttrValue::Text(step)) if step == "any") {
                        self.step = None;
                    }
                }
                NumberCheck::MultipleOf { value } => self.step = Some(AttrValue::Number(*value)),
            }
        }
    }

    fn apply_date(&mut self, checks: &[DateCheck]) {
        self.input_type = "date";
        for check in checks {
            match check {
                DateCheck::Min { value } => self.min = Some(AttrValue::Text(value.clone())),
                DateCheck::Max { value } => self.max = Some(AttrValue::Text(value.clone())),
            }
        }
    }
}

/// Derive input attributes for a rendered field.
///
/// Without a declared shape the input is a required text field.
pub fn input_props(field: &FieldProps<'_>) -> InputProps {
    let mut props = InputProps::for_field(field);

    let mut current = field.shape;
    while let Some(shape) = current {
        match shape {
            Shape::Default { value, .. } => {
                props.required = false;
                props.default_value = Some(value.clone());
            }
            Shape::Optional { .. } | Shape::Nullable { .. } => props.required = false,
            Shape::String { checks } => props.apply_string(checks),
            Shape::Number { checks } => props.apply_number(checks),
            Shape::Date { checks } => props.apply_date(checks),
            Shape::Boolean => props.input_type = "checkbox",
            Shape::File => props.input_type = "file",
            Shape::Object { .. } | Shape::Array { .. } | Shape::Any | Shape::Effects { .. } => {}
        }
        current = shape.inner();
    }

    if !field.issues.is_empty() {
        props.aria_invalid = true;
        props.aria_errormessage = Some(field.error_id.clone());
    }
    props
}
