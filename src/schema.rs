//! Declarative argument shapes and a generic validator.
//!
//! A [`Shape`] describes what a tool accepts. The same description is used to
//! check incoming arguments ([`validate`]) and to advertise the tool's input
//! schema to the host ([`Shape::to_json_schema`]), so the two cannot drift.

use std::fmt;

use rmcp::model::JsonObject;
use serde_json::{Value, json};

/// Accepted shape of a JSON value.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A string, optionally of an exact length in UTF-16 code units.
    String { length: Option<usize> },
    Boolean,
    /// A homogeneous array.
    Array(Box<Shape>),
    /// An object whose listed fields are all required. Unlisted keys are ignored.
    Object(Vec<Field>),
}

/// A named, required member of an object shape.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub shape: Shape,
}

impl Field {
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            description: None,
            shape,
        }
    }

    pub fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl Shape {
    pub fn string() -> Self {
        Shape::String { length: None }
    }

    pub fn string_of_length(length: usize) -> Self {
        Shape::String {
            length: Some(length),
        }
    }

    pub fn array(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Shape::Object(fields)
    }

    /// Render this shape as a JSON Schema object.
    pub fn to_json_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        match self {
            Shape::String { length } => {
                schema.insert("type".to_string(), json!("string"));
                if let Some(length) = length {
                    schema.insert("minLength".to_string(), json!(length));
                    schema.insert("maxLength".to_string(), json!(length));
                }
            }
            Shape::Boolean => {
                schema.insert("type".to_string(), json!("boolean"));
            }
            Shape::Array(item) => {
                schema.insert("type".to_string(), json!("array"));
                schema.insert("items".to_string(), Value::Object(item.to_json_schema()));
            }
            Shape::Object(fields) => {
                let mut properties = serde_json::Map::new();
                for field in fields {
                    let mut property = field.shape.to_json_schema();
                    if let Some(description) = field.description {
                        property.insert("description".to_string(), json!(description));
                    }
                    properties.insert(field.name.to_string(), Value::Object(property));
                }
                let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

                schema.insert("type".to_string(), json!("object"));
                schema.insert("properties".to_string(), Value::Object(properties));
                schema.insert("required".to_string(), json!(required));
            }
        }
        schema
    }
}

/// A single reason a value did not conform, located by its path from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: Vec<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.join("."), self.message)
    }
}

/// Every issue found while checking a value against a shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid arguments: {}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check `value` against `shape`, collecting every offending path.
pub fn validate(shape: &Shape, value: &Value) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    check(shape, value, &mut path, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn check(shape: &Shape, value: &Value, path: &mut Vec<String>, issues: &mut Vec<Issue>) {
    match (shape, value) {
        (Shape::String { length }, Value::String(s)) => {
            if let Some(expected) = length {
                if s.encode_utf16().count() != *expected {
                    push_issue(
                        issues,
                        path,
                        format!("String must contain exactly {} character(s)", expected),
                    );
                }
            }
        }
        (Shape::Boolean, Value::Bool(_)) => {}
        (Shape::Array(item), Value::Array(values)) => {
            for (index, element) in values.iter().enumerate() {
                path.push(index.to_string());
                check(item, element, path, issues);
                path.pop();
            }
        }
        (Shape::Object(fields), Value::Object(map)) => {
            for field in fields {
                path.push(field.name.to_string());
                match map.get(field.name) {
                    Some(member) => check(&field.shape, member, path, issues),
                    None => push_issue(issues, path, "Required".to_string()),
                }
                path.pop();
            }
        }
        (shape, value) => push_issue(
            issues,
            path,
            format!(
                "Expected {}, received {}",
                expected_type(shape),
                received_type(value)
            ),
        ),
    }
}

fn push_issue(issues: &mut Vec<Issue>, path: &[String], message: String) {
    issues.push(Issue {
        path: path.to_vec(),
        message,
    });
}

fn expected_type(shape: &Shape) -> &'static str {
    match shape {
        Shape::String { .. } => "string",
        Shape::Boolean => "boolean",
        Shape::Array(_) => "array",
        Shape::Object(_) => "object",
    }
}

fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
