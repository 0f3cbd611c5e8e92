//! Parameter schemas and the provider-facing advertisement format.

use colloquy_protocol::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Declared type tag for a tool parameter.
///
/// Matching against runtime values is shallow: nested objects and arrays are
/// only checked for their top-level type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Boolean,
    Number,
    Object,
    Array,
}

impl ParamType {
    /// Return the JSON-schema type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Number => "number",
            ParamType::Object => "object",
            ParamType::Array => "array",
        }
    }

    /// Shallow type check against a runtime value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Number => value.is_number(),
            ParamType::Object => value.is_object(),
            ParamType::Array => value.is_array(),
        }
    }
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamField {
    /// Parameter name.
    pub name: String,
    /// Declared type tag.
    pub param_type: ParamType,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Human-readable description shown to the model.
    pub description: String,
}

impl ParamField {
    /// Declare an optional parameter.
    pub fn new(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            description: description.into(),
        }
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered parameter schema for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSchema {
    fields: Vec<ParamField>,
}

impl ToolSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, preserving declaration order.
    pub fn field(mut self, field: ParamField) -> Self {
        self.fields.push(field);
        self
    }

    /// Declared fields in order.
    pub fn fields(&self) -> &[ParamField] {
        &self.fields
    }

    /// Names of all required fields, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name.as_str())
            .collect()
    }

    /// Build the `properties` object for advertisement.
    pub fn properties(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(
                field.name.clone(),
                json!({
                    "type": field.param_type.as_str(),
                    "description": field.description,
                }),
            );
        }
        Value::Object(properties)
    }

    /// Validate decoded arguments against this schema.
    ///
    /// Checks required presence first, then shallow type tags for every
    /// declared parameter that is present. Unknown parameters pass through.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<(), ToolError> {
        for field in &self.fields {
            if field.required && !args.contains_key(&field.name) {
                return Err(ToolError::InvalidArguments(format!(
                    "missing required parameter: {}",
                    field.name
                )));
            }
        }
        for field in &self.fields {
            if let Some(value) = args.get(&field.name)
                && !field.param_type.matches(value)
            {
                return Err(ToolError::InvalidArguments(format!(
                    "parameter {} must be a {}",
                    field.name,
                    field.param_type.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Build the provider-facing function schema for a tool.
///
/// `name` is the externally-advertised identifier, which may be an alias of
/// the tool's internal name.
pub fn advertised_schema(name: &str, description: &str, schema: &ToolSchema) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": name,
            "description": description,
            "parameters": {
                "type": "object",
                "properties": schema.properties(),
                "required": schema.required_names(),
            },
        },
    })
}

/// Structural sanity check applied before a schema is advertised.
///
/// A tool failing this check is dropped from the advertised set, never fatal.
pub fn schema_is_well_formed(advertised: &Value) -> bool {
    if advertised.get("type").and_then(Value::as_str) != Some("function") {
        return false;
    }
    let Some(function) = advertised.get("function") else {
        return false;
    };
    if function
        .get("name")
        .and_then(Value::as_str)
        .is_none_or(str::is_empty)
    {
        return false;
    }
    let Some(parameters) = function.get("parameters") else {
        return false;
    };
    if parameters.get("type").and_then(Value::as_str) != Some("object") {
        return false;
    }
    match parameters.get("required") {
        None => true,
        Some(Value::Array(entries)) => entries.iter().all(Value::is_string),
        Some(_) => false,
    }
}
