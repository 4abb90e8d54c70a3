// AI-written channel analysis

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AnalysisError, Result};

/// Structured analysis returned by the generative model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIReport {
    pub summary: String,
    pub growth_analysis: String,
    pub content_strategy: String,
    pub recommendations: Vec<String>,
    pub category: String,
}

impl AIReport {
    /// Validate a parsed JSON value field by field.
    /// Every text field must be a non-empty string and recommendations a non-empty
    /// array of non-blank strings.
    pub fn from_value(value: Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            AnalysisError::InvalidStructure("top-level value is not an object".to_string())
        })?;

        Ok(Self {
            summary: required_text(obj, "summary")?,
            growth_analysis: required_text(obj, "growthAnalysis")?,
            content_strategy: required_text(obj, "contentStrategy")?,
            recommendations: required_list(obj, "recommendations")?,
            category: required_text(obj, "category")?,
        })
    }
}

fn required_text(obj: &Map<String, Value>, key: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(AnalysisError::InvalidStructure(format!(
            "field `{}` is empty",
            key
        ))),
        Some(other) => Err(AnalysisError::InvalidStructure(format!(
            "field `{}` must be a string, got {}",
            key,
            type_name(other)
        ))),
        None => Err(AnalysisError::InvalidStructure(format!(
            "missing field `{}`",
            key
        ))),
    }
}

fn required_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>> {
    let items = match obj.get(key) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AnalysisError::InvalidStructure(format!(
                "field `{}` must be an array, got {}",
                key,
                type_name(other)
            )))
        }
        None => {
            return Err(AnalysisError::InvalidStructure(format!(
                "missing field `{}`",
                key
            )))
        }
    };

    if items.is_empty() {
        return Err(AnalysisError::InvalidStructure(format!(
            "field `{}` is empty",
            key
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
            Value::String(_) => Err(AnalysisError::InvalidStructure(format!(
                "`{}[{}]` is empty",
                key, i
            ))),
            other => Err(AnalysisError::InvalidStructure(format!(
                "`{}[{}]` must be a string, got {}",
                key,
                i,
                type_name(other)
            ))),
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
