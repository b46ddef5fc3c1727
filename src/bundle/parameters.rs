use std::{collections::BTreeSet, fs, path::Path};

use anyhow::Context;

use crate::{
    foundation::error::{VredError, VredResult},
    params::render_params::{BOOLEAN_PARAMETER_NAMES, RenderParameters},
};

/// File name of the parameter values artifact inside a job bundle.
pub const PARAMETER_VALUES_FILENAME: &str = "parameter_values.yaml";

/// Top-level key of the parameter values document.
pub const PARAMETER_VALUES_FIELD: &str = "parameterValues";

const QUEUE_PARAM_CONFLICT: &str =
    "The following queue parameters conflict with the VRED job parameters:\n";

/// Value of one job parameter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Free text, names and paths.
    Str(String),
}

/// One `{name, value}` record of a job bundle.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParameterValue {
    /// Job template parameter name.
    pub name: String,
    /// Parameter value.
    pub value: ParamValue,
}

impl ParameterValue {
    /// Build a record.
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(serde::Serialize)]
pub(crate) struct ParameterValuesDocument<'a> {
    #[serde(rename = "parameterValues")]
    pub(crate) parameter_values: &'a [ParameterValue],
}

#[derive(serde::Deserialize)]
struct RawDocument {
    #[serde(rename = "parameterValues", default)]
    parameter_values: Vec<RawParameterValue>,
}

// Records written by the scheduler carry an OpenJD `type` and stringly-typed values.
#[derive(serde::Deserialize)]
struct RawParameterValue {
    name: String,
    value: serde_yaml::Value,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Job parameter records for a submission: render parameters first, then queue parameters.
///
/// A queue parameter that shares a name with a render parameter is an error, since the two
/// values would never be kept in sync.
pub fn parameter_values(
    params: &RenderParameters,
    queue_parameters: &[ParameterValue],
) -> VredResult<Vec<ParameterValue>> {
    let mut values = params.to_parameter_values()?;
    let names: BTreeSet<&str> = values.iter().map(|v| v.name.as_str()).collect();
    let overlap: BTreeSet<&str> = queue_parameters
        .iter()
        .map(|v| v.name.as_str())
        .filter(|n| names.contains(n))
        .collect();
    if !overlap.is_empty() {
        let list = overlap.into_iter().collect::<Vec<_>>().join(", ");
        return Err(VredError::validation(format!("{QUEUE_PARAM_CONFLICT}{list}")));
    }
    values.extend(queue_parameters.iter().cloned());
    Ok(values)
}

/// Parse a parameter values document, converting OpenJD typed values.
///
/// `INT` values become integers. `STRING` values spelled `true`/`false` become booleans for
/// the boolean render parameters and stay strings everywhere else.
pub fn parse_parameter_values(yaml: &str) -> VredResult<Vec<ParameterValue>> {
    let doc: RawDocument = serde_yaml::from_str(yaml)
        .map_err(|e| VredError::serde(format!("invalid parameter values document: {e}")))?;
    doc.parameter_values.into_iter().map(convert).collect()
}

/// Read a `parameter_values.yaml` file.
pub fn read_parameter_values(path: &Path) -> VredResult<Vec<ParameterValue>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read parameter values '{}'", path.display()))?;
    parse_parameter_values(&text)
}

fn convert(raw: RawParameterValue) -> VredResult<ParameterValue> {
    use serde_yaml::Value;

    let name = raw.name;
    let value = match (raw.kind.as_deref(), raw.value) {
        (Some("INT"), Value::String(s)) => ParamValue::Int(s.trim().parse().map_err(|_| {
            VredError::serde(format!("parameter '{name}' is not an integer: '{s}'"))
        })?),
        (Some("STRING"), Value::String(s)) if is_boolean_text(&name, &s) => {
            ParamValue::Bool(s == "true")
        }
        (_, Value::Bool(b)) => ParamValue::Bool(b),
        (_, Value::Number(n)) => match n.as_i64() {
            Some(i) => ParamValue::Int(i),
            None => {
                return Err(VredError::serde(format!(
                    "parameter '{name}' is not an integer: {n}"
                )));
            }
        },
        (_, Value::String(s)) => ParamValue::Str(s),
        (_, other) => {
            return Err(VredError::serde(format!(
                "parameter '{name}' has unsupported value {other:?}"
            )));
        }
    };
    Ok(ParameterValue { name, value })
}

fn is_boolean_text(name: &str, value: &str) -> bool {
    BOOLEAN_PARAMETER_NAMES.contains(&name) && (value == "true" || value == "false")
}

#[cfg(test)]
#[path = "../../tests/unit/bundle/parameters.rs"]
mod tests;
