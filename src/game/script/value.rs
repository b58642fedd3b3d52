//! Script values
//!
//! The value model shared with the host script runtime, and the argument
//! decoding used by the dispatcher. Vectors cross the boundary as arrays of
//! numbers, ids and counters as integers.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value passed to or returned from a script call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Nil,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Array(Vec<ScriptValue>),
}

impl ScriptValue {
    /// Numeric array from float components.
    pub fn numbers(values: &[f32]) -> Self {
        Self::Array(values.iter().map(|&v| Self::Number(v as f64)).collect())
    }

    /// Integer array.
    pub fn integers<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self::Array(values.into_iter().map(Self::Integer).collect())
    }

    /// Numeric value, accepting integers too.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Number(v) => Some(*v as f32),
            Self::Integer(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Integer value, accepting floats with no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Number(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric array, or `None` if this is not an array of numbers.
    pub fn as_f32_vec(&self) -> Option<Vec<f32>> {
        match self {
            Self::Array(items) => items.iter().map(Self::as_f32).collect(),
            _ => None,
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ScriptValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for ScriptValue {
    fn from(v: u32) -> Self {
        Self::Integer(v as i64)
    }
}

impl From<f32> for ScriptValue {
    fn from(v: f32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<String> for ScriptValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec3> for ScriptValue {
    fn from(v: Vec3) -> Self {
        Self::numbers(&v.to_array())
    }
}

impl<const N: usize> From<[f32; N]> for ScriptValue {
    fn from(v: [f32; N]) -> Self {
        Self::numbers(&v)
    }
}

/// Marshalling failures of a script call.
///
/// Lookups that find nothing are not errors; they return sentinel values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("unknown script function '{0}'")]
    UnknownFunction(String),
    #[error("{function} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },
    #[error("{function}: argument {index} must be {expected}")]
    ArgumentType {
        function: String,
        index: usize,
        expected: &'static str,
    },
}

/// Argument list of one call, with decoding helpers that name the function in errors.
pub(crate) struct Args<'a> {
    function: &'a str,
    values: &'a [ScriptValue],
}

impl<'a> Args<'a> {
    pub(crate) fn new(function: &'a str, values: &'a [ScriptValue], expected: usize) -> Result<Self, ScriptError> {
        if values.len() != expected {
            return Err(ScriptError::ArgumentCount {
                function: function.to_string(),
                expected,
                got: values.len(),
            });
        }
        Ok(Self { function, values })
    }

    fn type_error(&self, index: usize, expected: &'static str) -> ScriptError {
        ScriptError::ArgumentType {
            function: self.function.to_string(),
            index,
            expected,
        }
    }

    pub(crate) fn number(&self, index: usize) -> Result<f32, ScriptError> {
        self.values[index]
            .as_f32()
            .ok_or_else(|| self.type_error(index, "a number"))
    }

    pub(crate) fn integer(&self, index: usize) -> Result<i64, ScriptError> {
        self.values[index]
            .as_i64()
            .ok_or_else(|| self.type_error(index, "an integer"))
    }

    pub(crate) fn string(&self, index: usize) -> Result<&'a str, ScriptError> {
        let values: &'a [ScriptValue] = self.values;
        values[index]
            .as_str()
            .ok_or_else(|| self.type_error(index, "a string"))
    }

    pub(crate) fn numbers(&self, index: usize) -> Result<Vec<f32>, ScriptError> {
        self.values[index]
            .as_f32_vec()
            .ok_or_else(|| self.type_error(index, "an array of numbers"))
    }
}
