//! Attribute expressions and the values they evaluate to.
//!
//! Decoders evaluate expressions without any variables or functions in scope,
//! so in practice only literals produce a value. A caller-supplied
//! [`EvalContext`] can make variables and functions available.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "bool",
            Value::Integer(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts to a string scalar. Null stays null (`None`); every other
    /// non-string type is rejected.
    pub fn to_string_scalar(&self) -> Result<Option<String>, ConversionError> {
        match self {
            Value::String(s) => Ok(Some(s.clone())),
            Value::Null => Ok(None),
            other => Err(ConversionError::NotAString {
                found: other.type_name(),
            }),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("string required, found {found}")]
    NotAString { found: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Literal(Value),
    Variable(String),
    Call {
        function: String,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Evaluates the expression. Without a context no variables or functions
    /// are defined.
    pub fn value(&self, ctx: Option<&EvalContext>) -> Result<Value, EvalError> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Variable(name) => ctx
                .and_then(|ctx| ctx.variables.get(name))
                .cloned()
                .ok_or_else(|| EvalError::UnknownVariable(name.clone())),
            Expression::Call {
                function,
                arguments,
            } => {
                let f = ctx
                    .and_then(|ctx| ctx.functions.get(function))
                    .ok_or_else(|| EvalError::UnknownFunction(function.clone()))?;
                let args = arguments
                    .iter()
                    .map(|arg| arg.value(ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                f(&args).map_err(|message| EvalError::FunctionFailed {
                    function: function.clone(),
                    message,
                })
            }
        }
    }
}

pub type Function = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

#[derive(Clone, Default)]
pub struct EvalContext {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Function>,
}

impl std::fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("EvalContext")
            .field("variables", &self.variables)
            .field("functions", &functions)
            .finish()
    }
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_function<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Call to unknown function: {0}")]
    UnknownFunction(String),

    #[error("Error in function call {function}: {message}")]
    FunctionFailed { function: String, message: String },
}
