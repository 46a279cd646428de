//! Argument-tree model for protocol call semantics
//!
//! An upstream ABI decoder emits every call argument as an [`ArgumentNode`]
//! carrying a `type` tag, an optional `name` and a `value`. Protocol parsers
//! borrow that tree mutably, relabel slots and rewrite payloads in place; the
//! caller keeps ownership of the tree for its whole lifetime.

pub mod errors;
pub mod number;
pub mod test_utils;

use std::fmt;

use alloy_primitives::U256;
use alloy_primitives::ruint::UintTryFrom;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use errors::SemanticsError;
pub use number::{DecodedNumber, scale};

/// Semantic tag of a node, serialized as the node's `type`.
///
/// Drives display only; parsers never branch on it. Tags other than the
/// known ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArgumentKind {
    Number,
    Bool,
    String,
    Address,
    Bytes,
    Tuple,
    /// Slot carries no meaning for the decoded action
    Ignore,
    Other(String),
}

impl ArgumentKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number => "number",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Address => "address",
            Self::Bytes => "bytes",
            Self::Tuple => "tuple",
            Self::Ignore => "ignore",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ArgumentKind {
    fn from(tag: &str) -> Self {
        match tag {
            "number" => Self::Number,
            "bool" => Self::Bool,
            "string" => Self::String,
            "address" => Self::Address,
            "bytes" => Self::Bytes,
            "tuple" => Self::Tuple,
            "ignore" => Self::Ignore,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ArgumentKind {
    fn from(tag: String) -> Self {
        match Self::from(tag.as_str()) {
            Self::Other(_) => Self::Other(tag),
            known => known,
        }
    }
}

impl From<ArgumentKind> for String {
    fn from(kind: ArgumentKind) -> Self {
        match kind {
            ArgumentKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `value` of a node: a primitive, a decoded number, or child nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ArgumentValue {
    Bool(bool),
    Uint(U256),
    Str(String),
    /// Sign-adjusted and rescaled amount written by a parser
    Decimal(DecodedNumber),
    Nodes(Vec<ArgumentNode>),
    #[default]
    Null,
}

impl ArgumentValue {
    /// Short name of the payload shape, used in error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Uint(_) => "integer",
            Self::Str(_) => "string",
            Self::Decimal(_) => "decimal",
            Self::Nodes(_) => "sequence",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Str(text) => f.write_str(text),
            Self::Decimal(number) => write!(f, "{number}"),
            Self::Nodes(nodes) => {
                let parts: Vec<String> = nodes.iter().map(|n| n.payload.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Null => f.write_str("null"),
        }
    }
}

/// Writes `literal` as a JSON number when it parses as one, as a string otherwise.
pub(crate) fn serialize_numeric<S: Serializer>(
    literal: &str,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match literal.parse::<serde_json::Number>() {
        Ok(number) => number.serialize(serializer),
        Err(_) => serializer.serialize_str(literal),
    }
}

impl Serialize for ArgumentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Uint(value) => match u64::try_from(*value) {
                Ok(small) => serializer.serialize_u64(small),
                Err(_) => serialize_numeric(&value.to_string(), serializer),
            },
            Self::Str(text) => serializer.serialize_str(text),
            Self::Decimal(number) => number.serialize(serializer),
            Self::Nodes(nodes) => nodes.serialize(serializer),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl TryFrom<serde_json::Value> for ArgumentValue {
    type Error = SemanticsError;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        Ok(match raw {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::String(text) => Self::Str(text),
            Value::Number(number) => match number.as_u64() {
                Some(small) => Self::Uint(U256::from(small)),
                None => {
                    let literal = number.to_string();
                    match U256::from_str_radix(&literal, 10) {
                        Ok(value) => Self::Uint(value),
                        Err(_) => Self::Decimal(literal.parse()?),
                    }
                }
            },
            Value::Array(items) => Self::Nodes(
                items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<_, _>>()
                    .map_err(|e| SemanticsError::InvalidTree(e.to_string()))?,
            ),
            Value::Object(_) => {
                return Err(SemanticsError::InvalidTree(
                    "a value must be a primitive or a list of nodes, found an object".to_string(),
                ));
            }
        })
    }
}

impl<'de> Deserialize<'de> for ArgumentValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// One decoded call argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentNode {
    #[serde(rename = "type")]
    pub kind: ArgumentKind,
    #[serde(rename = "name", default)]
    pub label: Option<String>,
    #[serde(rename = "value", default)]
    pub payload: ArgumentValue,
}

impl ArgumentNode {
    pub fn new(kind: ArgumentKind, payload: ArgumentValue) -> Self {
        Self {
            kind,
            label: None,
            payload,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn uint<T>(value: T) -> Self
    where
        U256: UintTryFrom<T>,
    {
        Self::new(ArgumentKind::Number, ArgumentValue::Uint(U256::from(value)))
    }

    pub fn flag(value: bool) -> Self {
        Self::new(ArgumentKind::Bool, ArgumentValue::Bool(value))
    }

    pub fn tuple(children: Vec<ArgumentNode>) -> Self {
        Self::new(ArgumentKind::Tuple, ArgumentValue::Nodes(children))
    }

    /// Borrows exactly `arity` children, the size `role` requires.
    pub fn children(&self, role: &'static str, arity: usize) -> Result<&[ArgumentNode], SemanticsError> {
        match &self.payload {
            ArgumentValue::Nodes(nodes) if nodes.len() == arity => Ok(nodes),
            ArgumentValue::Nodes(nodes) => Err(SemanticsError::ArityMismatch {
                role,
                expected: arity,
                actual: nodes.len(),
            }),
            other => Err(SemanticsError::UnexpectedPayload {
                role,
                expected: "sequence",
                found: other.shape(),
            }),
        }
    }

    pub fn children_mut(
        &mut self,
        role: &'static str,
        arity: usize,
    ) -> Result<&mut [ArgumentNode], SemanticsError> {
        let found = self.payload.shape();
        let ArgumentValue::Nodes(nodes) = &mut self.payload else {
            return Err(SemanticsError::UnexpectedPayload {
                role,
                expected: "sequence",
                found,
            });
        };
        if nodes.len() != arity {
            return Err(SemanticsError::ArityMismatch {
                role,
                expected: arity,
                actual: nodes.len(),
            });
        }
        Ok(nodes)
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self.payload {
            ArgumentValue::Uint(value) => Some(value),
            _ => None,
        }
    }

    pub fn expect_uint(&self, role: &'static str) -> Result<U256, SemanticsError> {
        self.as_uint().ok_or(SemanticsError::UnexpectedPayload {
            role,
            expected: "integer",
            found: self.payload.shape(),
        })
    }

    /// Sign flags arrive as booleans or as the decoder's `"True"` string;
    /// anything else counts as negative.
    pub fn is_positive_flag(&self) -> bool {
        match &self.payload {
            ArgumentValue::Bool(flag) => *flag,
            ArgumentValue::Str(text) => text == "True",
            _ => false,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Tags the slot as meaningless; the label is left alone.
    pub fn mark_ignored(&mut self) {
        self.kind = ArgumentKind::Ignore;
    }

    pub fn replace_payload(&mut self, kind: ArgumentKind, payload: ArgumentValue) {
        self.kind = kind;
        self.payload = payload;
    }
}
