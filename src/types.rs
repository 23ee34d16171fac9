// type definitions
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// A single ABI parameter type.
///
/// Arrays wrap any other type, tuples wrap a named component list, so
/// `tuple(uint256[2])[]` is `Array(Tuple([FixedArray(Uint(256), 2)]))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Bool,
    String,
    Bytes,
    FixedBytes(usize),
    Uint(usize),
    Int(usize),
    Function,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<Param>),
}

impl ParamType {
    /// Name of the innermost base type (`uint256`, `tuple`, ...), without array suffixes.
    pub fn base_type(&self) -> String {
        match self {
            ParamType::Address => "address".to_string(),
            ParamType::Bool => "bool".to_string(),
            ParamType::String => "string".to_string(),
            ParamType::Bytes => "bytes".to_string(),
            ParamType::FixedBytes(size) => format!("bytes{}", size),
            ParamType::Uint(bits) => format!("uint{}", bits),
            ParamType::Int(bits) => format!("int{}", bits),
            ParamType::Function => "function".to_string(),
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => inner.base_type(),
            ParamType::Tuple(_) => "tuple".to_string(),
        }
    }

    /// `None` for non-arrays, `Some(-1)` for `T[]`, `Some(n)` for `T[n]`.
    pub fn array_length(&self) -> Option<i64> {
        match self {
            ParamType::Array(_) => Some(-1),
            ParamType::FixedArray(_, len) => Some(i64::try_from(*len).unwrap_or(i64::MAX)),
            _ => None,
        }
    }

    /// Levels of nesting: 1 for an elementary type, plus one per array layer
    /// or tuple level.
    pub fn depth(&self) -> usize {
        match self {
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => 1 + inner.depth(),
            ParamType::Tuple(components) => {
                1 + components.iter().map(|c| c.kind.depth()).max().unwrap_or(0)
            }
            _ => 1,
        }
    }

    /// Element type of an array layer.
    pub fn array_child(&self) -> Option<&ParamType> {
        match self {
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => Some(inner),
            _ => None,
        }
    }

    /// Tuple components reachable through any number of array layers.
    pub fn components(&self) -> &[Param] {
        match self {
            ParamType::Tuple(components) => components,
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => inner.components(),
            _ => &[],
        }
    }

    /// The `type` string as written in JSON ABI, e.g. `tuple[]` or `uint256[2][]`.
    pub fn abi_type(&self) -> String {
        match self {
            ParamType::Array(inner) => format!("{}[]", inner.abi_type()),
            ParamType::FixedArray(inner, len) => format!("{}[{}]", inner.abi_type(), len),
            other => other.base_type(),
        }
    }
}

/// Canonical form used in selector preimages: tuples expand to `(T1,T2)`.
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            ParamType::Tuple(components) => {
                write!(f, "(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", component.kind)?;
                }
                write!(f, ")")
            }
            other => write!(f, "{}", other.base_type()),
        }
    }
}

/// A named parameter: fragment input/output or tuple component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamType,
    /// Only ever true on the top-level inputs of an event.
    pub indexed: bool,
    /// Compiler-level type name (`struct Person[]`), carried through untouched.
    pub internal_type: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            indexed: false,
            internal_type: None,
        }
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn with_internal_type(mut self, internal_type: impl Into<String>) -> Self {
        self.internal_type = Some(internal_type.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }

    pub fn from_abi(value: &str) -> Option<Self> {
        match value {
            "pure" => Some(StateMutability::Pure),
            "view" => Some(StateMutability::View),
            "nonpayable" => Some(StateMutability::NonPayable),
            "payable" => Some(StateMutability::Payable),
            _ => None,
        }
    }

    /// Legacy `constant` flag: true for `view` and `pure`.
    pub fn is_constant(&self) -> bool {
        matches!(self, StateMutability::View | StateMutability::Pure)
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutability of a constructor or fallback, which can never be `view` or `pure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Payability {
    #[default]
    NonPayable,
    Payable,
}

impl From<Payability> for StateMutability {
    fn from(payability: Payability) -> Self {
        match payability {
            Payability::NonPayable => StateMutability::NonPayable,
            Payability::Payable => StateMutability::Payable,
        }
    }
}

impl TryFrom<StateMutability> for Payability {
    type Error = StateMutability;

    fn try_from(mutability: StateMutability) -> Result<Self, Self::Error> {
        match mutability {
            StateMutability::NonPayable => Ok(Payability::NonPayable),
            StateMutability::Payable => Ok(Payability::Payable),
            other => Err(other),
        }
    }
}

/// Output format of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Full,
    Minimal,
    Json,
    Sighash,
}

impl Format {
    /// Every selectable format, in the order a format picker lists them.
    pub const ALL: [Format; 4] = [Format::Full, Format::Minimal, Format::Json, Format::Sighash];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Full => "full",
            Format::Minimal => "minimal",
            Format::Json => "json",
            Format::Sighash => "sighash",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| RenderError::UnknownFormat(s.to_string()))
    }
}
