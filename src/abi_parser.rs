use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ParseError;
use crate::fragment::{AbiError, Constructor, Event, Fallback, Fragment, Function, Receive};
use crate::type_parser::parse_type;
use crate::types::{Param, Payability, StateMutability};

fn malformed(reason: impl Into<String>) -> ParseError {
    ParseError::MalformedFragment(reason.into())
}

/// Parse one element of a JSON ABI array.
pub fn parse_fragment(value: &Value) -> Result<Fragment, ParseError> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("fragment must be a JSON object"))?;

    let kind = match object.get("type") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(_) => return Err(malformed("`type` must be a string")),
        // Pre-standard dumps omit `type` on functions
        None if object.contains_key("name")
            && (object.contains_key("inputs") || object.contains_key("outputs")) =>
        {
            "function"
        }
        None => return Err(ParseError::MissingFragmentType),
    };

    match kind {
        "function" => {
            let name = required_name(object, "function")?;
            Ok(Fragment::Function(Function {
                state_mutability: resolve_mutability(object, &name)?,
                inputs: parse_params(object, "inputs", false)?,
                outputs: parse_params(object, "outputs", false)?,
                name,
            }))
        }
        "constructor" => Ok(Fragment::Constructor(Constructor {
            payability: resolve_payability(object, "constructor")?,
            inputs: parse_params(object, "inputs", false)?,
        })),
        "event" => Ok(Fragment::Event(Event {
            name: required_name(object, "event")?,
            inputs: parse_params(object, "inputs", true)?,
            anonymous: optional_bool(object, "anonymous")?.unwrap_or(false),
        })),
        "error" => Ok(Fragment::Error(AbiError {
            name: required_name(object, "error")?,
            inputs: parse_params(object, "inputs", false)?,
        })),
        "fallback" => Ok(Fragment::Fallback(Fallback {
            payability: resolve_payability(object, "fallback")?,
            inputs: parse_params(object, "inputs", false)?,
        })),
        "receive" => Ok(Fragment::Receive(Receive {
            inputs: parse_params(object, "inputs", false)?,
        })),
        other => Err(malformed(format!("unknown fragment type `{}`", other))),
    }
}

fn required_name(object: &Map<String, Value>, kind: &str) -> Result<String, ParseError> {
    match object.get("name") {
        Some(Value::String(name)) if is_identifier(name) => Ok(name.clone()),
        Some(Value::String(name)) if !name.is_empty() => {
            Err(malformed(format!("{} name `{}` is not a valid identifier", kind, name)))
        }
        _ => Err(malformed(format!("{} is missing a `name`", kind))),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn optional_bool(object: &Map<String, Value>, key: &str) -> Result<Option<bool>, ParseError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(malformed(format!("`{}` must be a boolean", key))),
    }
}

/// An explicit, valid `stateMutability` wins; otherwise the legacy
/// `constant`/`payable` flags decide.
fn resolve_mutability(object: &Map<String, Value>, context: &str) -> Result<StateMutability, ParseError> {
    let constant = optional_bool(object, "constant")?.unwrap_or(false);
    let payable = optional_bool(object, "payable")?.unwrap_or(false);

    if let Some(mutability) = explicit_mutability(object, context, Some) {
        return Ok(mutability);
    }

    Ok(if constant {
        StateMutability::View
    } else if payable {
        StateMutability::Payable
    } else {
        StateMutability::NonPayable
    })
}

/// Same precedence for constructors and fallbacks, where `view`/`pure` and
/// the `constant` flag have no meaning.
fn resolve_payability(object: &Map<String, Value>, context: &str) -> Result<Payability, ParseError> {
    let payable = optional_bool(object, "payable")?.unwrap_or(false);

    if let Some(payability) = explicit_mutability(object, context, |m| Payability::try_from(m).ok()) {
        return Ok(payability);
    }

    Ok(if payable {
        Payability::Payable
    } else {
        Payability::NonPayable
    })
}

/// The `stateMutability` field narrowed by `accept`, or `None` (with a
/// warning when the field is present but unusable).
fn explicit_mutability<T>(
    object: &Map<String, Value>,
    context: &str,
    accept: impl Fn(StateMutability) -> Option<T>,
) -> Option<T> {
    let explicit = object.get("stateMutability")?;
    let parsed = explicit.as_str().and_then(StateMutability::from_abi).and_then(accept);
    if parsed.is_none() {
        warn!(
            "Ignoring invalid stateMutability {} on {}, using legacy flags",
            explicit, context
        );
    }
    parsed
}

fn parse_params(
    object: &Map<String, Value>,
    key: &str,
    allow_indexed: bool,
) -> Result<Vec<Param>, ParseError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| parse_param(entry, allow_indexed))
            .collect(),
        Some(_) => Err(malformed(format!("`{}` must be an array", key))),
    }
}

/// `allow_indexed` is set only for the top-level inputs of an event; the
/// flag is dropped everywhere else.
fn parse_param(value: &Value, allow_indexed: bool) -> Result<Param, ParseError> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("parameter must be a JSON object"))?;

    let type_str = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("parameter is missing a string `type`"))?;

    let name = match object.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => name.clone(),
        Some(_) => return Err(malformed("parameter `name` must be a string")),
    };

    let components = match object.get("components") {
        None | Some(Value::Null) => None,
        Some(_) => Some(parse_params(object, "components", false)?),
    };

    let indexed = optional_bool(object, "indexed")?.unwrap_or(false);

    let internal_type = match object.get("internalType") {
        None | Some(Value::Null) => None,
        Some(Value::String(internal)) => Some(internal.clone()),
        Some(_) => return Err(malformed("parameter `internalType` must be a string")),
    };

    Ok(Param {
        name,
        kind: parse_type(type_str, components)?,
        indexed: allow_indexed && indexed,
        internal_type,
    })
}
