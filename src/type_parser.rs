use crate::error::ParseError;
use crate::types::{Param, ParamType};

/// Deepest array/tuple nesting accepted; rendering and dropping recurse per level.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Parse a JSON ABI `type` string such as `uint256[2][]` or `tuple[]`.
///
/// `components` must be given (and non-empty) when the base type is `tuple`,
/// and must be absent or empty otherwise. Array suffixes wrap left to right,
/// so the last suffix is the outermost layer: `T[2][]` is a dynamic array of
/// `T[2]`. Nesting deeper than [`MAX_TYPE_DEPTH`] is a `MalformedType`.
pub fn parse_type(type_str: &str, components: Option<Vec<Param>>) -> Result<ParamType, ParseError> {
    let malformed = || ParseError::MalformedType(type_str.to_string());

    let (base, suffixes) = match type_str.find('[') {
        Some(pos) => type_str.split_at(pos),
        None => (type_str, ""),
    };

    let components = components.unwrap_or_default();
    let mut kind = if base == "tuple" {
        if components.is_empty() {
            return Err(malformed());
        }
        ParamType::Tuple(components)
    } else {
        if !components.is_empty() {
            return Err(malformed());
        }
        parse_base(base).ok_or_else(malformed)?
    };

    let mut depth = kind.depth();
    if depth > MAX_TYPE_DEPTH {
        return Err(malformed());
    }

    let mut rest = suffixes;
    while !rest.is_empty() {
        depth += 1;
        if depth > MAX_TYPE_DEPTH {
            return Err(malformed());
        }
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = inner.find(']').ok_or_else(malformed)?;
        let length = &inner[..close];
        kind = if length.is_empty() {
            ParamType::Array(Box::new(kind))
        } else {
            let len = parse_decimal(length)
                .filter(|n| *n > 0 && i64::try_from(*n).is_ok())
                .ok_or_else(malformed)?;
            ParamType::FixedArray(Box::new(kind), len)
        };
        rest = &inner[close + 1..];
    }

    Ok(kind)
}

fn parse_base(base: &str) -> Option<ParamType> {
    match base {
        "address" => return Some(ParamType::Address),
        "bool" => return Some(ParamType::Bool),
        "string" => return Some(ParamType::String),
        "bytes" => return Some(ParamType::Bytes),
        "function" => return Some(ParamType::Function),
        "uint" => return Some(ParamType::Uint(256)),
        "int" => return Some(ParamType::Int(256)),
        _ => {}
    }

    if let Some(width) = base.strip_prefix("bytes") {
        return parse_decimal(width)
            .filter(|size| (1..=32).contains(size))
            .map(ParamType::FixedBytes);
    }
    if let Some(width) = base.strip_prefix("uint") {
        return parse_bits(width).map(ParamType::Uint);
    }
    if let Some(width) = base.strip_prefix("int") {
        return parse_bits(width).map(ParamType::Int);
    }
    None
}

fn parse_bits(width: &str) -> Option<usize> {
    parse_decimal(width).filter(|bits| *bits % 8 == 0 && (8..=256).contains(bits))
}

/// Plain decimal without sign or leading zeros, so rendering reproduces the input.
fn parse_decimal(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
