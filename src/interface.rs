use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::abi_parser::parse_fragment;
use crate::error::{ConvertError, ParseError, RenderError};
use crate::formatter::{render_fragment, to_json_value};
use crate::fragment::{AbiError, Constructor, Event, Fallback, Fragment, Function, Receive};
use crate::types::Format;

/// An ordered, parsed ABI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interface {
    fragments: Vec<Fragment>,
}

impl Interface {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Parse ABI JSON text. Fails on the first bad fragment; no partial result.
    pub fn parse(json: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let entries = value.as_array().ok_or(ParseError::NotAnArray)?;
        let fragments = entries
            .iter()
            .map(parse_fragment)
            .collect::<Result<Vec<_>, _>>()?;

        let interface = Self { fragments };
        debug!("Parsed ABI with {} fragment(s)", interface.fragments.len());
        for signature in interface.duplicates() {
            warn!("Duplicate definition - {}", signature);
        }
        Ok(interface)
    }

    /// Render the whole interface. `json` yields a JSON array; the other
    /// formats yield one line per fragment in declaration order.
    pub fn render(&self, format: Format) -> Result<String, RenderError> {
        match format {
            Format::Json => Ok(serde_json::to_string_pretty(&self.to_json_value())?),
            _ => Ok(self
                .fragments
                .iter()
                .map(|f| render_fragment(f, format))
                .collect::<Result<Vec<_>, _>>()?
                .join("\n")),
        }
    }

    pub fn to_json_value(&self) -> Value {
        Value::Array(self.fragments.iter().map(to_json_value).collect())
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Every fragment declared under `name`, i.e. all overloads.
    pub fn get(&self, name: &str) -> Vec<&Fragment> {
        self.fragments.iter().filter(|f| !name.is_empty() && f.name() == name).collect()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Function(function) => Some(function),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Event(event) => Some(event),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &AbiError> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Error(error) => Some(error),
            _ => None,
        })
    }

    pub fn function(&self, name: &str) -> Vec<&Function> {
        self.functions().filter(|f| f.name == name).collect()
    }

    pub fn event(&self, name: &str) -> Vec<&Event> {
        self.events().filter(|e| e.name == name).collect()
    }

    pub fn error(&self, name: &str) -> Vec<&AbiError> {
        self.errors().filter(|e| e.name == name).collect()
    }

    /// First declared constructor.
    pub fn constructor(&self) -> Option<&Constructor> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Constructor(c) => Some(c),
            _ => None,
        })
    }

    pub fn fallback(&self) -> Option<&Fallback> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Fallback(fallback) => Some(fallback),
            _ => None,
        })
    }

    pub fn receive(&self) -> Option<&Receive> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Receive(receive) => Some(receive),
            _ => None,
        })
    }

    /// Look up a fragment by selector preimage, e.g. `transfer(address,uint256)`.
    /// Functions, events and errors live in separate namespaces, so `kind`
    /// narrows the search when the same preimage is shared.
    pub fn find_by_signature(&self, signature: &str, kind: Option<&str>) -> Option<&Fragment> {
        self.fragments
            .iter()
            .filter(|f| kind.map_or(true, |k| f.kind() == k))
            .find(|f| f.sighash() == signature)
    }

    /// `kind sighash` keys declared more than once, in order of first repeat.
    pub fn duplicates(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for key in self.fragments.iter().map(dedup_key) {
            if !seen.insert(key.clone()) && reported.insert(key.clone()) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    /// Copy of this interface keeping only the first of each duplicate definition.
    pub fn dedup(&self) -> Self {
        let mut seen = HashSet::new();
        Self {
            fragments: self
                .fragments
                .iter()
                .filter(|f| seen.insert(dedup_key(f)))
                .cloned()
                .collect(),
        }
    }
}

/// Constructors, fallbacks and receives are unique per contract regardless of inputs.
fn dedup_key(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Constructor(_) | Fragment::Fallback(_) | Fragment::Receive(_) => {
            fragment.kind().to_string()
        }
        _ => format!("{} {}", fragment.kind(), fragment.sighash()),
    }
}

/// Parse and render in one step.
pub fn convert(json: &str, format: Format) -> Result<String, ConvertError> {
    Ok(Interface::parse(json)?.render(format)?)
}
