use serde_json::{json, Map, Value};

use crate::error::RenderError;
use crate::fragment::Fragment;
use crate::types::{Format, Param, ParamType, StateMutability};

/// Render one fragment in the requested format.
pub fn render_fragment(fragment: &Fragment, format: Format) -> Result<String, RenderError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&to_json_value(fragment))?),
        Format::Sighash => Ok(fragment.sighash()),
        Format::Full | Format::Minimal => Ok(signature(fragment, format)),
    }
}

/// Human-readable signature: `KEYWORD [name](params) [modifiers] [returns (...)]`.
fn signature(fragment: &Fragment, format: Format) -> String {
    let mut result = fragment.kind().to_string();
    if !fragment.name().is_empty() {
        result.push(' ');
        result.push_str(fragment.name());
    }
    result.push('(');
    result.push_str(&join_params(fragment.inputs(), format));
    result.push(')');

    match fragment.state_mutability() {
        Some(StateMutability::NonPayable) | None => {}
        Some(mutability) => {
            result.push(' ');
            result.push_str(mutability.as_str());
        }
    }

    if let Fragment::Event(event) = fragment {
        if event.anonymous {
            result.push_str(" anonymous");
        }
    }

    let outputs = fragment.outputs();
    if !outputs.is_empty() {
        let rendered: Vec<String> = outputs.iter().map(|p| render_param(p, format)).collect();
        result.push_str(&format!(" returns ({})", rendered.join(", ")));
    }

    result
}

fn join_params(params: &[Param], format: Format) -> String {
    let separator = if format == Format::Full { ", " } else { "," };
    params
        .iter()
        .map(|p| render_param(p, format))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render a single parameter: `TYPE [indexed] [name]`. Names only appear in
/// `full`; `sighash` is the bare canonical type.
///
/// `indexed` sits between type and name (`address indexed from`), as in
/// Solidity event declarations and ethers' human-readable ABI.
pub fn render_param(param: &Param, format: Format) -> String {
    match format {
        Format::Sighash => return param.kind.to_string(),
        Format::Json => return param_to_json(param, param.indexed).to_string(),
        Format::Full | Format::Minimal => {}
    }

    let mut result = render_type(&param.kind, format);
    if param.indexed {
        result.push_str(" indexed");
    }
    if format == Format::Full && !param.name.is_empty() {
        result.push(' ');
        result.push_str(&param.name);
    }
    result
}

fn render_type(kind: &ParamType, format: Format) -> String {
    match kind {
        ParamType::Array(inner) => format!("{}[]", render_type(inner, format)),
        ParamType::FixedArray(inner, len) => format!("{}[{}]", render_type(inner, format), len),
        ParamType::Tuple(components) => format!("tuple({})", join_params(components, format)),
        other => other.base_type(),
    }
}

/// Canonical JSON object for a fragment: explicit `type` and
/// `stateMutability`, `indexed` on every event input, no legacy flags.
pub fn to_json_value(fragment: &Fragment) -> Value {
    let params = |params: &[Param], with_indexed: bool| -> Value {
        Value::Array(params.iter().map(|p| param_to_json(p, with_indexed)).collect())
    };

    match fragment {
        Fragment::Constructor(c) => json!({
            "type": "constructor",
            "inputs": params(&c.inputs, false),
            "stateMutability": StateMutability::from(c.payability),
        }),
        Fragment::Function(f) => json!({
            "type": "function",
            "name": f.name,
            "inputs": params(&f.inputs, false),
            "outputs": params(&f.outputs, false),
            "stateMutability": f.state_mutability,
        }),
        Fragment::Event(e) => json!({
            "type": "event",
            "name": e.name,
            "inputs": params(&e.inputs, true),
            "anonymous": e.anonymous,
        }),
        Fragment::Error(e) => json!({
            "type": "error",
            "name": e.name,
            "inputs": params(&e.inputs, false),
        }),
        Fragment::Fallback(f) => {
            let mut value = json!({
                "type": "fallback",
                "stateMutability": StateMutability::from(f.payability),
            });
            if !f.inputs.is_empty() {
                value["inputs"] = params(&f.inputs, false);
            }
            value
        }
        Fragment::Receive(r) => {
            let mut value = json!({
                "type": "receive",
                "stateMutability": StateMutability::Payable,
            });
            if !r.inputs.is_empty() {
                value["inputs"] = params(&r.inputs, false);
            }
            value
        }
    }
}

fn param_to_json(param: &Param, with_indexed: bool) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), Value::String(param.name.clone()));
    object.insert("type".to_string(), Value::String(param.kind.abi_type()));

    let components = param.kind.components();
    if !components.is_empty() {
        object.insert(
            "components".to_string(),
            Value::Array(components.iter().map(|c| param_to_json(c, false)).collect()),
        );
    }
    if let Some(internal_type) = &param.internal_type {
        object.insert("internalType".to_string(), Value::String(internal_type.clone()));
    }
    if with_indexed {
        object.insert("indexed".to_string(), Value::Bool(param.indexed));
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi_parser::parse_fragment;
    use crate::fragment::{Constructor, Event, Fallback, Function, Receive};
    use crate::types::Payability;

    fn person_array() -> Param {
        Param::new(
            "person",
            ParamType::Array(Box::new(ParamType::Tuple(vec![
                Param::new("name", ParamType::String),
                Param::new("age", ParamType::Uint(16)),
            ]))),
        )
    }

    #[test]
    fn tuple_array_param_in_each_format() {
        let p = person_array();
        assert_eq!(render_param(&p, Format::Full), "tuple(string name, uint16 age)[] person");
        assert_eq!(render_param(&p, Format::Minimal), "tuple(string,uint16)[]");
        assert_eq!(render_param(&p, Format::Sighash), "(string,uint16)[]");
        assert_eq!(
            render_param(&p, Format::Json),
            r#"{"components":[{"name":"name","type":"string"},{"name":"age","type":"uint16"}],"name":"person","type":"tuple[]"}"#
        );
    }

    #[test]
    fn single_component_tuple_keeps_parens() {
        let p = Param::new("", ParamType::Tuple(vec![Param::new("x", ParamType::Bool)]));
        assert_eq!(render_param(&p, Format::Full), "tuple(bool x)");
        assert_eq!(render_param(&p, Format::Sighash), "(bool)");
    }

    #[test]
    fn function_signatures() {
        let f = Fragment::Function(Function {
            name: "balanceOf".to_string(),
            inputs: vec![Param::new("owner", ParamType::Address)],
            outputs: vec![Param::new("", ParamType::Uint(256))],
            state_mutability: StateMutability::View,
        });
        assert_eq!(
            render_fragment(&f, Format::Full).unwrap(),
            "function balanceOf(address owner) view returns (uint256)"
        );
        assert_eq!(
            render_fragment(&f, Format::Minimal).unwrap(),
            "function balanceOf(address) view returns (uint256)"
        );
        assert_eq!(render_fragment(&f, Format::Sighash).unwrap(), "balanceOf(address)");
    }

    #[test]
    fn zero_argument_nonpayable_function() {
        let f = Fragment::Function(Function {
            name: "ping".to_string(),
            inputs: vec![],
            outputs: vec![],
            state_mutability: StateMutability::NonPayable,
        });
        assert_eq!(render_fragment(&f, Format::Full).unwrap(), "function ping()");
        assert_eq!(render_fragment(&f, Format::Sighash).unwrap(), "ping()");
    }

    #[test]
    fn event_signatures() {
        let e = Fragment::Event(Event {
            name: "Transfer".to_string(),
            inputs: vec![
                Param::new("from", ParamType::Address).indexed(true),
                Param::new("to", ParamType::Address).indexed(true),
                Param::new("value", ParamType::Uint(256)),
            ],
            anonymous: true,
        });
        assert_eq!(
            render_fragment(&e, Format::Full).unwrap(),
            "event Transfer(address indexed from, address indexed to, uint256 value) anonymous"
        );
        assert_eq!(
            render_fragment(&e, Format::Minimal).unwrap(),
            "event Transfer(address indexed,address indexed,uint256) anonymous"
        );
        assert_eq!(
            render_fragment(&e, Format::Sighash).unwrap(),
            "Transfer(address,address,uint256)"
        );
    }

    #[test]
    fn fallback_and_receive() {
        let fallback = Fragment::Fallback(Fallback {
            inputs: vec![],
            payability: Payability::Payable,
        });
        assert_eq!(render_fragment(&fallback, Format::Full).unwrap(), "fallback() payable");

        let receive = Fragment::Receive(Receive { inputs: vec![] });
        assert_eq!(render_fragment(&receive, Format::Minimal).unwrap(), "receive() payable");
        assert_eq!(
            to_json_value(&receive),
            json!({"type": "receive", "stateMutability": "payable"})
        );
    }

    #[test]
    fn constructor_and_fallback_json_round_trip() {
        for payability in [Payability::NonPayable, Payability::Payable] {
            let fragments = [
                Fragment::Constructor(Constructor {
                    inputs: vec![Param::new("owner", ParamType::Address)],
                    payability,
                }),
                Fragment::Fallback(Fallback { inputs: vec![], payability }),
            ];
            for fragment in fragments {
                let value = to_json_value(&fragment);
                assert_eq!(value["stateMutability"], StateMutability::from(payability).as_str());
                assert_eq!(parse_fragment(&value).unwrap(), fragment);
            }
        }
    }

    #[test]
    fn json_event_has_indexed_on_every_input() {
        let e = parse_fragment(&json!({
            "type": "event", "name": "Ping",
            "inputs": [{"type": "uint256", "name": "id"}, {"type": "uint256[]"}]
        }))
        .unwrap();
        let value = to_json_value(&e);
        assert_eq!(
            value,
            json!({
                "type": "event",
                "name": "Ping",
                "anonymous": false,
                "inputs": [
                    {"name": "id", "type": "uint256", "indexed": false},
                    {"name": "", "type": "uint256[]", "indexed": false}
                ]
            })
        );
    }

    #[test]
    fn json_drops_legacy_flags() {
        let f = parse_fragment(&json!({
            "type": "function", "name": "addPeople", "constant": false, "payable": false,
            "inputs": [{"type": "tuple[]", "name": "person", "internalType": "struct P[]", "components": [
                {"type": "string", "name": "name"}
            ]}]
        }))
        .unwrap();
        let value = to_json_value(&f);
        assert!(value.get("constant").is_none());
        assert!(value.get("payable").is_none());
        assert_eq!(value["stateMutability"], "nonpayable");
        assert_eq!(value["inputs"][0]["type"], "tuple[]");
        assert_eq!(value["inputs"][0]["internalType"], "struct P[]");
        assert_eq!(value["inputs"][0]["components"][0]["name"], "name");
        assert!(value["inputs"][0].get("indexed").is_none());
    }

    #[test]
    fn json_output_is_pretty_with_sorted_keys() {
        let e = Fragment::Event(Event { name: "E".to_string(), inputs: vec![], anonymous: false });
        assert_eq!(
            render_fragment(&e, Format::Json).unwrap(),
            "{\n  \"anonymous\": false,\n  \"inputs\": [],\n  \"name\": \"E\",\n  \"type\": \"event\"\n}"
        );
    }
}
