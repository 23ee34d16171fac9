use crate::types::{Param, Payability, StateMutability};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub inputs: Vec<Param>,
    pub payability: Payability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    pub state_mutability: StateMutability,
}

impl Function {
    pub fn constant(&self) -> bool {
        self.state_mutability.is_constant()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<Param>,
    pub anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiError {
    pub name: String,
    pub inputs: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub inputs: Vec<Param>,
    pub payability: Payability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receive {
    pub inputs: Vec<Param>,
}

/// One entry of a JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Constructor(Constructor),
    Function(Function),
    Fallback(Fallback),
    Receive(Receive),
    Event(Event),
    Error(AbiError),
}

impl Fragment {
    /// The `type` tag, which doubles as the signature keyword.
    pub fn kind(&self) -> &'static str {
        match self {
            Fragment::Constructor(_) => "constructor",
            Fragment::Function(_) => "function",
            Fragment::Fallback(_) => "fallback",
            Fragment::Receive(_) => "receive",
            Fragment::Event(_) => "event",
            Fragment::Error(_) => "error",
        }
    }

    /// Declared name; empty for constructor, fallback and receive.
    pub fn name(&self) -> &str {
        match self {
            Fragment::Function(f) => &f.name,
            Fragment::Event(e) => &e.name,
            Fragment::Error(e) => &e.name,
            Fragment::Constructor(_) | Fragment::Fallback(_) | Fragment::Receive(_) => "",
        }
    }

    pub fn inputs(&self) -> &[Param] {
        match self {
            Fragment::Constructor(c) => &c.inputs,
            Fragment::Function(f) => &f.inputs,
            Fragment::Fallback(f) => &f.inputs,
            Fragment::Receive(r) => &r.inputs,
            Fragment::Event(e) => &e.inputs,
            Fragment::Error(e) => &e.inputs,
        }
    }

    pub fn outputs(&self) -> &[Param] {
        match self {
            Fragment::Function(f) => &f.outputs,
            _ => &[],
        }
    }

    pub fn state_mutability(&self) -> Option<StateMutability> {
        match self {
            Fragment::Constructor(c) => Some(c.payability.into()),
            Fragment::Function(f) => Some(f.state_mutability),
            Fragment::Fallback(f) => Some(f.payability.into()),
            Fragment::Receive(_) => Some(StateMutability::Payable),
            Fragment::Event(_) | Fragment::Error(_) => None,
        }
    }

    /// Selector preimage, e.g. `transfer(address,uint256)`. Unnamed
    /// fragments use their keyword in place of a name.
    pub fn sighash(&self) -> String {
        let name = match self.name() {
            "" => self.kind(),
            name => name,
        };
        let types: Vec<String> = self.inputs().iter().map(|p| p.kind.to_string()).collect();
        format!("{}({})", name, types.join(","))
    }
}
