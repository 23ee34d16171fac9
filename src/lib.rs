//! Convert Ethereum JSON ABIs between canonical JSON, full and minimal
//! human-readable signatures, and selector preimages.

pub mod abi_parser;
pub mod converter;
pub mod error;
pub mod formatter;
pub mod fragment;
pub mod interface;
pub mod type_parser;
pub mod types;

pub use abi_parser::parse_fragment;
pub use converter::Converter;
pub use error::{ConvertError, ParseError, RenderError};
pub use formatter::{render_fragment, render_param};
pub use fragment::Fragment;
pub use interface::{convert, Interface};
pub use type_parser::{parse_type, MAX_TYPE_DEPTH};
pub use types::{Format, Param, ParamType, Payability, StateMutability};

/// Parse ABI JSON text.
pub fn parse(text: &str) -> Result<Interface, ParseError> {
    Interface::parse(text)
}

/// Render a parsed ABI in `format`.
pub fn render(interface: &Interface, format: Format) -> Result<String, RenderError> {
    interface.render(format)
}
