use tracing::debug;

use crate::error::ConvertError;
use crate::interface::Interface;
use crate::types::Format;

/// Re-render-on-edit state for a two-pane host: feed it every input change
/// and display [`Converter::output`].
///
/// A failed parse leaves the previous interface and output in place so the
/// host can surface the error without blanking its output pane.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    format: Format,
    interface: Option<Interface>,
    output: String,
}

impl Converter {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            interface: None,
            output: String::new(),
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn interface(&self) -> Option<&Interface> {
        self.interface.as_ref()
    }

    /// Parse `text` and re-render it in the current format.
    pub fn on_input_changed(&mut self, text: &str) -> Result<&str, ConvertError> {
        let interface = Interface::parse(text)?;
        let output = interface.render(self.format)?;
        debug!("Input changed, rendered {} fragment(s) as {}", interface.len(), self.format);
        self.interface = Some(interface);
        self.output = output;
        Ok(&self.output)
    }

    /// Switch formats and re-render the last successfully parsed input.
    pub fn select_format(&mut self, format: Format) -> Result<&str, ConvertError> {
        if let Some(interface) = &self.interface {
            self.output = interface.render(format)?;
        }
        self.format = format;
        Ok(&self.output)
    }
}
