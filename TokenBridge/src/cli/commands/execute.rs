//! Command execution implementations

use super::Commands;
use super::{convert, formats, inspect};
use crate::converter::Converter;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, converter: &Converter) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                source,
                destination,
                input_format,
                output_format,
                show_xml,
                quiet,
            } => convert::execute(
                converter,
                source,
                destination.as_deref(),
                input_format.as_deref(),
                output_format.as_deref(),
                *show_xml,
                *quiet,
            ),
            Commands::Inspect {
                source,
                input_format,
            } => inspect::execute(converter, source, input_format.as_deref()),
            Commands::Formats => {
                formats::execute();
                Ok(())
            }
        }
    }
}
