//! CLI interface for format conversion

use crate::cli::progress::{print_convert_progress, print_done};
use crate::converter::{Converter, Format, Payload};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Convert `source`, writing to `destination` or printing text output.
///
/// # Errors
/// Returns an error if a format cannot be determined or the conversion fails.
pub fn execute(
    converter: &Converter,
    source: &Path,
    destination: Option<&Path>,
    input_format: Option<&str>,
    output_format: Option<&str>,
    show_xml: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    // Auto-detect or use provided formats
    let input = match input_format {
        Some(fmt) => fmt.parse::<Format>()?,
        None => Format::from_path(source)
            .map_err(|_| anyhow::anyhow!("Cannot detect input format from source file extension"))?,
    };

    let output = match (output_format, destination) {
        (Some(fmt), _) => fmt.parse::<Format>()?,
        (None, Some(dest)) => Format::from_path(dest).map_err(|_| {
            anyhow::anyhow!("Cannot detect output format from destination file extension")
        })?,
        (None, None) => anyhow::bail!("No destination given; pass --output-format to print to stdout"),
    };

    let result = match destination {
        Some(dest) => {
            let start = Instant::now();
            let result = if quiet {
                converter.convert_file(source, dest, input, output)?
            } else {
                converter.convert_file_with_progress(source, dest, input, output, &print_convert_progress)?
            };
            if !quiet {
                print_done(start.elapsed());
            }
            result
        }
        None => {
            if output.is_binary() {
                anyhow::bail!(
                    "{} output is binary; pass --destination to write it to a file",
                    output.display_name()
                );
            }
            let payload = Payload::for_format(input, std::fs::read(source)?)?;
            let result = converter.try_convert(input, output, payload)?;
            std::io::stdout().write_all(result.payload.as_bytes())?;
            result
        }
    };

    if show_xml {
        match &result.rendered {
            Some(xml) => println!("\nCLR File Contents (XML):\n{xml}"),
            None => println!("\nNo XML view for {} output", output.display_name()),
        }
    }

    Ok(())
}
