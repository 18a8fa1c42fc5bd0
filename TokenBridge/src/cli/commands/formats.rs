//! CLI command for listing supported formats

use crate::converter::Format;

pub fn execute() {
    println!("Formats:");
    for format in Format::ALL {
        let status = if format.is_implemented() { "" } else { "  (not implemented)" };
        println!(
            "  {:<16} .{:<5} {}{}",
            format.display_name(),
            format.extension(),
            if format.is_binary() { "binary" } else { "text" },
            status
        );
    }

    println!("\nConversions:");
    for source in Format::ALL.into_iter().filter(|f| f.is_implemented()) {
        let targets: Vec<&str> = Format::ALL
            .into_iter()
            .filter(|t| *t != source && t.is_implemented())
            .map(Format::short_name)
            .collect();
        println!("  {:<5} -> {}", source.short_name(), targets.join(", "));
    }
}
