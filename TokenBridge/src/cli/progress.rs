//! CLI progress display utilities
//!
//! Step indicators for file conversions: `[1/3] 🔍 Reading brand.json`.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::HumanDuration;

use crate::converter::{ConvertPhase, ConvertProgress};

/// Magnifying glass - for reading operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Gear - for conversion operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - for writing operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/3] 🔍 Message`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print one conversion progress update as a step line
pub fn print_convert_progress(progress: &ConvertProgress) {
    let emoji = match progress.phase {
        ConvertPhase::ReadingSource => LOOKING_GLASS,
        ConvertPhase::Converting => GEAR,
        ConvertPhase::WritingOutput => DISK,
        ConvertPhase::Complete => return,
    };
    let msg = match &progress.current_file {
        Some(file) => format!("{} {}", progress.phase.as_str(), file),
        None => progress.phase.as_str().to_string(),
    };
    print_step(progress.current, progress.total, emoji, &msg);
}
