//! Terminal output helpers shared by the commands.

use std::io::Write;

use squares_engine::game::CategoryHistogram;
use squares_engine::grid::Line;
use squares_engine::hand::HandCategory;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// "Row 2" / "Col 4" label for a hand index.
pub fn hand_label(hand: usize) -> String {
    match Line::from_hand_index(hand) {
        Some(Line::Row(r)) => format!("Row {}", r),
        Some(Line::Col(c)) => format!("Col {}", c),
        None => format!("Hand {}", hand),
    }
}

/// One line per category, strongest first, with counts and share of hands.
pub fn write_histogram(out: &mut dyn Write, hist: &CategoryHistogram) -> std::io::Result<()> {
    let total = hist.total().max(1) as f64;
    for id in (0..=9).rev() {
        let Some(category) = HandCategory::from_id(id) else {
            continue;
        };
        let n = hist.count(category);
        writeln!(
            out,
            "  {:<16} {:>7} ({:>5.1}%)",
            category.name(),
            n,
            100.0 * n as f64 / total
        )?;
    }
    Ok(())
}
