use console::style;

use crate::boundary::BoundaryWarning;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Show a non-fatal notice with a yellow warning sign.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{} {}", style("⚠").yellow(), warning);
}

/// Print changelog entries the way they are written to the file.
pub fn display_entries(entries: &[String]) {
    for entry in entries {
        println!("* {}", entry);
    }
}
