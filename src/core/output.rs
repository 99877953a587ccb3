//! Terminal output for acquisition runs
//!
//! Status lines go to stdout; warnings and errors go to stderr so a run's
//! summary stays readable when stdout is redirected.

use owo_colors::OwoColorize;

/// Start of a pipeline stage, e.g. `==> Placing 1.20.1 client (42 libraries, linux)`.
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Per-file line under the current stage, e.g. `stored guava-31.1.jar (2959479 bytes)`.
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Alias resolution and host facts, e.g. `:: release -> 1.20.1`.
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Tolerated failures such as a native library that could not be fetched.
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Run that found every artifact already cached.
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}
