//! Rimfax Demo Walkthroughs
//!
//! Binaries that exercise the toolkit end to end. The first one,
//! `intro-program`, follows the classic first-steps sequence: create
//! registers and a circuit, append every basic gate once, export
//! OpenQASM, optionally render a diagram, and compile for the local
//! simulator.
//!
//! This library holds the terminal-output helpers shared by the
//! binaries.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for a step that blocks on an external tool.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}
