/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY for zero counters and RESET otherwise, so empty summary
/// columns fade out in the final report.
pub fn color_for_count(value: usize) -> &'static str {
    if value == 0 { GREY } else { RESET }
}

/// Failure counters: red when non-zero, grey otherwise.
pub fn color_for_failures(value: usize) -> &'static str {
    if value > 0 { RED } else { GREY }
}
