/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Status color:
/// paid → green
/// submitted → yellow
/// pending → grey
pub fn color_for_status(submitted: bool, paid: bool) -> &'static str {
    if paid {
        GREEN
    } else if submitted {
        YELLOW
    } else {
        GREY
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
