//! Extract the authoritative result line from a tool's stdout.

/// Trim `stdout` and return its last line, itself trimmed. Empty when there is no output.
pub fn last_line(stdout: &str) -> &str {
    stdout.trim().lines().last().map(str::trim).unwrap_or("")
}
