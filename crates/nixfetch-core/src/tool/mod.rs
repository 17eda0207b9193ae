//! External tool invocation.
//!
//! Prefetch primitives are plain command-line programs: they exit 0 on
//! success and may print progress lines before the result, so only the last
//! line of stdout is authoritative.

mod output;

pub use output::last_line;

use std::ffi::OsString;
use std::fmt;
use std::process::{Command, Stdio};

use crate::error::PrefetchError;

/// A single external command: program, arguments and per-invocation
/// environment overrides. Overrides apply to the child only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set `key=value` in the child's environment (inherit-then-override).
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Run the command to completion and return the last line of its stdout.
    ///
    /// Fails with [`PrefetchError::PrefetchFailed`] if the program cannot be
    /// spawned or exits unsuccessfully, whatever it printed.
    pub fn invoke(&self) -> Result<String, PrefetchError> {
        let rendered = self.to_string();
        tracing::debug!(command = %rendered, "running prefetch tool");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (OsString::from(k), OsString::from(v))))
            .stdin(Stdio::null());

        let output = match cmd.output() {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(command = %rendered, error = %e, "failed to spawn prefetch tool");
                return Err(PrefetchError::PrefetchFailed { command: rendered });
            }
        };

        if !output.stderr.is_empty() {
            tracing::debug!(
                command = %rendered,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "prefetch tool stderr"
            );
        }

        if !output.status.success() {
            tracing::warn!(command = %rendered, status = %output.status, "prefetch tool failed");
            return Err(PrefetchError::PrefetchFailed { command: rendered });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(last_line(&stdout).to_string())
    }
}

/// Renders as a shell-like command line, env overrides first.
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.env {
            write!(f, "{}={} ", k, v)?;
        }
        f.write_str(&self.program)?;
        for a in &self.args {
            write!(f, " {}", a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_env_program_and_args() {
        let cmd = ToolCommand::new("nix-prefetch-git")
            .env("HOME", "/homeless-shelter")
            .args(["https://example.com/repo.git", "abc123"])
            .arg("--leave-dotGit");
        assert_eq!(
            cmd.to_string(),
            "HOME=/homeless-shelter nix-prefetch-git https://example.com/repo.git abc123 --leave-dotGit"
        );
    }

    #[test]
    fn missing_program_is_prefetch_failed() {
        let cmd = ToolCommand::new("nixfetch-test-no-such-program").arg("x");
        assert_eq!(
            cmd.invoke().unwrap_err(),
            PrefetchError::PrefetchFailed {
                command: "nixfetch-test-no-such-program x".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn returns_last_line_of_multiline_output() {
        let cmd = ToolCommand::new("sh")
            .arg("-c")
            .arg("echo 'path is /nix/store/xyz'; echo; echo '  0abc  '; echo");
        assert_eq!(cmd.invoke().unwrap(), "0abc");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_fails_despite_stdout() {
        let cmd = ToolCommand::new("sh").arg("-c").arg("echo deadbeef; exit 3");
        match cmd.invoke().unwrap_err() {
            PrefetchError::PrefetchFailed { command } => {
                assert_eq!(command, "sh -c echo deadbeef; exit 3")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn env_override_reaches_child_only() {
        let before = std::env::var_os("NIXFETCH_TEST_MARKER");
        let cmd = ToolCommand::new("sh")
            .arg("-c")
            .arg("echo \"$NIXFETCH_TEST_MARKER\"")
            .env("NIXFETCH_TEST_MARKER", "child-only");
        assert_eq!(cmd.invoke().unwrap(), "child-only");
        assert_eq!(std::env::var_os("NIXFETCH_TEST_MARKER"), before);
    }

    #[cfg(unix)]
    #[test]
    fn empty_stdout_yields_empty_string() {
        let cmd = ToolCommand::new("true");
        assert_eq!(cmd.invoke().unwrap(), "");
    }
}
