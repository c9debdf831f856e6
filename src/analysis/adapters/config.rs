//! Configuration for the process-backed analyzer adapter.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Environment variable naming the analyzer executable.
pub const ANALYZER_ENV: &str = "SNIFF_GATE_ANALYZER";
/// Environment variable holding the invocation timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "SNIFF_GATE_TIMEOUT_SECS";
/// Environment variable naming the directory the analyzer runs in.
pub const WORKDIR_ENV: &str = "SNIFF_GATE_WORKDIR";

/// Settings used to spawn the external analyzer.
///
/// # Examples
///
/// ```
/// use sniff_gate::analysis::adapters::AnalyzerConfig;
/// use std::time::Duration;
///
/// let config = AnalyzerConfig::default().with_timeout(Duration::from_secs(30));
/// assert_eq!(config.program.to_str(), Some("sniff"));
/// assert_eq!(config.timeout, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Analyzer executable, resolved through `PATH` when relative.
    pub program: PathBuf,
    /// Arguments placed before the file paths.
    pub args: Vec<String>,
    /// Upper bound on a single invocation.
    pub timeout: Duration,
    /// Working directory for the child process; inherits when `None`.
    pub working_dir: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Default invocation timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Creates a configuration for the given executable with default
    /// arguments and timeout.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Reads overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds a configuration from an environment-style lookup.
    ///
    /// Unset variables keep their defaults. An unparseable timeout is
    /// logged and ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();

        if let Some(program) = lookup(ANALYZER_ENV).filter(|value| !value.is_empty()) {
            config.program = PathBuf::from(program);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.to_str().and_then(|value| value.trim().parse::<u64>().ok()) {
                Some(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    variable = TIMEOUT_ENV,
                    value = %raw.to_string_lossy(),
                    "ignoring invalid analyzer timeout"
                ),
            }
        }

        if let Some(dir) = lookup(WORKDIR_ENV).filter(|value| !value.is_empty()) {
            config.working_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// Replaces the arguments placed before the file paths.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the working directory for the child process.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("sniff"),
            args: ["analyze-files", "--format", "json", "--detailed"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            timeout: Self::DEFAULT_TIMEOUT,
            working_dir: None,
        }
    }
}
