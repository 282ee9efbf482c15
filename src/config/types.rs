// Configuration types module
// Defines the effective configuration and the sink output target

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Effective configuration, immutable after resolution
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// `[host]:port` HTTP listen address
    pub listen: String,
    /// Log severity threshold
    pub level: String,
    /// Output file path; `-` means standard output
    pub out: String,
}

/// Values taken from the command line
///
/// Each present value overrides the config file and the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub listen: Option<String>,
    pub level: Option<String>,
    pub out: Option<String>,
}

/// Where received messages go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Parse the `out` setting; `-` is the stdout sentinel
    pub fn parse(out: &str) -> Self {
        if out == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(out))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_stdout_sentinel() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
    }

    #[test]
    fn test_output_target_file_path() {
        assert_eq!(
            OutputTarget::parse("/tmp/messages.log"),
            OutputTarget::File(PathBuf::from("/tmp/messages.log"))
        );
    }

    #[test]
    fn test_output_target_display() {
        assert_eq!(OutputTarget::parse("-").to_string(), "<stdout>");
        assert_eq!(OutputTarget::parse("out.log").to_string(), "out.log");
    }
}
