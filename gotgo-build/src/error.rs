// Gotgo Build Error Handling

use gotgo_template::TemplateError;
use miette::Diagnostic;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    #[error("I/O failure on {}", path.display())]
    #[diagnostic(code(gotgo::build::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan imports of {}", path.display())]
    #[diagnostic(code(gotgo::build::scan))]
    Scan {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: TemplateError,
    },

    #[error("Can't find {program} in path")]
    #[diagnostic(
        code(gotgo::build::tool_not_found),
        help("Set GOBIN to the toolchain directory or pass --bin-dir")
    )]
    ToolNotFound { program: String },

    #[error("`{command}` failed with {status}")]
    #[diagnostic(code(gotgo::build::tool_failed))]
    ToolFailed { command: String, status: ExitStatus },

    #[error("Invalid build target `{target}`")]
    #[diagnostic(
        code(gotgo::build::invalid_target),
        help("Name the main program, e.g. `main` or `main.go`")
    )]
    InvalidTarget { target: String },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
