//! Compiler and linker invocation
//!
//! The toolchain is identified by an architecture letter (`6` for amd64,
//! `8` for 386, `5` for arm): the compiler is `<letter>g`, the linker
//! `<letter>l`, and object files carry the letter as their extension.

use crate::error::{BuildError, BuildResult};
use crate::paths::{with_suffix, SOURCE_EXTENSION};
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Toolchain letter for a `GOARCH` value; unknown architectures map to ""
pub fn arch_char(goarch: &str) -> &'static str {
    match goarch {
        "amd64" => "6",
        "386" => "8",
        "arm" => "5",
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub arch_char: String,
    /// Directory holding the tools; empty means search `PATH`
    pub bin_dir: PathBuf,
}

impl Toolchain {
    pub fn new(arch_char: impl Into<String>, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            arch_char: arch_char.into(),
            bin_dir: bin_dir.into(),
        }
    }

    /// Read `GOARCH` and `GOBIN`
    pub fn from_env() -> Self {
        let goarch = env::var("GOARCH").unwrap_or_default();
        let gobin = env::var_os("GOBIN").unwrap_or_default();
        Self::new(arch_char(&goarch), gobin)
    }

    pub fn compiler(&self) -> PathBuf {
        self.bin_dir.join(format!("{}g", self.arch_char))
    }

    pub fn linker(&self) -> PathBuf {
        self.bin_dir.join(format!("{}l", self.arch_char))
    }

    pub fn source_file(&self, unit: &Path) -> PathBuf {
        with_suffix(unit, SOURCE_EXTENSION)
    }

    pub fn object_file(&self, unit: &Path) -> PathBuf {
        with_suffix(unit, &self.arch_char)
    }

    /// Compile `unit.go` from inside the unit's directory
    pub fn compile_command(&self, unit: &Path) -> ToolCommand {
        let file_name = unit.file_name().map(|n| n.to_owned()).unwrap_or_default();
        let dir = unit
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .map(Path::to_path_buf);
        ToolCommand {
            program: self.compiler(),
            args: vec![with_suffix(Path::new(&file_name), SOURCE_EXTENSION).into_os_string()],
            dir,
        }
    }

    /// Link `target.<arch>` into the executable `target`
    pub fn link_command(&self, target: &Path) -> ToolCommand {
        ToolCommand {
            program: self.linker(),
            args: vec![
                OsString::from("-o"),
                target.as_os_str().to_owned(),
                self.object_file(target).into_os_string(),
            ],
            dir: None,
        }
    }
}

/// A fully resolved tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub dir: Option<PathBuf>,
}

impl ToolCommand {
    /// Run to completion with inherited stdio; non-zero exit is an error
    pub fn run(&self) -> BuildResult<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        info!(command = %self, "running tool");
        let status = command.status().map_err(|e| match e.kind() {
            ErrorKind::NotFound => BuildError::ToolNotFound {
                program: self.program.display().to_string(),
            },
            _ => BuildError::io(&self.program, e),
        })?;
        debug!(%status, "tool finished");

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::ToolFailed {
                command: self.to_string(),
                status,
            })
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        if let Some(dir) = &self.dir {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}
