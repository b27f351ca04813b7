//! Gotgo build driver
//!
//! Incremental compile, link and launch for programs built from host-language
//! sources, including units generated from templates.

pub mod driver;
pub mod error;
pub mod graph;
pub mod imports;
pub mod paths;
pub mod staleness;
pub mod toolchain;

pub use driver::{BuildReport, Driver};
pub use error::{BuildError, BuildResult};
pub use graph::{BuildGraph, BuildOrder};
pub use imports::{import_paths, local_imports};
pub use paths::{clean_path, unit_for_target, with_suffix};
pub use staleness::should_update;
pub use toolchain::{arch_char, ToolCommand, Toolchain};

#[cfg(test)]
mod tests;
