//! Incremental build-and-launch driver
//!
//! Walks local imports depth first, recompiles units whose object is older
//! than their source or than any dependency's object, links when the program
//! is older than its main object, and optionally runs the result.

use crate::error::{BuildError, BuildResult};
use crate::graph::BuildGraph;
use crate::imports::local_imports;
use crate::paths::unit_for_target;
use crate::staleness::should_update;
use crate::toolchain::{ToolCommand, Toolchain};
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info, warn};

/// What a build did (or, in a dry run, would do)
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Main unit, without extension
    pub target: PathBuf,
    /// Every unit reached from the target
    pub graph: BuildGraph,
    /// Units compiled, in the order they were compiled
    pub compiled: Vec<PathBuf>,
    pub linked: bool,
    /// A unit on an import cycle, if the graph has one
    pub cycle_member: Option<PathBuf>,
    /// Tool invocations in execution order
    pub commands: Vec<ToolCommand>,
}

impl BuildReport {
    pub fn is_up_to_date(&self) -> bool {
        self.compiled.is_empty() && !self.linked
    }
}

#[derive(Debug, Clone)]
pub struct Driver {
    toolchain: Toolchain,
    dry_run: bool,
}

impl Driver {
    pub fn new(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            dry_run: false,
        }
    }

    /// Plan commands without executing them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Bring the program named by `target` up to date
    pub fn build(&self, target: &Path) -> BuildResult<BuildReport> {
        let unit = unit_for_target(target);
        if unit.file_name().is_none() {
            return Err(BuildError::InvalidTarget {
                target: target.display().to_string(),
            });
        }

        let mut session = Session {
            driver: self,
            report: BuildReport {
                target: unit.clone(),
                ..BuildReport::default()
            },
            compiled: HashSet::new(),
        };
        session.visit(&unit)?;

        let cycle_member = session.report.graph.resolve().cycle_member;
        if let Some(member) = &cycle_member {
            let imports = session.report.graph.dependencies_of(member);
            warn!(unit = %member.display(), ?imports, "import cycle; each unit is compiled once");
        }
        session.report.cycle_member = cycle_member;

        let main_object = self.toolchain.object_file(&unit);
        let link = session.compiled.contains(&unit)
            || should_update(&main_object, &unit).unwrap_or(false);
        if link {
            session.execute(self.toolchain.link_command(&unit))?;
            session.report.linked = true;
        }

        let report = session.report;
        info!(
            units = report.graph.unit_count(),
            compiled = report.compiled.len(),
            linked = report.linked,
            "build finished"
        );
        Ok(report)
    }

    /// Build, then execute the program with `args`, returning its exit status
    pub fn run(&self, target: &Path, args: &[OsString]) -> BuildResult<ExitStatus> {
        let report = self.build(target)?;
        let program = if report.target.is_absolute() {
            report.target.clone()
        } else {
            let cwd = env::current_dir().map_err(|e| BuildError::io(".", e))?;
            cwd.join(&report.target)
        };

        info!(program = %program.display(), "running program");
        Command::new(&program)
            .args(args)
            .status()
            .map_err(|e| BuildError::io(&program, e))
    }
}

/// Per-build memo of visited and compiled units
struct Session<'d> {
    driver: &'d Driver,
    report: BuildReport,
    compiled: HashSet<PathBuf>,
}

impl Session<'_> {
    fn visit(&mut self, unit: &Path) -> BuildResult<()> {
        if self.report.graph.contains(unit) {
            return Ok(());
        }
        self.report.graph.add_unit(unit);

        let driver = self.driver;
        let toolchain = &driver.toolchain;
        let source = toolchain.source_file(unit);
        let object = toolchain.object_file(unit);

        let imports = local_imports(&source)?;
        let mut needs_compile = should_update(&source, &object)?;

        for dependency in &imports {
            if let Err(err) = self.visit(dependency) {
                warn!(unit = %unit.display(), dependency = %dependency.display(), "dependency failed");
                return Err(err);
            }
            self.report.graph.add_dependency(unit, dependency);

            let dependency_object = toolchain.object_file(dependency);
            if self.compiled.contains(dependency)
                || should_update(&dependency_object, &object).unwrap_or(false)
            {
                debug!(unit = %unit.display(), dependency = %dependency.display(), "dependency is newer");
                needs_compile = true;
            }
        }

        if needs_compile {
            self.execute(toolchain.compile_command(unit))?;
            self.compiled.insert(unit.to_path_buf());
            self.report.compiled.push(unit.to_path_buf());
        } else {
            debug!(unit = %unit.display(), "up to date");
        }
        Ok(())
    }

    fn execute(&mut self, command: ToolCommand) -> BuildResult<()> {
        if self.driver.dry_run {
            info!(command = %command, "would run");
        } else {
            command.run()?;
        }
        self.report.commands.push(command);
        Ok(())
    }
}
