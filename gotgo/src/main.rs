use clap::{ArgAction, Args, Parser, Subcommand};
use gotgo_build::{BuildReport, Driver, Toolchain};
use gotgo_template::{generate, GenerateOptions, TemplateError, TEMPLATE_EXTENSION};
use miette::{MietteHandlerOpts, NamedSource, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

mod output;

#[derive(Parser)]
#[command(
    name = "gotgo",
    version,
    about = "Instantiate generic templates into compilable source",
    long_about = "gotgo turns a .got template declared as `package name(type T, ...)` into a \
                  concrete package by substituting type arguments, and drives incremental \
                  builds of programs that use the results."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Instantiate a .got template with concrete type arguments
    Instantiate {
        /// Template file (must end in .got)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Concrete types, bound to the template's parameters in order
        #[arg(value_name = "TYPE", allow_hyphen_values = true)]
        types: Vec<String>,

        /// Name of the output package (default: the template's package name)
        #[arg(long, value_name = "NAME")]
        package_name: Option<String>,

        /// Prefix replacing `pkg.` qualifiers and naming the check function
        #[arg(long, value_name = "PREFIX", default_value = "")]
        prefix: String,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compile stale units reachable from MAIN and link the program
    Build {
        /// Main program, with or without the .go extension
        #[arg(value_name = "MAIN")]
        target: PathBuf,

        #[command(flatten)]
        toolchain: ToolchainArgs,

        /// Print the commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Build MAIN, then run it with the remaining arguments
    Run {
        /// Main program, with or without the .go extension
        #[arg(value_name = "MAIN")]
        target: PathBuf,

        #[command(flatten)]
        toolchain: ToolchainArgs,

        /// Arguments passed to the program
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
}

#[derive(Args)]
struct ToolchainArgs {
    /// Toolchain letter, e.g. 6 for amd64 (default: from GOARCH)
    #[arg(long, value_name = "CHAR")]
    arch_char: Option<String>,

    /// Directory containing the compiler and linker (default: GOBIN)
    #[arg(long, value_name = "DIR")]
    bin_dir: Option<PathBuf>,
}

impl ToolchainArgs {
    fn resolve(self) -> Toolchain {
        let mut toolchain = Toolchain::from_env();
        if let Some(arch_char) = self.arch_char {
            toolchain.arch_char = arch_char;
        }
        if let Some(bin_dir) = self.bin_dir {
            toolchain.bin_dir = bin_dir;
        }
        toolchain
    }
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Some(Commands::Instantiate {
            template,
            types,
            package_name,
            prefix,
            output,
        }) => {
            let options = GenerateOptions {
                package_name,
                prefix,
            };
            handle_instantiate(&template, &types, &options, output.as_deref())
        }
        Some(Commands::Build {
            target,
            toolchain,
            dry_run,
        }) => handle_build(&target, toolchain.resolve(), dry_run),
        Some(Commands::Run {
            target,
            toolchain,
            args,
        }) => handle_run(&target, toolchain.resolve(), &args),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["gotgo", "--help"]);
            Ok(())
        }
    };

    if let Err(report) = result {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

/// Configure miette for error reporting with syntax highlighting
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;
    use syntect::parsing::SyntaxSet;

    // The default syntax set already knows the host language
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let theme = &theme_set.themes["base16-ocean.dark"];
    let highlighter = SyntectHighlighter::new(syntax_set, theme.clone(), true);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .with_syntax_highlighting(highlighter.clone())
                .build(),
        )
    }))
    .ok();
}

/// Install a stderr tracing subscriber; `RUST_LOG` wins over the flags
fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else {
            match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        })
    });

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .try_init()
        .ok();
}

fn handle_instantiate(
    template: &Path,
    types: &[String],
    options: &GenerateOptions,
    output: Option<&Path>,
) -> Result<()> {
    if template.extension().and_then(|ext| ext.to_str()) != Some(TEMPLATE_EXTENSION) {
        return Err(miette::miette!(
            "Expected .{} template, got: {}",
            TEMPLATE_EXTENSION,
            template.display()
        ));
    }

    let source = fs::read_to_string(template).map_err(|e| TemplateError::io(template, e))?;
    let generated = generate(&source, types, options).map_err(|err| {
        let named = NamedSource::new(template.display().to_string(), source.clone())
            .with_language("Go");
        miette::Report::new(err).with_source_code(named)
    })?;

    debug!(template = %template.display(), bytes = generated.len(), "generated instantiation");
    output::write_output(output, &generated)?;
    Ok(())
}

fn handle_build(target: &Path, toolchain: Toolchain, dry_run: bool) -> Result<()> {
    let report = Driver::new(toolchain).dry_run(dry_run).build(target)?;
    print_report(&report, dry_run);
    Ok(())
}

fn handle_run(target: &Path, toolchain: Toolchain, args: &[OsString]) -> Result<()> {
    let status = Driver::new(toolchain).run(target, args)?;
    if !status.success() {
        process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

fn print_report(report: &BuildReport, dry_run: bool) {
    if dry_run {
        for command in &report.commands {
            println!("{}", command);
        }
    } else if report.is_up_to_date() {
        println!("✅ {} is up to date", report.target.display());
    } else {
        println!(
            "✅ {}: compiled {} unit(s){}",
            report.target.display(),
            report.compiled.len(),
            if report.linked { ", linked" } else { "" }
        );
    }
}
