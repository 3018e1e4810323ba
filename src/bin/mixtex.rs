//! Mixtex CLI - segment, render and convert mixed text/math

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use mixtex::{
    latex_to_plain, plain_to_latex, render_mixed_with, split_latex_mixed, BackendKind,
    RenderMode, RenderOptions, SegmentKind,
};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mixtex")]
#[command(version)]
#[command(about = "Mixtex - segment, render and convert text with embedded LaTeX math", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overridden by MIXTEX_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct IoArgs {
    /// Input file path (reads from stdin if not provided)
    input: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the text and math segments of the input
    Split {
        #[command(flatten)]
        io: IoArgs,

        /// Emit a JSON array instead of one segment per line
        #[arg(long)]
        json: bool,
    },

    /// Render the input to HTML or MathML
    Render {
        #[command(flatten)]
        io: IoArgs,

        /// Markup flavour for math
        #[arg(short, long, value_enum, default_value_t = Mode::Html)]
        mode: Mode,

        /// Math typesetting backend
        #[arg(short, long, default_value = "pulldown")]
        backend: BackendKind,

        /// Replacement for newlines in text
        #[arg(long, default_value = "<br/>")]
        line_break: String,

        /// CSS class for math that failed to render
        #[arg(long, default_value = "math-error")]
        error_class: String,

        /// Exit with status 1 if any math segment failed to render
        #[arg(long)]
        strict: bool,
    },

    /// Convert informally typed math to LaTeX
    ToLatex {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Convert LaTeX to an editable plain form
    ToPlain {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, ValueEnum)]
enum Mode {
    /// HTML with embedded MathML
    Html,
    /// MathML only
    Mathml,
}

#[cfg(feature = "cli")]
impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Html => RenderMode::Html,
            Mode::Mathml => RenderMode::Mathml,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Split { io: args, json } => {
            let input = read_input(&args)?;
            let segments = split_latex_mixed(&input);
            let output = if json {
                serde_json::to_string_pretty(&segments)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
            } else {
                segments
                    .iter()
                    .map(|s| match (s.kind, s.display) {
                        (SegmentKind::Text, _) => format!("text    {:?}", s.content),
                        (SegmentKind::Math, true) => format!("display {:?}", s.content),
                        (SegmentKind::Math, false) => format!("inline  {:?}", s.content),
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            write_output(&args, &output)
        }
        Commands::Render {
            io: args,
            mode,
            backend,
            line_break,
            error_class,
            strict,
        } => {
            let input = read_input(&args)?;
            let options = RenderOptions {
                mode: mode.into(),
                line_break,
                error_class,
                ..RenderOptions::default()
            };
            let report = render_mixed_with(&input, backend.build(), &options);
            write_output(&args, &report.output)?;

            for failure in &report.failures {
                eprintln!("\x1b[33mwarning\x1b[0m: {}", failure);
            }
            if strict && report.has_failures() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ToLatex { io: args } => {
            let input = read_input(&args)?;
            write_output(&args, &plain_to_latex(&input))
        }
        Commands::ToPlain { io: args } => {
            let input = read_input(&args)?;
            write_output(&args, &latex_to_plain(&input))
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default = if verbose { "mixtex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("MIXTEX_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn read_input(args: &IoArgs) -> io::Result<String> {
    match args.input {
        Some(ref path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(args: &IoArgs, content: &str) -> io::Result<()> {
    match args.output {
        Some(ref path) => {
            fs::write(path, content)?;
            eprintln!("✓ Output written to: {}", path);
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mixtex --features cli");
    eprintln!("  mixtex <split|render|to-latex|to-plain> [INPUT_FILE]");
}
