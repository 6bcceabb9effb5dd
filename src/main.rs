//! CLI entry point for treemark

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::debug;
use treemark::{OutputConfig, ScanConfig, generate_tree, render_markdown, write_markdown};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treemark")]
#[command(about = "Write a project's directory structure to a Markdown file")]
#[command(version)]
struct Args {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Ignore .gitignore rules and list all files and directories
    #[arg(short = 'u', long = "ignore-gitignore")]
    ignore_gitignore: bool,

    /// File to write the Markdown document to
    #[arg(short = 'o', long = "output", default_value = "Structure.md")]
    output: PathBuf,

    /// Print the Markdown document instead of writing a file
    #[arg(long = "stdout")]
    stdout: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Print the confirmation line, highlighting the file name.
fn print_confirmation(path: &std::path::Path, use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write!(stdout, "Directory structure written to ")?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(stdout, "{}", path.display())?;
    stdout.reset()?;
    writeln!(stdout)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let scan_config = ScanConfig {
        ignore_enabled: !args.ignore_gitignore,
        ..Default::default()
    };
    let output_config = OutputConfig {
        output_path: args.output.clone(),
        ..Default::default()
    };
    debug!(?scan_config, ?output_config, "starting scan");

    let tree = generate_tree(&args.path, &scan_config).unwrap_or_else(|e| {
        eprintln!("treemark: {}", e);
        process::exit(1);
    });

    let result = if args.stdout {
        print!("{}", render_markdown(&tree, &output_config));
        Ok(())
    } else {
        match write_markdown(&tree, &output_config) {
            Ok(path) => print_confirmation(&path, should_use_color(args.color)),
            Err(e) => {
                eprintln!("treemark: {}", e);
                process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("treemark: error writing output: {}", e);
        process::exit(1);
    }
}
