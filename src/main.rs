mod commands;
mod include;
mod menu;
mod render;
mod serve;
mod web_assets;

use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};

/// Explicit subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Serve a docs directory over HTTP
    Serve {
        /// Path to the docs directory
        dir: String,
        /// Interface address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Starting port number for the HTTP server
        #[arg(long, default_value = "3333")]
        port: u16,
    },
    /// Render the index page (includes expanded, menu injected) and exit
    Build {
        /// Path to the docs directory
        dir: String,
        /// Write the rendered page to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Full CLI with explicit subcommands.
#[derive(Parser)]
#[command(
    name = "cmdocs",
    version,
    about = "Render and serve a command-documentation site",
    after_help = "INVOCATION FORMS:\n  cmdocs <dir>                     Serve docs directory (legacy)\n  cmdocs serve [OPTIONS] <dir>     Serve docs directory over HTTP\n  cmdocs build [OPTIONS] <dir>     Render the index page and exit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Legacy positional form: cmdocs <dir>
#[derive(Parser)]
#[command(name = "cmdocs", version, about = "Render and serve a command-documentation site")]
struct LegacyCli {
    /// Path to a docs directory to serve
    dir: String,
}

/// Resolved dispatch mode after CLI argument parsing.
enum DispatchMode {
    Legacy {
        dir: String,
    },
    Serve {
        dir: String,
        bind: String,
        port: u16,
    },
    Build {
        dir: String,
        out: Option<PathBuf>,
    },
}

fn resolve_dispatch_mode() -> DispatchMode {
    match Cli::try_parse() {
        Ok(cli) => match cli.command {
            Commands::Serve { dir, bind, port } => DispatchMode::Serve { dir, bind, port },
            Commands::Build { dir, out } => DispatchMode::Build { dir, out },
        },
        Err(clap_err) => {
            // Pass --help, --version, and subcommand-level help through to the full Cli handler.
            use clap::error::ErrorKind;
            if matches!(
                clap_err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                clap_err.exit();
            }
            // Fall back to legacy positional parse: cmdocs <dir>
            match LegacyCli::try_parse() {
                Ok(legacy) => DispatchMode::Legacy { dir: legacy.dir },
                Err(legacy_err) => legacy_err.exit(),
            }
        }
    }
}

fn main() -> io::Result<()> {
    match resolve_dispatch_mode() {
        DispatchMode::Legacy { dir } => {
            eprintln!("[legacy] serve dispatched for: {dir}");
            run_serve_dir(dir, "127.0.0.1".to_owned(), 3333)
        }
        DispatchMode::Serve { dir, bind, port } => run_serve_dir(dir, bind, port),
        DispatchMode::Build { dir, out } => run_build(&dir, out.as_deref()),
    }
}

/// Exit with a clear message when the docs directory argument is unusable.
fn check_docs_dir(dir: &str) {
    if !Path::new(dir).is_dir() {
        eprintln!("Error: '{dir}' is not a directory.");
        eprintln!("Expected a docs directory containing index.html, commands/, and templates/.");
        process::exit(1);
    }
}

fn run_serve_dir(dir: String, bind: String, port: u16) -> io::Result<()> {
    check_docs_dir(&dir);
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    rt.block_on(serve::run_serve(dir, bind, port))
}

fn run_build(dir: &str, out: Option<&Path>) -> io::Result<()> {
    check_docs_dir(dir);
    let root = fs::canonicalize(dir).unwrap_or_else(|_| PathBuf::from(dir));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let page = rt.block_on(render::render_index(&root));

    match out {
        Some(path) => {
            fs::write(path, &page)?;
            eprintln!("[build] path={} bytes={}", path.display(), page.len());
        }
        None => {
            io::stdout().write_all(page.as_bytes())?;
        }
    }
    Ok(())
}
