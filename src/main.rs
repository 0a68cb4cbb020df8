//! pyscribe - print a Python file with syntax highlighting

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use pyscribe::render::{render_session, Theme};
use pyscribe::{Config, Result, Workspace};

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();
    let Some(arg) = args.get(1) else {
        print_usage();
        process::exit(2);
    };
    if let Err(e) = run(arg) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PYSCRIBE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(arg: &str) -> Result<()> {
    match arg {
        "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-V" => {
            println!("pyscribe {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    // Rules compile here, before any file is touched
    let mut workspace = Workspace::new(config.clone())?;
    let index = workspace.open(&PathBuf::from(arg))?;

    let theme = Theme::from_config(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_session(&mut out, workspace.session(index)?, &theme, config.line_numbers)
}

fn print_usage() {
    println!("pyscribe {} - Python syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pyscribe [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Environment:");
    println!("  PYSCRIBE_LOG   Log filter (default: warn)");
    println!();
    println!("Settings are read from ~/.pyscribe.toml");
}
