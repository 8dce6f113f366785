mod clipboard;
mod config;
mod err;
mod generator;
mod session;
mod tracer;
mod ui;

use std::{
    io::{stdin, stdout},
    path::PathBuf,
};

use clap::Parser;
use clipboard::SystemClipboard;
use config::Settings;
use generator::{Constraints, Length, RandomPasswordGenerator};
use session::Session;
use tracer::init_tracer;
use tracing::{debug, info};
use ui::Renderer;

// Main

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracer(args.log_filter.as_str())?;
    let settings = match args.config.clone().or_else(config::default_path) {
        Some(path) => Settings::load(&path)?,
        None => {
            debug!("no config directory, using default settings");
            Settings::default()
        }
    };
    let constraints = args.constraints(&settings)?;
    let mut session = Session::new(constraints, RandomPasswordGenerator, SystemClipboard);
    if args.print {
        ui::print_once(&mut session, args.copy, stdin().lock(), &mut stdout())?;
        return Ok(());
    }
    println!("Type `help` for the list of commands.");
    session.subscribe(Box::new(Renderer::new(stdout())));
    ui::run(&mut session, stdin().lock(), &mut stdout())?;
    info!("session ended");
    Ok(())
}

// Args

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, about)]
struct Args {
    /// Password length (6 to 24), overrides the settings file
    #[arg(short, long, env = "PASSGEN_LENGTH")]
    length: Option<u32>,
    /// Include digits
    #[arg(short, long, env = "PASSGEN_DIGITS")]
    digits: bool,
    /// Include symbols
    #[arg(short, long, env = "PASSGEN_SYMBOLS")]
    symbols: bool,
    /// Settings file [default: <config dir>/passgen/settings.json]
    #[arg(long, env = "PASSGEN_CONFIG")]
    config: Option<PathBuf>,
    /// Print one password and exit
    #[arg(short, long)]
    print: bool,
    /// With --print, also copy the password to the clipboard
    #[arg(short, long, requires = "print")]
    copy: bool,
    #[arg(
        long,
        env = "PASSGEN_LOG_FILTER",
        default_value = "passgen=warn",
        long_help = "Log filter (https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)"
    )]
    log_filter: String,
}

impl Args {
    /// Flags only ever turn options on; the settings file decides otherwise.
    fn constraints(&self, settings: &Settings) -> err::Result<Constraints> {
        let mut constraints = settings.constraints()?;
        if let Some(length) = self.length {
            constraints.length = Length::new(length)?;
        }
        constraints.include_digits |= self.digits;
        constraints.include_symbols |= self.symbols;
        Ok(constraints)
    }
}

// Tests
