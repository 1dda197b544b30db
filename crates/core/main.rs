#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::mod_module_files)]

use std::process;

mod app;
mod commands;
mod render;

use commands::{Commands, Outcome};
use render::Renderer;

use isbn_lookup::{Endpoint, Environment};

use clap::{Args, Parser};
use log::trace;

fn main() {
    match try_main() {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Failure) => process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(2);
        }
    }
}

fn try_main() -> eyre::Result<Outcome> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                env,
                base_url,
                json,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(usize::from(verbosity), quiet)?;

    let endpoint = base_url.map_or_else(|| Endpoint::for_environment(env), Endpoint::new);
    trace!("Using the book service at {}", endpoint.base());

    command.execute(endpoint, &Renderer::new(json, quiet))
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "isbn-lookup")]
#[clap(about = "Look up book records by ISBN from the book service in the terminal")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// The deployment of the book service to use: development or production
    #[clap(
        short,
        long,
        default_value = "production",
        env = "ISBN_LOOKUP_ENV",
        global = true
    )]
    env: Environment,

    /// Base URL of the book service, takes precedence over --env
    #[clap(short, long, env = "ISBN_LOOKUP_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Print results as JSON, one document per line
    #[clap(short, long, global = true)]
    json: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
