//! Shipway CLI - deployment helper for remote Apache/Passenger environments
//!
//! Usage: shipway <VERB> <ENVIRONMENT>
//!
//! Examples:
//!   shipway restart production
//!   shipway create-vhost staging
//!   shipway update-configuration production

use std::path::PathBuf;

use clap::Parser;

use shipway::commands::{dispatch, CommandContext, Verb};
use shipway::config::Config;
use shipway::error::ShipwayResult;
use shipway::executor::SshExecutor;
use shipway::report::{AssumeYes, ConsolePrompter, ConsoleReporter, Prompter, Reporter};
use shipway::workspace::Workspace;

const COMMAND_LIST: &str = "\
Runtime commands:
  start                 Start Apache
  stop                  Stop Apache
  restart               Restart Apache
  reload                Reload the Apache configuration
  create-vhost          Create a local vhost template for the environment
  upload-vhost          Upload the local vhost to the server, then restart
  download-vhost        Download the remote vhost for the environment
  delete-vhost          Delete the remote vhost, then reload
  update-configuration  Re-point Passenger directives after a Ruby/Passenger upgrade";

/// Shipway - deployment helper for remote Apache/Passenger environments
#[derive(Parser, Debug)]
#[command(name = "shipway")]
#[command(author, version, about, long_about = None)]
#[command(after_help = COMMAND_LIST)]
struct Cli {
    /// Runtime command to execute (see the list below)
    verb: String,

    /// Target environment name, e.g. "staging"
    environment: String,

    /// Path to the environments configuration file
    #[arg(long, default_value = ".shipway/config.toml")]
    config: PathBuf,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() {
    let cli = Cli::parse();
    let reporter = ConsoleReporter::new();

    match run(&cli, &reporter) {
        Ok(()) => {}
        // operator declined a gate; nothing happened, nothing to report
        Err(e) if e.is_abort() => {}
        Err(e) => {
            reporter.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, reporter: &dyn Reporter) -> ShipwayResult<()> {
    // resolve the verb before touching configuration so an unknown command
    // is reported regardless of project state
    let verb = Verb::parse(&cli.verb)?;

    let config = Config::load(&cli.config)?;
    let environment = config.environment(&cli.environment)?;

    let executor = SshExecutor::new(environment.destination.clone());
    let workspace = Workspace::new(&std::env::current_dir()?);
    let prompter: Box<dyn Prompter> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsolePrompter)
    };

    let ctx = CommandContext {
        environment: &environment,
        executor: &executor,
        workspace: &workspace,
        reporter,
        prompter: prompter.as_ref(),
    };

    dispatch(verb, &ctx)
}
