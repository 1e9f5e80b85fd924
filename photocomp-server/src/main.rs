mod commands;
mod config;
mod parser;
mod schema;
mod seed;

use clap::{Arg, ArgAction, ArgMatches, Command};
use config::ServerConfig;
use parser::parse_yaml_file;
use photocomp_common::error::Error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_target(true)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("serve", sub_matches)) => {
            let mut config = load_config(sub_matches)?;
            if let Some(listen_addr) = sub_matches.get_one::<String>("listen_addr") {
                config.listen_addr = listen_addr.clone();
            }
            if sub_matches.get_flag("in_memory") {
                config.database_url = None;
            }

            let fixtures = sub_matches
                .get_one::<String>("fixtures")
                .map(|path| parse_yaml_file(path))
                .transpose()?;

            commands::serve(config, fixtures).await?;
        }
        Some(("migrate", sub_matches)) => {
            commands::migrate(load_config(sub_matches)?).await?;
        }
        Some(("seed", sub_matches)) => {
            let config = load_config(sub_matches)?;
            let path = required(sub_matches, "fixtures")?;
            commands::import(config, parse_yaml_file(path)?).await?;
        }
        Some(("moderate", sub_matches)) => {
            let config = load_config(sub_matches)?;
            let image_id = required(sub_matches, "image_id")?;
            let status = required(sub_matches, "status")?;
            commands::moderate(config, image_id, status).await?;
        }
        _ => {
            println!("Invalid subcommand");
        }
    }

    Ok(())
}

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .short('c')
        .long("config")
        .help("Path to the YAML configuration file")
        .action(ArgAction::Set);

    Command::new("photocomp")
        .about("Photo competition API server")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Starts the REST API")
                .arg(config_arg.clone())
                .arg(
                    Arg::new("listen_addr")
                        .short('l')
                        .long("listen_addr")
                        .help("Address to listen on")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("in_memory")
                        .long("in-memory")
                        .help("Ignore DATABASE_URL and keep all data in memory")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("fixtures")
                        .short('f')
                        .long("fixtures")
                        .help("YAML fixtures loaded before serving")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("migrate")
                .about("Applies pending database migrations")
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("seed")
                .about("Imports competitions, entries and votes from a YAML file")
                .arg(config_arg.clone())
                .arg(
                    Arg::new("fixtures")
                        .short('f')
                        .long("fixtures")
                        .help("Path to the fixtures file")
                        .required(true)
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("moderate")
                .about("Sets the moderation status of an image entry")
                .arg(config_arg)
                .arg(
                    Arg::new("image_id")
                        .long("image_id")
                        .help("Id of the image entry")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help("New status, e.g. STATUS_VERIFIED")
                        .required(true)
                        .action(ArgAction::Set),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<ServerConfig, Error> {
    let path = matches.get_one::<String>("config").map(String::as_str);
    ServerConfig::load(path, |name| std::env::var(name).ok())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| Error::InvalidInput(format!("--{name} is required")))
}
