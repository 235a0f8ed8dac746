use clap::{Arg, Command};
use common::config::Settings;
use common::telemetry;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("Food Truck Catalog")
        .version("1.0")
        .about("Serves the San Francisco food truck permit catalog over HTTP")
        .subcommand(
            Command::new("serve")
                .about("Load the permit CSV and serve /foodtrucks")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("Sets a custom config file"),
                ),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .get_matches();

    match matches.subcommand() {
        Some(("serve", serve_matches)) => {
            let config_path = serve_matches
                .get_one::<String>("config")
                .map(|s| s.as_str())
                .unwrap_or("config/foodtrucks.toml");

            let settings = Settings::new(config_path)?;
            telemetry::init(settings.log_format)?;
            tracing::info!(config = config_path, "Starting catalog");

            catalog::run_catalog_server(&settings).await?;
        }
        _ => unreachable!("clap enforces a subcommand"),
    }

    Ok(())
}
