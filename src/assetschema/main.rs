use assetschema::api::SchemaApi;
use assetschema::config::SchemaConfig;
use assetschema::error::{Result, SchemaError};
use assetschema::model::GlobalSection;
use assetschema::store::memory::InMemoryStore;
use assetschema::store::seed::load_seed;
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, QueryCommand};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ASSETSCHEMA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("assetschema={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("ASSETSCHEMA_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "assetschema", "assetschema")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SchemaError::Config("Could not determine config dir".to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let config_dir = config_dir()?;
    let config = SchemaConfig::load(&config_dir)?;

    match cli.command {
        Commands::Config { key, value } => handle_config(config, &config_dir, key, value),
        Commands::Query(command) => {
            let seed = cli
                .seed
                .or_else(|| config.seed_file.clone())
                .ok_or_else(|| {
                    SchemaError::Config("No catalog given; pass --seed or set seed-file".to_string())
                })?;
            let state = load_seed(&seed)?;
            let api = SchemaApi::new(InMemoryStore::from_state(state), config);
            handle_query(&api, command)
        }
    }
}

fn handle_query(api: &SchemaApi<InMemoryStore>, command: QueryCommand) -> Result<()> {
    match command {
        QueryCommand::Tree => print::print_tree(api.state(), api.config().max_ancestor_depth),
        QueryCommand::Path { id } => print::print_path(&api.category_path(&id)),
        QueryCommand::Attributes { id } => print::print_own_attributes(&api.category_attributes(&id)?),
        QueryCommand::Inherited { id } => {
            api.state().require_category(&id)?;
            print::print_inherited(&api.inherited_attributes(&id));
        }
        QueryCommand::Form {
            id,
            include_category,
            json,
        } => {
            let form = api.organize_form(id.as_deref(), include_category);
            if json {
                println!("{}", serde_json::to_string_pretty(&form)?);
            } else {
                print::print_form(&form);
            }
        }
        QueryCommand::Globals { section } => match section {
            Some(section) => {
                let section: GlobalSection = section.parse().map_err(SchemaError::Api)?;
                print::print_globals(&api.globals_in_section(section));
            }
            None => print::print_globals(&api.global_attributes()),
        },
        QueryCommand::Doctor => print::print_messages(&api.doctor().messages),
    }
    Ok(())
}

fn handle_config(
    mut config: SchemaConfig,
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            println!("max-depth = {}", config.get_key("max-depth")?);
            println!("seed-file = {}", config.get_key("seed-file")?);
        }
        (Some(key), None) => println!("{} = {}", key, config.get_key(&key)?),
        (Some(key), Some(value)) => {
            config.set_key(&key, &value)?;
            config.save(config_dir)?;
            println!("{} = {}", key, config.get_key(&key)?);
        }
    }
    Ok(())
}
