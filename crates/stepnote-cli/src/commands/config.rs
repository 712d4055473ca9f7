use clap::Subcommand;
use stepnote_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a config value by dot-separated key
    Get { key: String },
    /// Set a config value by dot-separated key
    Set { key: String, value: String },
    /// Print the full configuration
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
