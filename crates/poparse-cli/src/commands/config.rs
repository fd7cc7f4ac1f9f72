//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use poparse_core::PoParseConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "scan.header_field_rows")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = super::resolve_config_path(config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<PoParseConfig> {
    if path.exists() {
        Ok(PoParseConfig::from_file(path)?)
    } else {
        Ok(PoParseConfig::default())
    }
}

/// The configuration as parsing sees it, with built-in clients filled in.
fn effective_config(path: &Path) -> anyhow::Result<PoParseConfig> {
    let mut config = read_or_default(path)?;
    if config.clients.is_empty() {
        config.clients = config.client_profiles();
    }
    Ok(config)
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = effective_config(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write the built-in clients out so they can be edited in place
    let config = PoParseConfig {
        clients: PoParseConfig::default().client_profiles(),
        ..Default::default()
    };
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = effective_config(path)?;
    let json = serde_json::to_value(&config)?;

    let mut current = &json;
    for part in key.split('.') {
        current = lookup(current, part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

/// Step into an object field or, for numeric parts, an array element.
fn lookup<'a>(value: &'a Value, part: &str) -> Option<&'a Value> {
    match value {
        Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => value.get(part),
    }
}

fn lookup_mut<'a>(value: &'a mut Value, part: &str) -> Option<&'a mut Value> {
    match value {
        Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        Value::Object(map) => map.get_mut(part),
        _ => None,
    }
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = effective_config(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let parsed_value: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;

    // Only existing keys can be set; the path is walked like `get`
    let mut current = &mut json;
    for part in key.split('.') {
        current = lookup_mut(current, part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }
    *current = parsed_value.clone();

    // Round-trip through the typed config so bad values are rejected
    config = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'poparse config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_indexes_arrays() {
        let json = serde_json::json!({"clients": [{"id": 1}, {"id": 2}]});
        let clients = lookup(&json, "clients").unwrap();
        assert_eq!(lookup(clients, "1").unwrap()["id"], 2);
        assert!(lookup(clients, "x").is_none());
    }

    #[test]
    fn test_lookup_mut_sets_array_element_field() {
        let mut json = serde_json::json!({"clients": [{"id": 1, "name": "Bajaj"}]});
        let client = lookup_mut(&mut json, "clients").and_then(|c| lookup_mut(c, "0")).unwrap();
        *lookup_mut(client, "name").unwrap() = Value::String("Bajaj Retail".to_string());

        assert_eq!(json["clients"][0]["name"], "Bajaj Retail");
        assert!(lookup_mut(&mut json, "missing").is_none());
    }
}
