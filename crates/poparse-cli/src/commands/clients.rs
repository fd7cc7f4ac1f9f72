//! Clients command - list the configured client profiles.

use clap::Args;
use console::style;

/// Arguments for the clients command.
#[derive(Args)]
pub struct ClientsArgs {
    /// Print profiles as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ClientsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let profiles = config.client_profiles();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    println!("{}", style("Client profiles:").bold());
    println!();
    for profile in &profiles {
        println!(
            "  {:>4}  {:<30} {}",
            style(profile.id).cyan(),
            profile.name,
            style(profile.parser).dim()
        );
    }

    if config.clients.is_empty() {
        println!();
        println!(
            "{} Built-in profiles. Add a \"clients\" list to the config file to change them.",
            style("ℹ").blue()
        );
    }

    Ok(())
}
