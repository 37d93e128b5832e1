use anyhow::Context;
use clap::Subcommand;
use reqwest::Method;
use serde_json::{json, Value};

use crate::cli::client::GatewayClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show one config entity")]
    Get {
        #[arg(help = "Entity name")]
        name: String,
    },

    #[command(about = "List all config entities")]
    List,

    #[command(about = "Create or replace a config entity")]
    Save {
        #[arg(help = "Entity name")]
        name: String,
        #[arg(help = "Entity data as JSON")]
        data: String,
    },

    #[command(about = "Delete a config entity")]
    Delete {
        #[arg(help = "Entity name")]
        name: String,
    },
}

pub async fn handle(
    client: &GatewayClient,
    cmd: ConfigCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Get { name } => {
            let entity = client
                .send(client.request(Method::GET, "/config").query(&[("name", &name)]))
                .await?;
            output_success(output_format, &format!("Config '{}'", name), &entity)
        }
        ConfigCommands::List => {
            let entities = client.send(client.request(Method::GET, "/configs")).await?;
            let count = entities.as_array().map(Vec::len).unwrap_or(0);
            output_success(output_format, &format!("{} config entities", count), &entities)
        }
        ConfigCommands::Save { name, data } => {
            let data: Value = serde_json::from_str(&data).context("data must be valid JSON")?;
            let body = json!({ "name": name, "data": data });
            let result = client
                .send(client.request(Method::POST, "/config").json(&body))
                .await?;
            output_success(output_format, &format!("Saved config '{}'", name), &result)
        }
        ConfigCommands::Delete { name } => {
            let result = client
                .send(client.request(Method::DELETE, "/config").query(&[("name", &name)]))
                .await?;
            output_success(output_format, &format!("Deleted config '{}'", name), &result)
        }
    }
}
