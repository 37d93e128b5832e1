pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use client::GatewayClient;

#[derive(Parser)]
#[command(name = "gatewayctl")]
#[command(about = "Command-line interface for the admin gateway")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, default_value = "http://127.0.0.1:7070", help = "Any node of the cluster")]
    pub url: String,

    #[arg(long, global = true, help = "Token from `gatewayctl login`")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Exchange username/password for a token")]
    Login {
        #[arg(long, help = "Username")]
        username: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Flush a database (runs on the master)")]
    Flush {
        #[arg(help = "Database name")]
        name: String,
    },

    #[command(about = "Config entity operations")]
    Config {
        #[command(subcommand)]
        cmd: commands::config::ConfigCommands,
    },

    #[command(about = "Show the current master")]
    Master,
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = GatewayClient::new(cli.url, cli.token);

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, &password, output_format).await
        }
        Commands::Flush { name } => commands::database::flush(&client, &name, output_format).await,
        Commands::Config { cmd } => commands::config::handle(&client, cmd, output_format).await,
        Commands::Master => commands::cluster::master(&client, output_format).await,
    }
}
