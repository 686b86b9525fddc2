use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::client::YougileClient;
use crate::commands::{self, create::CreateOptions, list::ListOptions};
use crate::config::{ConfigStore, DEFAULT_API_HOST};

#[derive(Parser, Debug)]
#[command(name = "yougile", version)]
#[command(about = "Interactive CLI client for Yougile task management", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Create a new task (same as `yougile create`)
    #[arg(short = 'c', long)]
    pub create: bool,

    /// API host used when setting up (overrides config)
    #[arg(long, env = "YOUGILE_API_HOST", global = true)]
    pub api_host: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Configure the CLI with your API key and defaults
    Init,

    /// Create a new task interactively
    #[command(visible_alias = "c")]
    Create {
        /// Task title (skip prompt)
        #[arg(short, long)]
        title: Option<String>,

        /// Task description (skip prompt)
        #[arg(short, long)]
        description: Option<String>,

        /// Quick mode - use the default column, only ask for details
        #[arg(short, long)]
        quick: bool,
    },

    /// List tasks
    #[command(visible_alias = "ls")]
    List {
        /// List all tasks, optionally within --project
        #[arg(short, long)]
        all: bool,

        /// Project ID
        #[arg(short, long)]
        project: Option<String>,
    },

    /// View or edit configuration
    #[command(visible_alias = "cfg")]
    Config,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let command = match (self.command, self.create) {
            (Some(command), _) => command,
            (None, true) => Commands::Create {
                title: None,
                description: None,
                quick: false,
            },
            (None, false) => {
                Cli::command().print_help()?;
                println!();
                return Ok(());
            }
        };

        let store = ConfigStore::new()?;
        let api_host = self
            .api_host
            .or_else(|| store.load().map(|config| config.api_host))
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        tracing::debug!(config = %store.path().display(), %api_host, "starting");

        let mut client = YougileClient::with_auth_host(store.clone(), &api_host)?;

        match command {
            Commands::Init => commands::init::run(&store, &mut client, &api_host).await,
            Commands::Create {
                title,
                description,
                quick,
            } => {
                let options = CreateOptions {
                    title,
                    description,
                    quick,
                };
                commands::create::run(&store, &mut client, options).await
            }
            Commands::List { all, project } => {
                let options = ListOptions { all, project };
                commands::list::run(&store, &mut client, options).await
            }
            Commands::Config => commands::settings::run(&store, &mut client, &api_host).await,
        }
    }
}
