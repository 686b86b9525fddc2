use anyhow::Result;
use colored::Colorize;

use crate::client::YougileClient;
use crate::config::ConfigStore;
use crate::display;
use crate::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Exit,
    Reconfigure,
    ClearDefaults,
    ShowKey,
}

impl Action {
    const ALL: [Action; 4] = [
        Action::Exit,
        Action::Reconfigure,
        Action::ClearDefaults,
        Action::ShowKey,
    ];

    fn label(&self) -> String {
        match self {
            Action::Exit => "Nothing, exit",
            Action::Reconfigure => "Reconfigure (run init)",
            Action::ClearDefaults => "Clear defaults only",
            Action::ShowKey => "Show full API key",
        }
        .to_string()
    }
}

/// Shows the current configuration and offers maintenance actions.
pub async fn run(store: &ConfigStore, client: &mut YougileClient, api_host: &str) -> Result<()> {
    let Some(mut config) = store.load().filter(|c| c.has_api_key()) else {
        println!("{}", "No configuration found.".yellow());
        if prompts::confirm("Run setup now?", true)? {
            super::init::run(store, client, api_host).await?;
        }
        return Ok(());
    };

    display::print_config(&config, store.path());

    let action = *prompts::select("What would you like to do?", &Action::ALL, Action::label)?;
    match action {
        Action::Exit => {}
        Action::Reconfigure => super::init::run(store, client, api_host).await?,
        Action::ClearDefaults => {
            config.clear_defaults();
            store.save(&config)?;
            println!("{}", "Defaults cleared.".green());
        }
        Action::ShowKey => {
            println!("{}", format!("\nAPI Key: {}\n", config.api_key).yellow());
        }
    }

    Ok(())
}
