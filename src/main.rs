use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod console;
mod error;
mod paging;
mod services;
mod utils;

use api::backoffice::BackofficeClient;
use commands::{Command, Flow, Session};
use config::Config;
use console::DialoguerPrompter;

const PROMPT: &str = "backoffice> ";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with tables on stdout
    let mut filter = EnvFilter::from_default_env();
    for directive in ["backoffice_console=info", "reqwest=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let client = match BackofficeClient::new(&config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create backend client: {}", e);
            return;
        }
    };

    info!("Back-office console starting (backend {}, page size {})", config.api_url, config.page_size);
    debug!("Load policy: {:?}", config.load_policy);

    let mut session = Session::new(&config, client, Arc::new(DialoguerPrompter::new()));

    println!("Back-office console. Type 'help' for commands.\n");
    if let Err(e) = session.handle(Command::Open { screen: commands::Screen::Transfers, page: 0 }).await {
        println!("❌ {}", e.user_message());
    }

    if let Err(e) = run(&mut session).await {
        error!("Console stopped: {}", e);
    }
}

/// Read and dispatch commands until `quit` or end of input
async fn run(session: &mut Session) -> io::Result<()> {
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("❌ {}", e.user_message());
                continue;
            }
        };

        match session.handle(command).await {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => println!("❌ {}", e.user_message()),
        }
    }
}
