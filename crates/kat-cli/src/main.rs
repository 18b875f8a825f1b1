mod catalog;
mod inquiry;
mod loading;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::ListArgs;
use crate::loading::LoadingGate;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "kat-cli")]
#[command(about = "Wholesale catalog and WhatsApp inquiry tool")]
struct Cli {
    /// Partner code; unlocks wholesale prices for this invocation
    #[arg(long, global = true)]
    partner_code: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search and filter the catalog
    List(ListArgs),
    /// Show one design in detail
    Show {
        /// Product id (catalog serial number)
        id: String,
    },
    /// List facet values with product counts
    Facets,
    /// Show the landing-page category groups
    Showcase,
    /// Build a WhatsApp inquiry link for a selection of designs
    Inquire {
        /// Design and per-size pieces, e.g. `3=20/30:12,32/40:6`; repeatable
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Also print the unencoded message
        #[arg(long)]
        show_text: bool,
    },
    /// Build a WhatsApp inquiry link for a single design
    Ask {
        /// Product id (catalog serial number)
        id: String,
        /// Also print the unencoded message
        #[arg(long)]
        show_text: bool,
    },
    /// Print the general contact link
    Contact,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = kat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, log_level = %config.log_level, "configuration loaded");

    let Some(command) = cli.command else {
        println!("kat-cli ready; run `kat-cli --help` for commands");
        return Ok(());
    };

    let mut session = Session::open(config)?;
    if let Some(code) = cli.partner_code.as_deref() {
        session.unlock(code);
    }

    match command {
        Commands::List(args) => {
            let mut loading = LoadingGate::new(session.loading_delay());
            catalog::run_list(&session, &mut loading, &args).await;
        }
        Commands::Show { id } => catalog::run_show(&session, &id)?,
        Commands::Facets => catalog::run_facets(&session),
        Commands::Showcase => catalog::run_showcase(&session)?,
        Commands::Inquire { items, show_text } => {
            inquiry::run_inquire(&mut session, &items, show_text)?;
        }
        Commands::Ask { id, show_text } => inquiry::run_ask(&session, &id, show_text)?,
        Commands::Contact => inquiry::run_contact(&session),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
