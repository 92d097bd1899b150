use clap::{Parser, Subcommand};
use jobboard::{
    conf::Settings,
    pkg::{
        internal::store::PgJobStore,
        server::{listen, state::AppState},
    },
    prelude::Result,
};

mod migrate;

#[derive(Parser)]
#[command(about = "job directory api")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the jobs api
    Listen {
        /// Keep jobs in process memory instead of postgres
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let settings = Settings::new()?;
    match args.command {
        Some(SubCommandType::Listen { in_memory }) => {
            let state = if in_memory {
                tracing::warn!("serving from an in-memory job table, data is lost on exit");
                AppState::in_memory()
            } else {
                AppState::postgres(PgJobStore::from_settings(&settings))
            };
            listen(&settings, state).await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply(&settings).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
