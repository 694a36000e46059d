use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    EmbedTemplate, FormController, HttpRemoteStore, ListSyncController, ListView, RemoteStore,
    SubmitError,
};
use shared::domain::DraftField;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, PromptCommand, HELP};
use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "movie-desk", about = "Browse and add movies on the movies backend")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    api_url: Option<String>,
    /// Refuse to submit drafts without a tmdbId.
    #[arg(long)]
    require_streaming_id: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the movie list.
    List,
    /// Submit one movie, then print the refreshed list.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        year: Option<String>,
        #[arg(long = "tmdb-id")]
        tmdb_id: Option<String>,
    },
    /// Edit and submit drafts from a prompt.
    Interactive,
}

struct Desk {
    list: Arc<ListSyncController>,
    form: FormController,
    embed: EmbedTemplate,
}

impl Desk {
    fn new(settings: &Settings) -> Result<Self> {
        let endpoint = settings.api_endpoint()?;
        info!(endpoint = %endpoint, "movies: using backend");
        let store: Arc<dyn RemoteStore> = Arc::new(HttpRemoteStore::new(endpoint));
        let list = ListSyncController::new(Arc::clone(&store));
        let form = FormController::with_variant(store, Arc::clone(&list), settings.form_variant());
        Ok(Self {
            list,
            form,
            embed: settings.embed_template()?,
        })
    }

    async fn print_list(&self) {
        let view = ListView::from_state(&self.list.state().await, &self.embed);
        print!(
            "{}",
            render::render_list(&view, self.list.last_synced_at().await)
        );
    }

    async fn print_draft(&self) {
        print!(
            "{}",
            render::render_draft(
                &self.form.draft().await,
                self.form.phase().await,
                self.form.variant()
            )
        );
    }

    async fn submit(&self) {
        match self.form.submit().await {
            Ok(()) => {
                println!("Saved.");
                self.print_list().await;
            }
            Err(SubmitError::Invalid(err)) => println!("Cannot save yet: {err}"),
            Err(SubmitError::Rejected(err)) => {
                println!("Could not save movie ({err}); draft kept, try again.")
            }
        }
    }

    async fn run_list(&self) {
        // Refresh failures are already logged; the view stays in its loading state.
        let _ = self.list.mount().await;
        self.print_list().await;
    }

    async fn run_add(
        &self,
        title: &str,
        description: &str,
        year: Option<&str>,
        tmdb_id: Option<&str>,
    ) {
        let _ = self.list.mount().await;
        self.form.update_field(DraftField::Title, title).await;
        self.form.update_field(DraftField::Description, description).await;
        if let Some(year) = year {
            if !self.form.update_field(DraftField::Year, year).await {
                warn!("movies: year '{year}' is not a number, keeping default");
            }
        }
        if let Some(tmdb_id) = tmdb_id {
            self.form.update_field(DraftField::StreamingId, tmdb_id).await;
        }
        self.submit().await;
    }

    async fn run_interactive(&self) -> Result<()> {
        let _ = self.list.mount().await;
        self.print_list().await;
        println!("{HELP}");
        prompt()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(PromptCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Err(err) => println!("{err}"),
            }
            prompt()?;
        }
        Ok(())
    }

    async fn execute(&self, command: PromptCommand) {
        match command {
            PromptCommand::Set { field, value } => {
                if !self.form.update_field(field, &value).await {
                    println!("'{value}' is not a year; keeping {}", self.form.draft().await.year);
                }
            }
            PromptCommand::Submit => self.submit().await,
            PromptCommand::Refresh => {
                if let Err(err) = self.list.refresh().await {
                    println!("Refresh failed: {err}");
                }
                self.print_list().await;
            }
            PromptCommand::Draft => self.print_draft().await,
            PromptCommand::Show => self.print_list().await,
            PromptCommand::Help => println!("{HELP}"),
            PromptCommand::Quit => {}
        }
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?
        .with_overrides(cli.api_url.clone(), cli.require_streaming_id);
    init_tracing(&settings.log_filter);

    let desk = Desk::new(&settings)?;
    match cli.command.unwrap_or(Command::List) {
        Command::List => desk.run_list().await,
        Command::Add {
            title,
            description,
            year,
            tmdb_id,
        } => {
            desk.run_add(&title, &description, year.as_deref(), tmdb_id.as_deref())
                .await
        }
        Command::Interactive => desk.run_interactive().await?,
    }

    Ok(())
}
