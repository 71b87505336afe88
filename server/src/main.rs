use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_directory::{
    DirectorySession, EmployeeStatus, HttpDirectory, SortField, StaticDirectory,
};
use server::{
    browse::{BrowseOptions, browse},
    config::AppConfig,
    graphql,
    http::{self, AppState, ServeConfig},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "directory-server", version, about = "Staff directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the provider endpoints and GraphQL.
    Serve(ServeCommand),
    /// Show one page of a group's employees from a running server.
    Browse(BrowseCommand),
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct BrowseCommand {
    /// Provider base url.
    #[arg(long, env = "DIRECTORY_BASE_URL")]
    base_url: Option<String>,
    /// Group id; the first group is used when omitted.
    #[arg(long)]
    group: Option<i64>,
    #[arg(long, short)]
    search: Option<String>,
    /// Department to include; repeat for more.
    #[arg(long = "department")]
    departments: Vec<String>,
    /// Status to include (active, inactive, onleave); repeat for more.
    #[arg(long = "status")]
    statuses: Vec<EmployeeStatus>,
    #[arg(long, default_value = "name")]
    sort: SortField,
    #[arg(long)]
    desc: bool,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl From<BrowseCommand> for BrowseOptions {
    fn from(value: BrowseCommand) -> Self {
        BrowseOptions {
            group: value.group,
            search: value.search,
            departments: value.departments,
            statuses: value.statuses,
            sort: value.sort,
            descending: value.desc,
            page: value.page,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => {
            init_tracing(ObsConfig::default())?;
            run_server(cmd, app_config).await
        }
        Command::Browse(cmd) => {
            init_tracing(ObsConfig::for_service("directory-browse").with_env_filter(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
            ))?;
            run_browse(cmd, &app_config).await
        }
        Command::SchemaPrint { output } => schema_print(output),
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    info!(
        groups_latency_ms = config.groups_latency.as_millis() as u64,
        employees_latency_ms = config.employees_latency.as_millis() as u64,
        "starting directory server"
    );
    let state = AppState::from_config(config);
    http::serve(cmd.into(), state).await
}

async fn run_browse(cmd: BrowseCommand, config: &AppConfig) -> Result<()> {
    let base_url = cmd
        .base_url
        .clone()
        .unwrap_or_else(|| config.directory_base_url.clone());
    let provider = HttpDirectory::new(&base_url)
        .with_context(|| format!("invalid directory url {base_url}"))?;
    let mut session = DirectorySession::new(provider);
    let screen = browse(&mut session, &cmd.into()).await?;
    print!("{screen}");
    Ok(())
}

fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let sdl = graphql::build_schema(StaticDirectory::new()).sdl();
    match path {
        Some(target) => {
            std::fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "schema snapshot written");
        }
        None => print!("{sdl}"),
    }
    Ok(())
}
