//! Command-line front end for the Inkwell admin dashboard
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use inkwell_admin::mock::MockBackend;
use inkwell_admin::pages::{ApiTestPage, DashboardPage, SettingsPage};
use inkwell_admin::widgets::{DbTimeWidget, HealthWidget};
use inkwell_admin::{AdminBackend, ApiClient, Shell, render};
use inkwell_core::AdminConfig;
use std::path::PathBuf;
use tracing::info;

/// Command line interface for the Inkwell admin dashboard
#[derive(Parser)]
#[command(
    name = "inkwell-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin dashboard for the Inkwell blog platform"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json: bool,

    /// Use a built-in demo backend instead of the configured API
    #[arg(long)]
    offline: bool,

    /// Page or action; defaults to the dashboard
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Show backend health and database time
    Dashboard,

    /// Check backend health
    Health,

    /// Read the database clock
    DbNow,

    /// Ping the echo endpoint
    Hello,

    /// Show or flip the coming-soon flag
    ComingSoon {
        /// Flag action
        #[command(subcommand)]
        action: Option<FlagAction>,
    },

    /// Show navigation with the entry for PATH highlighted
    Nav {
        /// Current location
        #[arg(default_value = "/")]
        path: String,
    },

    /// End the session
    SignOut,

    /// Print the resolved configuration
    Config,
}

/// Coming-soon flag actions
#[derive(Subcommand, Clone, Copy)]
enum FlagAction {
    /// Show the current value
    Status,
    /// Flip the value
    Toggle,
}

#[tokio::main]
async fn main() -> inkwell_core::Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AdminConfig::load_from(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let format = if cli.json { "json" } else { config.logging.format.as_str() };
    inkwell_core::init_logging(level, format)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        offline = cli.offline,
        "Inkwell admin starting"
    );

    let backend: Box<dyn AdminBackend> = if cli.offline {
        Box::new(MockBackend::new())
    } else {
        Box::new(
            ApiClient::from_config(&config)
                .map_err(|e| inkwell_core::Error::configuration(e.to_string()))?,
        )
    };

    let command = cli.command.unwrap_or(Commands::Dashboard);
    let output = run(command, backend.as_ref(), &config).await?;
    println!("{output}");

    Ok(())
}

async fn run(
    command: Commands,
    backend: &dyn AdminBackend,
    config: &AdminConfig,
) -> inkwell_core::Result<String> {
    let misconfigured = backend.is_misconfigured();
    let banner = render::misconfiguration_banner(misconfigured);
    let with_banner = |body: String| match &banner {
        Some(banner) => format!("{banner}\n{body}"),
        None => body,
    };

    let output = match command {
        Commands::Dashboard => {
            let page = DashboardPage::mount(backend).await;
            render::dashboard(&page, misconfigured)
        }
        Commands::Health => {
            let mut widget = HealthWidget::new("health");
            widget.refresh(|| backend.health()).await;
            with_banner(render::status_line(
                "Health",
                &widget,
                render::health_summary,
            ))
        }
        Commands::DbNow => {
            let mut widget = DbTimeWidget::new("db-time");
            widget.refresh(|| backend.db_now()).await;
            with_banner(render::status_line(
                "Database",
                &widget,
                render::db_time_summary,
            ))
        }
        Commands::Hello => {
            let mut page = ApiTestPage::new();
            page.ping(backend).await;
            render::api_test(&page, misconfigured)
        }
        Commands::ComingSoon { action } => {
            let mut page = SettingsPage::mount(backend, config.notice_ttl()).await;
            if matches!(action, Some(FlagAction::Toggle)) {
                page.toggle_coming_soon(backend).await;
            }
            render::settings(&page, misconfigured)
        }
        Commands::Nav { path } => {
            let shell = Shell::at(&path);
            format!("{}\n{:?}", render::nav_line(&shell), shell.current_route())
        }
        Commands::SignOut => {
            let mut shell = Shell::new();
            let route = shell.sign_out(backend).await;
            format!("Signed out; now at {} ({route:?})", shell.current_path())
        }
        Commands::Config => serde_json::to_string_pretty(config)?,
    };

    Ok(output)
}
