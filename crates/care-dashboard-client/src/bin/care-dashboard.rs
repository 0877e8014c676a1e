//! Command-line front end for the provider dashboard.
//!
//! Drives the same view state a UI would and prints it as plain text.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use care_dashboard_client::render::{render_overview, render_roster};
use care_dashboard_client::{
    ClientConfig, HttpProviderApi, LogNavigator, PatientDetailView, PatientListView, Session,
    UpdateOutcome,
};
use care_dashboard_core::models::ComplianceStatus;
use care_dashboard_core::roster::StatusFilter;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "care-dashboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Provider dashboard for patient wellness compliance"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API root (overrides config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Bearer token (overrides config)
    #[arg(long, env = "CARE_DASHBOARD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Provider display name for the greeting
    #[arg(long)]
    provider: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List assigned patients
    Patients {
        /// Case-insensitive name or email search
        #[arg(short, long, default_value = "")]
        search: String,

        /// "all", "Goal Met", "Missed Preventive Checkup" or "Pending"
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },

    /// Show one patient's overview
    Overview {
        /// Patient id
        id: String,
    },

    /// Update a patient's compliance status
    SetStatus {
        /// Patient id
        id: String,

        /// "Goal Met", "Missed Preventive Checkup" or "Pending"
        status: ComplianceStatus,
    },
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    // stdout carries the rendered page
    if cli.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())
        .context("Failed to load client configuration")?;

    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }
    if let Some(name) = &cli.provider {
        config.provider_name = Some(name.clone());
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = load_config(&cli)?;
    info!(base_url = %config.base_url, "Using provider API");

    let api = Arc::new(HttpProviderApi::from_config(&config));
    let navigator = Arc::new(LogNavigator);
    let session = Session {
        provider_name: config.provider_name.clone(),
    };

    match cli.command {
        Commands::Patients { search, status } => {
            let mut view = PatientListView::new(api, navigator, session);
            view.set_search_term(search);
            view.set_status_filter(status);
            // A failed load is shown in the page's error banner.
            let _ = view.load_roster().await;
            print!("{}", render_roster(&view));
            if view.error().is_some() {
                std::process::exit(1);
            }
        }
        Commands::Overview { id } => {
            let view = PatientDetailView::new(api, navigator, session, id);
            let _ = view.load_detail().await;
            print!("{}", render_overview(&view));
            if view.detail().is_none() {
                std::process::exit(1);
            }
        }
        Commands::SetStatus { id, status } => {
            let view = PatientDetailView::new(api, navigator, session, id)
                .with_success_window(config.success_display());
            view.load_detail()
                .await
                .with_context(|| format!("Cannot open patient {}", view.patient_id()))?;

            let outcome = view.update_compliance(status).await;
            print!("{}", render_overview(&view));
            match outcome.context("Compliance update was rejected")? {
                UpdateOutcome::Saved { refreshed: false } => {
                    eprintln!("Saved, but the overview could not be refreshed");
                }
                UpdateOutcome::Saved { refreshed: true } | UpdateOutcome::Ignored => {}
            }
        }
    }

    Ok(())
}
