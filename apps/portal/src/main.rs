use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use gateway::PortalGateway;
use portal_core::{BrokerWorkflow, ChatThread, SessionContext};
use shared::domain::{BrokerId, ComplaintStatus};
use storage::Storage;

mod config;

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Vehicle-registration portal client")]
struct Cli {
    /// Backend base URL; overrides portal.toml and environment.
    #[arg(long)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered brokers with their overall ratings.
    Brokers,
    /// Show portal-wide analytics counters.
    Analytics,
    /// Show support contact information.
    Support,
    /// List complaints, optionally filtered by broker and status.
    Complaints {
        #[arg(long)]
        broker_id: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Send one message to the assistant and print the reply.
    Chat { message: String },
    /// Log in as a broker by license number and persist the session.
    Login { license_number: String },
    /// Show the persisted broker session, if any.
    Session,
    /// Clear the persisted broker session.
    Logout,
}

fn parse_status(raw: &str) -> Result<ComplaintStatus> {
    match raw.to_ascii_lowercase().as_str() {
        "pending" => Ok(ComplaintStatus::Pending),
        "in-progress" | "in progress" => Ok(ComplaintStatus::InProgress),
        "resolved" => Ok(ComplaintStatus::Resolved),
        other => bail!("unknown complaint status '{other}'"),
    }
}

async fn open_session_store(settings: &config::Settings) -> Result<Storage> {
    let database_url = config::normalize_database_url(&settings.session_database_url);
    Storage::new(&database_url).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut settings = config::load_settings();
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }

    let gateway = Arc::new(PortalGateway::new(settings.api_base_url.clone()));

    match cli.command {
        Command::Brokers => {
            for broker in gateway.list_brokers().await? {
                let rating = broker
                    .avg_overall
                    .map(|r| format!("{r:.1}"))
                    .unwrap_or_else(|| "N/A".to_string());
                println!(
                    "#{:<4} {:<24} license={} rating={} ({})",
                    broker.id.0, broker.name, broker.license_number, rating, broker.specialization
                );
            }
        }
        Command::Analytics => {
            let snapshot = gateway.analytics().await?;
            println!("citizens:     {}", snapshot.total_citizens);
            println!("brokers:      {}", snapshot.total_brokers);
            println!("applications: {}", snapshot.total_applications);
            println!("approved:     {}", snapshot.approved_applications);
        }
        Command::Support => {
            let info = gateway.support_info().await?;
            println!("toll free: {}", info.toll_free);
            println!("emergency: {}", info.emergency_contact);
            println!("email:     {}", info.email);
            println!("hours:     {}", info.working_hours);
            println!("helpdesk:  {}", info.helpdesk);
        }
        Command::Complaints { broker_id, status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let complaints = gateway
                .list_complaints(broker_id.map(BrokerId), status)
                .await?;
            for complaint in complaints {
                println!(
                    "#{:<4} application={} [{:?}] {:?}: {}",
                    complaint.id.0,
                    complaint.application_id.0,
                    complaint.status,
                    complaint.complaint_type,
                    complaint.description
                );
            }
        }
        Command::Chat { message } => {
            let mut thread = ChatThread::new(gateway.clone());
            thread.send(&message).await;
            if let Some(reply) = thread.messages().last() {
                println!("{}", reply.content);
            }
        }
        Command::Login { license_number } => {
            let storage = open_session_store(&settings).await?;
            let workflow = BrokerWorkflow::new(gateway.clone(), SessionContext::new(storage));
            if workflow.login(&license_number).await? {
                if let Some(session) = workflow.current_session().await {
                    println!(
                        "logged in as {} (broker #{})",
                        session.profile.name, session.broker_id.0
                    );
                }
            } else {
                let reason = workflow
                    .login_error()
                    .await
                    .unwrap_or_else(|| "login failed".to_string());
                println!("{reason}");
            }
        }
        Command::Session => {
            let storage = open_session_store(&settings).await?;
            match SessionContext::new(storage).load().await? {
                Some(session) => println!(
                    "{} (broker #{}, license {})",
                    session.profile.name, session.broker_id.0, session.profile.license_number
                ),
                None => println!("no broker session"),
            }
        }
        Command::Logout => {
            let storage = open_session_store(&settings).await?;
            SessionContext::new(storage).clear().await?;
            println!("session cleared");
        }
    }

    Ok(())
}
