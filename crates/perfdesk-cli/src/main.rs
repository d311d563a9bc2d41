//! `perfdesk` - command-line client for the perfdesk HR backend.
//!
//! Each invocation restores the saved session, runs one command, and exits.
//! The session lives in the state directory between runs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perfdesk::prelude::*;
use perfdesk::backend::HttpBackend;
use perfdesk::session::FileStorage;
use tracing_subscriber::{EnvFilter, fmt};

type Client = PerfdeskClient<HttpBackend, FileStorage>;

#[derive(Parser)]
#[command(name = "perfdesk", about = "HR and performance desk client", version)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "PERFDESK_API_URL")]
    api_url: Option<String>,

    /// Where the saved session lives (defaults to the platform data dir)
    #[arg(long, global = true, env = "PERFDESK_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Google OAuth client id
    #[arg(long, global = true, env = "PERFDESK_GOOGLE_CLIENT_ID")]
    google_client_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PERFDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PERFDESK_PASSWORD", hide_env_values = true)]
        password: String,
        /// One of: Admin, Manager, "Program Head", "Program Manager",
        /// "Business Manager", "Executives/Associates", Instructor, Student,
        /// Employee
        #[arg(long)]
        role: Role,
    },

    /// Sign in with a Google ID-token credential
    Google {
        #[arg(long, env = "PERFDESK_GOOGLE_CREDENTIAL", hide_env_values = true)]
        credential: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Re-fetch the signed-in user's profile
    Refresh,

    /// Show the navigation menus for the signed-in user
    Menu,

    /// Check whether a screen would render, e.g. `open /view-employees`
    Open { path: String },

    /// List employees
    Employees {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        per_page: u32,
    },

    /// Print the resolved configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("invalid RUST_LOG")?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut client = build_client(&cli)?;

    match cli.command {
        Commands::Login { email, password } => {
            let identity = client
                .login(&Credentials::new(email, password))
                .await
                .map_err(explain)?;
            println!("Signed in as {} ({})", identity.name, identity.role);
        }
        Commands::Register {
            name,
            email,
            password,
            role,
        } => {
            let reg = Registration::new(name, email, password, role);
            match client.register(&reg).await.map_err(explain)? {
                Registered::SignedIn(identity) => {
                    println!("Registered and signed in as {}", identity.name);
                }
                Registered::PendingLogin { message } => {
                    println!(
                        "{}",
                        message.as_deref().unwrap_or("Registered. Please sign in.")
                    );
                }
            }
        }
        Commands::Google { credential } => {
            let identity = client
                .login_with_google(&credential)
                .await
                .map_err(explain)?;
            println!("Signed in as {} ({})", identity.name, identity.role);
        }
        Commands::Logout => {
            client.logout();
            println!("Signed out");
        }
        Commands::Whoami => {
            restore(&mut client).await;
            match client.session().identity() {
                Some(identity) => {
                    println!("{} <{}>", identity.name, identity.email.as_deref().unwrap_or("-"));
                    println!("id:   {}", identity.id);
                    println!("role: {}", identity.role);
                }
                None => println!("Not signed in"),
            }
        }
        Commands::Refresh => {
            restore(&mut client).await;
            let identity = client.refresh().await.map_err(explain)?;
            println!("{} ({})", identity.name, identity.role);
        }
        Commands::Menu => {
            restore(&mut client).await;
            let menus = client.menus();
            if menus.is_empty() {
                println!("No menus");
            }
            for menu in menus {
                println!("{}", menu.title);
                for item in menu.items {
                    println!("  {:<20} {}", item.label, item.route);
                }
            }
        }
        Commands::Open { path } => {
            restore(&mut client).await;
            let (route, access) = client.open(&path).map_err(explain)?;
            match access {
                Access::Render => println!("{route}: render"),
                Access::Redirect { to, reason } => {
                    let why = match reason {
                        Reason::SignedOut => "not signed in".to_string(),
                        Reason::RoleNotAllowed(role) => format!("{role} not allowed"),
                        Reason::Landing => "landing".to_string(),
                    };
                    println!("{route}: redirect to {to} ({why})");
                }
            }
        }
        Commands::Employees { page, per_page } => {
            restore(&mut client).await;
            let listing = client.employees(page, per_page).await.map_err(explain)?;
            for employee in &listing.employees {
                println!(
                    "{:<26} {:<24} {:<28} {}",
                    employee.id,
                    employee.name,
                    employee.email.as_deref().unwrap_or("-"),
                    employee.role
                );
            }
            println!(
                "page {} ({} shown, {} total)",
                page.max(1),
                listing.employees.len(),
                listing.total
            );
        }
        Commands::Config => {
            let config = client.config();
            println!("api_url:          {}", config.api_url);
            println!("state_dir:        {}", config.resolved_state_dir()?.display());
            println!(
                "google_client_id: {}",
                config.google_client_id.as_deref().unwrap_or("-")
            );
            println!("request_timeout:  {}s", config.request_timeout.as_secs());
        }
    }

    Ok(())
}

fn build_client(cli: &Cli) -> Result<Client> {
    let mut builder =
        PerfdeskClientBuilder::new().request_timeout(Duration::from_secs(cli.timeout));
    if let Some(url) = &cli.api_url {
        builder = builder.api_url(url);
    }
    if let Some(dir) = &cli.state_dir {
        builder = builder.state_dir(dir);
    }
    if let Some(id) = &cli.google_client_id {
        builder = builder.google_client_id(id);
    }
    builder.build().context("failed to start the client")
}

/// Restores the saved session. A failure has already signed the user out,
/// so it is reported and the command carries on signed out.
async fn restore(client: &mut Client) {
    if let Err(e) = client.start().await {
        tracing::warn!(error = %e, "could not restore session");
        eprintln!("{}", e.user_message());
    }
}

fn explain(e: PerfdeskError) -> anyhow::Error {
    let message = e.user_message();
    anyhow::Error::new(e).context(message)
}
