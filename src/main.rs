use std::net::SocketAddr;
use std::process;
use std::time::Duration;

use askama::Template;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use billing_login::config::{self, Config, DEFAULT_HOST, DEFAULT_PORT};
use billing_login::models::AppState;
use billing_login::routes::build_router;
use billing_login::services::{csrf_input, purge_expired, random_token};
use billing_login::templates::{ConfirmLoginContext, ConfirmLoginTemplate};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

fn load_config(env_file: Option<&str>) -> Config {
    config::load_env_file(env_file);
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(%e, "Invalid configuration");
            eprintln!("{}: {}", yansi::Paint::red("Invalid configuration"), e);
            process::exit(1);
        }
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };

    let purge_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            purge_expired(&purge_state);
        }
    });

    let app = build_router(state);
    tracing::info!(%addr, "Starting billing login server");
    println!(
        "{} {}",
        yansi::Paint::new("Billing login server running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[derive(Parser)]
#[command(
    name = "billing-login",
    author,
    version,
    about = "Billing login confirmation server",
    long_about = r#"Serves the page where a user confirms their identity before logging in to plan management.

Servers request a login with POST /api/v1/billing/login-requests and send the user to the
returned confirm_url. Use `--env-file` or environment variables to configure the server.

Examples:
  1) Run the server (dev):
      cargo run -- serve --host 127.0.0.1 --port 8080
  2) Preview the confirmation page:
      billing-login render --host-name zulip.example.com --email iago@example.com --tos
"#,
    after_help = "Use `billing-login <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Print the confirmation page for the given values to stdout
    #[command(about = "Render a preview of the confirmation page", long_about = "Render the billing login confirmation page with the given values and a freshly generated CSRF field, and print the HTML to stdout.")]
    Render {
        /// Organization or subdomain being logged into
        #[arg(long)]
        host_name: String,
        /// Email shown on the page
        #[arg(long)]
        email: String,
        /// Name used to pre-fill the full name field
        #[arg(long)]
        full_name: Option<String>,
        /// Ask for Terms of Service consent
        #[arg(long, default_value_t = false)]
        tos: bool,
        /// Form submission target
        #[arg(long, default_value = "/billing/login/preview/confirm")]
        action_url: String,
        /// Base URL for the Terms of Service link
        #[arg(long)]
        root_domain_url: Option<String>,
    },
    /// Validate configuration (env vars)
    #[command(about = "Validate configuration.", long_about = "Load the .env file and environment variables the server reads at startup and report any problems.")]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    // Serve with defaults when no command is given.
    let command = cli.command.unwrap_or(Commands::Serve {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
        env_file: None,
        stylesheet: None,
    });

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = AppState::new(load_config(env_file.as_deref()));
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::Render {
            host_name,
            email,
            full_name,
            tos,
            action_url,
            root_domain_url,
        } => {
            let settings = load_config(None);
            let root_domain_url = root_domain_url
                .map(|u| config::sanitize_base_url(&u))
                .unwrap_or(settings.root_domain_url);
            let ctx = ConfirmLoginContext {
                host: host_name,
                user_email: email,
                user_full_name: full_name,
                tos_consent_needed: tos,
                action_url,
                csrf_input: csrf_input(&random_token()),
                root_domain_url,
            };
            match ConfirmLoginTemplate::from_context(ctx, settings.public_base_url).render() {
                Ok(html) => println!("{}", html),
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::red("Failed to render page"), e);
                    process::exit(1);
                }
            }
        }
        Commands::CheckConfig { env_file } => {
            let config = load_config(env_file.as_deref());
            if config.api_token.is_empty() {
                println!(
                    "{}",
                    yansi::Paint::new("API_TOKEN is not set; anyone can issue login requests").yellow()
                );
            }
            println!("{} {}", yansi::Paint::new("PUBLIC_BASE_URL:").bold(), config.public_base_url);
            println!("{} {}", yansi::Paint::new("ROOT_DOMAIN_URL:").bold(), config.root_domain_url);
            println!("{} {}s", yansi::Paint::new("LOGIN_TOKEN_TTL_SECS:").bold(), config.login_token_ttl_secs);
            println!("{} {}", yansi::Paint::new("PLAN_MANAGEMENT_PATH:").bold(), config.plan_management_path);
            println!("{}", yansi::Paint::new("Configuration looks valid").green());
        }
    }
}
