mod console;
mod logging;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use crmsport_core::{actions, CrmClient, Endpoint, Scheme};
use tracing::debug;

use console::ConsoleObserver;

#[derive(Parser, Debug)]
#[command(name = "crmsport", version, about = "Console client for the crmsport API")]
struct Cli {
    /// API host, overrides the `host` variable
    #[arg(long, global = true)]
    host: Option<String>,

    /// API port, overrides the `port` variable
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Use https instead of http
    #[arg(long, global = true)]
    https: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the actions the client knows about
    Actions {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in, then fetch the users and teams lists
    Run {
        #[arg(long, env = "CRMSPORT_EMAIL")]
        email: String,
        #[arg(long, env = "CRMSPORT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Call one action, optionally signing in first
    Call {
        /// Action name, see `crmsport actions`
        action: String,

        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,

        #[arg(long, env = "CRMSPORT_EMAIL", requires = "password")]
        email: Option<String>,
        #[arg(long, env = "CRMSPORT_PASSWORD", hide_env_values = true, requires = "email")]
        password: Option<String>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

/// Applies the command-line overrides to an endpoint read from the environment.
fn resolve_endpoint(cli: &Cli, base: Endpoint) -> Endpoint {
    let mut endpoint = base;
    if let Some(host) = &cli.host {
        endpoint.host = host.clone();
    }
    if let Some(port) = cli.port {
        endpoint.port = port;
    }
    if cli.https {
        endpoint.scheme = Scheme::Https;
    }
    endpoint
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let endpoint = resolve_endpoint(&cli, Endpoint::from_env()?);
    debug!(host = %endpoint.host, port = endpoint.port, scheme = endpoint.scheme.as_str(), "endpoint");
    let mut client = CrmClient::new(endpoint).with_observer(ConsoleObserver::stdout());

    match cli.command {
        Command::Actions { json: true } => {
            println!("{}", serde_json::to_string_pretty(actions())?);
        }
        Command::Actions { json: false } => {
            for action in actions() {
                println!(
                    "{:<12} {:<5} {:<16} {}",
                    action.name,
                    action.method.as_str(),
                    action.path,
                    action.description
                );
            }
        }
        Command::Run { email, password } => {
            sign_in(&mut client, &email, &password)?;
            client.users_list().context("users list failed")?;
            client.teams_list().context("teams list failed")?;
        }
        Command::Call {
            action,
            params,
            email,
            password,
        } => {
            if let (Some(email), Some(password)) = (email, password) {
                sign_in(&mut client, &email, &password)?;
            }
            let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let parsed = client
                .execute(&action, &params)
                .with_context(|| format!("{action} failed"))?;
            if !parsed.is_success() {
                bail!("{action}: no response from {}", client.endpoint().host);
            }
        }
    }

    Ok(())
}

fn sign_in(client: &mut CrmClient, email: &str, password: &str) -> Result<()> {
    let parsed = client.user_sign_in(email, password).context("sign in failed")?;
    if !parsed.is_success() {
        bail!("sign in: no response from {}", client.endpoint().host);
    }
    Ok(())
}
