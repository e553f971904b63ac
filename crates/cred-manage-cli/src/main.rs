use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cred_manage::{
    prompt_for_credentials, ApiEndpoints, BitwardenConfig, BitwardenContainer,
    CredentialContainer, FlatFileContainer, PromptResolver, TerminalPrompt, TokenRequest,
};
use tracing_subscriber::EnvFilter;

/// cred-manage - Read credentials from pluggable backends
#[derive(Parser, Debug)]
#[command(name = "cred-manage")]
#[command(about = "Read credentials from flat files and Bitwarden")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the secret stored in a flat file
    Read {
        /// Path to the secret file
        path: String,

        /// Keep leading and trailing whitespace
        #[arg(long)]
        no_strip: bool,
    },

    /// Compute a Bitwarden master password hash (prompts for the password)
    Hash {
        /// Account email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Build a Bitwarden container from its JSON config and show its settings
    Bitwarden {
        /// Path to the API config (defaults to ~/.credentials/bw_api.json)
        #[arg(short, long)]
        config: Option<String>,

        /// Base URL of a self-hosted Bitwarden server
        #[arg(long)]
        server: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cred_manage=info".parse()?)
                .add_directive("cred_manage_cli=info".parse()?),
        )
        .init();

    match cli.command {
        Commands::Read { path, no_strip } => run_read(&path, !no_strip),
        Commands::Hash { email } => run_hash(email.as_deref()),
        Commands::Bitwarden { config, server } => {
            run_bitwarden(config.as_deref(), server.as_deref())
        }
    }
}

/// Expand `~` and environment variables in a user-supplied path
fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).with_context(|| format!("Failed to expand path: {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn run_read(path: &str, strip: bool) -> Result<()> {
    let path = expand_path(path)?;
    let container = FlatFileContainer::new(&path).context("Invalid secret file")?;

    let secret = if strip {
        container.get_cred()?
    } else {
        container.read(false)?
    };

    print!("{}", secret);
    if strip {
        println!();
    }
    Ok(())
}

fn run_hash(email: Option<&str>) -> Result<()> {
    let hash = prompt_for_credentials(&TerminalPrompt::new(), email, None)
        .context("Failed to collect credentials")?;

    println!("{}", hash);
    Ok(())
}

fn run_bitwarden(config: Option<&str>, server: Option<&str>) -> Result<()> {
    let config_path = match config {
        Some(raw) => expand_path(raw)?,
        None => BitwardenConfig::default_path(),
    };

    tracing::info!("Loading Bitwarden config from {}", config_path.display());

    let resolver = PromptResolver::new(TerminalPrompt::new());
    let mut container = BitwardenContainer::from_flat_file(&config_path, &resolver)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if let Some(server) = server {
        container = container.with_endpoints(ApiEndpoints::self_hosted(server));
    }

    print!("{}", describe(&container));

    Ok(())
}

/// Non-secret settings of a Bitwarden container, one per line
fn describe(container: &BitwardenContainer) -> String {
    let request = container.token_request();

    format!(
        "username:    {}\n\
         grant_type:  {}\n\
         scope:       {}\n\
         client_id:   {}\n\
         api:         {}\n\
         token url:   {} ({})\n",
        container.username(),
        container.grant_type(),
        container.scope(),
        container.client_id(),
        container.endpoints().api_url,
        request.url,
        TokenRequest::CONTENT_TYPE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cred_manage::hash_password;

    #[test]
    fn test_describe_lists_settings_without_secrets() {
        let hash = hash_password("nobody@example.com", "p4ssw0rd");
        let config = BitwardenConfig {
            username: "nobody@example.com".to_string(),
            password: Some(hash.clone()),
            client_secret: Some("s3cr3t".to_string()),
            ..Default::default()
        };
        let container = BitwardenContainer::new(config).unwrap();

        let summary = describe(&container);

        assert_eq!(
            summary.lines().collect::<Vec<_>>(),
            vec![
                "username:    nobody@example.com",
                "grant_type:  password",
                "scope:       api",
                "client_id:   web",
                "api:         https://api.bitwarden.com",
                "token url:   https://identity.bitwarden.com/connect/token \
                 (application/x-www-form-urlencoded)",
            ]
        );
        assert!(!summary.contains(&hash));
        assert!(!summary.contains("s3cr3t"));
    }
}
