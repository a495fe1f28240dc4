mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use httpcalls::{ClientConfig, Header, RequestClient};

#[derive(Parser, Debug)]
#[command(
    name = "httpcalls",
    about = "Make GET, POST, DELETE and GraphQL calls against JSON APIs",
    version
)]
struct Cli {
    /// Skip certificate validation
    #[arg(long, global = true)]
    insecure: bool,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Probe the base URL before the real call
    #[arg(long, global = true)]
    preflight: bool,

    /// Fail on 4xx/5xx responses
    #[arg(long, global = true)]
    strict_status: bool,

    /// Extra header as NAME:VALUE, e.g. "Authorization: Basic xyz"
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    headers: Vec<Header>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Target {
    /// Scheme and host, e.g. https://api.example.com
    url: String,

    /// API section appended to the URL
    #[arg(long, default_value = "")]
    api: String,

    /// Extra arguments appended after the API section
    #[arg(long, default_value = "")]
    args: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET and pretty-print the JSON response
    Get {
        #[command(flatten)]
        target: Target,
    },
    /// POST a payload and print the raw response
    Post {
        #[command(flatten)]
        target: Target,

        /// Inline request body
        #[arg(long, conflicts_with = "data_file")]
        data: Option<String>,

        /// Read the request body from a file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
    /// DELETE and print the raw response
    Delete {
        #[command(flatten)]
        target: Target,
    },
    /// POST a GraphQL query and pretty-print the JSON response
    Graphql {
        #[command(flatten)]
        target: Target,

        /// Query text
        query: String,
    },
}

fn parse_header(raw: &str) -> Result<Header, String> {
    Header::parse(raw).ok_or_else(|| format!("invalid header '{raw}', expected NAME:VALUE"))
}

impl Cli {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            insecure: self.insecure,
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            preflight: self.preflight,
            strict_status: self.strict_status,
            ..ClientConfig::default()
        }
    }

    fn client(&self, target: &Target) -> RequestClient {
        RequestClient {
            base_url: target.url.clone(),
            api: target.api.clone(),
            args: target.args.clone(),
            headers: self.headers.clone(),
            config: self.config(),
            ..RequestClient::default()
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_raw(client: &RequestClient) {
    println!("{}", String::from_utf8_lossy(&client.result));
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Get { target } => {
            let mut client = cli.client(target);
            let value: serde_json::Value = client
                .get()
                .with_context(|| format!("GET {} failed", client.url()))?;
            tracing::info!(status = ?client.status, "GET {}", client.url());
            print_json(&value)
        }
        Command::Post {
            target,
            data,
            data_file,
        } => {
            let mut client = cli.client(target);
            client.payload = match (data, data_file) {
                (Some(data), _) => Some(data.clone().into_bytes()),
                (None, Some(path)) => Some(
                    std::fs::read(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                (None, None) => None,
            };
            client
                .post()
                .with_context(|| format!("POST {} failed", client.url()))?;
            tracing::info!(status = ?client.status, "POST {}", client.url());
            print_raw(&client);
            Ok(())
        }
        Command::Delete { target } => {
            let mut client = cli.client(target);
            client
                .delete()
                .with_context(|| format!("DELETE {} failed", client.url()))?;
            tracing::info!(status = ?client.status, "DELETE {}", client.url());
            print_raw(&client);
            Ok(())
        }
        Command::Graphql { target, query } => {
            let mut client = cli.client(target);
            let value: serde_json::Value = client
                .query_graphql(query)
                .with_context(|| format!("GraphQL query to {} failed", client.url()))?;
            tracing::info!(status = ?client.status, "GraphQL {}", client.url());
            print_json(&value)
        }
    }
}

fn main() -> Result<()> {
    logging::init()?;
    let cli = Cli::parse();
    run(&cli)
}
