//! Structured-output demo: ask a factual question and get a typed answer.
//!
//! Usage: city_agent [--provider github|azure|openai] [--query "..."]
//!
//! Requires the selected provider's credentials in the environment (or a
//! `.env` file): GITHUB_TOKEN, AZURE_ENDPOINT + AZURE_API_KEY, or
//! OPENAI_API_KEY.

use hosted_models::{create_agent, Agent, Provider};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, JsonSchema)]
struct CityLocation {
    city: String,
    country: String,
}

const DEFAULT_QUERY: &str = "Where were the olympics held in 2012?";

#[derive(Debug, PartialEq)]
enum Command {
    Run { provider: Provider, query: String },
    Help,
}

fn usage() -> String {
    format!(
        "Usage: city_agent [--provider github|azure|openai] [--query \"...\"]\n\
         Default query: {}",
        DEFAULT_QUERY
    )
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut provider = Provider::GitHubModels;
    let mut query = DEFAULT_QUERY.to_string();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--provider" => {
                let value = args.next().ok_or("--provider requires a value")?;
                provider = value.parse().map_err(|e| format!("{}", e))?;
            }
            "--query" => {
                query = args.next().ok_or("--query requires a value")?;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(Command::Run { provider, query })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (provider, query) = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run { provider, query }) => (provider, query),
        Ok(Command::Help) => {
            println!("{}", usage());
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", usage());
            std::process::exit(2);
        }
    };

    let agent: Agent<CityLocation> = create_agent(provider)?;

    println!("Using provider: {}", provider);
    println!("Query: {}", query);

    let run = agent.run(&query).await?;

    println!("\nResult:");
    println!("city='{}' country='{}'", run.output.city, run.output.country);
    println!("\n{}", run.usage);

    Ok(())
}
