//! Structured-output demo: extract a typed list of pets from free text.
//!
//! Uses the provider-native `response_format` schema enforcement. Requires
//! GITHUB_TOKEN in the environment (or a `.env` file).

use hosted_models::{Agent, ChatClient, Error, Provider};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, JsonSchema)]
struct Pet {
    name: String,
    animal: String,
    age: u32,
    color: Option<String>,
    favorite_toy: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PetList {
    pets: Vec<Pet>,
}

const PROMPT: &str = "I have two pets. \
    A cat named Luna who is 5 years old and loves playing with yarn. She has grey fur. \
    I also have a 2 year old black cat named Loki who loves tennis balls.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatClient::builder(Provider::GitHubModels)
        .model("openai/o4-mini")
        .build()?;
    let agent: Agent<PetList> = Agent::builder().temperature(1.0).build(client)?;

    match agent.run(PROMPT).await {
        Ok(run) => {
            for pet in &run.output.pets {
                println!(
                    "{} the {} ({} years old, color: {}, favorite toy: {})",
                    pet.name,
                    pet.animal,
                    pet.age,
                    pet.color.as_deref().unwrap_or("unknown"),
                    pet.favorite_toy.as_deref().unwrap_or("unknown"),
                );
            }
            println!("\n{}", run.usage);
        }
        Err(Error::LengthLimit) => {
            println!("Too many tokens: the response was truncated before completing the JSON");
        }
        Err(Error::Refusal(reason)) => {
            println!("{}", reason);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
