//! Multimodal structured-output demo: analyze a local image file into a
//! typed description.
//!
//! Usage: analyze_image <IMAGE_PATH>
//!
//! The schema travels in the prompt (paired with plain JSON mode) rather
//! than `response_format: json_schema`, for vision models without native
//! schema support. Requires GITHUB_TOKEN in the environment (or a `.env`
//! file).

use hosted_models::{Agent, ChatClient, ImageInput, Provider, SchemaMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct DetectedObject {
    name: String,
    confidence: f64,
    attributes: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
enum Setting {
    Indoor,
    Outdoor,
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ImageDescription {
    summary: String,
    objects: Vec<DetectedObject>,
    scene: String,
    colors: Vec<String>,
    time_of_day: TimeOfDay,
    setting: Setting,
    text_content: Option<String>,
}

const PROMPT: &str = "Analyze this image and describe what you see, including any \
    objects, the scene, colors and any text you can detect.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let image_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: analyze_image <IMAGE_PATH>");
            std::process::exit(2);
        }
    };

    let image = ImageInput::from_file(&image_path)?;

    let client = ChatClient::from_env(Provider::GitHubModels)?;
    let agent: Agent<ImageDescription> = Agent::builder()
        .schema_mode(SchemaMode::PromptInjection)
        .temperature(0.0)
        .build(client)?;

    let run = agent.run_with_image(PROMPT, image).await?;

    println!("{}", serde_json::to_string_pretty(&run.output)?);
    println!("\n{}", run.usage);

    Ok(())
}
