//! Multimodal demo: fetch an image from the web and ask a vision model to
//! describe it.
//!
//! Usage: describe_image [IMAGE_URL]
//!
//! The image is downloaded locally and sent inline as a base64 data URI, so
//! this also works against endpoints that cannot fetch external URLs.
//! Requires GITHUB_TOKEN in the environment (or a `.env` file).

use hosted_models::{ChatClient, ContentPart, ImageInput, Message, Provider};
use tracing_subscriber::EnvFilter;

const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/300/200";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let image_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    println!("Fetching image: {}", image_url);
    let image = ImageInput::fetch(&image_url).await?;

    let client = ChatClient::from_env(Provider::GitHubModels)?;
    let response = client
        .chat()
        .message(Message::user_parts(vec![
            ContentPart::text("Can you describe the content of this image?"),
            image.into_part(),
        ]))
        .send()
        .await?;

    println!("\n{}", response.text()?);
    println!("\n{}", response.usage());

    Ok(())
}
