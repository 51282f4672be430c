use std::path::{Path, PathBuf};
use std::process::exit;

use gamedata::config::AppConfiguration;
use imagegen::{load_token, save_image, ImageClient, ImageGenError};
use log::{debug, info};

use crate::cli::Image;

/// Seconds to wait for the image service
const REQUEST_TIMEOUT: u64 = 300;

pub async fn execute(config: &AppConfiguration, image: Image) -> Result<PathBuf, ImageGenError> {
    let settings = &config.image;
    let token = load_token(Path::new(&settings.token_file))?;

    let client = match ImageClient::builder()
        .host(settings.host.as_str())
        .model(settings.model.as_str())
        .bearer_auth(token)
        .timeout(REQUEST_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("ERROR: Unable to set up the image client: {e}");
            eprintln!("Check the image settings with 'clawedit config list'");
            exit(1);
        }
    };

    let aspect_ratio = image.ratio.as_deref().unwrap_or(settings.aspect_ratio.as_str());
    let image_size = image.size.as_deref().unwrap_or(settings.image_size.as_str());
    debug!("Prompt: {}", image.prompt);
    println!(
        "Generating a {aspect_ratio} {image_size} image with {}, this may take a while...",
        client.model()
    );

    let generated = client.generate(&image.prompt, aspect_ratio, image_size).await?;
    let path = save_image(
        &generated,
        image.output.as_deref(),
        Path::new(&settings.output_dir),
    )?;
    info!("Generated image written to {}", path.display());
    Ok(path)
}
