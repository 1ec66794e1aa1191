//! Command handlers.

use super::commands::{Cli, Commands, VideoOptions};
use super::session::{load_config, open_studio, read_image, write_file};
use atelier::{
    AtelierResult, BatchReport, GenerationError, GenerationErrorKind, ImageAspectRatio, Operation,
    Readiness, Studio, VideoDuration, VideoRequest, VideoRequestBuilder, decode_base64, encode_wav,
};
use std::path::Path;
use tracing::{info, warn};

/// Run the parsed command against a freshly opened studio.
///
/// Generation failures are reported as their user-facing message before the
/// error is returned.
pub async fn run_command(cli: Cli) -> AtelierResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut studio = open_studio(config).await?;

    if studio.readiness() == Readiness::NotReady {
        warn!("No API key selected; set {} to generate", atelier::API_KEY_VAR);
    }

    let result = dispatch(&mut studio, cli.command).await;
    if let Some(generation) = result.as_ref().err().and_then(|e| e.as_generation()) {
        eprintln!("{}", generation.user_message());
    }
    result
}

async fn dispatch(studio: &mut Studio, command: Commands) -> AtelierResult<()> {
    match command {
        Commands::Ideas => {
            for (index, idea) in studio.generate_ideas().await?.iter().enumerate() {
                println!("{}. {}", index + 1, idea);
            }
        }

        Commands::Story { image } => {
            let image = read_image(&image).await?;
            println!("{}", studio.generate_story(&image).await?);
        }

        Commands::Speak { text, out } => speak(studio, &text, out.as_deref()).await?,

        Commands::Image {
            prompt,
            aspect,
            out,
        } => image(studio, &prompt, aspect, out.as_deref()).await?,

        Commands::Video { prompt, options } => {
            let request = video_request(&prompt, &options).await?;
            let handle = studio.generate_video(&request).await?;
            println!("{} ({} bytes)", handle.locator(), handle.size_bytes());
        }

        Commands::BatchImages { prompts, aspect } => {
            let report = studio.batch_images(&prompts, aspect).await?;
            print_report(studio, &report, |artifacts| artifacts.image.as_deref());
        }

        Commands::BatchVideos { prompts, options } => {
            let template = video_request("", &options).await?;
            let report = studio.batch_videos(&prompts, &template).await?;
            print_report(studio, &report, |artifacts| artifacts.video.as_deref());
            if let Some(error) = report.stopped_by() {
                println!(
                    "  stopped: {} prompt(s) not attempted",
                    report.total() - report.succeeded().len() - report.failed().len()
                );
                return Err(error.clone().into());
            }
        }

        Commands::History { clear } => {
            if clear {
                studio.clear_history()?;
                println!("History cleared");
            } else if studio.history().is_empty() {
                println!("No images yet");
            } else {
                for entry in studio.history() {
                    println!("[{}] {}", entry.aspect_ratio(), entry.prompt());
                }
            }
        }
    }

    Ok(())
}

async fn speak(studio: &mut Studio, text: &str, out: Option<&Path>) -> AtelierResult<()> {
    let buffer = studio.generate_speech(text).await?;
    match out {
        Some(path) => {
            write_file(path, &encode_wav(&buffer)).await?;
            println!("Wrote {}", path.display());
        }
        None => {
            info!(duration = ?buffer.duration(), "Playing narration");
            let end = studio.play(buffer).finished().await;
            info!(?end, "Narration ended");
        }
    }
    Ok(())
}

async fn image(
    studio: &mut Studio,
    prompt: &str,
    aspect: ImageAspectRatio,
    out: Option<&Path>,
) -> AtelierResult<()> {
    let entry = studio.generate_image(prompt, aspect).await?;
    match out {
        Some(path) => {
            let payload = entry
                .locator()
                .split_once(',')
                .map(|(_, payload)| payload)
                .unwrap_or_default();
            write_file(path, &decode_base64(payload)?).await?;
            println!("Wrote {}", path.display());
        }
        None => println!("Image recorded in history ({} chars)", entry.locator().len()),
    }
    Ok(())
}

async fn video_request(prompt: &str, options: &VideoOptions) -> AtelierResult<VideoRequest> {
    let mut builder = VideoRequestBuilder::default();
    builder
        .prompt(prompt)
        .aspect_ratio(options.aspect)
        .duration(VideoDuration::try_from(options.duration)?)
        .allow_people(options.allow_people);
    if let Some(path) = &options.start_image {
        builder.start_image(read_image(path).await?);
    }
    let request = builder.build().map_err(|e| {
        GenerationError::new(
            Operation::VideoSubmit,
            GenerationErrorKind::InvalidRequest(e.to_string()),
        )
    })?;
    Ok(request)
}

fn print_report(
    studio: &Studio,
    report: &BatchReport,
    locator: impl Fn(&atelier::PromptArtifacts) -> Option<&str>,
) {
    println!(
        "{} batch: {} of {} succeeded",
        report.kind(),
        report.succeeded().len(),
        report.total()
    );
    for prompt in report.succeeded() {
        let found = studio
            .batch()
            .artifacts(prompt)
            .and_then(&locator)
            .map(|l| if l.len() > 80 { "(inline data)" } else { l })
            .unwrap_or("-");
        println!("  ok   {} -> {}", prompt, found);
    }
    for (prompt, error) in report.failed() {
        println!("  fail {}: {}", prompt, error.user_message());
    }
}
