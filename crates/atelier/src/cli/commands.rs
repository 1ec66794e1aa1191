//! CLI command definitions.

use atelier::{ImageAspectRatio, VideoAspectRatio};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Atelier - creative studio over generative text, speech, image and video models
#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(about = "Creative studio over generative text, speech, image and video models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Brainstorm a list of creative prompts
    Ideas,

    /// Write a short story inspired by an image
    Story {
        /// Image file (png, jpeg, webp, gif)
        #[arg(long)]
        image: PathBuf,
    },

    /// Narrate text
    Speak {
        /// Text to narrate
        text: String,

        /// Write the narration to a WAV file instead of playing it
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a still image
    Image {
        /// Image prompt
        prompt: String,

        /// Aspect ratio (1:1, 3:4, 4:3, 9:16, 16:9)
        #[arg(long, default_value = "1:1")]
        aspect: ImageAspectRatio,

        /// Write the image to a file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a short video
    Video {
        /// Video prompt
        prompt: String,

        #[command(flatten)]
        options: VideoOptions,
    },

    /// Generate one image per prompt, in parallel
    BatchImages {
        /// Prompts, one image each
        #[arg(required = true)]
        prompts: Vec<String>,

        /// Aspect ratio for every image
        #[arg(long, default_value = "1:1")]
        aspect: ImageAspectRatio,
    },

    /// Generate one video per prompt, in order
    BatchVideos {
        /// Prompts, one video each
        #[arg(required = true)]
        prompts: Vec<String>,

        #[command(flatten)]
        options: VideoOptions,
    },

    /// Show or clear recently generated images
    History {
        /// Forget every recorded image
        #[arg(long)]
        clear: bool,
    },
}

/// Settings shared by single and batch video generation
#[derive(clap::Args, Debug, Clone)]
pub struct VideoOptions {
    /// Aspect ratio (16:9, 16:10)
    #[arg(long, default_value = "16:9")]
    pub aspect: VideoAspectRatio,

    /// Length in seconds (5 to 8)
    #[arg(long, default_value_t = 8)]
    pub duration: u8,

    /// Allow adults to appear in the video
    #[arg(long)]
    pub allow_people: bool,

    /// First frame of the video
    #[arg(long)]
    pub start_image: Option<PathBuf>,
}
