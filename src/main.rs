//! Bounce Reel entry point
//!
//! Loads the sprite, simulates the bounce, renders every frame and writes the
//! animated PNG. Any failure aborts before the output file is touched.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image::Rgba;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use bounce_reel::anim::{Animation, ApngEncoder, save_animation};
use bounce_reel::assets::load_sprite_image;
use bounce_reel::renderer::{Sprite, render_frames};
use bounce_reel::sim::Simulator;
use bounce_reel::ReelConfig;

#[derive(Debug, Parser)]
#[command(name = "bounce-reel", version, about = "Render a sprite bouncing inside a circle")]
struct Cli {
    /// Sprite image (any format the image crate can read)
    #[arg(long, required_unless_present = "dump_config")]
    sprite: Option<PathBuf>,

    /// Output animated PNG
    #[arg(long, short, default_value = "bouncing.apng")]
    output: PathBuf,

    /// JSON config file; unspecified fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReelConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReelConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("invalid configuration")?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let sprite_path = cli.sprite.context("--sprite is required")?;
    let image = load_sprite_image(&sprite_path, config.sprite_size)?;
    let sprite = Sprite::new(image, Rgba(config.border_color))?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {} (pass --seed {} to reproduce)", seed, seed);

    let trajectory = Simulator::new(&config, Pcg32::seed_from_u64(seed))?.run();
    let frames = render_frames(&sprite, &trajectory.positions, config.canvas_size);
    let animation = Animation::assemble(frames, &config)?;
    save_animation(&animation, &ApngEncoder, &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!(
        "Saved to {} with {} bounces and {} frames.",
        cli.output.display(),
        trajectory.bounce_count,
        animation.frames().len()
    );
    Ok(())
}
