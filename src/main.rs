//! Mini Arcade entry point
//!
//! Headless driver: runs both engines against a fixed viewport with a seeded
//! stream of key presses, then prints the final state.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use mini_arcade::physics::{BodyManifest, Bounds, PhysicsEngine};
use mini_arcade::pursuit::{PursuitEngine, PursuitLayout};
use mini_arcade::{Arcade, Result, Settings};

/// Frame interval of the simulated host
const FRAME_MS: f64 = 16.0;
/// How often the simulated player presses a key
const KEY_INTERVAL_FRAMES: u32 = 12;
const KEYS: [&str; 4] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

#[derive(Parser, Debug)]
#[command(version, about = "Run the arcade simulation cores headless")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Seed for the simulated key presses and scattered bodies
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Replace the reference bodies with this many scattered ones
    #[arg(long)]
    scattered: Option<usize>,

    /// Viewport width in px
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height in px
    #[arg(long, default_value_t = 600.0)]
    height: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Mini Arcade (headless) starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.validate()?;

    let bounds = Bounds::new(args.width, args.height);
    let manifest = match args.scattered {
        Some(count) => BodyManifest::scattered(args.seed, count, bounds),
        None => BodyManifest::reference(),
    };

    let mut arcade = Arcade::with_engines(
        &settings,
        PhysicsEngine::new(manifest, settings.physics),
        PursuitEngine::new(PursuitLayout::reference(), settings.pursuit),
    );

    let mut rng = Pcg32::seed_from_u64(args.seed);
    let frames = (args.seconds.max(0.0) * 1000.0 / FRAME_MS) as u32;
    for frame in 0..frames {
        if frame % KEY_INTERVAL_FRAMES == 0 && !arcade.pursuit().state().is_terminal() {
            arcade.press_key(KEYS[rng.random_range(0..KEYS.len())]);
        }
        arcade.advance(FRAME_MS, Some(bounds));
    }

    let physics = arcade.physics();
    println!("Physics: {} ticks, energy {:.2}", physics.ticks(), physics.energy());
    for body in physics.bodies() {
        println!(
            "  body {}: pos ({:.1}, {:.1}) vel ({:.2}, {:.2})",
            body.id, body.pos.x, body.pos.y, body.vel.x, body.vel.y
        );
    }

    let state = arcade.pursuit().state();
    println!(
        "Pursuit: {:?}, score {}, {} collectibles left",
        state.phase,
        state.score,
        state.grid.collectibles_left()
    );
    println!("{}", state.grid);

    Ok(())
}
