//! Headless demo -- plays a scripted session and prints how it went.
//!
//! Run with:
//!   cargo run --example headless_run -p joeyhop-engine -- [frames] [seed] [config.json]
//!
//! Steering zig-zags between the walls. Set `RUST_LOG=debug` for per-frame
//! output.

use std::time::{Duration, Instant};

use joeyhop_engine::hud;
use joeyhop_engine::prelude::*;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let frames: u32 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 3_600,
    };
    let seed = match args.next() {
        Some(arg) => BaseSeed(arg.parse()?),
        None => BaseSeed::from_clock(),
    };
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let high_scores = JsonFileHighScore::new(std::env::temp_dir().join("joeyhop-highscore.json"));
    let mut game = Game::new(World::new(config, seed), RecordingAudio::default(), high_scores);

    // Simulated host clock: 60 Hz with a little jitter.
    let mut now = Instant::now();
    let mut events = 0usize;
    for frame in 0..frames {
        let (press, release) = if (frame / 90) % 2 == 0 {
            (Key::Right, Key::Left)
        } else {
            (Key::Left, Key::Right)
        };
        game.handle_input(InputEvent::KeyUp {
            key: release,
            repeat: false,
        });
        game.handle_input(InputEvent::KeyDown {
            key: press,
            repeat: false,
        });

        now += Duration::from_micros(16_667 + u64::from(frame % 3) * 500);
        events += game.frame(now).len();
    }

    let world = game.world();
    let view = RenderView::new(world);
    println!("seed      {}", seed.0);
    println!("frames    {}", world.frame_count());
    println!("{}", hud::day_text(world.level().day));
    println!("score     {}", hud::score_text(world.score()));
    println!("high      {}", hud::high_text(game.high_score()));
    println!("events    {events}");
    println!("cues      {}", game.audio().played.len());
    println!("entities  {}", world.store().len());
    println!("sprites   {}", view.sprites().len());
    println!("particles {}", view.particles().len());
    println!("hash      {}", world.state_hash()?);
    Ok(())
}
