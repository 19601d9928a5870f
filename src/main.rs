use std::path::Path;
use std::time::{Duration, Instant};

use softpipe::config::Config;
use softpipe::engine::Engine;
use softpipe::render::FrameStats;
use softpipe::window::{frame_title, Window, WindowEvent};

/// How often frame statistics are logged at debug level.
const STATS_INTERVAL: Duration = Duration::from_secs(1);

fn load_config() -> Result<Config, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = Config::load(&path).map_err(|e| format!("{path}: {e}"))?;
            log::info!("loaded configuration from '{path}'");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn log_stats(stats: &FrameStats, frames: u32) {
    log::debug!(
        "{frames} frames, last: {} triangles, {} fragments, {} written, {} clipped in {:?}",
        stats.triangles,
        stats.fragments,
        stats.pixels_written,
        stats.clipped,
        stats.elapsed
    );
}

fn run_snapshot(engine: &mut Engine, path: &Path, frames: u32) -> Result<(), String> {
    let mut stats = FrameStats::default();
    for _ in 0..frames {
        engine.update();
        stats = engine.render();
    }
    log_stats(&stats, frames);

    engine
        .framebuffer()
        .to_rgba_image()
        .save(path)
        .map_err(|e| format!("failed to save '{}': {e}", path.display()))?;
    log::info!("wrote {} after {frames} frames", path.display());
    Ok(())
}

fn run_window(engine: &mut Engine, config: &Config) -> Result<(), String> {
    let mut window = Window::new(&config.window.title, config.window.width, config.window.height)?;

    let mut frames = 0u32;
    let mut last_stats = Instant::now();

    'running: loop {
        let frame_start = Instant::now();

        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Action(action) => engine.apply(action),
            }
        }

        engine.update();
        let stats = engine.render();
        window.present(engine.framebuffer())?;
        frames += 1;

        let scene = engine.scene();
        if let Some(title) = frame_title(
            frame_start.elapsed(),
            scene.projection.fov_y_degrees(),
            scene.light.position,
        ) {
            window.set_title(&title)?;
        }

        if last_stats.elapsed() >= STATS_INTERVAL {
            log_stats(&stats, frames);
            frames = 0;
            last_stats = Instant::now();
        }
    }

    log::info!("window closed");
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = load_config()?;
    let mut engine = Engine::new(&config);
    engine.load_mesh(&config.scene.model);

    match &config.output.snapshot {
        Some(path) => run_snapshot(&mut engine, path, config.output.frames),
        None => run_window(&mut engine, &config),
    }
}
