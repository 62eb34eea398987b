use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bp_canvas::Canvas;
use bp_core::SceneConfig;
use clap::Parser;
use crossterm::{cursor, queue, style::Print, terminal};

pub mod cli;
pub mod pacer;
pub mod scene;
pub mod term;

/// Log the measured frame rate every this many frames.
const FPS_LOG_INTERVAL: u64 = 120;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli.config)?;
    cli.apply_overrides(&mut config);

    // 4. Canvas et scène
    let mut canvas = Canvas::new(config.width, config.height)
        .context("Impossible de créer le canvas")?;
    config.validate()?;
    let mut scene = scene::Scene::new(&config)?;
    let (columns, rows) = canvas.cell_size();
    log::info!(
        "Canvas {}×{} dots → {columns}×{rows} caractères, {} fps",
        config.width,
        config.height,
        config.target_fps
    );

    // 5. Boucle principale ; le guard restaure le terminal à la sortie.
    let _guard = term::TerminalGuard::new().context("Impossible d'initialiser le terminal")?;
    let mut out = io::stdout().lock();
    run(
        &mut out,
        &mut canvas,
        &mut scene,
        &config,
        cli.frames,
        term::quit_requested,
    )
}

/// Draw, print and pace frames until `frames` is reached (0 = no limit) or
/// `quit` reports a quit request.
fn run(
    out: &mut impl Write,
    canvas: &mut Canvas,
    scene: &mut scene::Scene,
    config: &SceneConfig,
    frames: u64,
    mut quit: impl FnMut() -> io::Result<bool>,
) -> Result<()> {
    let mut pacer = pacer::FramePacer::new(config.target_fps, 60);
    let mut text = String::new();

    loop {
        scene.draw(canvas);
        canvas.render_into(&mut text);

        // CLEAR SCREEN, puis une ligne par rangée : pas de CR implicite en raw mode.
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in text.lines().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(out, cursor::MoveTo(0, row), Print(line))?;
        }
        out.flush()?;

        if frames != 0 && scene.frame() >= frames {
            return Ok(());
        }
        if quit()? {
            log::info!("Arrêt demandé à la frame {}", scene.frame());
            return Ok(());
        }
        if scene.frame() % FPS_LOG_INTERVAL == 0 {
            log::debug!("frame {} : {:.1} fps", scene.frame(), pacer.fps());
        }

        scene.advance(canvas);
        pacer.wait();
    }
}

/// Charge la config ; un fichier absent donne les défauts.
fn resolve_config(path: &Path) -> Result<SceneConfig> {
    if path.exists() {
        bp_core::config::load_config(path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        SceneConfig {
            width: 20,
            height: 12,
            target_fps: 120,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn run_stops_when_quit_is_requested() {
        let config = small_config();
        let mut canvas = Canvas::new(config.width, config.height).unwrap();
        let mut scene = scene::Scene::new(&config).unwrap();
        let mut out = Vec::new();
        let mut polls = 0;

        run(&mut out, &mut canvas, &mut scene, &config, 0, || {
            polls += 1;
            Ok(polls == 3)
        })
        .unwrap();

        assert_eq!(polls, 3);
        assert_eq!(scene.frame(), 3);
        assert!(!out.is_empty());
    }

    #[test]
    fn run_stops_after_frame_limit() {
        let config = small_config();
        let mut canvas = Canvas::new(config.width, config.height).unwrap();
        let mut scene = scene::Scene::new(&config).unwrap();
        let mut out = Vec::new();

        run(&mut out, &mut canvas, &mut scene, &config, 2, || Ok(false)).unwrap();
        assert_eq!(scene.frame(), 2);
    }

    #[test]
    fn quit_poll_errors_propagate() {
        let config = small_config();
        let mut canvas = Canvas::new(config.width, config.height).unwrap();
        let mut scene = scene::Scene::new(&config).unwrap();

        let result = run(&mut io::sink(), &mut canvas, &mut scene, &config, 0, || {
            Err(io::Error::other("tty closed"))
        });
        assert!(result.is_err());
    }

    #[test]
    fn each_canvas_row_is_positioned_explicitly() {
        let config = small_config();
        let mut canvas = Canvas::new(config.width, config.height).unwrap();
        let mut scene = scene::Scene::new(&config).unwrap();
        let mut out = Vec::new();

        run(&mut out, &mut canvas, &mut scene, &config, 1, || Ok(false)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains('\n'));
        // MoveTo(0, 2) is CSI 3;1H.
        assert!(text.contains("\x1b[3;1H"));
    }
}
