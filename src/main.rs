mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use freefall::animation::SpriteSheet;
use freefall::canvas::Canvas;
use freefall::coordinator::Coordinator;
use freefall::entities::TickInput;
use freefall::settings::Settings;

use display::Display;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so logs only go to a file when one is set.
fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    match &settings.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file '{}'", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .init();
        }
    }
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Folds one terminal event into this tick's input.
///
/// Main action button is 5, like in the middle of a Nokia 3310, with Space
/// and a mouse click as fallbacks.
fn apply_event(input: &mut TickInput, ev: &Event) {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('5') | KeyCode::Char(' ') => input.action = true,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => input.quit = true,
            KeyCode::Char('f') | KeyCode::Char('F') => input.fullscreen = true,
            _ => {}
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => input.action = true,
        _ => {}
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs one update and one draw per tick until the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    coordinator: &mut Coordinator,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut canvas = Canvas::default();
    let mut display = Display::new(settings.scale, settings.palette);
    let frame = settings.tick_duration();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = TickInput::default();
        while let Ok(ev) = rx.try_recv() {
            apply_event(&mut input, &ev);
        }

        match coordinator.update(&input, &mut rng) {
            Ok(()) => {}
            Err(e) if e.is_quit() => {
                info!("{e}");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        canvas.clear();
        coordinator.draw(&mut canvas);
        display.render(out, &canvas, coordinator.fullscreen())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref())
        .context("failed to load settings")?;
    init_logging(&settings)?;

    let sheet = SpriteSheet::builtin_box().context("failed to load the box sprite")?;
    let mut coordinator = Coordinator::new(sheet);
    info!("starting at {} ticks per second", settings.tps);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                warn!("input reader stopped: {e}");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &mut coordinator, &settings);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("best run: {} ticks", coordinator.session().high_score);
    result
}
