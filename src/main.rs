use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use balloon_shooter::clock::FrameClock;
use balloon_shooter::compute::{init_state, tick};
use balloon_shooter::display::{self, Viewport};
use balloon_shooter::input::InputLatch;
use balloon_shooter::{GameConfig, GameState};

/// Overrides the log file location.
const LOG_ENV: &str = "BALLOON_SHOOTER_LOG";

// ── Logging ───────────────────────────────────────────────────────────────────

fn log_path() -> PathBuf {
    std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("balloon_shooter.log"))
}

/// The terminal belongs to the game, so log records go to a file. Logging is
/// silently disabled if the file cannot be created.
fn init_logging() {
    let Ok(file) = File::create(log_path()) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// What the player asked for once a round ends or is abandoned.
enum Outcome {
    Quit,
    Restart,
}

/// Play one round. Input events are drained every frame into the latch,
/// which is sampled once per tick; the tick itself never blocks.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    reports_release: bool,
) -> std::io::Result<Outcome> {
    let mut latch = InputLatch::with_release_reporting(reports_release);
    let mut clock = FrameClock::new(state.config.frame_period());
    let mut view = Viewport::from_terminal()?;
    let mut frame: u64 = 0;

    loop {
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(Outcome::Quit);
                            }
                            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(Outcome::Quit);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if state.is_over() => {
                                return Ok(Outcome::Restart);
                            }
                            _ => {}
                        }
                    }
                    latch.apply(&key, frame);
                }
                Event::Resize(cols, rows) => {
                    view = Viewport::new(cols, rows);
                }
                _ => {}
            }
        }
        latch.expire(frame);

        if !state.is_over() {
            *state = tick(state, &latch.sample(), rng);
            if state.is_over() {
                log::info!(
                    "round over after {} frames, {} shots missed",
                    state.frame,
                    state.shots_missed
                );
            }
        }

        display::render(out, state, &view)?;
        clock.wait();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    // Fail before touching the terminal so the message stays readable.
    let config = GameConfig::load()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from terminals that speak
    // the kitty keyboard protocol; others fall back to key expiry. The query
    // reads from stdin, so it must run before the input thread starts.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("key release reporting: {keyboard_enhanced}");

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
            Err(err) => {
                log::warn!("input thread stopped: {err}");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, config, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("terminal error: {err}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    reports_release: bool,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        let mut state = init_state(config.clone());
        log::info!("round started");
        match game_loop(out, &mut state, rx, &mut rng, reports_release)? {
            Outcome::Quit => break,
            Outcome::Restart => continue,
        }
    }
    Ok(())
}
