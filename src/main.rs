use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use task_arcade::celebration::{on_task_completed, Celebration};
use task_arcade::display::terminal::TerminalSurface;
use task_arcade::display::Surface;
use task_arcade::input::{InputEvent, Key};
use task_arcade::{
    display, new_session, ArcadeConfig, GameKind, LoopDriver, Priority, TickStatus,
};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "task_arcade", about = "Celebration mini-games for finished tasks")]
struct Cli {
    /// Skip the celebration and play this game directly.
    #[arg(long, value_enum)]
    game: Option<GameArg>,

    /// Priority of the completed task.
    #[arg(long, value_enum, default_value_t = PriorityArg::High)]
    priority: PriorityArg,

    /// Seed for every random draw; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here (the terminal itself is taken by the game).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameArg {
    Invader,
    Runner,
    Batting,
    FreeThrow,
}

impl From<GameArg> for GameKind {
    fn from(g: GameArg) -> Self {
        match g {
            GameArg::Invader => GameKind::Invader,
            GameArg::Runner => GameKind::Runner,
            GameArg::Batting => GameKind::Batting,
            GameArg::FreeThrow => GameKind::FreeThrow,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else { return Ok(()) };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Event mapping ─────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Key::Action),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        _ => None,
    }
}

/// Translate a key event into the adapter's vocabulary. Auto-repeat of the
/// action key is dropped so holding Space does not machine-gun.
fn key_input(code: KeyCode, kind: KeyEventKind) -> Option<InputEvent> {
    let key = map_key(code)?;
    match kind {
        KeyEventKind::Press => Some(InputEvent::KeyDown(key)),
        KeyEventKind::Repeat if key != Key::Action => Some(InputEvent::KeyDown(key)),
        KeyEventKind::Repeat => None,
        KeyEventKind::Release => Some(InputEvent::KeyUp(key)),
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

fn pace(frame_start: Instant) {
    let elapsed = frame_start.elapsed();
    if elapsed < FRAME {
        thread::sleep(FRAME - elapsed);
    }
}

// ── Celebration ───────────────────────────────────────────────────────────────

enum Next {
    Play(GameKind),
    Menu,
    Quit,
}

fn celebrate<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    celebration: &mut Celebration,
) -> Result<Next> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(&mut *out, cols, rows)?;
    surface.set_visible(true)?;

    loop {
        let frame_start = Instant::now();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => {
                    if is_quit(code, modifiers) {
                        celebration.dismiss();
                        return Ok(Next::Quit);
                    }
                    let offered = celebration.offered_games();
                    if let KeyCode::Char(c) = code {
                        let pick = c
                            .to_digit(10)
                            .and_then(|d| offered.get((d as usize).checked_sub(1)?));
                        if let Some(&kind) = pick {
                            return Ok(Next::Play(kind));
                        }
                    }
                }
                Event::Resize(c, r) => surface.resize(c, r)?,
                _ => {}
            }
        }

        celebration.tick();
        if !celebration.is_visible() {
            surface.set_visible(false)?;
            return Ok(Next::Quit);
        }
        display::celebration::render(&mut surface, &celebration)?;
        pace(frame_start);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<Next> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  TASK  ARCADE  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let colors = [Color::Green, Color::Magenta, Color::Yellow, Color::DarkYellow];
    for (i, (kind, color)) in GameKind::ALL.iter().zip(colors).enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(2) + i as u16))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(kind.title()))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Q : Quit"))?;
    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let Ok(ev) = rx.recv() else { return Ok(Next::Quit) };
        if let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = ev {
            if is_quit(code, modifiers) {
                return Ok(Next::Quit);
            }
            if let KeyCode::Char(c @ '1'..='4') = code {
                let idx = c as usize - '1' as usize;
                return Ok(Next::Play(GameKind::ALL[idx]));
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn play<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    kind: GameKind,
    config: &ArcadeConfig,
    seed: u64,
) -> Result<Next> {
    let (cols, rows) = terminal::size()?;
    let surface = TerminalSurface::new(&mut *out, cols, rows)?;
    drive(LoopDriver::new(new_session(kind, config, seed), surface), rx)
}

/// Play a game picked from the celebration's offer.
fn play_offered<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    celebration: &mut Celebration,
    kind: GameKind,
    config: &ArcadeConfig,
    seed: u64,
) -> Result<Next> {
    let (cols, rows) = terminal::size()?;
    let surface = TerminalSurface::new(&mut *out, cols, rows)?;
    let driver = celebration
        .launch(kind, surface, config, seed)
        .with_context(|| format!("{} is not on offer", kind.title()))?;
    drive(driver, rx)
}

fn drive<W: Write>(
    driver: LoopDriver<TerminalSurface<W>>,
    rx: &mpsc::Receiver<Event>,
) -> Result<Next> {
    let mut driver = driver.on_complete(|summary| {
        info!(
            score = summary.score,
            rank = %summary.rank,
            survived = summary.survived(),
            "final result"
        );
    });
    driver.start().context("starting game")?;

    loop {
        let frame_start = Instant::now();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Press {
                        if is_quit(code, modifiers) {
                            driver.close()?;
                            return Ok(Next::Quit);
                        }
                        let over = driver.session().is_terminal();
                        match code {
                            KeyCode::Char('r') | KeyCode::Char('R') if over => driver.restart()?,
                            KeyCode::Char('m') | KeyCode::Char('M') if over => {
                                driver.close()?;
                                return Ok(Next::Menu);
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                if driver.is_paused() {
                                    driver.resume();
                                } else {
                                    driver.pause();
                                }
                            }
                            _ => {}
                        }
                    }
                    if let Some(input) = key_input(code, kind) {
                        driver.handle_input(input);
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    let at = driver.surface().to_logical(column, row);
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            driver.handle_input(InputEvent::PointerMove(at));
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            driver.handle_input(InputEvent::PointerMove(at));
                            driver.handle_input(InputEvent::Click(at));
                        }
                        _ => {}
                    }
                }
                Event::Resize(c, r) => {
                    driver.surface_mut().resize(c, r)?;
                    driver.redraw()?;
                }
                _ => {}
            }
        }

        if let TickStatus::Finished(summary) = driver.tick()? {
            info!(game = ?summary.kind, score = summary.score, "waiting for restart or menu");
        }
        pace(frame_start);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = match &cli.config {
        Some(path) => ArcadeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ArcadeConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "task_arcade starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Key-release events where the terminal supports them; others fall back
    // to the adapter's hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &cli, &config, seed);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cli: &Cli,
    config: &ArcadeConfig,
    seed: u64,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);

    // Only the first pick after a celebration goes through its offer.
    let mut celebration = None;
    let mut next = match cli.game {
        Some(game) => Next::Play(game.into()),
        None => {
            let priority: Priority = cli.priority.into();
            let c = celebration.insert(on_task_completed(
                priority,
                &config.celebration,
                config.frame_rate,
                &mut rng,
            ));
            celebrate(out, rx, c)?
        }
    };

    loop {
        next = match next {
            Next::Quit => break,
            Next::Menu => show_menu(out, rx)?,
            Next::Play(kind) => {
                let seed = rng.gen();
                match celebration.take() {
                    Some(mut c) => play_offered(out, rx, &mut c, kind, config, seed)?,
                    None => play(out, rx, kind, config, seed)?,
                }
            }
        };
    }
    Ok(())
}
