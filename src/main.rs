// src/main.rs

use guess_the_logic::config::{self, GameConfig};
use guess_the_logic::feedback::LogSink;
use guess_the_logic::{Action, Engine, Feedback, LevelCatalog, Phase, ProgressStore, SqliteStore};
use log::{error, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::thread;

type Game = Engine<LogSink>;

fn render(game: &Game, out: &mut impl Write) -> io::Result<()> {
    let state = game.state();
    let catalog = game.catalog();
    match state.phase {
        Phase::Home => {
            writeln!(out, "== Guess the Logic ==  High Score: {}", state.score)?;
            writeln!(out, "start | reset | sound | vibration | music | quit")?;
        }
        Phase::LevelSelect => {
            writeln!(out, "== Select Map ==  Score: {}", state.score)?;
            writeln!(
                out,
                "  Levels: {}  Progress: {}%",
                catalog.count(),
                state.progress_percent(catalog)
            )?;
            for level in catalog.iter() {
                if state.is_unlocked(level.id) {
                    writeln!(out, "  [{:>3}] {}", level.id, level.difficulty)?;
                } else {
                    writeln!(out, "  [{:>3}] locked", level.id)?;
                }
            }
            writeln!(out, "select N | home")?;
        }
        Phase::Playing => {
            let Some(level) = state.level(catalog) else {
                return Ok(());
            };
            let terms: Vec<String> = level.pattern.iter().map(|n| n.to_string()).collect();
            writeln!(out, "Level {} ({} Mode)", level.id, level.difficulty)?;
            writeln!(out, "  {}, ?", terms.join(", "))?;
            match state.feedback {
                Feedback::Correct => writeln!(out, "  Correct!")?,
                Feedback::Wrong => writeln!(out, "  Not quite.")?,
                Feedback::None => {}
            }
            if let Some(hint) = state.visible_hint(catalog) {
                writeln!(out, "  Hint: {}", hint)?;
            }
            if state.attempts > 0 {
                writeln!(out, "  Attempts: {}", state.attempts)?;
            }
            writeln!(out, "<number> | hint | map | home")?;
        }
        Phase::Summary => {
            writeln!(out, "== Level Complete ==")?;
            if let Some(logic) = state.revealed_logic(catalog) {
                writeln!(out, "  Logic: {}", logic)?;
            }
            if let Some(award) = state.last_award {
                writeln!(out, "  +{} points (total {})", award, state.score)?;
            }
            let next = if state.has_next_level(catalog) {
                "next (Advance)"
            } else {
                "next (Grand Finale!)"
            };
            writeln!(out, "{} | map | home", next)?;
        }
    }
    out.flush()
}

/// What the terminal does with one input line.
enum Command {
    Dispatch(Action),
    /// Edit the answer, then submit it if the input allows.
    Answer(String),
    Submit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let action = match head {
        "start" => Action::Start,
        "select" => Action::SelectLevel(words.next()?.parse().ok()?),
        "type" => Action::EditInput(words.next().unwrap_or("").to_string()),
        "submit" => return Some(Command::Submit),
        "hint" => Action::ShowHint,
        "next" => Action::Advance,
        "map" => Action::ReturnToMap,
        "home" => Action::GoHome,
        "reset" => Action::ResetProgress,
        "sound" => Action::ToggleSound,
        "vibration" => Action::ToggleVibration,
        "music" => Action::ToggleMusic,
        answer => return Some(Command::Answer(answer.to_string())),
    };
    Some(Command::Dispatch(action))
}

fn submit(game: &mut Game, out: &mut impl Write) -> io::Result<()> {
    if game.state().can_submit() {
        game.dispatch(Action::Submit);
    } else if game.state().phase == Phase::Playing {
        writeln!(out, "  (enter a number first)")?;
    }
    Ok(())
}

/// Sleeps through every pending timer so delayed transitions show up on
/// their own, rendering after each one.
fn drain_timers(game: &mut Game, out: &mut impl Write) -> io::Result<()> {
    while let Some(wait) = game.next_timer_in() {
        thread::sleep(wait);
        game.advance(wait);
        render(game, out)?;
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config::data_dir();
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    let cfg = GameConfig::load_or_default(&config::config_path(&data_dir));
    let db_path = cfg.database_path(&data_dir);
    info!("Database path: {:?}", db_path);

    let store = ProgressStore::new(SqliteStore::open(&db_path)?);
    let catalog = LevelCatalog::builtin()?;
    let mut game = Engine::new(catalog, store, LogSink, cfg.settings(), cfg.pacing());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    render(&game, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "quit" {
            break;
        }
        match parse_command(&line) {
            Some(Command::Dispatch(action)) => {
                game.dispatch(action);
            }
            Some(Command::Answer(text)) => {
                game.dispatch(Action::EditInput(text));
                submit(&mut game, &mut stdout)?;
            }
            Some(Command::Submit) => submit(&mut game, &mut stdout)?,
            None => writeln!(stdout, "?")?,
        }
        render(&game, &mut stdout)?;
        drain_timers(&mut game, &mut stdout)?;
    }

    info!("Bye. Final score: {}", game.state().score);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("Starting Guess the Logic...");
    if let Err(e) = run() {
        error!("Fatal: {}", e);
        std::process::exit(1);
    }
}
