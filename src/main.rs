//! blockfall driver
//!
//! Folds a recorded script or a seeded random action stream through the
//! engine and reports the final state.

use blockfall::{Action, Script, Session, Settings, Snapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{fs, io, path::PathBuf, process};

const USAGE: &str = "usage: blockfall replay <script.json>\n       blockfall soak [steps] [seed]";

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Fold a JSON script read from `path`
fn run_replay(path: &str) -> Result<Session, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let script = Script::from_json(&json)?;
    tracing::info!(
        "Replaying {} key events over {} ms",
        script.keys.len(),
        script.duration_ms
    );

    let mut session = Session::new();
    session.replay(script.actions());
    Ok(session)
}

/// Fold `steps` random actions, restarting whenever a game ends
fn run_soak(steps: u64, seed: u64) -> Session {
    tracing::info!("Soak run: {} steps, seed {}", steps, seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = Session::new();
    let mut elapsed = 0;
    let mut games = 1u32;

    for _ in 0..steps {
        let action = if session.state().game_end {
            games += 1;
            Action::Restart
        } else {
            match rng.gen_range(0..8) {
                0 => Action::MoveLeft(-1),
                1 => Action::MoveRight(1),
                2 => Action::MoveDown(1),
                3 => Action::Rotate(1),
                4 => Action::Hold,
                _ => {
                    elapsed += 1;
                    Action::Tick(elapsed)
                }
            }
        };
        session.apply(action);
    }

    tracing::info!("Soak finished after {} games", games);
    session
}

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, default: T) -> Result<T, String> {
    match arg {
        Some(text) => text
            .parse()
            .map_err(|_| format!("Invalid number: {}", text)),
        None => Ok(default),
    }
}

fn main() -> io::Result<()> {
    let settings = Settings::load();

    // Generate run ID for the log file name
    let run_id: u32 = rand::random();
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", run_id);

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    match settings.log.filter.parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Warning: ignoring log filter {:?}: {}", settings.log.filter, e),
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting, run={:08x}, log={}",
        run_id,
        log_dir.join(&log_file).display()
    );

    if let Some(path) = Settings::settings_path() {
        if let Err(e) = settings.write_if_missing(&path) {
            tracing::warn!("Could not write default settings: {}", e);
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("replay") => match args.get(1) {
            Some(path) => run_replay(path),
            None => Err(USAGE.to_string()),
        },
        Some("soak") => parse_arg(args.get(1), settings.soak.steps).and_then(|steps| {
            parse_arg(args.get(2), settings.soak.seed).map(|seed| run_soak(steps, seed))
        }),
        _ => Err(USAGE.to_string()),
    };

    let session = match result {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let snapshot = Snapshot::from(session.state());
    if settings.output.print_board {
        println!("{}", snapshot);
    }
    if settings.output.print_json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Warning: could not serialize snapshot: {}", e),
        }
    }
    println!(
        "Applied {} actions ({} ignored after game over). Score {} | High score {} | Level {}",
        session.applied(),
        session.suppressed(),
        snapshot.score,
        snapshot.high_score,
        snapshot.level
    );

    Ok(())
}
