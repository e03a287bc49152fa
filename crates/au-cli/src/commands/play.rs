use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use au_story::{GameConfig, GameSession, Phase};

pub fn run(save: &Path, seed: Option<u64>, rules: Option<&Path>, resume: bool) -> Result<(), String> {
    let rules = super::load_rules(rules)?;
    let mut config = GameConfig::default()
        .with_save_path(save)
        .with_rules(rules);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut session =
        GameSession::new(config).map_err(|e| format!("failed to start game: {e}"))?;

    println!("{}", "=== AU RPG (Text Edition) ===".bold());
    println!("  Seed: {} | Save: {}\n", session.seed(), save.display());
    if resume {
        let opening = session.continue_game().map_err(|e| e.to_string())?;
        println!("{opening}\n");
    } else {
        println!("{}\n", session.screen());
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut buf = Vec::new();

    while !session.is_finished() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                println!();
                println!("{}", session.end_of_input());
                break;
            }
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        // Undecodable bytes become U+FFFD and fall through as an unknown command.
        let line = String::from_utf8_lossy(&buf);
        match session.process(&line) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if session.phase() == Phase::Combat {
                    if let Some(state) = session.state() {
                        println!("  HP {}\n", super::hp_bar(&state.character.hp));
                    }
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
