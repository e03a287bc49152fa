pub mod inspect;
pub mod play;
pub mod roster;

use std::path::Path;

use au_mechanics::{CombatRules, HitPoints};
use colored::Colorize;

/// Load combat rules from a file, or use the defaults.
fn load_rules(path: Option<&Path>) -> Result<CombatRules, String> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading combat rules");
            CombatRules::from_file(path).map_err(|e| e.to_string())
        }
        None => Ok(CombatRules::default()),
    }
}

/// A ten-cell HP bar colored by how full it is.
fn hp_bar(hp: &HitPoints) -> String {
    const WIDTH: usize = 10;
    let filled = (hp.fraction() * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled));
    let bar = if hp.fraction() > 0.5 {
        bar.green()
    } else if hp.fraction() > 0.25 {
        bar.yellow()
    } else {
        bar.red()
    };
    format!("[{bar}] {hp}")
}
