//! Interactive play session.
//!
//! `GameSession` owns the story, the save file, the RNG, and (once a game is
//! running) the [`SaveState`]. Each line of player input goes through
//! [`GameSession::process`], which returns the text to show next. Rejected
//! input comes back as an error and leaves the state untouched.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strsim::jaro_winkler;

use au_mechanics::combat::{CombatAction, CombatOutcome, Encounter};
use au_mechanics::{Character, CombatRules, Enemy, roster, usage};

use crate::choice::Transition;
use crate::config::GameConfig;
use crate::content;
use crate::error::{SaveError, StoryError, StoryResult};
use crate::flags::FlagValue;
use crate::save::{SaveFile, SaveState};
use crate::scene::Scene;
use crate::story::Story;

/// Flag recording which ending was reached.
pub const ENDING_FLAG: &str = "ending";

/// Minimum similarity for a "did you mean" suggestion.
const SUGGEST_THRESHOLD: f64 = 0.8;

const STORY_COMMANDS: &[&str] = &["inventory", "use", "character", "save", "exit", "quit", "help"];
const COMBAT_COMMANDS: &[&str] = &["attack", "magic", "item", "use", "focus", "flee"];

const STORY_FOOTER: &str =
    "I. Inventory | U <n>. Use item | C. Character | S. Save | X. Save & exit | Q. Quit";
const COMBAT_MENU: &str = "1) Attack   2) Magic   3) Use Item   4) Focus   F) Flee";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start menu: new, load, or quit.
    Title,
    /// Picking a character from the roster.
    CharacterSelect,
    /// Reading a scene and picking a choice.
    Story,
    /// Fighting.
    Combat,
    /// Asked whether to save before quitting.
    ConfirmQuit,
    /// An ending has been reached.
    Ending,
    /// The session is over.
    Exited {
        /// Whether the state was written on the way out.
        saved: bool,
    },
}

#[derive(Debug, Clone)]
struct PendingFight {
    victory: String,
    retreat: String,
}

/// An interactive playthrough.
pub struct GameSession {
    story: Story,
    rules: CombatRules,
    save_file: SaveFile,
    seed: u64,
    rng: StdRng,
    phase: Phase,
    state: Option<SaveState>,
    encounter: Option<Encounter>,
    fight: Option<PendingFight>,
}

impl GameSession {
    /// Create a session over the built-in story.
    pub fn new(config: GameConfig) -> StoryResult<Self> {
        Self::with_story(content::builtin(), config)
    }

    /// Create a session over a custom story.
    pub fn with_story(story: Story, config: GameConfig) -> StoryResult<Self> {
        story.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, save = %config.save_path.display(), "session created");
        Ok(Self {
            story,
            rules: config.rules,
            save_file: SaveFile::new(config.save_path),
            seed,
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::Title,
            state: None,
            encounter: None,
            fight: None,
        })
    }

    /// The seed this session's RNG started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The running game, if any.
    pub fn state(&self) -> Option<&SaveState> {
        self.state.as_ref()
    }

    /// The fight in progress, if any.
    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// The save file this session reads and writes.
    pub fn save_file(&self) -> &SaveFile {
        &self.save_file
    }

    /// Whether the session has ended.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Exited { .. })
    }

    /// Text describing the current phase and what can be entered.
    pub fn screen(&self) -> String {
        match self.phase {
            Phase::Title => "Start Menu: (N)ew game, (L)oad game, (Q)uit".to_string(),
            Phase::CharacterSelect => {
                let mut out = String::from("CHARACTER SELECTION\n-------------------");
                for (i, t) in roster::TEMPLATES.iter().enumerate() {
                    out.push_str(&format!(
                        "\n{}. {} - {} ({})",
                        i + 1,
                        t.display_name,
                        t.description,
                        t.stats
                    ));
                }
                out.push_str("\nChoose your character (number).");
                out
            }
            Phase::Story => self
                .current_scene()
                .map(|s| format!("{}\n\n{STORY_FOOTER}", s.render()))
                .unwrap_or_default(),
            Phase::Combat => self.combat_status(),
            Phase::ConfirmQuit => "Save before quitting? (Y)es / (N)o / (C)ancel".to_string(),
            Phase::Ending => self
                .current_scene()
                .map(|s| format!("{}\n\n(S)ave, (N)ew game, (Q)uit", s.render()))
                .unwrap_or_default(),
            Phase::Exited { .. } => String::new(),
        }
    }

    /// Process a line of player input and return the response.
    pub fn process(&mut self, input: &str) -> StoryResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        let lower = trimmed.to_lowercase();
        let mut parts = lower.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();

        match self.phase {
            Phase::Title => self.title_input(cmd),
            Phase::CharacterSelect => self.select_input(cmd),
            Phase::Story => self.story_input(cmd, arg),
            Phase::Combat => self.combat_input(cmd, arg),
            Phase::ConfirmQuit => self.confirm_quit_input(cmd),
            Phase::Ending => self.ending_input(cmd),
            Phase::Exited { .. } => Err(StoryError::Finished),
        }
    }

    /// Load the save file, or fall back to character selection if it is
    /// missing or unreadable.
    pub fn continue_game(&mut self) -> StoryResult<String> {
        match self.save_file.load(&self.story) {
            Ok(state) => {
                let greeting = format!("Game loaded. Welcome back, {}!", state.character.name);
                let scene = state.scene.clone();
                self.state = Some(state);
                self.encounter = None;
                self.fight = None;
                let screen = self.arrive(&scene)?;
                Ok(format!("{greeting}\n\n{screen}"))
            }
            Err(SaveError::NotFound(path)) => {
                tracing::info!(path = %path.display(), "no save file, starting a new game");
                self.phase = Phase::CharacterSelect;
                Ok(format!(
                    "No save file found. Starting a new game.\n\n{}",
                    self.screen()
                ))
            }
            Err(e) => {
                tracing::warn!(error = %e, "save file unusable, starting a new game");
                self.phase = Phase::CharacterSelect;
                Ok(format!(
                    "Could not load save: {e}\nStarting a new game.\n\n{}",
                    self.screen()
                ))
            }
        }
    }

    /// End the session because input ran out. Nothing is saved.
    pub fn end_of_input(&mut self) -> String {
        if !self.is_finished() {
            tracing::info!(phase = ?self.phase, "input closed, leaving without saving");
            self.phase = Phase::Exited { saved: false };
        }
        "Goodbye.".to_string()
    }

    fn title_input(&mut self, cmd: &str) -> StoryResult<String> {
        match cmd {
            "n" | "new" => {
                self.phase = Phase::CharacterSelect;
                Ok(self.screen())
            }
            "l" | "load" => self.continue_game(),
            "q" | "quit" => {
                self.phase = Phase::Exited { saved: false };
                Ok("Goodbye.".to_string())
            }
            _ => Err(unknown(cmd, &["new", "load", "quit"])),
        }
    }

    fn select_input(&mut self, cmd: &str) -> StoryResult<String> {
        let template = cmd
            .parse::<usize>()
            .ok()
            .and_then(roster::by_number)
            .ok_or_else(|| {
                StoryError::InvalidChoice(format!(
                    "enter a number from 1 to {}",
                    roster::TEMPLATES.len()
                ))
            })?;
        let character = Character::from_template(template, &self.rules);
        let greeting = format!(
            "You chose {}. HP: {}. Good luck!",
            character.name, character.hp.current
        );
        tracing::info!(template = template.key, "new game started");
        self.state = Some(SaveState::new_game(character, self.story.start()));
        let start = self.story.start().to_string();
        let screen = self.arrive(&start)?;
        Ok(format!("{greeting}\n\n{screen}"))
    }

    fn story_input(&mut self, cmd: &str, arg: Option<&str>) -> StoryResult<String> {
        if let Ok(number) = cmd.parse::<usize>() {
            return self.take_choice(number);
        }
        match cmd {
            "i" | "inventory" => Ok(self.game()?.inventory.listing()),
            "u" | "use" => {
                let slot = parse_slot(arg)?;
                let state = self.state.as_mut().ok_or(StoryError::NoGame)?;
                let used =
                    usage::use_out_of_combat(&mut state.character, &mut state.inventory, slot)?;
                Ok(used.to_string())
            }
            "c" | "character" | "sheet" => Ok(self.game()?.character.sheet()),
            "s" | "save" => self.save(),
            "x" | "exit" => {
                let saved = self.save()?;
                self.phase = Phase::Exited { saved: true };
                Ok(format!("{saved} Goodbye."))
            }
            "q" | "quit" => {
                self.phase = Phase::ConfirmQuit;
                Ok(self.screen())
            }
            "h" | "help" | "?" => Ok(format!(
                "Enter the number of a choice, or a command:\n{STORY_FOOTER}"
            )),
            _ => Err(unknown(cmd, STORY_COMMANDS)),
        }
    }

    fn take_choice(&mut self, number: usize) -> StoryResult<String> {
        let state = self.state.as_mut().ok_or(StoryError::NoGame)?;
        let scene = self.story.scene(&state.scene)?;
        let choice = scene
            .choice(number)
            .ok_or_else(|| StoryError::InvalidChoice(format!("{number} is not on the list")))?
            .clone();
        if !choice.requires.evaluate(&state.flags, &state.inventory) {
            return Err(StoryError::ConditionNotMet);
        }
        tracing::debug!(scene = %state.scene, choice = number, "choice taken");

        let mut lines: Vec<String> = choice
            .effects
            .iter()
            .filter_map(|effect| effect.apply(state))
            .collect();
        let next = match choice.transition {
            Transition::Goto(scene) => self.arrive(&scene)?,
            Transition::Fight {
                enemy,
                victory,
                retreat,
            } => self.start_fight(&enemy, victory, retreat)?,
        };
        lines.push(next);
        Ok(lines.join("\n\n"))
    }

    fn start_fight(
        &mut self,
        enemy_key: &str,
        victory: String,
        retreat: String,
    ) -> StoryResult<String> {
        let power = self.game()?.character.stats.power();
        let enemy = Enemy::spawn(enemy_key, power, &self.rules);
        let banner = format!(
            "--- COMBAT START: {} appears! ---\nHint: use items with 'U 1', or press 'F' to attempt to flee.",
            enemy.name
        );
        self.encounter = Some(Encounter::new(enemy));
        self.fight = Some(PendingFight { victory, retreat });
        self.phase = Phase::Combat;
        Ok(format!("{banner}\n\n{}", self.screen()))
    }

    fn combat_input(&mut self, cmd: &str, arg: Option<&str>) -> StoryResult<String> {
        let action = match (cmd, arg) {
            ("1" | "a" | "attack", _) => CombatAction::Attack,
            ("2" | "m" | "magic", _) => CombatAction::Magic,
            ("3" | "u" | "use" | "item", None) => {
                let listing = self.game()?.inventory.listing();
                return Ok(format!("{listing}\nUse an item with 'U <number>'."));
            }
            ("3" | "u" | "use" | "item", slot) => CombatAction::UseItem(parse_slot(slot)?),
            ("4" | "focus", _) => CombatAction::Focus,
            ("f" | "flee", _) => CombatAction::Flee,
            ("s" | "save" | "x" | "exit", _) => {
                return Err(StoryError::NotAvailable("saving during a fight".to_string()));
            }
            _ => return Err(unknown(cmd, COMBAT_COMMANDS)),
        };

        let state = self.state.as_mut().ok_or(StoryError::NoGame)?;
        let encounter = self.encounter.as_mut().ok_or(StoryError::NoGame)?;
        let report = encounter.take_turn(
            &mut state.character,
            &mut state.inventory,
            action,
            &self.rules,
            &mut self.rng,
        )?;

        let narration = report.narration();
        let next = match report.outcome {
            None => self.screen(),
            Some(outcome) => self.finish_fight(outcome)?,
        };
        Ok(format!("{narration}\n\n{next}"))
    }

    fn finish_fight(&mut self, outcome: CombatOutcome) -> StoryResult<String> {
        self.encounter = None;
        let fight = self.fight.take().ok_or(StoryError::NoGame)?;
        match outcome {
            CombatOutcome::Victory => self.arrive(&fight.victory),
            CombatOutcome::Retreat => self.arrive(&fight.retreat),
            CombatOutcome::Defeat => {
                let state = self.game()?;
                let (ending, narration) = self.story.defeat_ending(&state.flags, &state.inventory);
                let ending = ending.to_string();
                let narration = narration.map(str::to_string);
                let screen = self.arrive(&ending)?;
                Ok(match narration {
                    Some(line) => format!("{line}\n\n{screen}"),
                    None => screen,
                })
            }
        }
    }

    fn confirm_quit_input(&mut self, cmd: &str) -> StoryResult<String> {
        match cmd {
            "y" | "yes" => {
                let saved = self.save()?;
                self.phase = Phase::Exited { saved: true };
                Ok(format!("{saved} Goodbye."))
            }
            "n" | "no" => {
                tracing::info!("quit without saving");
                self.phase = Phase::Exited { saved: false };
                Ok("Goodbye.".to_string())
            }
            "c" | "cancel" => {
                self.phase = Phase::Story;
                Ok(self.screen())
            }
            _ => Err(unknown(cmd, &["yes", "no", "cancel"])),
        }
    }

    fn ending_input(&mut self, cmd: &str) -> StoryResult<String> {
        match cmd {
            "s" | "save" => self.save(),
            "n" | "new" => {
                tracing::info!("new game requested after ending");
                self.state = None;
                self.phase = Phase::CharacterSelect;
                Ok(self.screen())
            }
            "q" | "quit" => {
                self.phase = Phase::Exited { saved: false };
                Ok("Farewell.".to_string())
            }
            _ => Err(unknown(cmd, &["save", "new", "quit"])),
        }
    }

    /// Move to a scene and switch to the matching phase.
    fn arrive(&mut self, id: &str) -> StoryResult<String> {
        let scene = self.story.scene(id)?;
        let state = self.state.as_mut().ok_or(StoryError::NoGame)?;
        state.scene = id.to_string();
        if scene.is_ending() {
            state
                .flags
                .set(ENDING_FLAG, FlagValue::Text(id.to_string()));
            tracing::info!(ending = id, "ending reached");
            self.phase = Phase::Ending;
        } else {
            tracing::debug!(scene = id, "entered scene");
            self.phase = Phase::Story;
        }
        Ok(self.screen())
    }

    fn save(&self) -> StoryResult<String> {
        let state = self.game()?;
        if let Err(e) = self.save_file.save(state) {
            tracing::warn!(error = %e, "save failed");
            return Err(e.into());
        }
        Ok(format!(
            "Game saved to {}.",
            self.save_file.path().display()
        ))
    }

    fn game(&self) -> StoryResult<&SaveState> {
        self.state.as_ref().ok_or(StoryError::NoGame)
    }

    fn current_scene(&self) -> Option<&Scene> {
        let state = self.state.as_ref()?;
        self.story.scene(&state.scene).ok()
    }

    fn combat_status(&self) -> String {
        let (Some(state), Some(encounter)) = (&self.state, &self.encounter) else {
            return String::new();
        };
        let mut out = format!(
            "Your HP: {} | {} HP: {}",
            state.character.hp, encounter.enemy.name, encounter.enemy.hp
        );
        let labels = encounter.status.labels();
        if !labels.is_empty() {
            out.push_str(&format!("\nStatus: {}", labels.join(", ")));
        }
        out.push('\n');
        out.push_str(COMBAT_MENU);
        out
    }
}

fn parse_slot(arg: Option<&str>) -> StoryResult<usize> {
    let raw = arg.ok_or_else(|| StoryError::InvalidChoice("usage: U <number>".to_string()))?;
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| StoryError::InvalidChoice(format!("'{raw}' is not an item number")))
}

fn unknown(input: &str, known: &[&str]) -> StoryError {
    let suggestion = known
        .iter()
        .map(|k| (*k, jaro_winkler(input, k)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k.to_string());
    StoryError::UnknownCommand {
        input: input.to_string(),
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use au_mechanics::MechError;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir, rules: CombatRules) -> GameSession {
        let config = GameConfig::default()
            .with_seed(42)
            .with_save_path(dir.path().join("savegame.json"))
            .with_rules(rules);
        GameSession::new(config).unwrap()
    }

    fn started(dir: &TempDir) -> GameSession {
        let mut s = session_in(dir, CombatRules::default());
        s.process("n").unwrap();
        s.process("1").unwrap();
        s
    }

    fn scene_of(s: &GameSession) -> &str {
        &s.state().unwrap().scene
    }

    /// Player always lands a killing blow.
    fn one_hit_rules() -> CombatRules {
        CombatRules {
            physical_hit_target: -100,
            min_damage: 1000,
            ..CombatRules::default()
        }
    }

    /// Player always misses; every enemy hit is lethal.
    fn doomed_rules() -> CombatRules {
        CombatRules {
            physical_hit_target: 100,
            enemy_hit_target: -100,
            min_damage: 1000,
            ..CombatRules::default()
        }
    }

    #[test]
    fn starts_at_title_menu() {
        let dir = tempfile::tempdir().unwrap();
        let s = session_in(&dir, CombatRules::default());
        assert!(s.screen().contains("(N)ew game, (L)oad game, (Q)uit"));
        assert_eq!(s.phase(), Phase::Title);
        assert_eq!(s.seed(), 42);
    }

    #[test]
    fn new_game_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session_in(&dir, CombatRules::default());
        let roster = s.process("N").unwrap();
        assert!(roster.contains("1. Sans"));
        assert!(roster.contains("8. Nightmare Sans"));

        let out = s.process("1").unwrap();
        assert!(out.contains("You chose Sans. HP: 81. Good luck!"));
        assert!(out.contains("== Awakening in the Glade =="));
        assert_eq!(s.phase(), Phase::Story);
        assert_eq!(scene_of(&s), "start");
    }

    #[test]
    fn bad_character_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session_in(&dir, CombatRules::default());
        s.process("n").unwrap();
        assert!(matches!(s.process("9"), Err(StoryError::InvalidChoice(_))));
        assert!(matches!(s.process("zero"), Err(StoryError::InvalidChoice(_))));
        assert_eq!(s.phase(), Phase::CharacterSelect);
        assert!(s.state().is_none());
    }

    #[test]
    fn invalid_choice_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        let before = s.state().unwrap().clone();
        assert!(matches!(s.process("7"), Err(StoryError::InvalidChoice(_))));
        assert!(matches!(s.process("0"), Err(StoryError::InvalidChoice(_))));
        assert_eq!(s.state().unwrap(), &before);
    }

    #[test]
    fn unmet_requirement_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        s.process("2").unwrap();
        assert_eq!(scene_of(&s), "approach_castle");
        let before = s.state().unwrap().clone();
        let err = s.process("2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "You do not have the required condition to take that action."
        );
        assert_eq!(s.state().unwrap(), &before);
    }

    #[test]
    fn effects_then_requirement() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        let out = s.process("3").unwrap();
        assert!(out.contains("You obtained: Tarnished Amulet"));
        s.process("2").unwrap();
        assert!(s.state().unwrap().inventory.contains("Hidden Map"));
        assert_eq!(scene_of(&s), "approach_castle");
        s.process("2").unwrap();
        assert_eq!(scene_of(&s), "dungeon_entrance");
    }

    #[test]
    fn flags_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        s.process("1").unwrap();
        s.process("1").unwrap();
        let out = s.process("2").unwrap();
        assert!(out.contains("(Flag gained: saved_villager)"));
        assert!(s.state().unwrap().flags.is_set("saved_villager"));
        assert_eq!(scene_of(&s), "road");
    }

    #[test]
    fn items_outside_combat() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        let out = s.process("u 1").unwrap();
        assert_eq!(out, "You used Small Potion: HP 81 -> 81.");
        // Smoke Bomb is now slot 1
        let err = s.process("u 1").unwrap_err();
        assert!(matches!(
            err,
            StoryError::Mechanics(MechError::ItemNotUsable { .. })
        ));
        assert!(s.state().unwrap().inventory.contains("Smoke Bomb"));
        assert!(matches!(s.process("u"), Err(StoryError::InvalidChoice(_))));
        assert!(matches!(s.process("u 9"), Err(StoryError::Mechanics(_))));
    }

    #[test]
    fn inventory_and_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        let inv = s.process("i").unwrap();
        assert!(inv.contains("1. Small Potion"));
        assert!(inv.contains("3. Battle Tonic"));
        let sheet = s.process("c").unwrap();
        assert!(sheet.contains("HP: 81/81"));
    }

    #[test]
    fn unknown_command_suggests() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        let err = s.process("inventroy").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown command: inventroy (did you mean 'inventory'?)"
        );
        let err = s.process("zzz").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: zzz");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        s.process("1").unwrap();
        let out = s.process("s").unwrap();
        assert!(out.starts_with("Game saved to "));
        assert!(s.save_file().exists());

        let mut fresh = session_in(&dir, CombatRules::default());
        let out = fresh.process("l").unwrap();
        assert!(out.contains("Game loaded. Welcome back, Sans!"));
        assert!(out.contains("== Abandoned Village =="));
        assert_eq!(fresh.phase(), Phase::Story);
        assert_eq!(fresh.state(), s.state());
    }

    #[test]
    fn missing_save_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session_in(&dir, CombatRules::default());
        let out = s.process("l").unwrap();
        assert!(out.contains("No save file found"));
        assert_eq!(s.phase(), Phase::CharacterSelect);
    }

    #[test]
    fn corrupt_save_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("savegame.json"), "{\"hp\": \"lots\"}").unwrap();
        let mut s = session_in(&dir, CombatRules::default());
        let out = s.continue_game().unwrap();
        assert!(out.contains("Could not load save"));
        assert!(out.contains("CHARACTER SELECTION"));
        assert_eq!(s.phase(), Phase::CharacterSelect);
        assert!(s.state().is_none());
    }

    #[test]
    fn overflowing_stats_start_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SaveState::sample();
        state.character.stats.attack = i32::MAX;
        std::fs::write(dir.path().join("savegame.json"), state.to_json().unwrap()).unwrap();
        let mut s = session_in(&dir, CombatRules::default());
        let out = s.continue_game().unwrap();
        assert!(out.contains("attack 2147483647 is outside 0..=999"));
        assert_eq!(s.phase(), Phase::CharacterSelect);
        assert!(s.state().is_none());
    }

    #[test]
    fn quit_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        assert!(s.process("q").unwrap().contains("Save before quitting?"));
        s.process("c").unwrap();
        assert_eq!(s.phase(), Phase::Story);

        s.process("q").unwrap();
        s.process("n").unwrap();
        assert_eq!(s.phase(), Phase::Exited { saved: false });
        assert!(!s.save_file().exists());
        assert!(matches!(s.process("1"), Err(StoryError::Finished)));
    }

    #[test]
    fn quit_with_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        s.process("q").unwrap();
        let out = s.process("y").unwrap();
        assert!(out.ends_with("Goodbye."));
        assert_eq!(s.phase(), Phase::Exited { saved: true });
        assert!(s.save_file().exists());
    }

    #[test]
    fn save_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        s.process("x").unwrap();
        assert!(s.is_finished());
        assert!(s.save_file().exists());
    }

    #[test]
    fn failed_save_keeps_playing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = GameConfig::default()
            .with_seed(1)
            .with_save_path(blocker.join("savegame.json"));
        let mut s = GameSession::new(config).unwrap();
        s.process("n").unwrap();
        s.process("1").unwrap();
        assert!(matches!(s.process("s"), Err(StoryError::Save(_))));
        assert!(matches!(s.process("x"), Err(StoryError::Save(_))));
        assert_eq!(s.phase(), Phase::Story);
        s.process("1").unwrap();
        assert_eq!(scene_of(&s), "village");
    }

    #[test]
    fn walking_away_reaches_an_ending() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        for input in ["1", "3", "1", "1", "1", "3"] {
            s.process(input).unwrap();
        }
        assert_eq!(s.phase(), Phase::Ending);
        let state = s.state().unwrap();
        assert_eq!(state.scene, "ending_flee");
        assert_eq!(
            state.flags.get(ENDING_FLAG),
            Some(&FlagValue::Text("ending_flee".into()))
        );
        assert!(s.screen().contains("*** ENDING: Fleeing Life ***"));

        s.process("n").unwrap();
        assert_eq!(s.phase(), Phase::CharacterSelect);
        assert!(s.state().is_none());
    }

    #[test]
    fn ending_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        for input in ["1", "3", "1", "1", "1", "3"] {
            s.process(input).unwrap();
        }
        assert!(s.process("s").unwrap().starts_with("Game saved"));
        assert_eq!(s.process("q").unwrap(), "Farewell.");
        assert!(s.is_finished());
    }

    #[test]
    fn winning_a_fight_moves_on() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session_in(&dir, one_hit_rules());
        s.process("n").unwrap();
        s.process("1").unwrap();
        s.process("1").unwrap();
        s.process("1").unwrap();
        let out = s.process("1").unwrap();
        assert!(out.contains("COMBAT START: Wolf Spirit appears!"));
        assert_eq!(s.phase(), Phase::Combat);
        assert!(matches!(s.process("s"), Err(StoryError::NotAvailable(_))));

        let out = s.process("1").unwrap();
        assert!(out.contains("You defeated Wolf Spirit!"));
        assert!(out.contains("== After the Wolves =="));
        assert_eq!(s.phase(), Phase::Story);
        assert!(s.encounter().is_none());
    }

    #[test]
    fn smoke_bomb_retreats() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        for input in ["1", "1", "1"] {
            s.process(input).unwrap();
        }
        let listing = s.process("3").unwrap();
        assert!(listing.contains("2. Smoke Bomb"));
        assert_eq!(s.encounter().unwrap().round(), 0);

        let out = s.process("u 2").unwrap();
        assert!(out.contains("Smoke Bomb"));
        assert_eq!(scene_of(&s), "road");
        assert!(!s.state().unwrap().inventory.contains("Smoke Bomb"));
    }

    #[test]
    fn bad_combat_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        for input in ["1", "1", "1"] {
            s.process(input).unwrap();
        }
        assert!(matches!(
            s.process("dance"),
            Err(StoryError::UnknownCommand { .. })
        ));
        assert!(matches!(s.process("u x"), Err(StoryError::InvalidChoice(_))));
        assert!(matches!(s.process("3 9"), Err(StoryError::Mechanics(_))));
        assert_eq!(s.encounter().unwrap().round(), 0);
    }

    #[test]
    fn losing_without_token_flees() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session_in(&dir, doomed_rules());
        s.process("n").unwrap();
        s.process("1").unwrap();
        for input in ["1", "1", "1"] {
            s.process(input).unwrap();
        }
        for _ in 0..100 {
            if s.phase() != Phase::Combat {
                break;
            }
            s.process("1").unwrap();
        }
        assert_eq!(s.phase(), Phase::Ending);
        assert_eq!(scene_of(&s), "ending_flee");
        assert_eq!(s.state().unwrap().character.hp.current, 0);
    }

    #[test]
    fn losing_with_token_is_a_sacrifice() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SaveState::sample();
        state.flags.set("villager_token", true);
        state.scene = "throne_room".into();
        SaveFile::new(dir.path().join("savegame.json"))
            .save(&state)
            .unwrap();

        let mut s = session_in(&dir, doomed_rules());
        s.continue_game().unwrap();
        s.process("1").unwrap();
        let out = s.process("1").unwrap();
        assert!(out.contains("You have been defeated..."));
        assert!(out.contains("Your sacrifice seals a weakening of the shadow."));
        assert_eq!(scene_of(&s), "ending_sacrifice");
    }

    #[test]
    fn same_seed_same_story() {
        let play = || {
            let dir = tempfile::tempdir().unwrap();
            let mut s = started(&dir);
            let mut transcript = Vec::new();
            for input in ["1", "1", "1", "1", "2", "4", "1", "1", "2", "1"] {
                transcript.push(s.process(input).map_err(|e| e.to_string()));
            }
            transcript
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn end_of_input_exits_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        assert_eq!(s.end_of_input(), "Goodbye.");
        assert_eq!(s.phase(), Phase::Exited { saved: false });
        assert!(!s.save_file().exists());
    }

    #[test]
    fn empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = started(&dir);
        assert_eq!(s.process("   ").unwrap(), "");
    }
}
