//! The built-in story: from the foggy glade to the throne room.

use au_mechanics::item::catalog;

use crate::choice::{Choice, Condition, Effect};
use crate::scene::Scene;
use crate::story::Story;

/// Scene every new game starts in.
pub const START: &str = "start";

/// Build the built-in story graph.
pub fn builtin() -> Story {
    Story::new(START, "ending_flee")
        .with_defeat_route(
            Condition::flag("villager_token"),
            "ending_sacrifice",
            Some("Your sacrifice seals a weakening of the shadow."),
        )
        .with_scene(
            Scene::new(
                START,
                "Awakening in the Glade",
                "You wake in a foggy glade. A crooked path leads toward a ruined village to the \
                 west and a distant spire (the Enchanted Castle) to the north.",
            )
            .with_choice(Choice::goto("Follow the path to the Abandoned Village", "village"))
            .with_choice(Choice::goto(
                "Head toward the towers of the Enchanted Castle",
                "approach_castle",
            ))
            .with_choice(
                Choice::goto("Search the glade for supplies", "glade_search")
                    .with_effect(Effect::GiveItem(catalog::tarnished_amulet())),
            ),
        )
        .with_scene(
            Scene::new(
                "glade_search",
                "Search the Glade",
                "You find a tarnished amulet and some scraps of old cloth. It might be useful.",
            )
            .with_choice(
                Choice::goto("Wear the amulet and continue to the village", "village")
                    .with_effect(Effect::flag("amulet_worn")),
            )
            .with_choice(
                Choice::goto("Pocket the amulet and head to the castle", "approach_castle")
                    .with_effect(Effect::GiveItem(catalog::hidden_map())),
            )
            .with_choice(Choice::goto("Leave the amulet and go to the village", "village")),
        )
        .with_scene(
            Scene::new(
                "village",
                "Abandoned Village",
                "Shadows move between collapsed roofs. You hear a faint cry from a cellar and \
                 see a flicker in a window.",
            )
            .with_choice(Choice::goto("Investigate the cellar noise", "cellar"))
            .with_choice(
                Choice::goto("Search the houses for supplies", "village_search")
                    .with_effect(Effect::GiveItem(catalog::rusty_blade())),
            )
            .with_choice(Choice::goto("Sneak quietly and move on to the road", "road")),
        )
        .with_scene(
            Scene::new(
                "cellar",
                "The Cellar",
                "A trapped villager begs for help. There's a pack of spectral wolves approaching.",
            )
            .with_choice(Choice::fight(
                "Defend the villager (fight wolves)",
                "wolf_spirit",
                "village_reward",
                "road",
            ))
            .with_choice(
                Choice::goto("Distract the wolves and run", "road")
                    .with_effect(Effect::flag("saved_villager")),
            )
            .with_choice(
                Choice::goto("Ignore and leave (cold choice)", "road")
                    .with_effect(Effect::flag("ignored_villager")),
            ),
        )
        .with_scene(
            Scene::new(
                "village_search",
                "Rummaging",
                "You find medicine and a torn map that points toward the Enchanted Castle's \
                 dungeons.",
            )
            .with_choice(
                Choice::goto("Keep the medicine and head to the castle", "approach_castle")
                    .with_effect(Effect::GiveItem(catalog::herbal_salve())),
            )
            .with_choice(
                Choice::goto("Trade the medicine with a villager (gain info)", "meet_guide")
                    .with_effect(Effect::flag("met_guide")),
            ),
        )
        .with_scene(
            Scene::new(
                "meet_guide",
                "The Guide",
                "An old villager pockets the medicine and sketches the castle grounds in the \
                 dirt. 'There is a way below the walls, if you know where to dig.'",
            )
            .with_choice(
                Choice::goto("Take the guide's sketch and head to the castle", "approach_castle")
                    .with_effect(Effect::GiveItem(catalog::hidden_map())),
            )
            .with_choice(Choice::goto("Thank the guide and take the road", "road")),
        )
        .with_scene(
            Scene::new(
                "road",
                "The Road",
                "A lonely road. The sky darkens as you near the castle grounds.",
            )
            .with_choice(Choice::goto("Enter the castle grounds", "castle_gate"))
            .with_choice(
                Choice::goto("Camp and rest for the night", "camp").with_effect(Effect::Heal(10)),
            ),
        )
        .with_scene(
            Scene::new(
                "approach_castle",
                "Approach the Castle",
                "A looming castle sits in a place where the air seems wrong. A spectral figure \
                 watches from the drawbridge.",
            )
            .with_choice(Choice::goto("Talk to the figure", "talk_figure"))
            .with_choice(
                Choice::goto(
                    "Sneak around to the dungeons (secret map helps)",
                    "dungeon_entrance",
                )
                .requires(Condition::item("Hidden Map")),
            )
            .with_choice(Choice::goto("Charge the gate", "gate_assault")),
        )
        .with_scene(
            Scene::new(
                "talk_figure",
                "The Watcher",
                "The watcher speaks: 'Many seek power here. Few leave. Will you bargain?'",
            )
            .with_choice(
                Choice::goto("Bargain for guidance (offer help)", "throne_influence")
                    .with_effect(Effect::flag("offered_help")),
            )
            .with_choice(Choice::goto("Refuse and move on", "castle_gate")),
        )
        .with_scene(
            Scene::new(
                "throne_influence",
                "The Watcher's Bargain",
                "The watcher's voice drops to a whisper. 'The one on the throne was a guardian \
                 once. Remind it of mercy, and it may remember.' The drawbridge lowers.",
            )
            .with_choice(Choice::goto("Cross into the main hall", "main_hall")),
        )
        .with_scene(
            Scene::new(
                "dungeon_entrance",
                "Dungeon Entrance",
                "You find a hidden trapdoor and descend into the cold corridors.",
            )
            .with_choice(Choice::goto("Descend into the dungeons (dangerous)", "dungeons"))
            .with_choice(Choice::goto("Close the trapdoor and retreat", "castle_gate")),
        )
        .with_scene(
            Scene::new(
                "gate_assault",
                "Assault on the Gate",
                "You are challenged by the bandit chief who harasses travellers.",
            )
            .with_choice(Choice::fight(
                "Fight the bandit chief",
                "bandit_chief",
                "after_bandit",
                "road",
            ))
            .with_choice(Choice::goto("Try to bribe him", "bribe_bandit")),
        )
        .with_scene(
            Scene::new(
                "bribe_bandit",
                "Bribery Attempt",
                "You offer coin. The chief laughs, either accepts or is insulted.",
            )
            .with_choice(
                Choice::goto("Pay him (if you have coin)", "castle_gate")
                    .with_effect(Effect::flag("bribed_bandit")),
            )
            .with_choice(Choice::fight(
                "He gets angry and attacks",
                "bandit_chief",
                "after_bandit",
                "road",
            )),
        )
        .with_scene(
            Scene::new(
                "castle_gate",
                "Castle Gate",
                "The gate groans open. Shadows ripple beneath the stone floors.",
            )
            .with_choice(Choice::goto("Enter the main hall", "main_hall"))
            .with_choice(Choice::goto("Explore the garden ruins", "garden")),
        )
        .with_scene(
            Scene::new(
                "garden",
                "Garden Ruins",
                "Dead roses climb a cracked fountain. Between the thorns, a few pale herbs \
                 still grow.",
            )
            .with_choice(
                Choice::goto("Gather the herbs and enter the main hall", "main_hall")
                    .with_effect(Effect::GiveItem(catalog::herbal_salve())),
            )
            .with_choice(Choice::goto("Return to the gate", "castle_gate")),
        )
        .with_scene(
            Scene::new("camp", "Night Camp", "You rest and regain some strength.")
                .with_choice(Choice::goto("Continue toward the castle", "castle_gate")),
        )
        .with_scene(
            Scene::new(
                "dungeons",
                "The Dungeons",
                "A dank subterranean place. You feel the presence of nightmares. A monstrous \
                 nightmarish minion prowls the halls.",
            )
            .with_choice(Choice::fight(
                "Fight a nightmarish minion",
                "nightmare_minion",
                "dungeon_loot",
                "dungeon_entrance",
            ))
            .with_choice(Choice::goto("Search for an alternate path", "secret_passage")),
        )
        .with_scene(
            Scene::new(
                "secret_passage",
                "Secret Passage",
                "A narrow tunnel winds upward. Scratches on the wall match the marks on a \
                 bandit's map.",
            )
            .with_choice(
                Choice::goto("Follow the scratches to a hidden niche", "main_hall")
                    .requires(Condition::item("Dungeon Map"))
                    .with_effect(Effect::flag("night_shard")),
            )
            .with_choice(Choice::goto("Climb toward the main hall", "main_hall")),
        )
        .with_scene(
            Scene::new(
                "main_hall",
                "Main Hall",
                "Tapestries show a long history of pain and bargains. A doorway leads to the \
                 throne room.",
            )
            .with_choice(Choice::goto("Go to the throne room", "throne_room"))
            .with_choice(Choice::goto("Look for allies in the servants' wing", "servant_wing")),
        )
        .with_scene(
            Scene::new(
                "throne_room",
                "Throne Room",
                "A shadow sits upon the throne, ancient and patient. The final decision awaits.",
            )
            .with_choice(Choice::fight(
                "Challenge the shadow",
                "throne_shadow",
                "ending_victory",
                "main_hall",
            ))
            .with_choice(Choice::goto(
                "Attempt to negotiate (requires flags)",
                "final_negotiate",
            ))
            .with_choice(Choice::goto("Walk away quietly (flee ending)", "ending_flee")),
        )
        .with_scene(
            Scene::new(
                "final_negotiate",
                "Final Negotiation",
                "You attempt to parley with the shadow. Results depend on choices and flags \
                 you collected.",
            )
            .with_choice(
                Choice::goto(
                    "Offer to help heal the realm (if you saved the villager)",
                    "ending_peace",
                )
                .requires(Condition::flag("saved_villager")),
            )
            .with_choice(
                Choice::goto(
                    "Perform the servant's ritual with the night shard",
                    "ending_peace",
                )
                .requires(Condition::And(vec![
                    Condition::flag("learned_ritual"),
                    Condition::flag("night_shard"),
                ])),
            )
            .with_choice(Choice::fight(
                "Demand the shadow's power",
                "throne_shadow",
                "ending_victory",
                "main_hall",
            )),
        )
        .with_scene(
            Scene::new(
                "village_reward",
                "After the Wolves",
                "You are praised in whispers; the grateful villager offers a token of trust.",
            )
            .with_choice(
                Choice::goto("Take the token (later matters)", "road")
                    .with_effect(Effect::flag("villager_token")),
            ),
        )
        .with_scene(
            Scene::new(
                "after_bandit",
                "After the Bandit",
                "Bandits scatter. You find a map with a circled dungeon entrance.",
            )
            .with_choice(
                Choice::goto("Follow the map to the dungeons", "dungeons")
                    .with_effect(Effect::GiveItem(catalog::dungeon_map())),
            ),
        )
        .with_scene(
            Scene::new(
                "dungeon_loot",
                "Dungeon Loot",
                "You find a shard of night glass that hums with power.",
            )
            .with_choice(
                Choice::goto("Keep the shard", "main_hall").with_effect(Effect::flag("night_shard")),
            ),
        )
        .with_scene(
            Scene::new(
                "servant_wing",
                "Servant Wing",
                "You find a weary servant who remembers a ritual to soften the shadow.",
            )
            .with_choice(
                Choice::goto("Learn the ritual (gain knowledge)", "main_hall")
                    .with_effect(Effect::flag("learned_ritual")),
            ),
        )
        .with_scene(Scene::new(
            "ending_peace",
            "Peaceful Resolution",
            "Your compassion and choices healed part of the darkness. The realm breathes easier.",
        ))
        .with_scene(Scene::new(
            "ending_victory",
            "Victory",
            "You defeated the shadow with steel and cunning, but at a cost. Power unbalanced \
             remains.",
        ))
        .with_scene(Scene::new(
            "ending_flee",
            "Fleeing Life",
            "You walked away from the conflict and lived in the shadows. Safe, but heavy with \
             regret.",
        ))
        .with_scene(Scene::new(
            "ending_sacrifice",
            "Sacrifice",
            "You sacrificed yourself to seal the shadow, a quiet hero in the night.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Transition;

    #[test]
    fn builtin_story_is_valid() {
        builtin().validate().unwrap();
    }

    #[test]
    fn four_endings() {
        let story = builtin();
        let endings: Vec<_> = story
            .scenes()
            .filter(|s| s.is_ending())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(
            endings,
            vec![
                "ending_flee",
                "ending_peace",
                "ending_sacrifice",
                "ending_victory"
            ]
        );
    }

    #[test]
    fn every_scene_is_reachable() {
        let story = builtin();
        let mut seen = std::collections::BTreeSet::new();
        let mut queue = vec![story.start().to_string()];
        while let Some(id) = queue.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            for choice in &story.scene(&id).unwrap().choices {
                queue.extend(choice.targets().into_iter().map(str::to_string));
            }
        }
        seen.insert("ending_sacrifice".to_string());
        assert_eq!(seen.len(), story.scenes().count());
    }

    #[test]
    fn throne_fight_wins_to_victory() {
        let story = builtin();
        let throne = story.scene("throne_room").unwrap();
        assert_eq!(
            throne.choices[0].transition,
            Transition::Fight {
                enemy: "throne_shadow".into(),
                victory: "ending_victory".into(),
                retreat: "main_hall".into(),
            }
        );
    }
}
