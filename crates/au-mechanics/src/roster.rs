//! The playable AU character variants.

use crate::character::CharacterTemplate;
use crate::stats::Stats;

/// Every template offered at character selection, in menu order.
pub static TEMPLATES: [CharacterTemplate; 8] = [
    CharacterTemplate {
        key: "sans",
        display_name: "Sans",
        description: "Laid-back skeleton. High agility and magic.",
        stats: Stats {
            attack: 6,
            defense: 3,
            agility: 10,
            magic: 9,
        },
    },
    CharacterTemplate {
        key: "underswap_pap",
        display_name: "Underswap! Papyrus",
        description: "Friendly and balanced fighter.",
        stats: Stats {
            attack: 9,
            defense: 5,
            agility: 8,
            magic: 5,
        },
    },
    CharacterTemplate {
        key: "storyshift_chara",
        display_name: "StoryShift! Chara",
        description: "Tricksy tactician, high magic and agility.",
        stats: Stats {
            attack: 5,
            defense: 2,
            agility: 11,
            magic: 10,
        },
    },
    CharacterTemplate {
        key: "storyfell_chara",
        display_name: "StoryFell! Chara",
        description: "Aggressive powerhouse.",
        stats: Stats {
            attack: 12,
            defense: 4,
            agility: 7,
            magic: 4,
        },
    },
    CharacterTemplate {
        key: "dustfell_sans",
        display_name: "DustFell! Sans",
        description: "Survivalist with brutal moves.",
        stats: Stats {
            attack: 11,
            defense: 4,
            agility: 6,
            magic: 6,
        },
    },
    CharacterTemplate {
        key: "outer_sans",
        display_name: "Outer! Sans",
        description: "Otherworldly and magical.",
        stats: Stats {
            attack: 6,
            defense: 3,
            agility: 8,
            magic: 12,
        },
    },
    CharacterTemplate {
        key: "dusttrust_sans",
        display_name: "Dusttrust! Sans",
        description: "Resilient, balanced build.",
        stats: Stats {
            attack: 9,
            defense: 4,
            agility: 9,
            magic: 7,
        },
    },
    CharacterTemplate {
        key: "nightmare_sans",
        display_name: "Nightmare Sans",
        description: "Nightmarish boss; high power.",
        stats: Stats {
            attack: 13,
            defense: 5,
            agility: 4,
            magic: 13,
        },
    },
];

/// Look up a template by key.
pub fn find(key: &str) -> Option<&'static CharacterTemplate> {
    TEMPLATES.iter().find(|t| t.key == key)
}

/// Look up a template by its 1-based menu number.
pub fn by_number(number: usize) -> Option<&'static CharacterTemplate> {
    number.checked_sub(1).and_then(|i| TEMPLATES.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = TEMPLATES.iter().map(|t| t.key).collect();
        assert_eq!(keys.len(), TEMPLATES.len());
    }

    #[test]
    fn find_by_key() {
        assert_eq!(find("outer_sans").unwrap().display_name, "Outer! Sans");
        assert!(find("frisk").is_none());
    }

    #[test]
    fn by_number_is_one_based() {
        assert_eq!(by_number(1).unwrap().key, "sans");
        assert_eq!(by_number(8).unwrap().key, "nightmare_sans");
        assert!(by_number(0).is_none());
        assert!(by_number(9).is_none());
    }
}
