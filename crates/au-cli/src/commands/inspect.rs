use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use au_story::{SaveFile, content};

pub fn run(save: &Path) -> Result<(), String> {
    let story = content::builtin();
    let state = SaveFile::new(save)
        .load(&story)
        .map_err(|e| e.to_string())?;

    let scene = story
        .scene(&state.scene)
        .map(|s| format!("{} ({})", s.title, s.id))
        .unwrap_or_else(|_| state.scene.clone());
    let flags = if state.flags.is_empty() {
        "none".to_string()
    } else {
        state
            .flags
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Character".to_string(), state.character.name.clone()]);
    table.add_row(vec!["Template".to_string(), state.character.template.clone()]);
    table.add_row(vec!["HP".to_string(), super::hp_bar(&state.character.hp)]);
    table.add_row(vec!["Stats".to_string(), state.character.stats.to_string()]);
    table.add_row(vec![
        "Upgrades".to_string(),
        state.character.stat_upgrades.to_string(),
    ]);
    table.add_row(vec!["Scene".to_string(), scene]);
    table.add_row(vec!["Flags".to_string(), flags]);
    println!("{table}");

    if state.inventory.is_empty() {
        println!("\n  Inventory is empty.");
        return Ok(());
    }

    let mut items = Table::new();
    items.set_content_arrangement(ContentArrangement::Dynamic);
    items.set_header(vec!["#", "Item", "Kind", "Qty"]);
    for (i, slot) in state.inventory.iter().enumerate() {
        items.add_row(vec![
            (i + 1).to_string(),
            slot.item.name.clone(),
            slot.item.effect.kind_label().to_string(),
            slot.quantity.to_string(),
        ]);
    }
    println!();
    println!("{items}");

    Ok(())
}
