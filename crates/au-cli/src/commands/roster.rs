use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use au_mechanics::roster;

pub fn run(rules: Option<&Path>) -> Result<(), String> {
    let rules = super::load_rules(rules)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "HP", "ATK", "DEF", "AGI", "MAG", "Description"]);

    for (i, t) in roster::TEMPLATES.iter().enumerate() {
        let hp = rules.starting_hp(t.stats.attack, t.stats.magic);
        table.add_row(vec![
            (i + 1).to_string(),
            t.display_name.to_string(),
            hp.to_string(),
            t.stats.attack.to_string(),
            t.stats.defense.to_string(),
            t.stats.agility.to_string(),
            t.stats.magic.to_string(),
            t.description.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} characters", roster::TEMPLATES.len());

    Ok(())
}
