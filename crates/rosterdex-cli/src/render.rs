//! Terminal output: the result card, team listings, and the stat panel.

use rosterdex_client::TeamRepository;
use rosterdex_shared::constants::{EXAMPLE_SEARCHES, KNOWN_TYPE_COUNT, MAX_ROSTER_SIZE};
use rosterdex_shared::{summarize, Pokemon, TeamSummary};

pub fn greeting(persistent: bool) {
    println!();
    println!("Pokémon Team Builder");
    println!("Search the catalog and build teams of up to {MAX_ROSTER_SIZE}.");
    if !persistent {
        println!("No store configured: teams live only for this session.");
    }
    println!(
        "Type `help` for commands. Quick searches: {}.",
        EXAMPLE_SEARCHES.join(", ")
    );
    println!();
}

pub fn help() {
    println!();
    println!("Commands:");
    println!("  search <name>            Look up a Pokémon in the catalog");
    println!("  add [name]               Add the last result (or a name) to the current team");
    println!("  remove <id|name>         Remove a member from the current team");
    println!("  show                     Current roster and team statistics");
    println!("  team [list]              List teams (current marked with *)");
    println!("  team create <name>       Create a team and make it current");
    println!("  team rename <n> <name>   Rename the team at position n");
    println!("  team delete <n>          Delete the team at position n");
    println!("  team switch <n>          Make the team at position n current");
    println!("  quit                     Leave");
    println!();
}

/// One-line reminder of which team mutations currently target.
pub fn status(repository: &TeamRepository) {
    if let Some(team) = repository.current_team() {
        println!(
            "Current team: \"{}\" ({}/{})",
            team.name,
            team.roster.len(),
            MAX_ROSTER_SIZE
        );
    }
}

/// The search result card.
pub fn card(pokemon: &Pokemon) {
    let tags: Vec<String> = pokemon.type_names().map(type_tag).collect();
    println!();
    println!("  #{:03} {}", pokemon.id.0, pokemon.display_name());
    println!("  {}", tags.join(" "));
    println!(
        "  Base EXP: {}",
        pokemon
            .base_experience
            .map(|v| v.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!("  Height:   {:.1} m", pokemon.height_m());
    println!("  Weight:   {:.1} kg", pokemon.weight_kg());
    if let Some(url) = pokemon.artwork_url() {
        println!("  Artwork:  {url}");
    }
    println!();
}

pub fn team_list(repository: &TeamRepository) {
    if repository.teams().is_empty() {
        println!("No teams yet. `team create <name>` to start one.");
        return;
    }
    let current = repository.current_team().map(|t| t.id.clone());
    println!();
    for (index, team) in repository.teams().iter().enumerate() {
        let marker = if current.as_ref() == Some(&team.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {}. {} ({}/{})",
            index + 1,
            team.name,
            team.roster.len(),
            MAX_ROSTER_SIZE
        );
    }
    println!();
}

/// The current roster plus its derived statistics.
pub fn roster(repository: &TeamRepository) {
    let Some(team) = repository.current_team() else {
        println!("No team is selected.");
        return;
    };

    println!();
    println!("{} ({}/{})", team.name, team.roster.len(), MAX_ROSTER_SIZE);
    if team.roster.is_empty() {
        println!("  Empty. `search <name>` then `add` to build the roster.");
        println!();
        return;
    }

    for pokemon in &team.roster {
        let tags: Vec<String> = pokemon.type_names().map(type_tag).collect();
        println!(
            "  #{:03} {:<12} {}",
            pokemon.id.0,
            pokemon.display_name(),
            tags.join(" ")
        );
    }
    summary(&summarize(&team.roster));
    println!();
}

fn summary(stats: &TeamSummary) {
    println!();
    println!(
        "  Strength: {} (avg base EXP {})",
        stats.strength.label(),
        stats.average_base_experience
    );
    println!(
        "  Coverage: {}% ({} of {} types)",
        stats.type_coverage_percent,
        stats.unique_types.len(),
        KNOWN_TYPE_COUNT
    );
    let tags: Vec<String> = stats.unique_types.iter().map(|t| type_tag(t)).collect();
    println!("  Types:    {}", tags.join(" "));
    println!(
        "  Average:  {:.1} m / {:.1} kg",
        stats.average_height_m, stats.average_weight_kg
    );
}

fn type_tag(kind: &str) -> String {
    format!("\x1b[38;5;{}m[{kind}]\x1b[0m", type_color(kind))
}

/// ANSI 256-color codes approximating the classic type colors.
fn type_color(kind: &str) -> u8 {
    match kind {
        "normal" => 144,
        "fire" => 208,
        "water" => 33,
        "electric" => 220,
        "grass" => 76,
        "ice" => 123,
        "fighting" => 124,
        "poison" => 127,
        "ground" => 179,
        "flying" => 111,
        "psychic" => 205,
        "bug" => 106,
        "rock" => 137,
        "ghost" => 97,
        "dragon" => 57,
        "dark" => 94,
        "steel" => 103,
        "fairy" => 218,
        _ => 250,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_have_dedicated_colors() {
        assert_ne!(type_color("fire"), type_color("water"));
        assert_ne!(type_color("grass"), type_color("dragon"));
        // Unknown tags share the neutral fallback.
        assert_eq!(type_color("mystery"), type_color("???"));
    }
}
