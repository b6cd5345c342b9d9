//! The interactive command loop.
//!
//! One command runs to completion, including its remote round-trip, before
//! the next line is read, so the repository only ever sees one mutation in
//! flight.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rosterdex_client::{
    LookupError, PokemonLookup, SearchSession, TeamError, TeamRepository,
};
use rosterdex_shared::constants::MAX_ROSTER_SIZE;
use rosterdex_shared::{PokemonId, TeamId};

use crate::render;

const PROMPT: &str = "rosterdex> ";

enum Flow {
    Continue,
    Quit,
}

pub async fn run<L>(mut repository: TeamRepository, lookup: L, persistent: bool) -> Result<()>
where
    L: PokemonLookup,
{
    let mut editor = DefaultEditor::new()?;
    let mut session = SearchSession::new();

    render::greeting(persistent);
    render::status(&repository);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                match dispatch(line, &mut repository, &lookup, &mut session).await {
                    Flow::Continue => {}
                    Flow::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Bye!");
    Ok(())
}

async fn dispatch<L: PokemonLookup>(
    line: &str,
    repository: &mut TeamRepository,
    lookup: &L,
    session: &mut SearchSession,
) -> Flow {
    let (command, rest) = split_command(line);
    match command {
        "help" | "?" => render::help(),
        "quit" | "exit" => return Flow::Quit,
        "search" => search(rest, lookup, session).await,
        "add" => add(rest, repository, lookup, session).await,
        "remove" => remove(rest, repository).await,
        "show" => render::roster(repository),
        "team" => team_command(rest, repository).await,
        other => println!("Unknown command \"{other}\". Type `help` for the list."),
    }
    Flow::Continue
}

/// Split off the first word; the remainder keeps its internal spacing so
/// team names with spaces survive.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    }
}

async fn search<L: PokemonLookup>(term: &str, lookup: &L, session: &mut SearchSession) {
    let Some((token, name)) = session.begin(term) else {
        println!("Usage: search <name>");
        return;
    };

    let outcome = lookup.find(&name).await;
    if let Err(e) = &outcome {
        if !matches!(e, LookupError::NotFound { .. }) {
            tracing::warn!(error = %e, "Catalog lookup failed");
        }
    }
    session.resolve(token, outcome);

    if let Some(found) = session.result() {
        render::card(found);
    }
    if let Some(message) = session.error() {
        println!("{message}");
    }
}

async fn add<L: PokemonLookup>(
    name: &str,
    repository: &mut TeamRepository,
    lookup: &L,
    session: &mut SearchSession,
) {
    let pokemon = if name.is_empty() {
        match session.result() {
            Some(found) => found.clone(),
            None => {
                println!("Nothing to add. `search <name>` first, or `add <name>`.");
                return;
            }
        }
    } else {
        match lookup.find(name).await {
            Ok(found) => found,
            Err(LookupError::NotFound { name }) => {
                println!("Pokémon \"{name}\" not found.");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog lookup failed");
                println!("An error occurred while searching");
                return;
            }
        }
    };

    let display = pokemon.display_name();
    match repository.add_to_current(pokemon).await {
        Ok(()) => {
            if let Some(team) = repository.current_team() {
                println!(
                    "{display} joined \"{}\" ({}/{}).",
                    team.name,
                    team.roster.len(),
                    MAX_ROSTER_SIZE
                );
            }
        }
        Err(e) => report_team_error(e, "add to the team"),
    }
}

async fn remove(target: &str, repository: &mut TeamRepository) {
    if target.is_empty() {
        println!("Usage: remove <id|name>");
        return;
    }
    let Some(team) = repository.current_team() else {
        println!("No team is selected.");
        return;
    };

    // Accept either the numeric id or a roster member's name.
    let id = match target.parse::<u32>() {
        Ok(n) => PokemonId(n),
        Err(_) => {
            let lowered = target.to_lowercase();
            match team.roster.iter().find(|p| p.name == lowered) {
                Some(found) => found.id,
                None => {
                    println!("\"{target}\" is not in \"{}\".", team.name);
                    return;
                }
            }
        }
    };
    let display = team.member(id).map(|p| p.display_name());

    match repository.remove_from_current(id).await {
        Ok(true) => {
            println!(
                "Removed {}.",
                display.unwrap_or_else(|| id.to_string())
            );
        }
        Ok(false) => println!("\"{target}\" is not in the current team."),
        Err(e) => report_team_error(e, "remove from the team"),
    }
}

async fn team_command(rest: &str, repository: &mut TeamRepository) {
    let (sub, args) = split_command(rest);
    match sub {
        "" | "list" => render::team_list(repository),
        "create" => {
            if args.is_empty() {
                println!("Usage: team create <name>");
                return;
            }
            match repository.create_team(args).await {
                Ok(team) => println!("Created \"{}\" and made it current.", team.name),
                Err(e) => report_team_error(e, "create the team"),
            }
        }
        "rename" => {
            let (position, name) = split_command(args);
            let Some(id) = team_id_at(repository, position) else {
                println!("Usage: team rename <position> <new name>");
                return;
            };
            if name.is_empty() {
                println!("Usage: team rename <position> <new name>");
                return;
            }
            match repository.rename_team(&id, name).await {
                Ok(()) => println!("Renamed to \"{}\".", name.trim()),
                Err(e) => report_team_error(e, "rename the team"),
            }
        }
        "delete" => {
            let Some(id) = team_id_at(repository, args) else {
                println!("Usage: team delete <position>");
                return;
            };
            match repository.delete_team(&id).await {
                Ok(()) => {
                    println!("Team deleted.");
                    render::status(repository);
                }
                Err(e) => report_team_error(e, "delete the team"),
            }
        }
        "switch" => {
            let Some(id) = team_id_at(repository, args) else {
                println!("Usage: team switch <position>");
                return;
            };
            match repository.switch_team(&id) {
                Ok(()) => render::status(repository),
                Err(e) => println!("{e}"),
            }
        }
        other => println!("Unknown team command \"{other}\". Type `help` for the list."),
    }
}

/// Resolve a 1-based list position (as shown by `team list`) to a team id.
fn team_id_at(repository: &TeamRepository, position: &str) -> Option<TeamId> {
    let n: usize = position.parse().ok()?;
    repository
        .teams()
        .get(n.checked_sub(1)?)
        .map(|t| t.id.clone())
}

/// Validation rejections are shown as-is; store failures are logged and
/// reported with a retry hint, since local state was left untouched.
fn report_team_error(error: TeamError, verb: &str) {
    match &error {
        TeamError::Store(e) => {
            tracing::error!(error = %e, "Store write failed");
            println!("Could not {verb}: the store did not accept the change. Try again.");
        }
        _ => println!("{error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_keeps_tail_spacing() {
        assert_eq!(split_command("team create Kanto Crew"), ("team", "create Kanto Crew"));
        assert_eq!(split_command("help"), ("help", ""));
        assert_eq!(split_command("search  pikachu "), ("search", "pikachu"));
    }
}
