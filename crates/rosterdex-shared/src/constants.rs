/// Maximum number of Pokémon a team roster can hold.
pub const MAX_ROSTER_SIZE: usize = 6;

/// Maximum team name length in characters (after trimming).
pub const MAX_TEAM_NAME_CHARS: usize = 50;

/// Name given to the team that is created automatically when the store
/// holds no teams at all.
pub const DEFAULT_TEAM_NAME: &str = "My First Team";

/// Number of known Pokémon types, used for type-coverage percentages.
pub const KNOWN_TYPE_COUNT: usize = 18;

/// Default base URL of the public creature catalog API.
pub const DEFAULT_DEX_API_URL: &str = "https://pokeapi.co/api/v2";

/// Names suggested to the user as quick searches.
pub const EXAMPLE_SEARCHES: [&str; 6] = [
    "pikachu",
    "charizard",
    "blastoise",
    "venusaur",
    "lucario",
    "garchomp",
];
