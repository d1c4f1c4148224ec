//! Pokedex data model and the bundled offline dataset.
//!
//! The MCP tools are thin text formatters over a [`PokemonSource`]. The default
//! source is [`BundledPokedex`], a compiled-in slice of well-known entries that
//! covers every type, so the server works (and is testable) with no network
//! access. The live PokeAPI source lives in [`crate::pokeapi`].

use async_trait::async_trait;
use thiserror::Error;

/// Members listed per type report, matching the upstream PokeAPI proxy limit.
pub const TYPE_LIST_LIMIT: usize = 20;

/// Highest id the live source will roll for a random lookup (Gen 9).
pub const MAX_LIVE_POKEMON_ID: u32 = 1025;

/// The canonical type names. Anything else is rejected before lookup.
pub const KNOWN_TYPES: &[&str] = &[
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

#[derive(Debug, Error)]
pub enum PokedexError {
    #[error("no Pokemon matches '{0}'")]
    NotFound(String),
    #[error("'{0}' is not a known Pokemon type")]
    UnknownType(String),
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// One resolved Pokedex entry, units already converted for display
/// (PokeAPI reports decimeters and hectograms).
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonInfo {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub abilities: Vec<String>,
}

/// A type together with its member Pokemon, in dex order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    pub name: String,
    pub members: Vec<String>,
}

/// Where Pokedex entries come from. Implemented by the bundled dataset and by
/// the live PokeAPI client.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Look up by name (case-insensitive) or numeric id.
    async fn pokemon(&self, query: &str) -> Result<PokemonInfo, PokedexError>;
    /// Look up a type and its members.
    async fn pokemon_type(&self, type_name: &str) -> Result<TypeInfo, PokedexError>;
    /// A uniformly random entry.
    async fn random_pokemon(&self) -> Result<PokemonInfo, PokedexError>;
}

/// Uppercase the first ASCII letter, the way the original server renders names.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render the `get_pokemon` report.
pub fn format_pokemon(info: &PokemonInfo) -> String {
    format!(
        "Pokemon: {} (#{})\nType(s): {}\nHeight: {}m\nWeight: {}kg\nAbilities: {}",
        capitalize(&info.name),
        info.id,
        info.types.join(", "),
        info.height_m,
        info.weight_kg,
        info.abilities.join(", "),
    )
}

/// Render the `get_pokemon_type` report. Member list is truncated to
/// [`TYPE_LIST_LIMIT`] entries.
pub fn format_type(info: &TypeInfo) -> String {
    let shown: Vec<&str> = info
        .members
        .iter()
        .take(TYPE_LIST_LIMIT)
        .map(String::as_str)
        .collect();
    format!(
        "Type: {}\nPokemon with this type (first {}): {}",
        capitalize(&info.name),
        TYPE_LIST_LIMIT,
        shown.join(", "),
    )
}

/// Render the `get_random_pokemon` report.
pub fn format_random(info: &PokemonInfo) -> String {
    format!(
        "Random Pokemon: {} (#{})\nType(s): {}",
        capitalize(&info.name),
        info.id,
        info.types.join(", "),
    )
}

struct PokemonRecord {
    id: u32,
    name: &'static str,
    types: &'static [&'static str],
    height_dm: u32,
    weight_hg: u32,
    abilities: &'static [&'static str],
}

impl PokemonRecord {
    fn to_info(&self) -> PokemonInfo {
        PokemonInfo {
            id: self.id,
            name: self.name.to_string(),
            types: self.types.iter().map(|t| t.to_string()).collect(),
            height_m: self.height_dm as f64 / 10.0,
            weight_kg: self.weight_hg as f64 / 10.0,
            abilities: self.abilities.iter().map(|a| a.to_string()).collect(),
        }
    }
}

macro_rules! entry {
    ($id:expr, $name:expr, [$($ty:expr),+], $h:expr, $w:expr, [$($ab:expr),+]) => {
        PokemonRecord {
            id: $id,
            name: $name,
            types: &[$($ty),+],
            height_dm: $h,
            weight_hg: $w,
            abilities: &[$($ab),+],
        }
    };
}

/// Compiled-in dex slice, dex order. Every entry in [`KNOWN_TYPES`] has at
/// least one member here so type queries never come back empty.
static POKEDEX: &[PokemonRecord] = &[
    entry!(1, "bulbasaur", ["grass", "poison"], 7, 69, ["overgrow", "chlorophyll"]),
    entry!(4, "charmander", ["fire"], 6, 85, ["blaze", "solar-power"]),
    entry!(6, "charizard", ["fire", "flying"], 17, 905, ["blaze", "solar-power"]),
    entry!(7, "squirtle", ["water"], 5, 90, ["torrent", "rain-dish"]),
    entry!(9, "blastoise", ["water"], 16, 855, ["torrent", "rain-dish"]),
    entry!(10, "caterpie", ["bug"], 3, 29, ["shield-dust", "run-away"]),
    entry!(16, "pidgey", ["normal", "flying"], 3, 18, ["keen-eye", "tangled-feet"]),
    entry!(19, "rattata", ["normal"], 3, 35, ["run-away", "guts"]),
    entry!(23, "ekans", ["poison"], 20, 69, ["intimidate", "shed-skin"]),
    entry!(25, "pikachu", ["electric"], 4, 60, ["static", "lightning-rod"]),
    entry!(26, "raichu", ["electric"], 8, 300, ["static", "lightning-rod"]),
    entry!(27, "sandshrew", ["ground"], 6, 120, ["sand-veil", "sand-rush"]),
    entry!(35, "clefairy", ["fairy"], 6, 75, ["cute-charm", "magic-guard"]),
    entry!(37, "vulpix", ["fire"], 6, 99, ["flash-fire", "drought"]),
    entry!(39, "jigglypuff", ["normal", "fairy"], 5, 55, ["cute-charm", "competitive"]),
    entry!(43, "oddish", ["grass", "poison"], 5, 54, ["chlorophyll", "run-away"]),
    entry!(50, "diglett", ["ground"], 2, 8, ["sand-veil", "arena-trap"]),
    entry!(54, "psyduck", ["water"], 8, 196, ["damp", "cloud-nine"]),
    entry!(63, "abra", ["psychic"], 9, 195, ["synchronize", "inner-focus"]),
    entry!(66, "machop", ["fighting"], 8, 195, ["guts", "no-guard"]),
    entry!(74, "geodude", ["rock", "ground"], 4, 200, ["rock-head", "sturdy"]),
    entry!(81, "magnemite", ["electric", "steel"], 3, 60, ["magnet-pull", "sturdy"]),
    entry!(92, "gastly", ["ghost", "poison"], 13, 1, ["levitate"]),
    entry!(94, "gengar", ["ghost", "poison"], 15, 405, ["cursed-body"]),
    entry!(95, "onix", ["rock", "ground"], 88, 2100, ["rock-head", "sturdy"]),
    entry!(100, "voltorb", ["electric"], 5, 104, ["soundproof", "static"]),
    entry!(107, "hitmonchan", ["fighting"], 14, 502, ["keen-eye", "iron-fist"]),
    entry!(123, "scyther", ["bug", "flying"], 15, 560, ["swarm", "technician"]),
    entry!(124, "jynx", ["ice", "psychic"], 14, 406, ["oblivious", "forewarn"]),
    entry!(125, "electabuzz", ["electric"], 11, 300, ["static", "vital-spirit"]),
    entry!(131, "lapras", ["water", "ice"], 25, 2200, ["water-absorb", "shell-armor"]),
    entry!(133, "eevee", ["normal"], 3, 65, ["run-away", "adaptability"]),
    entry!(135, "jolteon", ["electric"], 8, 245, ["volt-absorb", "quick-feet"]),
    entry!(143, "snorlax", ["normal"], 21, 4600, ["immunity", "thick-fat"]),
    entry!(144, "articuno", ["ice", "flying"], 17, 554, ["pressure", "snow-cloak"]),
    entry!(145, "zapdos", ["electric", "flying"], 16, 526, ["pressure", "static"]),
    entry!(147, "dratini", ["dragon"], 18, 33, ["shed-skin", "marvel-scale"]),
    entry!(149, "dragonite", ["dragon", "flying"], 22, 2100, ["inner-focus", "multiscale"]),
    entry!(196, "espeon", ["psychic"], 9, 265, ["synchronize", "magic-bounce"]),
    entry!(197, "umbreon", ["dark"], 10, 270, ["synchronize", "inner-focus"]),
    entry!(198, "murkrow", ["dark", "flying"], 5, 21, ["insomnia", "super-luck"]),
    entry!(208, "steelix", ["steel", "ground"], 92, 4000, ["rock-head", "sturdy"]),
];

/// Offline Pokedex backed by [`POKEDEX`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPokedex;

impl BundledPokedex {
    fn find(&self, query: &str) -> Option<&'static PokemonRecord> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u32>() {
            return POKEDEX.iter().find(|r| r.id == id);
        }
        let lower = query.to_lowercase();
        POKEDEX.iter().find(|r| r.name == lower)
    }
}

#[async_trait]
impl PokemonSource for BundledPokedex {
    async fn pokemon(&self, query: &str) -> Result<PokemonInfo, PokedexError> {
        self.find(query)
            .map(PokemonRecord::to_info)
            .ok_or_else(|| PokedexError::NotFound(query.trim().to_string()))
    }

    async fn pokemon_type(&self, type_name: &str) -> Result<TypeInfo, PokedexError> {
        let lower = type_name.trim().to_lowercase();
        if !KNOWN_TYPES.contains(&lower.as_str()) {
            return Err(PokedexError::UnknownType(type_name.trim().to_string()));
        }
        let members: Vec<String> = POKEDEX
            .iter()
            .filter(|r| r.types.contains(&lower.as_str()))
            .map(|r| r.name.to_string())
            .collect();
        Ok(TypeInfo {
            name: lower,
            members,
        })
    }

    async fn random_pokemon(&self) -> Result<PokemonInfo, PokedexError> {
        let roll: u64 = rand::random();
        let record = &POKEDEX[roll as usize % POKEDEX.len()];
        Ok(record.to_info())
    }
}
