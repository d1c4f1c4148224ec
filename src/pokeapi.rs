//! Live [`PokemonSource`] backed by the public PokeAPI.
//!
//! Selected with `--live` on the server binary. The base URL is injectable so
//! the client can be pointed at a mock server in tests.

use crate::pokedex::{
    MAX_LIVE_POKEMON_ID, PokedexError, PokemonInfo, PokemonSource, TypeInfo,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PokedexError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// GET `/api/v2/{resource}/{query}`. `Ok(None)` means the resource does
    /// not exist upstream; callers map that to their own not-found error.
    async fn get_json(&self, resource: &str, query: &str) -> Result<Option<Value>, PokedexError> {
        let url = format!(
            "{}/api/v2/{}/{}",
            self.base_url.trim_end_matches('/'),
            resource,
            query
        );
        tracing::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(PokedexError::Malformed(format!(
                "unexpected status {status} from {url}"
            ))),
        }
    }
}

fn missing(field: &str) -> PokedexError {
    PokedexError::Malformed(format!("missing or mistyped field '{field}'"))
}

fn parse_pokemon(data: &Value) -> Result<PokemonInfo, PokedexError> {
    let id = data
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| missing("id"))? as u32;
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("name"))?
        .to_string();
    let types = data
        .get("types")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("types"))?
        .iter()
        .filter_map(|t| t.pointer("/type/name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    let height_dm = data
        .get("height")
        .and_then(Value::as_f64)
        .ok_or_else(|| missing("height"))?;
    let weight_hg = data
        .get("weight")
        .and_then(Value::as_f64)
        .ok_or_else(|| missing("weight"))?;
    let abilities = data
        .get("abilities")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("abilities"))?
        .iter()
        .filter_map(|a| a.pointer("/ability/name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    Ok(PokemonInfo {
        id,
        name,
        types,
        height_m: height_dm / 10.0,
        weight_kg: weight_hg / 10.0,
        abilities,
    })
}

fn parse_type(data: &Value) -> Result<TypeInfo, PokedexError> {
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("name"))?
        .to_string();
    let members = data
        .get("pokemon")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("pokemon"))?
        .iter()
        .filter_map(|p| p.pointer("/pokemon/name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    Ok(TypeInfo { name, members })
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn pokemon(&self, query: &str) -> Result<PokemonInfo, PokedexError> {
        let query = query.trim().to_lowercase();
        match self.get_json("pokemon", &query).await? {
            Some(data) => parse_pokemon(&data),
            None => Err(PokedexError::NotFound(query)),
        }
    }

    async fn pokemon_type(&self, type_name: &str) -> Result<TypeInfo, PokedexError> {
        let type_name = type_name.trim().to_lowercase();
        match self.get_json("type", &type_name).await? {
            Some(data) => parse_type(&data),
            None => Err(PokedexError::UnknownType(type_name)),
        }
    }

    async fn random_pokemon(&self) -> Result<PokemonInfo, PokedexError> {
        let id = rand::random_range(1..=MAX_LIVE_POKEMON_ID);
        self.pokemon(&id.to_string()).await
    }
}
