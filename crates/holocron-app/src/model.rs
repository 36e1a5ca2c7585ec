// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenKind {
    Home,
    Characters,
    Films,
    Species,
    Starships,
    Vehicles,
    Planets,
}

impl ScreenKind {
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Characters,
        Self::Films,
        Self::Species,
        Self::Starships,
        Self::Vehicles,
        Self::Planets,
    ];

    pub const CATALOGS: [Self; 6] = [
        Self::Characters,
        Self::Films,
        Self::Species,
        Self::Starships,
        Self::Vehicles,
        Self::Planets,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Characters => "characters",
            Self::Films => "films",
            Self::Species => "species",
            Self::Starships => "starships",
            Self::Vehicles => "vehicles",
            Self::Planets => "planets",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Characters => "Characters",
            Self::Films => "Films",
            Self::Species => "Species",
            Self::Starships => "Starships",
            Self::Vehicles => "Vehicles",
            Self::Planets => "Planets",
        }
    }
}

/// One page of a server-side paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub birth_year: String,
    pub gender: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub homeworld_id: Option<PlanetId>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub film_ids: Vec<i64>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub species_ids: Vec<i64>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub vehicle_ids: Vec<i64>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub starship_ids: Vec<i64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub classification: String,
    pub designation: String,
    pub average_height: String,
    pub average_lifespan: String,
    pub language: String,
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub starship_class: String,
    pub hyperdrive_rating: String,
    pub crew: String,
    pub passengers: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub vehicle_class: String,
    pub crew: String,
    pub passengers: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub terrain: String,
    pub population: String,
    pub gravity: String,
    pub diameter: String,
    pub rotation_period: String,
    pub orbital_period: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    #[serde(default)]
    pub url: String,
}

/// Reference entry for relation pickers. Films label with their title,
/// everything else with a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmRef {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportData {
    pub films: Vec<FilmRef>,
    pub species: Vec<NamedRef>,
    pub vehicles: Vec<NamedRef>,
    pub starships: Vec<NamedRef>,
    pub planets: Vec<NamedRef>,
}

impl SupportData {
    pub fn planet_label(&self, id: PlanetId) -> Option<&str> {
        self.planets
            .iter()
            .find(|planet| planet.id == id.get())
            .map(|planet| planet.name.as_str())
    }
}
