// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::{Character, CharacterId, PlanetId};

/// Lenient numeric-list parse for manually typed relation fields.
///
/// Blank segments and non-numeric tokens are dropped without complaint;
/// duplicates are kept. `"1, 2,,abc,3"` parses to `[1, 2, 3]`.
pub fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<i64>().ok())
        .collect()
}

/// A relation edited as ids but displayed as labels. Ids are what gets
/// submitted; labels only flow one way, from server data into the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationField {
    pub ids: Vec<i64>,
    pub labels: Vec<String>,
}

impl RelationField {
    pub fn from_parts(ids: Vec<i64>, labels: Vec<String>) -> Self {
        Self { ids, labels }
    }

    /// Replace the ids from a comma-separated text entry. Labels are left
    /// untouched; they refresh with the next server load.
    pub fn set_from_text(&mut self, raw: &str) {
        self.ids = parse_id_list(raw);
    }

    pub fn entry_text(&self) -> String {
        self.ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterFormInput {
    pub id: Option<CharacterId>,
    pub name: String,
    pub birth_year: String,
    pub gender: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub homeworld_id: Option<PlanetId>,
    pub homeworld: Option<String>,
    pub films: RelationField,
    pub species: RelationField,
    pub vehicles: RelationField,
    pub starships: RelationField,
    pub created: Option<OffsetDateTime>,
    pub edited: Option<OffsetDateTime>,
    pub url: String,
}

impl CharacterFormInput {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_character(character: &Character) -> Self {
        Self {
            id: Some(character.id),
            name: character.name.clone(),
            birth_year: character.birth_year.clone(),
            gender: character.gender.clone(),
            height: character.height.clone(),
            mass: character.mass.clone(),
            hair_color: character.hair_color.clone(),
            skin_color: character.skin_color.clone(),
            eye_color: character.eye_color.clone(),
            homeworld_id: character.homeworld_id,
            homeworld: character.homeworld.clone(),
            films: RelationField::from_parts(
                character.film_ids.clone(),
                character.films.clone(),
            ),
            species: RelationField::from_parts(
                character.species_ids.clone(),
                character.species.clone(),
            ),
            vehicles: RelationField::from_parts(
                character.vehicle_ids.clone(),
                character.vehicles.clone(),
            ),
            starships: RelationField::from_parts(
                character.starship_ids.clone(),
                character.starships.clone(),
            ),
            created: character.created,
            edited: character.edited,
            url: character.url.clone(),
        }
    }
}
