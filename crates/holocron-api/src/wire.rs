// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use time::OffsetDateTime;

use holocron_app::CharacterFormInput;

/// JSON shape the API expects for character create/update. Relation
/// fields travel split: the editable id list plus the display labels.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CharacterFormWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: &'a str,
    pub birth_year: &'a str,
    pub gender: &'a str,
    pub height: &'a str,
    pub mass: &'a str,
    pub hair_color: &'a str,
    pub skin_color: &'a str,
    pub eye_color: &'a str,
    pub homeworld_id: Option<i64>,
    pub homeworld: Option<&'a str>,
    pub film_ids: &'a [i64],
    pub films: &'a [String],
    pub species_ids: &'a [i64],
    pub species: &'a [String],
    pub vehicle_ids: &'a [i64],
    pub vehicles: &'a [String],
    pub starship_ids: &'a [i64],
    pub starships: &'a [String],
    #[serde(with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub edited: Option<OffsetDateTime>,
    pub url: &'a str,
}

impl<'a> From<&'a CharacterFormInput> for CharacterFormWire<'a> {
    fn from(form: &'a CharacterFormInput) -> Self {
        Self {
            id: form.id.map(|id| id.get()),
            name: &form.name,
            birth_year: &form.birth_year,
            gender: &form.gender,
            height: &form.height,
            mass: &form.mass,
            hair_color: &form.hair_color,
            skin_color: &form.skin_color,
            eye_color: &form.eye_color,
            homeworld_id: form.homeworld_id.map(|id| id.get()),
            homeworld: form.homeworld.as_deref(),
            film_ids: &form.films.ids,
            films: &form.films.labels,
            species_ids: &form.species.ids,
            species: &form.species.labels,
            vehicle_ids: &form.vehicles.ids,
            vehicles: &form.vehicles.labels,
            starship_ids: &form.starships.ids,
            starships: &form.starships.labels,
            created: form.created,
            edited: form.edited,
            url: &form.url,
        }
    }
}
