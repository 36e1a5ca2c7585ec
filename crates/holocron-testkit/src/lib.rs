// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use time::OffsetDateTime;
use time::macros::datetime;

use holocron_app::{
    Character, CharacterFormInput, CharacterId, Film, FilmRef, NamedRef, Page, PageRequest,
    Planet, Species, Starship, SupportData, Vehicle,
};

const FIRST_NAMES: [&str; 12] = [
    "Dara", "Kelen", "Mira", "Thane", "Ryx", "Senna", "Joral", "Vess", "Orin", "Talia", "Brakk",
    "Yuneth",
];
const LAST_NAMES: [&str; 5] = ["Venn", "Okarr", "Tyvess", "Maron", "Quill"];

const FILM_TITLES: [&str; 7] = [
    "Shadowfall",
    "Embers of the Rim",
    "The Silent Fleet",
    "Crownfire",
    "Ashes of Meridia",
    "The Last Beacon",
    "Starveil",
];
const DIRECTORS: [&str; 4] = ["R. Calloway", "I. Mistral", "H. Okonjo", "T. Verane"];
const PRODUCERS: [&str; 3] = ["Meridian Pictures", "Farlight Studios", "Aurek Films"];

const SPECIES_NAMES: [&str; 22] = [
    "Veldrin", "Korrathi", "Sellith", "Myrran", "Drask", "Ossundi", "Pellith", "Tyvokk",
    "Quorren", "Ashari", "Brennic", "Ulvaan", "Ceresk", "Noxu", "Hallorin", "Jessari", "Kreth",
    "Lumenai", "Morvath", "Rellik", "Sundari", "Vashtee",
];
const CLASSIFICATIONS: [&str; 5] = ["mammal", "reptile", "amphibian", "insectoid", "avian"];
const DESIGNATIONS: [&str; 2] = ["sentient", "semi-sentient"];
const LANGUAGES: [&str; 6] = [
    "Veldric", "Korrath", "Trade Cant", "Old Myrran", "Drask pidgin", "Basic",
];

const STARSHIP_NAMES: [&str; 12] = [
    "Nightflare",
    "Dawn Herald",
    "Kestrel",
    "Void Lantern",
    "Palewing",
    "Ironsong",
    "Farlight",
    "Windrunner",
    "Sable Arrow",
    "Harrower",
    "Skycleaver",
    "Emberjack",
];
const STARSHIP_CLASSES: [&str; 5] = [
    "light freighter",
    "corvette",
    "patrol craft",
    "long-range scout",
    "assault lander",
];

const VEHICLE_NAMES: [&str; 13] = [
    "Dune skiff",
    "Ridge crawler",
    "Mag sledge",
    "Canyon hopper",
    "Storm treader",
    "Hover barge",
    "Scrap hauler",
    "Recon bike",
    "Marsh strider",
    "Cargo mule",
    "Frost tracker",
    "Plains runner",
    "Tunnel borer",
];
const VEHICLE_CLASSES: [&str; 4] = ["repulsorcraft", "walker", "wheeled", "sail barge"];

const PLANET_NAMES: [&str; 14] = [
    "Korriss", "Meridia", "Vell", "Ostara", "Drellun", "Quoth", "Ashkara", "Belsavane",
    "Cindral", "Tyrena", "Umbrell", "Novaris", "Perrin", "Sarkhal",
];
const PLANET_SUFFIXES: [&str; 3] = ["", " Prime", " Minor"];
const CLIMATES: [&str; 5] = ["temperate", "arid", "frozen", "tropical", "murky"];
const TERRAINS: [&str; 6] = [
    "plains", "canyons", "ocean", "jungle", "tundra", "volcanic ridges",
];

const HAIR_COLORS: [&str; 5] = ["black", "brown", "auburn", "grey", "none"];
const SKIN_COLORS: [&str; 5] = ["tan", "pale", "green", "blue", "ochre"];
const EYE_COLORS: [&str; 5] = ["brown", "amber", "grey", "violet", "red"];
const GENDERS: [&str; 3] = ["female", "male", "none"];

const CHARACTER_COUNT: usize = 57;
const PLANET_COUNT: usize = 41;
const STARSHIP_COUNT: usize = 24;
const VEHICLE_COUNT: usize = 26;

const REFERENCE_CREATED: OffsetDateTime = datetime!(2026-01-09 10:00 UTC);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        min + (self.next_u64() % ((max - min + 1) as u64)) as i64
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.int_n(items.len())]
    }
}

/// Deterministic in-memory catalog with the same paging, search, and
/// sort contract the REST API exposes. Backs `--demo` and the
/// controller/runtime tests.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    pub characters: Vec<Character>,
    pub films: Vec<Film>,
    pub species: Vec<Species>,
    pub starships: Vec<Starship>,
    pub vehicles: Vec<Vehicle>,
    pub planets: Vec<Planet>,
    next_character_id: i64,
}

impl SampleCatalog {
    pub fn generate() -> Self {
        Self::with_seed(1)
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = DeterministicRng::new(if seed == 0 { 1 } else { seed });

        let films: Vec<Film> = FILM_TITLES
            .iter()
            .enumerate()
            .map(|(index, title)| Film {
                title: (*title).to_owned(),
                episode_id: index as i64 + 1,
                opening_crawl: format!("It is a restless age in the {title} era."),
                director: rng.pick(&DIRECTORS).to_owned(),
                producer: rng.pick(&PRODUCERS).to_owned(),
                release_date: format!("{}-05-2{}", 1998 + index as i64 * 3, index % 8),
                created: Some(REFERENCE_CREATED),
                edited: None,
                url: format!("/films/{}", index + 1),
            })
            .collect();

        let planets: Vec<Planet> = (0..PLANET_COUNT)
            .map(|index| {
                let base = PLANET_NAMES[index % PLANET_NAMES.len()];
                let suffix = PLANET_SUFFIXES[index / PLANET_NAMES.len()];
                Planet {
                    name: format!("{base}{suffix}"),
                    climate: rng.pick(&CLIMATES).to_owned(),
                    terrain: rng.pick(&TERRAINS).to_owned(),
                    population: rng.int_range(10_000, 9_000_000_000).to_string(),
                    gravity: "1 standard".to_owned(),
                    diameter: rng.int_range(4_000, 18_000).to_string(),
                    rotation_period: rng.int_range(18, 34).to_string(),
                    orbital_period: rng.int_range(220, 700).to_string(),
                    created: Some(REFERENCE_CREATED),
                    edited: None,
                    url: format!("/planets/{}", index + 1),
                }
            })
            .collect();

        let species: Vec<Species> = SPECIES_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| Species {
                name: (*name).to_owned(),
                classification: rng.pick(&CLASSIFICATIONS).to_owned(),
                designation: rng.pick(&DESIGNATIONS).to_owned(),
                average_height: rng.int_range(90, 240).to_string(),
                average_lifespan: rng.int_range(40, 700).to_string(),
                language: rng.pick(&LANGUAGES).to_owned(),
                homeworld: Some(planets[index % planets.len()].name.clone()),
                created: Some(REFERENCE_CREATED),
                edited: None,
                url: format!("/species/{}", index + 1),
            })
            .collect();

        let starships: Vec<Starship> = (0..STARSHIP_COUNT)
            .map(|index| {
                let base = STARSHIP_NAMES[index % STARSHIP_NAMES.len()];
                let mark = if index < STARSHIP_NAMES.len() { "" } else { " II" };
                Starship {
                    name: format!("{base}{mark}"),
                    model: format!("Series {}", rng.int_range(3, 90)),
                    manufacturer: "Venn-Okarr Yards".to_owned(),
                    cost_in_credits: rng.int_range(90_000, 4_000_000).to_string(),
                    starship_class: rng.pick(&STARSHIP_CLASSES).to_owned(),
                    hyperdrive_rating: format!("{}.{}", rng.int_range(0, 3), rng.int_range(0, 9)),
                    crew: rng.int_range(1, 12).to_string(),
                    passengers: rng.int_range(0, 40).to_string(),
                    created: Some(REFERENCE_CREATED),
                    edited: None,
                    url: format!("/starships/{}", index + 1),
                }
            })
            .collect();

        let vehicles: Vec<Vehicle> = (0..VEHICLE_COUNT)
            .map(|index| {
                let base = VEHICLE_NAMES[index % VEHICLE_NAMES.len()];
                let mark = if index < VEHICLE_NAMES.len() { "" } else { " Mk2" };
                Vehicle {
                    name: format!("{base}{mark}"),
                    model: format!("Pattern {}", rng.int_range(1, 40)),
                    manufacturer: "Cindral Motors".to_owned(),
                    cost_in_credits: rng.int_range(2_000, 150_000).to_string(),
                    vehicle_class: rng.pick(&VEHICLE_CLASSES).to_owned(),
                    crew: rng.int_range(1, 4).to_string(),
                    passengers: rng.int_range(0, 20).to_string(),
                    created: Some(REFERENCE_CREATED),
                    edited: None,
                    url: format!("/vehicles/{}", index + 1),
                }
            })
            .collect();

        let characters: Vec<Character> = (0..CHARACTER_COUNT)
            .map(|index| {
                let first = FIRST_NAMES[index % FIRST_NAMES.len()];
                let last = LAST_NAMES[index / FIRST_NAMES.len()];
                let homeworld_index = rng.int_n(planets.len());
                let film_index = rng.int_n(films.len());
                Character {
                    id: CharacterId::new(index as i64 + 1),
                    name: format!("{first} {last}"),
                    birth_year: format!("{}BBY", rng.int_range(8, 96)),
                    gender: rng.pick(&GENDERS).to_owned(),
                    height: rng.int_range(140, 220).to_string(),
                    mass: rng.int_range(40, 130).to_string(),
                    hair_color: rng.pick(&HAIR_COLORS).to_owned(),
                    skin_color: rng.pick(&SKIN_COLORS).to_owned(),
                    eye_color: rng.pick(&EYE_COLORS).to_owned(),
                    homeworld: Some(planets[homeworld_index].name.clone()),
                    homeworld_id: Some((homeworld_index as i64 + 1).into()),
                    films: vec![films[film_index].title.clone()],
                    film_ids: vec![film_index as i64 + 1],
                    species: vec![species[index % species.len()].name.clone()],
                    species_ids: vec![(index % species.len()) as i64 + 1],
                    vehicles: Vec::new(),
                    vehicle_ids: Vec::new(),
                    starships: vec![starships[index % starships.len()].name.clone()],
                    starship_ids: vec![(index % starships.len()) as i64 + 1],
                    created: Some(REFERENCE_CREATED),
                    edited: None,
                    url: format!("/characters/{}", index + 1),
                }
            })
            .collect();

        Self {
            next_character_id: characters.len() as i64 + 1,
            characters,
            films,
            species,
            starships,
            vehicles,
            planets,
        }
    }

    pub fn character_page(&self, request: &PageRequest) -> Page<Character> {
        page_of(
            &self.characters,
            request,
            |character| &character.name,
            |character, field| match field {
                "name" => Some(character.name.clone()),
                "birthYear" => Some(character.birth_year.clone()),
                "gender" => Some(character.gender.clone()),
                "height" => Some(character.height.clone()),
                _ => None,
            },
        )
    }

    pub fn film_page(&self, request: &PageRequest) -> Page<Film> {
        page_of(
            &self.films,
            request,
            |film| &film.title,
            |film, field| match field {
                "title" => Some(film.title.clone()),
                "director" => Some(film.director.clone()),
                "releaseDate" => Some(film.release_date.clone()),
                _ => None,
            },
        )
    }

    pub fn species_page(&self, request: &PageRequest) -> Page<Species> {
        page_of(
            &self.species,
            request,
            |species| &species.name,
            |species, field| match field {
                "name" => Some(species.name.clone()),
                "classification" => Some(species.classification.clone()),
                "language" => Some(species.language.clone()),
                _ => None,
            },
        )
    }

    pub fn starship_page(&self, request: &PageRequest) -> Page<Starship> {
        page_of(
            &self.starships,
            request,
            |starship| &starship.name,
            |starship, field| match field {
                "name" => Some(starship.name.clone()),
                "model" => Some(starship.model.clone()),
                "starshipClass" => Some(starship.starship_class.clone()),
                _ => None,
            },
        )
    }

    pub fn vehicle_page(&self, request: &PageRequest) -> Page<Vehicle> {
        page_of(
            &self.vehicles,
            request,
            |vehicle| &vehicle.name,
            |vehicle, field| match field {
                "name" => Some(vehicle.name.clone()),
                "model" => Some(vehicle.model.clone()),
                "vehicleClass" => Some(vehicle.vehicle_class.clone()),
                _ => None,
            },
        )
    }

    pub fn planet_page(&self, request: &PageRequest) -> Page<Planet> {
        page_of(
            &self.planets,
            request,
            |planet| &planet.name,
            |planet, field| match field {
                "name" => Some(planet.name.clone()),
                "climate" => Some(planet.climate.clone()),
                "population" => Some(planet.population.clone()),
                _ => None,
            },
        )
    }

    pub fn support_data(&self) -> SupportData {
        SupportData {
            films: self
                .films
                .iter()
                .enumerate()
                .map(|(index, film)| FilmRef {
                    id: index as i64 + 1,
                    title: film.title.clone(),
                })
                .collect(),
            species: named_refs(self.species.iter().map(|species| species.name.clone())),
            vehicles: named_refs(self.vehicles.iter().map(|vehicle| vehicle.name.clone())),
            starships: named_refs(self.starships.iter().map(|starship| starship.name.clone())),
            planets: named_refs(self.planets.iter().map(|planet| planet.name.clone())),
        }
    }

    pub fn create_character(&mut self, form: &CharacterFormInput) -> CharacterId {
        let id = CharacterId::new(self.next_character_id);
        self.next_character_id += 1;
        let mut character = self.character_from_form(form);
        character.id = id;
        character.created = Some(REFERENCE_CREATED);
        character.url = format!("/characters/{}", id.get());
        self.characters.push(character);
        id
    }

    pub fn update_character(&mut self, id: CharacterId, form: &CharacterFormInput) -> Result<()> {
        let updated = self.character_from_form(form);
        let Some(existing) = self
            .characters
            .iter_mut()
            .find(|character| character.id == id)
        else {
            bail!("character {} not found", id.get());
        };
        let created = existing.created;
        let url = existing.url.clone();
        *existing = updated;
        existing.id = id;
        existing.created = created;
        existing.edited = Some(REFERENCE_CREATED);
        existing.url = url;
        Ok(())
    }

    pub fn delete_character(&mut self, id: CharacterId) -> Result<()> {
        let before = self.characters.len();
        self.characters.retain(|character| character.id != id);
        if self.characters.len() == before {
            bail!("character {} not found", id.get());
        }
        Ok(())
    }

    fn character_from_form(&self, form: &CharacterFormInput) -> Character {
        let support = self.support_data();
        let film_labels = labels_for(&form.films.ids, &support.films, |film| &film.title);
        let species_labels =
            labels_for(&form.species.ids, &support.species, |entry| &entry.name);
        let vehicle_labels =
            labels_for(&form.vehicles.ids, &support.vehicles, |entry| &entry.name);
        let starship_labels =
            labels_for(&form.starships.ids, &support.starships, |entry| &entry.name);
        let homeworld = form
            .homeworld_id
            .and_then(|id| support.planet_label(id).map(str::to_owned));

        Character {
            id: CharacterId::new(0),
            name: form.name.clone(),
            birth_year: form.birth_year.clone(),
            gender: form.gender.clone(),
            height: form.height.clone(),
            mass: form.mass.clone(),
            hair_color: form.hair_color.clone(),
            skin_color: form.skin_color.clone(),
            eye_color: form.eye_color.clone(),
            homeworld,
            homeworld_id: form.homeworld_id,
            films: film_labels,
            film_ids: form.films.ids.clone(),
            species: species_labels,
            species_ids: form.species.ids.clone(),
            vehicles: vehicle_labels,
            vehicle_ids: form.vehicles.ids.clone(),
            starships: starship_labels,
            starship_ids: form.starships.ids.clone(),
            created: None,
            edited: None,
            url: String::new(),
        }
    }
}

fn named_refs(names: impl Iterator<Item = String>) -> Vec<NamedRef> {
    names
        .enumerate()
        .map(|(index, name)| NamedRef {
            id: index as i64 + 1,
            name,
        })
        .collect()
}

fn labels_for<R>(ids: &[i64], refs: &[R], label: impl Fn(&R) -> &String) -> Vec<String>
where
    R: RefWithId,
{
    ids.iter()
        .filter_map(|id| refs.iter().find(|entry| entry.ref_id() == *id))
        .map(|entry| label(entry).clone())
        .collect()
}

trait RefWithId {
    fn ref_id(&self) -> i64;
}

impl RefWithId for FilmRef {
    fn ref_id(&self) -> i64 {
        self.id
    }
}

impl RefWithId for NamedRef {
    fn ref_id(&self) -> i64 {
        self.id
    }
}

fn page_of<T: Clone>(
    rows: &[T],
    request: &PageRequest,
    search_key: impl Fn(&T) -> &str,
    sort_key: impl Fn(&T, &str) -> Option<String>,
) -> Page<T> {
    let needle = request
        .search
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let mut filtered: Vec<&T> = rows
        .iter()
        .filter(|row| needle.is_empty() || search_key(row).to_lowercase().contains(&needle))
        .collect();

    if let Some(sort) = &request.sort {
        let (field, direction) = sort.split_once(',').unwrap_or((sort.as_str(), "asc"));
        let sortable = filtered
            .first()
            .is_some_and(|row| sort_key(row, field).is_some());
        if sortable {
            filtered.sort_by_key(|row| sort_key(row, field));
            if direction == "desc" {
                filtered.reverse();
            }
        }
    }

    let total_elements = filtered.len() as i64;
    let start = (request.page * request.size).max(0) as usize;
    let content = filtered
        .into_iter()
        .skip(start)
        .take(request.size.max(0) as usize)
        .cloned()
        .collect();

    Page {
        content,
        total_elements,
    }
}
