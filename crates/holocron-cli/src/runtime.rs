// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use holocron_api::Client;
use holocron_app::{
    Character, CharacterFormInput, CharacterId, Film, Page, PageRequest, Planet, Species,
    Starship, SupportData, Vehicle,
};
use holocron_testkit::SampleCatalog;
use holocron_tui::AppRuntime;

/// Production runtime: every trigger becomes one blocking REST call.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn fetch_characters(&mut self, request: &PageRequest) -> Result<Page<Character>> {
        self.client.characters(request)
    }

    fn fetch_films(&mut self, request: &PageRequest) -> Result<Page<Film>> {
        self.client.films(request)
    }

    fn fetch_species(&mut self, request: &PageRequest) -> Result<Page<Species>> {
        self.client.species(request)
    }

    fn fetch_starships(&mut self, request: &PageRequest) -> Result<Page<Starship>> {
        self.client.starships(request)
    }

    fn fetch_vehicles(&mut self, request: &PageRequest) -> Result<Page<Vehicle>> {
        self.client.vehicles(request)
    }

    fn fetch_planets(&mut self, request: &PageRequest) -> Result<Page<Planet>> {
        self.client.planets(request)
    }

    fn fetch_support_data(&mut self) -> Result<SupportData> {
        self.client.support_data()
    }

    fn create_character(&mut self, form: &CharacterFormInput) -> Result<()> {
        self.client.create_character(form)
    }

    fn update_character(&mut self, id: CharacterId, form: &CharacterFormInput) -> Result<()> {
        self.client.update_character(id, form)
    }

    fn delete_character(&mut self, id: CharacterId) -> Result<()> {
        self.client.delete_character(id)
    }
}

/// `--demo` runtime: a deterministic in-memory catalog, no server.
pub struct DemoRuntime {
    catalog: SampleCatalog,
}

impl DemoRuntime {
    pub fn new() -> Self {
        Self {
            catalog: SampleCatalog::generate(),
        }
    }
}

impl Default for DemoRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRuntime for DemoRuntime {
    fn fetch_characters(&mut self, request: &PageRequest) -> Result<Page<Character>> {
        Ok(self.catalog.character_page(request))
    }

    fn fetch_films(&mut self, request: &PageRequest) -> Result<Page<Film>> {
        Ok(self.catalog.film_page(request))
    }

    fn fetch_species(&mut self, request: &PageRequest) -> Result<Page<Species>> {
        Ok(self.catalog.species_page(request))
    }

    fn fetch_starships(&mut self, request: &PageRequest) -> Result<Page<Starship>> {
        Ok(self.catalog.starship_page(request))
    }

    fn fetch_vehicles(&mut self, request: &PageRequest) -> Result<Page<Vehicle>> {
        Ok(self.catalog.vehicle_page(request))
    }

    fn fetch_planets(&mut self, request: &PageRequest) -> Result<Page<Planet>> {
        Ok(self.catalog.planet_page(request))
    }

    fn fetch_support_data(&mut self) -> Result<SupportData> {
        Ok(self.catalog.support_data())
    }

    fn create_character(&mut self, form: &CharacterFormInput) -> Result<()> {
        self.catalog.create_character(form);
        Ok(())
    }

    fn update_character(&mut self, id: CharacterId, form: &CharacterFormInput) -> Result<()> {
        self.catalog.update_character(id, form)
    }

    fn delete_character(&mut self, id: CharacterId) -> Result<()> {
        self.catalog.delete_character(id)
    }
}
