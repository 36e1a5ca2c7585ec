// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use holocron_app::pager::ELLIPSIS;
use holocron_app::{
    AppCommand, AppMode, AppState, Browser, Character, CharacterFormInput, CharacterId,
    EditorState, Film, MutationKind, MutationOutcome, MutationRequest, Page, PageRequest, Planet,
    PlanetId, ScreenKind, Species, Starship, SupportData, SupportState, Vehicle,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Everything the event loop needs from the outside world. The real
/// runtime wraps the REST client; tests and demo mode swap in an
/// in-memory catalog.
pub trait AppRuntime {
    fn fetch_characters(&mut self, request: &PageRequest) -> Result<Page<Character>>;
    fn fetch_films(&mut self, request: &PageRequest) -> Result<Page<Film>>;
    fn fetch_species(&mut self, request: &PageRequest) -> Result<Page<Species>>;
    fn fetch_starships(&mut self, request: &PageRequest) -> Result<Page<Starship>>;
    fn fetch_vehicles(&mut self, request: &PageRequest) -> Result<Page<Vehicle>>;
    fn fetch_planets(&mut self, request: &PageRequest) -> Result<Page<Planet>>;
    fn fetch_support_data(&mut self) -> Result<SupportData>;
    fn create_character(&mut self, form: &CharacterFormInput) -> Result<()>;
    fn update_character(&mut self, id: CharacterId, form: &CharacterFormInput) -> Result<()>;
    fn delete_character(&mut self, id: CharacterId) -> Result<()>;
}

/// How an entity renders in its catalog table and detail view, plus the
/// server-side sort fields the keyboard cycles through.
pub trait CatalogRow {
    const COLUMNS: &'static [&'static str];
    const SORT_FIELDS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
    fn detail_lines(&self) -> Vec<String>;
}

fn dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_owned()
    } else {
        values.join(", ")
    }
}

impl CatalogRow for Character {
    const COLUMNS: &'static [&'static str] =
        &["name", "birth year", "gender", "height", "mass", "homeworld"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "birthYear", "gender", "height"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&self.birth_year),
            dash(&self.gender),
            dash(&self.height),
            dash(&self.mass),
            self.homeworld.clone().unwrap_or_else(|| "-".to_owned()),
        ]
    }

    fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("name: {}", self.name),
            format!("birth year: {}", dash(&self.birth_year)),
            format!("gender: {}", dash(&self.gender)),
            format!("height: {}", dash(&self.height)),
            format!("mass: {}", dash(&self.mass)),
            format!("hair color: {}", dash(&self.hair_color)),
            format!("skin color: {}", dash(&self.skin_color)),
            format!("eye color: {}", dash(&self.eye_color)),
            format!(
                "homeworld: {}",
                self.homeworld.clone().unwrap_or_else(|| "-".to_owned())
            ),
            format!("films: {}", join_or_dash(&self.films)),
            format!("species: {}", join_or_dash(&self.species)),
            format!("starships: {}", join_or_dash(&self.starships)),
            format!("vehicles: {}", join_or_dash(&self.vehicles)),
        ]
    }
}

impl CatalogRow for Film {
    const COLUMNS: &'static [&'static str] = &["title", "episode", "director", "release date"];
    const SORT_FIELDS: &'static [&'static str] = &["title", "director", "releaseDate"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.episode_id.to_string(),
            dash(&self.director),
            dash(&self.release_date),
        ]
    }

    fn detail_lines(&self) -> Vec<String> {
        let crawl: String = self.opening_crawl.chars().take(160).collect();
        vec![
            format!("title: {}", self.title),
            format!("episode: {}", self.episode_id),
            format!("director: {}", dash(&self.director)),
            format!("producer: {}", dash(&self.producer)),
            format!("release date: {}", dash(&self.release_date)),
            format!("opening crawl: {crawl}"),
        ]
    }
}

impl CatalogRow for Species {
    const COLUMNS: &'static [&'static str] = &["name", "classification", "designation", "language"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "classification", "language"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&self.classification),
            dash(&self.designation),
            dash(&self.language),
        ]
    }

    fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("name: {}", self.name),
            format!("classification: {}", dash(&self.classification)),
            format!("designation: {}", dash(&self.designation)),
            format!("average height: {}", dash(&self.average_height)),
            format!("average lifespan: {}", dash(&self.average_lifespan)),
            format!("language: {}", dash(&self.language)),
            format!(
                "homeworld: {}",
                self.homeworld.clone().unwrap_or_else(|| "-".to_owned())
            ),
        ]
    }
}

impl CatalogRow for Starship {
    const COLUMNS: &'static [&'static str] = &["name", "model", "class", "crew"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "model", "starshipClass"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&self.model),
            dash(&self.starship_class),
            dash(&self.crew),
        ]
    }

    fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("name: {}", self.name),
            format!("model: {}", dash(&self.model)),
            format!("manufacturer: {}", dash(&self.manufacturer)),
            format!("class: {}", dash(&self.starship_class)),
            format!("cost: {}", dash(&self.cost_in_credits)),
            format!("hyperdrive rating: {}", dash(&self.hyperdrive_rating)),
            format!("crew: {}", dash(&self.crew)),
            format!("passengers: {}", dash(&self.passengers)),
        ]
    }
}

impl CatalogRow for Vehicle {
    const COLUMNS: &'static [&'static str] = &["name", "model", "class", "crew"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "model", "vehicleClass"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&self.model),
            dash(&self.vehicle_class),
            dash(&self.crew),
        ]
    }

    fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("name: {}", self.name),
            format!("model: {}", dash(&self.model)),
            format!("manufacturer: {}", dash(&self.manufacturer)),
            format!("class: {}", dash(&self.vehicle_class)),
            format!("cost: {}", dash(&self.cost_in_credits)),
            format!("crew: {}", dash(&self.crew)),
            format!("passengers: {}", dash(&self.passengers)),
        ]
    }
}

impl CatalogRow for Planet {
    const COLUMNS: &'static [&'static str] = &["name", "climate", "terrain", "population"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "climate", "population"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&self.climate),
            dash(&self.terrain),
            dash(&self.population),
        ]
    }

    fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("name: {}", self.name),
            format!("climate: {}", dash(&self.climate)),
            format!("terrain: {}", dash(&self.terrain)),
            format!("population: {}", dash(&self.population)),
            format!("gravity: {}", dash(&self.gravity)),
            format!("diameter: {}", dash(&self.diameter)),
            format!("rotation period: {}", dash(&self.rotation_period)),
            format!("orbital period: {}", dash(&self.orbital_period)),
        ]
    }
}

/// One catalog listing plus its row cursor.
#[derive(Debug, Clone)]
struct Listing<T> {
    browser: Browser<T>,
    selected: usize,
}

impl<T> Listing<T> {
    fn for_screen(screen: ScreenKind) -> Self {
        Self {
            browser: Browser::for_screen(screen),
            selected: 0,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.browser.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.browser.rows.len() as isize - 1;
        let next = (self.selected as isize + delta).clamp(0, last);
        self.selected = next as usize;
    }

    fn clamp_selection(&mut self) {
        if self.browser.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.browser.rows.len() {
            self.selected = self.browser.rows.len() - 1;
        }
    }
}

/// In-progress text for the fields the character form edits as free
/// text: relation id lists and the homeworld id. Everything else edits
/// the form strings directly.
#[derive(Debug, Clone, Default)]
struct FormUiState {
    homeworld_text: String,
    films_text: String,
    species_text: String,
    starships_text: String,
    vehicles_text: String,
    cursor: usize,
}

const FORM_FIELDS: [&str; 14] = [
    "name",
    "birth year",
    "gender",
    "height",
    "mass",
    "hair color",
    "skin color",
    "eye color",
    "homeworld id",
    "film ids",
    "species ids",
    "starship ids",
    "vehicle ids",
    "url",
];

fn form_ui_from(form: &CharacterFormInput) -> FormUiState {
    FormUiState {
        homeworld_text: form
            .homeworld_id
            .map(|id| id.get().to_string())
            .unwrap_or_default(),
        films_text: form.films.entry_text(),
        species_text: form.species.entry_text(),
        starships_text: form.starships.entry_text(),
        vehicles_text: form.vehicles.entry_text(),
        cursor: 0,
    }
}

fn form_field_mut<'a>(
    form: &'a mut CharacterFormInput,
    ui: &'a mut FormUiState,
    index: usize,
) -> &'a mut String {
    match index {
        0 => &mut form.name,
        1 => &mut form.birth_year,
        2 => &mut form.gender,
        3 => &mut form.height,
        4 => &mut form.mass,
        5 => &mut form.hair_color,
        6 => &mut form.skin_color,
        7 => &mut form.eye_color,
        8 => &mut ui.homeworld_text,
        9 => &mut ui.films_text,
        10 => &mut ui.species_text,
        11 => &mut ui.starships_text,
        12 => &mut ui.vehicles_text,
        _ => &mut form.url,
    }
}

fn form_field_value(form: &CharacterFormInput, ui: &FormUiState, index: usize) -> String {
    match index {
        0 => form.name.clone(),
        1 => form.birth_year.clone(),
        2 => form.gender.clone(),
        3 => form.height.clone(),
        4 => form.mass.clone(),
        5 => form.hair_color.clone(),
        6 => form.skin_color.clone(),
        7 => form.eye_color.clone(),
        8 => ui.homeworld_text.clone(),
        9 => ui.films_text.clone(),
        10 => ui.species_text.clone(),
        11 => ui.starships_text.clone(),
        12 => ui.vehicles_text.clone(),
        _ => form.url.clone(),
    }
}

/// Fold the free-text entries back into the form. Relation labels stay
/// as they were; the homeworld label resolves against the support data
/// so the listing shows a name, not an id.
fn apply_form_ui(form: &mut CharacterFormInput, ui: &FormUiState, support: &SupportData) {
    form.films.set_from_text(&ui.films_text);
    form.species.set_from_text(&ui.species_text);
    form.starships.set_from_text(&ui.starships_text);
    form.vehicles.set_from_text(&ui.vehicles_text);
    form.homeworld_id = ui
        .homeworld_text
        .trim()
        .parse::<i64>()
        .ok()
        .map(PlanetId::new);
    form.homeworld = form
        .homeworld_id
        .and_then(|id| support.planet_label(id))
        .map(str::to_owned);
}

pub struct ViewData {
    characters: Listing<Character>,
    films: Listing<Film>,
    species: Listing<Species>,
    starships: Listing<Starship>,
    vehicles: Listing<Vehicle>,
    planets: Listing<Planet>,
    support: SupportState,
    editor: EditorState,
    form_ui: Option<FormUiState>,
    search_input: String,
    home_cursor: usize,
    detail_lines: Vec<String>,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            characters: Listing::for_screen(ScreenKind::Characters),
            films: Listing::for_screen(ScreenKind::Films),
            species: Listing::for_screen(ScreenKind::Species),
            starships: Listing::for_screen(ScreenKind::Starships),
            vehicles: Listing::for_screen(ScreenKind::Vehicles),
            planets: Listing::for_screen(ScreenKind::Planets),
            support: SupportState::default(),
            editor: EditorState::default(),
            form_ui: None,
            search_input: String::new(),
            home_cursor: 0,
            detail_lines: Vec::new(),
            status_token: 0,
        }
    }
}

enum InternalEvent {
    ClearStatus { token: u64 },
}

enum ListingTrigger {
    Search(String),
    ToggleSort,
    NextSortField,
    GoTo(i64),
    NextPage,
    PrevPage,
    Reload,
}

fn current_sort_field<T: CatalogRow>(browser: &Browser<T>) -> String {
    browser
        .query
        .sort
        .as_ref()
        .map(|sort| sort.field.clone())
        .unwrap_or_else(|| T::SORT_FIELDS[0].to_owned())
}

fn next_sort_field<T: CatalogRow>(browser: &Browser<T>) -> String {
    let fields = T::SORT_FIELDS;
    let index = browser
        .query
        .sort
        .as_ref()
        .and_then(|sort| fields.iter().position(|field| *field == sort.field));
    match index {
        Some(position) => fields[(position + 1) % fields.len()].to_owned(),
        None => fields[0].to_owned(),
    }
}

fn drive_listing<T, F>(listing: &mut Listing<T>, trigger: &ListingTrigger, fetch: F)
where
    T: CatalogRow,
    F: FnOnce(&PageRequest) -> Result<Page<T>>,
{
    let request = match trigger {
        ListingTrigger::Search(text) => Some(listing.browser.search_changed(text)),
        ListingTrigger::ToggleSort => {
            let field = current_sort_field(&listing.browser);
            Some(listing.browser.change_sort(&field))
        }
        ListingTrigger::NextSortField => {
            let field = next_sort_field(&listing.browser);
            Some(listing.browser.change_sort(&field))
        }
        ListingTrigger::GoTo(page) => listing.browser.go_to_page(*page),
        ListingTrigger::NextPage => listing.browser.next_page(),
        ListingTrigger::PrevPage => listing.browser.prev_page(),
        ListingTrigger::Reload => Some(listing.browser.reload()),
    };
    if let Some(request) = request {
        listing.browser.finish(fetch(&request));
        listing.clamp_selection();
    }
}

fn apply_trigger<R: AppRuntime>(
    screen: ScreenKind,
    runtime: &mut R,
    view_data: &mut ViewData,
    trigger: ListingTrigger,
) {
    match screen {
        ScreenKind::Home => {}
        ScreenKind::Characters => drive_listing(&mut view_data.characters, &trigger, |request| {
            runtime.fetch_characters(request)
        }),
        ScreenKind::Films => drive_listing(&mut view_data.films, &trigger, |request| {
            runtime.fetch_films(request)
        }),
        ScreenKind::Species => drive_listing(&mut view_data.species, &trigger, |request| {
            runtime.fetch_species(request)
        }),
        ScreenKind::Starships => drive_listing(&mut view_data.starships, &trigger, |request| {
            runtime.fetch_starships(request)
        }),
        ScreenKind::Vehicles => drive_listing(&mut view_data.vehicles, &trigger, |request| {
            runtime.fetch_vehicles(request)
        }),
        ScreenKind::Planets => drive_listing(&mut view_data.planets, &trigger, |request| {
            runtime.fetch_planets(request)
        }),
    }
}

fn load_fresh<T, F>(screen: ScreenKind, fetch: F) -> Listing<T>
where
    F: FnOnce(&PageRequest) -> Result<Page<T>>,
{
    let mut listing = Listing::for_screen(screen);
    let request = listing.browser.reload();
    listing.browser.finish(fetch(&request));
    listing
}

/// Entering a screen always starts from scratch: default query, page 0,
/// a fresh fetch. Nothing survives navigation. The character screen also
/// refreshes the relation lookups; their failure never blocks the rows.
fn activate_screen<R: AppRuntime>(state: &AppState, runtime: &mut R, view_data: &mut ViewData) {
    match state.active_screen {
        ScreenKind::Home => {}
        ScreenKind::Characters => {
            view_data.characters = load_fresh(ScreenKind::Characters, |request| {
                runtime.fetch_characters(request)
            });
            view_data.support = SupportState::default();
            view_data.support.apply(runtime.fetch_support_data());
        }
        ScreenKind::Films => {
            view_data.films = load_fresh(ScreenKind::Films, |request| runtime.fetch_films(request));
        }
        ScreenKind::Species => {
            view_data.species =
                load_fresh(ScreenKind::Species, |request| runtime.fetch_species(request));
        }
        ScreenKind::Starships => {
            view_data.starships = load_fresh(ScreenKind::Starships, |request| {
                runtime.fetch_starships(request)
            });
        }
        ScreenKind::Vehicles => {
            view_data.vehicles = load_fresh(ScreenKind::Vehicles, |request| {
                runtime.fetch_vehicles(request)
            });
        }
        ScreenKind::Planets => {
            view_data.planets =
                load_fresh(ScreenKind::Planets, |request| runtime.fetch_planets(request));
        }
    }
}

fn active_pages(state: &AppState, view_data: &ViewData) -> Vec<i64> {
    match state.active_screen {
        ScreenKind::Home => Vec::new(),
        ScreenKind::Characters => view_data.characters.browser.pages.clone(),
        ScreenKind::Films => view_data.films.browser.pages.clone(),
        ScreenKind::Species => view_data.species.browser.pages.clone(),
        ScreenKind::Starships => view_data.starships.browser.pages.clone(),
        ScreenKind::Vehicles => view_data.vehicles.browser.pages.clone(),
        ScreenKind::Planets => view_data.planets.browser.pages.clone(),
    }
}

fn active_search(state: &AppState, view_data: &ViewData) -> String {
    match state.active_screen {
        ScreenKind::Home => String::new(),
        ScreenKind::Characters => view_data.characters.browser.query.search.clone(),
        ScreenKind::Films => view_data.films.browser.query.search.clone(),
        ScreenKind::Species => view_data.species.browser.query.search.clone(),
        ScreenKind::Starships => view_data.starships.browser.query.search.clone(),
        ScreenKind::Vehicles => view_data.vehicles.browser.query.search.clone(),
        ScreenKind::Planets => view_data.planets.browser.query.search.clone(),
    }
}

fn move_active_selection(state: &AppState, view_data: &mut ViewData, delta: isize) {
    match state.active_screen {
        ScreenKind::Home => {
            let last = ScreenKind::CATALOGS.len() as isize - 1;
            let next = (view_data.home_cursor as isize + delta).clamp(0, last);
            view_data.home_cursor = next as usize;
        }
        ScreenKind::Characters => view_data.characters.move_selection(delta),
        ScreenKind::Films => view_data.films.move_selection(delta),
        ScreenKind::Species => view_data.species.move_selection(delta),
        ScreenKind::Starships => view_data.starships.move_selection(delta),
        ScreenKind::Vehicles => view_data.vehicles.move_selection(delta),
        ScreenKind::Planets => view_data.planets.move_selection(delta),
    }
}

fn selected_detail_lines(state: &AppState, view_data: &ViewData) -> Vec<String> {
    fn lines_of<T: CatalogRow>(listing: &Listing<T>) -> Vec<String> {
        listing
            .browser
            .rows
            .get(listing.selected)
            .map(CatalogRow::detail_lines)
            .unwrap_or_default()
    }

    match state.active_screen {
        ScreenKind::Home => Vec::new(),
        ScreenKind::Characters => lines_of(&view_data.characters),
        ScreenKind::Films => lines_of(&view_data.films),
        ScreenKind::Species => lines_of(&view_data.species),
        ScreenKind::Starships => lines_of(&view_data.starships),
        ScreenKind::Vehicles => lines_of(&view_data.vehicles),
        ScreenKind::Planets => lines_of(&view_data.planets),
    }
}

fn selected_character(view_data: &ViewData) -> Option<&Character> {
    view_data
        .characters
        .browser
        .rows
        .get(view_data.characters.selected)
}

/// Human pager line: 1-based page numbers, the current page bracketed,
/// the ellipsis slot rendered literally. Digits jump by position.
pub fn pager_line(pages: &[i64], current: i64) -> String {
    pages
        .iter()
        .map(|page| {
            if *page == ELLIPSIS {
                "...".to_owned()
            } else if *page == current {
                format!("[{}]", page + 1)
            } else {
                (page + 1).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    activate_screen(state, runtime, &mut view_data);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.mode {
        AppMode::Nav => handle_nav_key(state, runtime, view_data, key),
        AppMode::Search => {
            handle_search_key(state, runtime, view_data, key);
            false
        }
        AppMode::Form => {
            handle_form_key(state, runtime, view_data, internal_tx, key);
            false
        }
        AppMode::Confirm => {
            handle_confirm_key(state, runtime, view_data, internal_tx, key);
            false
        }
        AppMode::Detail => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                view_data.detail_lines.clear();
                state.dispatch(AppCommand::ExitToNav);
            }
            false
        }
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::NextScreen);
            activate_screen(state, runtime, view_data);
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::PrevScreen);
            activate_screen(state, runtime, view_data);
        }
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            move_active_selection(state, view_data, 1);
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            move_active_selection(state, view_data, -1);
        }
        (KeyCode::Enter, _) => {
            if state.active_screen == ScreenKind::Home {
                let target = ScreenKind::CATALOGS[view_data.home_cursor];
                state.dispatch(AppCommand::SetScreen(target));
                activate_screen(state, runtime, view_data);
            } else {
                let lines = selected_detail_lines(state, view_data);
                if !lines.is_empty() {
                    view_data.detail_lines = lines;
                    state.dispatch(AppCommand::OpenDetail);
                }
            }
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) => {
            apply_trigger(
                state.active_screen,
                runtime,
                view_data,
                ListingTrigger::NextPage,
            );
        }
        (KeyCode::Char('p'), KeyModifiers::NONE) => {
            apply_trigger(
                state.active_screen,
                runtime,
                view_data,
                ListingTrigger::PrevPage,
            );
        }
        (KeyCode::Char(digit), KeyModifiers::NONE) if digit.is_ascii_digit() && digit != '0' => {
            let position = digit as usize - '1' as usize;
            let pages = active_pages(state, view_data);
            if let Some(page) = pages.get(position) {
                apply_trigger(
                    state.active_screen,
                    runtime,
                    view_data,
                    ListingTrigger::GoTo(*page),
                );
            }
        }
        (KeyCode::Char('/'), KeyModifiers::NONE) => {
            if state.active_screen != ScreenKind::Home {
                view_data.search_input = active_search(state, view_data);
                state.dispatch(AppCommand::EnterSearch);
            }
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => {
            apply_trigger(
                state.active_screen,
                runtime,
                view_data,
                ListingTrigger::ToggleSort,
            );
        }
        (KeyCode::Char('S'), _) => {
            apply_trigger(
                state.active_screen,
                runtime,
                view_data,
                ListingTrigger::NextSortField,
            );
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            apply_trigger(
                state.active_screen,
                runtime,
                view_data,
                ListingTrigger::Reload,
            );
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            if state.active_screen == ScreenKind::Characters {
                view_data.editor.open_create();
                if let Some(form) = &view_data.editor.form {
                    view_data.form_ui = Some(form_ui_from(form));
                }
                state.dispatch(AppCommand::OpenForm);
            }
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) => {
            if state.active_screen == ScreenKind::Characters {
                let character = selected_character(view_data).cloned();
                if let Some(character) = character {
                    view_data.editor.open_edit(&character);
                    if let Some(form) = &view_data.editor.form {
                        view_data.form_ui = Some(form_ui_from(form));
                    }
                    state.dispatch(AppCommand::OpenForm);
                }
            }
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            if state.active_screen == ScreenKind::Characters {
                let id = selected_character(view_data).map(|character| character.id);
                if view_data.editor.request_delete(id) {
                    state.dispatch(AppCommand::OpenConfirm);
                }
            }
        }
        (KeyCode::Esc, _) => {
            state.dispatch(AppCommand::ClearStatus);
        }
        _ => {}
    }
    false
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Enter => {
            let text = view_data.search_input.clone();
            state.dispatch(AppCommand::ExitToNav);
            apply_trigger(
                state.active_screen,
                runtime,
                view_data,
                ListingTrigger::Search(text),
            );
        }
        KeyCode::Backspace => {
            view_data.search_input.pop();
        }
        KeyCode::Char(character) => {
            view_data.search_input.push(character);
        }
        _ => {}
    }
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if view_data.editor.notice.is_some() {
        // Blocking notice: any key dismisses it, nothing else happens.
        view_data.editor.clear_notice();
        return;
    }

    match key.code {
        KeyCode::Esc => {
            view_data.editor.cancel();
            view_data.form_ui = None;
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(ui) = &mut view_data.form_ui {
                ui.cursor = (ui.cursor + 1) % FORM_FIELDS.len();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(ui) = &mut view_data.form_ui {
                ui.cursor = (ui.cursor + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
            }
        }
        KeyCode::Enter => {
            save_form(state, runtime, view_data, internal_tx);
        }
        KeyCode::Backspace => {
            if let (Some(form), Some(ui)) = (&mut view_data.editor.form, &mut view_data.form_ui) {
                let cursor = ui.cursor;
                form_field_mut(form, ui, cursor).pop();
            }
        }
        KeyCode::Char(character) => {
            if let (Some(form), Some(ui)) = (&mut view_data.editor.form, &mut view_data.form_ui) {
                let cursor = ui.cursor;
                form_field_mut(form, ui, cursor).push(character);
            }
        }
        _ => {}
    }
}

fn save_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let (Some(form), Some(ui)) = (&mut view_data.editor.form, &view_data.form_ui) {
        apply_form_ui(form, ui, &view_data.support.data);
    }

    // An edit form without an id yields no request; the form stays open.
    let Some(request) = view_data.editor.submit() else {
        return;
    };

    let (kind, result) = match request {
        MutationRequest::Create(form) => (MutationKind::Create, runtime.create_character(&form)),
        MutationRequest::Update(id, form) => {
            (MutationKind::Update, runtime.update_character(id, &form))
        }
        MutationRequest::Delete(id) => (MutationKind::Delete, runtime.delete_character(id)),
    };

    match view_data.editor.apply_result(kind, result) {
        MutationOutcome::Reload => {
            view_data.form_ui = None;
            state.dispatch(AppCommand::ExitToNav);
            apply_trigger(
                ScreenKind::Characters,
                runtime,
                view_data,
                ListingTrigger::Reload,
            );
            emit_status(state, view_data, internal_tx, "character saved");
        }
        MutationOutcome::Failed => {}
    }
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let confirmed = view_data.editor.resolve_delete(true);
            state.dispatch(AppCommand::ExitToNav);
            if let Some(id) = confirmed {
                let result = runtime.delete_character(id);
                match view_data.editor.apply_result(MutationKind::Delete, result) {
                    MutationOutcome::Reload => {
                        apply_trigger(
                            ScreenKind::Characters,
                            runtime,
                            view_data,
                            ListingTrigger::Reload,
                        );
                        emit_status(state, view_data, internal_tx, "character deleted");
                    }
                    MutationOutcome::Failed => {
                        let notice = view_data
                            .editor
                            .notice
                            .take()
                            .unwrap_or_else(|| "Failed to delete character".to_owned());
                        emit_status(state, view_data, internal_tx, notice);
                    }
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_data.editor.resolve_delete(false);
            state.dispatch(AppCommand::ExitToNav);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let tab_titles: Vec<&str> = ScreenKind::ALL.iter().map(|screen| screen.title()).collect();
    let selected = ScreenKind::ALL
        .iter()
        .position(|screen| *screen == state.active_screen)
        .unwrap_or(0);
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title("holocron"))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, layout[0]);

    match state.active_screen {
        ScreenKind::Home => render_home(frame, layout[1], view_data),
        ScreenKind::Characters => {
            render_listing(frame, layout[1], &view_data.characters, "Characters");
        }
        ScreenKind::Films => render_listing(frame, layout[1], &view_data.films, "Films"),
        ScreenKind::Species => render_listing(frame, layout[1], &view_data.species, "Species"),
        ScreenKind::Starships => {
            render_listing(frame, layout[1], &view_data.starships, "Starships");
        }
        ScreenKind::Vehicles => render_listing(frame, layout[1], &view_data.vehicles, "Vehicles"),
        ScreenKind::Planets => render_listing(frame, layout[1], &view_data.planets, "Planets"),
    }

    let status = state.status_line.clone().unwrap_or_else(|| {
        "q quit  tab screen  / search  s/S sort  n/p page  a add  e edit  d delete  enter detail"
            .to_owned()
    });
    let status_widget = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status_widget, layout[2]);

    match state.mode {
        AppMode::Search => render_search_overlay(frame, state, view_data),
        AppMode::Form => render_form_overlay(frame, view_data),
        AppMode::Confirm => render_confirm_overlay(frame, view_data),
        AppMode::Detail => render_detail_overlay(frame, view_data),
        AppMode::Nav => {}
    }
}

fn render_home(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let mut lines = vec!["Browse the catalog:".to_owned(), String::new()];
    for (index, screen) in ScreenKind::CATALOGS.iter().enumerate() {
        let marker = if index == view_data.home_cursor {
            "> "
        } else {
            "  "
        };
        lines.push(format!("{marker}{}", screen.title()));
    }
    lines.push(String::new());
    lines.push("j/k move, enter opens".to_owned());

    let body = Paragraph::new(lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title("Home"));
    frame.render_widget(body, area);
}

fn render_listing<T: CatalogRow>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    listing: &Listing<T>,
    title: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let header = Row::new(
        T::COLUMNS
            .iter()
            .map(|column| Cell::from(*column))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = listing
        .browser
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let style = if index == listing.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(row.cells().into_iter().map(Cell::from).collect::<Vec<_>>()).style(style)
        })
        .collect::<Vec<_>>();

    let widths = vec![Constraint::Fill(1); T::COLUMNS.len()];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{title} ({})", listing.browser.total_elements)),
    );
    frame.render_widget(table, chunks[0]);

    let footer = Paragraph::new(listing_footer(listing)).style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, chunks[1]);
}

fn listing_footer<T: CatalogRow>(listing: &Listing<T>) -> String {
    let browser = &listing.browser;
    if browser.view.is_loading {
        return "loading...".to_owned();
    }
    if browser.view.has_error {
        return browser.view.error_message.clone();
    }
    if browser.view.is_empty {
        return format!("No {} found.", browser.entity_label());
    }

    let mut footer = pager_line(&browser.pages, browser.query.page);
    if let Some(sort) = &browser.query.sort {
        footer.push_str(&format!("  sort {}", sort.param()));
    }
    if !browser.query.search.is_empty() {
        footer.push_str(&format!("  search {:?}", browser.query.search));
    }
    footer
}

fn render_search_overlay(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let area = centered_rect(50, 14, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(format!("{}_", view_data.search_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("search {}", state.active_screen.label())),
    );
    frame.render_widget(body, area);
}

fn render_form_overlay(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let (Some(form), Some(ui)) = (&view_data.editor.form, &view_data.form_ui) else {
        return;
    };

    let mut lines = Vec::with_capacity(FORM_FIELDS.len() + 3);
    for (index, label) in FORM_FIELDS.iter().enumerate() {
        let marker = if index == ui.cursor { "> " } else { "  " };
        lines.push(format!(
            "{marker}{label}: {}",
            form_field_value(form, ui, index)
        ));
    }
    lines.push(String::new());
    if let Some(notice) = &view_data.editor.notice {
        lines.push(notice.clone());
    } else {
        lines.push("enter saves, esc cancels, tab moves".to_owned());
    }

    let title = if view_data.editor.create_mode {
        "New character"
    } else {
        "Edit character"
    };
    let area = centered_rect(60, 72, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(body, area);
}

fn render_confirm_overlay(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let Some(pending) = &view_data.editor.pending_delete else {
        return;
    };
    let area = centered_rect(48, 20, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(format!("{}\n\n[y] delete   [n] keep", pending.message)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm")
            .style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(body, area);
}

fn render_detail_overlay(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(view_data.detail_lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title("Detail"));
    frame.render_widget(body, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, FORM_FIELDS, InternalEvent, ListingTrigger, ViewData, activate_screen,
        apply_form_ui, apply_trigger, form_ui_from, handle_key_event, pager_line,
    };
    use anyhow::{Result, bail};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use holocron_app::pager::ELLIPSIS;
    use holocron_app::{
        AppMode, AppState, Character, CharacterFormInput, CharacterId, Film, Page, PageRequest,
        Planet, ScreenKind, Species, Starship, SupportData, Vehicle,
    };
    use holocron_testkit::SampleCatalog;
    use std::sync::mpsc::{self, Receiver, Sender};

    struct FakeRuntime {
        catalog: SampleCatalog,
        character_requests: Vec<PageRequest>,
        support_loads: usize,
        deletes: Vec<CharacterId>,
        creates: usize,
        fail_support: bool,
        fail_mutations: bool,
    }

    impl FakeRuntime {
        fn new() -> Self {
            Self {
                catalog: SampleCatalog::generate(),
                character_requests: Vec::new(),
                support_loads: 0,
                deletes: Vec::new(),
                creates: 0,
                fail_support: false,
                fail_mutations: false,
            }
        }
    }

    impl AppRuntime for FakeRuntime {
        fn fetch_characters(&mut self, request: &PageRequest) -> Result<Page<Character>> {
            self.character_requests.push(request.clone());
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
            self.support_loads += 1;
            if self.fail_support {
                bail!("support endpoint down");
            }
            Ok(self.catalog.support_data())
        }

        fn create_character(&mut self, form: &CharacterFormInput) -> Result<()> {
            if self.fail_mutations {
                bail!("create rejected");
            }
            self.creates += 1;
            self.catalog.create_character(form);
            Ok(())
        }

        fn update_character(&mut self, id: CharacterId, form: &CharacterFormInput) -> Result<()> {
            if self.fail_mutations {
                bail!("update rejected");
            }
            self.catalog.update_character(id, form)
        }

        fn delete_character(&mut self, id: CharacterId) -> Result<()> {
            self.deletes.push(id);
            if self.fail_mutations {
                bail!("delete rejected");
            }
            self.catalog.delete_character(id)
        }
    }

    struct Harness {
        state: AppState,
        view_data: ViewData,
        runtime: FakeRuntime,
        tx: Sender<InternalEvent>,
        _rx: Receiver<InternalEvent>,
    }

    impl Harness {
        fn on_characters() -> Self {
            let state = AppState {
                active_screen: ScreenKind::Characters,
                ..AppState::default()
            };
            let mut view_data = ViewData::default();
            let mut runtime = FakeRuntime::new();
            activate_screen(&state, &mut runtime, &mut view_data);
            let (tx, rx) = mpsc::channel();
            Self {
                state,
                view_data,
                runtime,
                tx,
                _rx: rx,
            }
        }

        fn key(&mut self, code: KeyCode) -> bool {
            handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                KeyEvent::new(code, KeyModifiers::NONE),
            )
        }

        fn press(&mut self, character: char) -> bool {
            self.key(KeyCode::Char(character))
        }

        fn type_text(&mut self, text: &str) {
            for character in text.chars() {
                self.press(character);
            }
        }
    }

    #[test]
    fn activating_characters_loads_rows_and_support_data() {
        let harness = Harness::on_characters();
        assert_eq!(harness.view_data.characters.browser.rows.len(), 15);
        assert!(harness.view_data.support.loaded);
        assert_eq!(harness.runtime.support_loads, 1);

        let request = &harness.runtime.character_requests[0];
        assert_eq!(request.page, 0);
        assert_eq!(request.sort.as_deref(), Some("name,asc"));
        assert_eq!(request.search, None);
    }

    #[test]
    fn support_failure_never_blocks_the_listing() {
        let state = AppState {
            active_screen: ScreenKind::Characters,
            ..AppState::default()
        };
        let mut view_data = ViewData::default();
        let mut runtime = FakeRuntime::new();
        runtime.fail_support = true;
        activate_screen(&state, &mut runtime, &mut view_data);

        assert!(!view_data.characters.browser.rows.is_empty());
        assert!(view_data.support.has_error);
        assert_eq!(view_data.support.error_message, "Failed to load support data.");
    }

    #[test]
    fn confirmed_delete_reloads_with_the_current_query() {
        let mut harness = Harness::on_characters();
        harness.press('n');
        assert_eq!(harness.view_data.characters.browser.query.page, 1);
        let before = harness.runtime.character_requests.len();

        harness.press('d');
        assert_eq!(harness.state.mode, AppMode::Confirm);
        assert_eq!(harness.runtime.character_requests.len(), before);

        harness.press('y');
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.runtime.deletes.len(), 1);
        assert_eq!(harness.runtime.character_requests.len(), before + 1);

        let reload = harness.runtime.character_requests.last().expect("reload");
        assert_eq!(reload.page, 1);
        assert_eq!(reload.sort.as_deref(), Some("name,asc"));
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("character deleted")
        );
    }

    #[test]
    fn declined_delete_issues_no_fetch_and_no_delete() {
        let mut harness = Harness::on_characters();
        let before = harness.runtime.character_requests.len();

        harness.press('d');
        harness.press('n');
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert!(harness.runtime.deletes.is_empty());
        assert_eq!(harness.runtime.character_requests.len(), before);
        assert!(harness.view_data.editor.pending_delete.is_none());
    }

    #[test]
    fn failed_delete_surfaces_the_fixed_notice() {
        let mut harness = Harness::on_characters();
        harness.runtime.fail_mutations = true;
        let before = harness.runtime.character_requests.len();

        harness.press('d');
        harness.press('y');
        assert_eq!(harness.runtime.character_requests.len(), before);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("Failed to delete character")
        );
    }

    #[test]
    fn search_applies_on_enter_and_resets_the_page() {
        let mut harness = Harness::on_characters();
        harness.press('n');

        harness.press('/');
        assert_eq!(harness.state.mode, AppMode::Search);
        harness.type_text("ve");
        harness.key(KeyCode::Enter);

        assert_eq!(harness.state.mode, AppMode::Nav);
        let request = harness.runtime.character_requests.last().expect("search");
        assert_eq!(request.page, 0);
        assert_eq!(request.search.as_deref(), Some("ve"));
    }

    #[test]
    fn escape_abandons_the_search_without_fetching() {
        let mut harness = Harness::on_characters();
        let before = harness.runtime.character_requests.len();

        harness.press('/');
        harness.type_text("zzz");
        harness.key(KeyCode::Esc);

        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.runtime.character_requests.len(), before);
    }

    #[test]
    fn sort_keys_flip_and_cycle_fields() {
        let mut harness = Harness::on_characters();

        harness.press('s');
        let request = harness.runtime.character_requests.last().expect("sort");
        assert_eq!(request.sort.as_deref(), Some("name,desc"));
        assert_eq!(request.page, 0);

        harness.press('s');
        let request = harness.runtime.character_requests.last().expect("sort");
        assert_eq!(request.sort.as_deref(), Some("name,asc"));

        harness.press('S');
        let request = harness.runtime.character_requests.last().expect("sort");
        assert_eq!(request.sort.as_deref(), Some("birthYear,asc"));
    }

    #[test]
    fn digit_jump_targets_the_window_slot_and_skips_the_ellipsis() {
        let mut harness = Harness::on_characters();

        // Widen the window artificially: ten pages puts an ellipsis at
        // slot four when the third page is current.
        let content = harness.view_data.characters.browser.rows.clone();
        harness.view_data.characters.browser.query.page = 2;
        harness.view_data.characters.browser.finish(Ok(Page {
            content,
            total_elements: 150,
        }));
        assert_eq!(
            harness.view_data.characters.browser.pages,
            vec![0, 1, 2, 3, ELLIPSIS, 9]
        );
        let before = harness.runtime.character_requests.len();

        harness.press('5');
        assert_eq!(harness.runtime.character_requests.len(), before);

        harness.press('6');
        let request = harness.runtime.character_requests.last().expect("jump");
        assert_eq!(request.page, 9);
    }

    #[test]
    fn page_keys_stop_at_both_ends() {
        let mut harness = Harness::on_characters();
        let before = harness.runtime.character_requests.len();

        harness.press('p');
        assert_eq!(harness.runtime.character_requests.len(), before);

        // 57 sample characters at 15 per page: pages 0..=3.
        harness.press('n');
        harness.press('n');
        harness.press('n');
        harness.press('n');
        assert_eq!(harness.view_data.characters.browser.query.page, 3);
        assert_eq!(harness.runtime.character_requests.len(), before + 3);
    }

    #[test]
    fn create_flow_saves_and_reloads_the_listing() {
        let mut harness = Harness::on_characters();

        harness.press('a');
        assert_eq!(harness.state.mode, AppMode::Form);
        harness.type_text("Zev Marrak");
        let before = harness.runtime.character_requests.len();

        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.runtime.creates, 1);
        assert!(!harness.view_data.editor.is_open());
        assert_eq!(harness.runtime.character_requests.len(), before + 1);
        assert_eq!(harness.state.status_line.as_deref(), Some("character saved"));
    }

    #[test]
    fn failed_save_keeps_the_form_open_with_a_notice() {
        let mut harness = Harness::on_characters();
        harness.runtime.fail_mutations = true;

        harness.press('a');
        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.mode, AppMode::Form);
        assert!(harness.view_data.editor.is_open());
        assert_eq!(
            harness.view_data.editor.notice.as_deref(),
            Some("Failed to create character")
        );

        // Next key only dismisses the notice.
        harness.press('x');
        assert_eq!(harness.view_data.editor.notice, None);
        assert_eq!(harness.state.mode, AppMode::Form);
    }

    #[test]
    fn edit_save_without_id_leaves_the_form_open() {
        let mut harness = Harness::on_characters();

        harness.press('e');
        assert_eq!(harness.state.mode, AppMode::Form);
        if let Some(form) = &mut harness.view_data.editor.form {
            form.id = None;
        }
        let before = harness.runtime.character_requests.len();

        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.mode, AppMode::Form);
        assert!(harness.view_data.editor.is_open());
        assert_eq!(harness.view_data.editor.notice, None);
        assert_eq!(harness.runtime.character_requests.len(), before);
        assert_eq!(harness.runtime.creates, 0);
    }

    #[test]
    fn switching_screens_resets_query_state() {
        let mut harness = Harness::on_characters();
        harness.press('n');
        assert_eq!(harness.view_data.characters.browser.query.page, 1);

        harness.key(KeyCode::Tab);
        assert_eq!(harness.state.active_screen, ScreenKind::Films);

        harness.key(KeyCode::BackTab);
        assert_eq!(harness.state.active_screen, ScreenKind::Characters);
        assert_eq!(harness.view_data.characters.browser.query.page, 0);
        let request = harness.runtime.character_requests.last().expect("fresh");
        assert_eq!(request.page, 0);
        assert_eq!(harness.runtime.support_loads, 2);
    }

    #[test]
    fn detail_opens_for_the_selected_row_and_escape_closes() {
        let mut harness = Harness::on_characters();
        harness.press('j');
        let expected = harness.view_data.characters.browser.rows[1].name.clone();

        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.mode, AppMode::Detail);
        assert!(
            harness.view_data.detail_lines[0].contains(&expected),
            "detail should open on the second row"
        );

        harness.key(KeyCode::Esc);
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert!(harness.view_data.detail_lines.is_empty());
    }

    #[test]
    fn home_enter_opens_the_highlighted_catalog() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut runtime = FakeRuntime::new();
        let (tx, _rx) = mpsc::channel();

        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key(KeyCode::Char('j')));
        handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key(KeyCode::Enter));

        assert_eq!(state.active_screen, ScreenKind::Films);
        assert!(!view_data.films.browser.rows.is_empty());
    }

    #[test]
    fn form_text_folds_back_into_ids_and_homeworld_label() {
        let catalog = SampleCatalog::generate();
        let support = catalog.support_data();

        let mut form = CharacterFormInput::blank();
        let mut ui = form_ui_from(&form);
        ui.films_text = "1, 2,,abc,3".to_owned();
        ui.homeworld_text = " 2 ".to_owned();

        apply_form_ui(&mut form, &ui, &support);
        assert_eq!(form.films.ids, vec![1, 2, 3]);
        assert_eq!(form.homeworld_id.map(|id| id.get()), Some(2));
        assert_eq!(form.homeworld.as_deref(), support.planet_label(2.into()));
    }

    #[test]
    fn mutation_reload_keeps_search_and_sort_intact() {
        let mut harness = Harness::on_characters();
        harness.press('/');
        harness.type_text("dara");
        harness.key(KeyCode::Enter);
        harness.press('s');

        apply_trigger(
            ScreenKind::Characters,
            &mut harness.runtime,
            &mut harness.view_data,
            ListingTrigger::Reload,
        );
        let request = harness.runtime.character_requests.last().expect("reload");
        assert_eq!(request.search.as_deref(), Some("dara"));
        assert_eq!(request.sort.as_deref(), Some("name,desc"));
    }

    #[test]
    fn pager_line_brackets_the_current_page() {
        assert_eq!(pager_line(&[0, 1, 2, ELLIPSIS, 9], 2), "1 2 [3] ... 10");
        assert_eq!(pager_line(&[], 0), "");
    }

    #[test]
    fn form_cursor_wraps_in_both_directions() {
        let mut harness = Harness::on_characters();
        harness.press('a');

        harness.key(KeyCode::BackTab);
        let cursor = harness.view_data.form_ui.as_ref().expect("form ui").cursor;
        assert_eq!(cursor, FORM_FIELDS.len() - 1);

        harness.key(KeyCode::Tab);
        let cursor = harness.view_data.form_ui.as_ref().expect("form ui").cursor;
        assert_eq!(cursor, 0);
    }
}
