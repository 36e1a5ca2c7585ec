// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::pager::{self, ELLIPSIS, MAX_FULL_PAGES};
use crate::query::{ListQuery, PageRequest, SortSpec};
use crate::{Page, ScreenKind};

/// Render flags for one listing. `is_empty` only means anything when the
/// load finished without an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFlags {
    pub is_loading: bool,
    pub has_error: bool,
    pub error_message: String,
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub entity_label: &'static str,
    pub page_size: i64,
    pub default_sort: Option<SortSpec>,
}

impl BrowserConfig {
    /// Per-screen defaults: every catalog starts ascending on its display
    /// column, characters and films on `name`/`title` respectively.
    pub fn for_screen(screen: ScreenKind) -> Self {
        let default_sort = match screen {
            ScreenKind::Home => None,
            ScreenKind::Films => Some(SortSpec::ascending("title")),
            _ => Some(SortSpec::ascending("name")),
        };
        Self {
            entity_label: screen.label(),
            page_size: crate::query::DEFAULT_PAGE_SIZE,
            default_sort,
        }
    }
}

/// Generic paginated, searchable, sortable listing controller.
///
/// Owns the query state and the view flags; every state-changing trigger
/// hands back the [`PageRequest`] the caller must execute, and the
/// eventual response (or failure) comes back through [`Browser::finish`].
/// Whichever response is applied last wins; superseded responses are not
/// tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct Browser<T> {
    config: BrowserConfig,
    pub query: ListQuery,
    pub rows: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub pages: Vec<i64>,
    pub view: ViewFlags,
}

impl<T> Browser<T> {
    pub fn new(config: BrowserConfig) -> Self {
        let query = ListQuery::new(config.page_size, config.default_sort.clone());
        Self {
            config,
            query,
            rows: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            pages: Vec::new(),
            view: ViewFlags::default(),
        }
    }

    pub fn for_screen(screen: ScreenKind) -> Self {
        Self::new(BrowserConfig::for_screen(screen))
    }

    pub fn entity_label(&self) -> &'static str {
        self.config.entity_label
    }

    /// Enter the loading state and derive the request to execute.
    pub fn begin_load(&mut self) -> PageRequest {
        self.view.is_loading = true;
        self.view.has_error = false;
        self.view.error_message.clear();
        self.view.is_empty = false;
        self.query.request()
    }

    pub fn search_changed(&mut self, text: &str) -> PageRequest {
        self.query.set_search(text);
        self.begin_load()
    }

    pub fn change_sort(&mut self, field: &str) -> PageRequest {
        self.query.toggle_sort(field);
        self.begin_load()
    }

    /// Pager click. The ellipsis sentinel and the current page are both
    /// no-ops and issue no fetch.
    pub fn go_to_page(&mut self, page: i64) -> Option<PageRequest> {
        if page == ELLIPSIS || page == self.query.page {
            return None;
        }
        self.query.page = page;
        Some(self.begin_load())
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.query.page + 1 >= self.total_pages {
            return None;
        }
        self.query.page += 1;
        Some(self.begin_load())
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        if self.query.page <= 0 {
            return None;
        }
        self.query.page -= 1;
        Some(self.begin_load())
    }

    /// Reload at the current query state. Mutations funnel through this
    /// so the pager is always recomputed from fresh server totals.
    pub fn reload(&mut self) -> PageRequest {
        self.begin_load()
    }

    /// Apply a fetch outcome. Failures keep the previous rows and surface
    /// only a fixed per-entity message; the transport detail stays out of
    /// the view.
    pub fn finish(&mut self, outcome: Result<Page<T>>) {
        match outcome {
            Ok(page) => {
                self.rows = page.content;
                self.total_elements = page.total_elements;
                self.total_pages = pager::total_pages(self.total_elements, self.query.size);
                self.pages = pager::page_window(self.query.page, self.total_pages, MAX_FULL_PAGES);
                self.view.is_empty = self.rows.is_empty();
                self.view.is_loading = false;
            }
            Err(_) => {
                self.view.has_error = true;
                self.view.error_message = format!("Failed to load {}.", self.config.entity_label);
                self.view.is_loading = false;
            }
        }
    }
}
