// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::SortDirection;

pub const DEFAULT_PAGE_SIZE: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_owned(),
            direction: SortDirection::Asc,
        }
    }

    pub fn param(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// Parameters actually sent with a page fetch. Empty search and unset
/// sort are omitted rather than sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// The page/size/search/sort tuple governing one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: i64,
    pub size: i64,
    pub search: String,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    pub fn new(size: i64, sort: Option<SortSpec>) -> Self {
        Self {
            page: 0,
            size,
            search: String::new(),
            sort,
        }
    }

    pub fn request(&self) -> PageRequest {
        let search = if self.search.is_empty() {
            None
        } else {
            Some(self.search.clone())
        };
        PageRequest {
            page: self.page,
            size: self.size,
            search,
            sort: self.sort.as_ref().map(SortSpec::param),
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_owned();
        self.page = 0;
    }

    /// Column-header toggle: same field flips the direction, a new field
    /// starts over ascending. Either way the listing returns to page 0.
    pub fn toggle_sort(&mut self, field: &str) {
        let direction = match &self.sort {
            Some(sort) if sort.field == field => sort.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortSpec {
            field: field.to_owned(),
            direction,
        });
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{ListQuery, SortSpec};
    use crate::SortDirection;

    #[test]
    fn request_omits_empty_search_and_unset_sort() {
        let query = ListQuery::new(15, None);
        let request = query.request();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 15);
        assert_eq!(request.search, None);
        assert_eq!(request.sort, None);
    }

    #[test]
    fn request_carries_search_and_sort_params() {
        let mut query = ListQuery::new(15, Some(SortSpec::ascending("name")));
        query.set_search("sky");
        let request = query.request();
        assert_eq!(request.search.as_deref(), Some("sky"));
        assert_eq!(request.sort.as_deref(), Some("name,asc"));
    }

    #[test]
    fn toggling_same_field_flips_direction() {
        let mut query = ListQuery::new(15, Some(SortSpec::ascending("name")));
        query.toggle_sort("name");
        assert_eq!(query.request().sort.as_deref(), Some("name,desc"));
        query.toggle_sort("name");
        assert_eq!(query.request().sort.as_deref(), Some("name,asc"));
    }

    #[test]
    fn toggling_new_field_resets_to_ascending() {
        let mut query = ListQuery::new(15, Some(SortSpec {
            field: "name".to_owned(),
            direction: SortDirection::Desc,
        }));
        query.toggle_sort("gender");
        assert_eq!(query.request().sort.as_deref(), Some("gender,asc"));
    }

    #[test]
    fn search_and_sort_changes_reset_the_page() {
        let mut query = ListQuery::new(15, None);
        query.page = 3;
        query.set_search("droid");
        assert_eq!(query.page, 0);

        query.page = 7;
        query.toggle_sort("name");
        assert_eq!(query.page, 0);
    }
}
