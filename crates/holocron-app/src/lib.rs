// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod browser;
pub mod forms;
pub mod ids;
pub mod model;
pub mod mutate;
pub mod pager;
pub mod query;
pub mod state;
pub mod support;

pub use browser::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use mutate::*;
pub use query::*;
pub use state::*;
pub use support::*;
