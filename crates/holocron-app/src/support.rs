// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::SupportData;

/// Reference lookups for the relation pickers, loaded once per screen
/// activation. Failure is tracked independently of the main listing and
/// never blocks it; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportState {
    pub data: SupportData,
    pub loaded: bool,
    pub has_error: bool,
    pub error_message: String,
}

impl SupportState {
    pub fn apply(&mut self, outcome: Result<SupportData>) {
        match outcome {
            Ok(data) => {
                self.data = data;
                self.loaded = true;
                self.has_error = false;
                self.error_message.clear();
            }
            Err(_) => {
                self.has_error = true;
                self.error_message = "Failed to load support data.".to_owned();
            }
        }
    }
}
