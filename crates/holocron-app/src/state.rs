// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ScreenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
    Form,
    Confirm,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_screen: ScreenKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_screen: ScreenKind::Home,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextScreen,
    PrevScreen,
    SetScreen(ScreenKind),
    EnterSearch,
    OpenForm,
    OpenConfirm,
    OpenDetail,
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    ScreenChanged(ScreenKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::SetScreen(screen) => {
                self.active_screen = screen;
                self.mode = AppMode::Nav;
                vec![AppEvent::ScreenChanged(screen)]
            }
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenForm => {
                self.mode = AppMode::Form;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenConfirm => {
                self.mode = AppMode::Confirm;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenDetail => {
                self.mode = AppMode::Detail;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = ScreenKind::ALL;
        let current = screens
            .iter()
            .position(|screen| *screen == self.active_screen)
            .unwrap_or(0) as isize;
        let len = screens.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_screen = screens[next];
        self.mode = AppMode::Nav;
        vec![AppEvent::ScreenChanged(self.active_screen)]
    }
}
