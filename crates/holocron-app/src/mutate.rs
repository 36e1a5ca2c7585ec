// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{Character, CharacterFormInput, CharacterId};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this character?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub const fn failure_notice(self) -> &'static str {
        match self {
            Self::Create => "Failed to create character",
            Self::Update => "Failed to update character",
            Self::Delete => "Failed to delete character",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    Create(CharacterFormInput),
    Update(CharacterId, CharacterFormInput),
    Delete(CharacterId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: CharacterId,
    pub message: &'static str,
}

/// What the caller owes the controller after a mutation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Reload the listing at its current query state.
    Reload,
    /// Leave everything in place; a notice is set.
    Failed,
}

/// Create/update/delete coordinator for the character screen.
///
/// Destructive operations stage a confirmation first and only yield the
/// id once the prompt resolves affirmatively. Every successful mutation
/// funnels back through a full reload instead of patching rows in place,
/// so the pager always reflects server-computed totals. The coordinator
/// never touches the listing's query state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    pub form: Option<CharacterFormInput>,
    pub create_mode: bool,
    pub pending_delete: Option<PendingDelete>,
    pub notice: Option<String>,
}

impl EditorState {
    pub fn open_create(&mut self) {
        self.form = Some(CharacterFormInput::blank());
        self.create_mode = true;
    }

    pub fn open_edit(&mut self, character: &Character) {
        self.form = Some(CharacterFormInput::from_character(character));
        self.create_mode = false;
    }

    pub fn cancel(&mut self) {
        self.form = None;
        self.create_mode = false;
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    /// Derive the mutation for the open form. An edit form without an id
    /// is a silent no-op, not an error.
    pub fn submit(&self) -> Option<MutationRequest> {
        let form = self.form.as_ref()?;
        if self.create_mode {
            return Some(MutationRequest::Create(form.clone()));
        }
        let id = form.id?;
        Some(MutationRequest::Update(id, form.clone()))
    }

    /// Stage the delete confirmation. Nothing is staged for an absent id.
    pub fn request_delete(&mut self, id: Option<CharacterId>) -> bool {
        match id {
            Some(id) => {
                self.pending_delete = Some(PendingDelete {
                    id,
                    message: DELETE_PROMPT,
                });
                true
            }
            None => false,
        }
    }

    /// Resolve the staged confirmation. The id comes back only on an
    /// explicit yes; decline and absent-prompt both dissolve to nothing.
    pub fn resolve_delete(&mut self, confirmed: bool) -> Option<CharacterId> {
        let pending = self.pending_delete.take()?;
        confirmed.then_some(pending.id)
    }

    /// Settle a finished mutation. Success closes the form and demands a
    /// reload; failure raises a fixed notice and preserves the form so no
    /// input is lost.
    pub fn apply_result(&mut self, kind: MutationKind, outcome: Result<()>) -> MutationOutcome {
        match outcome {
            Ok(()) => {
                self.form = None;
                self.create_mode = false;
                self.notice = None;
                MutationOutcome::Reload
            }
            Err(_) => {
                self.notice = Some(kind.failure_notice().to_owned());
                MutationOutcome::Failed
            }
        }
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorState, MutationKind, MutationOutcome, MutationRequest};
    use crate::{CharacterFormInput, CharacterId};
    use anyhow::anyhow;

    #[test]
    fn submit_without_open_form_is_a_no_op() {
        let editor = EditorState::default();
        assert_eq!(editor.submit(), None);
    }

    #[test]
    fn edit_submit_without_id_is_a_silent_no_op() {
        let mut editor = EditorState::default();
        editor.form = Some(CharacterFormInput::blank());
        editor.create_mode = false;
        assert_eq!(editor.submit(), None);
    }

    #[test]
    fn create_submit_yields_the_form() {
        let mut editor = EditorState::default();
        editor.open_create();
        match editor.submit() {
            Some(MutationRequest::Create(form)) => assert_eq!(form.id, None),
            other => panic!("expected create request, got {other:?}"),
        }
    }

    #[test]
    fn delete_needs_an_id_and_an_explicit_yes() {
        let mut editor = EditorState::default();
        assert!(!editor.request_delete(None));
        assert_eq!(editor.resolve_delete(true), None);

        assert!(editor.request_delete(Some(CharacterId::new(7))));
        assert_eq!(editor.resolve_delete(false), None);
        assert!(editor.pending_delete.is_none());

        editor.request_delete(Some(CharacterId::new(7)));
        assert_eq!(editor.resolve_delete(true), Some(CharacterId::new(7)));
    }

    #[test]
    fn success_closes_form_and_demands_reload() {
        let mut editor = EditorState::default();
        editor.open_create();
        let outcome = editor.apply_result(MutationKind::Create, Ok(()));
        assert_eq!(outcome, MutationOutcome::Reload);
        assert!(!editor.is_open());
        assert_eq!(editor.notice, None);
    }

    #[test]
    fn failure_keeps_form_open_with_fixed_notice() {
        let mut editor = EditorState::default();
        editor.open_create();
        let outcome = editor.apply_result(MutationKind::Create, Err(anyhow!("500")));
        assert_eq!(outcome, MutationOutcome::Failed);
        assert!(editor.is_open());
        assert_eq!(editor.notice.as_deref(), Some("Failed to create character"));

        editor.clear_notice();
        assert_eq!(editor.notice, None);
    }

    #[test]
    fn delete_failure_reports_without_touching_rows() {
        let mut editor = EditorState::default();
        let outcome = editor.apply_result(MutationKind::Delete, Err(anyhow!("504")));
        assert_eq!(outcome, MutationOutcome::Failed);
        assert_eq!(editor.notice.as_deref(), Some("Failed to delete character"));
    }
}
