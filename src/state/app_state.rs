//! Application state definitions

use crate::listing::{BusinessKind, FieldKind, FieldPath, ListingId, StepKind, Wizard};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Choose what the business offers
    #[default]
    TypeSelect,
    /// Step through the listing form
    Wizard,
    /// Listing accepted by the service
    Submitted,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub kind_cursor: usize,

    // Form
    pub wizard: Option<Wizard>,
    pub active_field: usize,
    /// Highlighted option inside a multi-choice field
    pub option_cursor: usize,
    /// Entry being typed into a list field
    pub list_draft: String,
    pub scroll_offset: usize,

    // UI state
    pub service_connected: bool,
    pub last_submitted: Option<ListingId>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        tracing::debug!(%message, "queued error");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn selected_kind(&self) -> BusinessKind {
        BusinessKind::ALL[self.kind_cursor.min(BusinessKind::ALL.len() - 1)]
    }

    pub fn select_kind(&mut self, kind: BusinessKind) {
        if let Some(index) = BusinessKind::ALL.iter().position(|k| *k == kind) {
            self.kind_cursor = index;
        }
    }

    pub fn move_kind_cursor_down(&mut self) {
        if self.kind_cursor + 1 < BusinessKind::ALL.len() {
            self.kind_cursor += 1;
        }
    }

    pub fn move_kind_cursor_up(&mut self) {
        self.kind_cursor = self.kind_cursor.saturating_sub(1);
    }

    /// Open the wizard for `kind`. An existing wizard keeps its values and
    /// only has its business kind switched.
    pub fn start_wizard(&mut self, kind: BusinessKind, default_region: Option<&str>) {
        match self.wizard.as_mut() {
            Some(wizard) => wizard.set_business_kind(kind),
            None => {
                let mut wizard = Wizard::new(kind);
                if let Some(region) = default_region {
                    wizard.state_mut().region = region.to_string();
                }
                self.wizard = Some(wizard);
            }
        }
        self.select_kind(kind);
        self.current_view = View::Wizard;
        self.reset_field_cursor();
    }

    /// Drop the current form and return to the type picker
    pub fn discard_wizard(&mut self) {
        self.wizard = None;
        self.current_view = View::TypeSelect;
        self.reset_field_cursor();
    }

    pub fn current_step_kind(&self) -> Option<StepKind> {
        self.wizard.as_ref().map(|w| w.current_step().kind)
    }

    /// Editable fields of the current step
    pub fn step_fields(&self) -> Vec<FieldPath> {
        self.wizard
            .as_ref()
            .map(|w| w.current_step().fields())
            .unwrap_or_default()
    }

    pub fn active_field_path(&self) -> Option<FieldPath> {
        self.step_fields().get(self.active_field).copied()
    }

    /// Move to next form field
    pub fn next_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 {
            self.active_field = (self.active_field + 1) % count;
        }
        self.reset_field_input();
    }

    /// Move to previous form field
    pub fn prev_field(&mut self) {
        let count = self.step_fields().len();
        if count == 0 {
            return;
        }
        if self.active_field == 0 {
            self.active_field = count - 1;
        } else {
            self.active_field -= 1;
        }
        self.reset_field_input();
    }

    pub fn reset_field_cursor(&mut self) {
        self.active_field = 0;
        self.scroll_offset = 0;
        self.reset_field_input();
    }

    fn reset_field_input(&mut self) {
        self.option_cursor = 0;
        self.list_draft.clear();
    }

    /// Focus the first field of the current step that has an error
    pub fn focus_first_error(&mut self) {
        let Some(wizard) = self.wizard.as_ref() else {
            return;
        };
        let position = wizard
            .current_step()
            .fields()
            .iter()
            .position(|f| wizard.errors().message_for(*f).is_some());
        if let Some(index) = position {
            self.active_field = index;
            self.reset_field_input();
        }
    }

    pub fn move_option_cursor(&mut self, forward: bool) {
        let Some(FieldKind::MultiChoice(choices)) = self.active_field_path().map(|f| f.kind())
        else {
            return;
        };
        if choices.is_empty() {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % choices.len()
        } else if self.option_cursor == 0 {
            choices.len() - 1
        } else {
            self.option_cursor - 1
        };
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod error_queue {
        use super::*;

        #[test]
        fn test_errors_are_shown_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(state.current_error().is_none());
        }
    }

    mod kind_cursor {
        use super::*;

        #[test]
        fn test_default_is_product() {
            let state = AppState::default();
            assert_eq!(state.selected_kind(), BusinessKind::Product);
        }

        #[test]
        fn test_cursor_clamps_at_both_ends() {
            let mut state = AppState::default();
            state.move_kind_cursor_up();
            assert_eq!(state.kind_cursor, 0);
            for _ in 0..5 {
                state.move_kind_cursor_down();
            }
            assert_eq!(state.selected_kind(), BusinessKind::Both);
        }

        #[test]
        fn test_select_kind_moves_cursor() {
            let mut state = AppState::default();
            state.select_kind(BusinessKind::Service);
            assert_eq!(state.kind_cursor, 1);
        }
    }

    mod wizard_lifecycle {
        use super::*;

        #[test]
        fn test_start_wizard_applies_default_region() {
            let mut state = AppState::default();
            state.start_wizard(BusinessKind::Product, Some("coast"));
            assert_eq!(state.current_view, View::Wizard);
            let wizard = state.wizard.as_ref().unwrap();
            assert_eq!(wizard.state().region, "coast");
        }

        #[test]
        fn test_restarting_keeps_values_and_switches_kind() {
            let mut state = AppState::default();
            state.start_wizard(BusinessKind::Product, None);
            state.wizard.as_mut().unwrap().state_mut().business_name = "Quay Bikes".to_string();
            state.current_view = View::TypeSelect;

            state.start_wizard(BusinessKind::Both, Some("north"));
            let wizard = state.wizard.as_ref().unwrap();
            assert_eq!(wizard.business_kind(), BusinessKind::Both);
            assert_eq!(wizard.state().business_name, "Quay Bikes");
            // default region only applies to fresh forms
            assert_eq!(wizard.state().region, "");
        }

        #[test]
        fn test_discard_wizard() {
            let mut state = AppState::default();
            state.start_wizard(BusinessKind::Service, None);
            state.discard_wizard();
            assert!(state.wizard.is_none());
            assert_eq!(state.current_view, View::TypeSelect);
        }
    }

    mod field_cursor {
        use super::*;

        fn wizard_state() -> AppState {
            let mut state = AppState::default();
            state.start_wizard(BusinessKind::Product, None);
            state
        }

        #[test]
        fn test_next_field_wraps() {
            let mut state = wizard_state();
            let count = state.step_fields().len();
            for _ in 0..count {
                state.next_field();
            }
            assert_eq!(state.active_field, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_last() {
            let mut state = wizard_state();
            state.prev_field();
            assert_eq!(state.active_field, state.step_fields().len() - 1);
            assert_eq!(state.active_field_path(), Some(FieldPath::Linkedin));
        }

        #[test]
        fn test_field_change_clears_draft() {
            let mut state = wizard_state();
            state.list_draft.push_str("half typed");
            state.option_cursor = 2;
            state.next_field();
            assert!(state.list_draft.is_empty());
            assert_eq!(state.option_cursor, 0);
        }

        #[test]
        fn test_no_fields_without_wizard() {
            let mut state = AppState::default();
            state.next_field();
            state.prev_field();
            assert_eq!(state.active_field, 0);
            assert!(state.active_field_path().is_none());
        }

        #[test]
        fn test_focus_first_error() {
            let mut state = wizard_state();
            {
                let wizard = state.wizard.as_mut().unwrap();
                let form = wizard.state_mut();
                form.business_name = "Quay Bikes".to_string();
                form.description = "Bicycle sales and servicing by the quay.".to_string();
                form.region = "coast".to_string();
                assert!(!wizard.next());
            }
            state.focus_first_error();
            assert_eq!(state.active_field_path(), Some(FieldPath::ContactEmail));
        }

        #[test]
        fn test_option_cursor_only_moves_on_multi_choice() {
            let mut state = wizard_state();
            state.move_option_cursor(true);
            assert_eq!(state.option_cursor, 0);

            let wizard = state.wizard.as_mut().unwrap();
            wizard.state_mut().business_name = "Quay Bikes".to_string();
            wizard.state_mut().description = "Bicycle sales and servicing by the quay.".to_string();
            wizard.state_mut().region = "coast".to_string();
            wizard.state_mut().contact.email = "hello@quay.example".to_string();
            assert!(wizard.next());
            state.reset_field_cursor();

            // selling modes: three options
            state.move_option_cursor(false);
            assert_eq!(state.option_cursor, 2);
            state.move_option_cursor(true);
            assert_eq!(state.option_cursor, 0);
        }
    }
}
