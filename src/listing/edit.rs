//! In-place change handlers applied to the form state by the step views

use super::field::{FieldKind, FieldPath};
use super::form_state::FormState;

/// Append a typed character to a text field. Ignored for other kinds.
pub fn input_char(state: &mut FormState, field: FieldPath, c: char) {
    if !matches!(field.kind(), FieldKind::Text | FieldKind::Multiline) {
        return;
    }
    if let Some(text) = field.text_mut(state) {
        text.push(c);
    }
}

pub fn newline(state: &mut FormState, field: FieldPath) {
    if field.kind() == FieldKind::Multiline {
        if let Some(text) = field.text_mut(state) {
            text.push('\n');
        }
    }
}

pub fn backspace(state: &mut FormState, field: FieldPath) {
    match field.kind() {
        FieldKind::Text | FieldKind::Multiline => {
            if let Some(text) = field.text_mut(state) {
                text.pop();
            }
        }
        FieldKind::List => {
            pop_item(state, field);
        }
        _ => {}
    }
}

pub fn clear(state: &mut FormState, field: FieldPath) {
    if let Some(text) = field.text_mut(state) {
        text.clear();
    } else if let Some(items) = field.items_mut(state) {
        items.clear();
    } else if let Some(flag) = field.flag_mut(state) {
        *flag = false;
    }
}

/// Step a single-choice field through its lookup table, wrapping around.
/// An empty value moves to the first (or last) option.
pub fn cycle_choice(state: &mut FormState, field: FieldPath, forward: bool) {
    let FieldKind::Choice(choices) = field.kind() else {
        return;
    };
    if choices.is_empty() {
        return;
    }
    let Some(value) = field.text_mut(state) else {
        return;
    };
    let current = choices.iter().position(|c| c.value == value.as_str());
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => choices.len() - 1,
        (Some(i), true) => (i + 1) % choices.len(),
        (Some(0), false) => choices.len() - 1,
        (Some(i), false) => i - 1,
    };
    *value = choices[next].value.to_string();
}

/// Add or remove the option at `option_index` of a multi-choice field
pub fn toggle_option(state: &mut FormState, field: FieldPath, option_index: usize) {
    let FieldKind::MultiChoice(choices) = field.kind() else {
        return;
    };
    let Some(choice) = choices.get(option_index) else {
        return;
    };
    let Some(items) = field.items_mut(state) else {
        return;
    };
    if let Some(pos) = items.iter().position(|v| v == choice.value) {
        items.remove(pos);
    } else {
        items.push(choice.value.to_string());
    }
}

pub fn toggle_flag(state: &mut FormState, field: FieldPath) {
    if let Some(flag) = field.flag_mut(state) {
        *flag = !*flag;
    }
}

/// Append a free-form entry to a list field. Blank entries are dropped.
pub fn push_item(state: &mut FormState, field: FieldPath, item: &str) -> bool {
    let item = item.trim();
    if item.is_empty() || field.kind() != FieldKind::List {
        return false;
    }
    match field.items_mut(state) {
        Some(items) => {
            items.push(item.to_string());
            true
        }
        None => false,
    }
}

pub fn pop_item(state: &mut FormState, field: FieldPath) -> Option<String> {
    if field.kind() != FieldKind::List {
        return None;
    }
    field.items_mut(state).and_then(Vec::pop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::business::{BusinessKind, DayOfWeek, BOOKING_METHODS};

    mod text {
        use super::*;

        #[test]
        fn test_input_and_backspace() {
            let mut state = FormState::new(BusinessKind::Product);
            for c in "Cafe".chars() {
                input_char(&mut state, FieldPath::BusinessName, c);
            }
            backspace(&mut state, FieldPath::BusinessName);
            assert_eq!(state.business_name, "Caf");
        }

        #[test]
        fn test_input_ignored_for_choice_fields() {
            let mut state = FormState::new(BusinessKind::Product);
            input_char(&mut state, FieldPath::Region, 'x');
            assert_eq!(state.region, "");
        }

        #[test]
        fn test_newline_only_in_multiline() {
            let mut state = FormState::new(BusinessKind::Product);
            newline(&mut state, FieldPath::Description);
            newline(&mut state, FieldPath::BusinessName);
            assert_eq!(state.description, "\n");
            assert_eq!(state.business_name, "");
        }

        #[test]
        fn test_hours_parts_are_editable() {
            let mut state = FormState::new(BusinessKind::Product);
            let field = FieldPath::HoursOpen(DayOfWeek::Tuesday);
            clear(&mut state, field);
            for c in "10:30".chars() {
                input_char(&mut state, field, c);
            }
            let product = state.product_data.as_ref().unwrap();
            assert_eq!(product.hours_for(DayOfWeek::Tuesday).unwrap().open, "10:30");
        }
    }

    mod choices {
        use super::*;

        #[test]
        fn test_cycle_choice_wraps() {
            let mut state = FormState::new(BusinessKind::Service);
            // default booking method is the first option
            cycle_choice(&mut state, FieldPath::BookingMethod, false);
            assert_eq!(
                state.service_data.as_ref().unwrap().booking_method,
                BOOKING_METHODS[BOOKING_METHODS.len() - 1].value
            );
            cycle_choice(&mut state, FieldPath::BookingMethod, true);
            assert_eq!(state.service_data.as_ref().unwrap().booking_method, "online");
        }

        #[test]
        fn test_cycle_choice_from_empty() {
            let mut state = FormState::new(BusinessKind::Product);
            cycle_choice(&mut state, FieldPath::Region, true);
            assert_eq!(state.region, "north");
        }

        #[test]
        fn test_toggle_option() {
            let mut state = FormState::new(BusinessKind::Product);
            // index 2 is delivery
            toggle_option(&mut state, FieldPath::SellingModes, 2);
            assert!(state.product_data.as_ref().unwrap().offers_delivery());
            toggle_option(&mut state, FieldPath::SellingModes, 2);
            assert!(!state.product_data.as_ref().unwrap().offers_delivery());
        }

        #[test]
        fn test_toggle_option_out_of_range() {
            let mut state = FormState::new(BusinessKind::Product);
            toggle_option(&mut state, FieldPath::SellingModes, 99);
            assert_eq!(
                state.product_data.as_ref().unwrap().selling_modes,
                vec!["in_store"]
            );
        }
    }

    mod lists_and_flags {
        use super::*;

        #[test]
        fn test_push_and_pop_items() {
            let mut state = FormState::new(BusinessKind::Product);
            assert!(push_item(&mut state, FieldPath::Gallery, " example.com/1.jpg "));
            assert!(!push_item(&mut state, FieldPath::Gallery, "   "));
            assert_eq!(state.media.gallery, vec!["example.com/1.jpg"]);
            backspace(&mut state, FieldPath::Gallery);
            assert!(state.media.gallery.is_empty());
        }

        #[test]
        fn test_push_item_rejects_non_list_fields() {
            let mut state = FormState::new(BusinessKind::Product);
            assert!(!push_item(&mut state, FieldPath::SellingModes, "delivery"));
        }

        #[test]
        fn test_toggle_flag() {
            let mut state = FormState::new(BusinessKind::Product);
            toggle_flag(&mut state, FieldPath::AcceptedTerms);
            assert!(state.accepted_terms);
            toggle_flag(&mut state, FieldPath::HoursClosed(DayOfWeek::Monday));
            assert!(
                state
                    .product_data
                    .as_ref()
                    .unwrap()
                    .hours_for(DayOfWeek::Monday)
                    .unwrap()
                    .closed
            );
        }

        #[test]
        fn test_certifications_need_service_data() {
            let mut state = FormState::new(BusinessKind::Product);
            assert!(!push_item(&mut state, FieldPath::Certifications, "ISO 9001"));
        }
    }
}
