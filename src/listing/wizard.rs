//! Multi-step form orchestration

use super::business::BusinessKind;
use super::field::FieldPath;
use super::form_state::FormState;
use super::id::ListingId;
use super::payload::{to_payload, SubmissionPayload};
use super::rules::{run_rules, ErrorMap};
use super::steps::{assemble_steps, StepDefinition};
use crate::api::ListingServiceTrait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{field} on step {} is not valid", .step + 1)]
    Invalid { step: usize, field: FieldPath },
    #[error("a submission is already in flight")]
    AlreadyPending,
    #[error("listing service error: {0}")]
    Service(#[source] anyhow::Error),
}

/// Progress of the last hand-off to the listing service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded(ListingId),
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Keeps the status at `Pending` while a request is awaited. If the
/// request future is dropped before it settles the status falls back to
/// `Idle`, so later submits are not refused.
struct PendingSubmission<'a> {
    status: &'a mut SubmissionStatus,
}

impl<'a> PendingSubmission<'a> {
    fn start(status: &'a mut SubmissionStatus) -> Self {
        *status = SubmissionStatus::Pending;
        Self { status }
    }

    fn settle(mut self, outcome: SubmissionStatus) {
        *self.status = outcome;
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if self.status.is_pending() {
            tracing::debug!("submission dropped before the service answered");
            *self.status = SubmissionStatus::Idle;
        }
    }
}

/// Owns the form state, the step list and the current position in it
#[derive(Debug, Clone)]
pub struct Wizard {
    state: FormState,
    steps: Vec<StepDefinition>,
    current: usize,
    errors: ErrorMap,
    /// Set when editing an existing listing
    editing: Option<ListingId>,
    status: SubmissionStatus,
}

impl Wizard {
    pub fn new(kind: BusinessKind) -> Self {
        Self::from_state(FormState::new(kind))
    }

    pub fn from_state(state: FormState) -> Self {
        let steps = assemble_steps(state.business_kind());
        Self {
            state,
            steps,
            current: 0,
            errors: ErrorMap::new(),
            editing: None,
            status: SubmissionStatus::Idle,
        }
    }

    /// Wizard pre-filled from a stored listing; submitting edits it in place
    pub fn for_listing(id: ListingId, payload: &SubmissionPayload) -> Self {
        let mut wizard = Self::from_state(FormState::from_payload(payload));
        wizard.editing = Some(id);
        wizard
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn editing(&self) -> Option<ListingId> {
        self.editing
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn business_kind(&self) -> BusinessKind {
        self.state.business_kind()
    }

    /// Switch business kind and rebuild the step list, keeping the index in range
    pub fn set_business_kind(&mut self, kind: BusinessKind) {
        if kind == self.business_kind() {
            return;
        }
        self.state.set_business_kind(kind);
        self.steps = assemble_steps(kind);
        self.current = self.current.min(self.steps.len() - 1);
        self.errors.clear();
        tracing::debug!(?kind, steps = self.steps.len(), "business kind changed");
    }

    pub fn validate_step(&self, index: usize) -> ErrorMap {
        self.steps
            .get(index)
            .map(|step| run_rules(&step.rules, &self.state))
            .unwrap_or_default()
    }

    /// Validate every step. Returns all errors (first message per field wins)
    /// and the lowest step index holding a failure.
    pub fn validate_all_steps(&self) -> (ErrorMap, Option<usize>) {
        let mut errors = ErrorMap::new();
        let mut first_failing = None;
        for (index, step) in self.steps.iter().enumerate() {
            let step_errors = run_rules(&step.rules, &self.state);
            if !step_errors.is_empty() && first_failing.is_none() {
                first_failing = Some(index);
            }
            errors.extend(step_errors);
        }
        (errors, first_failing)
    }

    /// Validate the current step and advance when it passes.
    /// Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        self.errors = self.validate_step(self.current);
        if !self.errors.is_empty() {
            tracing::debug!(
                step = self.current,
                errors = ?self.errors.to_dotted(),
                "step validation failed"
            );
            return false;
        }
        let last = self.steps.len() - 1;
        let before = self.current;
        self.current = (self.current + 1).min(last);
        self.current != before
    }

    pub fn previous(&mut self) -> bool {
        let before = self.current;
        self.current = self.current.saturating_sub(1);
        self.current != before
    }

    /// Jump back to an earlier step. Forward jumps would skip validation and
    /// are refused.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Run the whole-form pass and build the payload. On failure the error
    /// map is populated and the wizard jumps to the first failing step.
    pub fn prepare_submission(&mut self) -> Result<SubmissionPayload, SubmissionError> {
        let (errors, first_failing) = self.validate_all_steps();
        self.errors = errors;
        if let Some(step) = first_failing {
            self.current = step;
            let field = self.steps[step]
                .rules
                .iter()
                .map(|r| r.field)
                .find(|f| self.errors.contains(*f))
                .unwrap_or(FieldPath::BusinessName);
            tracing::info!(step, %field, "submission blocked by validation");
            return Err(SubmissionError::Invalid { step, field });
        }
        Ok(to_payload(&self.state))
    }

    /// Validate, transform and hand the payload to the listing service
    pub async fn submit(
        &mut self,
        service: &mut dyn ListingServiceTrait,
    ) -> Result<ListingId, SubmissionError> {
        if self.status.is_pending() {
            return Err(SubmissionError::AlreadyPending);
        }
        let payload = self.prepare_submission()?;

        let editing = self.editing;
        let pending = PendingSubmission::start(&mut self.status);
        let result = match editing {
            Some(id) => service.edit_listing(id, &payload).await.map(|()| id),
            None => service.add_listing(&payload).await,
        };

        match result {
            Ok(id) => {
                tracing::info!(listing_id = %id, edit = editing.is_some(), "listing submitted");
                pending.settle(SubmissionStatus::Succeeded(id));
                Ok(id)
            }
            Err(err) => {
                tracing::warn!("listing submission failed: {err:#}");
                pending.settle(SubmissionStatus::Failed(format!("{err:#}")));
                Err(SubmissionError::Service(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockListingServiceTrait;
    use crate::listing::business::DayOfWeek;
    use crate::listing::steps::StepKind;
    use anyhow::anyhow;

    fn fill_business_info(state: &mut FormState) {
        state.business_name = "Harbour Lane Studio".to_string();
        state.description = "Portrait photography and framing on the harbour.".to_string();
        state.region = "coast".to_string();
        state.contact.email = "studio@harbourlane.example".to_string();
    }

    fn fill_product(state: &mut FormState) {
        let product = state.product_data.as_mut().unwrap();
        product.primary_category = "cat-crafts".to_string();
        product.categories = vec!["cat-crafts".into(), "cat-home".into()];
    }

    fn fill_service(state: &mut FormState) {
        let service = state.service_data.as_mut().unwrap();
        service.booking_url = "harbourlane.example/book".to_string();
        service.service_area = "Harbour district".to_string();
        service.categories = vec!["cat-events".into(), "cat-crafts".into()];
    }

    fn complete_wizard(kind: BusinessKind) -> Wizard {
        let mut wizard = Wizard::new(kind);
        let state = wizard.state_mut();
        fill_business_info(state);
        if kind.has_product() {
            fill_product(state);
        }
        if kind.has_service() {
            fill_service(state);
        }
        state.accepted_terms = true;
        wizard
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_next_blocks_on_empty_required_fields() {
            let mut wizard = Wizard::new(BusinessKind::Product);
            assert!(!wizard.next());
            assert_eq!(wizard.current_index(), 0);
            for field in [
                FieldPath::BusinessName,
                FieldPath::Description,
                FieldPath::Region,
                FieldPath::ContactEmail,
            ] {
                assert!(wizard.errors().contains(field), "missing error for {field}");
            }
        }

        #[test]
        fn test_next_ignores_empty_optional_fields() {
            let mut wizard = Wizard::new(BusinessKind::Product);
            fill_business_info(wizard.state_mut());
            assert!(wizard.next());
            assert_eq!(wizard.current_index(), 1);
            for field in [
                FieldPath::ContactPhone,
                FieldPath::Website,
                FieldPath::Facebook,
                FieldPath::Linkedin,
            ] {
                assert!(!wizard.errors().contains(field));
            }
        }

        #[test]
        fn test_next_rejects_filled_optional_field_with_bad_value() {
            let mut wizard = Wizard::new(BusinessKind::Product);
            fill_business_info(wizard.state_mut());
            wizard.state_mut().contact.phone = "call me maybe".to_string();
            assert!(!wizard.next());
            assert_eq!(
                wizard.errors().get(FieldPath::ContactPhone),
                Some("Enter a valid phone number")
            );
        }

        #[test]
        fn test_errors_are_recomputed_each_pass() {
            let mut wizard = Wizard::new(BusinessKind::Product);
            assert!(!wizard.next());
            assert!(wizard.errors().contains(FieldPath::BusinessName));
            fill_business_info(wizard.state_mut());
            assert!(wizard.next());
            assert!(wizard.errors().is_empty());
        }

        #[test]
        fn test_next_clamps_at_last_step() {
            let mut wizard = complete_wizard(BusinessKind::Service);
            while wizard.next() {}
            assert!(wizard.is_last_step());
            assert_eq!(wizard.current_step().kind, StepKind::Review);
            assert!(!wizard.next());
            assert!(wizard.is_last_step());
        }

        #[test]
        fn test_previous_clamps_at_first_step() {
            let mut wizard = Wizard::new(BusinessKind::Product);
            assert!(!wizard.previous());
            assert_eq!(wizard.current_index(), 0);
        }

        #[test]
        fn test_previous_skips_validation() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            assert!(wizard.next());
            wizard.state_mut().business_name.clear();
            assert!(wizard.previous());
            assert_eq!(wizard.current_index(), 0);
        }

        #[test]
        fn test_go_to_only_backwards() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            assert!(wizard.next());
            assert!(wizard.next());
            assert!(!wizard.go_to(4));
            assert!(wizard.go_to(0));
            assert_eq!(wizard.current_index(), 0);
        }
    }

    mod conditional_rules {
        use super::*;

        #[test]
        fn test_booking_url_ignored_unless_online() {
            for method in ["phone", "walk_in", "message"] {
                let mut wizard = complete_wizard(BusinessKind::Service);
                let service = wizard.state_mut().service_data.as_mut().unwrap();
                service.booking_method = method.to_string();
                service.booking_url.clear();

                let (errors, _) = wizard.validate_all_steps();
                assert!(!errors.contains(FieldPath::BookingUrl), "method {method}");
            }
        }

        #[test]
        fn test_booking_url_required_when_online() {
            let mut wizard = complete_wizard(BusinessKind::Service);
            wizard
                .state_mut()
                .service_data
                .as_mut()
                .unwrap()
                .booking_url
                .clear();
            let (errors, _) = wizard.validate_all_steps();
            assert_eq!(
                errors.get(FieldPath::BookingUrl),
                Some("Online booking needs a booking link")
            );
        }

        #[test]
        fn test_delivery_area_only_with_delivery() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            let (errors, _) = wizard.validate_all_steps();
            assert!(!errors.contains(FieldPath::DeliveryArea));

            wizard
                .state_mut()
                .product_data
                .as_mut()
                .unwrap()
                .selling_modes
                .push("delivery".to_string());
            let (errors, _) = wizard.validate_all_steps();
            assert!(errors.contains(FieldPath::DeliveryArea));
        }

        #[test]
        fn test_closed_day_hours_never_checked() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            let product = wizard.state_mut().product_data.as_mut().unwrap();
            let monday = product.hours_for_mut(DayOfWeek::Monday).unwrap();
            monday.closed = true;
            monday.open = "late".to_string();
            let (errors, _) = wizard.validate_all_steps();
            assert!(!errors.contains(FieldPath::Hours(DayOfWeek::Monday)));
        }

        #[test]
        fn test_backwards_hours_fail() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            let product = wizard.state_mut().product_data.as_mut().unwrap();
            let friday = product.hours_for_mut(DayOfWeek::Friday).unwrap();
            friday.open = "18:00".to_string();
            friday.close = "10:00".to_string();
            let (errors, first) = wizard.validate_all_steps();
            assert!(errors.contains(FieldPath::Hours(DayOfWeek::Friday)));
            assert_eq!(first, Some(2));
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn test_abandoned_submission_returns_to_idle() {
            let mut status = SubmissionStatus::Idle;
            {
                let pending = PendingSubmission::start(&mut status);
                assert!(pending.status.is_pending());
            }
            assert_eq!(status, SubmissionStatus::Idle);
        }

        #[test]
        fn test_settled_submission_keeps_outcome() {
            let mut status = SubmissionStatus::Idle;
            let pending = PendingSubmission::start(&mut status);
            pending.settle(SubmissionStatus::Failed("deadline exceeded".to_string()));
            assert_eq!(
                status,
                SubmissionStatus::Failed("deadline exceeded".to_string())
            );
        }

        #[test]
        fn test_prepare_submission_dedups_categories() {
            let mut wizard = complete_wizard(BusinessKind::Both);
            let payload = wizard.prepare_submission().unwrap();
            let mut sorted = payload.category_ids.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), payload.category_ids.len());
            assert_eq!(
                payload.category_ids,
                vec!["cat-crafts", "cat-home", "cat-events"]
            );
        }

        #[test]
        fn test_prepare_submission_jumps_to_lowest_failing_step() {
            let mut wizard = complete_wizard(BusinessKind::Both);
            while wizard.next() {}
            assert!(wizard.is_last_step());

            // break the services step (index 3) and the media step (index 5)
            wizard.state_mut().service_data.as_mut().unwrap().service_area.clear();
            wizard.state_mut().media.logo_url = "nope".to_string();

            let err = wizard.prepare_submission().unwrap_err();
            assert!(matches!(
                err,
                SubmissionError::Invalid {
                    step: 3,
                    field: FieldPath::ServiceArea
                }
            ));
            assert_eq!(wizard.current_index(), 3);
            assert_eq!(wizard.current_step().kind, StepKind::ServiceOffer);
            assert!(wizard.errors().contains(FieldPath::LogoUrl));
        }

        #[test]
        fn test_prepare_submission_first_step_failure() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            while wizard.next() {}
            wizard.state_mut().contact.email = "bad".to_string();
            wizard.state_mut().accepted_terms = false;
            assert!(wizard.prepare_submission().is_err());
            assert_eq!(wizard.current_index(), 0);
        }

        #[tokio::test]
        async fn test_submit_new_listing_calls_add() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            let id = ListingId::new();

            let mut service = MockListingServiceTrait::new();
            service
                .expect_add_listing()
                .withf(|payload| payload.business_name == "Harbour Lane Studio")
                .times(1)
                .returning(move |_| Ok(id));
            service.expect_edit_listing().never();

            let submitted = wizard.submit(&mut service).await.unwrap();
            assert_eq!(submitted, id);
            assert_eq!(wizard.status(), &SubmissionStatus::Succeeded(id));
        }

        #[tokio::test]
        async fn test_submit_in_edit_mode_calls_edit() {
            let id = ListingId::new();
            let payload = complete_wizard(BusinessKind::Service)
                .prepare_submission()
                .unwrap();
            let mut wizard = Wizard::for_listing(id, &payload);
            assert_eq!(wizard.editing(), Some(id));

            let mut service = MockListingServiceTrait::new();
            service.expect_add_listing().never();
            service
                .expect_edit_listing()
                .withf(move |edit_id, _| *edit_id == id)
                .times(1)
                .returning(|_, _| Ok(()));

            assert_eq!(wizard.submit(&mut service).await.unwrap(), id);
            assert!(wizard.status().is_success());
        }

        #[tokio::test]
        async fn test_submit_invalid_never_reaches_service() {
            let mut wizard = Wizard::new(BusinessKind::Product);
            let mut service = MockListingServiceTrait::new();
            service.expect_add_listing().never();

            let err = wizard.submit(&mut service).await.unwrap_err();
            assert!(matches!(err, SubmissionError::Invalid { step: 0, .. }));
            assert_eq!(wizard.status(), &SubmissionStatus::Idle);
        }

        #[test]
        fn test_submit_failure_keeps_form() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            let mut service = MockListingServiceTrait::new();
            service
                .expect_add_listing()
                .returning(|_| Err(anyhow!("listing service unavailable")));

            let result = tokio_test::block_on(wizard.submit(&mut service));
            assert!(matches!(result, Err(SubmissionError::Service(_))));
            assert!(wizard.status().is_error());
            assert_eq!(wizard.state().business_name, "Harbour Lane Studio");
        }
    }

    mod business_kind {
        use super::*;

        #[test]
        fn test_set_business_kind_rebuilds_steps() {
            let mut wizard = complete_wizard(BusinessKind::Product);
            wizard.set_business_kind(BusinessKind::Both);
            assert_eq!(wizard.steps().len(), 7);
            assert!(wizard.state().service_data.is_some());
            assert_eq!(wizard.state().business_name, "Harbour Lane Studio");
        }

        #[test]
        fn test_set_business_kind_clamps_index() {
            let mut wizard = complete_wizard(BusinessKind::Both);
            while wizard.next() {
                if wizard.current_step().kind == StepKind::Review {
                    break;
                }
            }
            assert_eq!(wizard.current_index(), 6);
            wizard.set_business_kind(BusinessKind::Service);
            assert_eq!(wizard.steps().len(), 5);
            assert_eq!(wizard.current_index(), 4);
            assert!(wizard.state().product_data.is_none());
        }
    }
}
