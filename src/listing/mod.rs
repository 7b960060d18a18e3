//! Listing form domain layer
//!
//! Everything the wizard needs that is independent of the terminal:
//! - `business`: business kinds and lookup tables
//! - `form_state`: the aggregate of all collected values
//! - `field`: typed accessors for each field
//! - `validators` / `rules`: predicates and the rules built from them
//! - `steps`: which fields and rules belong to which step
//! - `edit`: change handlers used by the step views
//! - `wizard`: step navigation, validation passes and submission
//! - `payload`: the external submission shape

pub mod business;
pub mod edit;
pub mod field;
pub mod form_state;
pub mod id;
pub mod payload;
pub mod rules;
pub mod steps;
pub mod validators;
pub mod wizard;

pub use business::{BusinessKind, DayOfWeek};
pub use field::{FieldKind, FieldPath, FieldValue};
pub use form_state::FormState;
pub use id::ListingId;
pub use payload::SubmissionPayload;
pub use steps::StepKind;
pub use wizard::{SubmissionError, SubmissionStatus, Wizard};
