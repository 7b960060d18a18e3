//! Step schema registry
//!
//! Maps each wizard step to the fields it edits and the rules that guard
//! advancing past it, and assembles the ordered step list for a business
//! kind.

use super::business::{BusinessKind, DayOfWeek};
use super::field::FieldPath;
use super::rules::{
    all_urls, area_length, books_online, day_hours, delivers, description_length, email,
    flag_set, license_shape, name_length, phone, required, url, years, ValidationRule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    BusinessInfo,
    ProductOffer,
    OpeningHours,
    ServiceOffer,
    Credentials,
    Media,
    Review,
}

impl StepKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::BusinessInfo => "Business info",
            Self::ProductOffer => "Products",
            Self::OpeningHours => "Opening hours",
            Self::ServiceOffer => "Services",
            Self::Credentials => "Credentials",
            Self::Media => "Media",
            Self::Review => "Review",
        }
    }

    /// Editable fields, in display order
    pub fn fields(self) -> Vec<FieldPath> {
        match self {
            Self::BusinessInfo => vec![
                FieldPath::BusinessName,
                FieldPath::Description,
                FieldPath::Region,
                FieldPath::ContactEmail,
                FieldPath::ContactPhone,
                FieldPath::Website,
                FieldPath::Facebook,
                FieldPath::Instagram,
                FieldPath::XProfile,
                FieldPath::Linkedin,
            ],
            Self::ProductOffer => vec![
                FieldPath::SellingModes,
                FieldPath::DeliveryArea,
                FieldPath::PrimaryCategory,
                FieldPath::ProductCategories,
            ],
            Self::OpeningHours => DayOfWeek::ALL
                .into_iter()
                .flat_map(|day| {
                    [
                        FieldPath::HoursClosed(day),
                        FieldPath::HoursOpen(day),
                        FieldPath::HoursClose(day),
                    ]
                })
                .collect(),
            Self::ServiceOffer => vec![
                FieldPath::BookingMethod,
                FieldPath::BookingUrl,
                FieldPath::ServiceArea,
                FieldPath::ServiceCategories,
            ],
            Self::Credentials => vec![
                FieldPath::LicenseNumber,
                FieldPath::Certifications,
                FieldPath::YearsInBusiness,
            ],
            Self::Media => vec![
                FieldPath::LogoUrl,
                FieldPath::CoverImageUrl,
                FieldPath::Gallery,
            ],
            Self::Review => vec![FieldPath::AcceptedTerms],
        }
    }

    pub fn rules(self) -> Vec<ValidationRule> {
        match self {
            Self::BusinessInfo => vec![
                ValidationRule::new(
                    FieldPath::BusinessName,
                    required,
                    "Business name is required",
                ),
                ValidationRule::new(
                    FieldPath::BusinessName,
                    name_length,
                    "Business name must be 2 to 80 characters",
                ),
                ValidationRule::new(
                    FieldPath::Description,
                    required,
                    "Tell customers what you do",
                ),
                ValidationRule::new(
                    FieldPath::Description,
                    description_length,
                    "Description must be 20 to 1000 characters",
                ),
                ValidationRule::new(FieldPath::Region, required, "Choose a region"),
                ValidationRule::new(FieldPath::ContactEmail, required, "Email is required"),
                ValidationRule::new(FieldPath::ContactEmail, email, "Enter a valid email address"),
                ValidationRule::new(FieldPath::ContactPhone, phone, "Enter a valid phone number")
                    .optional(),
                ValidationRule::new(FieldPath::Website, url, "Enter a valid website address")
                    .optional(),
                ValidationRule::new(FieldPath::Facebook, url, "Enter a valid Facebook link")
                    .optional(),
                ValidationRule::new(FieldPath::Instagram, url, "Enter a valid Instagram link")
                    .optional(),
                ValidationRule::new(FieldPath::XProfile, url, "Enter a valid X link").optional(),
                ValidationRule::new(FieldPath::Linkedin, url, "Enter a valid LinkedIn link")
                    .optional(),
            ],
            Self::ProductOffer => vec![
                ValidationRule::new(
                    FieldPath::SellingModes,
                    required,
                    "Pick at least one way you sell",
                ),
                ValidationRule::new(
                    FieldPath::DeliveryArea,
                    required,
                    "Describe where you deliver",
                )
                .relevant_when(delivers),
                ValidationRule::new(
                    FieldPath::DeliveryArea,
                    area_length,
                    "Delivery area must be 2 to 120 characters",
                )
                .relevant_when(delivers),
                ValidationRule::new(
                    FieldPath::PrimaryCategory,
                    required,
                    "Choose a primary category",
                ),
            ],
            Self::OpeningHours => DayOfWeek::ALL
                .into_iter()
                .map(|day| {
                    ValidationRule::new(
                        FieldPath::Hours(day),
                        day_hours,
                        format!(
                            "{} needs opening and closing times (HH:MM, closing after opening)",
                            day.label()
                        ),
                    )
                })
                .collect(),
            Self::ServiceOffer => vec![
                ValidationRule::new(
                    FieldPath::BookingMethod,
                    required,
                    "Choose how customers book",
                ),
                ValidationRule::new(
                    FieldPath::BookingUrl,
                    required,
                    "Online booking needs a booking link",
                )
                .relevant_when(books_online),
                ValidationRule::new(FieldPath::BookingUrl, url, "Enter a valid booking link")
                    .relevant_when(books_online),
                ValidationRule::new(
                    FieldPath::ServiceArea,
                    required,
                    "Describe the area you serve",
                ),
                ValidationRule::new(
                    FieldPath::ServiceArea,
                    area_length,
                    "Service area must be 2 to 120 characters",
                ),
                ValidationRule::new(
                    FieldPath::ServiceCategories,
                    required,
                    "Pick at least one service category",
                ),
            ],
            Self::Credentials => vec![
                ValidationRule::new(
                    FieldPath::LicenseNumber,
                    license_shape,
                    "Licence number must be 4 to 40 characters",
                )
                .optional(),
                ValidationRule::new(
                    FieldPath::YearsInBusiness,
                    years,
                    "Years in business must be a whole number",
                )
                .optional(),
            ],
            Self::Media => vec![
                ValidationRule::new(FieldPath::LogoUrl, url, "Enter a valid logo URL").optional(),
                ValidationRule::new(FieldPath::CoverImageUrl, url, "Enter a valid image URL")
                    .optional(),
                ValidationRule::new(
                    FieldPath::Gallery,
                    all_urls,
                    "Every gallery entry must be an image URL",
                )
                .optional(),
            ],
            Self::Review => vec![ValidationRule::new(
                FieldPath::AcceptedTerms,
                flag_set,
                "Accept the listing terms to publish",
            )],
        }
    }
}

/// One screen of the wizard
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub kind: StepKind,
    pub title: &'static str,
    pub rules: Vec<ValidationRule>,
}

impl StepDefinition {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            title: kind.title(),
            rules: kind.rules(),
        }
    }

    pub fn fields(&self) -> Vec<FieldPath> {
        self.kind.fields()
    }

    /// Whether any rule of this step targets `field`
    pub fn owns(&self, field: FieldPath) -> bool {
        self.rules.iter().any(|r| r.field == field)
    }
}

/// Business info first, product steps, service steps, then media and review
pub fn step_kinds_for(kind: BusinessKind) -> Vec<StepKind> {
    let mut kinds = vec![StepKind::BusinessInfo];
    if kind.has_product() {
        kinds.extend([StepKind::ProductOffer, StepKind::OpeningHours]);
    }
    if kind.has_service() {
        kinds.extend([StepKind::ServiceOffer, StepKind::Credentials]);
    }
    kinds.extend([StepKind::Media, StepKind::Review]);
    kinds
}

pub fn assemble_steps(kind: BusinessKind) -> Vec<StepDefinition> {
    step_kinds_for(kind)
        .into_iter()
        .map(StepDefinition::new)
        .collect()
}
