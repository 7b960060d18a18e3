//! Typed field accessors
//!
//! Each [`FieldPath`] names one value inside [`FormState`] and knows how to
//! read and write it. The dotted name (`productData.primaryCategory`) is
//! kept for error keys and display only; nothing walks strings at runtime.

use super::business::{Choice, DayOfWeek, BOOKING_METHODS, CATEGORIES, REGIONS, SELLING_MODES};
use super::form_state::{DayHours, FormState};
use std::fmt;

/// How a field is edited in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Single value picked from a lookup table
    Choice(&'static [Choice]),
    /// Any number of values from a lookup table
    MultiChoice(&'static [Choice]),
    Toggle,
    /// Free-form entries added one at a time
    List,
    /// Whole-day opening hours; edited through its open/close/closed parts
    Hours,
}

/// Borrowed view of a field's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Items(&'a [String]),
    Flag(bool),
    Hours(&'a DayHours),
    /// The field lives in a sub-record the current business kind doesn't have
    Missing,
}

impl FieldValue<'_> {
    /// Emptiness as seen by optional rules. An unset flag counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Items(items) => items.iter().all(|i| i.trim().is_empty()),
            FieldValue::Flag(set) => !set,
            FieldValue::Hours(_) => false,
            FieldValue::Missing => true,
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_items(&self) -> &[String] {
        match self {
            FieldValue::Items(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    BusinessName,
    Description,
    Region,
    ContactEmail,
    ContactPhone,
    Website,
    Facebook,
    Instagram,
    XProfile,
    Linkedin,
    SellingModes,
    DeliveryArea,
    PrimaryCategory,
    ProductCategories,
    Hours(DayOfWeek),
    HoursClosed(DayOfWeek),
    HoursOpen(DayOfWeek),
    HoursClose(DayOfWeek),
    BookingMethod,
    BookingUrl,
    ServiceArea,
    ServiceCategories,
    LicenseNumber,
    Certifications,
    YearsInBusiness,
    LogoUrl,
    CoverImageUrl,
    Gallery,
    AcceptedTerms,
}

impl FieldPath {
    /// Dotted location of the field inside the form state
    pub fn path(&self) -> String {
        match self {
            Self::BusinessName => "businessName".into(),
            Self::Description => "description".into(),
            Self::Region => "region".into(),
            Self::ContactEmail => "contact.email".into(),
            Self::ContactPhone => "contact.phone".into(),
            Self::Website => "contact.website".into(),
            Self::Facebook => "socialLinks.facebook".into(),
            Self::Instagram => "socialLinks.instagram".into(),
            Self::XProfile => "socialLinks.x".into(),
            Self::Linkedin => "socialLinks.linkedin".into(),
            Self::SellingModes => "productData.sellingModes".into(),
            Self::DeliveryArea => "productData.deliveryArea".into(),
            Self::PrimaryCategory => "productData.primaryCategory".into(),
            Self::ProductCategories => "productData.categories".into(),
            Self::Hours(day) => format!("productData.weeklyHours.{}", day.key()),
            Self::HoursClosed(day) => format!("productData.weeklyHours.{}.closed", day.key()),
            Self::HoursOpen(day) => format!("productData.weeklyHours.{}.open", day.key()),
            Self::HoursClose(day) => format!("productData.weeklyHours.{}.close", day.key()),
            Self::BookingMethod => "serviceData.bookingMethod".into(),
            Self::BookingUrl => "serviceData.bookingUrl".into(),
            Self::ServiceArea => "serviceData.serviceArea".into(),
            Self::ServiceCategories => "serviceData.categories".into(),
            Self::LicenseNumber => "serviceData.licenseNumber".into(),
            Self::Certifications => "serviceData.certifications".into(),
            Self::YearsInBusiness => "serviceData.yearsInBusiness".into(),
            Self::LogoUrl => "media.logoUrl".into(),
            Self::CoverImageUrl => "media.coverImageUrl".into(),
            Self::Gallery => "media.gallery".into(),
            Self::AcceptedTerms => "acceptedTerms".into(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::BusinessName => "Business name".into(),
            Self::Description => "Description".into(),
            Self::Region => "Region".into(),
            Self::ContactEmail => "Email".into(),
            Self::ContactPhone => "Phone".into(),
            Self::Website => "Website".into(),
            Self::Facebook => "Facebook".into(),
            Self::Instagram => "Instagram".into(),
            Self::XProfile => "X".into(),
            Self::Linkedin => "LinkedIn".into(),
            Self::SellingModes => "How do you sell?".into(),
            Self::DeliveryArea => "Delivery area".into(),
            Self::PrimaryCategory => "Primary category".into(),
            Self::ProductCategories => "Product categories".into(),
            Self::Hours(day) => day.label().into(),
            Self::HoursClosed(day) => format!("{} closed", day.label()),
            Self::HoursOpen(day) => format!("{} opens", day.label()),
            Self::HoursClose(day) => format!("{} closes", day.label()),
            Self::BookingMethod => "Booking method".into(),
            Self::BookingUrl => "Booking link".into(),
            Self::ServiceArea => "Service area".into(),
            Self::ServiceCategories => "Service categories".into(),
            Self::LicenseNumber => "Licence number".into(),
            Self::Certifications => "Certifications".into(),
            Self::YearsInBusiness => "Years in business".into(),
            Self::LogoUrl => "Logo URL".into(),
            Self::CoverImageUrl => "Cover image URL".into(),
            Self::Gallery => "Gallery image URLs".into(),
            Self::AcceptedTerms => "I accept the listing terms".into(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Description => FieldKind::Multiline,
            Self::Region => FieldKind::Choice(REGIONS),
            Self::SellingModes => FieldKind::MultiChoice(SELLING_MODES),
            Self::PrimaryCategory => FieldKind::Choice(CATEGORIES),
            Self::ProductCategories | Self::ServiceCategories => {
                FieldKind::MultiChoice(CATEGORIES)
            }
            Self::Hours(_) => FieldKind::Hours,
            Self::HoursClosed(_) | Self::AcceptedTerms => FieldKind::Toggle,
            Self::BookingMethod => FieldKind::Choice(BOOKING_METHODS),
            Self::Certifications | Self::Gallery => FieldKind::List,
            _ => FieldKind::Text,
        }
    }

    /// The field whose error message describes this one. Hour parts report
    /// against their whole day.
    pub fn error_key(&self) -> FieldPath {
        match *self {
            Self::HoursClosed(day) | Self::HoursOpen(day) | Self::HoursClose(day) => {
                Self::Hours(day)
            }
            other => other,
        }
    }

    pub fn read<'a>(&self, state: &'a FormState) -> FieldValue<'a> {
        let product = state.product_data.as_ref();
        let service = state.service_data.as_ref();
        match self {
            Self::BusinessName => FieldValue::Text(&state.business_name),
            Self::Description => FieldValue::Text(&state.description),
            Self::Region => FieldValue::Text(&state.region),
            Self::ContactEmail => FieldValue::Text(&state.contact.email),
            Self::ContactPhone => FieldValue::Text(&state.contact.phone),
            Self::Website => FieldValue::Text(&state.contact.website),
            Self::Facebook => FieldValue::Text(&state.social_links.facebook),
            Self::Instagram => FieldValue::Text(&state.social_links.instagram),
            Self::XProfile => FieldValue::Text(&state.social_links.x),
            Self::Linkedin => FieldValue::Text(&state.social_links.linkedin),
            Self::SellingModes => product.map_or(FieldValue::Missing, |p| {
                FieldValue::Items(&p.selling_modes)
            }),
            Self::DeliveryArea => product.map_or(FieldValue::Missing, |p| {
                FieldValue::Text(&p.delivery_area)
            }),
            Self::PrimaryCategory => product.map_or(FieldValue::Missing, |p| {
                FieldValue::Text(&p.primary_category)
            }),
            Self::ProductCategories => product.map_or(FieldValue::Missing, |p| {
                FieldValue::Items(&p.categories)
            }),
            Self::Hours(day) => product
                .and_then(|p| p.hours_for(*day))
                .map_or(FieldValue::Missing, FieldValue::Hours),
            Self::HoursClosed(day) => product
                .and_then(|p| p.hours_for(*day))
                .map_or(FieldValue::Missing, |h| FieldValue::Flag(h.closed)),
            Self::HoursOpen(day) => product
                .and_then(|p| p.hours_for(*day))
                .map_or(FieldValue::Missing, |h| FieldValue::Text(&h.open)),
            Self::HoursClose(day) => product
                .and_then(|p| p.hours_for(*day))
                .map_or(FieldValue::Missing, |h| FieldValue::Text(&h.close)),
            Self::BookingMethod => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Text(&s.booking_method)
            }),
            Self::BookingUrl => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Text(&s.booking_url)
            }),
            Self::ServiceArea => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Text(&s.service_area)
            }),
            Self::ServiceCategories => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Items(&s.categories)
            }),
            Self::LicenseNumber => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Text(&s.license_number)
            }),
            Self::Certifications => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Items(&s.certifications)
            }),
            Self::YearsInBusiness => service.map_or(FieldValue::Missing, |s| {
                FieldValue::Text(&s.years_in_business)
            }),
            Self::LogoUrl => FieldValue::Text(&state.media.logo_url),
            Self::CoverImageUrl => FieldValue::Text(&state.media.cover_image_url),
            Self::Gallery => FieldValue::Items(&state.media.gallery),
            Self::AcceptedTerms => FieldValue::Flag(state.accepted_terms),
        }
    }

    /// Mutable access to text-backed fields (plain text and single choices)
    pub fn text_mut<'a>(&self, state: &'a mut FormState) -> Option<&'a mut String> {
        match self {
            Self::BusinessName => Some(&mut state.business_name),
            Self::Description => Some(&mut state.description),
            Self::Region => Some(&mut state.region),
            Self::ContactEmail => Some(&mut state.contact.email),
            Self::ContactPhone => Some(&mut state.contact.phone),
            Self::Website => Some(&mut state.contact.website),
            Self::Facebook => Some(&mut state.social_links.facebook),
            Self::Instagram => Some(&mut state.social_links.instagram),
            Self::XProfile => Some(&mut state.social_links.x),
            Self::Linkedin => Some(&mut state.social_links.linkedin),
            Self::DeliveryArea => state.product_data.as_mut().map(|p| &mut p.delivery_area),
            Self::PrimaryCategory => state
                .product_data
                .as_mut()
                .map(|p| &mut p.primary_category),
            Self::HoursOpen(day) => state
                .product_data
                .as_mut()
                .and_then(|p| p.hours_for_mut(*day))
                .map(|h| &mut h.open),
            Self::HoursClose(day) => state
                .product_data
                .as_mut()
                .and_then(|p| p.hours_for_mut(*day))
                .map(|h| &mut h.close),
            Self::BookingMethod => state.service_data.as_mut().map(|s| &mut s.booking_method),
            Self::BookingUrl => state.service_data.as_mut().map(|s| &mut s.booking_url),
            Self::ServiceArea => state.service_data.as_mut().map(|s| &mut s.service_area),
            Self::LicenseNumber => state.service_data.as_mut().map(|s| &mut s.license_number),
            Self::YearsInBusiness => state
                .service_data
                .as_mut()
                .map(|s| &mut s.years_in_business),
            Self::LogoUrl => Some(&mut state.media.logo_url),
            Self::CoverImageUrl => Some(&mut state.media.cover_image_url),
            _ => None,
        }
    }

    /// Mutable access to list-backed fields (multi choices and free lists)
    pub fn items_mut<'a>(&self, state: &'a mut FormState) -> Option<&'a mut Vec<String>> {
        match self {
            Self::SellingModes => state.product_data.as_mut().map(|p| &mut p.selling_modes),
            Self::ProductCategories => state.product_data.as_mut().map(|p| &mut p.categories),
            Self::ServiceCategories => state.service_data.as_mut().map(|s| &mut s.categories),
            Self::Certifications => state.service_data.as_mut().map(|s| &mut s.certifications),
            Self::Gallery => Some(&mut state.media.gallery),
            _ => None,
        }
    }

    pub fn flag_mut<'a>(&self, state: &'a mut FormState) -> Option<&'a mut bool> {
        match self {
            Self::AcceptedTerms => Some(&mut state.accepted_terms),
            Self::HoursClosed(day) => state
                .product_data
                .as_mut()
                .and_then(|p| p.hours_for_mut(*day))
                .map(|h| &mut h.closed),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::business::BusinessKind;

    mod field_path {
        use super::*;

        #[test]
        fn test_dotted_paths() {
            assert_eq!(
                FieldPath::PrimaryCategory.path(),
                "productData.primaryCategory"
            );
            assert_eq!(FieldPath::ContactEmail.path(), "contact.email");
            assert_eq!(
                FieldPath::Hours(DayOfWeek::Friday).to_string(),
                "productData.weeklyHours.friday"
            );
        }

        #[test]
        fn test_hour_parts_report_against_day() {
            let day = DayOfWeek::Tuesday;
            assert_eq!(FieldPath::HoursOpen(day).error_key(), FieldPath::Hours(day));
            assert_eq!(FieldPath::HoursClosed(day).error_key(), FieldPath::Hours(day));
            assert_eq!(FieldPath::Website.error_key(), FieldPath::Website);
        }

        #[test]
        fn test_read_missing_sub_record() {
            let state = FormState::new(BusinessKind::Service);
            assert_eq!(FieldPath::DeliveryArea.read(&state), FieldValue::Missing);
            assert!(FieldPath::DeliveryArea.read(&state).is_empty());
        }

        #[test]
        fn test_text_mut_writes_through() {
            let mut state = FormState::new(BusinessKind::Both);
            if let Some(text) = FieldPath::BookingUrl.text_mut(&mut state) {
                text.push_str("book.example.com");
            }
            assert_eq!(
                FieldPath::BookingUrl.read(&state).as_text(),
                "book.example.com"
            );
        }

        #[test]
        fn test_text_mut_none_for_lists() {
            let mut state = FormState::new(BusinessKind::Product);
            assert!(FieldPath::SellingModes.text_mut(&mut state).is_none());
            assert!(FieldPath::SellingModes.items_mut(&mut state).is_some());
        }

        #[test]
        fn test_flag_mut_hours_closed() {
            let mut state = FormState::new(BusinessKind::Product);
            let day = DayOfWeek::Monday;
            if let Some(closed) = FieldPath::HoursClosed(day).flag_mut(&mut state) {
                *closed = true;
            }
            assert_eq!(FieldPath::HoursClosed(day).read(&state), FieldValue::Flag(true));
        }

        #[test]
        fn test_kinds() {
            assert_eq!(FieldPath::Description.kind(), FieldKind::Multiline);
            assert_eq!(FieldPath::AcceptedTerms.kind(), FieldKind::Toggle);
            assert_eq!(FieldPath::Gallery.kind(), FieldKind::List);
            assert!(matches!(
                FieldPath::BookingMethod.kind(),
                FieldKind::Choice(_)
            ));
        }
    }

    mod field_value {
        use super::*;

        #[test]
        fn test_emptiness() {
            assert!(FieldValue::Text("  ").is_empty());
            assert!(!FieldValue::Text("x").is_empty());
            assert!(FieldValue::Items(&[]).is_empty());
            assert!(FieldValue::Flag(false).is_empty());
            assert!(!FieldValue::Flag(true).is_empty());
        }

        #[test]
        fn test_blank_items_are_empty() {
            let items = vec![" ".to_string()];
            assert!(FieldValue::Items(&items).is_empty());
        }
    }
}
