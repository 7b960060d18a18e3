//! The listing form aggregate

use super::business::{BusinessKind, DayOfWeek};
use serde::{Deserialize, Serialize};

/// Contact details shared by every listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub x: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaData {
    pub logo_url: String,
    pub cover_image_url: String,
    pub gallery: Vec<String>,
}

/// Opening hours for a single day, kept as typed-in text until validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub day: DayOfWeek,
    pub closed: bool,
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn open_from(day: DayOfWeek, open: &str, close: &str) -> Self {
        Self {
            day,
            closed: false,
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    pub fn closed(day: DayOfWeek) -> Self {
        Self {
            day,
            closed: true,
            open: String::new(),
            close: String::new(),
        }
    }
}

/// Weekdays 09:00-17:00, weekend closed
pub fn default_weekly_hours() -> Vec<DayHours> {
    DayOfWeek::ALL
        .into_iter()
        .map(|day| {
            if day.is_weekend() {
                DayHours::closed(day)
            } else {
                DayHours::open_from(day, "09:00", "17:00")
            }
        })
        .collect()
}

/// Fields only relevant to businesses selling goods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub selling_modes: Vec<String>,
    pub delivery_area: String,
    pub primary_category: String,
    pub categories: Vec<String>,
    pub weekly_hours: Vec<DayHours>,
}

impl Default for ProductData {
    fn default() -> Self {
        Self {
            selling_modes: vec!["in_store".to_string()],
            delivery_area: String::new(),
            primary_category: String::new(),
            categories: Vec::new(),
            weekly_hours: default_weekly_hours(),
        }
    }
}

impl ProductData {
    pub fn offers_delivery(&self) -> bool {
        self.selling_modes.iter().any(|m| m == "delivery")
    }

    pub fn hours_for(&self, day: DayOfWeek) -> Option<&DayHours> {
        self.weekly_hours.iter().find(|h| h.day == day)
    }

    pub fn hours_for_mut(&mut self, day: DayOfWeek) -> Option<&mut DayHours> {
        self.weekly_hours.iter_mut().find(|h| h.day == day)
    }
}

/// Fields only relevant to businesses taking bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    pub booking_method: String,
    pub booking_url: String,
    pub service_area: String,
    pub categories: Vec<String>,
    pub license_number: String,
    pub certifications: Vec<String>,
    pub years_in_business: String,
}

impl Default for ServiceData {
    fn default() -> Self {
        Self {
            booking_method: "online".to_string(),
            booking_url: String::new(),
            service_area: String::new(),
            categories: Vec::new(),
            license_number: String::new(),
            certifications: Vec::new(),
            years_in_business: String::new(),
        }
    }
}

impl ServiceData {
    pub fn books_online(&self) -> bool {
        self.booking_method == "online"
    }
}

/// Every value the wizard collects, across all steps.
///
/// At least one of `product_data` / `service_data` is always present;
/// [`FormState::business_kind`] is derived from which ones are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub business_name: String,
    pub description: String,
    pub region: String,
    pub contact: ContactInfo,
    pub social_links: SocialLinks,
    pub media: MediaData,
    pub accepted_terms: bool,
    pub product_data: Option<ProductData>,
    pub service_data: Option<ServiceData>,
}

impl FormState {
    /// Fresh state with the sub-records for `kind` seeded with defaults
    pub fn new(kind: BusinessKind) -> Self {
        Self {
            business_name: String::new(),
            description: String::new(),
            region: String::new(),
            contact: ContactInfo::default(),
            social_links: SocialLinks::default(),
            media: MediaData::default(),
            accepted_terms: false,
            product_data: kind.has_product().then(ProductData::default),
            service_data: kind.has_service().then(ServiceData::default),
        }
    }

    pub fn business_kind(&self) -> BusinessKind {
        BusinessKind::from_flags(self.product_data.is_some(), self.service_data.is_some())
            .unwrap_or_default()
    }

    /// Switch business kind, seeding newly relevant sub-records and dropping
    /// ones that no longer apply. Shared fields are untouched.
    pub fn set_business_kind(&mut self, kind: BusinessKind) {
        if kind.has_product() {
            self.product_data.get_or_insert_with(ProductData::default);
        } else {
            self.product_data = None;
        }
        if kind.has_service() {
            self.service_data.get_or_insert_with(ServiceData::default);
        } else {
            self.service_data = None;
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(BusinessKind::default())
    }
}
