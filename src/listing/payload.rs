//! Mapping between the form state and the listing service's payload shape

use super::business::DayOfWeek;
use super::form_state::{
    ContactInfo, DayHours, FormState, MediaData, ProductData, ServiceData, SocialLinks,
};
use super::validators::{parse_time, TIME_FORMAT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinksPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursEntry {
    /// ISO weekday, Monday = 1
    pub day_of_week: u32,
    pub open_time: String,
    pub close_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub selling_modes: Vec<String>,
    pub offers_delivery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_area: Option<String>,
    pub primary_category_id: String,
    pub hours: Vec<HoursEntry>,
    /// Categories picked on the product step, primary excluded
    #[serde(default)]
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub booking_method: String,
    pub accepts_online_booking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    pub service_area: String,
    pub is_licensed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_in_business: Option<u32>,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub gallery: Vec<String>,
}

/// The object handed to the listing service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub business_name: String,
    pub description: String,
    pub business_types: Vec<String>,
    pub region: String,
    pub contact: ContactPayload,
    pub social_links: SocialLinksPayload,
    pub category_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServicePayload>,
    pub media: MediaPayload,
    pub accepted_terms: bool,
}

/// Trim and prepend `https://` when no scheme is present. Blank becomes `None`.
pub fn normalize_url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(value.to_string())
    } else {
        Some(format!("https://{value}"))
    }
}

/// Booking method label used by the wizard -> service enum value
pub fn booking_method_to_external(value: &str) -> &str {
    match value {
        "online" => "book_online",
        "phone" => "call_to_book",
        "walk_in" => "walk_ins_welcome",
        "message" => "message_to_book",
        other => other,
    }
}

pub fn booking_method_from_external(value: &str) -> &str {
    match value {
        "book_online" => "online",
        "call_to_book" => "phone",
        "walk_ins_welcome" => "walk_in",
        "message_to_book" => "message",
        other => other,
    }
}

pub fn selling_mode_to_external(value: &str) -> &str {
    match value {
        "in_store" => "in_person",
        "online" => "ecommerce",
        "delivery" => "local_delivery",
        other => other,
    }
}

pub fn selling_mode_from_external(value: &str) -> &str {
    match value {
        "in_person" => "in_store",
        "ecommerce" => "online",
        "local_delivery" => "delivery",
        other => other,
    }
}

/// Drop blanks and repeats, keeping the first occurrence of each value
pub fn dedup_preserving_order<'a>(values: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.to_string()))
        .map(str::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn normalize_time(value: &str) -> String {
    parse_time(value)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

/// Open days only, Monday first
pub fn flatten_hours(hours: &[DayHours]) -> Vec<HoursEntry> {
    let mut entries: Vec<HoursEntry> = hours
        .iter()
        .filter(|h| !h.closed)
        .map(|h| HoursEntry {
            day_of_week: h.day.iso_number(),
            open_time: normalize_time(&h.open),
            close_time: normalize_time(&h.close),
        })
        .collect();
    entries.sort_by_key(|e| e.day_of_week);
    entries
}

fn product_payload(product: &ProductData) -> ProductPayload {
    let offers_delivery = product.offers_delivery();
    let primary = product.primary_category.trim();
    ProductPayload {
        selling_modes: dedup_preserving_order(&product.selling_modes)
            .iter()
            .map(|m| selling_mode_to_external(m).to_string())
            .collect(),
        offers_delivery,
        delivery_area: if offers_delivery {
            non_blank(&product.delivery_area)
        } else {
            None
        },
        primary_category_id: primary.to_string(),
        hours: flatten_hours(&product.weekly_hours),
        category_ids: dedup_preserving_order(&product.categories)
            .into_iter()
            .filter(|c| c != primary)
            .collect(),
    }
}

fn service_payload(service: &ServiceData) -> ServicePayload {
    let accepts_online_booking = service.books_online();
    let license_number = non_blank(&service.license_number);
    ServicePayload {
        booking_method: booking_method_to_external(&service.booking_method).to_string(),
        accepts_online_booking,
        booking_url: if accepts_online_booking {
            normalize_url(&service.booking_url)
        } else {
            None
        },
        service_area: service.service_area.trim().to_string(),
        is_licensed: license_number.is_some(),
        license_number,
        certifications: dedup_preserving_order(&service.certifications),
        years_in_business: service.years_in_business.trim().parse().ok(),
        category_ids: dedup_preserving_order(&service.categories),
    }
}

/// Reshape the internal form state into the external submission payload
pub fn to_payload(state: &FormState) -> SubmissionPayload {
    let product = state.product_data.as_ref();
    let service = state.service_data.as_ref();

    let primary = product.map(|p| &p.primary_category);
    let product_categories = product.map(|p| p.categories.iter()).into_iter().flatten();
    let service_categories = service.map(|s| s.categories.iter()).into_iter().flatten();
    let category_ids = dedup_preserving_order(
        primary
            .into_iter()
            .chain(product_categories)
            .chain(service_categories),
    );

    SubmissionPayload {
        business_name: state.business_name.trim().to_string(),
        description: state.description.trim().to_string(),
        business_types: state.business_kind().type_tags(),
        region: state.region.clone(),
        contact: ContactPayload {
            email: state.contact.email.trim().to_string(),
            phone: non_blank(&state.contact.phone),
            website: normalize_url(&state.contact.website),
        },
        social_links: SocialLinksPayload {
            facebook: normalize_url(&state.social_links.facebook),
            instagram: normalize_url(&state.social_links.instagram),
            x: normalize_url(&state.social_links.x),
            linkedin: normalize_url(&state.social_links.linkedin),
        },
        category_ids,
        product: product.map(product_payload),
        service: service.map(service_payload),
        media: MediaPayload {
            logo_url: normalize_url(&state.media.logo_url),
            cover_image_url: normalize_url(&state.media.cover_image_url),
            gallery: dedup_preserving_order(
                &state
                    .media
                    .gallery
                    .iter()
                    .filter_map(|u| normalize_url(u))
                    .collect::<Vec<_>>(),
            ),
        },
        accepted_terms: state.accepted_terms,
    }
}

impl FormState {
    /// Rebuild editable state from a stored listing. Each sub-record gets
    /// back the categories of its own section; hours for days missing from
    /// the payload come back closed.
    pub fn from_payload(payload: &SubmissionPayload) -> Self {
        let has_product = payload.product.is_some()
            || payload.business_types.iter().any(|t| t == "product");
        let has_service = payload.service.is_some()
            || payload.business_types.iter().any(|t| t == "service");

        let product_data = has_product.then(|| {
            let source = payload.product.clone().unwrap_or_default();
            let mut product = ProductData::default();
            if !source.selling_modes.is_empty() {
                product.selling_modes = source
                    .selling_modes
                    .iter()
                    .map(|m| selling_mode_from_external(m).to_string())
                    .collect();
            }
            product.delivery_area = source.delivery_area.unwrap_or_default();
            product.primary_category = source.primary_category_id.clone();
            product.categories = source.category_ids;
            if payload.product.is_some() {
                let mut weekly_hours: Vec<DayHours> =
                    DayOfWeek::ALL.into_iter().map(DayHours::closed).collect();
                for entry in &source.hours {
                    let Some(day) = DayOfWeek::from_iso_number(entry.day_of_week) else {
                        tracing::debug!(day = entry.day_of_week, "skipping unknown weekday");
                        continue;
                    };
                    if let Some(slot) = weekly_hours.iter_mut().find(|h| h.day == day) {
                        *slot = DayHours::open_from(day, &entry.open_time, &entry.close_time);
                    }
                }
                product.weekly_hours = weekly_hours;
            }
            product
        });

        let service_data = has_service.then(|| {
            let source = payload.service.clone().unwrap_or_default();
            let mut service = ServiceData::default();
            if !source.booking_method.is_empty() {
                service.booking_method =
                    booking_method_from_external(&source.booking_method).to_string();
            }
            service.booking_url = source.booking_url.unwrap_or_default();
            service.service_area = source.service_area;
            service.categories = source.category_ids;
            service.license_number = source.license_number.unwrap_or_default();
            service.certifications = source.certifications;
            service.years_in_business = source
                .years_in_business
                .map(|y| y.to_string())
                .unwrap_or_default();
            service
        });

        let mut state = Self {
            business_name: payload.business_name.clone(),
            description: payload.description.clone(),
            region: payload.region.clone(),
            contact: ContactInfo {
                email: payload.contact.email.clone(),
                phone: payload.contact.phone.clone().unwrap_or_default(),
                website: payload.contact.website.clone().unwrap_or_default(),
            },
            social_links: SocialLinks {
                facebook: payload.social_links.facebook.clone().unwrap_or_default(),
                instagram: payload.social_links.instagram.clone().unwrap_or_default(),
                x: payload.social_links.x.clone().unwrap_or_default(),
                linkedin: payload.social_links.linkedin.clone().unwrap_or_default(),
            },
            media: MediaData {
                logo_url: payload.media.logo_url.clone().unwrap_or_default(),
                cover_image_url: payload.media.cover_image_url.clone().unwrap_or_default(),
                gallery: payload.media.gallery.clone(),
            },
            accepted_terms: payload.accepted_terms,
            product_data,
            service_data,
        };
        if state.product_data.is_none() && state.service_data.is_none() {
            state.set_business_kind(Default::default());
        }
        state
    }
}
