//! Wire messages for `listings.v1.ListingService`
//!
//! Hand-maintained prost messages; tags must stay in sync with
//! `proto/listings/v1/listing.proto`.

use crate::listing::payload::{
    ContactPayload, HoursEntry as PayloadHours, MediaPayload, ProductPayload, ServicePayload,
    SocialLinksPayload, SubmissionPayload,
};

pub const ADD_LISTING_PATH: &str = "/listings.v1.ListingService/AddListing";
pub const EDIT_LISTING_PATH: &str = "/listings.v1.ListingService/EditListing";
pub const GET_LISTING_PATH: &str = "/listings.v1.ListingService/GetListing";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Contact {
    #[prost(string, tag = "1")]
    pub email: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub phone: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub website: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SocialLinks {
    #[prost(string, tag = "1")]
    pub facebook: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub instagram: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub x: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub linkedin: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HoursEntry {
    #[prost(uint32, tag = "1")]
    pub day_of_week: u32,
    #[prost(string, tag = "2")]
    pub open_time: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub close_time: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProductOffer {
    #[prost(string, repeated, tag = "1")]
    pub selling_modes: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bool, tag = "2")]
    pub offers_delivery: bool,
    #[prost(string, tag = "3")]
    pub delivery_area: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub primary_category_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "5")]
    pub hours: ::prost::alloc::vec::Vec<HoursEntry>,
    #[prost(string, repeated, tag = "6")]
    pub category_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceOffer {
    #[prost(string, tag = "1")]
    pub booking_method: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub accepts_online_booking: bool,
    #[prost(string, tag = "3")]
    pub booking_url: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub service_area: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub is_licensed: bool,
    #[prost(string, tag = "6")]
    pub license_number: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "7")]
    pub certifications: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(uint32, optional, tag = "8")]
    pub years_in_business: ::core::option::Option<u32>,
    #[prost(string, repeated, tag = "9")]
    pub category_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Media {
    #[prost(string, tag = "1")]
    pub logo_url: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub cover_image_url: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub gallery: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Listing {
    #[prost(string, tag = "1")]
    pub business_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub business_types: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "4")]
    pub region: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "5")]
    pub contact: ::core::option::Option<Contact>,
    #[prost(message, optional, tag = "6")]
    pub social_links: ::core::option::Option<SocialLinks>,
    #[prost(string, repeated, tag = "7")]
    pub category_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "8")]
    pub product: ::core::option::Option<ProductOffer>,
    #[prost(message, optional, tag = "9")]
    pub service: ::core::option::Option<ServiceOffer>,
    #[prost(message, optional, tag = "10")]
    pub media: ::core::option::Option<Media>,
    #[prost(bool, tag = "11")]
    pub accepted_terms: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddListingRequest {
    #[prost(message, optional, tag = "1")]
    pub listing: ::core::option::Option<Listing>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddListingResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub listing_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EditListingRequest {
    #[prost(string, tag = "1")]
    pub listing_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub listing: ::core::option::Option<Listing>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EditListingResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListingRequest {
    #[prost(string, tag = "1")]
    pub listing_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListingResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub listing: ::core::option::Option<Listing>,
}

fn empty_to_none(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<&SubmissionPayload> for Listing {
    fn from(payload: &SubmissionPayload) -> Self {
        Self {
            business_name: payload.business_name.clone(),
            description: payload.description.clone(),
            business_types: payload.business_types.clone(),
            region: payload.region.clone(),
            contact: Some(Contact {
                email: payload.contact.email.clone(),
                phone: payload.contact.phone.clone().unwrap_or_default(),
                website: payload.contact.website.clone().unwrap_or_default(),
            }),
            social_links: Some(SocialLinks {
                facebook: payload.social_links.facebook.clone().unwrap_or_default(),
                instagram: payload.social_links.instagram.clone().unwrap_or_default(),
                x: payload.social_links.x.clone().unwrap_or_default(),
                linkedin: payload.social_links.linkedin.clone().unwrap_or_default(),
            }),
            category_ids: payload.category_ids.clone(),
            product: payload.product.as_ref().map(|p| ProductOffer {
                selling_modes: p.selling_modes.clone(),
                offers_delivery: p.offers_delivery,
                delivery_area: p.delivery_area.clone().unwrap_or_default(),
                primary_category_id: p.primary_category_id.clone(),
                hours: p
                    .hours
                    .iter()
                    .map(|h| HoursEntry {
                        day_of_week: h.day_of_week,
                        open_time: h.open_time.clone(),
                        close_time: h.close_time.clone(),
                    })
                    .collect(),
                category_ids: p.category_ids.clone(),
            }),
            service: payload.service.as_ref().map(|s| ServiceOffer {
                booking_method: s.booking_method.clone(),
                accepts_online_booking: s.accepts_online_booking,
                booking_url: s.booking_url.clone().unwrap_or_default(),
                service_area: s.service_area.clone(),
                is_licensed: s.is_licensed,
                license_number: s.license_number.clone().unwrap_or_default(),
                certifications: s.certifications.clone(),
                years_in_business: s.years_in_business,
                category_ids: s.category_ids.clone(),
            }),
            media: Some(Media {
                logo_url: payload.media.logo_url.clone().unwrap_or_default(),
                cover_image_url: payload.media.cover_image_url.clone().unwrap_or_default(),
                gallery: payload.media.gallery.clone(),
            }),
            accepted_terms: payload.accepted_terms,
        }
    }
}

impl From<Listing> for SubmissionPayload {
    fn from(listing: Listing) -> Self {
        let contact = listing.contact.unwrap_or_default();
        let social = listing.social_links.unwrap_or_default();
        let media = listing.media.unwrap_or_default();
        Self {
            business_name: listing.business_name,
            description: listing.description,
            business_types: listing.business_types,
            region: listing.region,
            contact: ContactPayload {
                email: contact.email,
                phone: empty_to_none(contact.phone),
                website: empty_to_none(contact.website),
            },
            social_links: SocialLinksPayload {
                facebook: empty_to_none(social.facebook),
                instagram: empty_to_none(social.instagram),
                x: empty_to_none(social.x),
                linkedin: empty_to_none(social.linkedin),
            },
            category_ids: listing.category_ids,
            product: listing.product.map(|p| ProductPayload {
                selling_modes: p.selling_modes,
                offers_delivery: p.offers_delivery,
                delivery_area: empty_to_none(p.delivery_area),
                primary_category_id: p.primary_category_id,
                hours: p
                    .hours
                    .into_iter()
                    .map(|h| PayloadHours {
                        day_of_week: h.day_of_week,
                        open_time: h.open_time,
                        close_time: h.close_time,
                    })
                    .collect(),
                category_ids: p.category_ids,
            }),
            service: listing.service.map(|s| ServicePayload {
                booking_method: s.booking_method,
                accepts_online_booking: s.accepts_online_booking,
                booking_url: empty_to_none(s.booking_url),
                service_area: s.service_area,
                is_licensed: s.is_licensed,
                license_number: empty_to_none(s.license_number),
                certifications: s.certifications,
                years_in_business: s.years_in_business,
                category_ids: s.category_ids,
            }),
            media: MediaPayload {
                logo_url: empty_to_none(media.logo_url),
                cover_image_url: empty_to_none(media.cover_image_url),
                gallery: media.gallery,
            },
            accepted_terms: listing.accepted_terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::business::BusinessKind;
    use crate::listing::form_state::FormState;
    use crate::listing::payload::to_payload;
    use pretty_assertions::assert_eq;
    use prost::Message;

    const SCHEMA: &str = include_str!("../../proto/listings/v1/listing.proto");

    /// Field number declared for `message.field` in the schema
    fn schema_tag(message: &str, field: &str) -> Option<u32> {
        let body = SCHEMA
            .split(&format!("message {message} {{"))
            .nth(1)?
            .split('}')
            .next()?;
        body.lines().find_map(|line| {
            let (decl, tag) = line.trim().trim_end_matches(';').split_once(" = ")?;
            if decl.split_whitespace().last()? != field {
                return None;
            }
            tag.parse().ok()
        })
    }

    /// Field number of the first key in an encoded message
    fn encoded_tag(message: &impl Message) -> u32 {
        u32::from(message.encode_to_vec()[0] >> 3)
    }

    fn sample_payload() -> SubmissionPayload {
        let mut state = FormState::new(BusinessKind::Both);
        state.business_name = "Maple Hardware".to_string();
        state.contact.email = "desk@maple.example".to_string();
        state.contact.website = "maple.example".to_string();
        if let Some(service) = state.service_data.as_mut() {
            service.booking_url = "maple.example/book".to_string();
            service.years_in_business = "12".to_string();
        }
        to_payload(&state)
    }

    #[test]
    fn test_listing_conversion_preserves_payload() {
        let payload = sample_payload();
        let listing = Listing::from(&payload);
        assert_eq!(SubmissionPayload::from(listing), payload);
    }

    #[test]
    fn test_missing_sections_become_defaults() {
        let payload = SubmissionPayload::from(Listing::default());
        assert_eq!(payload.contact.email, "");
        assert_eq!(payload.contact.website, None);
        assert!(payload.product.is_none());
    }

    #[test]
    fn test_wire_encoding_decodes() {
        let request = AddListingRequest {
            listing: Some(Listing::from(&sample_payload())),
        };
        let bytes = request.encode_to_vec();
        let decoded = AddListingRequest::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_service_paths_match_schema() {
        assert!(SCHEMA.contains("package listings.v1;"));
        for path in [ADD_LISTING_PATH, EDIT_LISTING_PATH, GET_LISTING_PATH] {
            let (service, method) = path.trim_start_matches('/').rsplit_once('/').unwrap();
            assert_eq!(service, "listings.v1.ListingService");
            assert!(
                SCHEMA.contains(&format!("rpc {method}(")),
                "{method} missing from schema"
            );
        }
    }

    #[test]
    fn test_field_numbers_match_schema() {
        let product = ProductOffer {
            category_ids: vec!["cat-bakery".to_string()],
            ..Default::default()
        };
        assert_eq!(
            Some(encoded_tag(&product)),
            schema_tag("ProductOffer", "category_ids")
        );

        let service = ServiceOffer {
            category_ids: vec!["cat-events".to_string()],
            ..Default::default()
        };
        assert_eq!(
            Some(encoded_tag(&service)),
            schema_tag("ServiceOffer", "category_ids")
        );

        let service = ServiceOffer {
            years_in_business: Some(4),
            ..Default::default()
        };
        assert_eq!(
            Some(encoded_tag(&service)),
            schema_tag("ServiceOffer", "years_in_business")
        );

        let listing = Listing {
            accepted_terms: true,
            ..Default::default()
        };
        assert_eq!(
            Some(encoded_tag(&listing)),
            schema_tag("Listing", "accepted_terms")
        );
    }
}
