//! Business kinds and read-only lookup data

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Which kinds of business a listing describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessKind {
    #[default]
    Product,
    Service,
    Both,
}

impl BusinessKind {
    pub const ALL: [BusinessKind; 3] = [Self::Product, Self::Service, Self::Both];

    pub fn has_product(self) -> bool {
        matches!(self, Self::Product | Self::Both)
    }

    pub fn has_service(self) -> bool {
        matches!(self, Self::Service | Self::Both)
    }

    /// Rebuild a kind from the two selection flags. `None` when neither is set.
    pub fn from_flags(product: bool, service: bool) -> Option<Self> {
        match (product, service) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Product),
            (false, true) => Some(Self::Service),
            (false, false) => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Service => "Service",
            Self::Both => "Product & Service",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Product => "Shops, makers and retailers selling goods",
            Self::Service => "Trades, studios and professionals taking bookings",
            Self::Both => "Businesses that sell goods and take bookings",
        }
    }

    /// External type tags carried in the submission payload
    pub fn type_tags(self) -> Vec<String> {
        let mut tags = Vec::new();
        if self.has_product() {
            tags.push("product".to_string());
        }
        if self.has_service() {
            tags.push("service".to_string());
        }
        tags
    }
}

impl std::str::FromStr for BusinessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "service" => Ok(Self::Service),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown business kind `{other}` (expected product, service or both)"
            )),
        }
    }
}

/// A `{value, label}` pair from the reference data tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub const CATEGORIES: &[Choice] = &[
    choice("cat-bakery", "Bakery"),
    choice("cat-cafe", "Cafe"),
    choice("cat-clothing", "Clothing & Accessories"),
    choice("cat-crafts", "Arts & Crafts"),
    choice("cat-grocery", "Grocery"),
    choice("cat-home", "Home & Garden"),
    choice("cat-beauty", "Beauty & Wellness"),
    choice("cat-fitness", "Fitness"),
    choice("cat-repair", "Repair & Maintenance"),
    choice("cat-tutoring", "Tutoring & Lessons"),
    choice("cat-events", "Events & Catering"),
    choice("cat-pets", "Pet Care"),
];

pub const REGIONS: &[Choice] = &[
    choice("north", "North"),
    choice("south", "South"),
    choice("east", "East"),
    choice("west", "West"),
    choice("central", "Central"),
    choice("coast", "Coast"),
];

pub const SELLING_MODES: &[Choice] = &[
    choice("in_store", "In store"),
    choice("online", "Online shop"),
    choice("delivery", "Local delivery"),
];

pub const BOOKING_METHODS: &[Choice] = &[
    choice("online", "Book online"),
    choice("phone", "Call to book"),
    choice("walk_in", "Walk-ins welcome"),
    choice("message", "Message to book"),
];

/// Find the label for a value in a lookup table
pub fn label_for(choices: &[Choice], value: &str) -> Option<&'static str> {
    choices.iter().find(|c| c.value == value).map(|c| c.label)
}

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
            Self::Sunday => Weekday::Sun,
        }
    }

    /// ISO-8601 day number (Monday = 1)
    pub fn iso_number(self) -> u32 {
        self.weekday().number_from_monday()
    }

    pub fn from_iso_number(n: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.iso_number() == n)
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod business_kind {
        use super::*;

        #[test]
        fn test_flags() {
            assert!(BusinessKind::Product.has_product());
            assert!(!BusinessKind::Product.has_service());
            assert!(BusinessKind::Service.has_service());
            assert!(!BusinessKind::Service.has_product());
            assert!(BusinessKind::Both.has_product());
            assert!(BusinessKind::Both.has_service());
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(BusinessKind::from_flags(true, true), Some(BusinessKind::Both));
            assert_eq!(
                BusinessKind::from_flags(false, true),
                Some(BusinessKind::Service)
            );
            assert_eq!(BusinessKind::from_flags(false, false), None);
        }

        #[test]
        fn test_type_tags_product_first() {
            assert_eq!(BusinessKind::Both.type_tags(), vec!["product", "service"]);
            assert_eq!(BusinessKind::Service.type_tags(), vec!["service"]);
        }

        #[test]
        fn test_parse() {
            assert_eq!("Both".parse::<BusinessKind>(), Ok(BusinessKind::Both));
            assert_eq!(" service ".parse::<BusinessKind>(), Ok(BusinessKind::Service));
            assert!("shop".parse::<BusinessKind>().is_err());
        }
    }

    mod lookup_data {
        use super::*;

        #[test]
        fn test_label_for_known_value() {
            assert_eq!(label_for(BOOKING_METHODS, "walk_in"), Some("Walk-ins welcome"));
        }

        #[test]
        fn test_label_for_unknown_value() {
            assert_eq!(label_for(CATEGORIES, "cat-unknown"), None);
        }

        #[test]
        fn test_category_values_are_unique() {
            let mut values: Vec<_> = CATEGORIES.iter().map(|c| c.value).collect();
            values.sort_unstable();
            values.dedup();
            assert_eq!(values.len(), CATEGORIES.len());
        }
    }

    mod day_of_week {
        use super::*;

        #[test]
        fn test_iso_numbers() {
            assert_eq!(DayOfWeek::Monday.iso_number(), 1);
            assert_eq!(DayOfWeek::Sunday.iso_number(), 7);
        }

        #[test]
        fn test_from_iso_number() {
            assert_eq!(DayOfWeek::from_iso_number(3), Some(DayOfWeek::Wednesday));
            assert_eq!(DayOfWeek::from_iso_number(0), None);
            assert_eq!(DayOfWeek::from_iso_number(8), None);
        }

        #[test]
        fn test_weekend() {
            assert!(DayOfWeek::Saturday.is_weekend());
            assert!(!DayOfWeek::Friday.is_weekend());
        }
    }
}
