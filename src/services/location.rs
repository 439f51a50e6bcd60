//! Location display formatting
//!
//! Geocoders return verbose display strings ("Dallas, Dallas County,
//! Texas, United States"); stops and remarks want "City, ST".

/// Maximum length of a formatted location string
const MAX_LOCATION_LEN: usize = 50;

/// Full state name → USPS two-letter code
const STATE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
    ("District of Columbia", "DC"),
];

/// Two-letter code for a full state name, if known
pub fn state_abbreviation(state: &str) -> Option<&'static str> {
    STATE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, abbrev)| *abbrev)
}

/// Normalize a geocoder display string to "City, ST".
///
/// Scans the comma-separated parts after the city for either an existing
/// two-letter code or a full state name. Strings that don't match are
/// passed through, truncated to 50 characters.
pub fn format_location(location: &str) -> String {
    if location.is_empty() {
        return "Unknown Location".to_string();
    }

    let parts: Vec<&str> = location.split(',').map(str::trim).collect();
    if parts.len() >= 2 {
        let city = parts[0];
        for part in &parts[1..] {
            if part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase()) {
                return format!("{}, {}", city, part);
            }
            if let Some(abbrev) = state_abbreviation(part) {
                return format!("{}, {}", city, abbrev);
            }
        }
    }

    if location.chars().count() > MAX_LOCATION_LEN {
        location.chars().take(MAX_LOCATION_LEN).collect()
    } else {
        location.to_string()
    }
}
