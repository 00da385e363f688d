//! WMO weather interpretation codes as reported by Open-Meteo.

use std::{collections::HashMap, sync::LazyLock};

pub const UNKNOWN: &str = "Unknown";

const TABLE: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

static WEATHER_CODES: LazyLock<HashMap<i64, &'static str>> =
    LazyLock::new(|| TABLE.iter().copied().collect());

/// Human-readable description of `code`, or [`UNKNOWN`].
pub fn describe(code: i64) -> &'static str {
    WEATHER_CODES.get(&code).copied().unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: [(i64, &str); 28] = [
        (0, "Clear sky"),
        (1, "Mainly clear"),
        (2, "Partly cloudy"),
        (3, "Overcast"),
        (45, "Foggy"),
        (48, "Depositing rime fog"),
        (51, "Light drizzle"),
        (53, "Moderate drizzle"),
        (55, "Dense drizzle"),
        (56, "Light freezing drizzle"),
        (57, "Dense freezing drizzle"),
        (61, "Slight rain"),
        (63, "Moderate rain"),
        (65, "Heavy rain"),
        (66, "Light freezing rain"),
        (67, "Heavy freezing rain"),
        (71, "Slight snow fall"),
        (73, "Moderate snow fall"),
        (75, "Heavy snow fall"),
        (77, "Snow grains"),
        (80, "Slight rain showers"),
        (81, "Moderate rain showers"),
        (82, "Violent rain showers"),
        (85, "Slight snow showers"),
        (86, "Heavy snow showers"),
        (95, "Thunderstorm"),
        (96, "Thunderstorm with slight hail"),
        (99, "Thunderstorm with heavy hail"),
    ];

    #[test]
    fn every_code_has_its_documented_description() {
        for (code, description) in EXPECTED {
            assert_eq!(describe(code), description, "code {code}");
        }
    }

    #[test]
    fn table_holds_exactly_the_documented_codes() {
        assert_eq!(TABLE.len(), EXPECTED.len());
        assert_eq!(WEATHER_CODES.len(), EXPECTED.len());
        assert_eq!(TABLE, EXPECTED.as_slice());
    }

    #[test]
    fn codes_outside_the_table_are_unknown() {
        for code in (-5..=120).filter(|c| !EXPECTED.iter().any(|(known, _)| known == c)) {
            assert_eq!(describe(code), UNKNOWN, "code {code}");
        }
        assert_eq!(describe(i64::MAX), UNKNOWN);
    }
}
