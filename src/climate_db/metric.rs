use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// The climate variables recorded in the archive.
///
/// Each metric is one value column in the `weather_data` table, paired with a
/// quality-flag column. The humidity and cloud-cover variables are observed at
/// the eight three-hourly marks of the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Precipitation,
    Evaporation,
    MaxTemp,
    MinTemp,
    Sunshine,
    Humid00,
    Humid03,
    Humid06,
    Humid09,
    Humid12,
    Humid15,
    Humid18,
    Humid21,
    Okta00,
    Okta03,
    Okta06,
    Okta09,
    Okta12,
    Okta15,
    Okta18,
    Okta21,
}

impl Metric {
    pub const NUM_VARIANTS: usize = 21;

    /// The request code for this metric, which is also its value column in
    /// `weather_data`.
    pub fn code(self) -> &'static str {
        use Metric::*;

        match self {
            Precipitation => "precipitation",
            Evaporation => "evaporation",
            MaxTemp => "maxtemp",
            MinTemp => "mintemp",
            Sunshine => "sunshine",
            Humid00 => "humid00",
            Humid03 => "humid03",
            Humid06 => "humid06",
            Humid09 => "humid09",
            Humid12 => "humid12",
            Humid15 => "humid15",
            Humid18 => "humid18",
            Humid21 => "humid21",
            Okta00 => "okta00",
            Okta03 => "okta03",
            Okta06 => "okta06",
            Okta09 => "okta09",
            Okta12 => "okta12",
            Okta15 => "okta15",
            Okta18 => "okta18",
            Okta21 => "okta21",
        }
    }

    pub(crate) fn quality_column(self) -> &'static str {
        use Metric::*;

        match self {
            Precipitation => "PrecipQual",
            Evaporation => "EvapQual",
            MaxTemp => "MaxTempQual",
            MinTemp => "MinTempQual",
            Sunshine => "SunshineQual",
            Humid00 => "Humid00Qual",
            Humid03 => "Humid03Qual",
            Humid06 => "Humid06Qual",
            Humid09 => "Humid09Qual",
            Humid12 => "Humid12Qual",
            Humid15 => "Humid15Qual",
            Humid18 => "Humid18Qual",
            Humid21 => "Humid21Qual",
            Okta00 => "Okta00Qual",
            Okta03 => "Okta03Qual",
            Okta06 => "Okta06Qual",
            Okta09 => "Okta09Qual",
            Okta12 => "Okta12Qual",
            Okta15 => "Okta15Qual",
            Okta18 => "Okta18Qual",
            Okta21 => "Okta21Qual",
        }
    }

    /// Human readable name with units.
    pub fn display_name(self) -> &'static str {
        use Metric::*;

        match self {
            Precipitation => "Precipitation (mm)",
            Evaporation => "Evaporation (mm)",
            MaxTemp => "Maximum Temperature (°C)",
            MinTemp => "Minimum Temperature (°C)",
            Sunshine => "Sunshine (hours)",
            Humid00 => "Humidity 12AM (%)",
            Humid03 => "Humidity 3AM (%)",
            Humid06 => "Humidity 6AM (%)",
            Humid09 => "Humidity 9AM (%)",
            Humid12 => "Humidity 12PM (%)",
            Humid15 => "Humidity 3PM (%)",
            Humid18 => "Humidity 6PM (%)",
            Humid21 => "Humidity 9PM (%)",
            Okta00 => "Cloud Cover 12AM (oktas)",
            Okta03 => "Cloud Cover 3AM (oktas)",
            Okta06 => "Cloud Cover 6AM (oktas)",
            Okta09 => "Cloud Cover 9AM (oktas)",
            Okta12 => "Cloud Cover 12PM (oktas)",
            Okta15 => "Cloud Cover 3PM (oktas)",
            Okta18 => "Cloud Cover 6PM (oktas)",
            Okta21 => "Cloud Cover 9PM (oktas)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_round_trip_through_from_str() {
        for metric in Metric::iter() {
            assert_eq!(Metric::from_str(metric.code()), Ok(metric));
        }
    }

    #[test]
    fn every_recorded_variable_is_covered() {
        assert_eq!(Metric::iter().count(), Metric::NUM_VARIANTS);
        assert_eq!(Metric::NUM_VARIANTS, 21);
    }

    #[test]
    fn display_matches_the_request_code() {
        for metric in Metric::iter() {
            assert_eq!(metric.to_string(), metric.code());
        }
    }
}
