use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic location a forecast is requested for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }

    /// Label for display: the name if known, otherwise the coordinates
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One column of an hourly forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastField {
    PrecipitationProbability,
    Precipitation,
    RelativeHumidity,
    Temperature,
    WindSpeed,
    CloudCover,
    IsDay,
}

impl ForecastField {
    pub const ALL: [ForecastField; 7] = [
        Self::PrecipitationProbability,
        Self::Precipitation,
        Self::RelativeHumidity,
        Self::Temperature,
        Self::WindSpeed,
        Self::CloudCover,
        Self::IsDay,
    ];

    /// Hourly variable name used by the Open-Meteo forecast API
    /// See: https://open-meteo.com/en/docs#hourly-parameter-definition
    pub fn key(&self) -> &'static str {
        match self {
            Self::PrecipitationProbability => "precipitation_probability",
            Self::Precipitation => "precipitation",
            Self::RelativeHumidity => "relative_humidity_2m",
            Self::Temperature => "temperature_2m",
            Self::WindSpeed => "wind_speed_10m",
            Self::CloudCover => "cloud_cover",
            Self::IsDay => "is_day",
        }
    }
}

impl fmt::Display for ForecastField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single hour of forecast, with nulls already mapped to zero
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    /// Percent, 0-100
    pub precipitation_probability: f64,
    /// Millimeters
    pub precipitation: f64,
    /// Percent, 0-100
    pub relative_humidity: f64,
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// Percent, 0-100
    pub cloud_cover: f64,
    pub is_day: bool,
}

impl HourlySample {
    /// A sample at `time` with every reading at zero
    pub fn at(time: NaiveDateTime) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    fn value(&self, field: ForecastField) -> f64 {
        match field {
            ForecastField::PrecipitationProbability => self.precipitation_probability,
            ForecastField::Precipitation => self.precipitation,
            ForecastField::RelativeHumidity => self.relative_humidity,
            ForecastField::Temperature => self.temperature,
            ForecastField::WindSpeed => self.wind_speed,
            ForecastField::CloudCover => self.cloud_cover,
            ForecastField::IsDay => {
                if self.is_day {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Hourly forecast stored as parallel columns over a time axis.
///
/// A column that is `None` was not requested from the feed. Both an absent
/// column and a `null` entry read as `0.0`. Every present column must be as
/// long as `time`; see [`ForecastSeries::check_shape`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub time: Vec<NaiveDateTime>,
    pub precipitation_probability: Option<Vec<Option<f64>>>,
    pub precipitation: Option<Vec<Option<f64>>>,
    pub relative_humidity: Option<Vec<Option<f64>>>,
    pub temperature: Option<Vec<Option<f64>>>,
    pub wind_speed: Option<Vec<Option<f64>>>,
    pub cloud_cover: Option<Vec<Option<f64>>>,
    pub is_day: Option<Vec<Option<f64>>>,
}

impl ForecastSeries {
    /// Creates a series over `time` with no columns
    pub fn new(time: Vec<NaiveDateTime>) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Builds a series with every column present from already-shaped samples
    pub fn from_samples(samples: &[HourlySample]) -> Self {
        let mut series = Self::new(samples.iter().map(|s| s.time).collect());
        for field in ForecastField::ALL {
            let values = samples.iter().map(|s| Some(s.value(field))).collect();
            *series.column_mut(field) = Some(values);
        }
        series
    }

    pub fn with_column(mut self, field: ForecastField, values: Vec<Option<f64>>) -> Self {
        self.set_column(field, values);
        self
    }

    pub fn set_column(&mut self, field: ForecastField, values: Vec<Option<f64>>) {
        *self.column_mut(field) = Some(values);
    }

    pub fn column(&self, field: ForecastField) -> Option<&[Option<f64>]> {
        let column = match field {
            ForecastField::PrecipitationProbability => &self.precipitation_probability,
            ForecastField::Precipitation => &self.precipitation,
            ForecastField::RelativeHumidity => &self.relative_humidity,
            ForecastField::Temperature => &self.temperature,
            ForecastField::WindSpeed => &self.wind_speed,
            ForecastField::CloudCover => &self.cloud_cover,
            ForecastField::IsDay => &self.is_day,
        };
        column.as_deref()
    }

    fn column_mut(&mut self, field: ForecastField) -> &mut Option<Vec<Option<f64>>> {
        match field {
            ForecastField::PrecipitationProbability => &mut self.precipitation_probability,
            ForecastField::Precipitation => &mut self.precipitation,
            ForecastField::RelativeHumidity => &mut self.relative_humidity,
            ForecastField::Temperature => &mut self.temperature,
            ForecastField::WindSpeed => &mut self.wind_speed,
            ForecastField::CloudCover => &mut self.cloud_cover,
            ForecastField::IsDay => &mut self.is_day,
        }
    }

    /// Number of hours on the time axis
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Verifies that every present column is aligned with the time axis.
    ///
    /// # Errors
    ///
    /// Returns the first misaligned column, in [`ForecastField::ALL`] order.
    pub fn check_shape(&self) -> Result<(), InputShapeError> {
        let expected = self.time.len();
        for field in ForecastField::ALL {
            if let Some(values) = self.column(field) {
                if values.len() != expected {
                    return Err(InputShapeError {
                        field,
                        expected,
                        actual: values.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Reads one value; nulls, absent columns and out-of-range indices read as zero
    pub fn value(&self, field: ForecastField, index: usize) -> f64 {
        self.column(field)
            .and_then(|values| values.get(index).copied().flatten())
            .unwrap_or(0.0)
    }

    /// The sample for hour `index`, or `None` past the end of the time axis
    pub fn sample(&self, index: usize) -> Option<HourlySample> {
        let time = *self.time.get(index)?;
        Some(HourlySample {
            time,
            precipitation_probability: self.value(ForecastField::PrecipitationProbability, index),
            precipitation: self.value(ForecastField::Precipitation, index),
            relative_humidity: self.value(ForecastField::RelativeHumidity, index),
            temperature: self.value(ForecastField::Temperature, index),
            wind_speed: self.value(ForecastField::WindSpeed, index),
            cloud_cover: self.value(ForecastField::CloudCover, index),
            is_day: self.value(ForecastField::IsDay, index) == 1.0,
        })
    }

    /// Iterates the samples in time order. Each call starts from the first hour.
    pub fn samples(&self) -> impl Iterator<Item = HourlySample> + '_ {
        (0..self.time.len()).filter_map(move |i| self.sample(i))
    }
}

/// A forecast column does not line up with the time axis
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column {field} has {actual} values but the time axis has {expected}")]
pub struct InputShapeError {
    pub field: ForecastField,
    pub expected: usize,
    pub actual: usize,
}

/// Forecast provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Location error: {0}")]
    Location(String),
    #[error("No forecast data: {0}")]
    NoData(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hour(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap_or_default()
    }

    #[test]
    fn test_null_reads_as_zero() {
        let series = ForecastSeries::new(vec![hour(0), hour(1)])
            .with_column(ForecastField::Temperature, vec![Some(21.5), None]);

        assert_eq!(series.value(ForecastField::Temperature, 0), 21.5);
        assert_eq!(series.value(ForecastField::Temperature, 1), 0.0);
    }

    #[test]
    fn test_absent_column_reads_as_zero() {
        let series = ForecastSeries::new(vec![hour(0)]);
        let sample = series.sample(0).unwrap();

        assert_eq!(sample, HourlySample::at(hour(0)));
        assert!(!sample.is_day);
    }

    #[test]
    fn test_is_day_requires_exactly_one() {
        let series = ForecastSeries::new(vec![hour(0), hour(1), hour(2)])
            .with_column(ForecastField::IsDay, vec![Some(1.0), Some(0.0), Some(0.5)]);
        let days: Vec<bool> = series.samples().map(|s| s.is_day).collect();
        assert_eq!(days, vec![true, false, false]);
    }

    #[test]
    fn test_sample_past_end_is_none() {
        let series = ForecastSeries::new(vec![hour(0)]);
        assert!(series.sample(1).is_none());
    }

    #[test]
    fn test_samples_restart() {
        let series = ForecastSeries::new(vec![hour(0), hour(1), hour(2)]);
        assert_eq!(series.samples().count(), 3);
        assert_eq!(series.samples().count(), 3);
        assert_eq!(series.samples().next().map(|s| s.time), Some(hour(0)));
    }

    #[test]
    fn test_check_shape_accepts_aligned_and_absent_columns() {
        let series = ForecastSeries::new(vec![hour(0), hour(1)])
            .with_column(ForecastField::CloudCover, vec![Some(10.0), None]);
        assert!(series.check_shape().is_ok());
    }

    #[test]
    fn test_check_shape_reports_short_column() {
        let series = ForecastSeries::new(vec![hour(0), hour(1), hour(2)])
            .with_column(ForecastField::WindSpeed, vec![Some(10.0)]);

        let err = series.check_shape().unwrap_err();
        assert_eq!(err.field, ForecastField::WindSpeed);
        assert_eq!(err.expected, 3);
        assert_eq!(err.actual, 1);
        assert!(err.to_string().contains("wind_speed_10m"));
    }

    #[test]
    fn test_from_samples_keeps_readings() {
        let sample = HourlySample {
            time: hour(9),
            precipitation_probability: 10.0,
            precipitation: 0.0,
            relative_humidity: 55.0,
            temperature: 28.0,
            wind_speed: 10.0,
            cloud_cover: 15.0,
            is_day: true,
        };
        let series = ForecastSeries::from_samples(&[sample]);

        assert!(series.check_shape().is_ok());
        assert_eq!(series.sample(0), Some(sample));
    }

    #[test]
    fn test_location_label() {
        let mut loc = Location::new(14.5995, 120.9842);
        assert_eq!(loc.label(), "14.60, 120.98");
        loc.name = Some("Manila".to_string());
        assert_eq!(loc.label(), "Manila");
    }

    #[test]
    fn test_location_range() {
        assert!(Location::new(90.0, -180.0).is_valid());
        assert!(!Location::new(91.0, 0.0).is_valid());
        assert!(!Location::new(0.0, 180.5).is_valid());
    }
}
