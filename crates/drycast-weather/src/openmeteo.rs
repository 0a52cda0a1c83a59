//! Decoding of Open-Meteo `/v1/forecast` responses into a [`ForecastSeries`].
//!
//! Only the hourly block is read. Times are either local ISO strings (the
//! default `timeformat=iso8601`, already shifted to the requested timezone) or
//! unix seconds (`timeformat=unixtime`, UTC), in which case the response's
//! `utc_offset_seconds` is added to get local wall-clock time.
//!
//! `hourly.time` may also be the compact axis the binary SDK exposes,
//! `{"start": .., "end": .., "interval": ..}` in unix seconds, which is
//! expanded through [`TimeAxis`].

use crate::types::{ForecastField, ForecastSeries, WeatherError};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

const ISO_MINUTES: &str = "%Y-%m-%dT%H:%M";
const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Longest axis a compact time range may expand to
const MAX_AXIS_STEPS: i64 = 100_000;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    #[serde(default)]
    timezone: Option<String>,
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: TimeColumn,
    #[serde(default)]
    precipitation_probability: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation: Option<Vec<Option<f64>>>,
    #[serde(default)]
    relative_humidity_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    temperature_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    wind_speed_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    cloud_cover: Option<Vec<Option<f64>>>,
    #[serde(default)]
    is_day: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeColumn {
    List(Vec<TimeValue>),
    Range { start: i64, end: i64, interval: i64 },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Unix(i64),
    Text(String),
}

/// Compact time axis encoding: `[start, end)` stepped by `interval` seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    pub start: i64,
    pub end: i64,
    pub interval: i64,
    pub utc_offset_seconds: i64,
}

impl TimeAxis {
    pub fn from_range(start: i64, end: i64, interval: i64, utc_offset_seconds: i64) -> Self {
        Self {
            start,
            end,
            interval,
            utc_offset_seconds,
        }
    }

    /// Expands the axis into local timestamps.
    ///
    /// # Errors
    ///
    /// Fails on a non-positive interval, an axis longer than `MAX_AXIS_STEPS`
    /// or a timestamp that overflows or that chrono cannot represent.
    pub fn times(&self) -> Result<Vec<NaiveDateTime>, WeatherError> {
        if self.interval <= 0 {
            return Err(WeatherError::Parse(format!(
                "time axis interval must be positive, got {}",
                self.interval
            )));
        }

        let span = self.end.checked_sub(self.start).ok_or_else(|| {
            WeatherError::Parse(format!(
                "timestamp out of range: time axis {}..{}",
                self.start, self.end
            ))
        })?;
        let count = (span / self.interval).max(0);
        if count > MAX_AXIS_STEPS {
            return Err(WeatherError::Parse(format!(
                "time axis has {} steps, limit is {}",
                count, MAX_AXIS_STEPS
            )));
        }

        (0..count)
            .map(|i| {
                let secs = i
                    .checked_mul(self.interval)
                    .and_then(|step| self.start.checked_add(step))
                    .ok_or_else(|| {
                        WeatherError::Parse(format!(
                            "timestamp out of range: step {} of axis starting at {}",
                            i, self.start
                        ))
                    })?;
                unix_to_local(secs, self.utc_offset_seconds)
            })
            .collect()
    }
}

/// Parses an Open-Meteo forecast response.
///
/// Columns are taken as-is: their lengths are not checked against the time
/// axis here, the classifier rejects a misaligned series.
///
/// # Errors
///
/// Returns `WeatherError::Parse` for malformed JSON or out-of-range timestamps and
/// `WeatherError::NoData` when the response has no hourly block.
pub fn parse_response(json: &str) -> Result<ForecastSeries, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(json)?;

    let hourly = response
        .hourly
        .ok_or_else(|| WeatherError::NoData("No hourly data available".to_string()))?;

    let time = match &hourly.time {
        TimeColumn::List(values) => values
            .iter()
            .map(|t| parse_time(t, response.utc_offset_seconds))
            .collect::<Result<Vec<_>, _>>()?,
        TimeColumn::Range {
            start,
            end,
            interval,
        } => TimeAxis::from_range(*start, *end, *interval, response.utc_offset_seconds).times()?,
    };

    let mut series = ForecastSeries::new(time);
    let columns = [
        (ForecastField::PrecipitationProbability, hourly.precipitation_probability),
        (ForecastField::Precipitation, hourly.precipitation),
        (ForecastField::RelativeHumidity, hourly.relative_humidity_2m),
        (ForecastField::Temperature, hourly.temperature_2m),
        (ForecastField::WindSpeed, hourly.wind_speed_10m),
        (ForecastField::CloudCover, hourly.cloud_cover),
        (ForecastField::IsDay, hourly.is_day),
    ];
    for (field, values) in columns {
        match values {
            Some(values) => series.set_column(field, values),
            None => tracing::debug!("Forecast response has no {} column", field),
        }
    }

    tracing::debug!(
        "Decoded {} forecast hours (timezone {})",
        series.len(),
        response.timezone.as_deref().unwrap_or("unknown")
    );

    Ok(series)
}

fn parse_time(value: &TimeValue, utc_offset_seconds: i64) -> Result<NaiveDateTime, WeatherError> {
    match value {
        TimeValue::Unix(secs) => unix_to_local(*secs, utc_offset_seconds),
        TimeValue::Text(text) => NaiveDateTime::parse_from_str(text, ISO_MINUTES)
            .or_else(|_| NaiveDateTime::parse_from_str(text, ISO_SECONDS))
            .map_err(|e| WeatherError::Parse(format!("invalid time '{}': {}", text, e))),
    }
}

fn unix_to_local(secs: i64, utc_offset_seconds: i64) -> Result<NaiveDateTime, WeatherError> {
    secs.checked_add(utc_offset_seconds)
        .and_then(|local| DateTime::from_timestamp(local, 0))
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            WeatherError::Parse(format!(
                "timestamp out of range: {} with offset {}",
                secs, utc_offset_seconds
            ))
        })
}
