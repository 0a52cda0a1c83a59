//! Plain-text and JSON rendering of a [`DryingReport`].
//!
//! Scores are printed as raw ordinals. They are not on a fixed scale.

use crate::app::DryingReport;
use crate::config::{ReportConfig, ReportFormat};
use chrono::NaiveDateTime;
use drycast_drying::{CloudScheme, DryingTier, ScoreResult, ScorerConfig};
use drycast_weather::Location;
use serde::Serialize;
use std::fmt::Write;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
struct JsonReport<'a> {
    location: &'a Location,
    heuristic: &'a ScorerConfig,
    scores: &'a [i32],
    hours: Vec<JsonHour>,
    best: &'a [ScoreResult],
    neutral: &'a [ScoreResult],
}

#[derive(Serialize)]
struct JsonHour {
    time: NaiveDateTime,
    score: i32,
    tier: DryingTier,
}

/// Render according to the configured format
pub fn render(report: &DryingReport, config: &ReportConfig) -> Result<String, serde_json::Error> {
    match config.format {
        ReportFormat::Text => Ok(render_text(report, config.show_all_hours)),
        ReportFormat::Json => render_json(report),
    }
}

pub fn render_text(report: &DryingReport, show_all_hours: bool) -> String {
    let mut out = String::new();
    let classification = &report.classification;

    let _ = writeln!(
        out,
        "Drying forecast for {} ({})",
        report.location.label(),
        heuristic_label(&report.scorer)
    );

    if show_all_hours {
        let _ = writeln!(out);
        for (i, result) in classification.results().enumerate() {
            let (rain_chance, precipitation) = report
                .series
                .sample(i)
                .map_or((0.0, 0.0), |s| (s.precipitation_probability, s.precipitation));
            let _ = writeln!(
                out,
                "{}  rain {:>3.0}%  {:>4.1}mm  score {:>3}  {}",
                result.time.format(TIME_FORMAT),
                rain_chance,
                precipitation,
                result.score,
                DryingTier::from_score(result.score).label()
            );
        }
    }

    write_hour_list(&mut out, "Best hours", &classification.best);
    write_hour_list(&mut out, "Neutral hours", &classification.neutral);

    out
}

pub fn render_json(report: &DryingReport) -> Result<String, serde_json::Error> {
    let classification = &report.classification;
    let hours = classification
        .results()
        .map(|r| JsonHour {
            time: r.time,
            score: r.score,
            tier: DryingTier::from_score(r.score),
        })
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        location: &report.location,
        heuristic: &report.scorer,
        scores: &classification.scores,
        hours,
        best: &classification.best,
        neutral: &classification.neutral,
    })
}

fn write_hour_list(out: &mut String, title: &str, hours: &[ScoreResult]) {
    let _ = writeln!(out, "\n{}:", title);
    if hours.is_empty() {
        let _ = writeln!(out, "  none");
        return;
    }
    for hour in hours {
        let _ = writeln!(out, "  {} (score {})", hour.time.format(TIME_FORMAT), hour.score);
    }
}

fn heuristic_label(config: &ScorerConfig) -> String {
    let clouds = match config.cloud_scheme {
        CloudScheme::Fine => "fine cloud bands",
        CloudScheme::Coarse => "coarse cloud bands",
    };
    if config.daylight_adjustment {
        format!("{}, day/night adjusted", clouds)
    } else {
        clouds.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drycast_drying::{classify, DryingScorer};
    use drycast_weather::{ForecastSeries, HourlySample};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap_or_default()
    }

    fn report() -> DryingReport {
        let hours = [
            // 11
            HourlySample {
                time: at(9),
                precipitation_probability: 10.0,
                relative_humidity: 55.0,
                temperature: 28.0,
                wind_speed: 10.0,
                cloud_cover: 15.0,
                ..HourlySample::default()
            },
            // rain override
            HourlySample {
                time: at(10),
                precipitation_probability: 70.0,
                precipitation: 0.1,
                ..HourlySample::default()
            },
        ];
        let series = ForecastSeries::from_samples(&hours);
        let scorer = DryingScorer::default();
        let classification = classify(&series, &scorer).unwrap();

        DryingReport {
            location: Location {
                latitude: 14.5995,
                longitude: 120.9842,
                name: Some("Manila".to_string()),
            },
            provider: "static".to_string(),
            scorer: *scorer.config(),
            series,
            classification,
        }
    }

    #[test]
    fn test_text_lists_every_hour() {
        let text = render_text(&report(), true);

        assert!(text.starts_with("Drying forecast for Manila (fine cloud bands)"));
        assert!(text.contains("2025-06-01 09:00  rain  10%   0.0mm  score  11  best"));
        assert!(text.contains("2025-06-01 10:00  rain  70%   0.1mm  score   0  poor"));
        assert!(text.contains("Best hours:\n  2025-06-01 09:00 (score 11)"));
        assert!(text.contains("Neutral hours:\n  none"));
    }

    #[test]
    fn test_text_summary_only() {
        let text = render_text(&report(), false);
        assert!(!text.contains("rain"));
        assert!(text.contains("Best hours:"));
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["scores"], serde_json::json!([11, 0]));
        assert_eq!(value["hours"][1]["tier"], "poor");
        assert_eq!(value["best"][0]["time"], "2025-06-01T09:00:00");
        assert_eq!(value["heuristic"]["cloud_scheme"], "fine");
        assert_eq!(value["neutral"], serde_json::json!([]));
    }

    #[test]
    fn test_render_follows_format() {
        let config = ReportConfig {
            format: ReportFormat::Json,
            show_all_hours: true,
        };
        let out = render(&report(), &config).unwrap();
        assert!(out.trim_start().starts_with('{'));
    }

    #[test]
    fn test_heuristic_label() {
        assert_eq!(
            heuristic_label(&ScorerConfig::daylight()),
            "fine cloud bands, day/night adjusted"
        );
        assert_eq!(heuristic_label(&ScorerConfig::classic()), "coarse cloud bands");
    }
}
