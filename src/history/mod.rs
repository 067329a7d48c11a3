//! Synthetic usage history for the reporting charts
//!
//! The series are illustrative samples, not derived from appliance state.
//! Every call draws a fresh sample from the generator's own seeded RNG.

use crate::core::{PeakInfo, Period, Series, SeriesPoint};
use crate::i18n::I18n;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Hours in the synthetic daily load profile
pub const HOURS_PER_DAY: usize = 24;

const WEEK_USAGE_KWH: Range<f64> = 15.0..45.0;
const WEEK_COST: Range<f64> = 100.0..300.0;
const MONTH_USAGE_KWH: Range<f64> = 20.0..55.0;
const MONTH_COST: Range<f64> = 120.0..370.0;
const HOURLY_KWH: Range<f64> = 0.5..3.5;

const WEEKDAY_KEYS: [&str; 7] = [
    "weekday.mon",
    "weekday.tue",
    "weekday.wed",
    "weekday.thu",
    "weekday.fri",
    "weekday.sat",
    "weekday.sun",
];

/// Random source for history series and the hourly profile
pub struct SeriesGenerator {
    rng: StdRng,
}

impl SeriesGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh series of points for the period
    pub fn generate(&mut self, period: Period) -> Vec<SeriesPoint> {
        let (usage, cost) = match period {
            Period::Week => (WEEK_USAGE_KWH, WEEK_COST),
            Period::Month => (MONTH_USAGE_KWH, MONTH_COST),
        };

        (0..period.point_count())
            .map(|_| SeriesPoint {
                usage_kwh: self.rng.random_range(usage.clone()),
                cost: self.rng.random_range(cost.clone()),
            })
            .collect()
    }

    /// Draw a fresh series together with its category labels
    pub fn generate_series(&mut self, period: Period, i18n: &I18n) -> Series {
        Series {
            period,
            labels: category_labels(period, i18n),
            points: self.generate(period),
        }
    }

    /// Draw a 24-point hourly load profile in kWh
    pub fn hourly_profile(&mut self) -> Vec<f64> {
        (0..HOURS_PER_DAY)
            .map(|_| self.rng.random_range(HOURLY_KWH))
            .collect()
    }
}

/// Category labels matching the points of a period: weekday names for a
/// week, day numbers 1 to 30 for a month
pub fn category_labels(period: Period, i18n: &I18n) -> Vec<String> {
    match period {
        Period::Week => WEEKDAY_KEYS.iter().map(|key| i18n.get(key)).collect(),
        Period::Month => (1..=period.point_count())
            .map(|day| i18n.format("series.day", &[("day", day.to_string())]))
            .collect(),
    }
}

impl PeakInfo {
    /// Locate the hour with the highest load; the earliest hour wins a tie.
    /// Returns `None` for an empty profile.
    pub fn from_hourly(hourly_kwh: Vec<f64>) -> Option<Self> {
        let (hour, consumption_kwh) = hourly_kwh
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (hour, kwh)| match best {
                Some((_, max)) if kwh <= max => best,
                _ => Some((hour, kwh)),
            })?;

        Some(Self {
            hour: hour as u32,
            consumption_kwh,
            hourly_kwh,
        })
    }

    /// Localized "HH:00 - HH+1:00" label for the peak hour
    pub fn hour_range_label(&self, i18n: &I18n) -> String {
        i18n.format(
            "peak.hour_range",
            &[
                ("start", self.hour.to_string()),
                ("end", (self.hour + 1).to_string()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_series_shape_and_ranges() {
        let mut generator = SeriesGenerator::new(1);
        for _ in 0..50 {
            let points = generator.generate(Period::Week);
            assert_eq!(points.len(), 7);
            for p in &points {
                assert!((15.0..45.0).contains(&p.usage_kwh));
                assert!((100.0..300.0).contains(&p.cost));
            }
        }
    }

    #[test]
    fn test_month_series_shape_and_ranges() {
        let mut generator = SeriesGenerator::new(2);
        for _ in 0..50 {
            let points = generator.generate(Period::Month);
            assert_eq!(points.len(), 30);
            for p in &points {
                assert!((20.0..55.0).contains(&p.usage_kwh));
                assert!((120.0..370.0).contains(&p.cost));
            }
        }
    }

    #[test]
    fn test_every_call_draws_a_fresh_sample() {
        let mut generator = SeriesGenerator::new(3);
        let first = generator.generate(Period::Week);
        let second = generator.generate(Period::Week);
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_seed_same_series() {
        let mut a = SeriesGenerator::new(42);
        let mut b = SeriesGenerator::new(42);
        assert_eq!(a.generate(Period::Month), b.generate(Period::Month));
    }

    #[test]
    fn test_labels_match_points() {
        let i18n = I18n::new("en");
        let mut generator = SeriesGenerator::new(4);

        let week = generator.generate_series(Period::Week, &i18n);
        assert_eq!(week.labels.len(), week.points.len());
        assert_eq!(week.labels[0], "Mon");
        assert_eq!(week.labels[6], "Sun");

        let month = generator.generate_series(Period::Month, &i18n);
        assert_eq!(month.labels.len(), 30);
        assert_eq!(month.labels[0], "Day 1");
        assert_eq!(month.labels[29], "Day 30");
    }

    #[test]
    fn test_hourly_profile_and_peak() {
        let mut generator = SeriesGenerator::new(5);
        let hourly = generator.hourly_profile();
        assert_eq!(hourly.len(), HOURS_PER_DAY);
        assert!(hourly.iter().all(|kwh| (0.5..3.5).contains(kwh)));

        let max = hourly.iter().copied().fold(f64::MIN, f64::max);
        let peak = PeakInfo::from_hourly(hourly).unwrap();
        assert_eq!(peak.consumption_kwh, max);
        assert_eq!(peak.hourly_kwh[peak.hour as usize], max);
    }

    #[test]
    fn test_peak_prefers_earliest_hour() {
        let peak = PeakInfo::from_hourly(vec![1.0, 3.0, 2.0, 3.0]).unwrap();
        assert_eq!(peak.hour, 1);
        assert_eq!(peak.consumption_kwh, 3.0);
        assert!(PeakInfo::from_hourly(Vec::new()).is_none());
    }

    #[test]
    fn test_peak_label() {
        let peak = PeakInfo::from_hourly(vec![0.5, 0.7, 3.1]).unwrap();
        assert_eq!(peak.hour_range_label(&I18n::new("en")), "2:00 - 3:00");
    }
}
