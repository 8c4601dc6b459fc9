//! Result and comparison presentation
//!
//! Formats route statistics into fixed-precision strings and tracks panel
//! visibility. Formatting never depends on locale.

use crate::core::model::{ComparisonResult, RouteResult};

/// View model of the eco route statistics panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsView {
    pub distance: String,
    pub duration: String,
    pub co2_emissions: String,
    pub eco_score: Option<String>,
    pub visible: bool,
}

/// View model of the eco vs normal comparison panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonView {
    pub co2_saved: String,
    pub time_difference: String,
    /// Eco route costs extra time
    pub penalty: bool,
    pub visible: bool,
}

pub fn format_distance_km(km: f64) -> String {
    format!("{km:.1} km")
}

pub fn format_minutes(minutes: f64) -> String {
    format!("{} min", round_whole(minutes))
}

pub fn format_kg(kg: f64) -> String {
    format!("{kg:.2} kg")
}

/// Signed label for a time difference and whether it is a penalty
pub fn format_time_difference(minutes: f64) -> (String, bool) {
    if minutes > 0.0 {
        (format!("+{} min", round_whole(minutes)), true)
    } else {
        (format_minutes(minutes), false)
    }
}

// `{:.0}` renders -0.4 as "-0"
fn round_whole(value: f64) -> String {
    let rounded = format!("{value:.0}");
    if rounded == "-0" {
        "0".to_string()
    } else {
        rounded
    }
}

#[derive(Debug, Default)]
pub struct ResultPresenter {
    results: ResultsView,
    comparison: ComparisonView,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the eco route statistics
    pub fn render(&mut self, eco: &RouteResult) {
        self.results = ResultsView {
            distance: format_distance_km(eco.distance_km),
            duration: format_minutes(eco.duration_minutes),
            co2_emissions: format_kg(eco.co2_emissions_kg),
            eco_score: eco.eco_score.map(|s| format!("{s}/100")),
            visible: true,
        };
    }

    /// Show CO2 savings and the signed time difference
    pub fn render_comparison(&mut self, comparison: &ComparisonResult) {
        let (time_difference, penalty) = format_time_difference(comparison.time_difference_minutes);
        self.comparison = ComparisonView {
            co2_saved: format_kg(comparison.co2_savings_kg),
            time_difference,
            penalty,
            visible: true,
        };
    }

    /// Hide both panels, keeping their last content
    pub fn hide(&mut self) {
        self.results.visible = false;
        self.comparison.visible = false;
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn comparison(&self) -> &ComparisonView {
        &self.comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_precision_statistics() {
        let mut presenter = ResultPresenter::new();
        presenter.render(&RouteResult {
            geometry: vec![],
            distance_km: 12.34,
            duration_minutes: 27.6,
            co2_emissions_kg: 1.237,
            eco_score: None,
        });

        let view = presenter.results();
        assert_eq!(view.distance, "12.3 km");
        assert_eq!(view.duration, "28 min");
        assert_eq!(view.co2_emissions, "1.24 kg");
        assert_eq!(view.eco_score, None);
        assert!(view.visible);
    }

    #[test]
    fn test_eco_score_shown_when_present() {
        let mut presenter = ResultPresenter::new();
        presenter.render(&RouteResult {
            geometry: vec![],
            distance_km: 1.0,
            duration_minutes: 1.0,
            co2_emissions_kg: 0.15,
            eco_score: Some(98),
        });
        assert_eq!(presenter.results().eco_score.as_deref(), Some("98/100"));
    }

    #[test]
    fn test_time_difference_labels() {
        assert_eq!(format_time_difference(5.0), ("+5 min".to_string(), true));
        assert_eq!(format_time_difference(-3.0), ("-3 min".to_string(), false));
        assert_eq!(format_time_difference(0.0), ("0 min".to_string(), false));
        assert_eq!(format_time_difference(-0.4), ("0 min".to_string(), false));
    }

    #[test]
    fn test_comparison_panel() {
        let mut presenter = ResultPresenter::new();
        presenter.render_comparison(&ComparisonResult {
            co2_savings_kg: 0.6634,
            time_difference_minutes: 5.0,
        });

        let view = presenter.comparison();
        assert_eq!(view.co2_saved, "0.66 kg");
        assert_eq!(view.time_difference, "+5 min");
        assert!(view.penalty);
        assert!(view.visible);

        presenter.hide();
        assert!(!presenter.comparison().visible);
        assert!(!presenter.results().visible);
    }
}
