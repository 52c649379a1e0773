//! Human-readable rendering of an [`AnalysisResult`].

use std::fmt::Write;

use crate::rating::{ScoreClass, rating_label, stars};
use crate::types::AnalysisResult;

impl AnalysisResult {
    /// Render a plain-text report: rating, per-criterion breakdown and
    /// recommendations.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Stencil rating: {} {}/5  {}",
            stars(self.rating),
            self.rating,
            rating_label(self.rating),
        );
        let _ = writeln!(
            out,
            "Total score: {}/{}",
            self.total_score, self.max_possible
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "{:<24} {:>5}  {}", "Criterion", "Score", "Class");
        let _ = writeln!(out, "{}", "-".repeat(40));
        for (criterion, score) in self.scores.iter() {
            let class = match ScoreClass::of(score) {
                ScoreClass::Good => "good",
                ScoreClass::Fair => "fair",
                ScoreClass::Poor => "poor",
            };
            let _ = writeln!(
                out,
                "{:<24} {:>3}/5  {class}",
                criterion.label(),
                score
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Recommendations:");
        for recommendation in &self.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::recommend::recommendations;
    use crate::types::{AnalysisResult, Criterion, ScoreSet};

    fn result(scores: ScoreSet, rating: u8) -> AnalysisResult {
        AnalysisResult {
            rating,
            scores,
            recommendations: recommendations(&scores),
            total_score: scores.total(),
            max_possible: 30,
        }
    }

    #[test]
    fn report_lists_every_criterion_in_order() {
        let report = result(ScoreSet::uniform(4), 4).report();
        let positions: Vec<usize> = Criterion::ALL
            .iter()
            .map(|c| report.find(c.label()).unwrap_or(usize::MAX))
            .collect();
        assert!(positions.iter().all(|&p| p != usize::MAX), "{report}");
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn report_includes_rating_and_totals() {
        let report = result(ScoreSet::uniform(5), 5).report();
        assert!(report.contains("★★★★★ 5/5"));
        assert!(report.contains("Excellent for stencils!"));
        assert!(report.contains("Total score: 30/30"));
    }

    #[test]
    fn report_includes_recommendations() {
        let scores = ScoreSet {
            resolution: 1,
            ..ScoreSet::uniform(4)
        };
        let report = result(scores, 4).report();
        assert!(report.contains("Use higher resolution image"));
        assert!(report.contains("poor"));
    }
}
