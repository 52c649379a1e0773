//! Advisory messages for weak criteria.

use crate::types::{Criterion, ScoreSet};

/// Scores below this trigger the criterion's advice.
pub const ADVICE_BELOW: u8 = 3;

/// Emitted alone when no criterion needs advice.
pub const ALL_GOOD: &str = "✅ Great image! Should work well as a stencil";

/// Fixed advice for a criterion that scored poorly.
#[must_use]
pub const fn advice(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Contrast => "🔧 Increase contrast - try adjusting levels in an image editor",
        Criterion::FloatingElements => {
            "🔗 Add bridges to connect floating elements or use a stencil font"
        }
        Criterion::LineThickness => "📏 Thicken thin lines - they may tear during weeding",
        Criterion::DetailComplexity => {
            "✂️ Simplify details - remove small elements that are hard to cut"
        }
        Criterion::ClosedPaths => "🔄 Ensure shapes are closed - open paths cause cutting issues",
        Criterion::Resolution => "📐 Use higher resolution image (at least 1000px width)",
    }
}

/// One message per criterion scoring below [`ADVICE_BELOW`], in
/// [`Criterion::ALL`] order, or [`ALL_GOOD`] when there are none.
#[must_use]
pub fn recommendations(scores: &ScoreSet) -> Vec<String> {
    let mut messages: Vec<String> = scores
        .iter()
        .filter(|&(_, score)| score < ADVICE_BELOW)
        .map(|(criterion, _)| advice(criterion).to_owned())
        .collect();
    if messages.is_empty() {
        messages.push(ALL_GOOD.to_owned());
    }
    messages
}
