//! Generate human-readable explanations from fired signals.

use super::MatchSignal;

/// Generate a short explanation from the signals that fired for a candidate.
///
/// The fallback signal carries no intent and is skipped; a candidate with
/// nothing else gets a generic line.
#[must_use]
pub fn generate_explanation(signals: &[MatchSignal]) -> String {
    let mut parts = Vec::new();

    for signal in signals {
        let part = match signal {
            MatchSignal::PriceFit {
                preference,
                restaurant,
            } => {
                if preference == restaurant {
                    "Fits your budget".to_string()
                } else {
                    "Close to your budget".to_string()
                }
            }
            MatchSignal::Vibe { label } => format!("Matches the {label} vibe"),
            MatchSignal::Cuisine { key } => format!("Serves {key}"),
            MatchSignal::Area { label } => format!("Located near {label}"),
            MatchSignal::DescriptionOverlap { terms } => {
                format!("Mentions {}", terms.join(", "))
            }
            MatchSignal::Fallback { .. } => continue,
        };
        parts.push(part);
    }

    if parts.is_empty() {
        "General match".to_string()
    } else {
        parts.join("; ")
    }
}
