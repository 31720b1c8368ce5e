//! Name similarity backed by `strsim`.

use loottable_engine::Scorer;

/// Weight applied to the best substring alignment, so that a name contained
/// in a longer one ranks below an exact match.
const PARTIAL_WEIGHT: f64 = 0.9;

/// Case-insensitive Levenshtein similarity with partial matching.
///
/// The score is the better of the whole-string similarity and the best
/// alignment of the shorter string against any same-length window of the
/// longer one, the latter scaled by 0.9. `goblin` scores 100 against itself
/// and 90 against `hobgoblin`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrsimScorer;

impl Scorer for StrsimScorer {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        let query = query.to_lowercase();
        let candidate = candidate.to_lowercase();
        if query.is_empty() || candidate.is_empty() {
            return if query == candidate { 100 } else { 0 };
        }

        let full = strsim::normalized_levenshtein(&query, &candidate);
        let partial = best_window(&query, &candidate) * PARTIAL_WEIGHT;
        percent(full.max(partial))
    }
}

/// Best normalized similarity of the shorter string against every window of
/// the longer one.
fn best_window(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let long: Vec<char> = long.chars().collect();
    let width = short.chars().count();

    long.windows(width)
        .map(|window| {
            let window: String = window.iter().collect();
            strsim::normalized_levenshtein(short, &window)
        })
        .fold(0.0, f64::max)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}
