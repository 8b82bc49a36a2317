//! Keyword-based publishability scoring.

/// Phrases that mark a site as open to contributed or paid content, in
/// reporting order.
pub const SIGNAL_KEYWORDS: [&str; 9] = [
    "write for us",
    "guest post",
    "contribute",
    "submit article",
    "editorial guidelines",
    "sponsored post",
    "advertise",
    "press@",
    "editor@",
];

/// Upper bound of the score scale.
pub const MAX_SCORE: f64 = 100.0;

const GUEST_POST_BONUS: f64 = 40.0;
const SUBMISSION_BONUS: f64 = 20.0;
const SPONSORSHIP_BONUS: f64 = 10.0;
const PER_SIGNAL_BONUS: f64 = 5.0;
const SIGNAL_BONUS_CAP: f64 = 30.0;

/// Scores how likely a site accepts outside content.
///
/// Returns the score in `0..=100` and the matched [`SIGNAL_KEYWORDS`] in
/// list order. Matching is case-insensitive substring search.
#[must_use]
pub fn score_publishability(text: &str) -> (f64, Vec<&'static str>) {
    if text.is_empty() {
        return (0.0, Vec::new());
    }
    let lowered = text.to_lowercase();
    let has = |needle: &str| lowered.contains(needle);

    let mut score = 0.0;
    if has("guest post") || has("write for us") {
        score += GUEST_POST_BONUS;
    }
    if has("submit") || has("contribute") {
        score += SUBMISSION_BONUS;
    }
    if has("sponsored") || has("advertise") {
        score += SPONSORSHIP_BONUS;
    }

    let signals: Vec<&'static str> = SIGNAL_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| has(keyword))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let signal_bonus = (PER_SIGNAL_BONUS * signals.len() as f64).min(SIGNAL_BONUS_CAP);
    score += signal_bonus;

    (score.min(MAX_SCORE), signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_guest_post_and_contribute() {
        let (score, signals) = score_publishability("We love guest post submissions, please contribute!");
        assert_eq!(score, 70.0);
        assert_eq!(signals, vec!["guest post", "contribute"]);
    }

    #[test]
    fn test_no_keywords() {
        assert_eq!(score_publishability("A quiet blog about tents."), (0.0, vec![]));
        assert_eq!(score_publishability(""), (0.0, vec![]));
    }

    #[test]
    fn test_case_insensitive() {
        let (score, signals) = score_publishability("WRITE FOR US today");
        assert_eq!(score, 45.0);
        assert_eq!(signals, vec!["write for us"]);
    }

    #[test]
    fn test_partial_terms_without_signals() {
        // "submit" and "sponsored" score their groups without being signals.
        let (score, signals) = score_publishability("Submit your story. Sponsored by nobody.");
        assert_eq!(score, 30.0);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_capped_at_one_hundred() {
        let text = "Write for us! Guest post rules, contribute, submit article, \
                    editorial guidelines, sponsored post, advertise, press@x.com, editor@x.com";
        let (score, signals) = score_publishability(text);
        assert_eq!(signals.len(), SIGNAL_KEYWORDS.len());
        assert_eq!(score, MAX_SCORE);
    }
}
