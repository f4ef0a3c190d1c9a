use crate::lexicon::Patterns;

/// Only the opening paragraphs are scanned; population figures show up early
/// when they show up at all.
const PARAGRAPH_SCAN_LIMIT: usize = 5;

/// Scan the leading paragraphs for a population mention. A paragraph
/// qualifies when it names a population keyword and has a digit adjacent to
/// the unit marker; the first qualifying paragraph supplies the span.
pub fn population(paragraphs: &[String], pat: &Patterns) -> Option<String> {
    for text in paragraphs.iter().take(PARAGRAPH_SCAN_LIMIT) {
        let lower = text.to_lowercase();
        if !pat.is_population_label(&lower) {
            continue;
        }
        if !pat.population_cue.is_match(text) {
            continue;
        }
        if let Some(caps) = pat.population_span.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}
