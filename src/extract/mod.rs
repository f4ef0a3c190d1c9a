pub mod auxiliary;
pub mod candidates;
pub mod narrative;

use crate::disambig::{self, DisambigOption};
use crate::lexicon::Patterns;
use crate::page::ArticleDoc;

/// A successful extraction: the population span plus whatever auxiliary
/// fields the page yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub population: String,
    pub area: Option<String>,
    pub density: Option<String>,
}

/// Result of one extraction pass over a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Extraction),
    /// The page lists multiple subjects for the name; the caller must pick
    /// one and re-fetch before extraction can continue.
    Disambiguation(Vec<DisambigOption>),
    /// Nothing usable on this page. A defined terminal state, not an error.
    Nothing,
}

/// One extraction pass. With an infobox, rank its population candidates and
/// fall back to the narrative text of the same document when none survives.
/// Without an infobox, a disambiguation marker routes to option listing;
/// otherwise the narrative scan decides. Auxiliary fields are extracted only
/// alongside a found population.
pub fn extract_page(doc: &ArticleDoc, pat: &Patterns, base_url: &str) -> Outcome {
    if let Some(rows) = doc.infobox_rows() {
        let cands = candidates::gather(&rows, pat);
        if let Some(best) = candidates::rank(&cands) {
            return found(doc, pat, best.value.clone());
        }
        return match narrative::population(&doc.paragraphs(), pat) {
            Some(p) => found(doc, pat, p),
            None => Outcome::Nothing,
        };
    }

    if doc.full_text().to_lowercase().contains(&pat.disambig_marker) {
        return Outcome::Disambiguation(disambig::options(doc, base_url));
    }

    match narrative::population(&doc.paragraphs(), pat) {
        Some(p) => found(doc, pat, p),
        None => Outcome::Nothing,
    }
}

fn found(doc: &ArticleDoc, pat: &Patterns, population: String) -> Outcome {
    let extras = auxiliary::extract(doc, pat);
    Outcome::Found(Extraction {
        population,
        area: extras.area,
        density: extras.density,
    })
}
