use regex::Regex;

/// Locale-specific keyword set driving the extraction pipeline. The default
/// covers Spanish Wikipedia conventions; swapping in another lexicon retargets
/// the whole pipeline without touching the extraction logic.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Infobox labels and narrative cues that mark a population figure.
    pub population_labels: Vec<String>,
    /// Substrings that mark a value as an inhabitant count ("hab").
    pub unit_markers: Vec<String>,
    pub area_label: String,
    pub area_units: Vec<String>,
    pub density_label: String,
    pub density_units: Vec<String>,
    /// Short connective words allowed between a label and its value
    /// ("superficie de 45 km").
    pub filler_words: Vec<String>,
    /// Phrase identifying a disambiguation page, lowercase.
    pub disambig_marker: String,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::spanish()
    }
}

impl Lexicon {
    pub fn spanish() -> Self {
        Self {
            population_labels: vec!["población".into(), "habitantes".into()],
            unit_markers: vec!["hab".into()],
            area_label: "superficie".into(),
            area_units: vec!["km".into(), "hectáreas".into(), "ha".into()],
            density_label: "densidad".into(),
            density_units: vec!["hab".into(), "habitantes".into()],
            filler_words: vec!["de".into(), "es".into(), ":".into()],
            disambig_marker: "puede referirse a:".into(),
        }
    }

    /// Compile the keyword set into the regexes the extractors run. Done once
    /// per session, not per page.
    pub fn compile(&self) -> Result<Patterns, regex::Error> {
        let labels = alternation(&self.population_labels);
        let units = alternation(&self.unit_markers);
        let area_units = alternation(&self.area_units);
        let density_units = alternation(&self.density_units);
        let filler = alternation(&self.filler_words);
        let area = regex::escape(&self.area_label);
        let density = regex::escape(&self.density_label);

        Ok(Patterns {
            population_cue: Regex::new(&format!(r"(?i)\d\s*(?:{units})"))?,
            // Span from a population label up to the unit marker, keeping a
            // trailing 4-digit year when one follows.
            population_span: Regex::new(&format!(
                r"(?i)(?:{labels})[^.;]*?(\d[\d\s.,]*\s*(?:{units})\D*(?:\d{{4}})?)"
            ))?,
            area_cue: Regex::new(&format!(r"(?i)\d\s*(?:{area_units})"))?,
            area_span: Regex::new(&format!(
                r"(?i){area}\s*(?:{filler})?\s*([^.;]+(?:{area_units}))"
            ))?,
            density_cue: Regex::new(&format!(r"(?i)\d\s*(?:{density_units})"))?,
            density_span: Regex::new(&format!(
                r"(?i){density}\s*(?:{filler})?\s*([^.;]+(?:{density_units}))"
            ))?,
            population_labels: lowered(&self.population_labels),
            unit_markers: lowered(&self.unit_markers),
            area_label: self.area_label.to_lowercase(),
            density_label: self.density_label.to_lowercase(),
            disambig_marker: self.disambig_marker.to_lowercase(),
        })
    }
}

/// A compiled lexicon: lowercased keywords for substring matching plus the
/// derived regexes for narrative extraction.
#[derive(Debug)]
pub struct Patterns {
    pub population_labels: Vec<String>,
    pub unit_markers: Vec<String>,
    pub area_label: String,
    pub density_label: String,
    pub disambig_marker: String,
    pub population_cue: Regex,
    pub population_span: Regex,
    pub area_cue: Regex,
    pub area_span: Regex,
    pub density_cue: Regex,
    pub density_span: Regex,
}

impl Patterns {
    /// `label` must already be lowercased (table rows store labels that way).
    pub fn is_population_label(&self, label: &str) -> bool {
        self.population_labels.iter().any(|k| label.contains(k.as_str()))
    }

    pub fn has_unit_marker(&self, value: &str) -> bool {
        let lower = value.to_lowercase();
        self.unit_markers.iter().any(|k| lower.contains(k.as_str()))
    }
}

fn alternation(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

fn lowered(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| t.to_lowercase()).collect()
}
