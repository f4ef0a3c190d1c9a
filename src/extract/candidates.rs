use crate::lexicon::Patterns;
use crate::page::TableRow;

/// A raw infobox value that plausibly holds a population figure, with the two
/// properties the ranking compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub has_unit: bool,
    pub digits: usize,
}

/// Collect candidates from infobox rows: the label must contain a population
/// keyword and the value at least one digit. Encounter order is preserved.
pub fn gather(rows: &[TableRow], pat: &Patterns) -> Vec<Candidate> {
    rows.iter()
        .filter(|r| pat.is_population_label(&r.label))
        .filter(|r| r.value.chars().any(|c| c.is_ascii_digit()))
        .map(|r| Candidate {
            has_unit: pat.has_unit_marker(&r.value),
            digits: digit_count(&r.value),
            value: r.value.clone(),
        })
        .collect()
}

/// Pick the best candidate. A value carrying a unit marker wins outright,
/// first match in encounter order; otherwise the value with the strictly
/// greatest digit count wins, earliest on ties. Empty input yields None.
pub fn rank(candidates: &[Candidate]) -> Option<&Candidate> {
    if let Some(c) = candidates.iter().find(|c| c.has_unit) {
        return Some(c);
    }
    let mut best: Option<&Candidate> = None;
    for c in candidates {
        if best.map_or(true, |b| c.digits > b.digits) {
            best = Some(c);
        }
    }
    best
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn pat() -> Patterns {
        Lexicon::spanish().compile().unwrap()
    }

    fn row(label: &str, value: &str) -> TableRow {
        TableRow {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn gather_filters_labels_and_digitless_values() {
        let rows = vec![
            row("país", "España"),
            row("población (2021)", "45.200 hab."),
            row("población estimada", "desconocida"),
            row("superficie", "12 km²"),
        ];
        let cands = gather(&rows, &pat());
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].value, "45.200 hab.");
        assert!(cands[0].has_unit);
        assert_eq!(cands[0].digits, 5);
    }

    #[test]
    fn unit_marker_wins_over_digit_count() {
        let rows = vec![
            row("población total", "123456789"),
            row("habitantes", "1.200 hab."),
        ];
        let cands = gather(&rows, &pat());
        let best = rank(&cands).unwrap();
        assert_eq!(best.value, "1.200 hab.");
    }

    #[test]
    fn first_unit_match_wins() {
        let rows = vec![
            row("población", "10 hab."),
            row("habitantes", "9.999.999 hab."),
        ];
        let cands = gather(&rows, &pat());
        assert_eq!(rank(&cands).unwrap().value, "10 hab.");
    }

    #[test]
    fn max_digits_without_unit() {
        let rows = vec![row("habitantes", "45200"), row("población", "12")];
        let cands = gather(&rows, &pat());
        assert_eq!(rank(&cands).unwrap().value, "45200");
    }

    #[test]
    fn digit_tie_keeps_earliest() {
        let rows = vec![row("población", "111"), row("habitantes", "222")];
        let cands = gather(&rows, &pat());
        assert_eq!(rank(&cands).unwrap().value, "111");
    }

    #[test]
    fn empty_input_is_none() {
        assert!(rank(&[]).is_none());
        assert!(rank(&[]).is_none());
    }
}
