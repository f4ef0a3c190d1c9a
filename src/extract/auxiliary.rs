use crate::lexicon::Patterns;
use crate::page::ArticleDoc;

/// Area and density accompanying a population figure. Either field may be
/// absent; that is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras {
    pub area: Option<String>,
    pub density: Option<String>,
}

/// Pull area and density from the infobox when present, then fill whatever is
/// still missing from the narrative paragraphs. The two fields are resolved
/// independently; the first matching row or paragraph wins per field.
pub fn extract(doc: &ArticleDoc, pat: &Patterns) -> Extras {
    let mut extras = Extras::default();

    if let Some(rows) = doc.infobox_rows() {
        for row in &rows {
            if extras.area.is_none() && row.label.contains(&pat.area_label) {
                extras.area = Some(row.value.clone());
            } else if extras.density.is_none() && row.label.contains(&pat.density_label) {
                extras.density = Some(row.value.clone());
            }
        }
    }

    if extras.area.is_none() || extras.density.is_none() {
        for text in doc.paragraphs() {
            let lower = text.to_lowercase();
            if extras.area.is_none()
                && lower.contains(&pat.area_label)
                && pat.area_cue.is_match(&text)
            {
                if let Some(caps) = pat.area_span.captures(&text) {
                    extras.area = Some(caps[1].trim().to_string());
                }
            }
            if extras.density.is_none()
                && lower.contains(&pat.density_label)
                && pat.density_cue.is_match(&text)
            {
                if let Some(caps) = pat.density_span.captures(&text) {
                    extras.density = Some(caps[1].trim().to_string());
                }
            }
            if extras.area.is_some() && extras.density.is_some() {
                break;
            }
        }
    }

    extras
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn pat() -> Patterns {
        Lexicon::spanish().compile().unwrap()
    }

    #[test]
    fn infobox_rows_first() {
        let doc = ArticleDoc::parse(
            r#"<div class="mw-parser-output">
            <table class="infobox">
              <tr><th>Superficie</th><td>45,2 km²</td></tr>
              <tr><th>Densidad</th><td>120 hab/km²</td></tr>
              <tr><th>Superficie total</th><td>99 km²</td></tr>
            </table>
            </div>"#,
        );
        let extras = extract(&doc, &pat());
        assert_eq!(extras.area.as_deref(), Some("45,2 km²"));
        assert_eq!(extras.density.as_deref(), Some("120 hab/km²"));
    }

    #[test]
    fn narrative_fallback_per_field() {
        let doc = ArticleDoc::parse(
            r#"<div class="mw-parser-output">
            <p>Tiene una superficie de 45 km² en total.</p>
            <p>La densidad es de 120 hab/km² aproximadamente.</p>
            </div>"#,
        );
        let extras = extract(&doc, &pat());
        assert_eq!(extras.area.as_deref(), Some("45 km"));
        assert_eq!(extras.density.as_deref(), Some("de 120 hab"));
    }

    #[test]
    fn infobox_field_mixed_with_narrative_field() {
        let doc = ArticleDoc::parse(
            r#"<div class="mw-parser-output">
            <table class="infobox">
              <tr><th>Superficie</th><td>45,2 km²</td></tr>
            </table>
            <p>La densidad es de 120 hab/km².</p>
            </div>"#,
        );
        let extras = extract(&doc, &pat());
        assert_eq!(extras.area.as_deref(), Some("45,2 km²"));
        assert_eq!(extras.density.as_deref(), Some("de 120 hab"));
    }

    #[test]
    fn paragraph_without_digit_cue_is_ignored() {
        let doc = ArticleDoc::parse(
            r#"<div class="mw-parser-output">
            <p>La superficie del municipio es extensa.</p>
            </div>"#,
        );
        let extras = extract(&doc, &pat());
        assert!(extras.area.is_none());
        assert!(extras.density.is_none());
    }

    #[test]
    fn absence_is_normal() {
        let doc = ArticleDoc::parse("<p>nada</p>");
        assert_eq!(extract(&doc, &pat()), Extras::default());
    }
}
