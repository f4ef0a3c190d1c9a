use serde::Serialize;
use tracing::{info, warn};

use crate::disambig::{Choice, Chooser};
use crate::extract::{self, Outcome};
use crate::fetch::{Fetch, FetchError, FetchedPage, WIKI_BASE};
use crate::lexicon::Patterns;
use crate::page::ArticleDoc;

/// Upper bound on extraction passes per lookup, so a chain of disambiguation
/// pages pointing at further disambiguation pages cannot loop forever.
pub const MAX_EXTRACTION_STEPS: usize = 5;

/// Terminal outcome of one lookup. All data fields may be absent; that is
/// the uniform "nothing found" state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    pub query: String,
    pub url: String,
    pub population: Option<String>,
    pub area: Option<String>,
    pub density: Option<String>,
}

impl Lookup {
    fn empty(query: &str, url: String) -> Self {
        Self {
            query: query.to_string(),
            url,
            population: None,
            area: None,
            density: None,
        }
    }
}

/// Resolve one place name end to end: fetch, extract, and walk disambiguation
/// hops as the chooser directs, up to the step bound.
///
/// An error from the initial fetch propagates to the caller; failures during
/// a disambiguation re-fetch are absorbed into an empty result, as are
/// cancellation, pages with no usable options, and an exhausted step bound.
pub async fn lookup(
    fetcher: &impl Fetch,
    pat: &Patterns,
    chooser: &mut dyn Chooser,
    query: &str,
) -> Result<Lookup, FetchError> {
    let FetchedPage { mut html, mut url } = fetcher.article(query).await?;
    info!("Resolved page: {url}");

    for _ in 0..MAX_EXTRACTION_STEPS {
        // Each pass parses a fresh document; nothing carries over between
        // hops except the markup string itself.
        let outcome = {
            let doc = ArticleDoc::parse(&html);
            extract::extract_page(&doc, pat, WIKI_BASE)
        };

        match outcome {
            Outcome::Found(ex) => {
                return Ok(Lookup {
                    query: query.to_string(),
                    url,
                    population: Some(ex.population),
                    area: ex.area,
                    density: ex.density,
                });
            }
            Outcome::Nothing => return Ok(Lookup::empty(query, url)),
            Outcome::Disambiguation(options) => {
                if options.is_empty() {
                    warn!("Disambiguation page with no usable links: {url}");
                    return Ok(Lookup::empty(query, url));
                }
                let selected = match chooser.choose(&options) {
                    Choice::Cancelled => return Ok(Lookup::empty(query, url)),
                    Choice::Selected(n) => match options.into_iter().find(|o| o.ordinal == n) {
                        Some(opt) => opt,
                        None => return Ok(Lookup::empty(query, url)),
                    },
                };
                info!(
                    "Following disambiguation option {}: {}",
                    selected.ordinal, selected.url
                );
                match fetcher.page(&selected.url).await {
                    Ok(page) => {
                        html = page.html;
                        url = page.url;
                    }
                    Err(e) => {
                        warn!("Failed to fetch selected page: {e}");
                        return Ok(Lookup::empty(query, url));
                    }
                }
            }
        }
    }

    warn!("Gave up after {MAX_EXTRACTION_STEPS} extraction passes for {query:?}");
    Ok(Lookup::empty(query, url))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::disambig::DisambigOption;
    use crate::lexicon::Lexicon;

    const DISAMBIG: &str = r#"<div class="mw-parser-output">
        <p>Villanueva puede referirse a:</p>
        <ul>
          <li><a href="/wiki/Villanueva_A">Villanueva A</a></li>
          <li><a href="/wiki/Villanueva_B">Villanueva B</a></li>
          <li><a href="/wiki/Villanueva_C">Villanueva C</a></li>
        </ul>
        </div>"#;

    const ARTICLE_B: &str = r#"<div class="mw-parser-output">
        <table class="infobox">
          <tr><th>Población (2021)</th><td>45.200 hab.</td></tr>
        </table>
        </div>"#;

    /// Serves a fixed first page, then concrete URLs from a map.
    struct ScriptedFetcher {
        first: String,
        pages: HashMap<String, String>,
    }

    impl Fetch for ScriptedFetcher {
        async fn article(&self, _place: &str) -> Result<FetchedPage, FetchError> {
            Ok(FetchedPage {
                html: self.first.clone(),
                url: format!("{WIKI_BASE}/wiki/Villanueva"),
            })
        }

        async fn page(&self, url: &str) -> Result<FetchedPage, FetchError> {
            match self.pages.get(url) {
                Some(html) => Ok(FetchedPage {
                    html: html.clone(),
                    url: url.to_string(),
                }),
                None => Err(FetchError::Timeout),
            }
        }
    }

    struct ScriptedChooser(Vec<Choice>);

    impl Chooser for ScriptedChooser {
        fn choose(&mut self, _options: &[DisambigOption]) -> Choice {
            self.0.remove(0)
        }
    }

    fn pat() -> Patterns {
        Lexicon::spanish().compile().unwrap()
    }

    #[tokio::test]
    async fn disambiguation_selection_recurses_into_choice() {
        let fetcher = ScriptedFetcher {
            first: DISAMBIG.to_string(),
            pages: HashMap::from([(
                format!("{WIKI_BASE}/wiki/Villanueva_B"),
                ARTICLE_B.to_string(),
            )]),
        };
        let mut chooser = ScriptedChooser(vec![Choice::Selected(2)]);
        let result = lookup(&fetcher, &pat(), &mut chooser, "villanueva")
            .await
            .unwrap();
        assert_eq!(result.population.as_deref(), Some("45.200 hab."));
        assert_eq!(result.url, format!("{WIKI_BASE}/wiki/Villanueva_B"));
    }

    #[tokio::test]
    async fn cancellation_yields_empty_result() {
        let fetcher = ScriptedFetcher {
            first: DISAMBIG.to_string(),
            pages: HashMap::new(),
        };
        let mut chooser = ScriptedChooser(vec![Choice::Cancelled]);
        let result = lookup(&fetcher, &pat(), &mut chooser, "villanueva")
            .await
            .unwrap();
        assert!(result.population.is_none());
        assert!(result.area.is_none());
        assert!(result.density.is_none());
    }

    #[tokio::test]
    async fn refetch_failure_is_absorbed() {
        // Option 1 is not in the page map, so the re-fetch times out; the
        // lookup still resolves, to an empty result.
        let fetcher = ScriptedFetcher {
            first: DISAMBIG.to_string(),
            pages: HashMap::new(),
        };
        let mut chooser = ScriptedChooser(vec![Choice::Selected(1)]);
        let result = lookup(&fetcher, &pat(), &mut chooser, "villanueva")
            .await
            .unwrap();
        assert!(result.population.is_none());
    }

    #[tokio::test]
    async fn disambiguation_chain_is_bounded() {
        // Every option points back at the same disambiguation page.
        let fetcher = ScriptedFetcher {
            first: DISAMBIG.to_string(),
            pages: HashMap::from([
                (format!("{WIKI_BASE}/wiki/Villanueva_A"), DISAMBIG.to_string()),
            ]),
        };
        let mut chooser =
            ScriptedChooser(vec![Choice::Selected(1); MAX_EXTRACTION_STEPS + 1]);
        let result = lookup(&fetcher, &pat(), &mut chooser, "villanueva")
            .await
            .unwrap();
        assert!(result.population.is_none());
    }
}
