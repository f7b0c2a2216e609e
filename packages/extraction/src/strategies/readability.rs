//! Readability-style main content extraction.
//!
//! Scores every block that directly holds paragraphs, the way readability
//! implementations do: each substantial paragraph adds to its parent and half
//! as much to its grandparent, the score is damped by link density and nudged
//! by class/id hints, and the best container's paragraphs become the article.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{StrategyError, StrategyResult};
use crate::traits::{PageFetcher, UrlStrategy};

/// Paragraphs shorter than this are navigation crumbs, captions, bylines.
const MIN_PARAGRAPH_CHARS: usize = 25;

const POSITIVE_HINTS: &[&str] = &[
    "article", "body", "content", "entry", "main", "page", "post", "story", "text",
];

const NEGATIVE_HINTS: &[&str] = &[
    "ad-", "advert", "banner", "comment", "footer", "header", "menu", "nav", "popup",
    "promo", "related", "share", "sidebar", "social", "sponsor", "subscribe", "widget",
];

/// Main-content extractor modelled on readability/newspaper.
pub struct ReadabilityStrategy {
    fetcher: Arc<dyn PageFetcher>,
}

impl ReadabilityStrategy {
    pub const NAME: &'static str = "readability";

    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Extract the main article text from an HTML document.
    pub fn extract_article(html: &str) -> StrategyResult<String> {
        let document = Html::parse_document(html);
        let paragraph_selector = selector("p")?;
        let link_selector = selector("a")?;

        let mut candidates: HashMap<_, (ElementRef, f64)> = HashMap::new();

        for paragraph in document.select(&paragraph_selector) {
            if has_boilerplate_ancestor(paragraph) {
                continue;
            }
            let text = element_text(paragraph);
            let chars = text.chars().count();
            if chars < MIN_PARAGRAPH_CHARS {
                continue;
            }

            let score = 1.0 + text.matches(',').count() as f64 + (chars as f64 / 100.0).min(3.0);

            let parent = paragraph.parent().and_then(ElementRef::wrap);
            if let Some(parent) = parent {
                candidates
                    .entry(parent.id())
                    .or_insert((parent, class_weight(parent)))
                    .1 += score;

                if let Some(grandparent) = parent.parent().and_then(ElementRef::wrap) {
                    candidates
                        .entry(grandparent.id())
                        .or_insert((grandparent, class_weight(grandparent)))
                        .1 += score / 2.0;
                }
            }
        }

        let best = candidates
            .into_values()
            .map(|(element, score)| {
                let density = link_density(element, &link_selector);
                (element, score * (1.0 - density))
            })
            .filter(|(_, score)| *score > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let (container, score) = best.ok_or(StrategyError::Empty)?;
        debug!(
            tag = container.value().name(),
            score = score,
            "Selected main content container"
        );

        let text = container
            .select(&paragraph_selector)
            .filter(|p| !has_boilerplate_ancestor(*p))
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        if text.trim().is_empty() {
            return Err(StrategyError::Empty);
        }
        Ok(text)
    }
}

#[async_trait]
impl UrlStrategy for ReadabilityStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn extract(&self, url: &str) -> StrategyResult<String> {
        let html = self.fetcher.fetch_html(url).await?;
        Self::extract_article(&html)
    }
}

fn selector(css: &str) -> StrategyResult<Selector> {
    Selector::parse(css).map_err(|e| StrategyError::Parse(format!("bad selector {}: {:?}", css, e)))
}

/// Visible text of an element with whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn hint_text(element: ElementRef<'_>) -> String {
    let value = element.value();
    format!(
        "{} {}",
        value.attr("class").unwrap_or_default(),
        value.attr("id").unwrap_or_default()
    )
    .to_lowercase()
}

fn class_weight(element: ElementRef<'_>) -> f64 {
    let tag_bonus = match element.value().name() {
        "article" | "main" => 10.0,
        "section" | "div" => 0.0,
        _ => -5.0,
    };

    let hints = hint_text(element);
    let positive = POSITIVE_HINTS.iter().any(|h| hints.contains(h));
    let negative = NEGATIVE_HINTS.iter().any(|h| hints.contains(h));

    tag_bonus
        + match (positive, negative) {
            (true, false) => 25.0,
            (false, true) => -25.0,
            _ => 0.0,
        }
}

fn has_boilerplate_ancestor(element: ElementRef<'_>) -> bool {
    element.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        matches!(
            ancestor.value().name(),
            "nav" | "footer" | "aside" | "form" | "noscript"
        )
    })
}

fn link_density(element: ElementRef<'_>, link_selector: &Selector) -> f64 {
    let total = element_text(element).chars().count();
    if total == 0 {
        return 1.0;
    }
    let linked: usize = element
        .select(link_selector)
        .map(|a| element_text(a).chars().count())
        .sum();
    (linked as f64 / total as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_PAGE: &str = r#"
        <html>
          <head><title>City council votes</title><script>var x = 1;</script></head>
          <body>
            <nav><p>Home, World, Politics, Business, Sports, Weather and more</p></nav>
            <div class="sidebar">
              <p><a href="/a">Trending: celebrity gossip you will not believe today</a></p>
            </div>
            <article class="story-body">
              <h1>City council votes to expand transit</h1>
              <p>The city council voted on Tuesday, by a margin of seven to two, to expand the light rail network.</p>
              <p>Officials said construction would begin next spring, pending final approval of the budget.</p>
              <aside><p>Related coverage: transit budget hearings continue next week</p></aside>
            </article>
            <footer><p>Copyright 2024, Example News Corporation, all rights reserved.</p></footer>
          </body>
        </html>
    "#;

    #[test]
    fn test_extracts_article_paragraphs() {
        let text = ReadabilityStrategy::extract_article(ARTICLE_PAGE).unwrap();

        assert!(text.starts_with("The city council voted on Tuesday"));
        assert!(text.contains("Officials said construction would begin next spring"));
        assert!(!text.contains("Trending"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("Related coverage"));
    }

    #[test]
    fn test_page_without_paragraphs_is_empty() {
        let err = ReadabilityStrategy::extract_article("<html><body><div>hi</div></body></html>")
            .unwrap_err();
        assert!(matches!(err, StrategyError::Empty));
    }

    #[test]
    fn test_link_farm_loses_to_prose() {
        let html = r#"
            <body>
              <div id="links">
                <p><a href="/1">Read this other story about the election results now</a></p>
                <p><a href="/2">Read this other story about the stock market rally now</a></p>
              </div>
              <div id="content">
                <p>Residents gathered downtown on Saturday to protest the proposed closure of the library.</p>
              </div>
            </body>
        "#;

        let text = ReadabilityStrategy::extract_article(html).unwrap();
        assert!(text.starts_with("Residents gathered downtown"));
        assert!(!text.contains("election"));
    }
}
