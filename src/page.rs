//! DOM access for the evaluator.
//!
//! The evaluator never reaches for an ambient document: it is handed a
//! [`Page`], which answers selector queries with owned [`ElementView`]s taken
//! at query time. [`HtmlPage`] is the `scraper`-backed implementation over a
//! saved HTML document. Properties only a live browser knows (image load
//! state, rendered heights) come from [`RenderHints`] when the caller has
//! them, and are otherwise derived from markup.

use crate::layout::{self, BoxMetrics};
use crate::{Error, Result, Viewport};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// Load state of an `<img>` as a browser would report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageState {
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_height: Option<u32>,
}

impl ImageState {
    /// Not finished loading, or decoded to zero width.
    pub fn is_broken(&self) -> bool {
        !self.complete || self.natural_width == Some(0)
    }
}

/// Owned, read-only view of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text of all descendant text nodes.
    pub text: String,
    pub metrics: BoxMetrics,
    /// Present for `<img>` elements only.
    pub image: Option<ImageState>,
}

impl ElementView {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Document accessor handed to the evaluator.
pub trait Page {
    /// Address of the page, as the browser reports it.
    fn url(&self) -> &str;

    /// All elements matching a selector list, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<ElementView>>;

    /// First element matching a selector list.
    fn query(&self, selector: &str) -> Result<Option<ElementView>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// `lang` attribute of the root element; `None` when absent or empty.
    fn html_lang(&self) -> Result<Option<String>>;

    /// Text content of `<body>`, including script and style text.
    fn body_text(&self) -> Result<String>;

    fn hostname(&self) -> Option<String> {
        Url::parse(self.url())
            .ok()?
            .host_str()
            .map(|h| h.to_string())
    }

    /// Resolve a reference the way `a.href` / `img.src` do.
    fn resolve(&self, reference: &str) -> Option<Url> {
        Url::parse(self.url()).ok()?.join(reference).ok()
    }
}

/// Browser-observed properties that cannot be read from markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderHints {
    /// Keyed by the raw `src` attribute or the resolved image URL.
    pub images: HashMap<String, ImageState>,
    /// Keyed by CSS selector; the first selector (in key order) matching an
    /// element supplies its metrics.
    pub boxes: BTreeMap<String, BoxMetrics>,
}

impl RenderHints {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Invalid render hints: {}", e)))
    }
}

/// A page parsed from HTML text.
pub struct HtmlPage {
    url: Url,
    document: Html,
    images: HashMap<String, ImageState>,
    boxes: Vec<(Selector, BoxMetrics)>,
    viewport: Viewport,
}

impl std::fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlPage")
            .field("url", &self.url.as_str())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl HtmlPage {
    /// Parse `html` as the document found at `url`.
    pub fn parse(url: &str, html: &str) -> Result<Self> {
        Self::with_hints(url, html, RenderHints::default(), Viewport::default())
    }

    pub fn with_hints(url: &str, html: &str, hints: RenderHints, viewport: Viewport) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::EvaluationFailure(format!("Invalid page URL {}: {}", url, e)))?;

        let mut boxes = Vec::with_capacity(hints.boxes.len());
        for (sel, metrics) in hints.boxes {
            let parsed = Selector::parse(&sel)
                .map_err(|e| Error::ConfigError(format!("Invalid hint selector {}: {:?}", sel, e)))?;
            boxes.push((parsed, metrics));
        }

        Ok(Self {
            url,
            document: Html::parse_document(html),
            images: hints.images,
            boxes,
            viewport,
        })
    }

    fn view(&self, el: ElementRef<'_>) -> ElementView {
        let value = el.value();
        let tag = value.name().to_string();
        let text = el.text().collect::<String>();

        let metrics = self
            .boxes
            .iter()
            .find(|(sel, _)| sel.matches(&el))
            .map(|(_, m)| *m)
            .unwrap_or_else(|| layout::estimate_box(&text, value.attr("style"), self.viewport));

        let image = (tag == "img").then(|| self.image_state(value.attr("src"), value.attr("width"), value.attr("height")));

        ElementView {
            tag,
            attributes: value
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text,
            metrics,
            image,
        }
    }

    fn image_state(&self, src: Option<&str>, width: Option<&str>, height: Option<&str>) -> ImageState {
        let src = src.map(str::trim).unwrap_or("");
        if !src.is_empty() {
            if let Some(state) = self.images.get(src) {
                return *state;
            }
            if let Some(state) = self
                .resolve(src)
                .and_then(|u| self.images.get(u.as_str()))
            {
                return *state;
            }
        }

        ImageState {
            complete: !src.is_empty(),
            natural_width: width.and_then(|w| w.trim().parse().ok()),
            natural_height: height.and_then(|h| h.trim().parse().ok()),
        }
    }
}

impl Page for HtmlPage {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementView>> {
        let sel = Selector::parse(selector).map_err(|e| {
            Error::EvaluationFailure(format!("Invalid selector {}: {:?}", selector, e))
        })?;
        Ok(self.document.select(&sel).map(|el| self.view(el)).collect())
    }

    fn html_lang(&self) -> Result<Option<String>> {
        Ok(self
            .document
            .root_element()
            .value()
            .attr("lang")
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string()))
    }

    fn body_text(&self) -> Result<String> {
        let sel = Selector::parse("body")
            .map_err(|e| Error::EvaluationFailure(format!("Invalid selector body: {:?}", e)))?;
        self.document
            .select(&sel)
            .next()
            .map(|b| b.text().collect::<String>())
            .ok_or_else(|| Error::EvaluationFailure("Document has no body".into()))
    }

    fn hostname(&self) -> Option<String> {
        self.url.host_str().map(|h| h.to_string())
    }

    fn resolve(&self, reference: &str) -> Option<Url> {
        self.url.join(reference).ok()
    }
}
