//! Very small box estimation used when no browser-measured metrics exist.
//!
//! Text is wrapped at a fixed glyph width inside the viewport, which is good
//! enough to tell whether an element with a fixed inline height clips its
//! content.

use crate::Viewport;
use serde::{Deserialize, Serialize};

const GLYPH_WIDTH: u32 = 8;
const LINE_HEIGHT: u32 = 8;
const PADDING: u32 = 6;
const PAGE_MARGIN: u32 = 16;

/// Rendered height versus content height, in px.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxMetrics {
    pub offset_height: u32,
    pub scroll_height: u32,
}

impl BoxMetrics {
    /// True when part of the content is hidden.
    pub fn is_clipped(&self) -> bool {
        self.offset_height < self.scroll_height
    }
}

/// Estimate the box of an element holding `text`, with an optional inline
/// `style` attribute.
pub fn estimate_box(text: &str, style: Option<&str>, viewport: Viewport) -> BoxMetrics {
    let content_w = viewport
        .width
        .saturating_sub(PAGE_MARGIN)
        .saturating_sub(PADDING * 2);
    let chars_per_line = if content_w >= GLYPH_WIDTH {
        (content_w / GLYPH_WIDTH) as usize
    } else {
        1
    };

    let lines = wrap_lines(text, chars_per_line).max(1) as u32;
    let scroll_height = lines * LINE_HEIGHT + PADDING * 2;

    let declared = style.map(parse_heights).unwrap_or_default();
    let offset_height = match (declared.height, declared.max_height) {
        (Some(h), _) => h,
        (None, Some(max)) => scroll_height.min(max),
        (None, None) => scroll_height,
    };

    BoxMetrics {
        offset_height,
        scroll_height,
    }
}

fn wrap_lines(text: &str, chars_per_line: usize) -> usize {
    let mut lines = 0;
    let mut cur = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if cur > 0 && cur + len + 1 > chars_per_line {
            lines += 1;
            cur = len;
        } else {
            if cur > 0 {
                cur += 1;
            }
            cur += len;
        }
    }
    if cur > 0 {
        lines += 1;
    }
    lines
}

#[derive(Debug, Default)]
struct DeclaredHeights {
    height: Option<u32>,
    max_height: Option<u32>,
}

fn parse_heights(style: &str) -> DeclaredHeights {
    let mut out = DeclaredHeights::default();
    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let px = value
            .trim()
            .strip_suffix("px")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| *v >= 0.0)
            .map(|v| v.round() as u32);
        match prop.trim().to_ascii_lowercase().as_str() {
            "height" => out.height = px,
            "max-height" => out.max_height = px,
            _ => {}
        }
    }
    out
}
