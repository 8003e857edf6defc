use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;
use roxmltree::{Document, ParsingOptions};

/// Canvas size the generator is asked to draw on.
pub const DEFAULT_VIEW_BOX: &str = "0 0 300 300";

pub const LOADING_PLACEHOLDER: &str = "Generating Puzzle...";
pub const EMPTY_PLACEHOLDER: &str = "No puzzle loaded.";

/// SVG markup that will be injected into the page as-is.
///
/// Only construct this from content produced by the configured generation backend, no sanitization happens on the
/// way to the DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustedSvg(String);

impl TrustedSvg {
    pub fn from_backend(svg: &str) -> Self {
        Self(fit_svg_to_container(svg))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// What the puzzle area should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PuzzleDisplay {
    Loading,
    Empty,
    Markup(TrustedSvg),
}

impl PuzzleDisplay {
    pub fn plan(svg: Option<&str>, loading: bool) -> Self {
        match svg {
            _ if loading => Self::Loading,
            None => Self::Empty,
            Some(svg) => Self::Markup(TrustedSvg::from_backend(svg)),
        }
    }
}

/// Makes generated markup scale with its container.
///
/// Only the root `<svg>` element is touched: numeric `width`/`height` attributes become `100%`, and a
/// [`DEFAULT_VIEW_BOX`] is added when it has none. Everything else, including markup that is not well-formed XML or
/// whose root is not `<svg>`, is returned byte for byte.
pub fn fit_svg_to_container(svg: &str) -> String {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = match Document::parse_with_options(svg, options) {
        Ok(doc) => doc,
        Err(err) => {
            log::debug!("leaving unparsable markup as-is: {err}");
            return svg.into();
        }
    };

    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return svg.into();
    }

    let mut edits: Vec<(Range<usize>, String)> = root
        .attributes()
        .filter(|attr| attr.namespace().is_none() && matches!(attr.name(), "width" | "height"))
        .filter(|attr| is_fixed_size(attr.value()))
        .map(|attr| (attr.range_value(), String::from("100%")))
        .collect();

    if !root.has_attribute("viewBox") {
        let tag_start = root.range().start;
        let name_end = svg[tag_start..]
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .map_or(tag_start, |len| tag_start + len);
        edits.push((name_end..name_end, format!(" viewBox=\"{DEFAULT_VIEW_BOX}\"")));
    }

    // back to front so earlier ranges stay valid
    edits.sort_by_key(|(range, _)| core::cmp::Reverse(range.start));
    let mut out = String::from(svg);
    for (range, text) in edits {
        out.replace_range(range, &text);
    }
    out
}

/// Pixel sizes like `300`, `300.5` or `300px`, percentages and other units are left alone.
fn is_fixed_size(value: &str) -> bool {
    let number = value.trim().strip_suffix("px").unwrap_or(value.trim());
    let mut parts = number.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}
