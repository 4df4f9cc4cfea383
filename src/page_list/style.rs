//! Color and font-size classes for the page list.
//!
//! Computed once per render from the block attributes and the navigation
//! context the block inherits. Named colors become `has-*` classes, custom
//! values become inline declarations.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::attr::ClassList;
use crate::error::{BlockError, BlockResult};

// =============================================================================
// Inputs
// =============================================================================

/// Page list block attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockAttributes {
    pub text_color: Option<String>,
    pub custom_text_color: Option<String>,
    pub background_color: Option<String>,
    pub custom_background_color: Option<String>,
    pub overlay_text_color: Option<String>,
    pub custom_overlay_text_color: Option<String>,
    pub overlay_background_color: Option<String>,
    pub custom_overlay_background_color: Option<String>,
    pub show_only_child_pages: Option<bool>,
    pub is_navigation_child: Option<bool>,
    pub open_submenus_on_click: Option<bool>,
    pub show_submenu_icon: Option<bool>,
}

impl BlockAttributes {
    /// Decode attributes from block JSON
    pub fn from_json(json: &str) -> BlockResult<Self> {
        decode_object(json, "block attributes")
    }
}

/// Context inherited from an enclosing navigation block.
///
/// The typed fields are what the renderer reads. The full decoded object is
/// kept as well, since any key at all marks the block as nested in a
/// navigation block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct NavigationContext {
    /// Named font size slug
    pub font_size: Option<String>,
    /// Custom style values
    pub style: ContextStyle,
    raw: Map<String, Value>,
}

/// Fields of the context the renderer interprets.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ContextFields {
    font_size: Option<String>,
    style: ContextStyle,
}

impl TryFrom<Map<String, Value>> for NavigationContext {
    type Error = serde_json::Error;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: ContextFields = serde_json::from_value(Value::Object(raw.clone()))?;
        Ok(Self {
            font_size: fields.font_size,
            style: fields.style,
            raw,
        })
    }
}

impl NavigationContext {
    /// Decode context from JSON
    pub fn from_json(json: &str) -> BlockResult<Self> {
        decode_object(json, "navigation context")
    }

    /// The context object as it was decoded
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// True when the block was rendered without any inherited context.
    ///
    /// A key that is present counts even when its value is `null` or an
    /// empty object.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.font_size.is_none() && self.style.is_empty()
    }
}

/// `style` entry of the navigation context
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContextStyle {
    /// Custom colors
    pub color: ContextColor,
    /// Custom typography
    pub typography: ContextTypography,
}

impl ContextStyle {
    fn is_empty(&self) -> bool {
        self.color.text.is_none()
            && self.color.background.is_none()
            && self.typography.font_size.is_none()
    }
}

/// Custom text and background colors
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContextColor {
    /// Custom text color
    pub text: Option<String>,
    /// Custom background color
    pub background: Option<String>,
}

/// Custom typography values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextTypography {
    /// Custom font size in pixels
    pub font_size: Option<CssValue>,
}

/// A CSS value given either as a bare number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CssValue {
    /// Bare number, e.g. `15`
    Number(Number),
    /// Text, e.g. `"1.5"`
    Text(String),
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole floats print without a fraction: `15.0` is `15`.
            CssValue::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{n}"),
            },
            CssValue::Text(s) => f.write_str(s),
        }
    }
}

fn decode_object<T: serde::de::DeserializeOwned>(json: &str, what: &'static str) -> BlockResult<T> {
    let value: Value = serde_json::from_str(json).map_err(|e| BlockError::invalid_json(what, e))?;
    if !value.is_object() {
        return Err(BlockError::NotAnObject { what });
    }
    serde_json::from_value(value).map_err(|e| BlockError::invalid_json(what, e))
}

// =============================================================================
// Outputs
// =============================================================================

/// Color classes and inline styles for the list and its first-level submenus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorStyle {
    pub css_classes: ClassList,
    pub inline_styles: String,
    /// Applied to depth-1 items only
    pub overlay_css_classes: ClassList,
    pub overlay_inline_styles: String,
}

/// Font size classes and inline styles for the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSizeStyle {
    pub css_classes: ClassList,
    pub inline_styles: String,
}

/// One color channel: a `has-*` marker class, a named-class pattern and a
/// CSS property for custom values.
struct Channel {
    marker: &'static str,
    class_suffix: &'static str,
    property: &'static str,
}

const TEXT: Channel = Channel {
    marker: "has-text-color",
    class_suffix: "color",
    property: "color",
};

const BACKGROUND: Channel = Channel {
    marker: "has-background",
    class_suffix: "background-color",
    property: "background-color",
};

impl Channel {
    /// Named color wins over a picked custom value, which wins over context.
    fn apply(
        &self,
        named: Option<&str>,
        picked: Option<&str>,
        inherited: Option<&str>,
        classes: &mut ClassList,
        styles: &mut String,
    ) {
        if named.is_none() && picked.is_none() && inherited.is_none() {
            return;
        }
        classes.push(self.marker);

        if let Some(name) = named {
            classes.push(format!("has-{}-{}", to_kebab_case(name), self.class_suffix));
        } else if let Some(value) = picked.or(inherited) {
            styles.push_str(&format!("{}: {};", self.property, value));
        }
    }
}

/// Build color classes and styles from attributes and navigation context.
pub fn build_css_colors(attributes: &BlockAttributes, context: &NavigationContext) -> ColorStyle {
    let mut colors = ColorStyle::default();

    TEXT.apply(
        attributes.text_color.as_deref(),
        attributes.custom_text_color.as_deref(),
        context.style.color.text.as_deref(),
        &mut colors.css_classes,
        &mut colors.inline_styles,
    );
    BACKGROUND.apply(
        attributes.background_color.as_deref(),
        attributes.custom_background_color.as_deref(),
        context.style.color.background.as_deref(),
        &mut colors.css_classes,
        &mut colors.inline_styles,
    );

    // Overlay colors come from the block attributes only.
    TEXT.apply(
        attributes.overlay_text_color.as_deref(),
        attributes.custom_overlay_text_color.as_deref(),
        None,
        &mut colors.overlay_css_classes,
        &mut colors.overlay_inline_styles,
    );
    BACKGROUND.apply(
        attributes.overlay_background_color.as_deref(),
        attributes.custom_overlay_background_color.as_deref(),
        None,
        &mut colors.overlay_css_classes,
        &mut colors.overlay_inline_styles,
    );

    colors
}

/// Build font size classes and styles from the navigation context.
pub fn build_css_font_sizes(context: &NavigationContext) -> FontSizeStyle {
    let mut font_sizes = FontSizeStyle::default();

    if let Some(slug) = &context.font_size {
        font_sizes.css_classes.push(format!("has-{slug}-font-size"));
    } else if let Some(size) = &context.style.typography.font_size {
        font_sizes.inline_styles = format!("font-size: {size}px;");
    }

    font_sizes
}

// =============================================================================
// Kebab case
// =============================================================================

/// Convert a color slug or name to kebab case.
///
/// Words are runs of lowercase letters (optionally led by one capital and
/// followed by digits), capital-letter acronyms, single capitals, or digit
/// runs. Everything else separates words.
///
/// `vividRed` → `vivid-red`, `XMLHttp` → `xml-http`, `color1` → `color1`.
pub fn to_kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match match_word(&chars, i) {
            Some(end) => {
                words.push(chars[i..end].iter().collect::<String>().to_ascii_lowercase());
                i = end;
            }
            None => i += 1,
        }
    }

    words.join("-")
}

/// End index of the word starting at `start`, if one starts there.
fn match_word(chars: &[char], start: usize) -> Option<usize> {
    let at = |i: usize| chars.get(i).copied();
    let upper = |i: usize| at(i).is_some_and(|c| c.is_ascii_uppercase());
    let lower = |i: usize| at(i).is_some_and(|c| c.is_ascii_lowercase());
    let digit = |i: usize| at(i).is_some_and(|c| c.is_ascii_digit());
    let word_char = |i: usize| at(i).is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');

    // Acronym: two or more capitals, ending before a capitalized word or at
    // a word boundary. Longest match first.
    let mut run = start;
    while upper(run) {
        run += 1;
    }
    for end in (start + 2..=run).rev() {
        let before_word = upper(end) && lower(end + 1);
        if before_word || !word_char(end) {
            return Some(end);
        }
    }

    // Optional capital, lowercase run, trailing digits.
    let mut i = start;
    if upper(i) {
        i += 1;
    }
    if lower(i) {
        while lower(i) {
            i += 1;
        }
        while digit(i) {
            i += 1;
        }
        return Some(i);
    }

    if upper(start) {
        return Some(start + 1);
    }

    if digit(start) {
        let mut i = start;
        while digit(i) {
            i += 1;
        }
        return Some(i);
    }

    None
}
