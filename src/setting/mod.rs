//! Editor setting resolution.
//!
//! A setting such as `color.palette` can be answered by several sources.
//! [`SettingResolver::get`] tries them in order and returns the first
//! defined value:
//!
//! 1. `__experimentalFeatures.blocks.<block>.<path>`
//! 2. `__experimentalFeatures.<path>`
//! 3. the [`DeprecatedFlag`] adapter registered for `<path>`
//! 4. `true` for `typography.dropCap`
//!
//! Nothing here fails; `None` tells the caller to apply its own default.
//!
//! ```
//! use editor_blocks::setting::{ConfigTree, SettingResolver};
//! use serde_json::json;
//!
//! let config = ConfigTree::new(json!({
//!     "__experimentalFeatures": {
//!         "color": { "custom": true },
//!         "blocks": { "core/paragraph": { "color": { "custom": false } } }
//!     }
//! }));
//!
//! let resolver = SettingResolver::new(&config).for_block("core/paragraph");
//! assert_eq!(resolver.get_bool("color.custom"), Some(false));
//! assert_eq!(resolver.for_block("core/heading").get_bool("color.custom"), Some(true));
//! ```

mod config;
mod deprecated;

pub use config::{ConfigTree, is_truthy};
pub use deprecated::{DEFAULT_SPACING_UNITS, DeprecatedFlag};

use std::borrow::Cow;

use serde_json::Value;
use tracing::trace;

/// Settings namespace for not-yet-stable features
pub const EXPERIMENTAL_FEATURES: &str = "__experimentalFeatures";

/// Path that defaults to `true` when no source defines it
pub const DROP_CAP_PATH: &str = "typography.dropCap";

/// Which cascade step produced a setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    /// Block-specific experimental settings
    Block,
    /// Global experimental settings
    Global,
    /// A deprecated flag adapter
    Deprecated(DeprecatedFlag),
    /// The hardcoded `typography.dropCap` fallback
    Fallback,
}

/// Resolves settings for one block type against one settings object.
///
/// Cheap to copy; holds only borrows.
#[derive(Debug, Clone, Copy)]
pub struct SettingResolver<'a> {
    config: &'a ConfigTree,
    block_name: &'a str,
}

impl<'a> SettingResolver<'a> {
    /// Create a resolver with no block selected
    pub fn new(config: &'a ConfigTree) -> Self {
        Self {
            config,
            block_name: "",
        }
    }

    /// Select the block type. An empty name keeps the current block.
    pub fn for_block(self, block_name: &'a str) -> Self {
        if block_name.is_empty() {
            return self;
        }
        Self { block_name, ..self }
    }

    /// Block type this resolver looks up
    pub fn block_name(&self) -> &'a str {
        self.block_name
    }

    /// Resolve a dotted setting path
    pub fn get(&self, path: &str) -> Option<Cow<'a, Value>> {
        self.get_with_source(path).map(|(value, _)| value)
    }

    /// Resolve a dotted setting path, reporting which source answered
    pub fn get_with_source(&self, path: &str) -> Option<(Cow<'a, Value>, SettingSource)> {
        let config = self.config;

        // A null block value falls through to the global value.
        let block_value = config
            .lookup(
                [EXPERIMENTAL_FEATURES, "blocks", self.block_name]
                    .into_iter()
                    .chain(path.split('.')),
            )
            .filter(|v| !v.is_null());
        if let Some(value) = block_value {
            trace!(path, block = self.block_name, "setting resolved from block features");
            return Some((Cow::Borrowed(value), SettingSource::Block));
        }

        let global_value =
            config.lookup(std::iter::once(EXPERIMENTAL_FEATURES).chain(path.split('.')));
        if let Some(value) = global_value {
            trace!(path, "setting resolved from global features");
            return Some((Cow::Borrowed(value), SettingSource::Global));
        }

        if let Some(flag) = DeprecatedFlag::from_path(path) {
            if let Some(value) = flag.apply(config) {
                trace!(path, legacy_key = flag.legacy_key(), "setting resolved from deprecated flag");
                return Some((value, SettingSource::Deprecated(flag)));
            }
        }

        if path == DROP_CAP_PATH {
            trace!(path, "setting resolved from fallback");
            return Some((Cow::Owned(Value::Bool(true)), SettingSource::Fallback));
        }

        trace!(path, block = self.block_name, "setting undefined");
        None
    }

    /// Resolve a setting expected to be a boolean
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Resolve several paths at once, keeping the request order
    pub fn resolve_all<'p>(
        &self,
        paths: impl IntoIterator<Item = &'p str>,
    ) -> Vec<(&'p str, Option<Cow<'a, Value>>)> {
        paths.into_iter().map(|path| (path, self.get(path))).collect()
    }
}

/// Resolve `path` for `block_name` against `config`.
pub fn resolve<'a>(path: &str, block_name: &'a str, config: &'a ConfigTree) -> Option<Cow<'a, Value>> {
    SettingResolver::new(config).for_block(block_name).get(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owned(value: Option<Cow<'_, Value>>) -> Option<Value> {
        value.map(Cow::into_owned)
    }

    #[test]
    fn test_undefined_without_sources() {
        let config = ConfigTree::new(json!({}));
        assert_eq!(resolve("color.palette", "core/paragraph", &config), None);
        assert_eq!(resolve("spacing.units", "core/group", &config), None);
        assert_eq!(resolve("layout.contentSize", "core/group", &config), None);
    }

    #[test]
    fn test_drop_cap_fallback() {
        let config = ConfigTree::new(json!({}));
        let resolver = SettingResolver::new(&config).for_block("core/paragraph");
        assert_eq!(
            resolver.get_with_source("typography.dropCap"),
            Some((Cow::Owned(json!(true)), SettingSource::Fallback))
        );

        let config = ConfigTree::new(json!({
            "__experimentalFeatures": { "typography": { "dropCap": false } }
        }));
        assert_eq!(SettingResolver::new(&config).get_bool("typography.dropCap"), Some(false));
    }

    #[test]
    fn test_block_overrides_global() {
        let config = ConfigTree::new(json!({
            "__experimentalFeatures": {
                "color": { "palette": ["global"] },
                "blocks": { "core/button": { "color": { "palette": ["button"] } } }
            },
            "colors": ["legacy"]
        }));

        let button = SettingResolver::new(&config).for_block("core/button");
        assert_eq!(owned(button.get("color.palette")), Some(json!(["button"])));

        let quote = button.for_block("core/quote");
        assert_eq!(
            quote.get_with_source("color.palette").map(|(_, s)| s),
            Some(SettingSource::Global)
        );
        assert_eq!(owned(quote.get("color.palette")), Some(json!(["global"])));
    }

    #[test]
    fn test_null_values() {
        let config = ConfigTree::new(json!({
            "__experimentalFeatures": {
                "spacing": { "units": null },
                "blocks": { "core/cover": { "spacing": { "units": null, "customPadding": null } } }
            },
            "enableCustomSpacing": true
        }));
        let cover = SettingResolver::new(&config).for_block("core/cover");

        // Block null defers to the global value, which is itself a present null.
        assert_eq!(owned(cover.get("spacing.units")), Some(Value::Null));
        // Block null and no global value: the deprecated flag answers.
        assert_eq!(
            cover.get_with_source("spacing.customPadding").map(|(_, s)| s),
            Some(SettingSource::Deprecated(DeprecatedFlag::SpacingCustomPadding))
        );
    }

    #[test]
    fn test_deprecated_flags_after_experimental() {
        let config = ConfigTree::new(json!({
            "disableCustomColors": true,
            "disableCustomGradients": false,
            "enableCustomUnits": true
        }));
        let resolver = SettingResolver::new(&config).for_block("core/paragraph");

        assert_eq!(resolver.get_bool("color.custom"), Some(false));
        assert_eq!(resolver.get_bool("color.customGradient"), Some(true));
        assert_eq!(
            owned(resolver.get("spacing.units")),
            Some(json!(["px", "em", "rem", "vh", "vw"]))
        );
        assert_eq!(resolver.get("typography.customFontSize"), None);

        let config = ConfigTree::new(json!({
            "__experimentalFeatures": { "color": { "custom": true } },
            "disableCustomColors": true
        }));
        assert_eq!(SettingResolver::new(&config).get_bool("color.custom"), Some(true));
    }

    #[test]
    fn test_empty_block_name_keeps_current_block() {
        let config = ConfigTree::new(json!({}));
        let resolver = SettingResolver::new(&config).for_block("core/image").for_block("");
        assert_eq!(resolver.block_name(), "core/image");
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let config = ConfigTree::new(json!({ "fontSizes": [{ "slug": "small", "size": 13 }] }));
        let results = SettingResolver::new(&config)
            .resolve_all(["typography.dropCap", "typography.fontSizes", "border.radius"]);

        let paths: Vec<_> = results.iter().map(|(p, _)| *p).collect();
        assert_eq!(paths, ["typography.dropCap", "typography.fontSizes", "border.radius"]);
        assert_eq!(results[0].1.as_deref(), Some(&json!(true)));
        assert_eq!(results[1].1.as_deref(), Some(&json!([{ "slug": "small", "size": 13 }])));
        assert!(results[2].1.is_none());
    }
}
