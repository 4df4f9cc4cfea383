//! Adapters for legacy, flat editor settings.
//!
//! Before the `__experimentalFeatures` namespace existed, editor settings
//! were flat flags such as `disableCustomColors`. Each adapter maps one
//! dotted setting path to the legacy flag that used to control it.

use std::borrow::Cow;

use serde_json::Value;

use super::config::{ConfigTree, is_truthy};

/// Units offered when the legacy `enableCustomUnits` flag is `true`.
pub const DEFAULT_SPACING_UNITS: [&str; 5] = ["px", "em", "rem", "vh", "vw"];

/// A deprecated flag that can still answer a setting lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeprecatedFlag {
    /// `color.palette` from `colors`
    ColorPalette,
    /// `color.gradients` from `gradients`
    ColorGradients,
    /// `color.custom` from `!disableCustomColors`
    ColorCustom,
    /// `color.customGradient` from `!disableCustomGradients`
    ColorCustomGradient,
    /// `typography.fontSizes` from `fontSizes`
    TypographyFontSizes,
    /// `typography.customFontSize` from `!disableCustomFontSizes`
    TypographyCustomFontSize,
    /// `typography.customLineHeight` from `enableCustomLineHeight`
    TypographyCustomLineHeight,
    /// `spacing.units` from `enableCustomUnits`
    SpacingUnits,
    /// `spacing.customPadding` from `enableCustomSpacing`
    SpacingCustomPadding,
}

impl DeprecatedFlag {
    /// Every adapter, in table order
    pub const ALL: [Self; 9] = [
        Self::ColorPalette,
        Self::ColorGradients,
        Self::ColorCustom,
        Self::ColorCustomGradient,
        Self::TypographyFontSizes,
        Self::TypographyCustomFontSize,
        Self::TypographyCustomLineHeight,
        Self::SpacingUnits,
        Self::SpacingCustomPadding,
    ];

    /// Find the adapter registered for a setting path
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.path() == path)
    }

    /// Setting path this adapter answers
    pub const fn path(self) -> &'static str {
        match self {
            Self::ColorPalette => "color.palette",
            Self::ColorGradients => "color.gradients",
            Self::ColorCustom => "color.custom",
            Self::ColorCustomGradient => "color.customGradient",
            Self::TypographyFontSizes => "typography.fontSizes",
            Self::TypographyCustomFontSize => "typography.customFontSize",
            Self::TypographyCustomLineHeight => "typography.customLineHeight",
            Self::SpacingUnits => "spacing.units",
            Self::SpacingCustomPadding => "spacing.customPadding",
        }
    }

    /// Legacy top-level settings key the adapter reads
    pub const fn legacy_key(self) -> &'static str {
        match self {
            Self::ColorPalette => "colors",
            Self::ColorGradients => "gradients",
            Self::ColorCustom => "disableCustomColors",
            Self::ColorCustomGradient => "disableCustomGradients",
            Self::TypographyFontSizes => "fontSizes",
            Self::TypographyCustomFontSize => "disableCustomFontSizes",
            Self::TypographyCustomLineHeight => "enableCustomLineHeight",
            Self::SpacingUnits => "enableCustomUnits",
            Self::SpacingCustomPadding => "enableCustomSpacing",
        }
    }

    /// Whether the legacy flag is phrased negatively (`disable*`)
    pub const fn is_inverted(self) -> bool {
        matches!(
            self,
            Self::ColorCustom | Self::ColorCustomGradient | Self::TypographyCustomFontSize
        )
    }

    /// Derive the setting value from the legacy settings.
    ///
    /// An absent legacy key always yields `None`.
    pub fn apply(self, config: &ConfigTree) -> Option<Cow<'_, Value>> {
        let legacy = config.field(self.legacy_key())?;

        if self.is_inverted() {
            return Some(Cow::Owned(Value::Bool(!is_truthy(legacy))));
        }

        match (self, legacy) {
            (Self::SpacingUnits, Value::Bool(true)) => Some(Cow::Owned(Value::from(
                DEFAULT_SPACING_UNITS.to_vec(),
            ))),
            _ => Some(Cow::Borrowed(legacy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(flag: DeprecatedFlag, settings: Value) -> Option<Value> {
        let config = ConfigTree::new(settings);
        flag.apply(&config).map(Cow::into_owned)
    }

    #[test]
    fn test_table_covers_every_path() {
        for flag in DeprecatedFlag::ALL {
            assert_eq!(DeprecatedFlag::from_path(flag.path()), Some(flag));
        }
        assert_eq!(DeprecatedFlag::from_path("typography.dropCap"), None);
        assert_eq!(DeprecatedFlag::from_path("color"), None);
    }

    #[test]
    fn test_pass_through_adapters() {
        let palette = json!([{ "slug": "red", "color": "#f00" }]);
        assert_eq!(
            apply(DeprecatedFlag::ColorPalette, json!({ "colors": palette.clone() })),
            Some(palette)
        );
        assert_eq!(
            apply(DeprecatedFlag::TypographyCustomLineHeight, json!({ "enableCustomLineHeight": false })),
            Some(json!(false))
        );
        assert_eq!(
            apply(DeprecatedFlag::SpacingCustomPadding, json!({ "enableCustomSpacing": true })),
            Some(json!(true))
        );
        assert_eq!(apply(DeprecatedFlag::ColorGradients, json!({})), None);
    }

    #[test]
    fn test_inverted_adapters() {
        assert_eq!(
            apply(DeprecatedFlag::ColorCustom, json!({ "disableCustomColors": true })),
            Some(json!(false))
        );
        assert_eq!(
            apply(DeprecatedFlag::ColorCustomGradient, json!({ "disableCustomGradients": false })),
            Some(json!(true))
        );
        assert_eq!(
            apply(DeprecatedFlag::TypographyCustomFontSize, json!({ "disableCustomFontSizes": null })),
            Some(json!(true))
        );
        assert_eq!(apply(DeprecatedFlag::ColorCustom, json!({})), None);
        assert_eq!(apply(DeprecatedFlag::ColorCustomGradient, json!({})), None);
    }

    #[test]
    fn test_spacing_units() {
        assert_eq!(
            apply(DeprecatedFlag::SpacingUnits, json!({ "enableCustomUnits": true })),
            Some(json!(["px", "em", "rem", "vh", "vw"]))
        );
        assert_eq!(
            apply(DeprecatedFlag::SpacingUnits, json!({ "enableCustomUnits": ["px", "%"] })),
            Some(json!(["px", "%"]))
        );
        assert_eq!(
            apply(DeprecatedFlag::SpacingUnits, json!({ "enableCustomUnits": false })),
            Some(json!(false))
        );
        assert_eq!(apply(DeprecatedFlag::SpacingUnits, json!({})), None);
    }
}
