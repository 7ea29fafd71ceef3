//! Named style overrides applied by the chart renderer.

use std::fmt;

use serde_json::{json, Value};

/// A named theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Colored series on a white background.
    #[default]
    Default,
    /// Black on white, for e-ink and print.
    Monochrome,
}

impl Theme {
    /// Resolves a theme name.
    ///
    /// Only `"monochrome"` is recognized; any other name, or none, selects
    /// the default theme.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("monochrome") => Self::Monochrome,
            _ => Self::Default,
        }
    }

    /// Name of the theme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Monochrome => "monochrome",
        }
    }

    /// The style override document for this theme.
    pub fn overrides(&self) -> Value {
        match self {
            Self::Default => json!({ "backgroundColor": "#FFF" }),
            Self::Monochrome => json!({
                "color": ["#000"],
                "backgroundColor": "#FFF",
                "textStyle": { "color": "#000" },
                "title": {
                    "textStyle": { "color": "#000" },
                    "subtextStyle": { "color": "#000" }
                },
                "axisLine": { "lineStyle": { "color": "#000" } },
                "axisTick": { "lineStyle": { "color": "#000" } },
                "axisLabel": { "color": "#000" },
                "splitLine": {
                    "lineStyle": { "color": "#000", "type": "dashed" }
                },
                "splitArea": {
                    "areaStyle": { "color": ["#FFF", "#FFF"] }
                },
                "toolbox": { "iconStyle": { "borderColor": "#000" } },
                "legend": { "textStyle": { "color": "#000" } }
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
