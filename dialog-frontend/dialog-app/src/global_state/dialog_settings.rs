use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where an open dialog's markup is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    /// In place, inside the caller's subtree.
    Inline,
    /// Through a portal on `document.body`, clear of ancestor overflow and stacking contexts.
    Overlay,
}

impl Default for RenderTarget {
    fn default() -> Self {
        RenderTarget::Overlay
    }
}

impl RenderTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderTarget::Inline => "inline",
            RenderTarget::Overlay => "overlay",
        }
    }
}

impl FromStr for RenderTarget {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "inline" => RenderTarget::Inline,
            "overlay" | _ => RenderTarget::Overlay,
        })
    }
}

/// How the close control is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseStyle {
    Icon,
    Glyph,
}

impl Default for CloseStyle {
    fn default() -> Self {
        CloseStyle::Icon
    }
}

impl CloseStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseStyle::Icon => "icon",
            CloseStyle::Glyph => "glyph",
        }
    }
}

impl FromStr for CloseStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "glyph" => CloseStyle::Glyph,
            "icon" | _ => CloseStyle::Icon,
        })
    }
}

/// App-wide defaults for dialogs that don't pick their own target or close style.
/// Read each time a dialog opens.
#[derive(Clone, Copy)]
pub struct DialogSettings {
    pub render_target: RwSignal<RenderTarget>,
    pub close_style: RwSignal<CloseStyle>,
}

impl DialogSettings {
    pub fn new() -> Self {
        Self {
            render_target: RwSignal::new(RenderTarget::default()),
            close_style: RwSignal::new(CloseStyle::default()),
        }
    }

    pub fn set_render_target(&self, target: RenderTarget) {
        self.render_target.set(target);
    }

    pub fn set_close_style(&self, style: CloseStyle) {
        self.close_style.set(style);
    }
}

/// Provide DialogSettings into context if not already present and return it.
pub fn provide_dialog_settings() -> DialogSettings {
    if let Some(existing) = use_context::<DialogSettings>() {
        return existing;
    }
    let settings = DialogSettings::new();
    provide_context(settings);
    settings
}

pub fn use_dialog_settings() -> Option<DialogSettings> {
    use_context::<DialogSettings>()
}
