//! Mobile navigation toggle.
//!
//! The desktop `.nav-desktop` menu doubles as the mobile flyout. Visibility
//! is tracked here rather than read back from the element's inline style.

/// Inline styles applied to the menu when it opens as a flyout.
pub const FLYOUT_STYLES: &[(&str, &str)] = &[
    ("display", "flex"),
    ("position", "absolute"),
    ("top", "80px"),
    ("left", "0"),
    ("width", "100%"),
    ("background-color", "#fff"),
    ("padding", "20px"),
    ("box-shadow", "0 5px 10px rgba(0,0,0,0.1)"),
    ("z-index", "999"),
];

/// Applied to the menu's `ul` so entries stack vertically.
pub const FLYOUT_LIST_STYLES: &[(&str, &str)] = &[("flex-direction", "column")];

/// Applied to every `li` in the flyout.
pub const FLYOUT_ITEM_STYLES: &[(&str, &str)] = &[("margin", "10px 0")];

pub const HIDDEN_STYLES: &[(&str, &str)] = &[("display", "none")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavVisibility {
    #[default]
    Hidden,
    Open,
}

impl NavVisibility {
    pub fn menu_styles(self) -> &'static [(&'static str, &'static str)] {
        match self {
            NavVisibility::Hidden => HIDDEN_STYLES,
            NavVisibility::Open => FLYOUT_STYLES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    visibility: NavVisibility,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> NavVisibility {
        self.visibility
    }

    /// Flip the menu and return the new visibility.
    pub fn toggle(&mut self) -> NavVisibility {
        self.visibility = match self.visibility {
            NavVisibility::Hidden => NavVisibility::Open,
            NavVisibility::Open => NavVisibility::Hidden,
        };
        self.visibility
    }
}
