/// Light or dark presentation of the dashboard and its charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Value for the `data-theme` attribute on the page root.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Theme::Light => "#fafafa",
            Theme::Dark => "#121212",
        }
    }

    pub fn surface(&self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#1e1e1e",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Theme::Light => "rgba(0, 0, 0, 0.87)",
            Theme::Dark => "#ffffff",
        }
    }

    pub fn grid(&self) -> &'static str {
        match self {
            Theme::Light => "#eeeeee",
            Theme::Dark => "#333333",
        }
    }
}
