use std::fmt;

/// Which items the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Map a route token to a filter. Anything unrecognized means `All`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    /// The route token for this filter (`""` for `All`).
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Link target of the footer filter link.
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    /// Footer link label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Whether an item with this completion state is hidden.
    #[must_use]
    pub const fn hides(self, completed: bool) -> bool {
        matches!(
            (self, completed),
            (Self::Completed, false) | (Self::Active, true)
        )
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

/// The page-wide visibility filter.
///
/// Not persisted: a reload starts at `All` until the router says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    current: Filter,
}

impl FilterState {
    #[must_use]
    pub const fn current(&self) -> Filter {
        self.current
    }

    /// Switch filters. Returns whether the value changed.
    pub fn set(&mut self, next: Filter) -> bool {
        if self.current == next {
            return false;
        }
        tracing::debug!(from = %self.current, to = %next, "filter changed");
        self.current = next;
        true
    }
}
