//! URL fragment routing. There is one wildcard route, `*filter`.

use crate::filter::Filter;

#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    /// Extract the wildcard token from a location fragment.
    ///
    /// `"#/active"`, `"/active"` and `"active"` all yield `"active"`.
    #[must_use]
    pub fn token(fragment: &str) -> &str {
        let rest = fragment.trim();
        let rest = rest.strip_prefix('#').unwrap_or(rest);
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        rest.trim_end_matches('/')
    }

    /// Resolve a fragment to the filter it selects.
    #[must_use]
    pub fn route(fragment: &str) -> Filter {
        Filter::from_token(Self::token(fragment))
    }
}
