//! Route template matching logic.
//!
//! # Responsibilities
//! - Compile a route template (e.g. `/tasks/:id`) into a segment list
//! - Match concrete request paths against the compiled template
//! - Capture named `:param` segments
//!
//! # Design Decisions
//! - Literal segments compare exactly (case-sensitive)
//! - Segment counts must agree; no partial or prefix matches
//! - Empty segments are dropped on both sides, so `/tasks/` and `//tasks`
//!   normalize to `/tasks`; slash placement is not significant
//! - Pure function of (template, path); no side effects

use std::collections::HashMap;

/// Named parameters captured from a matched path.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Compile a template. Segments starting with `:` become named
    /// parameters; everything else is matched literally.
    pub fn new(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Match a concrete request path against this template.
    ///
    /// Returns the captured parameters on a match, `None` otherwise.
    pub fn capture(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let template = RouteTemplate::new("/tasks");

        assert_eq!(template.capture("/tasks"), Some(PathParams::new()));
        assert_eq!(template.capture("/tasks/"), Some(PathParams::new()));
        assert_eq!(template.capture("/users"), None);
        assert_eq!(template.capture("/tasks/123"), None);
    }

    #[test]
    fn test_param_capture() {
        let template = RouteTemplate::new("/tasks/:id");

        let params = template.capture("/tasks/abc-123").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("abc-123"));

        assert_eq!(template.capture("/tasks"), None);
        assert_eq!(template.capture("/tasks/abc/extra"), None);
        assert_eq!(template.capture("/users/abc"), None);
    }

    #[test]
    fn test_slash_placement_not_significant() {
        let template = RouteTemplate::new("/tasks/:id");

        for path in ["/tasks/7", "/tasks/7/", "//tasks/7"] {
            let params = template.capture(path).unwrap();
            assert_eq!(params.get("id").map(String::as_str), Some("7"));
        }
    }

    #[test]
    fn test_multiple_params() {
        let template = RouteTemplate::new("/tables/:table/records/:id");

        let params = template.capture("/tables/tasks/records/42").unwrap();
        assert_eq!(params.get("table").map(String::as_str), Some("tasks"));
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_literal_match_is_case_sensitive() {
        let template = RouteTemplate::new("/tasks");
        assert_eq!(template.capture("/Tasks"), None);
    }
}
