use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::RouteTableError;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Named path parameters captured by a match, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled URL pattern such as `/projects/:project_name/:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    segments: Vec<Segment>,
}

impl UrlPattern {
    /// Compiles `pattern` for the route called `name` (used in errors).
    pub fn parse(name: &str, pattern: &str) -> Result<Self, RouteTableError> {
        if !pattern.starts_with('/') {
            return Err(RouteTableError::NotAbsolute {
                name: name.to_string(),
                pattern: pattern.to_string(),
            });
        }

        let mut segments = Vec::new();
        for part in split_path(pattern) {
            match part.strip_prefix(':') {
                Some("") => {
                    return Err(RouteTableError::EmptyParam {
                        name: name.to_string(),
                        pattern: pattern.to_string(),
                    })
                }
                Some(param) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(p) if p == param))
                    {
                        return Err(RouteTableError::DuplicateParam {
                            name: name.to_string(),
                            param: param.to_string(),
                        });
                    }
                    segments.push(Segment::Param(param.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }
        Ok(UrlPattern { segments })
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(p) => Some(p.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Matches an already normalized path, returning the decoded parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8_lossy().into_owned();
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Builds a concrete path from parameter values; `None` if one is missing or empty.
    pub fn format(&self, params: &[(&str, &str)]) -> Option<String> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(k, _)| k == name)
                        .map(|(_, v)| *v)
                        .filter(|v| !v.is_empty())?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}

/// Splits a path into segments. The root path has none and one trailing slash is ignored.
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let mut parts = Some(trimmed).filter(|t| !t.is_empty()).map(|t| t.split('/'));
    std::iter::from_fn(move || parts.as_mut().and_then(Iterator::next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern_matches_root_only() {
        let root = UrlPattern::parse("home", "/").unwrap();
        assert_eq!(root.matches("/"), Some(Params::new()));
        assert_eq!(root.matches(""), Some(Params::new()));
        assert_eq!(root.matches("/about"), None);
    }

    #[test]
    fn test_named_params_captured() {
        let pattern = UrlPattern::parse("testCase", "/projects/:project_name/:name").unwrap();
        let params = pattern.matches("/projects/functest/vping_ssh").unwrap();
        assert_eq!(params["project_name"], "functest");
        assert_eq!(params["name"], "vping_ssh");
        assert_eq!(
            pattern.param_names().collect::<Vec<_>>(),
            vec!["project_name", "name"]
        );
    }

    #[test]
    fn test_params_are_percent_decoded() {
        let pattern = UrlPattern::parse("pod", "/pods/:name").unwrap();
        let params = pattern.matches("/pods/zte%20pod%2F1").unwrap();
        assert_eq!(params["name"], "zte pod/1");
    }

    #[test]
    fn test_segment_count_must_agree() {
        let pattern = UrlPattern::parse("pod", "/pods/:name").unwrap();
        assert_eq!(pattern.matches("/pods"), None);
        assert_eq!(pattern.matches("/pods/a/b"), None);
        assert_eq!(pattern.matches("/pods//"), None);
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        let pattern = UrlPattern::parse("pods", "/pods").unwrap();
        assert!(pattern.matches("/pods/").is_some());
        let pattern = UrlPattern::parse("pod", "/pods/:name").unwrap();
        assert_eq!(pattern.matches("/pods/x/").unwrap()["name"], "x");
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        assert!(matches!(
            UrlPattern::parse("bad", "pods"),
            Err(RouteTableError::NotAbsolute { .. })
        ));
        assert!(matches!(
            UrlPattern::parse("bad", "/pods/:"),
            Err(RouteTableError::EmptyParam { .. })
        ));
        assert!(matches!(
            UrlPattern::parse("bad", "/x/:id/:id"),
            Err(RouteTableError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_format_fills_and_encodes_params() {
        let pattern = UrlPattern::parse("testCase", "/projects/:project_name/:name").unwrap();
        assert_eq!(
            pattern.format(&[("name", "tc 1"), ("project_name", "functest")]),
            Some("/projects/functest/tc%201".to_string())
        );
        assert_eq!(pattern.format(&[("name", "tc")]), None);
        assert_eq!(pattern.format(&[("name", ""), ("project_name", "p")]), None);
        assert_eq!(
            UrlPattern::parse("home", "/").unwrap().format(&[]),
            Some("/".to_string())
        );
    }
}
