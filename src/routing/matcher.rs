//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile patterns like `/api/users/{id}` into segments
//! - Match a request path segment by segment
//! - Extract typed parameters
//!
//! # Design Decisions
//! - Whole-path matching: no prefixes, no trailing-slash folding
//! - Path matching is case-sensitive
//! - No regex; parameters are decimal integers only

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// One or more ASCII digits, captured as `u64`.
    Id,
}

/// Parameters captured by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    pub id: Option<u64>,
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. `{id}` marks the numeric parameter; everything
    /// else is literal.
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|seg| match seg {
                "{id}" => Segment::Id,
                other => Segment::Literal(other.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match `path`, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::default();
        let mut parts = split_path(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Id => params.id = Some(parse_id(part)?),
            }
        }

        // Leftover segments mean the path is longer than the pattern
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

fn split_path(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

fn parse_id(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
