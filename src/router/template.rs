use std::{cmp::Ordering, collections::HashSet};

use clap::ValueEnum;
use strum_macros::Display;

use crate::error::RouteError;

use super::{params::Params, path::tokenize};

const CAPTURE_SIGIL: char = ':';

/// How template segments are interpreted.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum MatchMode {
    /// `:name` segments capture, every other segment must match literally.
    #[default]
    Literal,
    /// Every segment captures. Routes are told apart by segment count only,
    /// so at most one template may be registered per arity.
    Arity,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Segment {
    Literal(String),
    Capture(String),
}

impl Segment {
    fn parse(raw: &str, mode: MatchMode) -> Option<Self> {
        match (mode, raw.strip_prefix(CAPTURE_SIGIL)) {
            (_, Some("")) => None,
            (_, Some(name)) => Some(Self::Capture(name.to_owned())),
            (MatchMode::Arity, None) => Some(Self::Capture(raw.to_owned())),
            (MatchMode::Literal, None) => Some(Self::Literal(raw.to_owned())),
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Two segments overlap when no incoming value could tell them apart.
    fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(l), Self::Literal(r)) => l == r,
            (Self::Capture(_), Self::Capture(_)) => true,
            _ => false,
        }
    }
}

/// A registered path pattern, e.g. `/:resource/:id` or `/players/:id`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RouteTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    pub fn parse(pattern: impl Into<String>, mode: MatchMode) -> Result<Self, RouteError> {
        let pattern = pattern.into();

        let mut segments = vec![];
        let mut names = HashSet::new();
        for raw in tokenize(&pattern) {
            let Some(segment) = Segment::parse(raw, mode) else {
                return Err(RouteError::UnnamedCapture {
                    template: pattern.clone(),
                });
            };
            if let Segment::Capture(name) = &segment {
                if !names.insert(name.clone()) {
                    return Err(RouteError::DuplicateCapture {
                        template: pattern.clone(),
                        name: name.clone(),
                    });
                }
            }
            segments.push(segment);
        }

        if segments.is_empty() {
            return Err(RouteError::EmptyTemplate { template: pattern });
        }

        Ok(Self { pattern, segments })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn arity(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Pairs each segment with the value at the same position of `path`.
    ///
    /// Returns `None` if the arity differs or a literal segment does not
    /// match.
    pub fn capture(&self, path: &[&str]) -> Option<Params> {
        if path.len() != self.arity() {
            return None;
        }

        let mut params = Params::with_capacity(self.arity());
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) if literal.as_str() != *value => return None,
                Segment::Literal(_) => {}
                Segment::Capture(name) => params.push(name.as_str(), *value),
            }
        }
        Some(params)
    }

    /// True when both templates accept exactly the same paths.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.arity() == other.arity()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(l, r)| l.overlaps(r))
    }

    /// Orders templates so that, going left to right, the first position
    /// where they differ in kind puts the literal ahead of the capture.
    pub fn cmp_specificity(&self, other: &Self) -> Ordering {
        let kinds = |t: &Self| t.segments.iter().map(|s| !s.is_literal()).collect::<Vec<_>>();
        kinds(self).cmp(&kinds(other))
    }
}
