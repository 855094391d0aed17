use std::{cmp::Ordering, collections::HashMap};

use tracing::debug;

use crate::error::RouteError;

use super::{
    template::{MatchMode, RouteTemplate},
    RouteHandler,
};

pub struct RouteEntry {
    template: RouteTemplate,
    handler: Box<dyn RouteHandler + Send + Sync>,
}

impl RouteEntry {
    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    pub fn handler(&self) -> &(dyn RouteHandler + Send + Sync) {
        self.handler.as_ref()
    }
}

/// GET routes bucketed by arity.
///
/// Each bucket is kept sorted by specificity so the matcher can stop at the
/// first template that accepts a path.
pub struct RouteTable {
    mode: MatchMode,
    buckets: HashMap<usize, Vec<RouteEntry>>,
}

impl RouteTable {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            buckets: HashMap::new(),
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn register(
        &mut self,
        template: RouteTemplate,
        handler: impl RouteHandler + Send + Sync + 'static,
    ) -> Result<(), RouteError> {
        let arity = template.arity();
        let bucket = self.buckets.entry(arity).or_default();

        match self.mode {
            MatchMode::Arity => {
                if let Some(existing) = bucket.first() {
                    return Err(RouteError::AmbiguousArity {
                        template: template.pattern().to_owned(),
                        existing: existing.template.pattern().to_owned(),
                        arity,
                    });
                }
            }
            MatchMode::Literal => {
                if let Some(existing) = bucket.iter().find(|e| e.template.conflicts_with(&template))
                {
                    return Err(RouteError::Conflict {
                        template: template.pattern().to_owned(),
                        existing: existing.template.pattern().to_owned(),
                    });
                }
            }
        }

        let idx = bucket
            .partition_point(|e| e.template.cmp_specificity(&template) != Ordering::Greater);
        debug!(pattern = template.pattern(), arity, "route registered");
        bucket.insert(
            idx,
            RouteEntry {
                template,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Candidates registered for `arity`, most specific first.
    pub fn lookup(&self, arity: usize) -> Option<&[RouteEntry]> {
        self.buckets
            .get(&arity)
            .filter(|bucket| !bucket.is_empty())
            .map(|bucket| bucket.as_slice())
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
