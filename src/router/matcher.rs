use super::{params::Params, path::tokenize, table::RouteTable, RouteHandler};

pub struct Match<'a> {
    pub pattern: &'a str,
    pub handler: &'a (dyn RouteHandler + Send + Sync),
    pub params: Params,
}

impl std::fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Resolves `request_target` against the GET routes in `table`.
///
/// Only templates with the same arity as the path are candidates. They are
/// tried most specific first and the first one that accepts the path wins.
pub fn pattern_match<'a>(table: &'a RouteTable, request_target: &str) -> Option<Match<'a>> {
    let path = tokenize(request_target);
    let candidates = table.lookup(path.len())?;

    candidates.iter().find_map(|entry| {
        let params = entry.template().capture(&path)?;
        Some(Match {
            pattern: entry.template().pattern(),
            handler: entry.handler(),
            params,
        })
    })
}

#[cfg(test)]
mod tests {
    use crate::router::{
        noop_route_handler,
        table::RouteTable,
        template::{MatchMode, RouteTemplate},
    };

    use super::pattern_match;

    fn table(mode: MatchMode, patterns: &[&str]) -> RouteTable {
        let mut table = RouteTable::new(mode);
        for pattern in patterns {
            let template = RouteTemplate::parse(*pattern, mode).unwrap();
            table.register(template, noop_route_handler()).unwrap();
        }
        table
    }

    #[test]
    fn test_arity_match() {
        let table = table(MatchMode::Arity, &["/resource", "/resource/id"]);

        let tests: [(&str, &str, &[(&str, &str)]); 5] = [
            ("/player/1", "/resource/id", &[("resource", "player"), ("id", "1")]),
            ("/player", "/resource", &[("resource", "player")]),
            ("player/", "/resource", &[("resource", "player")]),
            ("//order//42/", "/resource/id", &[("resource", "order"), ("id", "42")]),
            ("/user/5", "/resource/id", &[("resource", "user"), ("id", "5")]),
        ];

        for (request_target, pattern, want) in tests {
            let m = pattern_match(&table, request_target).unwrap();
            assert_eq!(m.pattern, pattern);
            assert_eq!(m.params.iter().collect::<Vec<_>>(), want);
        }
    }

    #[test]
    fn test_arity_no_match() {
        let table = table(MatchMode::Arity, &["/resource", "/resource/id"]);

        assert!(pattern_match(&table, "/").is_none());
        assert!(pattern_match(&table, "").is_none());
        assert!(pattern_match(&table, "/player/1/extra").is_none());
    }

    #[test]
    fn test_literal_match() {
        let table = table(
            MatchMode::Literal,
            &["/players/:id", "/players/me", "/orders/:id", "/:resource/:id"],
        );

        let tests: [(&str, &str, &[(&str, &str)]); 4] = [
            ("/players/7", "/players/:id", &[("id", "7")]),
            ("/players/me", "/players/me", &[]),
            ("/orders/7", "/orders/:id", &[("id", "7")]),
            ("/users/5", "/:resource/:id", &[("resource", "users"), ("id", "5")]),
        ];

        for (request_target, pattern, want) in tests {
            let m = pattern_match(&table, request_target).unwrap();
            assert_eq!(m.pattern, pattern);
            assert_eq!(m.params.iter().collect::<Vec<_>>(), want);
        }
    }

    #[test]
    fn test_literal_no_match() {
        let table = table(MatchMode::Literal, &["/players/:id", "/orders"]);

        assert!(pattern_match(&table, "/users/5").is_none());
        assert!(pattern_match(&table, "/players").is_none());
        assert!(pattern_match(&table, "/orders/1").is_none());
    }
}
