/// Splits a path into its non-empty `/`-separated segments.
///
/// Leading, trailing and repeated slashes are ignored. Nothing is decoded or
/// validated, so any input yields a (possibly empty) list of segments.
pub fn tokenize(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn test_tokenize() {
        let tests: [(&str, &[&str]); 9] = [
            ("", &[]),
            ("/", &[]),
            ("//", &[]),
            ("/player", &["player"]),
            ("player", &["player"]),
            ("/player/1", &["player", "1"]),
            ("/player/1/", &["player", "1"]),
            ("//player///1", &["player", "1"]),
            ("/a%2Fb/:x/ ", &["a%2Fb", ":x", " "]),
        ];

        for (path, want) in tests {
            assert_eq!(tokenize(path), want, "path: {:?}", path);
        }
    }

    #[test]
    fn test_tokenize_ignores_slash_placement() {
        assert_eq!(tokenize("/a/b/"), tokenize("a/b"));
        assert_eq!(tokenize("a/b"), vec!["a", "b"]);
    }
}
