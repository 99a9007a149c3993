/// Splits a raw query into lowercase search tokens.
///
/// Pieces are separated on single spaces and trimmed of surrounding spaces and
/// tabs. Repeated spaces yield empty tokens; they are kept, and an empty token
/// matches any name.
#[must_use]
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(' ')
        .map(|piece| piece.trim_matches([' ', '\t']).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_spaces() {
        assert_eq!(tokenize("CPU Load"), vec!["cpu", "load"]);
    }

    #[test]
    fn trims_tabs_around_pieces() {
        assert_eq!(tokenize("\tcpu\t load"), vec!["cpu", "load"]);
    }

    #[test]
    fn keeps_empty_pieces_from_repeated_spaces() {
        assert_eq!(tokenize("cpu  load"), vec!["cpu", "", "load"]);
    }

    #[test]
    fn empty_query_yields_single_empty_token() {
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn retokenizing_joined_tokens_is_stable() {
        for query in ["CPU Load Avg", "  web\tfront ", "a  b", "Ünïcode Nâme"] {
            let tokens = tokenize(query);
            assert_eq!(tokenize(&tokens.join(" ")), tokens, "query: {query:?}");
        }
    }
}
