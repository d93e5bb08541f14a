/// Build the LiquipediaDB `conditions` filter selecting every given bracket
pub fn build_conditions<S: AsRef<str>>(bracket_ids: &[S]) -> String {
    bracket_ids
        .iter()
        .map(|id| format!("[[match2bracketid::{}]]", id.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_join_with_or() {
        let ids = ["25lqANNoNV", "HDFMCYPolL"];
        assert_eq!(
            build_conditions(&ids),
            "[[match2bracketid::25lqANNoNV]] OR [[match2bracketid::HDFMCYPolL]]"
        );
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(build_conditions(&["abc"]), "[[match2bracketid::abc]]");
        assert_eq!(build_conditions::<&str>(&[]), "");
    }
}
