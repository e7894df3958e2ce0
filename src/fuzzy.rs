// ABOUTME: Fuzzy matching used to narrow the interactive group and machine lists
// ABOUTME: Ranks exact, prefix, substring, then in-order character matches

pub struct SearchEngine<'a> {
    labels: &'a [String],
}

impl<'a> SearchEngine<'a> {
    pub fn new(labels: &'a [String]) -> Self {
        Self { labels }
    }

    /// Indices into the label list, best match first. Ties keep list order.
    pub fn search(&self, query: &str, case_sensitive: bool) -> Vec<usize> {
        if query.is_empty() {
            return (0..self.labels.len()).collect();
        }

        let mut results: Vec<(usize, usize)> = self
            .labels
            .iter()
            .enumerate()
            .filter_map(|(index, label)| {
                let score = calculate_fuzzy_score(label, query, case_sensitive);
                (score > 0).then_some((index, score))
            })
            .collect();

        results.sort_by(|a, b| b.1.cmp(&a.1));
        results.into_iter().map(|(index, _)| index).collect()
    }
}

fn calculate_fuzzy_score(target: &str, query: &str, case_sensitive: bool) -> usize {
    let (target, query) = if case_sensitive {
        (target.to_string(), query.to_string())
    } else {
        (target.to_lowercase(), query.to_lowercase())
    };

    if target == query {
        return 1000;
    }

    if let Some(remainder) = target.strip_prefix(query.as_str()) {
        let mut score = 900 + (50 - target.len().min(50));
        if remainder.chars().next().is_some_and(|c| !c.is_alphanumeric()) {
            score += 50;
        }
        return score;
    }

    if let Some(position) = target.find(query.as_str()) {
        return 700 - position.min(100);
    }

    // All query characters must appear in order.
    let mut score = 0;
    let mut query_chars = query.chars().peekable();
    let mut consecutive = 0;
    let mut first_match = None;

    for (i, c) in target.chars().enumerate() {
        match query_chars.peek() {
            Some(&qc) if qc == c => {
                first_match.get_or_insert(i);
                score += 100 + consecutive * 10;
                consecutive += 1;
                query_chars.next();
            }
            Some(_) => consecutive = 0,
            None => break,
        }
    }

    match (query_chars.peek(), first_match) {
        (None, Some(0)) => score + 50,
        (None, Some(_)) => score,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let names = labels(&["web", "db", "cache"]);
        let engine = SearchEngine::new(&names);
        assert_eq!(engine.search("", false), vec![0, 1, 2]);
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let names = labels(&["prod-backup", "prod", "staging"]);
        let engine = SearchEngine::new(&names);
        let results = engine.search("prod", false);

        assert_eq!(results, vec![1, 0]);
    }

    #[test]
    fn test_fuzzy_match() {
        let names = labels(&["development-server", "test-server", "devops"]);
        let engine = SearchEngine::new(&names);
        let results = engine.search("dvs", false);

        assert_eq!(results.len(), 2);
        assert!(results.contains(&0));
        assert!(results.contains(&2));
    }

    #[test]
    fn test_case_sensitivity() {
        let names = labels(&["Office", "office-annex"]);
        let engine = SearchEngine::new(&names);

        assert_eq!(engine.search("office", false).len(), 2);
        assert_eq!(engine.search("office", true), vec![1]);
    }

    #[test]
    fn test_no_match() {
        let names = labels(&["alpha", "beta"]);
        let engine = SearchEngine::new(&names);
        assert!(engine.search("zzz", false).is_empty());
    }

    #[test]
    fn test_prefix_beats_substring() {
        let names = labels(&["my-git", "git.internal"]);
        let engine = SearchEngine::new(&names);
        assert_eq!(engine.search("git", false), vec![1, 0]);
    }
}
