use std::collections::HashMap;

/// Counts of every n-gram of length 1..=max_order
pub(crate) fn ngram_counts(tokens: &[String], max_order: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();

    for order in 1..=max_order {
        for window in tokens.windows(order) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_counts_by_order() {
        let t = tokens("a b a b");
        let counts = ngram_counts(&t, 2);

        assert_eq!(counts[&t[0..1]], 2);
        assert_eq!(counts[&t[0..2]], 2);
        assert_eq!(counts[&t[1..3]], 1);
    }

    #[test]
    fn test_order_longer_than_text() {
        let t = tokens("a");
        assert_eq!(ngram_counts(&t, 4).len(), 1);
    }
}
