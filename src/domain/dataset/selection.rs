//! Dataset selection for a benchmark run

use std::collections::BTreeSet;

/// Name that selects every dataset in the manifest
pub const ALL_DATASETS: &str = "all";

/// Which datasets a run should evaluate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetSelection {
    #[default]
    All,
    Named(BTreeSet<String>),
}

impl DatasetSelection {
    /// Build a selection from CLI names; any occurrence of `all` (or no names) selects everything
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() || names.contains(ALL_DATASETS) {
            Self::All
        } else {
            Self::Named(names)
        }
    }

    pub fn includes(&self, dataset_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(names) => names.contains(dataset_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_selects_everything() {
        let selection = DatasetSelection::from_names(["news", ALL_DATASETS]);
        assert_eq!(selection, DatasetSelection::All);
        assert!(selection.includes("anything"));
    }

    #[test]
    fn test_empty_selection_defaults_to_all() {
        let selection = DatasetSelection::from_names(Vec::<String>::new());
        assert_eq!(selection, DatasetSelection::All);
    }

    #[test]
    fn test_named_selection() {
        let selection = DatasetSelection::from_names(["travel"]);
        assert!(selection.includes("travel"));
        assert!(!selection.includes("news"));
    }
}
