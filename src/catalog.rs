use crate::show::ShowRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    #[value(name = "none")]
    None,
    #[value(name = "name_asc")]
    NameAsc,
    #[value(name = "name_desc")]
    NameDesc,
    #[value(name = "rating_asc")]
    RatingAsc,
    #[value(name = "rating_desc")]
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        Self::None,
        Self::NameAsc,
        Self::NameDesc,
        Self::RatingAsc,
        Self::RatingDesc,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::None => Self::NameAsc,
            Self::NameAsc => Self::NameDesc,
            Self::NameDesc => Self::RatingAsc,
            Self::RatingAsc => Self::RatingDesc,
            Self::RatingDesc => Self::None,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::None => Self::RatingDesc,
            Self::NameAsc => Self::None,
            Self::NameDesc => Self::NameAsc,
            Self::RatingAsc => Self::NameDesc,
            Self::RatingDesc => Self::RatingAsc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Unsorted",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::RatingAsc => "Rating (low-high)",
            Self::RatingDesc => "Rating (high-low)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::RatingAsc => "rating_asc",
            Self::RatingDesc => "rating_desc",
        }
    }

    fn compare(self, a: &ShowRecord, b: &ShowRecord) -> Ordering {
        match self {
            Self::None => Ordering::Equal,
            Self::NameAsc => fold(&a.name).cmp(&fold(&b.name)),
            Self::NameDesc => fold(&b.name).cmp(&fold(&a.name)),
            Self::RatingAsc => a.sort_rating().total_cmp(&b.sort_rating()),
            Self::RatingDesc => b.sort_rating().total_cmp(&a.sort_rating()),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown sort mode: {s}"))
    }
}

pub const ALL_GENRES_LABEL: &str = "All genres";

/// Genre restriction. `All` is the selector's leading sentinel option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    /// Maps the user-facing value to a filter; "all" is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_GENRES_LABEL,
            Self::Only(g) => g,
        }
    }
}

/// Current user selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search_term: String,
    pub genre: GenreFilter,
    pub sort: SortMode,
}

impl Criteria {
    /// Search term as used for matching: trimmed and lower-cased.
    pub fn normalized_search(&self) -> String {
        fold(self.search_term.trim())
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Apply `criteria` to the full catalog.
///
/// Always starts from `catalog`, never from a previous result, so repeated
/// calls with the same criteria give the same output. The sort is stable:
/// ties keep catalog order.
pub fn select<'a>(catalog: &'a [ShowRecord], criteria: &Criteria) -> Vec<&'a ShowRecord> {
    let needle = criteria.normalized_search();

    let mut selected: Vec<&ShowRecord> = catalog
        .iter()
        .filter(|show| needle.is_empty() || fold(&show.name).contains(&needle))
        .filter(|show| match &criteria.genre {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => show.has_genre(genre),
        })
        .collect();

    if criteria.sort != SortMode::None {
        selected.sort_by(|a, b| criteria.sort.compare(a, b));
    }

    selected
}

/// Distinct genres across the whole catalog, ascending.
pub fn genre_vocabulary(catalog: &[ShowRecord]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|show| show.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::show::Rating;
    use proptest::prelude::*;

    pub(crate) fn show(id: u64, name: &str, genres: &[&str], rating: Option<f64>) -> ShowRecord {
        let mut s = ShowRecord::new(id, name);
        s.genres = genres.iter().map(|g| g.to_string()).collect();
        s.rating = rating.map(|average| Rating {
            average: Some(average),
        });
        s
    }

    fn scenario_catalog() -> Vec<ShowRecord> {
        vec![
            show(1, "Zeta", &["Drama"], None),
            show(2, "Alpha", &["Comedy"], Some(8.0)),
        ]
    }

    fn names(selected: &[&ShowRecord]) -> Vec<String> {
        selected.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            sort: SortMode::NameAsc,
            ..Default::default()
        };
        assert_eq!(names(&select(&catalog, &criteria)), ["Alpha", "Zeta"]);
    }

    #[test]
    fn test_sort_by_rating_descending_treats_unrated_as_zero() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            sort: SortMode::RatingDesc,
            ..Default::default()
        };
        assert_eq!(names(&select(&catalog, &criteria)), ["Alpha", "Zeta"]);

        let criteria = Criteria {
            sort: SortMode::RatingAsc,
            ..Default::default()
        };
        assert_eq!(names(&select(&catalog, &criteria)), ["Zeta", "Alpha"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            search_term: "zet".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&select(&catalog, &criteria)), ["Zeta"]);

        let criteria = Criteria {
            search_term: "  ALP ".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&select(&catalog, &criteria)), ["Alpha"]);
    }

    #[test]
    fn test_genre_filter_exact_match() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            genre: GenreFilter::Only("Comedy".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&select(&catalog, &criteria)), ["Alpha"]);

        let criteria = Criteria {
            genre: GenreFilter::Only("comedy".to_string()),
            ..Default::default()
        };
        assert!(select(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_no_match_and_empty_catalog_yield_empty() {
        let catalog = scenario_catalog();
        let criteria = Criteria {
            search_term: "nothing like this".to_string(),
            ..Default::default()
        };
        assert!(select(&catalog, &criteria).is_empty());
        assert!(select(&[], &Criteria::default()).is_empty());
    }

    #[test]
    fn test_name_sort_is_case_folded() {
        let catalog = vec![
            show(1, "banana", &[], None),
            show(2, "Apple", &[], None),
            show(3, "cherry", &[], None),
        ];
        let criteria = Criteria {
            sort: SortMode::NameDesc,
            ..Default::default()
        };
        assert_eq!(
            names(&select(&catalog, &criteria)),
            ["cherry", "banana", "Apple"]
        );
    }

    #[test]
    fn test_filters_combine() {
        let catalog = vec![
            show(1, "The Office", &["Comedy"], Some(8.5)),
            show(2, "The Wire", &["Drama", "Crime"], Some(9.3)),
            show(3, "The Crown", &["Drama"], Some(8.6)),
            show(4, "Fargo", &["Drama", "Crime"], Some(8.9)),
        ];
        let criteria = Criteria {
            search_term: "the".to_string(),
            genre: GenreFilter::Only("Drama".to_string()),
            sort: SortMode::RatingAsc,
        };
        assert_eq!(
            names(&select(&catalog, &criteria)),
            ["The Crown", "The Wire"]
        );
    }

    #[test]
    fn test_genre_vocabulary_sorted_and_distinct() {
        let catalog = vec![
            show(1, "A", &["Drama", "Thriller"], None),
            show(2, "B", &[], None),
            show(3, "C", &["Comedy", "Drama"], None),
        ];
        assert_eq!(genre_vocabulary(&catalog), ["Comedy", "Drama", "Thriller"]);
        assert!(genre_vocabulary(&[]).is_empty());
    }

    #[test]
    fn test_sort_mode_cycle_and_parse() {
        let mut mode = SortMode::None;
        for _ in 0..SortMode::ALL.len() {
            assert_eq!(mode.next().prev(), mode);
            assert_eq!(mode.as_str().parse::<SortMode>(), Ok(mode));
            mode = mode.next();
        }
        assert_eq!(mode, SortMode::None);
        assert!("sideways".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_genre_filter_parse_sentinel() {
        assert_eq!(GenreFilter::parse("all"), GenreFilter::All);
        assert_eq!(
            GenreFilter::parse("Drama"),
            GenreFilter::Only("Drama".to_string())
        );
    }

    const GENRES: [&str; 5] = ["Action", "Comedy", "Drama", "Horror", "Romance"];

    fn arb_show() -> impl Strategy<Value = ShowRecord> {
        (
            any::<u64>(),
            "[A-Za-z ]{0,10}",
            proptest::sample::subsequence(GENRES.to_vec(), 0..=3),
            proptest::option::of(0.0f64..10.0),
        )
            .prop_map(|(id, name, genres, rating)| show(id, &name, &genres, rating))
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<ShowRecord>> {
        proptest::collection::vec(arb_show(), 0..30)
    }

    fn arb_criteria() -> impl Strategy<Value = Criteria> {
        (
            "[a-z ]{0,3}",
            proptest::option::of(proptest::sample::select(GENRES.to_vec())),
            proptest::sample::select(SortMode::ALL.to_vec()),
        )
            .prop_map(|(search_term, genre, sort)| Criteria {
                search_term,
                genre: genre.map_or(GenreFilter::All, |g| GenreFilter::Only(g.to_string())),
                sort,
            })
    }

    proptest! {
        #[test]
        fn prop_selection_is_subset(catalog in arb_catalog(), criteria in arb_criteria()) {
            let selected = select(&catalog, &criteria);
            prop_assert!(selected.len() <= catalog.len());
            // Every element points into the catalog, each at most once
            let mut seen = Vec::new();
            for s in &selected {
                let idx = catalog.iter().position(|c| std::ptr::eq(c, *s));
                prop_assert!(idx.is_some());
                prop_assert!(!seen.contains(&idx));
                seen.push(idx);
            }
        }

        #[test]
        fn prop_selection_is_idempotent(catalog in arb_catalog(), criteria in arb_criteria()) {
            let first = select(&catalog, &criteria);
            let second = select(&catalog, &criteria);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_identity_criteria_returns_catalog(catalog in arb_catalog()) {
            let selected = select(&catalog, &Criteria::default());
            prop_assert_eq!(selected.len(), catalog.len());
            for (s, c) in selected.iter().zip(&catalog) {
                prop_assert!(std::ptr::eq(*s, c));
            }
        }

        #[test]
        fn prop_rating_desc_is_sorted_and_stable(catalog in arb_catalog()) {
            let criteria = Criteria { sort: SortMode::RatingDesc, ..Default::default() };
            let selected = select(&catalog, &criteria);
            let position = |s: &ShowRecord| catalog.iter().position(|c| std::ptr::eq(c, s));
            for pair in selected.windows(2) {
                prop_assert!(pair[0].sort_rating() >= pair[1].sort_rating());
                if pair[0].sort_rating() == pair[1].sort_rating() {
                    prop_assert!(position(pair[0]) < position(pair[1]));
                }
            }
        }

        #[test]
        fn prop_vocabulary_covers_every_genre(catalog in arb_catalog(), criteria in arb_criteria()) {
            // Vocabulary depends on the catalog only, not on any filter
            let _ = select(&catalog, &criteria);
            let vocabulary = genre_vocabulary(&catalog);
            let mut expected: Vec<String> = catalog.iter().flat_map(|s| s.genres.clone()).collect();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(vocabulary, expected);
        }
    }
}
