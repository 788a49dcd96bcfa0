use proptest::prelude::*;
use relative_placement::calculate_results;

/// A panel of 1..=7 judges over 1..=8 competitors, every row a permutation.
fn panel() -> impl Strategy<Value = (Vec<String>, Vec<Vec<u32>>)> {
    (1usize..=8, 1usize..=7).prop_flat_map(|(competitors, judges)| {
        let row = Just((1..=competitors as u32).collect::<Vec<u32>>()).prop_shuffle();
        let names: Vec<String> = (0..competitors).map(|i| format!("Couple {}", i + 1)).collect();
        (Just(names), prop::collection::vec(row, judges))
    })
}

proptest! {
    #[test]
    fn scoring_is_deterministic((names, rankings) in panel()) {
        let first = calculate_results(&names, &rankings).unwrap();
        let second = calculate_results(&names, &rankings).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_competitor_appears_once((names, rankings) in panel()) {
        let results = calculate_results(&names, &rankings).unwrap();
        prop_assert_eq!(results.len(), names.len());

        let mut seen: Vec<&str> = results.iter().map(|r| r.competitor.as_str()).collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn places_skip_only_after_ties((names, rankings) in panel()) {
        let results = calculate_results(&names, &rankings).unwrap();
        prop_assert_eq!(results[0].place, 1);

        // Each distinct place number equals one plus the count of competitors ahead of it.
        for (position, result) in results.iter().enumerate() {
            let ahead = results.iter().filter(|r| r.place < result.place).count();
            prop_assert_eq!(result.place, ahead + 1);
            if position > 0 {
                prop_assert!(results[position - 1].place <= result.place);
            }
        }
    }

    #[test]
    fn highlights_are_absent_only_for_shared_places((names, rankings) in panel()) {
        let results = calculate_results(&names, &rankings).unwrap();
        for result in &results {
            let sharing = results.iter().filter(|r| r.place == result.place).count();
            prop_assert_eq!(result.highlight_place.is_none(), sharing > 1);
        }
    }

    #[test]
    fn majority_snapshot_matches_histogram((names, rankings) in panel()) {
        let majority = rankings.len() / 2 + 1;
        let results = calculate_results(&names, &rankings).unwrap();
        for result in &results {
            let column = result.majority_column.expect("valid panels always reach a majority");
            prop_assert_eq!(result.cumulative_counts[column], result.cumulative_count_at_majority);
            prop_assert!(result.cumulative_count_at_majority >= majority);
            if column > 0 {
                prop_assert!(result.cumulative_counts[column - 1] < majority);
            }
            prop_assert_eq!(*result.cumulative_counts.last().unwrap(), rankings.len());
        }
    }
}
