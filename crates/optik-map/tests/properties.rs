use optik_map::{distance, find_best_match, similarity};
use proptest::prelude::*;

proptest! {
    #[test]
    fn similarity_is_bounded_and_symmetric(a in "[a-zçğıöşü ]{0,12}", b in "[a-zçğıöşü ]{0,12}") {
        let forward = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert_eq!(forward, similarity(&b, &a));
    }

    #[test]
    fn identical_strings_score_one(a in ".{0,16}") {
        prop_assert_eq!(distance(&a, &a), 0);
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn best_match_is_never_beaten(target in "[a-z]{1,6}", candidates in prop::collection::vec("[a-z]{0,6}", 1..6)) {
        let best = find_best_match(&target, &candidates).unwrap();
        for candidate in &candidates {
            prop_assert!(similarity(&target, candidate) <= best.score);
        }
        prop_assert_eq!(best.candidate, candidates[best.index].as_str());
    }
}
