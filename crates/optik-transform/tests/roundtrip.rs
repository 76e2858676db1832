use optik_model::{BookletId, SubjectBoundary, SubjectLayout};
use optik_transform::{BookletRotation, convert_from_base_booklet, convert_to_base_booklet};
use proptest::prelude::*;

fn layout_from_sizes(sizes: &[u32]) -> SubjectLayout {
    let mut start = 1;
    let mut blocks = Vec::new();
    for (idx, size) in sizes.iter().enumerate() {
        let end = start + size - 1;
        let code = format!("S{idx}");
        blocks.push(SubjectBoundary::new(code.clone(), code, start, end));
        start = end + 1;
    }
    SubjectLayout::new(blocks, start - 1).unwrap()
}

fn layout_and_answers() -> impl Strategy<Value = (SubjectLayout, String)> {
    prop::collection::vec(1u32..12, 1..5).prop_flat_map(|sizes| {
        let total: u32 = sizes.iter().sum();
        let choices = vec!['A', 'B', 'C', 'D', 'E', ' '];
        let answers = prop::collection::vec(prop::sample::select(choices), total as usize)
            .prop_map(|chars| chars.into_iter().collect::<String>());
        (Just(layout_from_sizes(&sizes)), answers)
    })
}

proptest! {
    #[test]
    fn mirror_round_trips((layout, answers) in layout_and_answers()) {
        let rotation = BookletRotation::mirror(&layout, BookletId::A, BookletId::B);
        let base = convert_to_base_booklet(&answers, BookletId::B, &rotation).unwrap();
        let back = convert_from_base_booklet(&base, BookletId::B, &rotation).unwrap();
        prop_assert_eq!(back, answers);
    }

    #[test]
    fn mirror_stays_inside_blocks((layout, _answers) in layout_and_answers()) {
        let rotation = BookletRotation::mirror(&layout, BookletId::A, BookletId::C);
        let mut seen = vec![false; layout.total_questions() as usize];
        for (target_q, base_q) in rotation.pairs() {
            let from = layout.subject_for(target_q).unwrap();
            let to = layout.subject_for(base_q).unwrap();
            prop_assert_eq!(&from.code, &to.code);
            prop_assert!(!seen[(base_q - 1) as usize]);
            seen[(base_q - 1) as usize] = true;
            prop_assert_eq!(rotation.from_base(base_q), Some(target_q));
        }
    }

    #[test]
    fn partial_pairs_complete_to_a_bijection(
        (layout, _answers) in layout_and_answers(),
        swap in any::<bool>(),
    ) {
        // Swap the first two questions of every block that has them.
        let pairs: Vec<(u32, u32)> = if swap {
            layout
                .subjects()
                .iter()
                .filter(|block| block.len() >= 2)
                .flat_map(|block| [(block.start, block.start + 1), (block.start + 1, block.start)])
                .collect()
        } else {
            Vec::new()
        };
        let rotation =
            BookletRotation::from_pairs(&layout, BookletId::A, BookletId::D, pairs).unwrap();
        let mut bases: Vec<u32> = rotation.pairs().map(|(_, base_q)| base_q).collect();
        bases.sort_unstable();
        prop_assert_eq!(bases, (1..=layout.total_questions()).collect::<Vec<_>>());
    }
}
