use proptest::prelude::*;
use rafflebox_core::{
    draw_random, parse_options, DrawOutcome, LanguagePacks, Localizer, RngState, TicketStore,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    Draw,
    Reset,
    Regenerate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..12).prop_map(Op::Select),
        4 => Just(Op::Draw),
        1 => Just(Op::Reset),
        1 => (0usize..10).prop_map(Op::Regenerate),
    ]
}

fn labels(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("option {i}")).collect()
}

fn revealed(store: &TicketStore) -> usize {
    store.tickets().iter().filter(|t| t.revealed).count()
}

proptest! {
    #[test]
    fn picked_count_never_drifts(
        initial in 0usize..10,
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut store = TicketStore::new();
        store.initialize(labels(initial));
        let mut rng = RngState::from_seed(seed);
        for op in ops {
            let before = store.counts().picked;
            let history_before = store.history().len();
            match op {
                Op::Select(index) => {
                    let _ = store.reveal(index);
                }
                Op::Draw => match draw_random(&mut store, &mut rng) {
                    DrawOutcome::Drawn { label, .. } => {
                        prop_assert_eq!(store.counts().picked, before + 1);
                        prop_assert_eq!(store.history().len(), history_before + 1);
                        prop_assert_eq!(store.history().first(), Some(&label));
                    }
                    DrawOutcome::NoneAvailable => {
                        prop_assert_eq!(store.counts().picked, before);
                        prop_assert_eq!(before, store.counts().total);
                    }
                },
                Op::Reset => store.reset(),
                Op::Regenerate(count) => store.initialize(labels(count)),
            }
            prop_assert_eq!(store.counts().picked, revealed(&store));
            prop_assert_eq!(store.history().len(), store.counts().picked);
        }
    }

    #[test]
    fn parsed_options_are_trimmed_and_non_empty(
        lines in prop::collection::vec("[ \t]{0,2}[a-z ]{0,6}[ \t]{0,2}", 0..20),
    ) {
        let raw = lines.join("\n");
        let parsed = parse_options(&raw);
        let expected: Vec<String> = lines
            .iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        prop_assert_eq!(&parsed, &expected);

        let mut store = TicketStore::new();
        store.initialize(parsed.clone());
        prop_assert_eq!(store.counts().total, parsed.len());
        prop_assert_eq!(store.counts().picked, 0);
        for (pos, ticket) in store.tickets().iter().enumerate() {
            prop_assert_eq!(ticket.index, pos);
            prop_assert_eq!(&ticket.label, &parsed[pos]);
            prop_assert!(!ticket.revealed);
        }
    }

    #[test]
    fn lookup_always_returns_something(key in "[a-zA-Z]{1,12}", lang in "[a-z]{2}") {
        let mut packs = LanguagePacks::new("zh_CN");
        let mut zh = BTreeMap::new();
        zh.insert("known".to_string(), "已知".to_string());
        packs.insert("zh_CN", zh);
        let loc = Localizer::new(packs, Some(&lang));
        let value = loc.t(&key);
        if key == "known" {
            prop_assert_eq!(value, "已知");
        } else {
            prop_assert_eq!(value, key);
        }
    }
}

#[test]
fn reveal_twice_counts_once() {
    let mut store = TicketStore::new();
    store.initialize(parse_options("Apple\n\nBanana\n  Cherry \n"));
    assert_eq!(store.counts().total, 3);
    store.reveal(2).expect("reveal");
    store.reveal(2).expect("reveal again");
    assert_eq!(store.counts().picked, 1);
    assert_eq!(store.history(), ["Cherry".to_string()]);
}
