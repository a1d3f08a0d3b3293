use chrono::NaiveDate;
use proptest::prelude::*;

use ringrank::config::RankingConfig;
use ringrank::dedup::deduplicate;
use ringrank::domain::ContestRecord;
use ringrank::normalization::{NameNormalizer, normalize_name};
use ringrank::ranking::{DecayDirection, RankingEngine, TimeDecay};

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-zÀ-ÿ .'\t]{0,40}",
        prop::sample::select(vec![
            "Canelo", "canelo alvarez", "Tank", "Ray Leonard", "Roy Jones Jr.",
            "Ken Norton Sr", "Saúl Álvarez", "  Joe   Frazier ", "Ali Ali",
        ])
        .prop_map(str::to_string),
    ]
}

fn short_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Ali", "Frazier", "Norton", "Foreman", "Spinks", "Holmes"])
        .prop_map(str::to_string)
}

fn record_strategy() -> impl Strategy<Value = ContestRecord> {
    (
        short_name(),
        short_name(),
        prop::option::of(any::<bool>()),
        2015i32..2025,
        1u32..=12,
    )
        .prop_filter("distinct competitors", |(a, b, ..)| a != b)
        .prop_map(|(a, b, a_won, year, month)| {
            ContestRecord::new(a, b, a_won, NaiveDate::from_ymd_opt(year, month, 1))
        })
}

fn mirror(record: &ContestRecord) -> ContestRecord {
    ContestRecord::new(
        record.competitor_b.clone(),
        record.competitor_a.clone(),
        record.a_won.map(|won| !won),
        record.date,
    )
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in name_strategy()) {
        let once = normalize_name(&raw);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalized_names_are_trimmed(raw in name_strategy()) {
        let normalized = normalize_name(&raw);
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.contains('.'));
        prop_assert!(!normalized.contains('\''));
    }

    #[test]
    fn canonical_pair_is_symmetric(a in name_strategy(), b in name_strategy()) {
        let normalizer = NameNormalizer::default();
        let pair = normalizer.canonical_pair(&a, &b);
        prop_assert_eq!(&pair, &normalizer.canonical_pair(&b, &a));
        prop_assert!(pair.low <= pair.high);
    }

    #[test]
    fn decay_is_bounded_and_monotone(
        half_life in 0.05f64..50.0,
        weight_min in 0.0f64..1.0,
        direction in prop_oneof![
            Just(DecayDirection::RecentBiased),
            Just(DecayDirection::Consolidated),
        ],
        older in 1900i32..2025,
        gap in 0i32..50,
    ) {
        let decay = TimeDecay {
            half_life_years: half_life,
            weight_min,
            direction,
            reference_year: 2025,
        };
        let newer = (older + gap).min(2025);
        let old_weight = decay.weight(NaiveDate::from_ymd_opt(older, 6, 1).unwrap());
        let new_weight = decay.weight(NaiveDate::from_ymd_opt(newer, 6, 1).unwrap());

        prop_assert!(old_weight.is_finite() && new_weight.is_finite());
        prop_assert!(old_weight >= weight_min);
        prop_assert!(new_weight >= weight_min);
        match direction {
            DecayDirection::RecentBiased => {
                prop_assert!(new_weight <= 1.0f64.max(weight_min));
                prop_assert!(old_weight <= new_weight);
            }
            DecayDirection::Consolidated => {
                prop_assert!(new_weight >= 1.0);
                prop_assert!(old_weight >= new_weight);
            }
        }
    }

    #[test]
    fn dedup_ignores_mirrored_copies(records in prop::collection::vec(record_strategy(), 0..20)) {
        let mut doubled = records.clone();
        doubled.extend(records.iter().map(mirror));
        prop_assert_eq!(deduplicate(&doubled), deduplicate(&records));
    }

    #[test]
    fn ranking_ignores_mirrored_copies(records in prop::collection::vec(record_strategy(), 1..20)) {
        let config = RankingConfig {
            top_n: 100,
            reference_year: Some(2025),
            ..Default::default()
        };
        let engine = RankingEngine::new(config, NameNormalizer::default()).unwrap();

        let mut doubled = records.clone();
        doubled.extend(records.iter().map(mirror));
        prop_assert_eq!(engine.compute(&doubled), engine.compute(&records));
    }

    #[test]
    fn leaderboard_is_sorted_and_ranked(records in prop::collection::vec(record_strategy(), 0..30)) {
        let config = RankingConfig {
            top_n: 4,
            reference_year: Some(2025),
            ..Default::default()
        };
        let engine = RankingEngine::new(config, NameNormalizer::default()).unwrap();
        let ranked = engine.compute(&records);

        prop_assert!(ranked.len() <= 4);
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        for (idx, entry) in ranked.iter().enumerate() {
            prop_assert_eq!(entry.rank, idx + 1);
        }
    }
}
