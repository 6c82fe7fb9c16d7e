use dog_clicker_core::Score;
use dog_clicker_system_scoring::{increment_for, label_for, tier_for};

fn assert_range(range: std::ops::RangeInclusive<u64>, expected: u32) {
    for value in range {
        assert_eq!(
            increment_for(Score::new(value)),
            expected,
            "unexpected increment at score {value}"
        );
    }
}

#[test]
fn increments_follow_tier_table() {
    assert_range(0..=99, 1);
    assert_range(100..=299, 2);
    assert_range(300..=599, 3);
    assert_range(600..=999, 4);
    assert_range(1_000..=5_000, 5);
    assert_eq!(increment_for(Score::new(u64::MAX)), 5);
}

#[test]
fn increment_is_monotonically_non_decreasing() {
    let mut previous = increment_for(Score::ZERO);
    for value in 1..=2_000 {
        let current = increment_for(Score::new(value));
        assert!(
            current >= previous,
            "increment decreased between {} and {value}",
            value - 1
        );
        previous = current;
    }
}

#[test]
fn tier_boundaries_are_inclusive() {
    let tier = tier_for(Score::new(100));
    assert_eq!(tier.floor(), Score::new(100));
    assert_eq!(tier.ceiling(), Some(Score::new(299)));
    assert!(tier.contains(Score::new(299)));
    assert!(!tier.contains(Score::new(300)));
    assert!(!tier.contains(Score::new(99)));
}

#[test]
fn labels_prefix_increment_with_plus_sign() {
    assert_eq!(label_for(1), "+1");
    assert_eq!(label_for(5), "+5");
}
