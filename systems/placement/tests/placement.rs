use dog_clicker_core::{ScreenPoint, ScreenSize};
use dog_clicker_system_placement::{PlacementArea, PlacementSampler};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPSILON: f32 = 1e-3;

fn assert_within(area: PlacementArea, point: ScreenPoint) {
    let min = area.min();
    let max = area.max();
    assert!(
        point.x >= min.x - EPSILON && point.x <= max.x + EPSILON,
        "x {} outside [{}, {}]",
        point.x,
        min.x,
        max.x
    );
    assert!(
        point.y >= min.y - EPSILON && point.y <= max.y + EPSILON,
        "y {} outside [{}, {}]",
        point.y,
        min.y,
        max.y
    );
}

#[test]
fn samples_stay_inside_seventy_percent_rectangle() {
    let cases = [
        (ScreenPoint::new(100.0, 100.0), ScreenSize::new(200.0, 200.0)),
        (ScreenPoint::new(540.0, 720.0), ScreenSize::new(360.0, 360.0)),
        (ScreenPoint::new(-30.0, 15.0), ScreenSize::new(12.5, 90.0)),
    ];

    let mut sampler = PlacementSampler::with_rng(ChaCha8Rng::seed_from_u64(0x5eed));
    for (center, size) in cases {
        let area = PlacementArea::around(center, size);
        for _ in 0..500 {
            assert_within(area, sampler.sample_offset(center, size));
        }
    }
}

#[test]
fn reference_scenario_bounds_match_expected_square() {
    let area = PlacementArea::around(ScreenPoint::new(100.0, 100.0), ScreenSize::new(200.0, 200.0));
    assert!((area.min().x - 30.0).abs() < EPSILON);
    assert!((area.min().y - 30.0).abs() < EPSILON);
    assert!((area.max().x - 170.0).abs() < EPSILON);
    assert!((area.max().y - 170.0).abs() < EPSILON);
}

#[test]
fn samples_spread_across_both_halves() {
    let center = ScreenPoint::new(0.0, 0.0);
    let size = ScreenSize::new(100.0, 100.0);
    let mut sampler = PlacementSampler::from_seed(7);

    let mut left = 0;
    let mut above = 0;
    let draws = 1_000;
    for _ in 0..draws {
        let point = sampler.sample_offset(center, size);
        if point.x < 0.0 {
            left += 1;
        }
        if point.y < 0.0 {
            above += 1;
        }
    }

    assert!((300..=700).contains(&left), "left half drew {left}/{draws}");
    assert!((300..=700).contains(&above), "upper half drew {above}/{draws}");
}

#[test]
fn identical_seeds_replay_identical_offsets() {
    let center = ScreenPoint::new(50.0, 80.0);
    let size = ScreenSize::new(120.0, 60.0);
    let mut first = PlacementSampler::from_seed(99);
    let mut second = PlacementSampler::from_seed(99);

    for _ in 0..32 {
        assert_eq!(
            first.sample_offset(center, size),
            second.sample_offset(center, size)
        );
    }
}
