use dog_clicker_core::{Command, Event, ReferencePoint, Score, ScreenPoint, ScreenSize};
use dog_clicker_system_placement::{PlacementArea, PlacementSampler};
use dog_clicker_system_tapping::Tapping;
use dog_clicker_world::{self as world, query, World};

fn reference() -> ReferencePoint {
    ReferencePoint::new(ScreenPoint::new(100.0, 100.0), ScreenSize::new(200.0, 200.0))
}

fn playing_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSession, &mut events);
    world::apply(
        &mut world,
        Command::ReportReferencePoint {
            reference: reference(),
        },
        &mut events,
    );
    world
}

fn tap(world: &mut World, tapping: &mut Tapping) -> Vec<Command> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::RegisterTap {
            point: ScreenPoint::new(3.0, 4.0),
        },
        &mut events,
    );

    let mut commands = Vec::new();
    tapping.handle(
        &events,
        query::score(world),
        query::reference_point(world),
        &mut commands,
    );

    let mut award_events = Vec::new();
    for command in commands.iter().cloned() {
        world::apply(world, command, &mut award_events);
    }
    commands
}

#[test]
fn accepted_tap_emits_single_award_inside_placement_area() {
    let mut world = playing_world();
    let mut tapping = Tapping::new(PlacementSampler::from_seed(11));

    let commands = tap(&mut world, &mut tapping);

    assert_eq!(commands.len(), 1);
    match &commands[0] {
        Command::AwardTap {
            increment,
            label,
            position,
        } => {
            assert_eq!(*increment, 1);
            assert_eq!(label, "+1");
            let area = PlacementArea::around(reference().center(), reference().size());
            assert!(area.contains(*position), "{position:?} outside {area:?}");
        }
        other => panic!("unexpected command emitted: {other:?}"),
    }
    assert_eq!(query::score(&world), Score::new(1));
}

#[test]
fn no_award_without_accepted_tap() {
    let mut tapping = Tapping::new(PlacementSampler::from_seed(1));
    let mut commands = Vec::new();

    tapping.handle(
        &[Event::SessionStarted],
        Score::ZERO,
        Some(reference()),
        &mut commands,
    );
    tapping.handle(
        &[Event::TapAccepted {
            point: ScreenPoint::new(1.0, 1.0),
        }],
        Score::ZERO,
        None,
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn batched_taps_score_sequentially_across_tier_boundary() {
    let mut tapping = Tapping::new(PlacementSampler::from_seed(5));
    let tap = Event::TapAccepted {
        point: ScreenPoint::new(0.0, 0.0),
    };
    let mut commands = Vec::new();

    tapping.handle(
        &[tap.clone(), tap.clone(), tap],
        Score::new(98),
        Some(reference()),
        &mut commands,
    );

    let increments: Vec<u32> = commands
        .iter()
        .map(|command| match command {
            Command::AwardTap { increment, .. } => *increment,
            other => panic!("unexpected command emitted: {other:?}"),
        })
        .collect();
    assert_eq!(increments, vec![1, 1, 2]);
}

#[test]
fn hundred_sequential_taps_follow_tier_table() {
    let mut world = playing_world();
    let mut tapping = Tapping::new(PlacementSampler::from_seed(0xd06));

    let mut increments = Vec::new();
    for _ in 0..100 {
        for command in tap(&mut world, &mut tapping) {
            if let Command::AwardTap { increment, .. } = command {
                increments.push(increment);
            }
        }
    }

    assert!(increments[..100].iter().all(|increment| *increment == 1));
    assert_eq!(query::score(&world), Score::new(100));

    let next = tap(&mut world, &mut tapping);
    assert!(matches!(next.as_slice(), [Command::AwardTap { increment: 2, .. }]));
    assert_eq!(query::score(&world), Score::new(102));
}

#[test]
fn identical_seeds_replay_identical_awards() {
    let first = replay(21);
    let second = replay(21);
    assert_eq!(first, second, "replay diverged between runs");
}

fn replay(seed: u64) -> Vec<Command> {
    let mut world = playing_world();
    let mut tapping = Tapping::new(PlacementSampler::from_seed(seed));
    (0..50).flat_map(|_| tap(&mut world, &mut tapping)).collect()
}
