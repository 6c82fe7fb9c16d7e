use dog_clicker_rendering_macroquad::TapInputState;
use glam::Vec2;

fn run_sequence(taps_per_frame: &[usize]) -> Vec<Vec<Vec2>> {
    let mut state = TapInputState::default();
    let mut delivered = Vec::new();
    let mut next = 0.0;
    for &count in taps_per_frame {
        for _ in 0..count {
            state.register_tap(Vec2::new(next, next));
            next += 1.0;
        }
        delivered.push(state.take_taps());
    }
    delivered
}

#[test]
fn taps_are_delivered_on_the_frame_they_occur() {
    let frames = [0, 1, 0, 2, 0, 0, 3];
    let delivered = run_sequence(&frames);

    let counts: Vec<usize> = delivered.iter().map(Vec::len).collect();
    assert_eq!(counts, frames);

    let taps: Vec<Vec2> = delivered.iter().flatten().copied().collect();
    let expected: Vec<Vec2> = (0..6).map(|index| Vec2::splat(index as f32)).collect();
    assert_eq!(taps, expected);
    assert_eq!(delivered, run_sequence(&frames));
}

#[test]
fn restart_latch_clears_after_read() {
    let mut state = TapInputState::default();
    assert!(!state.take_restart());
    state.register_restart();
    state.register_restart();
    assert!(state.take_restart());
    assert!(!state.take_restart());
}
