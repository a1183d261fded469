use super::*;

#[test]
fn empty_compilation_falls_back_to_ten_seconds() {
    assert_eq!(total_frames(Vec::<u64>::new()), 300);
    assert_eq!(total_frames([0u64]), 300);
}

#[test]
fn durations_are_summed() {
    assert_eq!(total_frames([90u64, 150]), 240);
    assert_eq!(total_frames_or([5u64], 1), 5);
    assert_eq!(total_frames_or(Vec::<u64>::new(), 42), 42);
}

#[test]
fn scene_duration_adds_tail_to_floored_audio() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(
        scene_duration_frames(12.34, fps, COMPILATION_TAIL_FRAMES),
        370 + 60
    );
    assert_eq!(scene_duration_frames(1.0, fps, SINGLE_TAIL_FRAMES), 120);
    assert_eq!(scene_duration_frames(f64::NAN, fps, 60), 60);
    assert_eq!(scene_duration_frames(-3.0, fps, 60), 60);
}
