use std::collections::HashSet;

use idlefit::application::ExercisePicker;
use idlefit::domain::ExerciseList;
use idlefit::infrastructure::system::RandomExercisePicker;

#[test]
fn picks_only_enabled_exercises_and_reaches_all_of_them() {
    let list: ExerciseList = [
        ("Squat", true),
        ("Push-up", false),
        ("Burpee", true),
        ("Plank", true),
        ("Lunge", false),
    ]
    .into_iter()
    .collect();
    let enabled = list.enabled_names();
    let picker = RandomExercisePicker;

    let mut seen = HashSet::new();
    for _ in 0..500 {
        let name = picker.pick(&enabled).expect("non-empty list");
        assert!(enabled.contains(&name), "picked disabled exercise {name}");
        seen.insert(name);
    }
    // 500 draws over 3 names: missing one has probability ~3 * (2/3)^500
    assert_eq!(seen.len(), enabled.len());
}

#[test]
fn empty_list_picks_nothing() {
    assert_eq!(RandomExercisePicker.pick(&[]), None);
}
