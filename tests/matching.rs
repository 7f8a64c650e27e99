mod common;

use common::{forks, rotated, standard_print};
use minutiae::{build_template, score, MatchConfig, MatchOutcome, Matcher, Template};

fn print_template() -> Template {
    build_template(&standard_print()).unwrap()
}

#[test]
fn self_match_scores_100() {
    let tpl = print_template();
    assert_eq!(tpl.len(), 38);
    assert_eq!(score(&tpl, &tpl, 65, false), 100);

    let outcome = Matcher::new().evaluate(&tpl, &tpl);
    assert_eq!(outcome.score, 100);
    assert_eq!(outcome.matches, 38);
    assert_eq!(outcome.minutiae, 38);
    assert!((-10..=10).contains(&outcome.rotation_deg));
}

#[test]
fn fast_mode_stops_at_first_rotation_over_threshold() {
    let tpl = print_template();
    assert_eq!(score(&tpl, &tpl, 65, true), 73);

    // An unreachable threshold falls back to the best rotation.
    assert_eq!(score(&tpl, &tpl, 101, true), 100);
}

#[test]
fn small_rotations_are_tolerated() {
    let tpl = print_template();
    for deg in [-10, -7, 4, 9, 10] {
        let turned = rotated(&tpl, deg);
        assert_eq!(score(&turned, &tpl, 65, false), 100, "rotated {deg} vs unrotated");
        assert_eq!(score(&tpl, &turned, 65, false), 100, "unrotated vs rotated {deg}");
    }
}

#[test]
fn empty_first_template_scores_zero() {
    let tpl = print_template();
    let empty = Template::default();
    assert_eq!(score(&empty, &tpl, 65, false), 0);
    assert_eq!(Matcher::new().evaluate(&empty, &tpl), MatchOutcome::default());
    assert_eq!(score(&tpl, &empty, 65, false), 0);
    assert_eq!(score(&empty, &empty, 65, true), 0);
}

#[test]
fn greedy_assignment_is_not_optimal() {
    // An optimal pairing would match both points in each direction; first-fit
    // spends the close partner on the wrong point.
    let a = forks(&[(94, 100), (82, 100)]);
    let b = forks(&[(100, 100), (108, 100)]);
    assert_eq!(score(&a, &b, 65, false), 50);
    assert_eq!(score(&b, &a, 65, false), 50);
}

#[test]
fn rotation_range_limits_search() {
    let tpl = print_template();
    let turned = rotated(&tpl, 25);
    let narrow = Matcher::new();
    let wide = Matcher::new().with_config(MatchConfig {
        max_rotation_deg: 30,
        ..MatchConfig::default()
    });
    let wide_outcome = wide.evaluate(&turned, &tpl);
    assert_eq!(wide_outcome.score, 100);
    assert!(narrow.score(&turned, &tpl) < wide_outcome.score);
}

#[test]
fn distance_tolerance_is_configurable() {
    let a = forks(&[(40, 40)]);
    let b = forks(&[(52, 52)]);
    assert_eq!(score(&a, &b, 65, false), 0);
    let loose = Matcher::new().with_config(MatchConfig {
        max_distance: 15,
        ..MatchConfig::default()
    });
    assert_eq!(loose.score(&a, &b), 100);
}
