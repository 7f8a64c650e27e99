mod common;

use common::{forks, rotated, standard_print};
use minutiae::store::TEMPLATE_SUFFIX;
use minutiae::{
    build_template, compare, rank, Comparison, Matcher, MinutiaeError, PrintDir, TemplateStore,
};
use std::fs;
use std::path::PathBuf;

/// Fresh, empty directory under the system temp dir.
fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("minutiae-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn save_then_load_round_trips() {
    let dir = scratch_dir("roundtrip");
    let store = PrintDir::new(&dir);
    let tpl = build_template(&standard_print()).unwrap();

    assert_eq!(store.load("thumb").unwrap(), None);
    store.save("thumb", &tpl).unwrap();
    assert!(store.has_template("thumb"));
    assert!(dir.join(format!("thumb{TEMPLATE_SUFFIX}")).is_file());
    assert_eq!(store.load("thumb").unwrap(), Some(tpl));
    assert_eq!(store.names().unwrap(), vec!["thumb".to_owned()]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_lists_nothing() {
    let store = PrintDir::new(scratch_dir("missing"));
    assert!(store.names().unwrap().is_empty());
    assert_eq!(store.load("nobody").unwrap(), None);
}

#[test]
fn corrupt_template_is_an_error() {
    let dir = scratch_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("badTemplate.txt"), "13.0\n1.0 2.0\n").unwrap();
    let store = PrintDir::new(&dir);
    assert!(matches!(
        store.load("bad"),
        Err(MinutiaeError::TemplateParse { line: 2, .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_template_cannot_be_compared() {
    let dir = scratch_dir("cannot");
    let store = PrintDir::new(&dir);
    store.save("a", &forks(&[(10, 10)])).unwrap();

    let outcome = compare(&store, "a", "ghost", &Matcher::new()).unwrap();
    assert_eq!(
        outcome,
        Comparison::CannotCompare {
            missing: vec!["ghost".to_owned()],
        }
    );
    assert_eq!(outcome.score(), 0);
    assert!(!outcome.is_scored());

    let outcome = compare(&store, "nobody", "ghost", &Matcher::new()).unwrap();
    assert_eq!(
        outcome,
        Comparison::CannotCompare {
            missing: vec!["nobody".to_owned(), "ghost".to_owned()],
        }
    );

    let outcome = compare(&store, "a", "a", &Matcher::new()).unwrap();
    assert!(outcome.is_scored());
    assert_eq!(outcome.score(), 100);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rank_orders_candidates_by_score() {
    let dir = scratch_dir("rank");
    let store = PrintDir::new(&dir);
    let tpl = build_template(&standard_print()).unwrap();

    store.save("probe", &tpl).unwrap();
    store.save("turned", &rotated(&tpl, 6)).unwrap();
    store.save("stranger", &forks(&[(300, 300), (-250, 280)])).unwrap();
    store.save("twin", &tpl).unwrap();
    store.save("blank", &Default::default()).unwrap();

    let ranked = rank(&store, "probe", &Matcher::new()).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    // Equal scores keep name order.
    assert_eq!(names, vec!["turned", "twin", "blank", "stranger"]);
    assert_eq!(ranked[0].comparison.score(), 100);
    assert_eq!(ranked[1].comparison.score(), 100);
    assert_eq!(ranked[2].comparison.score(), 0);
    assert!(ranked.iter().all(|r| r.comparison.is_scored()));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rank_reports_missing_probe() {
    let dir = scratch_dir("noprobe");
    let store = PrintDir::new(&dir);
    store.save("other", &forks(&[(10, 10)])).unwrap();
    let ranked = rank(&store, "probe", &Matcher::new()).unwrap();
    assert_eq!(ranked.len(), 1);
    assert!(!ranked[0].comparison.is_scored());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_candidate_does_not_sink_the_ranking() {
    let dir = scratch_dir("rank-corrupt");
    let store = PrintDir::new(&dir);
    let tpl = build_template(&standard_print()).unwrap();
    store.save("probe", &tpl).unwrap();
    store.save("twin", &tpl).unwrap();
    store.save("stranger", &forks(&[(300, 300)])).unwrap();
    fs::write(dir.join("mangledTemplate.txt"), "13.0\n1.0 2.0\n").unwrap();

    let ranked = rank(&store, "probe", &Matcher::new()).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["twin", "mangled", "stranger"]);
    assert_eq!(ranked[0].comparison.score(), 100);
    assert!(ranked[2].comparison.is_scored());
    match &ranked[1].comparison {
        Comparison::Unreadable { name, reason } => {
            assert_eq!(name, "mangled");
            assert!(reason.contains("line 2"), "{reason}");
        }
        other => panic!("expected an unreadable outcome, got {other:?}"),
    }
    assert_eq!(ranked[1].comparison.score(), 0);
    assert!(!ranked[1].comparison.is_scored());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_probe_marks_every_candidate() {
    let dir = scratch_dir("probe-corrupt");
    let store = PrintDir::new(&dir);
    store.save("other", &forks(&[(10, 10)])).unwrap();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("probeTemplate.txt"), "4294967293\n").unwrap();

    let ranked = rank(&store, "probe", &Matcher::new()).unwrap();
    assert_eq!(ranked.len(), 1);
    assert!(matches!(
        &ranked[0].comparison,
        Comparison::Unreadable { name, .. } if name == "probe"
    ));

    let outcome = compare(&store, "other", "probe", &Matcher::new()).unwrap();
    assert!(matches!(outcome, Comparison::Unreadable { ref name, .. } if name == "probe"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_file_is_still_an_io_error() {
    let dir = scratch_dir("io");
    let store = PrintDir::new(&dir);
    store.save("a", &forks(&[(10, 10)])).unwrap();
    // A directory where the template file should be.
    fs::create_dir_all(dir.join(format!("folder{TEMPLATE_SUFFIX}"))).unwrap();

    assert!(matches!(
        compare(&store, "a", "folder", &Matcher::new()),
        Err(MinutiaeError::Io { .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}
