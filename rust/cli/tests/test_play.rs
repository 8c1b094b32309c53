use squares_cli::run;

fn run_capture(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn play_prints_every_turn_and_all_hands() {
    let (code, stdout, stderr) = run_capture(&["squares", "play", "--seed", "42"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let turns = stdout.lines().filter(|l| l.starts_with("Turn ")).count();
    assert_eq!(turns, 25);
    assert!(stdout.lines().any(|l| l.starts_with("Turn  1:") && l.contains("-> (0, 0) [anchor]")));
    assert!(stdout.lines().any(|l| l.starts_with("Turn 25:") && l.ends_with("[terminal]")));
    for label in ["Row 0:", "Row 4:", "Col 0:", "Col 4:"] {
        assert!(stdout.contains(label), "missing {}", label);
    }
    assert!(!stdout.contains("--"), "final grid has no empty cells");
}

#[test]
fn play_is_deterministic_for_a_seed() {
    let (_, a, _) = run_capture(&["squares", "play", "--seed", "9", "--mode", "search"]);
    let (_, b, _) = run_capture(&["squares", "play", "--seed", "9", "--mode", "search"]);
    assert_eq!(a, b);
}

#[test]
fn play_probability_mode_reports_policy() {
    let (code, stdout, _) =
        run_capture(&["squares", "play", "--seed", "3", "--mode", "probability"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Seed: 3  Policy: probability\n"));
}

#[test]
fn play_rejects_zero_budget() {
    let (code, stdout, stderr) =
        run_capture(&["squares", "play", "--seed", "1", "--budget-ms", "0"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("budget must be >= 1 ms"));
}

#[test]
fn bad_mode_is_a_usage_error() {
    let (code, _, stderr) = run_capture(&["squares", "play", "--mode", "random"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage: squares <command>"));
}
