use std::{env, fs, path::PathBuf, process::Command};

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[[survey.questions]]\n"
        + "kind = \"yes_no\"\n"
        + "text = \"Has your code ever thrown a NullReferenceException?\"\n"
        + "\n"
        + "[[survey.questions]]\n"
        + "kind = \"number\"\n"
        + "text = \"How many times (to the nearest 100) has that happened?\"\n"
        + "\n"
        + "[[survey.questions]]\n"
        + "kind = \"text\"\n"
        + "text = \"What is your favorite color?\"\n"
        + "\n"
        + "[sampling]\n"
        + "n_consenting = 50\n"
        + "seed = 20191023\n";

    fs::write(&config_path, &config_contents).expect("failed to write config file");

    fn exec_bin(args: &[&str]) -> (bool, String, String) {
        let bin = PathBuf::from(env!("CARGO_BIN_EXE_canvass"));

        let output = Command::new(bin)
            .args(args)
            .output()
            .expect("failed to execute command");

        let stdout_str =
            std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
        let stderr_str =
            std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

        (
            output.status.success(),
            stdout_str.to_string(),
            stderr_str.to_string(),
        )
    }

    fn run_bin(args: &[&str]) -> String {
        let (success, stdout_str, stderr_str) = exec_bin(args);
        assert!(
            success,
            "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
        );
        stdout_str
    }

    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    run_bin(&["--sim-dir", test_dir_str, "create"]);
    run_bin(&["--sim-dir", test_dir_str, "create"]);

    run_bin(&["--sim-dir", test_dir_str, "resume", "--run-idx", "0"]);
    run_bin(&["--sim-dir", test_dir_str, "resume", "--run-idx", "1"]);

    let run_dir = test_dir.join("run-0000");
    assert!(run_dir.join("checkpoint.msgpack").is_file());
    assert!(run_dir.join("responses-0000.msgpack").is_file());
    assert!(run_dir.join("responses-0001.msgpack").is_file());

    run_bin(&["--sim-dir", test_dir_str, "analyze"]);

    let results = fs::read_to_string(run_dir.join("results.json"))
        .expect("failed to read results file");
    let results: serde_json::Value =
        serde_json::from_str(&results).expect("failed to parse results file");
    assert_eq!(results[1]["answer_rate"][0]["n_vals"], 100);

    let report = run_bin(&["--sim-dir", test_dir_str, "report", "--run-idx", "0"]);
    let n_answered = report
        .lines()
        .filter(|line| line.starts_with("\tWhat is your favorite color? : "))
        .count();
    assert_eq!(n_answered, 100);

    // Seeded runs of one directory draw from distinct streams.
    let other_report = run_bin(&["--sim-dir", test_dir_str, "report", "--run-idx", "1"]);
    assert_ne!(report, other_report);

    let changed_contents = config_contents.replace("n_consenting = 50", "n_consenting = 40");
    fs::write(&config_path, changed_contents).expect("failed to write config file");
    let (success, _, stderr_str) =
        exec_bin(&["--sim-dir", test_dir_str, "resume", "--run-idx", "0"]);
    assert!(!success, "resume must fail after the config changed");
    assert!(stderr_str.contains("checkpoint config differs from the current config"));
    assert!(!run_dir.join("responses-0002.msgpack").exists());

    run_bin(&["--sim-dir", test_dir_str, "clean"]);
    assert!(!run_dir.exists());

    fs::remove_dir_all(&test_dir).ok();
}
