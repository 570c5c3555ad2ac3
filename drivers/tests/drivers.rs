use assert_cmd::Command;

const PROMPT: &str = "Pick a win probability for Morgana: ";

fn driver(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).unwrap();
    for var in ["RUST_LOG", "QSIM_QUBITS", "QSIM_SEED", "QSIM_MAX_ROUNDS"] {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn classical_hello_prints_greeting_without_prompt() {
    let assert = driver("classical_hello").assert().success();
    let stdout = stdout_of(assert.get_output());
    assert_eq!(stdout, "Hello, classical world!\n");
}

#[test]
fn biased_qrng_prompts_then_plays() {
    let assert = driver("biased_qrng")
        .args(["--seed", "7"])
        .write_stdin("0.5\n")
        .assert()
        .success();
    let stdout = stdout_of(assert.get_output());
    assert!(stdout.starts_with(PROMPT), "{stdout}");
    assert!(stdout.contains("It took Morgana"), "{stdout}");
}

#[test]
fn biased_qrng_rejects_malformed_input() {
    let assert = driver("biased_qrng")
        .write_stdin("not-a-number\n")
        .assert()
        .code(65);
    let output = assert.get_output();
    assert!(stderr_of(output).contains("Invalid input \"not-a-number\""));
    assert!(!stdout_of(output).contains("It took Morgana"));
}

#[test]
fn input_is_checked_before_acquisition() {
    // An unusable register would fail acquisition, but parsing fails first.
    driver("biased_qrng")
        .args(["--qubits", "0"])
        .write_stdin("not-a-number\n")
        .assert()
        .code(65);

    driver("biased_qrng")
        .args(["--qubits", "0"])
        .write_stdin("0.5\n")
        .assert()
        .code(69);
}

#[test]
fn usage_error_is_told_apart_from_bad_input() {
    let assert = driver("biased_qrng").arg("--no-such-flag").assert().code(2);
    assert!(!stdout_of(assert.get_output()).contains(PROMPT));

    driver("biased_qrng")
        .write_stdin("abc\n")
        .assert()
        .code(65);
}

#[test]
fn out_of_range_probability_fails_the_operation() {
    let assert = driver("biased_qrng").write_stdin("1.5\n").assert().code(70);
    assert!(stderr_of(assert.get_output()).contains("outside [0, 1]"));
}

#[test]
fn non_finite_probability_parses_then_fails_the_operation() {
    for text in ["inf\n", "NaN\n"] {
        driver("biased_qrng").write_stdin(text).assert().code(70);
    }
}

#[test]
fn certain_win_stops_at_round_cap() {
    driver("biased_qrng")
        .args(["--max-rounds", "10"])
        .write_stdin("1\n")
        .assert()
        .code(70);
}

#[test]
fn qrng_runs_without_prompt() {
    let assert = driver("qrng").args(["--seed", "3"]).assert().success();
    let stdout = stdout_of(assert.get_output());
    assert!(!stdout.contains(PROMPT));
    assert!(stdout.contains("rounds to get out of that jail."));
}

#[test]
fn deutsch_jozsa_passes_all_checks() {
    let assert = driver("deutsch_jozsa").assert().success();
    assert_eq!(stdout_of(assert.get_output()), "All tests passed!\n");
}

#[test]
fn deutsch_jozsa_needs_two_qubits() {
    driver("deutsch_jozsa").args(["--qubits", "1"]).assert().code(70);
}

#[test]
fn report_shows_release_phase() {
    let assert = driver("classical_hello").arg("--report").assert().success();
    let stderr = stderr_of(assert.get_output());
    let json: serde_json::Value = serde_json::from_str(&stderr).unwrap();
    assert_eq!(json["operation"], "HelloWorld");
    assert_eq!(json["outcome"], "Succeeded");
    let phases: Vec<_> = json["transitions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["phase"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        phases,
        [
            "NotStarted",
            "ResourceAcquiring",
            "Running",
            "ReleasingResource",
            "Done"
        ]
    );
}
