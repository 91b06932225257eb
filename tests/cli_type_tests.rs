//! End-to-end tests for `softkeys type`.

mod fixtures;

use fixtures::*;

#[test]
fn test_type_scenario_json() {
    let env = TestEnv::new();
    let output = env.run(&[
        "type", "--json", "a", "Shift", "a", "Caps", "a", "@numpad", "5",
    ]);
    assert_exit(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["output"], "aAA5");
    assert_eq!(result["layout"], "numpad");
    assert_eq!(result["shift"], false);
    assert_eq!(result["caps"], true);
}

#[test]
fn test_type_plain_output() {
    let env = TestEnv::new();
    let output = env.run(&["type", "h", "i", "Enter"]);
    assert_exit(&output, 0);

    let text = stdout(&output);
    assert!(text.contains(r#"Output: "hi\n""#), "got: {text}");
    assert!(text.contains("Layout: standard"));
    assert!(text.contains("Shift:  off"));
}

#[test]
fn test_type_shift_is_one_shot_and_survives_space() {
    let env = TestEnv::new();
    let output = env.run(&["type", "--json", "Shift", "Space", "b", "b"]);
    assert_exit(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["output"], " Bb");
    assert_eq!(result["shift"], false);
}

#[test]
fn test_type_shift_then_caps_lowercases() {
    let env = TestEnv::new();
    let output = env.run(&["type", "--json", "Caps", "Shift", "q", "w"]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)["output"], "qW");
}

#[test]
fn test_type_backspace_on_empty_output() {
    let env = TestEnv::new();
    let output = env.run(&["type", "--json", "Backspace", "x", "Backspace", "Backspace"]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)["output"], "");
}

#[test]
fn test_type_unknown_labels_are_literal() {
    let env = TestEnv::new();
    let output = env.run(&["type", "--json", "é", "F13", "@"]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)["output"], "éF13@");
}

#[test]
fn test_type_start_layout_flag() {
    let env = TestEnv::new();
    let output = env.run(&["type", "--json", "--layout", "numpad", "7", "Enter"]);
    assert_exit(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["output"], "7\n");
    assert_eq!(result["layout"], "numpad");
}

#[test]
fn test_type_unknown_layout_is_validation_error() {
    let env = TestEnv::new();
    let output = env.run(&["type", "a", "@dvorak", "b"]);
    assert_exit(&output, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown layout 'dvorak'"));
    assert!(stderr.contains("standard, numpad"));
}

#[test]
fn test_type_with_user_layouts() {
    let env = TestEnv::new();
    let layouts = env.write_file("layouts.toml", USER_LAYOUTS);

    let output = env.run(&[
        "--layouts-file",
        arg(&layouts),
        "type",
        "--json",
        "--layout",
        "arrows",
        "Shift",
        "h",
        "j",
    ]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)["output"], "Hj");
}

#[test]
fn test_type_broken_layouts_file_is_io_error() {
    let env = TestEnv::new();
    let layouts = env.write_file("layouts.toml", BROKEN_LAYOUTS);

    let output = env.run(&["--layouts-file", arg(&layouts), "type", "a"]);
    assert_exit(&output, 2);
}

#[test]
fn test_type_uses_configured_default_layout() {
    let env = TestEnv::new();
    env.write_file("config.toml", "[keyboard]\ndefault_layout = \"numpad\"\n");

    let output = env.run(&["type", "--json", "0"]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)["layout"], "numpad");
}
