use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{source}").unwrap();
    file
}

#[test]
fn missing_file_warns_and_exits_zero() {
    Command::cargo_bin("turtle").unwrap().arg("does-not-exist.logo").assert().success();
}

#[test]
fn scenario_f_fibonacci_runs_successfully() {
    let file = script(
        "fun fib(n){ if(n<=1){ return(1) } return(fib(n-1)+fib(n-2)) } \
         x0=fib(0) x1=fib(1) x2=fib(2) x3=fib(3) x4=fib(4) x5=fib(5) \
         println(x5)",
    );
    Command::cargo_bin("turtle")
        .unwrap()
        .arg(file.path())
        .arg("--no-render")
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));
}

#[test]
fn scenario_g_turtle_renders_a_summary() {
    let file = script("t=Turtle() t.move(10) t.rotate(30)");
    Command::cargo_bin("turtle")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("turtle 0: 2 point(s), heading 30"));
}

#[test]
fn scenario_h_missing_paren_is_a_syntax_error() {
    let file = script("while True { }");
    Command::cargo_bin("turtle")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("opening paren"));
}

#[test]
fn division_by_zero_reports_a_runtime_error() {
    let file = script("x = 1 / 0");
    Command::cargo_bin("turtle")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn no_render_suppresses_the_canvas_summary() {
    let file = script("t=Turtle() t.move(10)");
    Command::cargo_bin("turtle")
        .unwrap()
        .arg(file.path())
        .arg("-n")
        .assert()
        .success()
        .stdout(predicate::str::contains("turtle").not());
}
