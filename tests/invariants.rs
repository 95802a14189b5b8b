//! Structural invariants a correct accumulator/driver must hold, independent
//! of any one scenario: determinism, no-op on `Unmatched`/`None`, applicative
//! identity, alternative left-bias, and ordering guarantees.

use flagtree::opts::{self, Opts};
use flagtree::{run, Command, Names};

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn pure_on_empty_input_returns_the_value() {
    let cmd = Command::new("prog", Opts::pure(7i32));
    assert_eq!(run(&cmd, &args(&[])), Ok(7));
}

#[test]
fn applicative_identity_with_pure_left() {
    let inner = opts::single_regular(Names::short('f'));
    let wrapped = opts::app(Opts::pure(std::rc::Rc::new(|x: String| x) as flagtree::Func<String, String>), inner.clone());
    let input = args(&["-f", "v"]);
    assert_eq!(run(&Command::new("p", inner), &input), run(&Command::new("p", wrapped), &input));
}

#[test]
fn repeated_option_preserves_input_order() {
    let opt = opts::repeated_regular(Names::short('x'));
    let cmd = Command::new("prog", opt);
    assert_eq!(
        run(&cmd, &args(&["-x", "one", "-x", "two", "-x", "three"])),
        Ok(vec!["one".to_string(), "two".to_string(), "three".to_string()])
    );
}

#[test]
fn repeated_positional_preserves_input_order() {
    let opt = opts::repeated_argument("N");
    let cmd = Command::new("prog", opt);
    assert_eq!(
        run(&cmd, &args(&["one", "two", "three"])),
        Ok(vec!["one".to_string(), "two".to_string(), "three".to_string()])
    );
}

#[test]
fn single_regular_returns_the_last_occurrence() {
    let opt = opts::single_regular(Names::short('x'));
    let cmd = Command::new("prog", opt);
    assert_eq!(run(&cmd, &args(&["-x", "one", "-x", "two"])), Ok("two".to_string()));
}

#[test]
fn single_flag_is_unit_regardless_of_count() {
    let opt = opts::single_flag(Names::short('v'));
    let cmd = Command::new("prog", opt);
    assert_eq!(run(&cmd, &args(&["-v", "-v", "-v"])), Ok(()));
}

#[test]
fn alternative_left_bias_on_match() {
    let left = opts::single_regular(Names::short('a'));
    let right = opts::single_regular(Names::short('b'));
    let combined = Opts::or_else(left.clone(), right);
    let input = args(&["-a", "yes"]);
    assert_eq!(run(&Command::new("p", combined), &input), run(&Command::new("p", left), &input));
}

#[test]
fn unrecognized_long_option_name_does_not_consume_anything_before_failing() {
    let opt = opts::single_regular(Names::short('a'));
    let cmd = Command::new("prog", opt);
    // the option required (`-a`) is never supplied; the driver fails on the
    // unknown token without having touched the `-a` leaf's state, so the
    // reported problem is the literal "unexpected option", not "missing".
    let err = run(&cmd, &args(&["--nope"])).unwrap_err();
    assert_eq!(err.errors, vec!["Unexpected option: --nope".to_string()]);
}

#[test]
fn empty_input_against_a_required_flag_reports_missing_not_failure() {
    let opt = opts::single_flag(Names::short('v').and_long("verbose"));
    let cmd = Command::new("prog", opt);
    let err = run(&cmd, &args(&[])).unwrap_err();
    assert_eq!(err.errors, vec!["Missing expected flag --verbose".to_string()]);
}

#[test]
fn double_dash_disables_subcommand_dispatch_too() {
    let sub = Opts::subcommand("go", opts::single_argument("PATH"));
    let cmd = Command::new("prog", sub);
    let err = run(&cmd, &args(&["--", "go"])).unwrap_err();
    assert_eq!(err.errors, vec!["Unexpected argument: go".to_string()]);
}

#[test]
fn parsing_is_deterministic_across_repeated_runs() {
    let opt = opts::single_regular(Names::short('f').and_long("file"));
    let cmd = Command::new("prog", opt);
    let input = args(&["--file=a.txt"]);
    let first = run(&cmd, &input);
    let second = run(&cmd, &input);
    assert_eq!(first, second);
}
