//! End-to-end scenarios driving a full `Opts` tree through `driver::run`,
//! the way a front-end combinator library's own integration suite would.

use flagtree::opts::{self, Opts};
use flagtree::result::Res;
use flagtree::{run, Command, Help, Names};

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn file_opt() -> Opts<String> {
    opts::single_regular(Names::short('f').and_long("file"))
}

fn all_flag() -> Opts<()> {
    opts::single_flag(Names::short('a').and_long("all"))
}

fn path_arg() -> Opts<String> {
    opts::single_argument("PATH")
}

#[test]
fn long_option_with_equals() {
    let cmd = Command::new("prog", file_opt());
    assert_eq!(run(&cmd, &args(&["--file=foo.txt"])), Ok("foo.txt".to_string()));
}

#[test]
fn short_option_with_separate_value() {
    let cmd = Command::new("prog", file_opt());
    assert_eq!(run(&cmd, &args(&["-f", "foo.txt"])), Ok("foo.txt".to_string()));
}

#[test]
fn short_option_with_glued_value() {
    let cmd = Command::new("prog", file_opt());
    assert_eq!(run(&cmd, &args(&["-ffoo.txt"])), Ok("foo.txt".to_string()));
}

#[test]
fn flag_and_option_in_a_short_cluster() {
    let both = opts::zip(all_flag(), file_opt());
    let cmd = Command::new("prog", both);
    assert_eq!(run(&cmd, &args(&["-af", "foo.txt"])), Ok(((), "foo.txt".to_string())));
}

#[test]
fn value_supplied_to_a_bare_flag_is_rejected() {
    let cmd = Command::new("prog", all_flag());
    let err = run(&cmd, &args(&["--all=true"])).unwrap_err();
    assert_eq!(err.errors, vec!["Got unexpected value for flag: --all".to_string()]);
}

#[test]
fn double_dash_disables_further_option_parsing() {
    let cmd = Command::new("prog", path_arg());
    assert_eq!(run(&cmd, &args(&["--", "-x"])), Ok("-x".to_string()));
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Ps(()),
    Build(String),
}

#[test]
fn subcommand_alternative_dispatches_on_name() {
    let ps = Opts::subcommand("ps", all_flag().validate(|v| Res::success(Action::Ps(v))));
    let build = Opts::subcommand("build", path_arg().validate(|v| Res::success(Action::Build(v))));
    let cmd = Command::new("prog", Opts::or_else(ps, build));
    assert_eq!(run(&cmd, &args(&["ps", "-a"])), Ok(Action::Ps(())));
}

#[test]
fn missing_requirements_from_both_sides_of_a_product_are_reported_together() {
    let both = opts::zip(file_opt(), path_arg());
    let cmd = Command::new("prog", both);
    let err = run(&cmd, &args(&[])).unwrap_err();
    assert_eq!(
        err.errors,
        vec!["Missing expected flag --file".to_string(), "Missing expected argument".to_string()]
    );
}

#[test]
fn unknown_long_option_fails_with_a_literal_message() {
    let cmd = Command::new("prog", all_flag());
    let err = run(&cmd, &args(&["--unknown"])).unwrap_err();
    assert_eq!(err.errors, vec!["Unexpected option: --unknown".to_string()]);
}

#[test]
fn same_short_name_claimed_by_both_sides_of_a_product_is_ambiguous() {
    let left = opts::single_flag(Names::short('a'));
    let right = opts::single_flag(Names::short('a'));
    let cmd = Command::new("prog", opts::zip(left, right));
    let err = run(&cmd, &args(&["-a"])).unwrap_err();
    assert_eq!(err.errors, vec!["Ambiguous option: -a".to_string()]);
}

#[test]
fn same_long_name_claimed_by_both_sides_of_a_product_is_ambiguous() {
    let left = opts::single_flag(Names::long("all"));
    let right = opts::single_flag(Names::long("all"));
    let cmd = Command::new("prog", opts::zip(left, right));
    let err = run(&cmd, &args(&["--all"])).unwrap_err();
    assert_eq!(err.errors, vec!["Ambiguous option: --all".to_string()]);
}

#[test]
fn single_argument_rejects_a_second_positional() {
    let cmd = Command::new("prog", path_arg());
    let err = run(&cmd, &args(&["a", "b"])).unwrap_err();
    assert_eq!(err.errors, vec!["Unexpected argument: b".to_string()]);
}

#[test]
fn help_carries_the_command_name() {
    let cmd = Command::new("mytool", all_flag());
    let err: Help = run(&cmd, &args(&["--unknown"])).unwrap_err();
    assert_eq!(err.command, "mytool");
}
