//! The token scanner: walks the argument vector left-to-right, classifies each
//! token, and dispatches it against the root accumulator.

use std::rc::Rc;

use crate::acc::{AccNode, OptionResult};
use crate::names::Name;
use crate::opts::Opts;
use crate::result::Res;

/// Immutable description of a program or subcommand, as handed to the engine by
/// the (out of scope) front-end combinator builder.
pub struct Command<A> {
    pub name: &'static str,
    pub header: Option<String>,
    pub opts: Opts<A>,
}

impl<A> Command<A> {
    pub fn new(name: &'static str, opts: Opts<A>) -> Self {
        Command { name, header: None, opts }
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// What reaches the caller on an unsuccessful parse. Layout, wrapping and color
/// are a downstream renderer's job (§6); this is just the command name and the
/// ordered list of error strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Help {
    pub command: &'static str,
    pub errors: Vec<String>,
}

fn fail<A>(cmd: &Command<A>, message: String) -> Help {
    Help { command: cmd.name, errors: vec![message] }
}

fn fail_many<A>(cmd: &Command<A>, messages: Vec<String>) -> Help {
    Help { command: cmd.name, errors: messages }
}

/// Runs `command.opts` against `args`, returning the typed value or a [`Help`]
/// carrying the rendered error messages.
pub fn run<A: Clone + 'static>(command: &Command<A>, args: &[String]) -> Result<A, Help> {
    let mut acc: Rc<dyn AccNode<A>> = command.opts.build();
    let mut i = 0usize;
    let mut positional_only = false;

    while i < args.len() {
        let tok = args[i].as_str();

        if positional_only {
            match acc.parse_arg(tok) {
                Some(next) => {
                    acc = next;
                    i += 1;
                }
                None => return Err(fail(command, format!("Unexpected argument: {tok}"))),
            }
            continue;
        }

        if tok == "--" {
            positional_only = true;
            i += 1;
            continue;
        }

        if let Some(rest) = tok.strip_prefix("--") {
            if let Some((name, value)) = rest.split_once('=') {
                let long = Name::Long(name);
                match acc.parse_option(long) {
                    OptionResult::Unmatched => {
                        return Err(fail(command, format!("Unexpected option: {long}")))
                    }
                    OptionResult::Ambiguous => {
                        return Err(fail(command, format!("Ambiguous option: {long}")))
                    }
                    OptionResult::MatchFlag(_) => {
                        return Err(fail(command, format!("Got unexpected value for flag: {long}")))
                    }
                    OptionResult::MatchOption(f) => {
                        acc = f(value.to_string());
                        i += 1;
                    }
                }
            } else {
                let long = Name::Long(rest);
                match acc.parse_option(long) {
                    OptionResult::Unmatched => {
                        return Err(fail(command, format!("Unexpected option: {long}")))
                    }
                    OptionResult::Ambiguous => {
                        return Err(fail(command, format!("Ambiguous option: {long}")))
                    }
                    OptionResult::MatchFlag(next) => {
                        acc = next;
                        i += 1;
                    }
                    OptionResult::MatchOption(f) => match args.get(i + 1) {
                        Some(val) => {
                            acc = f(val.clone());
                            i += 2;
                        }
                        None => {
                            return Err(fail(command, format!("Missing value for option: {long}")))
                        }
                    },
                }
            }
            continue;
        }

        if tok.len() > 1 && tok.starts_with('-') {
            let cluster = &tok[1..];
            match short_cluster(&acc, cluster, command)? {
                ClusterOutcome::Done(next) => {
                    acc = next;
                    i += 1;
                }
                ClusterOutcome::NeedsValue(c, f) => match args.get(i + 1) {
                    Some(val) => {
                        acc = f(val.clone());
                        i += 2;
                    }
                    None => {
                        return Err(fail(
                            command,
                            format!("Missing value for option: {}", Name::Short(c)),
                        ))
                    }
                },
            }
            continue;
        }

        if let Some(next) = acc.parse_sub(tok) {
            acc = next;
            i += 1;
            continue;
        }
        match acc.parse_arg(tok) {
            Some(next) => {
                acc = next;
                i += 1;
            }
            None => return Err(fail(command, format!("Unexpected argument: {tok}"))),
        }
    }

    match acc.result() {
        Res::Return(v) => Ok(v),
        Res::Missing(reqs) => Err(fail_many(command, reqs.iter().map(|r| r.render()).collect())),
        Res::Fail(msgs) => Err(fail_many(command, msgs)),
    }
}

enum ClusterOutcome<A> {
    Done(Rc<dyn AccNode<A>>),
    NeedsValue(char, Rc<dyn Fn(String) -> Rc<dyn AccNode<A>>>),
}

/// Processes a short-option cluster (`-XYZ`) character by character. `full` is
/// the entire cluster, kept around for error messages; `remaining` is the
/// not-yet-processed tail (`full` on the first call, shrinking on recursion).
fn short_cluster<A: Clone + 'static>(
    acc: &Rc<dyn AccNode<A>>,
    full: &str,
    command: &Command<A>,
) -> Result<ClusterOutcome<A>, Help> {
    short_cluster_inner(acc, full, full, command)
}

fn short_cluster_inner<A: Clone + 'static>(
    acc: &Rc<dyn AccNode<A>>,
    full: &str,
    remaining: &str,
    command: &Command<A>,
) -> Result<ClusterOutcome<A>, Help> {
    let mut chars = remaining.chars();
    let head = chars.next().expect("cluster is non-empty");
    let tail = chars.as_str();

    match acc.parse_option(Name::Short(head)) {
        OptionResult::Unmatched => Err(fail(command, format!("Unexpected option: -{full}"))),
        OptionResult::Ambiguous => Err(fail(command, format!("Ambiguous option: -{full}"))),
        OptionResult::MatchFlag(next) => {
            if tail.is_empty() {
                Ok(ClusterOutcome::Done(next))
            } else {
                short_cluster_inner(&next, full, tail, command)
            }
        }
        OptionResult::MatchOption(f) => {
            if tail.is_empty() {
                Ok(ClusterOutcome::NeedsValue(head, f))
            } else {
                Ok(ClusterOutcome::Done(f(tail.to_string())))
            }
        }
    }
}
