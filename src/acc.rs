//! The accumulator tree: a parallel structure to [`crate::opts::Opts`] that holds
//! the partial state collected from the command line so far.
//!
//! Every operation borrows `&self` and returns a fresh `Rc<dyn AccNode<A>>` —
//! untouched subtrees are shared via `Rc::clone`, only the path from the root to
//! the matched leaf is rebuilt. An `Unmatched`/`None` result means the caller
//! keeps using the `Rc` it already had.

use std::rc::Rc;

use crate::names::{Name, Names};
use crate::result::{ap, or_else, Func, Res};

/// Outcome of trying to match a named option (long or short) against a node.
pub enum OptionResult<A> {
    Unmatched,
    /// The name was a flag: no value follows, `next` already reflects the match.
    MatchFlag(Rc<dyn AccNode<A>>),
    /// The name takes a value; call the closure with it to get the new accumulator.
    MatchOption(Rc<dyn Fn(String) -> Rc<dyn AccNode<A>>>),
    /// The name resolved inside two independent slots of the same product.
    Ambiguous,
}

pub trait AccNode<A> {
    fn parse_option(&self, name: Name<'_>) -> OptionResult<A>;
    fn parse_arg(&self, arg: &str) -> Option<Rc<dyn AccNode<A>>>;
    fn parse_sub(&self, name: &str) -> Option<Rc<dyn AccNode<A>>>;
    fn result(&self) -> Res<A>;
}

/// Always succeeds with an already-computed outcome; matches nothing. Used both
/// for the `Pure` leaf of `Opts` and for freezing a sibling slot at subcommand
/// handoff (the sibling's current, possibly-unsatisfied, result is captured here).
pub struct Pure<A>(pub Res<A>);

impl<A: Clone> AccNode<A> for Pure<A> {
    fn parse_option(&self, _name: Name<'_>) -> OptionResult<A> {
        OptionResult::Unmatched
    }
    fn parse_arg(&self, _arg: &str) -> Option<Rc<dyn AccNode<A>>> {
        None
    }
    fn parse_sub(&self, _name: &str) -> Option<Rc<dyn AccNode<A>>> {
        None
    }
    fn result(&self) -> Res<A> {
        self.0.clone()
    }
}

/// `--name value` / `--name=value` / `-n value` / `-nvalue`; collects every
/// occurrence in input order.
pub struct Regular {
    pub names: Names,
    pub values: Vec<String>,
}

impl AccNode<Vec<String>> for Regular {
    fn parse_option(&self, name: Name<'_>) -> OptionResult<Vec<String>> {
        if self.names.matches(name) {
            let names = self.names.clone();
            let values = self.values.clone();
            OptionResult::MatchOption(Rc::new(move |v: String| {
                let mut values = values.clone();
                values.push(v);
                Rc::new(Regular { names: names.clone(), values }) as Rc<dyn AccNode<Vec<String>>>
            }))
        } else {
            OptionResult::Unmatched
        }
    }
    fn parse_arg(&self, _arg: &str) -> Option<Rc<dyn AccNode<Vec<String>>>> {
        None
    }
    fn parse_sub(&self, _name: &str) -> Option<Rc<dyn AccNode<Vec<String>>>> {
        None
    }
    fn result(&self) -> Res<Vec<String>> {
        if self.values.is_empty() {
            Res::missing_flag(self.names.label())
        } else {
            Res::success(self.values.clone())
        }
    }
}

/// A bare presence flag; repeated occurrences increment a count.
pub struct Flag {
    pub names: Names,
    pub count: usize,
}

impl AccNode<Vec<()>> for Flag {
    fn parse_option(&self, name: Name<'_>) -> OptionResult<Vec<()>> {
        if self.names.matches(name) {
            OptionResult::MatchFlag(Rc::new(Flag { names: self.names.clone(), count: self.count + 1 }))
        } else {
            OptionResult::Unmatched
        }
    }
    fn parse_arg(&self, _arg: &str) -> Option<Rc<dyn AccNode<Vec<()>>>> {
        None
    }
    fn parse_sub(&self, _name: &str) -> Option<Rc<dyn AccNode<Vec<()>>>> {
        None
    }
    fn result(&self) -> Res<Vec<()>> {
        if self.count == 0 {
            Res::missing_flag(self.names.label())
        } else {
            Res::success(vec![(); self.count])
        }
    }
}

/// A positional slot, capped at `limit` occurrences (`1` for `Single`, `usize::MAX`
/// for `Repeated`). Once full, `parse_arg` returns `None` and the driver falls
/// through to "unexpected argument" (the source's conflation, preserved per spec).
pub struct Argument {
    pub metavar: &'static str,
    pub limit: usize,
    pub values: Vec<String>,
}

impl AccNode<Vec<String>> for Argument {
    fn parse_option(&self, _name: Name<'_>) -> OptionResult<Vec<String>> {
        OptionResult::Unmatched
    }
    fn parse_arg(&self, arg: &str) -> Option<Rc<dyn AccNode<Vec<String>>>> {
        if self.values.len() < self.limit {
            let mut values = self.values.clone();
            values.push(arg.to_string());
            Some(Rc::new(Argument { metavar: self.metavar, limit: self.limit, values }))
        } else {
            None
        }
    }
    fn parse_sub(&self, _name: &str) -> Option<Rc<dyn AccNode<Vec<String>>>> {
        None
    }
    fn result(&self) -> Res<Vec<String>> {
        if self.values.is_empty() {
            Res::missing_argument()
        } else {
            Res::success(self.values.clone())
        }
    }
}

/// A subcommand leaf: matches `name` exactly once, handing all further tokens to
/// a freshly built accumulator for the subcommand's own `Opts`.
pub struct Subcommand<A> {
    pub name: &'static str,
    pub build: Rc<dyn Fn() -> Rc<dyn AccNode<A>>>,
}

impl<A: Clone> AccNode<A> for Subcommand<A> {
    fn parse_option(&self, _name: Name<'_>) -> OptionResult<A> {
        OptionResult::Unmatched
    }
    fn parse_arg(&self, _arg: &str) -> Option<Rc<dyn AccNode<A>>> {
        None
    }
    fn parse_sub(&self, name: &str) -> Option<Rc<dyn AccNode<A>>> {
        if name == self.name {
            Some((self.build)())
        } else {
            None
        }
    }
    fn result(&self) -> Res<A> {
        Res::missing_command(self.name)
    }
}

/// Independent product: both sides must parse; a name resolving in both is `Ambiguous`.
pub struct App<X, A> {
    pub l: Rc<dyn AccNode<Func<X, A>>>,
    pub r: Rc<dyn AccNode<X>>,
}

fn is_unmatched<A>(r: &OptionResult<A>) -> bool {
    matches!(r, OptionResult::Unmatched)
}

impl<X: Clone + 'static, A: Clone + 'static> AccNode<A> for App<X, A> {
    fn parse_option(&self, name: Name<'_>) -> OptionResult<A> {
        let lr = self.l.parse_option(name);
        let rr = self.r.parse_option(name);
        match (is_unmatched(&lr), is_unmatched(&rr)) {
            (true, true) => OptionResult::Unmatched,
            (false, true) => match lr {
                OptionResult::MatchFlag(nl) => {
                    let r = self.r.clone();
                    OptionResult::MatchFlag(Rc::new(App { l: nl, r }))
                }
                OptionResult::MatchOption(f) => {
                    let r = self.r.clone();
                    OptionResult::MatchOption(Rc::new(move |v: String| {
                        Rc::new(App { l: f(v), r: r.clone() }) as Rc<dyn AccNode<A>>
                    }))
                }
                OptionResult::Ambiguous => OptionResult::Ambiguous,
                OptionResult::Unmatched => unreachable!(),
            },
            (true, false) => match rr {
                OptionResult::MatchFlag(nr) => {
                    let l = self.l.clone();
                    OptionResult::MatchFlag(Rc::new(App { l, r: nr }))
                }
                OptionResult::MatchOption(g) => {
                    let l = self.l.clone();
                    OptionResult::MatchOption(Rc::new(move |v: String| {
                        Rc::new(App { l: l.clone(), r: g(v) }) as Rc<dyn AccNode<A>>
                    }))
                }
                OptionResult::Ambiguous => OptionResult::Ambiguous,
                OptionResult::Unmatched => unreachable!(),
            },
            (false, false) => OptionResult::Ambiguous,
        }
    }

    fn parse_arg(&self, arg: &str) -> Option<Rc<dyn AccNode<A>>> {
        if let Some(l) = self.l.parse_arg(arg) {
            return Some(Rc::new(App { l, r: self.r.clone() }));
        }
        if let Some(r) = self.r.parse_arg(arg) {
            return Some(Rc::new(App { l: self.l.clone(), r }));
        }
        None
    }

    fn parse_sub(&self, name: &str) -> Option<Rc<dyn AccNode<A>>> {
        if let Some(action) = self.l.parse_sub(name) {
            let frozen = Rc::new(Pure(self.r.result()));
            return Some(Rc::new(App { l: action, r: frozen }));
        }
        if let Some(action) = self.r.parse_sub(name) {
            let frozen = Rc::new(Pure(self.l.result()));
            return Some(Rc::new(App { l: frozen, r: action }));
        }
        None
    }

    fn result(&self) -> Res<A> {
        ap(self.l.result(), self.r.result())
    }
}

/// Alternative choice: first branch that matches wins.
pub struct OrElse<A> {
    pub l: Rc<dyn AccNode<A>>,
    pub r: Rc<dyn AccNode<A>>,
}

impl<A: Clone + 'static> AccNode<A> for OrElse<A> {
    fn parse_option(&self, name: Name<'_>) -> OptionResult<A> {
        let lr = self.l.parse_option(name);
        let rr = self.r.parse_option(name);
        match (is_unmatched(&lr), is_unmatched(&rr)) {
            (true, true) => OptionResult::Unmatched,
            (false, true) => lr,
            (true, false) => rr,
            (false, false) => OptionResult::Ambiguous,
        }
    }

    fn parse_arg(&self, arg: &str) -> Option<Rc<dyn AccNode<A>>> {
        let l2 = self.l.parse_arg(arg);
        let r2 = self.r.parse_arg(arg);
        match (l2, r2) {
            (Some(l), Some(r)) => Some(Rc::new(OrElse { l, r })),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }

    fn parse_sub(&self, name: &str) -> Option<Rc<dyn AccNode<A>>> {
        self.l.parse_sub(name).or_else(|| self.r.parse_sub(name))
    }

    fn result(&self) -> Res<A> {
        or_else(self.l.result(), self.r.result())
    }
}

/// Post-parse refinement, run only at finalization (§7).
pub struct Validate<X, A> {
    pub inner: Rc<dyn AccNode<X>>,
    pub f: Rc<dyn Fn(X) -> Res<A>>,
}

impl<X: Clone + 'static, A: Clone + 'static> AccNode<A> for Validate<X, A> {
    fn parse_option(&self, name: Name<'_>) -> OptionResult<A> {
        match self.inner.parse_option(name) {
            OptionResult::Unmatched => OptionResult::Unmatched,
            OptionResult::Ambiguous => OptionResult::Ambiguous,
            OptionResult::MatchFlag(next) => {
                OptionResult::MatchFlag(Rc::new(Validate { inner: next, f: self.f.clone() }))
            }
            OptionResult::MatchOption(g) => {
                let f = self.f.clone();
                OptionResult::MatchOption(Rc::new(move |v: String| {
                    Rc::new(Validate { inner: g(v), f: f.clone() }) as Rc<dyn AccNode<A>>
                }))
            }
        }
    }

    fn parse_arg(&self, arg: &str) -> Option<Rc<dyn AccNode<A>>> {
        self.inner
            .parse_arg(arg)
            .map(|next| Rc::new(Validate { inner: next, f: self.f.clone() }) as Rc<dyn AccNode<A>>)
    }

    fn parse_sub(&self, name: &str) -> Option<Rc<dyn AccNode<A>>> {
        self.inner
            .parse_sub(name)
            .map(|next| Rc::new(Validate { inner: next, f: self.f.clone() }) as Rc<dyn AccNode<A>>)
    }

    fn result(&self) -> Res<A> {
        let f = self.f.clone();
        self.inner.result().and_then(move |x| f(x))
    }
}
