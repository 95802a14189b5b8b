//! The option-description AST: an immutable value a caller builds once and can
//! parse many argument vectors against. Mirrors [`crate::acc`] one level up: each
//! node knows how to [`OptsNode::build`] its accumulator counterpart.
//!
//! The front-end combinator surface (`option()`, `flag()`, `mapN`, …) that turns
//! user intent into this tree is out of scope for this crate; what follows is the
//! algebra it would target.

use std::rc::Rc;

use crate::acc::{self, AccNode};
use crate::names::Names;
use crate::result::{Func, Res};

pub trait OptsNode<A> {
    fn build(&self) -> Rc<dyn AccNode<A>>;
}

/// A node in the description tree. Cheaply cloneable (an `Rc` underneath), so the
/// same `Opts<A>` can seed a fresh accumulator for every `parse` call.
pub struct Opts<A>(Rc<dyn OptsNode<A>>);

impl<A> Clone for Opts<A> {
    fn clone(&self) -> Self {
        Opts(self.0.clone())
    }
}

impl<A> Opts<A> {
    pub fn build(&self) -> Rc<dyn AccNode<A>> {
        self.0.build()
    }
}

struct PureNode<A>(Res<A>);

impl<A: Clone + 'static> OptsNode<A> for PureNode<A> {
    fn build(&self) -> Rc<dyn AccNode<A>> {
        Rc::new(acc::Pure(self.0.clone()))
    }
}

impl<A: Clone + 'static> Opts<A> {
    /// Always succeeds with `a`, matches nothing.
    pub fn pure(a: A) -> Opts<A> {
        Opts(Rc::new(PureNode(Res::success(a))))
    }

    /// Alternative: first branch that matches anything wins.
    pub fn or_else(l: Opts<A>, r: Opts<A>) -> Opts<A> {
        struct OrElseNode<A>(Opts<A>, Opts<A>);
        impl<A: Clone + 'static> OptsNode<A> for OrElseNode<A> {
            fn build(&self) -> Rc<dyn AccNode<A>> {
                Rc::new(acc::OrElse { l: self.0.build(), r: self.1.build() })
            }
        }
        Opts(Rc::new(OrElseNode(l, r)))
    }

    /// Wraps a named subparser, consumed once as a bare token.
    pub fn subcommand(name: &'static str, inner: Opts<A>) -> Opts<A> {
        struct SubcommandNode<A> {
            name: &'static str,
            inner: Opts<A>,
        }
        impl<A: Clone + 'static> OptsNode<A> for SubcommandNode<A> {
            fn build(&self) -> Rc<dyn AccNode<A>> {
                let inner = self.inner.clone();
                Rc::new(acc::Subcommand { name: self.name, build: Rc::new(move || inner.build()) })
            }
        }
        Opts(Rc::new(SubcommandNode { name, inner }))
    }
}

impl<X: Clone + 'static> Opts<X> {
    /// Post-parse refinement: runs only at finalization.
    pub fn validate<A: Clone + 'static>(self, f: impl Fn(X) -> Res<A> + 'static) -> Opts<A> {
        struct ValidateNode<X, A> {
            inner: Opts<X>,
            f: Rc<dyn Fn(X) -> Res<A>>,
        }
        impl<X: Clone + 'static, A: Clone + 'static> OptsNode<A> for ValidateNode<X, A> {
            fn build(&self) -> Rc<dyn AccNode<A>> {
                Rc::new(acc::Validate { inner: self.inner.build(), f: self.f.clone() })
            }
        }
        Opts(Rc::new(ValidateNode { inner: self, f: Rc::new(f) }))
    }
}

/// Independent product: both `f` and `a` must parse.
pub fn app<X: Clone + 'static, A: Clone + 'static>(f: Opts<Func<X, A>>, a: Opts<X>) -> Opts<A> {
    struct AppNode<X, A> {
        f: Opts<Func<X, A>>,
        a: Opts<X>,
    }
    impl<X: Clone + 'static, A: Clone + 'static> OptsNode<A> for AppNode<X, A> {
        fn build(&self) -> Rc<dyn AccNode<A>> {
            Rc::new(acc::App { l: self.f.build(), r: self.a.build() })
        }
    }
    Opts(Rc::new(AppNode { f, a }))
}

/// Combine two independently-typed `Opts` into one producing a pair; built on
/// top of `app`/`pure`, the same way a front-end `construct!`/`mapN` would.
pub fn zip<X: Clone + 'static, Y: Clone + 'static>(x: Opts<X>, y: Opts<Y>) -> Opts<(X, Y)> {
    let f: Opts<Func<X, Func<Y, (X, Y)>>> = Opts::pure(Rc::new(move |a: X| {
        Rc::new(move |b: Y| (a.clone(), b)) as Func<Y, (X, Y)>
    }) as Func<X, Func<Y, (X, Y)>>);
    app(app(f, x), y)
}

struct LeafNode<L> {
    leaf: L,
}

impl<L> OptsNode<Vec<String>> for LeafNode<L>
where
    L: Fn() -> Rc<dyn AccNode<Vec<String>>>,
{
    fn build(&self) -> Rc<dyn AccNode<Vec<String>>> {
        (self.leaf)()
    }
}

/// `Repeated(Regular(names, metavar))`: one or more `--name value` occurrences,
/// in input order.
pub fn repeated_regular(names: Names) -> Opts<Vec<String>> {
    Opts(Rc::new(LeafNode {
        leaf: move || {
            Rc::new(acc::Regular { names: names.clone(), values: Vec::new() }) as Rc<dyn AccNode<Vec<String>>>
        },
    }))
}

/// `Single(Regular(names, metavar))`: last occurrence wins.
pub fn single_regular(names: Names) -> Opts<String> {
    repeated_regular(names).validate(|v: Vec<String>| Res::success(v.into_iter().last().unwrap()))
}

/// `Repeated(Argument(metavar))`: positional tokens in input order, unbounded.
pub fn repeated_argument(metavar: &'static str) -> Opts<Vec<String>> {
    Opts(Rc::new(LeafNode {
        leaf: move || {
            Rc::new(acc::Argument { metavar, limit: usize::MAX, values: Vec::new() }) as Rc<dyn AccNode<Vec<String>>>
        },
    }))
}

/// `Single(Argument(metavar))`: exactly one positional token; the first one
/// supplied (the leaf already caps collection at one, per the source's asymmetry).
pub fn single_argument(metavar: &'static str) -> Opts<String> {
    struct SingleArgNode {
        metavar: &'static str,
    }
    impl OptsNode<Vec<String>> for SingleArgNode {
        fn build(&self) -> Rc<dyn AccNode<Vec<String>>> {
            Rc::new(acc::Argument { metavar: self.metavar, limit: 1, values: Vec::new() })
        }
    }
    Opts(Rc::new(SingleArgNode { metavar })).validate(|v: Vec<String>| Res::success(v.into_iter().next().unwrap()))
}

/// `Repeated(Flag(names))`: one entry per occurrence.
pub fn repeated_flag(names: Names) -> Opts<Vec<()>> {
    struct FlagLeaf {
        names: Names,
    }
    impl OptsNode<Vec<()>> for FlagLeaf {
        fn build(&self) -> Rc<dyn AccNode<Vec<()>>> {
            Rc::new(acc::Flag { names: self.names.clone(), count: 0 })
        }
    }
    Opts(Rc::new(FlagLeaf { names }))
}

/// `Single(Flag(names))`: presence-only, unit regardless of count.
pub fn single_flag(names: Names) -> Opts<()> {
    repeated_flag(names).validate(|_: Vec<()>| Res::success(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_parses_empty_input() {
        let opts: Opts<i32> = Opts::pure(42);
        match opts.build().result() {
            Res::Return(v) => assert_eq!(v, 42),
            _ => panic!("expected Return"),
        }
    }

    #[test]
    fn single_flag_builds_and_defaults_missing() {
        let opts = single_flag(Names::short('a'));
        match opts.build().result() {
            Res::Missing(r) => assert_eq!(r[0].flags, vec!["-a"]),
            _ => panic!("expected Missing"),
        }
    }
}
