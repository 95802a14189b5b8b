//! Three-valued parse outcome and its applicative/alternative algebra.
//!
//! `Res<A>` is the engine's internal result type: a successful value, a set of
//! requirements that would have satisfied the parse had they been supplied, or a
//! list of hard-error messages. Accumulator nodes combine partial `Res` values
//! the same way `Opts` nodes combine partial parsers: `App` via [`ap`], `OrElse`
//! via [`or_else`], `Validate` via [`Res::and_then`].

use std::rc::Rc;

/// A function value threaded through `App` nodes: the left slot of a product
/// always carries a function from the right slot's output to the combined output.
pub type Func<X, A> = Rc<dyn Fn(X) -> A>;

/// What a branch still needs in order to succeed. Multiple requirements combine
/// componentwise when two alternative branches are merged (see [`Requirement::merge`]).
#[derive(Debug, Clone, Default)]
pub struct Requirement {
    pub flags: Vec<String>,
    pub commands: Vec<String>,
    pub argument: bool,
}

impl Requirement {
    pub fn flag(label: String) -> Self {
        Requirement { flags: vec![label], commands: Vec::new(), argument: false }
    }

    pub fn command(name: &'static str) -> Self {
        Requirement { flags: Vec::new(), commands: vec![name.to_string()], argument: false }
    }

    pub fn argument() -> Self {
        Requirement { flags: Vec::new(), commands: Vec::new(), argument: true }
    }

    /// Componentwise merge used when two `OrElse` branches are both missing: flags and
    /// commands concatenate, `argument` ORs.
    #[must_use]
    pub fn merge(mut self, other: Requirement) -> Self {
        self.flags.extend(other.flags);
        self.commands.extend(other.commands);
        self.argument |= other.argument;
        self
    }

    /// Renders as `Missing expected flag --x, or command (a or b), or argument`.
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        match self.flags.len() {
            0 => {}
            1 => parts.push(format!("flag {}", self.flags[0])),
            _ => parts.push(format!("flag ({})", self.flags.join(" or "))),
        }
        match self.commands.len() {
            0 => {}
            1 => parts.push(format!("command {}", self.commands[0])),
            _ => parts.push(format!("command ({})", self.commands.join(" or "))),
        }
        if self.argument {
            parts.push("argument".to_string());
        }
        format!("Missing expected {}", parts.join(", or "))
    }
}

/// The three-valued parse outcome.
#[derive(Debug, Clone)]
pub enum Res<A> {
    Return(A),
    Missing(Vec<Requirement>),
    Fail(Vec<String>),
}

impl<A> Res<A> {
    pub fn success(a: A) -> Self {
        Res::Return(a)
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Res::Fail(vec![msg.into()])
    }

    pub fn missing(req: Requirement) -> Self {
        Res::Missing(vec![req])
    }

    pub fn missing_flag(label: String) -> Self {
        Res::missing(Requirement::flag(label))
    }

    pub fn missing_command(name: &'static str) -> Self {
        Res::missing(Requirement::command(name))
    }

    pub fn missing_argument() -> Self {
        Res::missing(Requirement::argument())
    }

    /// Propagates `Missing`/`Fail` unchanged, otherwise continues as `f(a)`.
    pub fn and_then<B>(self, f: impl FnOnce(A) -> Res<B>) -> Res<B> {
        match self {
            Res::Return(a) => f(a),
            Res::Missing(r) => Res::Missing(r),
            Res::Fail(m) => Res::Fail(m),
        }
    }
}

/// Applicative product: combine two independent parsers' outcomes into one.
///
/// Both-missing merges requirements; either side failing downgrades any missing
/// requirements on the other side into rendered messages, since failures dominate.
pub fn ap<X, A>(ff: Res<Func<X, A>>, fa: Res<X>) -> Res<A> {
    match (ff, fa) {
        (Res::Return(f), Res::Return(a)) => Res::Return(f(a)),
        (Res::Return(_), Res::Missing(r)) => Res::Missing(r),
        (Res::Return(_), Res::Fail(r)) => Res::Fail(r),
        (Res::Missing(l), Res::Return(_)) => Res::Missing(l),
        (Res::Missing(mut l), Res::Missing(mut r)) => {
            l.append(&mut r);
            Res::Missing(l)
        }
        (Res::Missing(l), Res::Fail(r)) => {
            let mut msgs: Vec<String> = l.iter().map(Requirement::render).collect();
            msgs.extend(r);
            Res::Fail(msgs)
        }
        (Res::Fail(l), Res::Return(_)) => Res::Fail(l),
        (Res::Fail(mut l), Res::Missing(r)) => {
            l.extend(r.iter().map(Requirement::render));
            Res::Fail(l)
        }
        (Res::Fail(mut l), Res::Fail(mut r)) => {
            l.append(&mut r);
            Res::Fail(l)
        }
    }
}

/// Alternative choice: the first branch that matched anything wins. If neither
/// matched, the two sides' first requirement merge into one combined requirement.
pub fn or_else<A>(x: Res<A>, y: Res<A>) -> Res<A> {
    match x {
        Res::Return(_) | Res::Fail(_) => x,
        Res::Missing(lm) => match y {
            Res::Missing(rm) => {
                let l0 = lm.into_iter().next().unwrap_or_default();
                let r0 = rm.into_iter().next().unwrap_or_default();
                Res::Missing(vec![l0.merge(r0)])
            }
            other => other,
        },
    }
}
