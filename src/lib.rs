//! The accumulator engine behind an applicative command-line argument parser.
//!
//! A caller (the combinator front-end, out of scope here) builds an [`opts::Opts`]
//! tree describing the options, flags, positionals and subcommands a program
//! accepts. [`driver::run`] walks an argument vector against that tree and
//! returns either the parsed value or a [`driver::Help`] carrying the ordered
//! error messages a renderer (also out of scope) would turn into text.
//!
//! Module map:
//! - [`result`] — the three-valued `Return`/`Missing`/`Fail` outcome and its
//!   applicative (`ap`) and alternative (`or_else`) combinators.
//! - [`names`] — long/short option names.
//! - [`opts`] — the immutable option-description AST.
//! - [`acc`] — the accumulator tree `fromOpts` builds, and its `parse_option`/
//!   `parse_arg`/`parse_sub`/`result` operations.
//! - [`driver`] — the token scanner that drives a full parse.

pub mod acc;
pub mod driver;
pub mod names;
pub mod opts;
pub mod result;

pub use acc::{AccNode, OptionResult};
pub use driver::{run, Command, Help};
pub use names::{Name, Names};
pub use opts::Opts;
pub use result::{Func, Requirement, Res};
