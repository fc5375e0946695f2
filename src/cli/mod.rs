//! Hand-rolled argument parsing for the three consumer binaries.
//!
//! The teacher crate depends on `clap` but never calls it — every flag is
//! parsed by hand in `cli/args.rs` to match the exact short/long/aggregated
//! option syntax of the original C `main()`. This crate follows the same
//! *used* pattern: the option surface this spec names (digit-accumulation
//! `-N`, `--long=value`, aggregated short flags) is exactly the GNU-getopt
//! shape the teacher's own parser targets, so `clap` stays an unused,
//! intentionally-dropped dependency (see DESIGN.md).

pub mod constants;
pub mod cut_args;
pub mod fold_args;
pub mod unorm_args;
