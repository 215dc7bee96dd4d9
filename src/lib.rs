// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A compiler for pg-code, a small language describing toolpath movements,
//! into G-code for CNC machines and 3D printers.
//!
//! The source is parsed into an AST using the Pest parser library, then the
//! code generator resolves constants and conditionals at compile time and
//! produces a flat list of G-code instructions.
//!
//! ## Basic usage
//!
//! Use `pgc::parse::parse` to get an AST, then hand it to
//! `pgc::codegen::Generator` (or `pgc::codegen::transform` for the default
//! configuration).  `pgc::compile` does both steps in one go:
//!
//! ```rust
//! let source = "
//!     const lift : number = 3
//!     print on
//!     move print x=1 y=2 z=0 s=100
//!     if lift > 0 {
//!         move x=1 y=2 z=lift s=100
//!     }
//!     pause
//! ";
//! let gcode = pgc::compile("demo.pg", source).unwrap();
//! assert_eq!(gcode, "M3\nG1 X1.0 Y2.0 Z0.0 S100.0\nG0 X1.0 Y2.0 Z3.0 S100.0\nM0");
//! ```
//!
//! ## The language
//!
//! * `move [print] x=.. y=.. z=.. s=..`: a move, G1 with `print`, G0
//!   without.  All four axes must be given exactly once, in any order.
//! * `print on`, `print off`: switch the print head (M3/M5).
//! * `pause`: M0.
//! * `const name : number = expr` / `const name : boolean = expr`
//! * `if expr { ... }`: evaluated at compile time.
//!
//! Errors from any stage are reported as a single `diag::Diagnostic`.

pub mod ast;
pub mod codegen;
pub mod diag;
pub mod parse;

// internal helpers
pub(crate) mod util;

/// Parse and compile pg-code source with the default configuration,
/// returning the G-code text.
pub fn compile(filename: &str, input: &str) -> Result<String, diag::Diagnostic> {
    let program = parse::parse(filename, input)?;
    Ok(codegen::transform(&program)?.to_string())
}
