// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Diagnostics produced by parsing and code generation.
//!
//! Every failure aborts the compilation; there is exactly one diagnostic per
//! failed run.

use std::fmt;
use itertools::Itertools;
use strum_macros::Display;
use thiserror::Error;

use crate::ast::{Op, Pos, Type};
use crate::codegen::Axis;

/// Coarse classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Kind {
    Syntax,
    Validation,
    Type,
    UndefinedIdentifier,
    UndefinedLiteral,
    Redeclaration,
    Arithmetic,
}

#[derive(Debug, Error, PartialEq)]
pub enum ErrType {
    #[error("syntax error: expected {expected}, found {found}")]
    Syntax { expected: String, found: String },
    #[error("invalid parameters: {}", describe_params(.illegal, .missing, .duplicate))]
    InvalidParameters { illegal: Vec<String>, missing: Vec<Axis>, duplicate: Vec<String> },
    #[error("constant {name} is declared as {declared} but its value is a {actual}")]
    ConstType { name: String, declared: Type, actual: Type },
    #[error("operator {op} cannot be applied to {actual} operands")]
    OperandType { op: String, actual: Type },
    #[error("axis {axis} needs a number, got a {actual}")]
    AxisType { axis: String, actual: Type },
    #[error("condition must be a boolean, got a {0}")]
    GuardType(Type),
    #[error("the constant {0} is not defined")]
    UndefinedIdentifier(String),
    #[error("undefined literal {0:?}")]
    UndefinedLiteral(String),
    #[error("the constant {0} is already defined")]
    Redeclared(String),
    #[error("division by zero attempted")]
    DivByZero,
    #[error("operator {0} overflows to a non-finite number")]
    NonFinite(String),
}

fn describe_params(illegal: &[String], missing: &[Axis], duplicate: &[String]) -> String {
    let mut msg = vec![];
    if !illegal.is_empty() {
        msg.push(format!("illegal: {}", illegal.join(", ")));
    }
    if !missing.is_empty() {
        msg.push(format!("missing: {}", missing.iter().join(", ")));
    }
    if !duplicate.is_empty() {
        msg.push(format!("duplicates: {}", duplicate.join(", ")));
    }
    msg.join("; ")
}

impl ErrType {
    pub fn kind(&self) -> Kind {
        match self {
            ErrType::Syntax { .. } => Kind::Syntax,
            ErrType::InvalidParameters { .. } => Kind::Validation,
            ErrType::ConstType { .. } |
            ErrType::OperandType { .. } |
            ErrType::AxisType { .. } |
            ErrType::GuardType(_) => Kind::Type,
            ErrType::UndefinedIdentifier(_) => Kind::UndefinedIdentifier,
            ErrType::UndefinedLiteral(_) => Kind::UndefinedLiteral,
            ErrType::Redeclared(_) => Kind::Redeclaration,
            ErrType::DivByZero |
            ErrType::NonFinite(_) => Kind::Arithmetic,
        }
    }

    pub(crate) fn operand<T>(op: Op, actual: Type) -> Result<T, Self> {
        Err(ErrType::OperandType { op: op.to_string(), actual })
    }
}

/// An error together with the source position it was found at.
#[derive(Debug, PartialEq)]
pub struct Diagnostic {
    pub pos: Option<Pos>,
    pub errtype: ErrType,
}

impl Diagnostic {
    pub fn new(errtype: ErrType, pos: Option<Pos>) -> Self {
        Diagnostic { pos, errtype }
    }

    pub fn kind(&self) -> Kind {
        self.errtype.kind()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "Error in line {}, column {}: ", pos.line, pos.col)?,
            None => write!(f, "Error: ")?,
        }
        write!(f, "{}", self.errtype)
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.errtype)
    }
}
