// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Display, Formatter};

use crate::util::format_number;

/// Line and column of a syntax element, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug)]
pub struct Program {
    pub filename: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug)]
pub struct Statement {
    pub pos: Pos,
    pub kind: StmtKind,
}

#[derive(Debug)]
pub enum StmtKind {
    /// `move [print] x=.. y=..`; `print` selects a printing (G1) move.
    Move { print: bool, coords: Vec<Coord> },
    /// `print on` / `print off`
    PrintHead(bool),
    Pause,
    Const(ConstDecl),
    If(Expr, Block),
}

#[derive(Debug, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

/// A coordinate assignment.  The axis name is kept as written, so that
/// unknown axes can be reported during code generation.
#[derive(Debug)]
pub struct Coord {
    pub axis: String,
    pub value: Expr,
}

#[derive(Debug)]
pub struct ConstDecl {
    pub name: String,
    pub ty: Type,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Type {
    #[strum(serialize = "number")]
    Number,
    #[strum(serialize = "boolean")]
    Boolean,
}

#[derive(Debug)]
pub enum Expr {
    Num(f64),
    Bool(bool),
    Const(String),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Op(Op, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mul,
    Div,
    Add,
    Sub,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}\n", stmt)?;
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.kind {
            StmtKind::Move { print, coords } => {
                write!(f, "move")?;
                if *print {
                    write!(f, " print")?;
                }
                for coord in coords {
                    write!(f, " {}", coord)?;
                }
                Ok(())
            }
            StmtKind::PrintHead(on) => write!(f, "print {}", if *on { "on" } else { "off" }),
            StmtKind::Pause => write!(f, "pause"),
            StmtKind::Const(decl) => write!(f, "const {} : {} = {}", decl.name, decl.ty, decl.value),
            StmtKind::If(guard, block) => write!(f, "if {} {}", guard, block),
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.statements {
            write!(f, " {}", stmt)?;
        }
        write!(f, " }}")
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}={}", self.axis, self.value)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", format_number(*n)),
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Const(name) => write!(f, "{}", name),
            Expr::Not(ex) => match **ex {
                Expr::Op(..) => write!(f, "not ({})", ex),
                _ => write!(f, "not {}", ex),
            },
            Expr::Neg(ex) => match **ex {
                Expr::Op(..) => write!(f, "-({})", ex),
                _ => write!(f, "-{}", ex),
            },
            Expr::Op(op, lhs, rhs) => {
                match **lhs {
                    Expr::Op(..) => write!(f, "({}) {} ", lhs, op)?,
                    _ => write!(f, "{} {} ", lhs, op)?,
                }
                match **rhs {
                    Expr::Op(..) => write!(f, "({})", rhs),
                    _ => write!(f, "{}", rhs),
                }
            }
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Op::Mul => "*",
            Op::Div => "/",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Eq  => "==",
            Op::Ne  => "!=",
            Op::Gt  => ">",
            Op::Ge  => ">=",
            Op::Lt  => "<",
            Op::Le  => "<=",
            Op::And => "and",
            Op::Or  => "or",
        })
    }
}
