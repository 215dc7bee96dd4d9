// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use itertools::Itertools;
use strum_macros::{Display, EnumIter};

use crate::ast::Type;
use crate::util::format_number;

/// A move parameter understood by the target machine.
///
/// X, Y and Z are spatial, S is the speed (or auxiliary) word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter)]
pub enum Axis {
    X, Y, Z, S,
}

impl Axis {
    /// Axis names are accepted in either case.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "x" | "X" => Axis::X,
            "y" | "Y" => Axis::Y,
            "z" | "Z" => Axis::Z,
            "s" | "S" => Axis::S,
            _ => return None
        })
    }
}

/// The value of a constant or of an evaluated expression.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Value {
    Num(f64),
    Bool(bool),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Num(_) => Type::Number,
            Value::Bool(_) => Type::Boolean,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Target position of a move, in emission order.
#[derive(Clone, PartialEq, Debug)]
pub struct Coords(pub Vec<(Axis, f64)>);

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|(ax, v)| format!("{}{}", ax, format_number(*v))).join(" "))
    }
}

/// Represents all machine instructions that pg-code can produce.
#[derive(Clone, PartialEq, Debug)]
pub enum Instr {
    RapidMove(Coords),  // G0
    Move(Coords),       // G1
    Pause,              // M0
    HeadOn,             // M3
    HeadOff,            // M5
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instr::RapidMove(c) => write!(f, "G0 {}", c),
            Instr::Move(c) => write!(f, "G1 {}", c),
            Instr::Pause => write!(f, "M0"),
            Instr::HeadOn => write!(f, "M3"),
            Instr::HeadOff => write!(f, "M5"),
        }
    }
}

/// A machine instruction together with the pg-code line it came from.
#[derive(Clone, PartialEq, Debug)]
pub struct Instruction {
    pub source_line: usize,
    pub instr: Instr,
}

/// The compiled program.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct GCode {
    pub instructions: Vec<Instruction>,
}

impl fmt::Display for GCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.instructions.iter().map(|i| &i.instr).join("\n"))
    }
}
