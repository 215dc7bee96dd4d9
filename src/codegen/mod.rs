// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

mod enums;
mod symbols;
mod validate;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::ast::*;
use crate::diag::{Diagnostic, ErrType};

pub use self::enums::*;
pub use self::symbols::*;
pub use self::validate::validate;

/// Order of the axis words in emitted moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AxisOrder {
    /// Keep the order in which the axes were written.
    Source,
    /// Sort axes by their position in the required axis list.
    Canonical,
}

impl Default for AxisOrder {
    fn default() -> Self { AxisOrder::Source }
}

/// Settings for a `Generator`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Axes that every move must give, exactly once each.
    pub axes: Vec<Axis>,
    pub order: AxisOrder,
    pub redeclare: Redeclare,
    /// Constants that are declared before the program starts.
    pub predefined: Vec<(String, Value)>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            axes: Axis::iter().collect(),
            order: AxisOrder::default(),
            redeclare: Redeclare::default(),
            predefined: vec![],
        }
    }
}

/// The Generator translates a parsed program into G-code.
///
/// Constant expressions and conditionals are resolved completely during
/// generation, so the output is a flat list of machine instructions.
pub struct Generator {
    config: Config,
    symbols: SymbolTable,
}

impl Generator {
    pub fn new(mut config: Config) -> Self {
        // an axis listed twice would never be satisfied
        config.axes = config.axes.into_iter().unique().collect();
        let symbols = SymbolTable::new(config.redeclare);
        Generator { config, symbols }
    }

    /// Generate code for a whole program.  The symbol table starts out with
    /// only the predefined constants on every call.
    pub fn generate(&mut self, program: &Program) -> Result<GCode, Diagnostic> {
        self.symbols = SymbolTable::new(self.config.redeclare);
        for (name, value) in &self.config.predefined {
            self.symbols.declare(name, value.ty(), *value)
                        .map_err(|e| Diagnostic::new(e, None))?;
        }
        let instructions = self.gen_statements(&program.statements)?;
        Ok(GCode { instructions })
    }

    /// Constants known after the last `generate` call.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // -- private API --

    fn gen_statements(&mut self, statements: &[Statement]) -> Result<Vec<Instruction>, Diagnostic> {
        let mut out = vec![];
        for stmt in statements {
            out.extend(self.gen_statement(stmt)?);
        }
        Ok(out)
    }

    fn gen_statement(&mut self, stmt: &Statement) -> Result<Vec<Instruction>, Diagnostic> {
        let at = |e: ErrType| Diagnostic::new(e, Some(stmt.pos));
        let instr = match &stmt.kind {
            StmtKind::Move { print, coords } => {
                let coords = self.gen_coords(coords).map_err(at)?;
                if *print { Instr::Move(coords) } else { Instr::RapidMove(coords) }
            }
            StmtKind::PrintHead(true) => Instr::HeadOn,
            StmtKind::PrintHead(false) => Instr::HeadOff,
            StmtKind::Pause => Instr::Pause,
            StmtKind::Const(decl) => {
                let value = self.eval_expr(&decl.value).map_err(at)?;
                self.symbols.declare(&decl.name, decl.ty, value).map_err(at)?;
                return Ok(vec![]);
            }
            StmtKind::If(guard, block) => {
                return match self.eval_expr(guard).map_err(at)? {
                    Value::Bool(true) => self.gen_statements(&block.statements),
                    Value::Bool(false) => Ok(vec![]),
                    other => Err(at(ErrType::GuardType(other.ty()))),
                };
            }
        };
        Ok(vec![Instruction { source_line: stmt.pos.line, instr }])
    }

    fn gen_coords(&self, coords: &[Coord]) -> Result<Coords, ErrType> {
        // Values first, so that undefined constants are reported before
        // problems with the parameter set.
        let mut words = Vec::with_capacity(coords.len());
        for coord in coords {
            match self.eval_expr(&coord.value)? {
                Value::Num(n) => words.push((coord.axis.as_str(), n)),
                other => return Err(ErrType::AxisType { axis: coord.axis.clone(),
                                                        actual: other.ty() }),
            }
        }
        let mut axes = validate(&words, &self.config.axes)?;
        if self.config.order == AxisOrder::Canonical {
            let required = &self.config.axes;
            axes.sort_by_key(|(ax, _)| required.iter().position(|r| r == ax));
        }
        Ok(Coords(axes))
    }

    fn eval_expr(&self, expr: &Expr) -> Result<Value, ErrType> {
        Ok(match expr {
            Expr::Num(n) => Value::Num(*n),
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Const(name) => self.symbols.lookup(name)?,
            Expr::Not(ex) => match self.eval_expr(ex)? {
                Value::Bool(b) => Value::Bool(!b),
                other => return Err(ErrType::OperandType { op: "not".into(),
                                                           actual: other.ty() }),
            },
            Expr::Neg(ex) => match self.eval_expr(ex)? {
                Value::Num(n) => Value::Num(-n),
                other => return ErrType::operand(Op::Sub, other.ty()),
            },
            Expr::Op(op, lhs, rhs) => {
                let lhs = self.eval_expr(lhs)?;
                let rhs = self.eval_expr(rhs)?;
                eval_op(*op, lhs, rhs)?
            }
        })
    }
}

fn eval_op(op: Op, lhs: Value, rhs: Value) -> Result<Value, ErrType> {
    use self::Value::*;
    Ok(match (op, lhs, rhs) {
        (Op::Eq, a, b) if a.ty() == b.ty() => Bool(a == b),
        (Op::Ne, a, b) if a.ty() == b.ty() => Bool(a != b),
        (Op::And, Bool(a), Bool(b)) => Bool(a && b),
        (Op::Or, Bool(a), Bool(b)) => Bool(a || b),
        (Op::Div, Num(_), Num(b)) if b == 0. => return Err(ErrType::DivByZero),
        (_, Num(a), Num(b)) => match op {
            Op::Add => finite(op, a + b)?,
            Op::Sub => finite(op, a - b)?,
            Op::Mul => finite(op, a * b)?,
            Op::Div => finite(op, a / b)?,
            Op::Gt => Bool(a > b),
            Op::Ge => Bool(a >= b),
            Op::Lt => Bool(a < b),
            Op::Le => Bool(a <= b),
            _ => return ErrType::operand(op, Type::Number),
        },
        // report the operand that has the wrong type
        (Op::And, a, b) | (Op::Or, a, b) => {
            let bad = if a.ty() != Type::Boolean { a } else { b };
            return ErrType::operand(op, bad.ty());
        }
        (Op::Eq, a, _) | (Op::Ne, a, _) => return ErrType::operand(op, a.ty()),
        (_, a, b) => {
            let bad = if a.ty() != Type::Number { a } else { b };
            return ErrType::operand(op, bad.ty());
        }
    })
}

fn finite(op: Op, n: f64) -> Result<Value, ErrType> {
    if n.is_finite() {
        Ok(Value::Num(n))
    } else {
        Err(ErrType::NonFinite(op.to_string()))
    }
}

/// Generate G-code for a parsed program with the default configuration.
pub fn transform(program: &Program) -> Result<GCode, Diagnostic> {
    Generator::new(Config::default()).generate(program)
}
