// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use itertools::Itertools;
use pest_derive::Parser;
use pest::{Parser, error::{Error, ErrorVariant, InputLocation, LineColLocation},
           iterators::{Pair, Pairs}};

use crate::ast::*;
use crate::diag::{Diagnostic, ErrType};
use crate::util::{pos_of, too_deep, word_at};

#[derive(Parser)]
#[grammar = "pgcode.pest"]
pub struct PgcodeParser;

type ParseResult<T> = Result<T, Diagnostic>;

/// Deepest allowed nesting of parentheses and blocks.  The grammar is
/// recursive, so this bounds the stack used by the parser.
pub const MAX_NESTING: usize = 32;

/// Convert the text of a boolean literal.
pub fn bool_literal(text: &str) -> Result<bool, ErrType> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ErrType::UndefinedLiteral(text.into())),
    }
}

/// Convert the text of a number literal.  Literals too large for an `f64`
/// are rejected.
pub fn num_literal(text: &str) -> Result<f64, ErrType> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ErrType::UndefinedLiteral(text.into())),
    }
}

fn literal<T>(pair: &Pair<Rule>, convert: fn(&str) -> Result<T, ErrType>) -> ParseResult<T> {
    convert(pair.as_str()).map_err(|e| Diagnostic::new(e, Some(pos_of(&pair.as_span()))))
}

fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::kw_move => "`move`",
        Rule::kw_print | Rule::print_marker => "`print`",
        Rule::kw_pause => "`pause`",
        Rule::kw_const => "`const`",
        Rule::kw_if => "`if`",
        Rule::switch => "`on` or `off`",
        Rule::type_name => "type name",
        Rule::ident => "identifier",
        Rule::number => "number",
        Rule::boolean => "boolean",
        Rule::block => "block",
        Rule::coord => "coordinate",
        Rule::op_or | Rule::op_and | Rule::op_cmp |
        Rule::op_add | Rule::op_mul => "operator",
        _ => "expression",
    }
}

fn syntax_error(input: &str, e: Error<Rule>) -> Diagnostic {
    let offset = match e.location {
        InputLocation::Pos(p) => p,
        InputLocation::Span((start, _)) => start,
    };
    let (line, col) = match e.line_col {
        LineColLocation::Pos(lc) => lc,
        LineColLocation::Span(lc, _) => lc,
    };
    let expected = match e.variant {
        ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() =>
            positives.into_iter().map(describe).unique().join(" or "),
        ErrorVariant::ParsingError { .. } => "something else".into(),
        ErrorVariant::CustomError { message } => message,
    };
    Diagnostic::new(ErrType::Syntax { expected, found: word_at(input, offset) },
                    Some(Pos { line, col }))
}

fn make_expr(pair: Pair<Rule>) -> ParseResult<Expr> {
    match pair.as_rule() {
        Rule::number => return Ok(Expr::Num(literal(&pair, num_literal)?)),
        Rule::boolean => return Ok(Expr::Bool(literal(&pair, bool_literal)?)),
        Rule::ident => return Ok(Expr::Const(pair.as_str().into())),
        Rule::expr_unary => {
            // prefix operators, then the operand
            let mut inner: Vec<_> = pair.into_inner().collect();
            let operand = inner.pop().expect("operand");
            let mut expr = make_expr(operand)?;
            for op in inner.into_iter().rev() {
                expr = match op.as_rule() {
                    Rule::op_not => Expr::Not(Box::new(expr)),
                    _ => Expr::Neg(Box::new(expr)),
                };
            }
            return Ok(expr);
        }
        _ => ()
    }

    // left-associative binary operators
    let mut lhs = None;
    let mut op = None;
    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::op_or => op = Some(Op::Or),
            Rule::op_and => op = Some(Op::And),
            Rule::op_cmp => op = Some(match pair.as_str() {
                "==" => Op::Eq,
                "!=" => Op::Ne,
                "<=" => Op::Le,
                ">=" => Op::Ge,
                "<"  => Op::Lt,
                _    => Op::Gt,
            }),
            Rule::op_add => op = Some(match pair.as_str() {
                "+" => Op::Add, _ => Op::Sub,
            }),
            Rule::op_mul => op = Some(match pair.as_str() {
                "*" => Op::Mul, _ => Op::Div,
            }),
            _ => {
                let rhs = make_expr(pair)?;
                lhs = Some(match (lhs.take(), op.take()) {
                    (Some(lhs), Some(op)) => Expr::Op(op, Box::new(lhs), Box::new(rhs)),
                    _ => rhs,
                });
            }
        }
    }
    Ok(lhs.expect("no children in expr?"))
}

fn make_block(pairs: Pairs<Rule>) -> ParseResult<Block> {
    let mut block = Block::default();
    for pair in pairs {
        block.statements.push(make_statement(pair)?);
    }
    Ok(block)
}

fn make_statement(pair: Pair<Rule>) -> ParseResult<Statement> {
    let pos = pos_of(&pair.as_span());
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    // every statement starts with its keyword
    inner.next();
    let kind = match rule {
        Rule::move_stmt => {
            let mut print = false;
            let mut coords = vec![];
            for pair in inner {
                match pair.as_rule() {
                    Rule::print_marker => print = true,
                    Rule::coord => {
                        let (axis, value) = pair.into_inner().collect_tuple().expect("children");
                        coords.push(Coord { axis: axis.as_str().into(), value: make_expr(value)? });
                    }
                    _ => unreachable!()
                }
            }
            StmtKind::Move { print, coords }
        }
        Rule::print_stmt => {
            let (switch,) = inner.collect_tuple().expect("one child");
            StmtKind::PrintHead(switch.as_str() == "on")
        }
        Rule::pause_stmt => StmtKind::Pause,
        Rule::const_decl => {
            let (name, ty, value) = inner.collect_tuple().expect("children");
            StmtKind::Const(ConstDecl {
                name: name.as_str().into(),
                ty: match ty.as_str() {
                    "number" => Type::Number,
                    _ => Type::Boolean,
                },
                value: make_expr(value)?,
            })
        }
        Rule::condition => {
            let (guard, block) = inner.collect_tuple().expect("children");
            StmtKind::If(make_expr(guard)?, make_block(block.into_inner())?)
        }
        _ => unreachable!()
    };
    Ok(Statement { pos, kind })
}

/// Parse pg-code source into a `Program`.
///
/// Parsing stops at the first error; no partial program is returned.
pub fn parse(filename: &str, input: &str) -> ParseResult<Program> {
    if let Some(offset) = too_deep(input, MAX_NESTING) {
        let pos = pest::Position::new(input, offset).map(|p| {
            let (line, col) = p.line_col();
            Pos { line, col }
        });
        return Err(Diagnostic::new(
            ErrType::Syntax { expected: format!("at most {} nested levels", MAX_NESTING),
                              found: word_at(input, offset) },
            pos));
    }
    let mut pairs = PgcodeParser::parse(Rule::program, input)
        .map_err(|e| syntax_error(input, e))?;
    let mut prog = Program { filename: filename.into(), statements: vec![] };
    for pair in pairs.next().expect("program").into_inner() {
        if pair.as_rule() != Rule::EOI {
            prog.statements.push(make_statement(pair)?);
        }
    }
    Ok(prog)
}
