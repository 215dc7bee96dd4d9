// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use pest::Span;

use crate::ast::Pos;

/// Position of the start of a span.
pub fn pos_of(span: &Span) -> Pos {
    let (line, col) = span.start_pos().line_col();
    Pos { line, col }
}

/// The whitespace-delimited word starting at `offset`, for error messages.
pub fn word_at(input: &str, offset: usize) -> String {
    match input.get(offset..).and_then(|rest| rest.split_whitespace().next()) {
        Some(word) => format!("{:?}", word),
        None => "end of input".into(),
    }
}

/// Render a number in plain decimal notation, always with a fractional
/// part (`1.0`, `0.000001`, `100000000000000000.0`).  Firmware generally does
/// not understand exponents.
pub fn format_number(n: f64) -> String {
    let short = format!("{:?}", n);
    if !short.contains('e') {
        return short;
    }
    let plain = n.to_string();
    if plain.contains('.') { plain } else { plain + ".0" }
}

/// Offset of the first bracket that opens more than `max` nested levels,
/// ignoring comments.
pub fn too_deep(input: &str, max: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_comment = false;
    let mut chars = input.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\n' if in_comment => in_comment = false,
            _ if in_comment => (),
            '/' if chars.peek().map(|&(_, c)| c) == Some('/') => in_comment = true,
            '(' | '{' => {
                depth += 1;
                if depth > max {
                    return Some(i);
                }
            }
            ')' | '}' => depth = depth.saturating_sub(1),
            _ => (),
        }
    }
    None
}
