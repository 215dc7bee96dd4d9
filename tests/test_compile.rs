// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use itertools::Itertools;
use pgc::ast::{Pos, Type};
use pgc::codegen::*;
use pgc::diag::{Diagnostic, ErrType, Kind};
use pgc::{compile, parse};

fn compile_with(config: Config, src: &str) -> Result<GCode, Diagnostic> {
    let prog = parse::parse("testfile", src)?;
    Generator::new(config).generate(&prog)
}

fn error_of(src: &str) -> Diagnostic {
    compile("testfile", src).unwrap_err()
}

#[test]
fn test_basic() {
    assert_eq!(compile("testfile", "move x=1 y=2 z=3 s=0").unwrap(),
               "G0 X1.0 Y2.0 Z3.0 S0.0");
    assert_eq!(compile("testfile", "move print x=1 y=2 z=3 s=0").unwrap(),
               "G1 X1.0 Y2.0 Z3.0 S0.0");
    assert_eq!(compile("testfile", "pause").unwrap(), "M0");
    assert_eq!(compile("testfile", "const r : number = 5\nmove x=1 y=2 z=3 s=0").unwrap(),
               "G0 X1.0 Y2.0 Z3.0 S0.0");
    assert_eq!(compile("testfile", "").unwrap(), "");
}

#[test]
fn test_program() {
    let src = r#"
print on
move print x=0.5 y=1 z=0.2 s=1500
pause
print off
move s=3000 z=10 y=0 x=0
"#;
    let out = "M3\nG1 X0.5 Y1.0 Z0.2 S1500.0\nM0\nM5\nG0 S3000.0 Z10.0 Y0.0 X0.0";
    assert_eq!(compile("testfile", src).unwrap(), out);
}

#[test]
fn test_source_lines() {
    let gcode = compile_with(Config::default(),
                             "pause\nconst a : number = 1\n\nmove x=a y=a z=a s=a").unwrap();
    let lines: Vec<_> = gcode.instructions.iter().map(|i| i.source_line).collect();
    assert_eq!(lines, [1, 4]);
    assert_eq!(gcode.instructions[0].instr, Instr::Pause);
}

#[test]
fn test_axis_order_preserved() {
    let values = [("x", 1.0), ("y", 2.0), ("z", 3.0), ("s", 4.0)];
    for perm in values.iter().permutations(4) {
        let src = format!("move {}", perm.iter().map(|(a, v)| format!("{}={}", a, v)).join(" "));
        let expected = format!("G0 {}", perm.iter()
                               .map(|(a, v)| format!("{}{:?}", a.to_uppercase(), v)).join(" "));
        assert_eq!(compile("testfile", &src).unwrap(), expected);
    }
}

#[test]
fn test_canonical_order() {
    let config = Config { order: AxisOrder::Canonical, ..Config::default() };
    let gcode = compile_with(config, "move s=4 z=3 x=1 y=2").unwrap();
    assert_eq!(gcode.to_string(), "G0 X1.0 Y2.0 Z3.0 S4.0");
}

#[test]
fn test_uppercase_axes() {
    assert_eq!(compile("testfile", "move print S=1 X=2 Y=3 Z=4").unwrap(),
               "G1 S1.0 X2.0 Y3.0 Z4.0");
}

#[test]
fn test_invalid_parameters() {
    let err = error_of("move x=1 y=2");
    assert_eq!(err.kind(), Kind::Validation);
    assert_eq!(err.errtype, ErrType::InvalidParameters {
        illegal: vec![], missing: vec![Axis::Z, Axis::S], duplicate: vec![],
    });

    let err = error_of("move x=1 x=2 y=2 z=3 s=4");
    assert_eq!(err.errtype.to_string(), "invalid parameters: duplicates: X");

    // all anomalies are reported at once
    let err = error_of("move x=1 x=2 a=5 y=1 b=2 a=3");
    assert_eq!(err.errtype.to_string(),
               "invalid parameters: illegal: a, b; missing: Z, S; duplicates: X");
    assert_eq!(err.pos, Some(Pos { line: 1, col: 1 }));

    let err = error_of("move");
    assert_eq!(err.errtype.to_string(), "invalid parameters: missing: X, Y, Z, S");
}

#[test]
fn test_custom_axes() {
    let config = Config { axes: vec![Axis::X, Axis::Y], ..Config::default() };
    let gcode = compile_with(config.clone(), "move y=1 x=2").unwrap();
    assert_eq!(gcode.to_string(), "G0 Y1.0 X2.0");
    // a known axis that is not configured is illegal
    let err = compile_with(config, "move y=1 x=2 z=3").unwrap_err();
    assert_eq!(err.errtype.to_string(), "invalid parameters: illegal: z");
}

#[test]
fn test_validate() {
    let required = [Axis::X, Axis::Y, Axis::Z, Axis::S];
    assert_eq!(validate(&[("z", 1.), ("X", 2.), ("s", 3.), ("y", 4.)], &required),
               Ok(vec![(Axis::Z, 1.), (Axis::X, 2.), (Axis::S, 3.), (Axis::Y, 4.)]));
    assert_eq!(validate(&[("y", 1.), ("y", 2.), ("y", 3.), ("q", 0.)], &required),
               Err(ErrType::InvalidParameters {
                   illegal: vec!["q".into()],
                   missing: vec![Axis::X, Axis::Z, Axis::S],
                   duplicate: vec!["Y".into()],
               }));
    // foreign names written twice are duplicates too
    assert_eq!(validate(&[("x", 1.), ("y", 1.), ("z", 1.), ("s", 1.), ("a", 1.), ("a", 2.)],
                        &required),
               Err(ErrType::InvalidParameters {
                   illegal: vec!["a".into()],
                   missing: vec![],
                   duplicate: vec!["a".into()],
               }));
}

#[test]
fn test_foreign_duplicates() {
    let err = error_of("move x=1 y=2 z=3 s=0 a=1 a=2");
    assert_eq!(err.errtype.to_string(), "invalid parameters: illegal: a; duplicates: a");

    let err = error_of("move x=1 x=2 b=1 y=2 z=3 s=0 b=2 b=3");
    assert_eq!(err.errtype.to_string(), "invalid parameters: illegal: b; duplicates: X, b");
}

#[test]
fn test_repeated_config_axes() {
    let config = Config { axes: vec![Axis::X, Axis::Y, Axis::X], ..Config::default() };
    let gcode = compile_with(config, "move y=1 x=2").unwrap();
    assert_eq!(gcode.to_string(), "G0 Y1.0 X2.0");
}

#[test]
fn test_non_finite() {
    let src = "const b : number = 10000000000 * 10000000000\n\
               move x=b*b*b*b*b*b*b*b*b*b*b*b*b*b*b*b y=0 z=0 s=0";
    let err = error_of(src);
    assert_eq!(err.kind(), Kind::Arithmetic);
    assert_eq!(err.errtype, ErrType::NonFinite("*".into()));
    assert_eq!(err.pos.map(|p| p.line), Some(2));

    let err = error_of("const big : number = 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000 \
                        * 100000000000000000000 * 100000000000000000000");
    assert_eq!(err.kind(), Kind::Arithmetic);
}

#[test]
fn test_plain_numbers() {
    assert_eq!(compile("testfile", "move x=100000000000000000 y=0.000001 z=0 s=0").unwrap(),
               "G0 X100000000000000000.0 Y0.000001 Z0.0 S0.0");
    assert_eq!(compile("testfile", "move x=0 - 0.0000025 y=1 z=0 s=0").unwrap(),
               "G0 X-0.0000025 Y1.0 Z0.0 S0.0");
}

#[test]
fn test_conditionals() {
    let src = r#"
const r : number = 1
if false {
    const r : number = 5
    pause
}
if r == 1 and true {
    print on
    move print x=r y=0 z=0 s=0
    print off
}
move x=r y=0 z=0 s=0
"#;
    assert_eq!(compile("testfile", src).unwrap(),
               "M3\nG1 X1.0 Y0.0 Z0.0 S0.0\nM5\nG0 X1.0 Y0.0 Z0.0 S0.0");

    // nested blocks
    let src = "if true { if not false { pause } if false { pause } pause }";
    assert_eq!(compile("testfile", src).unwrap(), "M0\nM0");

    // a false branch is not checked beyond its guard
    assert_eq!(compile("testfile", "if false { move x=1 }").unwrap(), "");
}

#[test]
fn test_eliminated_declaration() {
    let err = error_of("if false { const h : number = 2 }\nmove x=h y=0 z=0 s=0");
    assert_eq!(err.kind(), Kind::UndefinedIdentifier);
    assert_eq!(err.errtype, ErrType::UndefinedIdentifier("h".into()));
    assert_eq!(err.pos.map(|p| p.line), Some(2));
}

#[test]
fn test_undefined_identifier() {
    let err = error_of("if flag { pause }");
    assert_eq!(err.kind(), Kind::UndefinedIdentifier);
    assert_eq!(err.to_string(), "Error in line 1, column 1: the constant flag is not defined");

    // undefined constants are reported before parameter problems
    assert_eq!(error_of("move x=nope").kind(), Kind::UndefinedIdentifier);
}

#[test]
fn test_type_errors() {
    let err = error_of("const r : number = true");
    assert_eq!(err.kind(), Kind::Type);
    assert_eq!(err.errtype, ErrType::ConstType {
        name: "r".into(), declared: Type::Number, actual: Type::Boolean,
    });
    assert!(err.to_string().contains("constant r"));

    let err = error_of("const b : boolean = 1 + 2");
    assert_eq!(err.errtype, ErrType::ConstType {
        name: "b".into(), declared: Type::Boolean, actual: Type::Number,
    });

    for src in &[
        "if 1 { pause }",                      // guard must be boolean
        "move x=true y=0 z=0 s=0",             // coordinates must be numbers
        "const a : number = 1 + true",         // arithmetic on booleans
        "const a : boolean = 1 and true",      // logic on numbers
        "const a : boolean = not 1",
        "const a : number = -false",
        "const a : boolean = 1 == true",       // comparison of different types
        "const a : boolean = true < false",
    ] {
        assert_eq!(error_of(src).kind(), Kind::Type, "{}", src);
    }
}

#[test]
fn test_expressions() {
    let src = r#"
const w : number = 10
const h : number = w / 4
const inside : boolean = h > 2 and h <= 2.5 and not (w != 10)
if inside or false {
    move x=w - h y=-h z=w * 2 s=(w + 1) / 2
}
"#;
    assert_eq!(compile("testfile", src).unwrap(), "G0 X7.5 Y-2.5 Z20.0 S5.5");

    // full float representation, no rounding
    assert_eq!(compile("testfile", "move x=0.1 + 0.2 y=0 z=0 s=0").unwrap(),
               "G0 X0.30000000000000004 Y0.0 Z0.0 S0.0");

    assert_eq!(error_of("move x=1 / 0 y=0 z=0 s=0").kind(), Kind::Arithmetic);
}

#[test]
fn test_redeclaration() {
    let src = "const r : number = 1\nconst r : number = 2\nmove x=r y=r z=r s=r";
    assert_eq!(compile("testfile", src).unwrap(), "G0 X2.0 Y2.0 Z2.0 S2.0");

    // the type may change on overwrite
    let src = "const r : number = 1\nconst r : boolean = true\nif r { pause }";
    assert_eq!(compile("testfile", src).unwrap(), "M0");

    let config = Config { redeclare: Redeclare::Reject, ..Config::default() };
    let err = compile_with(config, "const r : number = 1\nconst r : number = 2").unwrap_err();
    assert_eq!(err.kind(), Kind::Redeclaration);
    assert_eq!(err.pos, Some(Pos { line: 2, col: 1 }));
}

#[test]
fn test_predefined() {
    let config = Config {
        predefined: vec![("speed".into(), Value::Num(1200.)), ("fast".into(), Value::Bool(true))],
        ..Config::default()
    };
    let mut gen = Generator::new(config);
    let prog = parse::parse("testfile", "if fast { move print x=0 y=0 z=0 s=speed }").unwrap();
    assert_eq!(gen.generate(&prog).unwrap().to_string(), "G1 X0.0 Y0.0 Z0.0 S1200.0");

    // every run starts with a fresh symbol table
    let prog = parse::parse("testfile", "const extra : number = 1").unwrap();
    gen.generate(&prog).unwrap();
    assert_eq!(gen.symbols().len(), 3);
    let prog = parse::parse("testfile", "pause").unwrap();
    gen.generate(&prog).unwrap();
    assert_eq!(gen.symbols().len(), 2);
    assert!(gen.symbols().get("extra").is_none());
}

#[test]
fn test_symbol_table() {
    let mut table = SymbolTable::new(Redeclare::Overwrite);
    assert!(table.is_empty());
    table.declare("a", Type::Number, Value::Num(1.)).unwrap();
    assert_eq!(table.lookup("a"), Ok(Value::Num(1.)));
    assert_eq!(table.lookup("b"), Err(ErrType::UndefinedIdentifier("b".into())));
    assert_eq!(table.declare("b", Type::Boolean, Value::Num(1.)).unwrap_err().kind(),
               Kind::Type);
    // a failed declaration leaves no entry behind
    assert!(table.get("b").is_none());
    assert!(check_type("c", Value::Bool(false), Type::Boolean).is_ok());
}

#[test]
fn test_no_partial_output() {
    let err = error_of("pause\nmove print x=1 y=2 z=3\npause");
    assert_eq!(err.kind(), Kind::Validation);
    assert_eq!(err.pos.map(|p| p.line), Some(2));
}
