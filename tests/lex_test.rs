use drone_asm::lang::token::{Kind, Token};
use drone_asm::lang::{lex, preprocess, ErrorCode};
use drone_asm::mach::compile;

fn kinds(tokens: &[Token]) -> Vec<Kind> {
    tokens.iter().map(Token::kind).collect()
}

#[test]
fn test_mark1_example() {
    let tokens =
        lex("MARK1: JUMP 12.3 -3.4 +3.14 MARK2 -13 +16 $R6 $P6 \"Hello, World!\"").unwrap();
    let expected = vec![
        Token::new(Kind::Label, "MARK1"),
        Token::new(Kind::Command, "JUMP"),
        Token::new(Kind::FloatLiteral, "12.3"),
        Token::new(Kind::FloatLiteral, "-3.4"),
        Token::new(Kind::FloatLiteral, "+3.14"),
        Token::new(Kind::Identifier, "MARK2"),
        Token::new(Kind::IntegerLiteral, "-13"),
        Token::new(Kind::IntegerLiteral, "+16"),
        Token::new(Kind::NumberRegister, "6"),
        Token::new(Kind::PictureRegister, "6"),
        Token::new(Kind::String, "Hello, World!"),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_deterministic() {
    let s = "LOOP: BRANCH_LT $R0 10.5 LOOP";
    assert_eq!(lex(s), lex(s));
}

#[test]
fn test_unterminated() {
    for s in &["DISPLAY \"OPEN", "POP_NUM $R", "POP_PIC $P", "STORE 1 $"] {
        let e = lex(s).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TokenizerError, "{}", s);
    }
}

#[test]
fn test_whitespace_inside_register() {
    assert!(lex("POP_NUM $ R1").is_err());
}

#[test]
fn test_round_trip() {
    let source = vec![
        "# fly a triangle",
        "TAKEOFF",
        "STORE 3 $R0",
        "SIDE: FORWARD 100",
        "ROTATE_CCW 120.0",
        "SUB $R0 1 0",
        "BRANCH_GT $R0 0 SIDE",
        "",
        "DONE:",
        "DISPLAY \"Landing now\"",
        "LAND",
    ];
    let program = compile(&source).unwrap();
    let rendered = program.to_string();
    let again = compile(rendered.lines()).unwrap();
    assert_eq!(program, again);
    for (index, line) in rendered.lines().enumerate() {
        let tokens = lex(&preprocess(line)).unwrap();
        let tokens: Vec<Token> = tokens.into_iter().filter(|t| !t.is_label()).collect();
        assert_eq!(kinds(&tokens), kinds(program.get_line(index).unwrap()));
    }
}
