use super::token::{Kind, Token, Word, ARITY_TABLE};
use super::Error;

type Result<T> = std::result::Result<T, Error>;

/// Operand classes accepted by the argument type rules.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Accept {
    /// Number register or numeric literal.
    Numeric,
    NumberRegister,
    PictureRegister,
    Identifier,
    String,
    /// String, numeric or picture register.
    Displayable,
    /// Number register, or an integer literal naming a register index.
    Destination,
    /// Face registers have no sigil; an integer literal is the index.
    FaceIndex,
}

impl Accept {
    fn test(self, token: &Token) -> bool {
        let kind = token.kind();
        match self {
            Accept::Numeric => kind.is_numeric(),
            Accept::NumberRegister => kind == Kind::NumberRegister,
            Accept::PictureRegister => kind == Kind::PictureRegister,
            Accept::Identifier => kind == Kind::Identifier,
            Accept::String => kind == Kind::String,
            Accept::Displayable => {
                kind.is_numeric() || kind == Kind::String || kind == Kind::PictureRegister
            }
            Accept::Destination => {
                kind == Kind::NumberRegister || kind == Kind::IntegerLiteral
            }
            Accept::FaceIndex => kind == Kind::IntegerLiteral,
        }
    }
}

fn rules(word: Word) -> &'static [Accept] {
    use Accept::*;
    use Word::*;
    match word {
        Nop | Halt | JumpReturn | PopReturn | Takeoff | Land => &[],
        PushNum | Forward | Backward | Left | Right | Up | Down | RotateCw | RotateCcw => {
            &[Numeric]
        }
        PushReturn | Jump => &[Accept::Identifier],
        PushPic | PopPic | TakePic => &[PictureRegister],
        PopNum => &[NumberRegister],
        Word::Display => &[Displayable],
        Store => &[Numeric, NumberRegister],
        Copy => &[NumberRegister, NumberRegister],
        CopyPic => &[PictureRegister, PictureRegister],
        LoadPic => &[Accept::String, PictureRegister],
        BranchEq | BranchNe | BranchGt | BranchLt | BranchGe | BranchLe => {
            &[Numeric, Numeric, Accept::Identifier]
        }
        Add | Sub | Mult | Div | Idiv | Rdiv => &[Numeric, Numeric, Destination],
        DetectFace => &[PictureRegister, FaceIndex, NumberRegister],
        MatchFace => &[FaceIndex, FaceIndex, NumberRegister],
    }
}

/// Check the shape of one tokenized line.
///
/// A leading label is skipped. Empty lines and bare labels are valid;
/// the program table stores them as `NOP`.
pub fn validate(tokens: &[Token]) -> Result<()> {
    let tokens = match tokens.first() {
        Some(token) if token.is_label() => &tokens[1..],
        _ => tokens,
    };
    let (command, args) = match tokens.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };
    let word = match command.word() {
        Some(word) => word,
        None => return Err(error!(ValidationError; "LINE DOES NOT START WITH A COMMAND")),
    };
    match ARITY_TABLE.get(args.len()) {
        Some(bucket) if bucket.contains(&word) => {}
        _ => return Err(error!(ValidationError; "INVALID NUMBER OF ARGUMENTS")),
    }
    if rules(word)
        .iter()
        .zip(args)
        .all(|(accept, token)| accept.test(token))
    {
        Ok(())
    } else {
        Err(error!(ValidationError; "INVALID ARGUMENT TYPE(S)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::lex;

    fn check(s: &str) -> Result<()> {
        validate(&lex(s).unwrap())
    }

    fn message(s: &str) -> String {
        check(s).unwrap_err().text().to_string()
    }

    #[test]
    fn test_rules_match_arity_table() {
        for word in Word::ALL.iter() {
            assert_eq!(rules(*word).len(), word.arity(), "{}", word);
        }
    }

    #[test]
    fn test_valid_lines() {
        assert!(check("").is_ok());
        assert!(check("TOP:").is_ok());
        assert!(check("TOP: NOP").is_ok());
        assert!(check("FORWARD 50").is_ok());
        assert!(check("FORWARD $R1").is_ok());
        assert!(check("ROTATE_CW 90.5").is_ok());
        assert!(check("STORE 3 $R0").is_ok());
        assert!(check("STORE $R1 $R0").is_ok());
        assert!(check("BRANCH_LE $R0 10 TOP").is_ok());
        assert!(check("ADD 2 3 0").is_ok());
        assert!(check("DIV $R0 0.0 $R1").is_ok());
        assert!(check("DISPLAY \"HI\"").is_ok());
        assert!(check("DISPLAY $P3").is_ok());
        assert!(check("LOAD_PIC \"FACE.PNG\" $P0").is_ok());
        assert!(check("DETECT_FACE $P0 1 $R2").is_ok());
        assert!(check("MATCH_FACE 0 1 $R2").is_ok());
    }

    #[test]
    fn test_must_start_with_command() {
        assert_eq!(message("50 FORWARD"), "LINE DOES NOT START WITH A COMMAND");
        assert_eq!(message("TOP: BOTTOM"), "LINE DOES NOT START WITH A COMMAND");
        assert_eq!(message("TOP: BOTTOM: NOP"), "LINE DOES NOT START WITH A COMMAND");
    }

    #[test]
    fn test_wrong_argument_count_for_every_word() {
        for word in Word::ALL.iter() {
            for count in 0..6 {
                if count == word.arity() {
                    continue;
                }
                let mut line = word.to_string();
                for _ in 0..count {
                    line.push_str(" 1");
                }
                assert_eq!(message(&line), "INVALID NUMBER OF ARGUMENTS", "{}", line);
            }
        }
    }

    #[test]
    fn test_wrong_argument_types() {
        for line in &[
            "FORWARD \"FAR\"",
            "JUMP 12",
            "PUSH_PIC $R1",
            "POP_PIC 1",
            "TAKE_PIC $R0",
            "POP_NUM 3",
            "DISPLAY TOP",
            "STORE $R0 4",
            "COPY $P0 $R1",
            "COPY_PIC $P0 $R1",
            "LOAD_PIC $P1 $P0",
            "BRANCH_EQ 1 2 3",
            "ADD 1 2 3.0",
            "SUB 1 \"A\" $R0",
            "DETECT_FACE $R0 1 $R1",
            "MATCH_FACE $R0 1 $R1",
        ] {
            assert_eq!(message(line), "INVALID ARGUMENT TYPE(S)", "{}", line);
        }
    }
}
