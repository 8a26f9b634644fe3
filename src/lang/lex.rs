use super::token::{Kind, Token};
use super::Error;

type Result<T> = std::result::Result<T, Error>;

/// Tokenize one preprocessed source line.
///
/// Whitespace outside a string literal commits the current token.
/// Identifiers matching a mnemonic come back as `Kind::Command`.
pub fn lex(s: &str) -> Result<Vec<Token>> {
    AsmLexer::lex(s)
}

fn is_asm_whitespace(c: char) -> bool {
    c.is_whitespace()
}

fn is_asm_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_asm_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Start,
    Register,
    PicRegDigit1,
    PicReg,
    NumRegDigit1,
    NumReg,
    StringBody,
    String,
    NumberInt,
    NumberFloat,
    Identifier,
    Label,
}

impl State {
    fn accepting(self) -> Option<Kind> {
        use State::*;
        match self {
            PicReg => Some(Kind::PictureRegister),
            NumReg => Some(Kind::NumberRegister),
            String => Some(Kind::String),
            NumberInt => Some(Kind::IntegerLiteral),
            NumberFloat => Some(Kind::FloatLiteral),
            Identifier => Some(Kind::Identifier),
            Label => Some(Kind::Label),
            Start | Register | PicRegDigit1 | NumRegDigit1 | StringBody => None,
        }
    }
}

struct AsmLexer {
    state: State,
    current: String,
    tokens: Vec<Token>,
}

impl AsmLexer {
    fn lex(s: &str) -> Result<Vec<Token>> {
        let mut lexer = AsmLexer {
            state: State::Start,
            current: String::new(),
            tokens: vec![],
        };
        for ch in s.chars() {
            lexer.next(ch)?;
        }
        match lexer.state {
            State::Start => {}
            state => match state.accepting() {
                Some(kind) => lexer.commit(kind),
                None => return Err(error!(TokenizerError; "UNKNOWN/INCOMPLETE TOKEN")),
            },
        }
        Ok(lexer
            .tokens
            .into_iter()
            .map(Token::detect_command)
            .collect())
    }

    fn commit(&mut self, kind: Kind) {
        let text = std::mem::take(&mut self.current);
        self.tokens.push(Token::new(kind, text));
        self.state = State::Start;
    }

    fn next(&mut self, ch: char) -> Result<()> {
        use State::*;
        if is_asm_whitespace(ch) && self.state != StringBody {
            return match self.state {
                Start => Ok(()),
                state => match state.accepting() {
                    Some(kind) => {
                        self.commit(kind);
                        Ok(())
                    }
                    None => Err(error!(TokenizerError; "UNKNOWN/INCOMPLETE TOKEN")),
                },
            };
        }
        self.state = match self.state {
            Start => {
                if ch == '$' {
                    Register
                } else if ch == '"' {
                    StringBody
                } else if is_asm_digit(ch) || ch == '+' || ch == '-' {
                    self.current.push(ch);
                    NumberInt
                } else if is_asm_alphabetic(ch) {
                    self.current.push(ch);
                    Identifier
                } else {
                    return Err(error!(TokenizerError; "UNKNOWN/INCORRECT SYMBOL IN TOKEN"));
                }
            }
            Register => match ch {
                'P' => PicRegDigit1,
                'R' => NumRegDigit1,
                _ => {
                    return Err(
                        error!(TokenizerError; "UNKNOWN/INCORRECT SYMBOL IN REGISTER TOKEN"),
                    )
                }
            },
            PicRegDigit1 | PicReg => {
                if !is_asm_digit(ch) {
                    return Err(error!(TokenizerError;
                        "UNKNOWN/INCORRECT SYMBOL IN PICTURE REGISTER TOKEN"));
                }
                self.current.push(ch);
                PicReg
            }
            NumRegDigit1 | NumReg => {
                if !is_asm_digit(ch) {
                    return Err(
                        error!(TokenizerError; "UNKNOWN/INCORRECT SYMBOL IN REGISTER TOKEN"),
                    );
                }
                self.current.push(ch);
                NumReg
            }
            StringBody => {
                if ch == '"' {
                    String
                } else {
                    self.current.push(ch);
                    StringBody
                }
            }
            NumberInt => {
                if ch == '.' {
                    self.current.push(ch);
                    NumberFloat
                } else if is_asm_digit(ch) {
                    self.current.push(ch);
                    NumberInt
                } else {
                    return Err(error!(TokenizerError; "UNKNOWN/INCORRECT SYMBOL IN NUMBER TOKEN"));
                }
            }
            NumberFloat => {
                if !is_asm_digit(ch) {
                    return Err(error!(TokenizerError; "UNKNOWN/INCORRECT SYMBOL IN NUMBER TOKEN"));
                }
                self.current.push(ch);
                NumberFloat
            }
            Identifier => {
                if is_asm_alphabetic(ch) || is_asm_digit(ch) || ch == '_' {
                    self.current.push(ch);
                    Identifier
                } else if ch == ':' {
                    Label
                } else {
                    return Err(
                        error!(TokenizerError; "UNKNOWN/INCORRECT SYMBOL IN IDENTIFIER TOKEN"),
                    );
                }
            }
            String | Label => {
                return Err(error!(TokenizerError; "MISSING WHITESPACE AFTER TOKEN"));
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<Kind> {
        lex(s).unwrap().iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(lex("").unwrap(), vec![]);
        assert_eq!(lex("   \t ").unwrap(), vec![]);
    }

    #[test]
    fn test_registers() {
        let t = lex("$R12 $P0").unwrap();
        assert_eq!(t[0], Token::new(Kind::NumberRegister, "12"));
        assert_eq!(t[1], Token::new(Kind::PictureRegister, "0"));
        assert!(lex("$R").is_err());
        assert!(lex("$P").is_err());
        assert!(lex("$Q1").is_err());
        assert!(lex("$R1A").is_err());
        assert!(lex("$ R1").is_err());
    }

    #[test]
    fn test_string_keeps_whitespace() {
        let t = lex("DISPLAY \"  two  words \"").unwrap();
        assert_eq!(t[1], Token::new(Kind::String, "  two  words "));
        assert!(lex("DISPLAY \"open").is_err());
        assert!(lex("DISPLAY \"a\"b").is_err());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 -2 +3 4.5 -0.25 6."),
            vec![
                Kind::IntegerLiteral,
                Kind::IntegerLiteral,
                Kind::IntegerLiteral,
                Kind::FloatLiteral,
                Kind::FloatLiteral,
                Kind::FloatLiteral,
            ]
        );
        assert!(lex("1.2.3").is_err());
        assert!(lex("12A").is_err());
    }

    #[test]
    fn test_identifiers_and_labels() {
        let t = lex("LOOP_1: JUMP LOOP_1").unwrap();
        assert_eq!(t[0], Token::new(Kind::Label, "LOOP_1"));
        assert_eq!(t[1], Token::new(Kind::Command, "JUMP"));
        assert_eq!(t[2], Token::new(Kind::Identifier, "LOOP_1"));
        assert!(lex("A-B").is_err());
        assert!(lex("A:B").is_err());
        assert!(lex("_A").is_err());
    }

    #[test]
    fn test_unknown_symbol() {
        let e = lex("FORWARD 50;").unwrap_err();
        assert_eq!(e.code(), crate::lang::ErrorCode::TokenizerError);
    }
}
