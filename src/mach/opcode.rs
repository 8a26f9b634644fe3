use super::{Operation, Val, FACE_REGISTERS, NUM_REGISTERS, PIC_REGISTERS};
use crate::drone::Motion;
use crate::error;
use crate::lang::token::{Kind, Token, Word};
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// Numeric source operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Register(usize),
    Literal(Val),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Displayable {
    Text(String),
    Number(Operand),
    Picture(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Relation {
    /// An unordered comparison (NaN) only satisfies `Ne`.
    pub fn holds(self, ordering: Option<Ordering>) -> bool {
        use Relation::*;
        match ordering {
            None => self == Ne,
            Some(o) => match self {
                Eq => o == Ordering::Equal,
                Ne => o != Ordering::Equal,
                Gt => o == Ordering::Greater,
                Lt => o == Ordering::Less,
                Ge => o != Ordering::Less,
                Le => o != Ordering::Greater,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arith {
    Add,
    Sub,
    Mult,
    Div,
    Idiv,
    Rdiv,
}

impl Arith {
    pub fn apply(self, lhs: Val, rhs: Val) -> Result<Val> {
        match self {
            Arith::Add => Operation::sum(lhs, rhs),
            Arith::Sub => Operation::subtract(lhs, rhs),
            Arith::Mult => Operation::multiply(lhs, rhs),
            Arith::Div => Operation::divide(lhs, rhs),
            Arith::Idiv => Operation::divide_int(lhs, rhs),
            Arith::Rdiv => Operation::remainder(lhs, rhs),
        }
    }
}

/// ## Virtual machine instruction set
///
/// One decoded source line. Register operands are range checked during
/// decoding; labels stay names and resolve when the instruction runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    // *** Control
    Nop,
    Halt,
    Jump(String),
    JumpReturn,
    PushReturn(String),
    PopReturn,
    Branch(Relation, Operand, Operand, String),

    // *** Data
    Store(Operand, usize),
    Copy(usize, usize),
    CopyPic(usize, usize),
    PushNum(Operand),
    PushPic(usize),
    PopNum(usize),
    PopPic(usize),
    Arithmetic(Arith, Operand, Operand, usize),

    // *** Flight
    Takeoff,
    Land,
    Move(Motion, Operand),

    // *** Vision
    Display(Displayable),
    TakePic(usize),
    LoadPic(String, usize),
    DetectFace(usize, usize, usize),
    MatchFace(usize, usize, usize),
}

fn unknown_value() -> Error {
    error!(SoftwareError; "UNKNOWN VALUE TYPE")
}

fn index(text: &str, limit: usize) -> Result<usize> {
    match text.parse::<usize>() {
        Ok(n) if n < limit => Ok(n),
        _ => Err(error!(SoftwareError; "NON-EXISTENT REGISTER")),
    }
}

fn number_register(token: &Token) -> Result<usize> {
    match token.kind() {
        Kind::NumberRegister => index(token.text(), NUM_REGISTERS),
        _ => Err(unknown_value()),
    }
}

fn picture_register(token: &Token) -> Result<usize> {
    match token.kind() {
        Kind::PictureRegister => index(token.text(), PIC_REGISTERS),
        _ => Err(unknown_value()),
    }
}

fn face_register(token: &Token) -> Result<usize> {
    match token.kind() {
        Kind::IntegerLiteral => index(token.text(), FACE_REGISTERS),
        _ => Err(unknown_value()),
    }
}

fn destination(token: &Token) -> Result<usize> {
    match token.kind() {
        Kind::NumberRegister | Kind::IntegerLiteral => index(token.text(), NUM_REGISTERS),
        _ => Err(unknown_value()),
    }
}

fn numeric(token: &Token) -> Result<Operand> {
    let invalid = || error!(SoftwareError; "INVALID NUMERIC LITERAL");
    match token.kind() {
        Kind::NumberRegister => Ok(Operand::Register(index(token.text(), NUM_REGISTERS)?)),
        Kind::IntegerLiteral => match token.text().parse::<i64>() {
            Ok(n) => Ok(Operand::Literal(Val::Integer(n))),
            Err(_) => Err(invalid()),
        },
        Kind::FloatLiteral => match token.text().parse::<f64>() {
            Ok(n) => Ok(Operand::Literal(Val::Float(n))),
            Err(_) => Err(invalid()),
        },
        _ => Err(unknown_value()),
    }
}

fn label(token: &Token) -> Result<String> {
    match token.kind() {
        Kind::Identifier => Ok(token.text().to_string()),
        _ => Err(unknown_value()),
    }
}

fn text(token: &Token) -> Result<String> {
    match token.kind() {
        Kind::String => Ok(token.text().to_string()),
        _ => Err(unknown_value()),
    }
}

fn displayable(token: &Token) -> Result<Displayable> {
    match token.kind() {
        Kind::String => Ok(Displayable::Text(token.text().to_string())),
        Kind::PictureRegister => Ok(Displayable::Picture(picture_register(token)?)),
        _ => Ok(Displayable::Number(numeric(token)?)),
    }
}

impl Opcode {
    /// Decode a program line. The first token is the command.
    pub fn decode(tokens: &[Token]) -> Result<Opcode> {
        let (command, args) = match tokens.split_first() {
            Some(split) => split,
            None => return Ok(Opcode::Nop),
        };
        let word = match command.word() {
            Some(word) => word,
            None => return Err(error!(SoftwareError; "UNKNOWN COMMAND")),
        };
        if args.len() != word.arity() {
            return Err(error!(SoftwareError; "INVALID NUMBER OF ARGUMENTS"));
        }
        use Word::*;
        Ok(match word {
            Nop => Opcode::Nop,
            Halt => Opcode::Halt,
            JumpReturn => Opcode::JumpReturn,
            PopReturn => Opcode::PopReturn,
            Takeoff => Opcode::Takeoff,
            Land => Opcode::Land,
            PushNum => Opcode::PushNum(numeric(&args[0])?),
            PushReturn => Opcode::PushReturn(label(&args[0])?),
            PushPic => Opcode::PushPic(picture_register(&args[0])?),
            PopNum => Opcode::PopNum(number_register(&args[0])?),
            PopPic => Opcode::PopPic(picture_register(&args[0])?),
            Jump => Opcode::Jump(label(&args[0])?),
            Forward => Opcode::Move(Motion::Forward, numeric(&args[0])?),
            Backward => Opcode::Move(Motion::Backward, numeric(&args[0])?),
            Left => Opcode::Move(Motion::Left, numeric(&args[0])?),
            Right => Opcode::Move(Motion::Right, numeric(&args[0])?),
            Up => Opcode::Move(Motion::Up, numeric(&args[0])?),
            Down => Opcode::Move(Motion::Down, numeric(&args[0])?),
            RotateCw => Opcode::Move(Motion::RotateCw, numeric(&args[0])?),
            RotateCcw => Opcode::Move(Motion::RotateCcw, numeric(&args[0])?),
            Display => Opcode::Display(displayable(&args[0])?),
            TakePic => Opcode::TakePic(picture_register(&args[0])?),
            Store => Opcode::Store(numeric(&args[0])?, number_register(&args[1])?),
            Copy => Opcode::Copy(number_register(&args[0])?, number_register(&args[1])?),
            CopyPic => Opcode::CopyPic(picture_register(&args[0])?, picture_register(&args[1])?),
            LoadPic => Opcode::LoadPic(text(&args[0])?, picture_register(&args[1])?),
            BranchEq => branch(Relation::Eq, args)?,
            BranchNe => branch(Relation::Ne, args)?,
            BranchGt => branch(Relation::Gt, args)?,
            BranchLt => branch(Relation::Lt, args)?,
            BranchGe => branch(Relation::Ge, args)?,
            BranchLe => branch(Relation::Le, args)?,
            Add => arithmetic(Arith::Add, args)?,
            Sub => arithmetic(Arith::Sub, args)?,
            Mult => arithmetic(Arith::Mult, args)?,
            Div => arithmetic(Arith::Div, args)?,
            Idiv => arithmetic(Arith::Idiv, args)?,
            Rdiv => arithmetic(Arith::Rdiv, args)?,
            DetectFace => Opcode::DetectFace(
                picture_register(&args[0])?,
                face_register(&args[1])?,
                number_register(&args[2])?,
            ),
            MatchFace => Opcode::MatchFace(
                face_register(&args[0])?,
                face_register(&args[1])?,
                number_register(&args[2])?,
            ),
        })
    }
}

fn branch(relation: Relation, args: &[Token]) -> Result<Opcode> {
    Ok(Opcode::Branch(
        relation,
        numeric(&args[0])?,
        numeric(&args[1])?,
        label(&args[2])?,
    ))
}

fn arithmetic(arith: Arith, args: &[Token]) -> Result<Opcode> {
    Ok(Opcode::Arithmetic(
        arith,
        numeric(&args[0])?,
        numeric(&args[1])?,
        destination(&args[2])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::lex;

    fn decode(s: &str) -> Result<Opcode> {
        Opcode::decode(&lex(s).unwrap())
    }

    #[test]
    fn test_decode_arithmetic() {
        assert_eq!(
            decode("ADD 2 3 0"),
            Ok(Opcode::Arithmetic(
                Arith::Add,
                Operand::Literal(Val::Integer(2)),
                Operand::Literal(Val::Integer(3)),
                0
            ))
        );
        assert_eq!(
            decode("DIV $R0 0.0 1"),
            Ok(Opcode::Arithmetic(
                Arith::Div,
                Operand::Register(0),
                Operand::Literal(Val::Float(0.0)),
                1
            ))
        );
    }

    #[test]
    fn test_decode_flight_and_vision() {
        assert_eq!(
            decode("FORWARD 50"),
            Ok(Opcode::Move(Motion::Forward, Operand::Literal(Val::Integer(50))))
        );
        assert_eq!(decode("TAKE_PIC $P7"), Ok(Opcode::TakePic(7)));
        assert_eq!(decode("DETECT_FACE $P1 2 $R3"), Ok(Opcode::DetectFace(1, 2, 3)));
        assert_eq!(
            decode("DISPLAY \"HI THERE\""),
            Ok(Opcode::Display(Displayable::Text("HI THERE".into())))
        );
    }

    #[test]
    fn test_register_range() {
        assert_eq!(decode("POP_NUM $R15"), Ok(Opcode::PopNum(15)));
        assert_eq!(decode("POP_NUM $R16").unwrap_err().text(), "NON-EXISTENT REGISTER");
        assert_eq!(decode("POP_PIC $P8").unwrap_err().text(), "NON-EXISTENT REGISTER");
        assert_eq!(
            decode("MATCH_FACE 0 8 $R0").unwrap_err().text(),
            "NON-EXISTENT REGISTER"
        );
        assert_eq!(
            decode("POP_NUM $R99999999999999999999999").unwrap_err().text(),
            "NON-EXISTENT REGISTER"
        );
    }

    #[test]
    fn test_wrong_kind_at_runtime() {
        let tokens = vec![Token::from(Word::PopNum), Token::new(Kind::String, "X")];
        let e = Opcode::decode(&tokens).unwrap_err();
        assert_eq!(e.text(), "UNKNOWN VALUE TYPE");
    }

    #[test]
    fn test_relation() {
        assert!(Relation::Ge.holds(Some(Ordering::Equal)));
        assert!(!Relation::Gt.holds(Some(Ordering::Equal)));
        assert!(Relation::Ne.holds(None));
        assert!(!Relation::Eq.holds(None));
    }
}
