use std::collections::HashMap;

thread_local!(
    static STRING_TO_WORD: HashMap<&'static str, Word> =
        Word::ALL.iter().map(|w| (w.as_str(), *w)).collect();
);

/// ## Opcode arity table
///
/// Index is the number of operands. Every mnemonic appears in exactly
/// one bucket; `Word::arity` is derived from this table.
pub const ARITY_TABLE: [&[Word]; 4] = [
    &[
        Word::Nop,
        Word::Halt,
        Word::JumpReturn,
        Word::PopReturn,
        Word::Takeoff,
        Word::Land,
    ],
    &[
        Word::PushNum,
        Word::PushReturn,
        Word::PushPic,
        Word::PopNum,
        Word::PopPic,
        Word::Jump,
        Word::Forward,
        Word::Backward,
        Word::Left,
        Word::Right,
        Word::Up,
        Word::Down,
        Word::RotateCw,
        Word::RotateCcw,
        Word::Display,
        Word::TakePic,
    ],
    &[Word::Store, Word::Copy, Word::CopyPic, Word::LoadPic],
    &[
        Word::BranchEq,
        Word::BranchNe,
        Word::BranchGt,
        Word::BranchLt,
        Word::BranchGe,
        Word::BranchLe,
        Word::Add,
        Word::Sub,
        Word::Mult,
        Word::Div,
        Word::Idiv,
        Word::Rdiv,
        Word::DetectFace,
        Word::MatchFace,
    ],
];

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Kind {
    PictureRegister,
    NumberRegister,
    String,
    IntegerLiteral,
    FloatLiteral,
    Identifier,
    Label,
    Command,
}

impl Kind {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::NumberRegister | Kind::IntegerLiteral | Kind::FloatLiteral
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    kind: Kind,
    text: String,
}

impl Token {
    pub fn new<S: Into<String>>(kind: Kind, text: S) -> Token {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The mnemonic, if this is a command token.
    pub fn word(&self) -> Option<Word> {
        match self.kind {
            Kind::Command => Word::from_string(&self.text),
            _ => None,
        }
    }

    pub fn is_label(&self) -> bool {
        self.kind == Kind::Label
    }

    /// Identifiers naming a mnemonic become commands.
    pub fn detect_command(self) -> Token {
        if self.kind == Kind::Identifier && Word::from_string(&self.text).is_some() {
            Token {
                kind: Kind::Command,
                text: self.text,
            }
        } else {
            self
        }
    }
}

impl From<Word> for Token {
    fn from(word: Word) -> Token {
        Token::new(Kind::Command, word.as_str())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Kind::*;
        match self.kind {
            PictureRegister => write!(f, "$P{}", self.text),
            NumberRegister => write!(f, "$R{}", self.text),
            String => write!(f, "\"{}\"", self.text),
            Label => write!(f, "{}:", self.text),
            IntegerLiteral | FloatLiteral | Identifier | Command => write!(f, "{}", self.text),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Word {
    Nop,
    Halt,
    JumpReturn,
    PopReturn,
    Takeoff,
    Land,
    PushNum,
    PushReturn,
    PushPic,
    PopNum,
    PopPic,
    Jump,
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    RotateCw,
    RotateCcw,
    Display,
    TakePic,
    Store,
    Copy,
    CopyPic,
    LoadPic,
    BranchEq,
    BranchNe,
    BranchGt,
    BranchLt,
    BranchGe,
    BranchLe,
    Add,
    Sub,
    Mult,
    Div,
    Idiv,
    Rdiv,
    DetectFace,
    MatchFace,
}

impl Word {
    pub const ALL: [Word; 40] = [
        Word::Nop,
        Word::Halt,
        Word::JumpReturn,
        Word::PopReturn,
        Word::Takeoff,
        Word::Land,
        Word::PushNum,
        Word::PushReturn,
        Word::PushPic,
        Word::PopNum,
        Word::PopPic,
        Word::Jump,
        Word::Forward,
        Word::Backward,
        Word::Left,
        Word::Right,
        Word::Up,
        Word::Down,
        Word::RotateCw,
        Word::RotateCcw,
        Word::Display,
        Word::TakePic,
        Word::Store,
        Word::Copy,
        Word::CopyPic,
        Word::LoadPic,
        Word::BranchEq,
        Word::BranchNe,
        Word::BranchGt,
        Word::BranchLt,
        Word::BranchGe,
        Word::BranchLe,
        Word::Add,
        Word::Sub,
        Word::Mult,
        Word::Div,
        Word::Idiv,
        Word::Rdiv,
        Word::DetectFace,
        Word::MatchFace,
    ];

    pub fn from_string(s: &str) -> Option<Word> {
        STRING_TO_WORD.with(|stw| stw.get(s).copied())
    }

    pub fn arity(self) -> usize {
        ARITY_TABLE
            .iter()
            .position(|bucket| bucket.contains(&self))
            .unwrap_or(usize::MAX)
    }

    pub fn as_str(self) -> &'static str {
        use Word::*;
        match self {
            Nop => "NOP",
            Halt => "HALT",
            JumpReturn => "JUMP_RETURN",
            PopReturn => "POP_RETURN",
            Takeoff => "TAKEOFF",
            Land => "LAND",
            PushNum => "PUSH_NUM",
            PushReturn => "PUSH_RETURN",
            PushPic => "PUSH_PIC",
            PopNum => "POP_NUM",
            PopPic => "POP_PIC",
            Jump => "JUMP",
            Forward => "FORWARD",
            Backward => "BACKWARD",
            Left => "LEFT",
            Right => "RIGHT",
            Up => "UP",
            Down => "DOWN",
            RotateCw => "ROTATE_CW",
            RotateCcw => "ROTATE_CCW",
            Display => "DISPLAY",
            TakePic => "TAKE_PIC",
            Store => "STORE",
            Copy => "COPY",
            CopyPic => "COPY_PIC",
            LoadPic => "LOAD_PIC",
            BranchEq => "BRANCH_EQ",
            BranchNe => "BRANCH_NE",
            BranchGt => "BRANCH_GT",
            BranchLt => "BRANCH_LT",
            BranchGe => "BRANCH_GE",
            BranchLe => "BRANCH_LE",
            Add => "ADD",
            Sub => "SUB",
            Mult => "MULT",
            Div => "DIV",
            Idiv => "IDIV",
            Rdiv => "RDIV",
            DetectFace => "DETECT_FACE",
            MatchFace => "MATCH_FACE",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
