use super::Address;
use crate::error;
use crate::lang::token::{Token, Word};
use crate::lang::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled program table
///
/// Instruction lines plus the label map. Empty and bare label lines hold
/// a `NOP` so index `i` is always source line `i + 1`. Redefining a label
/// moves it to the later line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    lines: Vec<Vec<Token>>,
    labels: HashMap<String, Address>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.labels.clear();
    }

    pub fn add_line(&mut self, mut tokens: Vec<Token>) -> Result<()> {
        if tokens.first().map_or(false, Token::is_label) {
            let label = tokens.remove(0);
            self.labels.insert(label.text().to_string(), self.lines.len());
        }
        if tokens.is_empty() {
            tokens.push(Token::from(Word::Nop));
        }
        self.lines.push(tokens);
        Ok(())
    }

    pub fn label_lookup(&self, label: &str) -> Result<Address> {
        match self.labels.get(label) {
            Some(addr) => Ok(*addr),
            None => Err(error!(SoftwareError; format!("CANNOT FIND LABEL {}", label))),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn get_line(&self, addr: Address) -> Option<&[Token]> {
        self.lines.get(addr).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut labels: HashMap<Address, &str> = HashMap::new();
        for (name, addr) in &self.labels {
            labels.insert(*addr, name);
        }
        for (addr, line) in self.lines.iter().enumerate() {
            if let Some(name) = labels.get(&addr) {
                write!(f, "{}: ", name)?;
            }
            let s: Vec<String> = line.iter().map(|t| t.to_string()).collect();
            writeln!(f, "{}", s.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{lex, ErrorCode};

    fn program(lines: &[&str]) -> Result<Program> {
        let mut p = Program::new();
        for line in lines {
            p.add_line(lex(line).unwrap())?;
        }
        Ok(p)
    }

    #[test]
    fn test_labels_and_nops() {
        let p = program(&["", "TOP:", "LOOP: FORWARD 20", "JUMP LOOP"]).unwrap();
        assert_eq!(p.line_count(), 4);
        assert_eq!(p.label_lookup("TOP"), Ok(1));
        assert_eq!(p.label_lookup("LOOP"), Ok(2));
        assert_eq!(p.get_line(0), Some(&[Token::from(Word::Nop)][..]));
        assert_eq!(p.get_line(4), None);
    }

    #[test]
    fn test_missing_label() {
        let p = program(&["JUMP NOTALABEL"]).unwrap();
        let e = p.label_lookup("NOTALABEL").unwrap_err();
        assert_eq!(e.code(), ErrorCode::SoftwareError);
        assert_eq!(e.text(), "CANNOT FIND LABEL NOTALABEL");
    }

    #[test]
    fn test_redefined_label_moves() {
        let p = program(&["A: NOP", "B: NOP", "A: HALT"]).unwrap();
        assert_eq!(p.label_lookup("A"), Ok(2));
        assert_eq!(p.label_lookup("B"), Ok(1));
        assert_eq!(p.line_count(), 3);
    }

    #[test]
    fn test_display() {
        let p = program(&["START: STORE 1 $R0", "DISPLAY \"DONE\""]).unwrap();
        assert_eq!(p.to_string(), "START: STORE 1 $R0\nDISPLAY \"DONE\"\n");
    }
}
