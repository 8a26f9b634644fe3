use super::lex::lex;
use super::token::Token;
use super::validate::validate;
use super::Error;

/// One compiled source line: preprocessed, tokenized and validated.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: usize,
    tokens: Vec<Token>,
}

/// Cut the `#` comment, fold case and trim.
pub fn preprocess(s: &str) -> String {
    let s = match s.find('#') {
        Some(index) => &s[..index],
        None => s,
    };
    s.to_uppercase().trim().to_string()
}

impl Line {
    /// `number` is 1 based and only used to annotate errors.
    pub fn new(number: usize, s: &str) -> Result<Line, Error> {
        let tokens = lex(&preprocess(s)).map_err(|e| e.in_line_number(Some(number)))?;
        validate(&tokens).map_err(|e| e.in_line_number(Some(number)))?;
        Ok(Line { number, tokens })
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", s.join(" "))
    }
}
