use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// Compile time errors. No partial program survives one of these.
    pub fn is_compile(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::TokenizerError | ErrorCode::ValidationError
        )
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: line,
            message: self.message.clone(),
        }
    }

    pub fn message<S: Into<String>>(&self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            line_number: self.line_number,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    TokenizerError = 1,
    ValidationError = 2,
    SoftwareError = 3,
    HardwareError = 4,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        match self {
            TokenizerError => write!(f, "TOKENIZER ERROR"),
            ValidationError => write!(f, "VALIDATION ERROR"),
            SoftwareError => write!(f, "SOFTWARE ERROR"),
            HardwareError => write!(f, "HARDWARE ERROR"),
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(line_number) = self.line_number {
            write!(f, " IN {}", line_number)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(error!(SoftwareError).to_string(), "SOFTWARE ERROR");
        assert_eq!(
            error!(SoftwareError, Some(3); "DIVIDE BY ZERO").to_string(),
            "SOFTWARE ERROR IN 3; DIVIDE BY ZERO"
        );
        assert_eq!(
            error!(HardwareError; "COULD NOT COMPLETE MANEUVER").to_string(),
            "HARDWARE ERROR; COULD NOT COMPLETE MANEUVER"
        );
    }

    #[test]
    fn test_is_compile() {
        assert!(error!(TokenizerError).is_compile());
        assert!(error!(ValidationError).is_compile());
        assert!(!error!(HardwareError).is_compile());
    }
}
