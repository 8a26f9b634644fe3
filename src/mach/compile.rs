use super::Program;
use crate::lang::{Error, Line};

/// Compile source lines into a program.
///
/// Line numbers are 1 based. The first failing line aborts compilation
/// and its error carries the line number.
pub fn compile<I, S>(lines: I) -> Result<Program, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut program = Program::new();
    for (index, source) in lines.into_iter().enumerate() {
        let number = index + 1;
        let line = Line::new(number, source.as_ref())?;
        program
            .add_line(line.into_tokens())
            .map_err(|e| e.in_line_number(Some(number)))?;
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_compile() {
        let p = compile(&["# square", "takeoff", "forward 50 # out", "land"]).unwrap();
        assert_eq!(p.line_count(), 4);
        assert_eq!(p.to_string(), "NOP\nTAKEOFF\nFORWARD 50\nLAND\n");
    }

    #[test]
    fn test_first_error_aborts() {
        let e = compile(vec!["NOP", "FORWARD", "$"]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::ValidationError);
        assert_eq!(e.line_number(), Some(2));
    }

    #[test]
    fn test_later_label_definition_wins() {
        let p = compile(vec!["A: NOP", "A: HALT", "JUMP A"]).unwrap();
        assert_eq!(p.label_lookup("A"), Ok(1));
    }

    #[test]
    fn test_unresolved_label_compiles() {
        assert!(compile(vec!["JUMP NOTALABEL"]).is_ok());
    }
}
