/// ## Number register contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Val {
    Integer(i64),
    Float(f64),
}

impl Default for Val {
    fn default() -> Val {
        Val::Integer(0)
    }
}

impl Val {
    pub fn as_f64(self) -> f64 {
        match self {
            Val::Integer(n) => n as f64,
            Val::Float(n) => n,
        }
    }

    /// Truncated toward zero, saturating at the `i64` limits.
    pub fn truncate(self) -> i64 {
        match self {
            Val::Integer(n) => n,
            Val::Float(n) => n as i64,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Val::Integer(n) => n == 0,
            Val::Float(n) => n == 0.0,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            Val::Float(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Val::Integer(5).to_string(), "5");
        assert_eq!(Val::Float(5.0).to_string(), "5.0");
        assert_eq!(Val::Float(-2.5).to_string(), "-2.5");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(Val::Float(12.9).truncate(), 12);
        assert_eq!(Val::Float(-12.9).truncate(), -12);
        assert_eq!(Val::Integer(-3).truncate(), -3);
    }
}
