use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Arithmetic on number register values
///
/// Integer with integer stays integer and is overflow checked.
/// Any float operand makes the result a float.
pub struct Operation {}

fn overflow() -> Error {
    error!(SoftwareError; "INTEGER OVERFLOW")
}

fn divide_by_zero() -> Error {
    error!(SoftwareError; "DIVIDE BY ZERO")
}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => l.checked_add(r).map(Integer).ok_or_else(overflow),
            (l, r) => Ok(Float(l.as_f64() + r.as_f64())),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => l.checked_sub(r).map(Integer).ok_or_else(overflow),
            (l, r) => Ok(Float(l.as_f64() - r.as_f64())),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => l.checked_mul(r).map(Integer).ok_or_else(overflow),
            (l, r) => Ok(Float(l.as_f64() * r.as_f64())),
        }
    }

    /// True division. The result is always a float.
    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        if rhs.is_zero() {
            return Err(divide_by_zero());
        }
        Ok(Val::Float(lhs.as_f64() / rhs.as_f64()))
    }

    /// Floor division.
    pub fn divide_int(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        if rhs.is_zero() {
            return Err(divide_by_zero());
        }
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => {
                let q = l.checked_div(r).ok_or_else(overflow)?;
                if q * r != l && ((l < 0) != (r < 0)) {
                    Ok(Integer(q - 1))
                } else {
                    Ok(Integer(q))
                }
            }
            (l, r) => Ok(Float((l.as_f64() / r.as_f64()).floor())),
        }
    }

    /// Remainder taking the sign of the divisor.
    pub fn remainder(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        if rhs.is_zero() {
            return Err(divide_by_zero());
        }
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => {
                let m = l.checked_rem(r).ok_or_else(overflow)?;
                if m != 0 && ((m < 0) != (r < 0)) {
                    Ok(Integer(m + r))
                } else {
                    Ok(Integer(m))
                }
            }
            (l, r) => {
                let (l, r) = (l.as_f64(), r.as_f64());
                let m = l % r;
                if m != 0.0 && ((m < 0.0) != (r < 0.0)) {
                    Ok(Float(m + r))
                } else {
                    Ok(Float(m))
                }
            }
        }
    }

    /// `None` when either side is NaN.
    pub fn compare(lhs: Val, rhs: Val) -> Option<Ordering> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Some(l.cmp(&r)),
            (l, r) => l.as_f64().partial_cmp(&r.as_f64()),
        }
    }
}
