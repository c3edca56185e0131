//! Symbolic parameter expressions.
//!
//! Models advertise derived quantities (electrode area, Faraday constant)
//! as expressions over parameter names instead of numbers, so the numeric
//! values always come from whichever `ParameterSet` the caller evaluates
//! against.

use std::ops::Mul;

/// A parameter expression: a constant, a named parameter, or a product.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Param(String),
    Product(Vec<Expr>),
}

impl Expr {
    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }

    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        // Flatten so chained products stay a single node
        let mut factors = match self {
            Expr::Product(f) => f,
            other => vec![other],
        };
        match rhs {
            Expr::Product(mut f) => factors.append(&mut f),
            other => factors.push(other),
        }
        Expr::Product(factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_flatten() {
        let e = Expr::param("a") * Expr::param("b") * Expr::constant(2.0);
        match e {
            Expr::Product(factors) => assert_eq!(factors.len(), 3),
            other => panic!("expected product, got {other:?}"),
        }
    }
}
