//! The functions an equation can apply, all of them on complex arguments.

use num_complex::Complex64;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use super::consts::is_zero;

/// A function of one complex argument.
pub type Func = fn(Complex64) -> Complex64;

fn sin(z: Complex64) -> Complex64 {
    z.sin()
}

fn cos(z: Complex64) -> Complex64 {
    z.cos()
}

fn tan(z: Complex64) -> Complex64 {
    z.tan()
}

/// The natural logarithm. The logarithm of zero is negative infinity instead of NaN.
fn log(z: Complex64) -> Complex64 {
    if is_zero(z) {
        Complex64::new(f64::NEG_INFINITY, 0.0)
    } else {
        z.ln()
    }
}

fn exp(z: Complex64) -> Complex64 {
    z.exp()
}

/// Every function, by name.
pub static FUNCTIONS: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    HashMap::from([
        ("sin", sin as Func),
        ("cos", cos),
        ("tan", tan),
        ("log", log),
        ("exp", exp),
    ])
});

/// Returns the function with the given name.
pub fn get(name: &str) -> Option<Func> {
    FUNCTIONS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn known_names() {
        for name in ["sin", "cos", "tan", "log", "exp"] {
            assert!(get(name).is_some(), "{} is missing", name);
        }
        assert!(get("sqrt").is_none());
    }

    #[test]
    fn log_of_zero() {
        let f = get("log").unwrap();
        assert_eq!(f(Complex64::new(0.0, 0.0)).re, f64::NEG_INFINITY);
        assert_float_absolute_eq!(f(Complex64::new(1.0, 0.0)).re, 0.0);
    }
}
