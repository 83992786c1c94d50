//! Values of the single-letter constants.

use num_complex::Complex64;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Magnitudes below this are treated as zero.
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// The imaginary unit.
pub static I: Lazy<Complex64> = Lazy::new(|| Complex64::new(0.0, 1.0));

/// Euler's number.
pub static E: Lazy<Complex64> = Lazy::new(|| Complex64::new(1f64.exp(), 0.0));

pub static PI: Lazy<Complex64> = Lazy::new(|| Complex64::new(4.0 * 1f64.atan(), 0.0));

/// The constants, by the letter that names them in an equation. `P` is π.
pub static CONSTANTS: Lazy<HashMap<char, Complex64>> = Lazy::new(|| {
    HashMap::from([
        ('e', *E),
        ('P', *PI),
        ('i', *I),
    ])
});

/// Returns the value of the constant with the given name.
pub fn constant(name: char) -> Option<Complex64> {
    CONSTANTS.get(&name).copied()
}

/// Returns true if the number is zero, within [`ZERO_TOLERANCE`].
pub fn is_zero(z: Complex64) -> bool {
    z.norm() < ZERO_TOLERANCE
}

/// Returns true if the number is real and a whole number, within [`ZERO_TOLERANCE`].
pub fn is_integer(z: Complex64) -> bool {
    z.im.abs() < ZERO_TOLERANCE && (z.re - z.re.round()).abs() < ZERO_TOLERANCE
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn values() {
        assert_float_absolute_eq!(constant('P').unwrap().re, std::f64::consts::PI);
        assert_float_absolute_eq!(constant('e').unwrap().re, std::f64::consts::E);
        assert_eq!(constant('i'), Some(Complex64::new(0.0, 1.0)));
        assert_eq!(constant('x'), None);
    }

    #[test]
    fn tolerance() {
        assert!(is_zero(Complex64::new(1e-12, -1e-12)));
        assert!(!is_zero(Complex64::new(1e-6, 0.0)));
        assert!(is_integer(Complex64::new(3.0 + 1e-12, 0.0)));
        assert!(!is_integer(Complex64::new(3.0, 1.0)));
    }
}
