use num_complex::Complex64;
use std::collections::HashMap;

/// The values of the variables an equation is evaluated with.
///
/// Variables that were never assigned evaluate to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<char, Complex64>,
}

impl Environment {
    /// Creates an environment with no variables assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a value to the variable with the given name, returning the previous value, if
    /// any.
    pub fn set(&mut self, name: char, value: impl Into<Complex64>) -> Option<Complex64> {
        self.vars.insert(name, value.into())
    }

    /// Returns the value of the variable, or zero if it was never assigned.
    pub fn get(&self, name: char) -> Complex64 {
        self.vars.get(&name).copied().unwrap_or_default()
    }

    /// Removes the variable, returning its value if it was assigned.
    pub fn unset(&mut self, name: char) -> Option<Complex64> {
        self.vars.remove(&name)
    }

    /// Returns an iterator over the assigned variables, sorted by name.
    pub fn vars(&self) -> impl Iterator<Item = (char, Complex64)> + '_ {
        let mut names = self.vars.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names.into_iter().map(|name| (name, self.get(name)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn unassigned_is_zero() {
        let mut env = Environment::new();
        assert_eq!(env.get('x'), Complex64::new(0.0, 0.0));
        assert_eq!(env.set('x', 2.5), None);
        assert_eq!(env.set('x', Complex64::new(0.0, 1.0)), Some(Complex64::new(2.5, 0.0)));
        assert_eq!(env.get('x'), Complex64::new(0.0, 1.0));
        assert_eq!(env.unset('x'), Some(Complex64::new(0.0, 1.0)));
        assert_eq!(env.get('x'), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn sorted_vars() {
        let mut env = Environment::new();
        env.set('y', 1.0);
        env.set('a', 2.0);
        let names = env.vars().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!['a', 'y']);
    }
}
