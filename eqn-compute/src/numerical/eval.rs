use eqn_error::Error;
use eqn_parser::tree::{node::{NodeId, NodeKind}, Equation};
use num_complex::Complex64;
use crate::{consts, funcs};
use super::{
    env::Environment,
    error::{InputHasNoValue, UnknownConstant, UnknownFunction},
};

/// Step used to approximate derivatives with a central difference.
pub const DIFFERENTIAL_STEP: f64 = 1e-5;

/// Any type that can be numerically evaluated.
pub trait Eval {
    /// Evaluates the value with the given environment.
    fn eval(&self, env: &Environment) -> Result<Complex64, Error>;
}

impl Eval for Equation {
    fn eval(&self, env: &Environment) -> Result<Complex64, Error> {
        evaluate(self, self.root(), env)
    }
}

/// Raises `base` to an integer power, keeping real bases real.
fn powi(base: Complex64, exp: i32) -> Complex64 {
    match exp {
        1 => base,
        0 => Complex64::new(1.0, 0.0),
        _ => base.powi(exp),
    }
}

/// Evaluates the subtree rooted at the node.
///
/// The value of a node is its kind's value, negated if the node is negative, then raised to the
/// node's multiplicity.
pub fn evaluate(eqn: &Equation, id: NodeId, env: &Environment) -> Result<Complex64, Error> {
    let node = eqn.node(id)?;
    let value = match &node.kind {
        NodeKind::Number { value, .. } => Complex64::new(*value, 0.0),
        NodeKind::Variable(name) => env.get(*name),
        NodeKind::Constant(name) => consts::constant(*name)
            .ok_or_else(|| Error::unspanned(UnknownConstant { name: *name }))?,
        NodeKind::Function { name, arg } => {
            let f = funcs::get(name)
                .ok_or_else(|| Error::unspanned(UnknownFunction { name: name.clone() }))?;
            f(evaluate(eqn, *arg, env)?)
        },
        NodeKind::Divide(binary) => {
            evaluate(eqn, binary.first, env)? / evaluate(eqn, binary.second, env)?
        },
        NodeKind::Power(binary) => {
            let base = evaluate(eqn, binary.first, env)?;
            let exp = evaluate(eqn, binary.second, env)?;
            if consts::is_integer(exp) && exp.re.abs() <= i32::MAX as f64 {
                powi(base, exp.re.round() as i32)
            } else {
                base.powc(exp)
            }
        },
        NodeKind::Differential { variable, function } => {
            differentiate(eqn, *function, *variable, env)?
        },
        NodeKind::Term(factors) => factors.iter()
            .try_fold(Complex64::new(1.0, 0.0), |product, factor| {
                Ok::<_, Error>(product * evaluate(eqn, *factor, env)?)
            })?,
        NodeKind::Expression(terms) => terms.iter()
            .try_fold(Complex64::new(0.0, 0.0), |sum, term| {
                Ok::<_, Error>(sum + evaluate(eqn, *term, env)?)
            })?,
        NodeKind::Input { .. } => return Err(Error::unspanned(InputHasNoValue)),
    };

    let signed = if node.sign { value } else { -value };
    Ok(powi(signed, node.nth))
}

/// Approximates the derivative of the subtree with respect to `variable`, at the variable's
/// current value.
fn differentiate(
    eqn: &Equation,
    id: NodeId,
    variable: char,
    env: &Environment,
) -> Result<Complex64, Error> {
    let at = env.get(variable);
    let mut shifted = env.clone();

    shifted.set(variable, at + DIFFERENTIAL_STEP);
    let above = evaluate(eqn, id, &shifted)?;
    shifted.set(variable, at - DIFFERENTIAL_STEP);
    let below = evaluate(eqn, id, &shifted)?;

    Ok((above - below) / (2.0 * DIFFERENTIAL_STEP))
}
