use std::fmt;

/// A rule applied while simplifying an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `(ab)^n = a^n b^n`
    DistributeMultiplicity,

    /// `2^3 = 8`
    FoldNumberPower,

    /// `2*3x = 6x`
    FoldNumbers,

    /// `x x = x^2`
    CombineFactors,

    /// `x^a x^b = x^(a+b)`, `x x^a = x^(a+1)`
    CombinePowers,

    /// `x+2+3 = x+5`
    FoldConstantTerms,

    /// `2x+3x = 5x`
    CombineLikeTerms,

    /// `x+0 = x`
    DropZeroTerms,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Step::DistributeMultiplicity => "distribute a power over a product",
            Step::FoldNumberPower => "evaluate a power of a number",
            Step::FoldNumbers => "multiply numbers",
            Step::CombineFactors => "combine equal factors",
            Step::CombinePowers => "add the exponents of powers with the same base",
            Step::FoldConstantTerms => "add numbers",
            Step::CombineLikeTerms => "combine like terms",
            Step::DropZeroTerms => "remove terms equal to zero",
        };
        write!(f, "{}", text)
    }
}
