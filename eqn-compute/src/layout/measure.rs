/// Dimensions of the glyphs an equation is drawn with.
///
/// Every length is in the same unit the caller will draw in, such as pixels or terminal cells.
pub trait Measure {
    /// The width of a single character.
    fn char_width(&self, c: char) -> i32;

    /// The width of a run of text.
    fn text_width(&self, text: &str) -> i32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }

    /// The height of a line of text.
    fn text_height(&self) -> i32;

    /// The height of the line drawn between the numerator and denominator of a division.
    fn divide_line_height(&self) -> i32;

    /// The width of the `d/dx` glyph of a differential.
    fn differential_width(&self, variable: char) -> i32;

    /// The height of the `d/dx` glyph of a differential.
    fn differential_height(&self, variable: char) -> i32;

    /// The distance from the top of the `d/dx` glyph to its division line.
    fn differential_base(&self, variable: char) -> i32;
}

/// Measurements for a monospace terminal, where every character takes up one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharMeasure;

impl Measure for CharMeasure {
    fn char_width(&self, _: char) -> i32 {
        1
    }

    fn text_height(&self) -> i32 {
        1
    }

    fn divide_line_height(&self) -> i32 {
        1
    }

    fn differential_width(&self, _: char) -> i32 {
        2
    }

    fn differential_height(&self, _: char) -> i32 {
        3
    }

    fn differential_base(&self, _: char) -> i32 {
        1
    }
}
