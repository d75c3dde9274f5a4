//! Text layout.
//!
//! Shared row-layout helper for every text-bearing widget: wraps (or
//! truncates) a string into a fixed `width x height` block of rows, padding
//! with a filler character according to the configured alignments.
//!
//! The cell model is one `char` per cell; chunking and padding count
//! characters, not bytes.

use crate::types::{AlignmentHorizontal, AlignmentVertical};

/// How a text block is arranged inside its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Horizontal alignment of each row.
    pub horizontal: AlignmentHorizontal,
    /// Vertical alignment of the text block.
    pub vertical: AlignmentVertical,
    /// Whether text continues on the next row when a row is full.
    pub wrap: bool,
    /// The character used to pad rows.
    pub filler: char,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            horizontal: AlignmentHorizontal::Left,
            vertical: AlignmentVertical::Top,
            wrap: true,
            filler: ' ',
        }
    }
}

/// Lay `text` out into exactly `height` rows of exactly `width` characters.
///
/// Without wrapping (or when the text fits on one row) the text becomes a
/// single padded row. With wrapping it is split into consecutive
/// `width`-character chunks. Rows beyond `height` are silently dropped; a
/// short block is padded with filler-only rows above and below per the
/// vertical alignment. Each row is padded or hard-truncated per the
/// horizontal alignment.
pub fn layout_rows(text: &str, width: i32, height: i32, style: &TextStyle) -> Vec<String> {
    if width < 1 || height < 1 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let width = width as usize;
    let height = height as usize;

    let rows: Vec<String> = if !style.wrap || chars.len() <= width {
        vec![pad_row(&chars, width, style)]
    } else {
        chars
            .chunks(width)
            .map(|chunk| pad_row(chunk, width, style))
            .collect()
    };

    if rows.len() >= height {
        return rows.into_iter().take(height).collect();
    }

    let padding_top = match style.vertical {
        AlignmentVertical::Top => 0,
        AlignmentVertical::Middle => (height - rows.len()) / 2,
        AlignmentVertical::Bottom => height - rows.len(),
    };

    let empty_row: String = std::iter::repeat(style.filler).take(width).collect();

    let mut block = Vec::with_capacity(height);
    block.resize(padding_top, empty_row.clone());
    block.extend(rows);
    block.resize(height, empty_row);
    block
}

/// Pad or truncate one row to exactly `width` characters.
fn pad_row(chars: &[char], width: usize, style: &TextStyle) -> String {
    if chars.len() >= width {
        return chars[..width].iter().collect();
    }

    let missing = width - chars.len();
    let (left, right) = match style.horizontal {
        AlignmentHorizontal::Left => (0, missing),
        // Odd padding leaves the extra character on the right.
        AlignmentHorizontal::Middle => (missing / 2, missing - missing / 2),
        AlignmentHorizontal::Right => (missing, 0),
    };

    let mut row = String::with_capacity(width);
    row.extend(std::iter::repeat(style.filler).take(left));
    row.extend(chars);
    row.extend(std::iter::repeat(style.filler).take(right));
    row
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn style(
        horizontal: AlignmentHorizontal,
        vertical: AlignmentVertical,
        wrap: bool,
    ) -> TextStyle {
        TextStyle {
            horizontal,
            vertical,
            wrap,
            filler: '.',
        }
    }

    #[test]
    fn test_fitting_text_single_row() {
        let rows = layout_rows(
            "Hello",
            5,
            1,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Top, true),
        );
        assert_eq!(rows, vec!["Hello"]);
    }

    #[test]
    fn test_wrap_exact_chunks() {
        let rows = layout_rows(
            "abcdefg",
            3,
            3,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Top, true),
        );
        assert_eq!(rows, vec!["abc", "def", "g.."]);
    }

    #[test]
    fn test_no_wrap_truncates_row() {
        let rows = layout_rows(
            "abcdefg",
            3,
            1,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Top, false),
        );
        assert_eq!(rows, vec!["abc"]);
    }

    #[test]
    fn test_overflow_rows_truncated_to_height() {
        let rows = layout_rows(
            "abcdefgh",
            2,
            2,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Top, true),
        );
        assert_eq!(rows, vec!["ab", "cd"]);
    }

    #[test]
    fn test_horizontal_alignment() {
        let left = layout_rows(
            "ab",
            5,
            1,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Top, true),
        );
        let middle = layout_rows(
            "ab",
            5,
            1,
            &style(AlignmentHorizontal::Middle, AlignmentVertical::Top, true),
        );
        let right = layout_rows(
            "ab",
            5,
            1,
            &style(AlignmentHorizontal::Right, AlignmentVertical::Top, true),
        );

        assert_eq!(left, vec!["ab..."]);
        // Odd padding: extra filler ends up on the right.
        assert_eq!(middle, vec![".ab.."]);
        assert_eq!(right, vec!["...ab"]);
    }

    #[test]
    fn test_vertical_alignment() {
        let top = layout_rows(
            "x",
            1,
            4,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Top, true),
        );
        let middle = layout_rows(
            "x",
            1,
            4,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Middle, true),
        );
        let bottom = layout_rows(
            "x",
            1,
            4,
            &style(AlignmentHorizontal::Left, AlignmentVertical::Bottom, true),
        );

        assert_eq!(top, vec!["x", ".", ".", "."]);
        assert_eq!(middle, vec![".", "x", ".", "."]);
        assert_eq!(bottom, vec![".", ".", ".", "x"]);
    }

    #[test]
    fn test_degenerate_dimensions() {
        assert!(layout_rows("x", 0, 1, &TextStyle::default()).is_empty());
        assert!(layout_rows("x", 1, 0, &TextStyle::default()).is_empty());
    }
}
