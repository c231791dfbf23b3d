//! Miscellaneous project utilities.

use crate::{EDGE_LENGTH, NUM_SPACES};
use std::fmt::{self, Formatter};

const COLUMN_LABELS: &str = "ABCDEFGH";

/// Write one glyph per cell as a labeled grid, columns `A`-`H` across and rows `1`-`8` down.
/// `glyphs` must yield exactly 64 items, in row-major order from A1.
pub fn format_grid<T: Iterator<Item = char>>(glyphs: T, f: &mut Formatter) -> fmt::Result {
    write!(f, "  ")?;
    for label in COLUMN_LABELS.chars() {
        write!(f, " {}", label)?;
    }

    let mut written = 0;
    for (index, glyph) in glyphs.enumerate() {
        if index >= NUM_SPACES {
            return Err(fmt::Error);
        }
        if index % EDGE_LENGTH == 0 {
            write!(f, "\n{} ", index / EDGE_LENGTH + 1)?;
        }
        write!(f, " {}", glyph)?;
        written += 1;
    }

    if written == NUM_SPACES {
        Ok(())
    } else {
        Err(fmt::Error)
    }
}
