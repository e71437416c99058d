//! Column-aligned text tables.
//!
//! A [`Table`] is an append-only list of rows with separators, trailing
//! total rows and a caption. A [`Renderer`] turns it into fixed-width text,
//! wrapping styled rows in the markers of an injected [`StyleSheet`].

mod render;
mod style;
mod table;

pub use render::{Renderer, DEFAULT_PLACEHOLDER};
pub use style::{Marker, Style, StyleSheet};
pub use table::{Alignment, Row, Separator, Table, Total};
