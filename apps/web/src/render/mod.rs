// Server-side HTML rendering.
// Pages are complete documents; fragments are swapped in by HTMX attributes
// and degrade to plain links and GET forms without JavaScript.

pub mod detail;
pub mod html;
pub mod markdown;
pub mod matrix;
pub mod page;

use crate::models::catalog::Section;

/// How the matrix is drawn. Anything unrecognized falls back to `List`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    List,
    Grid,
}

impl Layout {
    pub fn parse(value: Option<&str>) -> Layout {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("grid") => Layout::Grid,
            _ => Layout::List,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::List => "list",
            Layout::Grid => "grid",
        }
    }
}

/// Everything needed to draw one sheet's (already filtered) matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    pub sheet: &'a str,
    pub query: &'a str,
    pub layout: Layout,
    pub sections: &'a [Section],
}
