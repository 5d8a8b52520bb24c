//! Output configuration types

use termcolor::ColorChoice;

/// Glyph set used to draw each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// Box-drawing indentation with folder and file icons.
    #[default]
    Unicode,
    /// Plain ASCII, for terminals and files that cannot show the icons.
    Ascii,
}

impl TreeStyle {
    /// Indentation repeated once per depth level.
    pub fn indent(self) -> &'static str {
        match self {
            TreeStyle::Unicode => "│   ",
            TreeStyle::Ascii => "|   ",
        }
    }

    pub fn dir_marker(self) -> &'static str {
        match self {
            TreeStyle::Unicode => "├ 📁",
            TreeStyle::Ascii => "+ ",
        }
    }

    pub fn file_marker(self) -> &'static str {
        match self {
            TreeStyle::Unicode => "├ 📄",
            TreeStyle::Ascii => "- ",
        }
    }
}

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Passed to the terminal stream as is. `Auto` lets termcolor decide.
    pub color: ColorChoice,
    pub style: TreeStyle,
    /// Print the "N directories, M files" footer.
    pub show_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            style: TreeStyle::default(),
            show_summary: true,
        }
    }
}
