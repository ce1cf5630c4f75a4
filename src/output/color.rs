//! Name colorization

use std::io::{self, Write};

use lscolors::{Color as LsColor, Indicator, LsColors, Style};
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

use crate::fs::FileKind;
use crate::tree::Node;

/// Decorates a displayed name for a node.
pub trait Colorize {
    fn colorize(&self, node: &Node, text: &str) -> String;
}

/// Returns names unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColor;

impl Colorize for NoColor {
    fn colorize(&self, _node: &Node, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI colors taken from `LS_COLORS`, as `ls --color` shows them.
///
/// Falls back to the `dircolors` defaults when the variable is unset or
/// unparsable.
pub struct AnsiColor {
    ls_colors: LsColors,
}

impl AnsiColor {
    pub fn new() -> Self {
        Self::with_ls_colors(LsColors::from_env().unwrap_or_default())
    }

    pub fn with_ls_colors(ls_colors: LsColors) -> Self {
        Self { ls_colors }
    }

    /// The `LS_COLORS` entry for a node, or `None` to leave the name alone.
    fn style_for(&self, node: &Node) -> Option<&Style> {
        let mode = node.mode()?;
        let indicator = match mode.kind() {
            FileKind::Dir => Indicator::Directory,
            FileKind::NamedPipe => Indicator::FIFO,
            FileKind::Socket => Indicator::Socket,
            FileKind::BlockDevice => Indicator::BlockDevice,
            FileKind::CharDevice => Indicator::CharacterDevice,
            FileKind::Symlink if std::fs::canonicalize(node.path()).is_err() => {
                Indicator::OrphanedSymbolicLink
            }
            FileKind::Symlink => Indicator::SymbolicLink,
            FileKind::Regular if mode.is_executable() => Indicator::ExecutableFile,
            FileKind::Regular => {
                return self
                    .ls_colors
                    .style_for_str(&node.name())
                    .or_else(|| self.ls_colors.style_for_indicator(Indicator::RegularFile));
            }
        };
        self.ls_colors.style_for_indicator(indicator)
    }
}

impl Default for AnsiColor {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorize for AnsiColor {
    fn colorize(&self, node: &Node, text: &str) -> String {
        let Some(spec) = self.style_for(node).and_then(color_spec) else {
            return text.to_string();
        };
        paint(&spec, text)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_else(|| text.to_string())
    }
}

/// `None` for styles that set nothing, such as `00`.
fn color_spec(style: &Style) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    spec.set_fg(style.foreground.as_ref().map(term_color))
        .set_bg(style.background.as_ref().map(term_color))
        .set_bold(style.font_style.bold)
        .set_italic(style.font_style.italic)
        .set_underline(style.font_style.underline);
    (!spec.is_none()).then_some(spec)
}

fn term_color(color: &LsColor) -> Color {
    match color {
        LsColor::Black => Color::Black,
        LsColor::Red => Color::Red,
        LsColor::Green => Color::Green,
        LsColor::Yellow => Color::Yellow,
        LsColor::Blue => Color::Blue,
        LsColor::Magenta => Color::Magenta,
        LsColor::Cyan => Color::Cyan,
        LsColor::White => Color::White,
        LsColor::BrightBlack => Color::Ansi256(8),
        LsColor::BrightRed => Color::Ansi256(9),
        LsColor::BrightGreen => Color::Ansi256(10),
        LsColor::BrightYellow => Color::Ansi256(11),
        LsColor::BrightBlue => Color::Ansi256(12),
        LsColor::BrightMagenta => Color::Ansi256(13),
        LsColor::BrightCyan => Color::Ansi256(14),
        LsColor::BrightWhite => Color::Ansi256(15),
        LsColor::Fixed(n) => Color::Ansi256(*n),
        LsColor::RGB(r, g, b) => Color::Rgb(*r, *g, *b),
    }
}

fn paint(style: &ColorSpec, text: &str) -> io::Result<Vec<u8>> {
    let mut out = Ansi::new(Vec::new());
    out.set_color(style)?;
    out.write_all(text.as_bytes())?;
    out.reset()?;
    Ok(out.into_inner())
}
