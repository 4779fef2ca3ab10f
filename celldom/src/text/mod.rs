use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Width of the widest line and number of lines. Empty text is one line.
pub fn text_extent(s: &str) -> (usize, usize) {
    s.split('\n').fold((0, 0), |(width, lines), line| {
        (width.max(display_width(line)), lines + 1)
    })
}
