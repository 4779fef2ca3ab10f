use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::hit::paint_order;
use crate::layout::LayoutResult;
use crate::text::char_width;
use crate::types::{Position, Rgb};

/// Screen-space region that painting is confined to. Signed so that content
/// scrolled past the top-left edge can still be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Region {
    fn of_buffer(buf: &Buffer) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: i32::from(buf.width()),
            y1: i32::from(buf.height()),
        }
    }

    fn intersect(self, other: Region) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let clip = Region::of_buffer(buf);
    render_element(root, layout, buf, clip, (0, 0));
}

fn render_element(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    clip: Region,
    offset: (i32, i32),
) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };

    // Fixed elements escape every ancestor's clip and scroll
    let (clip, offset) = if element.position == Position::Fixed {
        (Region::of_buffer(buf), (0, 0))
    } else {
        (clip, offset)
    };

    let x0 = i32::from(rect.x) - offset.0;
    let y0 = i32::from(rect.y) - offset.1;
    let area = Region {
        x0,
        y0,
        x1: x0 + i32::from(rect.width),
        y1: y0 + i32::from(rect.height),
    };

    if let Some(bg) = element.style.background {
        fill(buf, area.intersect(clip), bg.to_rgb());
    }

    render_border(element, area, clip, buf);

    let insets = element.insets();
    let inner = Region {
        x0: area.x0 + i32::from(insets.left),
        y0: area.y0 + i32::from(insets.top),
        x1: area.x1 - i32::from(insets.right),
        y1: area.y1 - i32::from(insets.bottom),
    };

    let mut child_clip = clip;
    if element.overflow_x.clips() {
        child_clip.x0 = child_clip.x0.max(inner.x0);
        child_clip.x1 = child_clip.x1.min(inner.x1);
    }
    if element.overflow_y.clips() {
        child_clip.y0 = child_clip.y0.max(inner.y0);
        child_clip.y1 = child_clip.y1.min(inner.y1);
    }
    let child_offset = (
        offset.0 + i32::from(element.scroll_offset.0),
        offset.1 + i32::from(element.scroll_offset.1),
    );

    match &element.content {
        Content::None => {}
        Content::Text(text) => {
            render_text(text, element, inner, clip.intersect(inner), buf);
        }
        Content::Children(children) => {
            for child in paint_order(children) {
                render_element(child, layout, buf, child_clip, child_offset);
            }
        }
        Content::Table(table) => {
            for cell in table.cells() {
                render_element(cell, layout, buf, child_clip, child_offset);
            }
        }
    }
}

fn put(buf: &mut Buffer, clip: Region, x: i32, y: i32, apply: impl FnOnce(&mut Cell)) {
    if !clip.contains(x, y) {
        return;
    }
    if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
        if let Some(cell) = buf.get_mut(x, y) {
            apply(cell);
        }
    }
}

fn fill(buf: &mut Buffer, region: Region, bg: Rgb) {
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            put(buf, region, x, y, |cell| cell.bg = bg);
        }
    }
}

fn render_text(text: &str, element: &Element, inner: Region, clip: Region, buf: &mut Buffer) {
    let fg = element
        .style
        .foreground
        .map(|c| c.to_rgb())
        .unwrap_or(Cell::DEFAULT_FG);
    let explicit_bg = element.style.background.map(|c| c.to_rgb());
    let style = element.style.text_style;

    for (line_no, line) in text.split('\n').enumerate() {
        let y = inner.y0 + line_no as i32;
        if y >= inner.y1 {
            break;
        }

        let mut x = inner.x0;
        for ch in line.chars() {
            let width = char_width(ch) as i32;
            if x + width > inner.x1 {
                break;
            }

            // Text keeps the background beneath it unless it sets one
            put(buf, clip, x, y, |cell| {
                *cell = Cell::glyph(ch, fg, explicit_bg.unwrap_or(cell.bg), style);
            });
            for extra in 1..width {
                put(buf, clip, x + extra, y, |cell| {
                    *cell = Cell::continuation(fg, explicit_bg.unwrap_or(cell.bg));
                });
            }
            x += width.max(1);
        }
    }
}

fn render_border(element: &Element, area: Region, clip: Region, buf: &mut Buffer) {
    let border = element.border;
    if border == Default::default() || area.x1 <= area.x0 || area.y1 <= area.y0 {
        return;
    }

    let fg = element
        .style
        .border_color
        .or(element.style.foreground)
        .map(|c| c.to_rgb())
        .unwrap_or(Cell::DEFAULT_FG);

    let mut line = |x: i32, y: i32, ch: char| {
        put(buf, clip, x, y, |cell| {
            cell.char = ch;
            cell.fg = fg;
            cell.wide_continuation = false;
        });
    };

    let (left, right) = (area.x0, area.x1 - 1);
    let (top, bottom) = (area.y0, area.y1 - 1);

    if border.top > 0 {
        for x in left..=right {
            line(x, top, '─');
        }
    }
    if border.bottom > 0 {
        for x in left..=right {
            line(x, bottom, '─');
        }
    }
    if border.left > 0 {
        for y in top..=bottom {
            line(left, y, '│');
        }
    }
    if border.right > 0 {
        for y in top..=bottom {
            line(right, y, '│');
        }
    }

    let corners = [
        (border.top > 0 && border.left > 0, left, top, '┌'),
        (border.top > 0 && border.right > 0, right, top, '┐'),
        (border.bottom > 0 && border.left > 0, left, bottom, '└'),
        (border.bottom > 0 && border.right > 0, right, bottom, '┘'),
    ];
    for (present, x, y, ch) in corners {
        if present {
            line(x, y, ch);
        }
    }
}
