use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::element::Element;
use crate::event::Event;
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// The terminal in raw mode on the alternate screen, with mouse capture.
///
/// Frames are double-buffered: each [`render`](Self::render) paints into a
/// fresh buffer and only the cells that changed since the previous frame are
/// written out. Dropping the terminal restores the original screen.
pub struct Terminal {
    stdout: io::Stdout,
    front: Buffer,
    back: Buffer,
    last_layout: LayoutResult,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        crossterm::execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::debug!("terminal opened at {width}x{height}");

        Ok(Self {
            stdout,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
            last_layout: LayoutResult::default(),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.front.width(), self.front.height())
    }

    /// Wait up to `timeout` for input, then drain everything pending.
    /// Input with no [`Event`] counterpart is dropped.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut wait = timeout;
        while event::poll(wait)? {
            events.extend(Event::from_crossterm(event::read()?));
            wait = Duration::ZERO;
        }
        Ok(events)
    }

    /// Lay out, paint and flush the changed cells. Returns the layout so
    /// callers can read geometry back after the frame is committed.
    pub fn render(&mut self, root: &Element) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if self.front.reset(width, height) {
            log::debug!("terminal resized to {width}x{height}");
            self.back = Buffer::new(width, height);
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.last_layout = layout(root, Rect::from_size(width, height));
        render_to_buffer(root, &self.last_layout, &mut self.front);

        self.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(&self.last_layout)
    }

    /// Layout of the last rendered frame.
    pub fn layout(&self) -> &LayoutResult {
        &self.last_layout
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.front.changes(&self.back) {
            if cell.wide_continuation {
                continue;
            }
            if pen.cursor != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.stdout, cell)?;
            write!(self.stdout, "{}", cell.char)?;
            pen.cursor = Some((x.saturating_add(char_width(cell.char).max(1) as u16), y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// What the terminal is currently set to draw with, so unchanged colors and
/// attributes are not re-sent for every cell.
#[derive(Default)]
struct Pen {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: TextStyle,
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        if cell.style != self.style {
            // Attributes cannot be switched off one by one on every terminal
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            let attributes = [
                (cell.style.bold, Attribute::Bold),
                (cell.style.dim, Attribute::Dim),
                (cell.style.italic, Attribute::Italic),
                (cell.style.underline, Attribute::Underlined),
                (cell.style.reverse, Attribute::Reverse),
            ];
            for (_, attribute) in attributes.into_iter().filter(|(on, _)| *on) {
                queue!(out, SetAttribute(attribute))?;
            }
            self.style = cell.style;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
