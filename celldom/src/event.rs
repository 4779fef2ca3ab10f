use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};

/// Columns scrolled per horizontal wheel notch.
const HORIZONTAL_WHEEL_STEP: i16 = 4;

/// High-level input events, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key { key: Key, modifiers: Modifiers },
    Click { x: u16, y: u16 },
    Scroll {
        x: u16,
        y: u16,
        delta_x: i16,
        delta_y: i16,
    },
    Resize { width: u16, height: u16 },
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        })
    }
}

impl Event {
    /// Translate a raw crossterm event. Events with no counterpart (key
    /// releases, mouse moves, focus changes) yield `None`.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Some(Event::Key {
                    key: Key::from_code(key.code)?,
                    modifiers: key.modifiers.into(),
                })
            }
            CrosstermEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
                let scroll = |delta_x, delta_y| Event::Scroll {
                    x,
                    y,
                    delta_x,
                    delta_y,
                };
                match mouse.kind {
                    MouseEventKind::Down(_) => Some(Event::Click { x, y }),
                    MouseEventKind::ScrollUp if shift => Some(scroll(-HORIZONTAL_WHEEL_STEP, 0)),
                    MouseEventKind::ScrollDown if shift => Some(scroll(HORIZONTAL_WHEEL_STEP, 0)),
                    MouseEventKind::ScrollUp => Some(scroll(0, -1)),
                    MouseEventKind::ScrollDown => Some(scroll(0, 1)),
                    MouseEventKind::ScrollLeft => Some(scroll(-HORIZONTAL_WHEEL_STEP, 0)),
                    MouseEventKind::ScrollRight => Some(scroll(HORIZONTAL_WHEEL_STEP, 0)),
                    _ => None,
                }
            }
            CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }
}
