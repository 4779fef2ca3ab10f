#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A terminal color. Named colors map onto the 16-color palette most
/// terminals agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Rgb(Rgb),
    Black,
    White,
    Gray,
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    pub const fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Black => Rgb::new(0, 0, 0),
            Self::White => Rgb::new(255, 255, 255),
            Self::Gray => Rgb::new(128, 128, 128),
            Self::Red => Rgb::new(205, 49, 49),
            Self::Green => Rgb::new(13, 188, 121),
            Self::Yellow => Rgb::new(229, 229, 16),
            Self::Blue => Rgb::new(36, 114, 200),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}
