//! Built-in pixel art and palettes.

use super::target::{PixelGrid, RevealTarget};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Builds a colour from a packed `0xRRGGBB` value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}

const BURLYWOOD: Rgb = Rgb::hex(0x00DE_B887);
const SADDLE_BROWN: Rgb = Rgb::hex(0x008B_4513);
const HOT_PINK: Rgb = Rgb::hex(0x00FF_69B4);
const DEEP_PINK: Rgb = Rgb::hex(0x00FF_1493);
const WHITE: Rgb = Rgb::hex(0x00FF_FFFF);
const BLACK: Rgb = Rgb::hex(0x0000_0000);
const GOLD: Rgb = Rgb::hex(0x00FF_D700);
const SLATE: Rgb = Rgb::hex(0x002F_4F4F);
const ORANGE: Rgb = Rgb::hex(0x00FF_A500);

/// Colours for palette indices `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Rgb; 5]);

impl Palette {
    const BASE: Self = Self([BURLYWOOD, SADDLE_BROWN, HOT_PINK, SADDLE_BROWN, HOT_PINK]);

    /// Colour for a palette index; `None` for transparent or unknown indices.
    #[must_use]
    pub fn color(&self, index: u8) -> Option<Rgb> {
        match index {
            1..=5 => Some(self.0[usize::from(index - 1)]),
            _ => None,
        }
    }
}

/// A named picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    id: &'static str,
    grid: PixelGrid,
    palette: Palette,
}

impl Artwork {
    /// Identifier used by narrative scripts.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// The pixel grid.
    #[must_use]
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// The palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A fresh reveal target over this artwork's grid.
    #[must_use]
    pub fn reveal_target(&self) -> RevealTarget {
        RevealTarget::grid(self.grid.clone())
    }
}

/// The set of artworks a script may reference.
#[derive(Debug, Clone)]
pub struct ArtworkLibrary {
    artworks: Vec<Artwork>,
}

impl ArtworkLibrary {
    /// The pictures that ship with the greeting.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            artworks: vec![
                Artwork {
                    id: "bear",
                    grid: PixelGrid::from_array(&BEAR),
                    palette: Palette::BASE,
                },
                Artwork {
                    id: "heart",
                    grid: PixelGrid::from_array(&HEART),
                    palette: Palette([DEEP_PINK, SADDLE_BROWN, HOT_PINK, SADDLE_BROWN, HOT_PINK]),
                },
                Artwork {
                    id: "tree",
                    grid: PixelGrid::from_array(&TREE),
                    palette: Palette::BASE,
                },
                Artwork {
                    id: "kitty",
                    grid: PixelGrid::from_array(&KITTY),
                    palette: Palette([WHITE, BLACK, GOLD, HOT_PINK, DEEP_PINK]),
                },
                Artwork {
                    id: "penguin",
                    grid: PixelGrid::from_array(&PENGUIN),
                    palette: Palette([SLATE, WHITE, ORANGE, SADDLE_BROWN, HOT_PINK]),
                },
            ],
        }
    }

    /// Looks up an artwork by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|artwork| artwork.id == id)
    }

    /// All identifiers, in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.artworks.iter().map(Artwork::id)
    }
}

impl Default for ArtworkLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

const BEAR: [[u8; 14]; 13] = [
    [0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 0],
    [0, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 2, 1, 1, 2, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 1, 2, 2, 1, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0],
];

const HEART: [[u8; 11]; 9] = [
    [0, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
];

const TREE: [[u8; 12]; 11] = [
    [0, 0, 0, 0, 0, 3, 3, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 3, 3, 3, 3, 0, 0, 0, 0],
    [0, 0, 0, 3, 3, 3, 3, 3, 3, 0, 0, 0],
    [0, 0, 3, 3, 3, 3, 3, 3, 3, 3, 0, 0],
    [0, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 0],
    [3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3],
    [0, 0, 3, 3, 3, 3, 3, 3, 3, 3, 0, 0],
    [0, 0, 0, 3, 3, 3, 3, 3, 3, 0, 0, 0],
    [0, 0, 0, 0, 4, 4, 4, 4, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 4, 4, 4, 0, 0, 0, 0],
    [0, 0, 0, 4, 4, 4, 4, 4, 4, 0, 0, 0],
];

// Bow and ears on the first rows, eyes are 2, nose is 3.
const KITTY: [[u8; 12]; 11] = [
    [0, 0, 0, 0, 5, 5, 0, 0, 0, 5, 5, 0],
    [0, 0, 0, 5, 5, 5, 5, 0, 5, 1, 1, 5],
    [0, 0, 0, 0, 5, 5, 0, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 2, 1, 1, 1, 1, 1, 2, 1, 1, 1],
    [1, 1, 1, 1, 1, 3, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
];

const PENGUIN: [[u8; 8]; 8] = [
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 0, 1, 1, 0, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [0, 2, 2, 2, 2, 2, 2, 0],
    [0, 2, 2, 2, 2, 2, 2, 0],
    [0, 0, 3, 0, 0, 3, 0, 0],
];
