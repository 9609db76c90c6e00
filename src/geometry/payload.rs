/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

/// Reference to a texture owned by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef(pub String);

/// Sub-rectangle of a texture, in normalized UV coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min_u: f64,
    pub max_u: f64,
    pub min_v: f64,
    pub max_v: f64,
}

impl Default for UvRect {
    fn default() -> Self {
        Self {
            min_u: 0.0,
            max_u: 1.0,
            min_v: 0.0,
            max_v: 1.0,
        }
    }
}

/// How a fragment looks. The engine never interprets it; it is handed
/// unchanged to every descendant and to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualPayload {
    SolidColor(Rgb),
    Textured { texture: TextureRef, uv: UvRect },
}

impl Default for VisualPayload {
    fn default() -> Self {
        Self::SolidColor(Rgb::from_hex(0x00FF_6B6B))
    }
}
