use serde::Deserialize;

/// A fill or stroke colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(from = "ColourSpec")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

/// How colours are written in configuration files: `[r, g, b]` or a bare grey level
#[derive(Deserialize)]
#[serde(untagged)]
enum ColourSpec {
    Rgb([f32; 3]),
    Grey(f32),
}

impl From<ColourSpec> for Colour {
    fn from(spec: ColourSpec) -> Self {
        match spec {
            ColourSpec::Rgb(rgb) => rgb.into(),
            ColourSpec::Grey(g) => Colour::new_grey(g),
        }
    }
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey {
            g: g.clamp(0.0, 1.0),
        }
    }
}

impl<T: Into<f32>> From<[T; 3]> for Colour {
    fn from(c: [T; 3]) -> Self {
        let [r, g, b] = c;
        Colour::new_rgb(r.into(), g.into(), b.into())
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.827 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_rgb_arrays_and_grey_levels() {
        let rgb: Colour = serde_json::from_str("[0.5, 0.8, 1.0]").unwrap();
        assert_eq!(rgb, Colour::RGB { r: 0.5, g: 0.8, b: 1.0 });

        let grey: Colour = serde_json::from_str("0.25").unwrap();
        assert_eq!(grey, Colour::Grey { g: 0.25 });
    }

    #[test]
    fn out_of_range_components_are_clamped() {
        assert_eq!(
            Colour::new_rgb(1.5, -0.2, 0.3),
            Colour::RGB { r: 1.0, g: 0.0, b: 0.3 }
        );
    }
}
