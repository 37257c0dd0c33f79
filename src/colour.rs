/// A fill colour in the DeviceGray colour space
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// g ranges from 0.0 (black) to 1.0 (white)
    Grey { g: f32 },
}

/// Colours used by the guest-guide artefacts
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Secondary text such as hints and URLs
    pub const MUTED: Colour = Colour::Grey { g: 0.42 };
}
