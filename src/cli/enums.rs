//! CLI enum types for color and serial alignment options.

use clap::ValueEnum;

use vto::prompt::Align;
use vto::style::Tint;

/// Foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorArg {
    Black,
    Red,
    #[default]
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl From<ColorArg> for Tint {
    fn from(c: ColorArg) -> Self {
        match c {
            ColorArg::Black => Tint::Black,
            ColorArg::Red => Tint::Red,
            ColorArg::Green => Tint::Green,
            ColorArg::Yellow => Tint::Yellow,
            ColorArg::Blue => Tint::Blue,
            ColorArg::Magenta => Tint::Magenta,
            ColorArg::Cyan => Tint::Cyan,
            ColorArg::White => Tint::White,
        }
    }
}

/// Serial number alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignArg {
    Left,
    Right,
}

impl From<AlignArg> for Align {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Left => Align::Left,
            AlignArg::Right => Align::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_arg_to_tint() {
        assert_eq!(Tint::from(ColorArg::Red), Tint::Red);
        assert_eq!(Tint::from(ColorArg::Green), Tint::Green);
        assert_eq!(Tint::from(ColorArg::Magenta), Tint::Magenta);
        assert_eq!(Tint::from(ColorArg::Cyan), Tint::Cyan);
    }

    #[test]
    fn test_color_arg_names_match_tint_names() {
        for arg in ColorArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(Tint::from(*arg).name(), name);
        }
    }

    #[test]
    fn test_align_arg_to_align() {
        assert_eq!(Align::from(AlignArg::Left), Align::Left);
        assert_eq!(Align::from(AlignArg::Right), Align::Right);
    }
}
