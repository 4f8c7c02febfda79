//! Phosphor palette. Everything on screen is green on black.

use ratatui::style::{Color, Modifier, Style};

use crate::core::messages::Sender;

pub const BACKGROUND: Color = Color::Black;
pub const PHOSPHOR: Color = Color::Rgb(0x00, 0xff, 0x00);
pub const PHOSPHOR_DIM: Color = Color::Rgb(0x00, 0xaa, 0x00);
pub const PHOSPHOR_FAINT: Color = Color::Rgb(0x00, 0x66, 0x00);

pub fn base() -> Style {
    Style::default().fg(PHOSPHOR).bg(BACKGROUND)
}

pub fn placeholder() -> Style {
    Style::default().fg(PHOSPHOR_FAINT).bg(BACKGROUND)
}

pub fn border() -> Style {
    Style::default().fg(PHOSPHOR_DIM).bg(BACKGROUND)
}

pub fn status() -> Style {
    base().add_modifier(Modifier::BOLD)
}

pub fn sender(sender: Sender) -> Style {
    match sender {
        Sender::System | Sender::Local => base(),
        Sender::Remote => Style::default().fg(PHOSPHOR_DIM).bg(BACKGROUND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_is_dimmer_than_local() {
        assert_eq!(sender(Sender::Local).fg, Some(PHOSPHOR));
        assert_eq!(sender(Sender::System).fg, Some(PHOSPHOR));
        assert_eq!(sender(Sender::Remote).fg, Some(PHOSPHOR_DIM));
    }
}
