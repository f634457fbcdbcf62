//! Custom widgets for the card TUI

pub mod spirit_field;

pub use spirit_field::SpiritFieldWidget;
