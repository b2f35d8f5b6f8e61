pub mod image;
pub mod label;
pub mod player;
pub mod top;
