// Office Open XML (.pptx) serialization of a `Deck`.
// String-built XML; the fixed parts live in `template`.

pub mod parts;
pub mod slide;
pub mod template;
pub mod writer;

pub use writer::save;
