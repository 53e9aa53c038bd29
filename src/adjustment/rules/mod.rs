pub mod position;
pub mod strokes;

pub use position::NetPositionRule;
pub use strokes::StrokesUnderParRule;
