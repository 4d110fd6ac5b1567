pub mod groups;
pub mod item;
pub mod lines;

pub use item::{parse_set_item_line, ParseError};

use crate::schema::{validate_workout, ValidationError, Workout};

/// Two-phase pipeline: raw text → classified lines → draft workout →
/// validated workout. Fresh state per call, single forward pass.
pub fn parse_workout_text(text: &str) -> Result<Workout, ValidationError> {
    let classified = lines::classify_lines(text);
    let draft = groups::build_workout(classified);
    validate_workout(draft)
}
