use tracing::debug;

use super::lines::Line;
use crate::schema::{DraftGroup, DraftWorkout};

/// Fold classified lines into a draft workout in one forward pass.
///
/// The only state is the index of the currently open group. Groups and items
/// are strictly append-only: a later header always opens a new group, and an
/// item arriving before any header synthesizes a default "MAIN SET" group so
/// nothing is dropped for lack of context.
pub fn build_workout(lines: impl IntoIterator<Item = Line>) -> DraftWorkout {
    let mut workout = DraftWorkout::default();
    let mut current: Option<usize> = None;

    for line in lines {
        match line {
            Line::TotalDistance(raw) => workout.total_distance = raw,
            Line::TotalTime(raw) => workout.total_time = raw,
            Line::GroupHeader { title, repeat } => {
                workout.set_groups.push(DraftGroup {
                    title,
                    items: Vec::new(),
                    repeat,
                });
                current = Some(workout.set_groups.len() - 1);
            }
            Line::RepeatDirective(n) => match current {
                Some(idx) => workout.set_groups[idx].repeat = Some(n),
                // Known gap: a directive before any header is lost, not
                // buffered for the next group.
                None => debug!(repeat = n, "repeat directive with no open group, dropping"),
            },
            Line::SetItem(item) => {
                let idx = match current {
                    Some(idx) => idx,
                    None => {
                        workout.set_groups.push(DraftGroup {
                            title: "MAIN SET".to_string(),
                            items: Vec::new(),
                            repeat: None,
                        });
                        let idx = workout.set_groups.len() - 1;
                        current = Some(idx);
                        idx
                    }
                };
                workout.set_groups[idx].items.push(item);
            }
            Line::Unrecognized => {}
        }
    }

    workout
}
