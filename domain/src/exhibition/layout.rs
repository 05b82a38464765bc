//! Room planning and exhibit-to-room assignment.

use super::entities::{Exhibit, Room};

/// Fewest rooms an exhibition is laid out with
pub const MIN_ROOMS: usize = 3;

/// Room count for a given number of exhibits: four rooms from eight
/// exhibits up, otherwise three.
pub fn room_count(exhibit_count: usize) -> usize {
    if exhibit_count >= 8 { 4 } else { MIN_ROOMS }
}

/// A room as proposed by the designer, before exhibits are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPlan {
    pub title: String,
    pub theme: String,
    pub description: String,
}

impl RoomPlan {
    fn filler(position: usize) -> Self {
        Self {
            title: format!("Exhibition Room {}", position),
            theme: "General Exhibition".to_string(),
            description: "Additional exhibition space.".to_string(),
        }
    }
}

/// Parse a `ROOM n: / THEME: / DESCRIPTION:` room plan.
///
/// Unrecognized lines are ignored. The result is padded with generic
/// rooms so it never has fewer than [`MIN_ROOMS`] entries.
pub fn parse_room_plan(response: &str) -> Vec<RoomPlan> {
    let mut plans: Vec<RoomPlan> = Vec::new();
    let mut current: Option<RoomPlan> = None;

    for line in response.lines().map(str::trim) {
        if line.starts_with("ROOM") {
            if let Some(plan) = current.take() {
                plans.push(plan);
            }
            let title = match line.split_once(':') {
                Some((_, title)) => title.trim().to_string(),
                None => format!("Room {}", plans.len() + 1),
            };
            current = Some(RoomPlan {
                title,
                theme: String::new(),
                description: String::new(),
            });
        } else if let Some(theme) = line.strip_prefix("THEME:") {
            if let Some(plan) = current.as_mut() {
                plan.theme = theme.trim().to_string();
            }
        } else if let Some(description) = line.strip_prefix("DESCRIPTION:")
            && let Some(plan) = current.as_mut()
        {
            plan.description = description.trim().to_string();
        }
    }

    if let Some(plan) = current {
        plans.push(plan);
    }

    while plans.len() < MIN_ROOMS {
        plans.push(RoomPlan::filler(plans.len() + 1));
    }

    plans
}

/// Assign exhibits to rooms as contiguous slices.
///
/// Every room but the last receives `exhibits / rooms` exhibits; the last
/// room takes the remainder. Order is preserved and no exhibit is dropped
/// or duplicated.
pub fn assign_exhibits(plans: Vec<RoomPlan>, exhibits: Vec<Exhibit>) -> Vec<Room> {
    if plans.is_empty() {
        return Vec::new();
    }

    let per_room = exhibits.len() / plans.len();
    let last = plans.len() - 1;
    let mut remaining = exhibits.into_iter();

    plans
        .into_iter()
        .enumerate()
        .map(|(i, plan)| {
            let slice: Vec<Exhibit> = if i == last {
                remaining.by_ref().collect()
            } else {
                remaining.by_ref().take(per_room).collect()
            };
            Room::new(i + 1, plan.title)
                .with_theme(plan.theme)
                .with_description(plan.description)
                .with_exhibits(slice)
        })
        .collect()
}
