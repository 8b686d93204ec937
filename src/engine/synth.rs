//! Default component synthesis and id stamping.
//!
//! Coordinates follow a fixed grid used only by the layout view: restrooms
//! along `y = 50`, corridors stacked from `y = 200`, lifts spread along their
//! corridor.

use crate::model::{Building, Corridor, Floor, Lift, Position, Restroom};
use chrono::Utc;

pub const DEFAULT_RESTROOMS_PER_FLOOR: usize = 2;
pub const DEFAULT_CORRIDORS_PER_FLOOR: usize = 2;
pub const DEFAULT_LIFTS_PER_CORRIDOR: usize = 2;

/// Strictly increasing millisecond stamps for incremental ids.
///
/// Uses wall-clock milliseconds, bumped past the previous stamp whenever
/// several entities are created within the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdStamps {
    last: i64,
}

impl IdStamps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

#[must_use]
pub fn restroom_position(index: usize) -> Position {
    Position::new(100.0 + index as f64 * 150.0, 50.0)
}

#[must_use]
pub fn corridor_position(index: usize) -> Position {
    Position::new(100.0, 200.0 + index as f64 * 100.0)
}

#[must_use]
pub fn lift_position(index: usize, corridor_y: f64) -> Position {
    Position::new(50.0 + index as f64 * 100.0, corridor_y)
}

/// Restroom at position `index` (0-based) on its floor.
#[must_use]
pub fn restroom(id: String, index: usize) -> Restroom {
    Restroom {
        id,
        name: format!("Restroom {}", index + 1),
        position: restroom_position(index),
        map_2d: None,
        fixture_details: None,
    }
}

/// Corridor at position `index` (0-based) with `lifts` lifts.
#[must_use]
pub fn corridor(id: String, index: usize, lifts: usize) -> Corridor {
    let position = corridor_position(index);
    let lifts = (0..lifts)
        .map(|k| Lift {
            id: format!("{id}-lift-{}", k + 1),
            position: lift_position(k, position.y),
        })
        .collect();

    Corridor {
        name: format!("Corridor {}", index + 1),
        id,
        position,
        lifts,
        map_2d: None,
    }
}

/// Floor with generated components; child ids are `{id}-{kind}-{n}`.
#[must_use]
pub fn floor(id: String, number: usize, restrooms: usize, corridors: usize, lifts: usize) -> Floor {
    Floor {
        restrooms: (0..restrooms)
            .map(|j| restroom(format!("{id}-restroom-{}", j + 1), j))
            .collect(),
        corridors: (0..corridors)
            .map(|j| corridor(format!("{id}-corridor-{}", j + 1), j, lifts))
            .collect(),
        id,
        number,
        name: None,
    }
}

/// Floor with the default 2 restrooms, 2 corridors and 2 lifts per corridor.
#[must_use]
pub fn default_floor(id: String, number: usize) -> Floor {
    floor(
        id,
        number,
        DEFAULT_RESTROOMS_PER_FLOOR,
        DEFAULT_CORRIDORS_PER_FLOOR,
        DEFAULT_LIFTS_PER_CORRIDOR,
    )
}

/// A complete building with `floors` identical floors numbered from 1.
#[must_use]
pub fn building(
    id: String,
    name: String,
    floors: usize,
    restrooms: usize,
    corridors: usize,
    lifts: usize,
) -> Building {
    let floors: Vec<Floor> = (1..=floors)
        .map(|n| floor(format!("{id}-floor-{n}"), n, restrooms, corridors, lifts))
        .collect();

    Building {
        id,
        name,
        total_floors: floors.len(),
        floors,
    }
}

/// Copy of `floor` with `count` more restrooms appended.
#[must_use]
pub fn append_restrooms(floor: &Floor, count: usize, stamps: &mut IdStamps) -> Floor {
    let mut restrooms = floor.restrooms.clone();
    for _ in 0..count {
        let index = restrooms.len();
        restrooms.push(restroom(
            format!("{}-restroom-{}", floor.id, stamps.next()),
            index,
        ));
    }
    Floor {
        restrooms,
        ..floor.clone()
    }
}

/// Copy of `floor` with `count` more corridors appended, each with the
/// default lifts.
#[must_use]
pub fn append_corridors(floor: &Floor, count: usize, stamps: &mut IdStamps) -> Floor {
    let mut corridors = floor.corridors.clone();
    for _ in 0..count {
        let index = corridors.len();
        corridors.push(corridor(
            format!("{}-corridor-{}", floor.id, stamps.next()),
            index,
            DEFAULT_LIFTS_PER_CORRIDOR,
        ));
    }
    Floor {
        corridors,
        ..floor.clone()
    }
}

/// Copy of `building` with `count` default floors stacked on top.
#[must_use]
pub fn append_floors(building: &Building, count: usize, stamps: &mut IdStamps) -> Building {
    let top = building.max_floor_number();
    let mut floors = building.floors.clone();
    for i in 1..=count {
        let number = top + i;
        floors.push(default_floor(
            format!("{}-floor-{number}-{}", building.id, stamps.next()),
            number,
        ));
    }
    Building {
        floors,
        ..building.clone()
    }
    .synced()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn stamps_never_repeat() {
        let mut stamps = IdStamps::new();
        let drawn: HashSet<i64> = (0..1000).map(|_| stamps.next()).collect();
        assert_eq!(drawn.len(), 1000);
    }

    #[test]
    fn generated_building_has_requested_shape() {
        let b = building("b".into(), "Tower".into(), 3, 4, 2, 1);

        assert_eq!(b.total_floors, 3);
        assert_eq!(b.floor_numbers(), vec![1, 2, 3]);
        assert!(b.floors.iter().all(|f| f.restrooms.len() == 4 && f.corridors.len() == 2));
        assert!(b.floors.iter().flat_map(|f| &f.corridors).all(|c| c.lifts.len() == 1));
        assert_eq!(b.floors[1].corridors[1].id, "b-floor-2-corridor-2");
    }

    #[test]
    fn layout_grid() {
        let c = corridor("c".into(), 1, 2);
        assert_eq!(c.position, Position::new(100.0, 300.0));
        assert_eq!(c.lifts[1].position, Position::new(150.0, 300.0));
        assert_eq!(restroom("r".into(), 2).position, Position::new(400.0, 50.0));
    }

    #[test]
    fn appended_restrooms_continue_numbering() {
        let mut stamps = IdStamps::new();
        let f = default_floor("f".into(), 1);
        let grown = append_restrooms(&f, 2, &mut stamps);

        let names: Vec<&str> = grown.restrooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Restroom 1", "Restroom 2", "Restroom 3", "Restroom 4"]);
        assert_eq!(f.restrooms.len(), 2);
    }
}
