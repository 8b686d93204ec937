//! Per-component edits used by the full-form editor.
//!
//! Every function returns an edited copy of the building; the caller commits
//! it with `Session::update_building`. Unknown ids leave the copy unchanged.

use super::synth::{self, IdStamps};
use crate::model::{Building, ComponentKind, Corridor, Floor, Lift, Restroom};

/// Copy of `building` with `edit` applied to the floor `floor_id`.
pub fn map_floor(building: &Building, floor_id: &str, edit: impl Fn(&Floor) -> Floor) -> Building {
    Building {
        floors: building
            .floors
            .iter()
            .map(|f| if f.id == floor_id { edit(f) } else { f.clone() })
            .collect(),
        ..building.clone()
    }
}

/// Copy of `floor` with `edit` applied to the restroom `restroom_id`.
pub fn map_restroom(floor: &Floor, restroom_id: &str, edit: impl Fn(&Restroom) -> Restroom) -> Floor {
    Floor {
        restrooms: floor
            .restrooms
            .iter()
            .map(|r| if r.id == restroom_id { edit(r) } else { r.clone() })
            .collect(),
        ..floor.clone()
    }
}

/// Copy of `floor` with `edit` applied to the corridor `corridor_id`.
pub fn map_corridor(floor: &Floor, corridor_id: &str, edit: impl Fn(&Corridor) -> Corridor) -> Floor {
    Floor {
        corridors: floor
            .corridors
            .iter()
            .map(|c| if c.id == corridor_id { edit(c) } else { c.clone() })
            .collect(),
        ..floor.clone()
    }
}

/// Keep floor order by number and renumber 1..n. Ids are untouched.
#[must_use]
pub fn renumber(mut floors: Vec<Floor>) -> Vec<Floor> {
    floors.sort_by_key(|f| f.number);
    for (i, floor) in floors.iter_mut().enumerate() {
        floor.number = i + 1;
    }
    floors
}

#[must_use]
pub fn add_floor(building: &Building, stamps: &mut IdStamps) -> Building {
    synth::append_floors(building, 1, stamps)
}

/// Remove one floor by id. The last remaining floor is never removed.
#[must_use]
pub fn remove_floor(building: &Building, floor_id: &str) -> Building {
    if building.floors.len() <= 1 {
        return building.clone();
    }
    let floors = building
        .floors
        .iter()
        .filter(|f| f.id != floor_id)
        .cloned()
        .collect();

    Building {
        floors: renumber(floors),
        ..building.clone()
    }
    .synced()
}

#[must_use]
pub fn add_restroom(building: &Building, floor_id: &str, stamps: &mut IdStamps) -> Building {
    let Some(floor) = building.floors.iter().find(|f| f.id == floor_id) else {
        return building.clone();
    };
    let grown = synth::append_restrooms(floor, 1, stamps);
    map_floor(building, floor_id, |_| grown.clone())
}

#[must_use]
pub fn add_corridor(building: &Building, floor_id: &str, stamps: &mut IdStamps) -> Building {
    let Some(floor) = building.floors.iter().find(|f| f.id == floor_id) else {
        return building.clone();
    };
    let grown = synth::append_corridors(floor, 1, stamps);
    map_floor(building, floor_id, |_| grown.clone())
}

/// Remove a restroom or corridor from one floor.
#[must_use]
pub fn remove_component(
    building: &Building,
    kind: ComponentKind,
    floor_id: &str,
    component_id: &str,
) -> Building {
    map_floor(building, floor_id, |floor| match kind {
        ComponentKind::Restroom => Floor {
            restrooms: floor
                .restrooms
                .iter()
                .filter(|r| r.id != component_id)
                .cloned()
                .collect(),
            ..floor.clone()
        },
        ComponentKind::Corridor => Floor {
            corridors: floor
                .corridors
                .iter()
                .filter(|c| c.id != component_id)
                .cloned()
                .collect(),
            ..floor.clone()
        },
    })
}

/// Append a lift at the end of a corridor, on the corridor's row.
#[must_use]
pub fn add_lift(building: &Building, floor_id: &str, corridor_id: &str, stamps: &mut IdStamps) -> Building {
    let id = format!("{corridor_id}-lift-{}", stamps.next());
    map_floor(building, floor_id, |floor| {
        map_corridor(floor, corridor_id, |corridor| {
            let mut lifts = corridor.lifts.clone();
            lifts.push(Lift {
                id: id.clone(),
                position: synth::lift_position(lifts.len(), corridor.position.y),
            });
            Corridor {
                lifts,
                ..corridor.clone()
            }
        })
    })
}

#[must_use]
pub fn remove_lift(building: &Building, floor_id: &str, corridor_id: &str, lift_id: &str) -> Building {
    map_floor(building, floor_id, |floor| {
        map_corridor(floor, corridor_id, |corridor| Corridor {
            lifts: corridor
                .lifts
                .iter()
                .filter(|l| l.id != lift_id)
                .cloned()
                .collect(),
            ..corridor.clone()
        })
    })
}

/// Set or clear a floor's custom name. Blank names clear it.
#[must_use]
pub fn rename_floor(building: &Building, floor_id: &str, name: &str) -> Building {
    let name = name.trim();
    map_floor(building, floor_id, |floor| Floor {
        name: (!name.is_empty()).then(|| name.to_string()),
        ..floor.clone()
    })
}

#[must_use]
pub fn rename_component(
    building: &Building,
    kind: ComponentKind,
    floor_id: &str,
    component_id: &str,
    name: &str,
) -> Building {
    let name = name.trim().to_string();
    map_floor(building, floor_id, |floor| match kind {
        ComponentKind::Restroom => map_restroom(floor, component_id, |r| Restroom {
            name: name.clone(),
            ..r.clone()
        }),
        ComponentKind::Corridor => map_corridor(floor, component_id, |c| Corridor {
            name: name.clone(),
            ..c.clone()
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Building {
        synth::building("b".into(), "Tower".into(), 3, 2, 2, 2)
    }

    #[test]
    fn removing_a_middle_floor_renumbers_and_keeps_ids() {
        let b = remove_floor(&sample(), "b-floor-2");

        assert_eq!(b.total_floors, 2);
        assert_eq!(b.floor_numbers(), vec![1, 2]);
        assert_eq!(b.floors[1].id, "b-floor-3");
    }

    #[test]
    fn last_floor_is_kept() {
        let single = synth::building("b".into(), "Tower".into(), 1, 2, 2, 2);
        assert_eq!(remove_floor(&single, "b-floor-1"), single);
    }

    #[test]
    fn lifts_are_added_on_the_corridor_row() {
        let mut stamps = IdStamps::new();
        let b = add_lift(&sample(), "b-floor-1", "b-floor-1-corridor-2", &mut stamps);
        let corridor = &b.floors[0].corridors[1];

        assert_eq!(corridor.lifts.len(), 3);
        assert_eq!(corridor.lifts[2].position.y, corridor.position.y);
        assert_eq!(corridor.lifts[2].position.x, 250.0);
    }

    #[test]
    fn component_removal_and_rename() {
        let b = remove_component(&sample(), ComponentKind::Restroom, "b-floor-1", "b-floor-1-restroom-1");
        assert_eq!(b.floors[0].restrooms.len(), 1);
        assert_eq!(b.floors[1].restrooms.len(), 2);

        let b = rename_component(&b, ComponentKind::Corridor, "b-floor-3", "b-floor-3-corridor-1", " East ");
        assert_eq!(b.floors[2].corridors[0].name, "East");
    }

    #[test]
    fn blank_floor_name_clears_it() {
        let named = rename_floor(&sample(), "b-floor-1", "Lobby");
        assert_eq!(named.floors[0].display_name(), "Lobby");
        assert_eq!(rename_floor(&named, "b-floor-1", "  ").floors[0].name, None);
    }
}
