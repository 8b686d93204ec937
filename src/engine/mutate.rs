//! Applies parsed intents to a building collection.
//!
//! Nothing here mutates its input: every change produces a new collection
//! and the caller decides whether to commit and persist it.

use super::response::{counted, ListedBuilding, Response};
use super::synth::{self, IdStamps};
use crate::model::{Building, BuildingCollection, ComponentKind, Corridor, Floor, Restroom};
use crate::parser::{AddCounts, BuildingSpec, BulkTarget, Intent, DEFAULT_BUILDING_NAME};
use tracing::{info, warn};

/// Result of applying one intent. `collection` is `None` when state is
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub collection: Option<BuildingCollection>,
    pub response: Response,
}

impl Outcome {
    fn unchanged(response: Response) -> Self {
        Self {
            collection: None,
            response,
        }
    }

    fn changed(collection: BuildingCollection, response: Response) -> Self {
        Self {
            collection: Some(collection),
            response,
        }
    }
}

/// Largest quantity a single command may create.
pub const MAX_QUANTITY: usize = 50;

/// The largest requested quantity of an intent that creates components.
fn requested_quantity(intent: &Intent) -> Option<usize> {
    match intent {
        Intent::CreateBuilding(spec) => [spec.floors, spec.restrooms, spec.corridors, spec.lifts]
            .into_iter()
            .max(),
        Intent::AddFloors { count } | Intent::AddComponents { count, .. } => Some(*count),
        Intent::AddMultiple(counts) => [counts.floors, counts.restrooms, counts.corridors]
            .into_iter()
            .flatten()
            .max(),
        _ => None,
    }
}

pub fn apply(collection: &BuildingCollection, intent: Intent, stamps: &mut IdStamps) -> Outcome {
    if let Some(requested) = requested_quantity(&intent).filter(|&n| n > MAX_QUANTITY) {
        warn!(requested, "quantity over limit");
        return Outcome::unchanged(Response::TooMany {
            requested,
            limit: MAX_QUANTITY,
        });
    }

    match intent {
        Intent::ShowCommands => Outcome::unchanged(Response::Commands {
            buildings: collection.buildings.len(),
            active: collection.active().map(|b| b.name.clone()),
        }),
        Intent::ListBuildings => Outcome::unchanged(list_buildings(collection)),
        Intent::SwitchBuilding { name } => switch_building(collection, &name),
        Intent::CreateBuilding(spec) => create_building(collection, spec, stamps),
        Intent::BulkRename { target, names } => on_active(collection, |b| bulk_rename(b, target, &names)),
        Intent::RenameComponent {
            kind,
            floor,
            index,
            name,
        } => on_active(collection, |b| rename_component(b, kind, floor, index, name)),
        Intent::RenameFloor { floor, name } => on_active(collection, |b| rename_floor(b, floor, name)),
        Intent::RenameBuilding { name } => on_active(collection, |b| {
            (
                Some(Building {
                    name: name.clone(),
                    ..b.clone()
                }),
                Response::BuildingRenamed { name },
            )
        }),
        Intent::AddFloors { count } => on_active(collection, |b| {
            let updated = synth::append_floors(b, count, stamps);
            let response = Response::FloorsAdded {
                count,
                building: b.name.clone(),
                total_floors: updated.total_floors,
            };
            (Some(updated), response)
        }),
        Intent::AddComponents { kind, count, floor } => {
            on_active(collection, |b| add_components(b, kind, count, floor, stamps))
        }
        Intent::AddMultiple(counts) => on_active(collection, |b| add_multiple(b, counts, stamps)),
        Intent::RemoveFloors { count } => on_active(collection, |b| remove_floors(b, count)),
    }
}

/// Run an edit against the active building and fold the result back into
/// the collection.
fn on_active(
    collection: &BuildingCollection,
    edit: impl FnOnce(&Building) -> (Option<Building>, Response),
) -> Outcome {
    let Some(building) = collection.active() else {
        return Outcome::unchanged(Response::NoActiveBuilding);
    };
    match edit(building) {
        (Some(updated), response) => {
            info!(building = %updated.id, "building updated");
            Outcome::changed(collection.with_building(updated), response)
        }
        (None, response) => Outcome::unchanged(response),
    }
}

fn list_buildings(collection: &BuildingCollection) -> Response {
    let active = collection.active_building.as_deref();
    Response::BuildingList(
        collection
            .buildings
            .iter()
            .map(|b| ListedBuilding {
                name: b.name.clone(),
                floors: b.total_floors,
                active: Some(b.id.as_str()) == active,
            })
            .collect(),
    )
}

fn switch_building(collection: &BuildingCollection, name: &str) -> Outcome {
    match collection.find_by_name(name) {
        Some(target) => {
            info!(building = %target.id, "switched active building");
            let response = Response::Switched {
                name: target.name.clone(),
                floors: target.total_floors,
            };
            Outcome::changed(
                BuildingCollection {
                    buildings: collection.buildings.clone(),
                    active_building: Some(target.id.clone()),
                },
                response,
            )
        }
        None => Outcome::unchanged(Response::BuildingNotFound {
            query: name.to_string(),
            available: collection.names().into_iter().map(String::from).collect(),
        }),
    }
}

fn create_building(collection: &BuildingCollection, spec: BuildingSpec, stamps: &mut IdStamps) -> Outcome {
    let name = spec
        .name
        .unwrap_or_else(|| DEFAULT_BUILDING_NAME.to_string());

    if collection.find_by_name(&name).is_some() {
        return Outcome::unchanged(Response::NameTaken {
            name,
            floors: spec.floors,
        });
    }

    let building = synth::building(
        format!("building-{}", stamps.next()),
        name.clone(),
        spec.floors,
        spec.restrooms,
        spec.corridors,
        spec.lifts,
    );
    info!(building = %building.id, floors = spec.floors, "building created");

    let updated = collection.with_new_active(building);
    let response = Response::Created {
        name,
        floors: spec.floors,
        restrooms: spec.restrooms,
        corridors: spec.corridors,
        lifts: spec.lifts,
        total_buildings: updated.buildings.len(),
    };
    Outcome::changed(updated, response)
}

fn rename_floor(building: &Building, floor: usize, name: String) -> (Option<Building>, Response) {
    if building.floor_by_number(floor).is_none() {
        return (None, floor_missing(building, floor));
    }
    let updated = with_floor(building, floor, |f| Floor {
        name: Some(name.clone()),
        ..f.clone()
    });
    (Some(updated), Response::FloorRenamed { floor, name })
}

fn floor_missing(building: &Building, floor: usize) -> Response {
    Response::FloorMissing {
        floor,
        building: building.name.clone(),
        available: building.floor_numbers(),
    }
}

/// Copy of `building` with `edit` applied to the floor numbered `number`.
fn with_floor(building: &Building, number: usize, edit: impl Fn(&Floor) -> Floor) -> Building {
    Building {
        floors: building
            .floors
            .iter()
            .map(|f| if f.number == number { edit(f) } else { f.clone() })
            .collect(),
        ..building.clone()
    }
}

/// Positional rename: `names[i]` renames item `i`, empty slots keep the
/// current name. Returns the renamed items and how many changed.
fn rename_positional<T: Clone>(items: &[T], names: &[String], set: impl Fn(&T, &str) -> T) -> (Vec<T>, usize) {
    let mut renamed = 0;
    let items = items
        .iter()
        .enumerate()
        .map(|(i, item)| match names.get(i) {
            Some(name) if !name.is_empty() => {
                renamed += 1;
                set(item, name)
            }
            _ => item.clone(),
        })
        .collect();
    (items, renamed)
}

fn bulk_rename(building: &Building, target: BulkTarget, names: &[String]) -> (Option<Building>, Response) {
    match target {
        BulkTarget::Floors => {
            let (floors, count) = rename_positional(&building.floors, names, |f, name| Floor {
                name: Some(name.to_string()),
                ..f.clone()
            });
            let listing = floors
                .iter()
                .map(|f| (f.number, f.display_name()))
                .collect();
            (
                Some(Building {
                    floors,
                    ..building.clone()
                }),
                Response::FloorsRenamed {
                    count,
                    floors: listing,
                },
            )
        }
        BulkTarget::Components { kind, floor } => {
            let Some(target) = building.floor_by_number(floor) else {
                return (None, floor_missing(building, floor));
            };
            let (renamed_floor, count, listing) = match kind {
                ComponentKind::Restroom => {
                    let (restrooms, count) = rename_positional(&target.restrooms, names, |r, name| Restroom {
                        name: name.to_string(),
                        ..r.clone()
                    });
                    let listing = restrooms.iter().map(|r| r.name.clone()).collect();
                    (
                        Floor {
                            restrooms,
                            ..target.clone()
                        },
                        count,
                        listing,
                    )
                }
                ComponentKind::Corridor => {
                    let (corridors, count) = rename_positional(&target.corridors, names, |c, name| Corridor {
                        name: name.to_string(),
                        ..c.clone()
                    });
                    let listing = corridors.iter().map(|c| c.name.clone()).collect();
                    (
                        Floor {
                            corridors,
                            ..target.clone()
                        },
                        count,
                        listing,
                    )
                }
            };
            (
                Some(with_floor(building, floor, |_| renamed_floor.clone())),
                Response::ComponentsRenamed {
                    kind,
                    floor,
                    count,
                    names: listing,
                },
            )
        }
    }
}

fn rename_component(
    building: &Building,
    kind: ComponentKind,
    floor: usize,
    index: usize,
    name: String,
) -> (Option<Building>, Response) {
    let Some(target) = building.floor_by_number(floor) else {
        return (None, floor_missing(building, floor));
    };
    let available = kind.count_on(target);
    if index == 0 || index > available {
        return (
            None,
            Response::ComponentMissing {
                kind,
                index,
                floor,
                available,
            },
        );
    }

    let slot = index - 1;
    let updated = with_floor(building, floor, |f| {
        let mut f = f.clone();
        match kind {
            ComponentKind::Restroom => f.restrooms[slot].name.clone_from(&name),
            ComponentKind::Corridor => f.corridors[slot].name.clone_from(&name),
        }
        f
    });
    (
        Some(updated),
        Response::ComponentRenamed {
            kind,
            floor,
            index,
            name,
        },
    )
}

fn append_components(floor: &Floor, kind: ComponentKind, count: usize, stamps: &mut IdStamps) -> Floor {
    match kind {
        ComponentKind::Restroom => synth::append_restrooms(floor, count, stamps),
        ComponentKind::Corridor => synth::append_corridors(floor, count, stamps),
    }
}

/// Append `count` components of `kind` to every floor.
fn append_everywhere(building: &Building, kind: ComponentKind, count: usize, stamps: &mut IdStamps) -> Building {
    Building {
        floors: building
            .floors
            .iter()
            .map(|f| append_components(f, kind, count, stamps))
            .collect(),
        ..building.clone()
    }
}

fn add_components(
    building: &Building,
    kind: ComponentKind,
    count: usize,
    floor: Option<usize>,
    stamps: &mut IdStamps,
) -> (Option<Building>, Response) {
    let updated = match floor {
        Some(number) => {
            let Some(target) = building.floor_by_number(number) else {
                return (None, Response::UnknownFloor { floor: number });
            };
            let grown = append_components(target, kind, count, stamps);
            with_floor(building, number, |_| grown.clone())
        }
        None => append_everywhere(building, kind, count, stamps),
    };
    (Some(updated), Response::ComponentsAdded { kind, count, floor })
}

fn add_multiple(building: &Building, counts: AddCounts, stamps: &mut IdStamps) -> (Option<Building>, Response) {
    let mut updated = building.clone();
    let mut changes = Vec::new();

    if let Some(floors) = counts.floors.filter(|n| *n > 0) {
        updated = synth::append_floors(&updated, floors, stamps);
        changes.push(counted(floors, "floor"));
    }
    for (kind, count) in [
        (ComponentKind::Restroom, counts.restrooms),
        (ComponentKind::Corridor, counts.corridors),
    ] {
        if let Some(count) = count.filter(|n| *n > 0) {
            updated = append_everywhere(&updated, kind, count, stamps);
            changes.push(format!(
                "{} to each floor",
                counted(count, &kind.label().to_lowercase())
            ));
        }
    }

    let response = Response::MultipleAdded {
        changes,
        building: building.name.clone(),
        total_floors: updated.total_floors,
    };
    (Some(updated), response)
}

/// Drop the highest-numbered floors, keeping at least one, then renumber.
fn remove_floors(building: &Building, count: usize) -> (Option<Building>, Response) {
    let removable = count.min(building.floors.len().saturating_sub(1));
    if removable == 0 {
        return (None, Response::LastFloor);
    }

    let mut floors = building.floors.clone();
    floors.sort_by_key(|f| f.number);
    floors.truncate(floors.len() - removable);
    let updated = Building {
        floors: super::editor::renumber(floors),
        ..building.clone()
    }
    .synced();

    let response = Response::FloorsRemoved {
        count: removable,
        total_floors: updated.total_floors,
    };
    (Some(updated), response)
}
