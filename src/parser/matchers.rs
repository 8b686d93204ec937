//! One matcher per command family.
//!
//! Every matcher is a pure function of the input text: it either returns a
//! complete [`Intent`] or `None`. There is no partial match.

use crate::model::ComponentKind;
use crate::parser::intent::{AddCounts, BuildingSpec, BulkTarget, Intent};
use crate::parser::text::{bracket_names, name, number};
use lazy_static::lazy_static;
use regex::Regex;

pub const DEFAULT_BUILDING_NAME: &str = "My Building";

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("command pattern must compile")
}

lazy_static! {
    static ref SWITCH: [Regex; 3] = [
        re(r#"(?i)(?:switch|change|go)\s+to\s+(?:building\s+)?["']?([^"']+)["']?"#),
        re(r#"(?i)(?:select|use)\s+(?:building\s+)?["']?([^"']+)["']?"#),
        re(r#"(?i)(?:activate|set)\s+(?:building\s+)?["']?([^"']+)["']?"#),
    ];

    static ref BULK_FLOORS: Regex =
        re(r"(?i)(?:rename|change)\s+all\s+floors?\s+to\s+\[([^\]]+)\]");
    static ref BULK_RESTROOMS: Regex =
        re(r"(?i)(?:rename|change)\s+all\s+restrooms?\s+(?:in|on)\s+floor\s+(\d+)\s+to\s+\[([^\]]+)\]");
    static ref BULK_CORRIDORS: Regex =
        re(r"(?i)(?:rename|change)\s+all\s+corridors?\s+(?:in|on)\s+floor\s+(\d+)\s+to\s+\[([^\]]+)\]");

    // [floor-clause-first, name-first]
    static ref RESTROOM_RENAME: [Regex; 2] = component_rename_patterns("restroom");
    static ref CORRIDOR_RENAME: [Regex; 2] = component_rename_patterns("corridor");

    static ref FLOOR_RENAME: [Regex; 3] = [
        re(r#"(?i)(?:rename|change)\s+floor\s+(\d+)\s+to\s+["']?([^"']+)["']?"#),
        re(r#"(?i)floor\s+(\d+)\s*[:=]\s*["']?([^"']+)["']?"#),
        re(r#"(?i)call\s+floor\s+(\d+)\s+["']?([^"']+)["']?"#),
    ];

    static ref BUILDING_RENAME: [Regex; 3] = [
        re(r#"(?i)(?:change|rename|update|set)\s+(?:building\s+)?name\s+to\s+["']?([^"']+)["']?"#),
        re(r#"(?i)(?:building\s+)?name\s*[:=]\s*["']?([^"']+)["']?"#),
        re(r#"(?i)call\s+(?:the\s+)?building\s+["']?([^"']+)["']?"#),
    ];

    static ref CREATE_NAME: [Regex; 6] = [
        re(r#"(?i)(?:create|build)\s+(?:building\s+)?["']?([^"']+?)["']?\s+with"#),
        re(r#"(?i)add\s+(?:new\s+)?building\s+(?:named\s+(?:as\s+)?)?["']?([^"']+?)["']?\s+with"#),
        re(r#"(?i)(?:build|create)\s+building\s+(?:called|named)\s+["']?([^"']+?)["']?$"#),
        re(r#"(?i)(?:create|build)\s+building\s+["']?([^"']+?)['"]?$"#),
        re(r#"(?i)add\s+(?:new\s+)?building\s+(?:named\s+(?:as\s+)?)?["']?([^"']+?)["']?$"#),
        re(r#"(?i)(?:create|build)\s+(?:the\s+)?(?:new\s+)?building\s+(?:and\s+)?(?:named\s+(?:as\s+)?)?["']?([^"']+?)["']?$"#),
    ];

    static ref FLOOR_COUNT: Regex = re(r"(?i)(\d+)\s*(?:floors?|stories|levels)");
    static ref RESTROOM_COUNT: Regex = re(r"(?i)(\d+)\s*(?:restrooms?|bathrooms?|toilets?)");
    static ref CORRIDOR_COUNT: Regex = re(r"(?i)(\d+)\s*(?:corridors?|hallways?)");
    static ref LIFT_COUNT: Regex = re(r"(?i)(\d+)\s*(?:lifts?|elevators?)");

    static ref ADD_RESTROOMS_TO_FLOOR: Regex =
        re(r"add\s+(\d+)\s*(?:more\s+)?restrooms?\s+(?:to|in|on)\s+floor\s+(\d+)");
    static ref ADD_CORRIDORS_TO_FLOOR: Regex =
        re(r"add\s+(\d+)\s*(?:more\s+)?corridors?\s+(?:to|in|on)\s+floor\s+(\d+)");
    static ref ADD_RESTROOMS: Regex = re(r"add\s+(\d+)\s*(?:more\s+)?restrooms?");
    static ref ADD_CORRIDORS: Regex = re(r"add\s+(\d+)\s*(?:more\s+)?corridors?");
    static ref ADD_FLOORS: Regex = re(r"add\s+(\d+)\s*(?:more\s+)?floors?");
    static ref FLOOR_QUALIFIER_AHEAD: Regex = re(r"^\s+(?:to|in|on)\s+floor");
    static ref CONJUNCTION_AHEAD: Regex = re(r"^(?:\s+and|\s*,)");

    static ref MULTI_FLOORS: Regex = re(r"add\s+.*?(\d+)\s*(?:more\s+)?floors?");
    static ref MULTI_RESTROOMS: Regex = re(r"(\d+)\s*(?:more\s+)?restrooms?");
    static ref MULTI_CORRIDORS: Regex = re(r"(\d+)\s*(?:more\s+)?corridors?");
    static ref FLOOR_QUALIFIER: Regex = re(r"(?:to|in|on)\s+floor\s+\d+");

    static ref REMOVE_FLOORS: Regex = re(r"remove\s+(\d+)\s*floors?");
}

fn component_rename_patterns(word: &str) -> [Regex; 2] {
    [
        re(&format!(
            r#"(?i)(?:rename|change)\s+{word}\s+(\d+)\s+(?:in|on|of)\s+floor\s+(\d+)\s+to\s+["']?([^"']+)["']?"#
        )),
        re(&format!(
            r#"(?i)(?:rename|change)\s+{word}\s+(\d+)\s+to\s+["']?([^"']+)["']?\s+(?:in|on|of)\s+floor\s+(\d+)"#
        )),
    ]
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// "show commands", "help", "what can you do".
#[must_use]
pub fn show_commands(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();
    let asks = contains_any(&lower, &["show", "list", "what"]);
    let about = contains_any(&lower, &["command", "help", "can you do"]);
    (asks && about).then_some(Intent::ShowCommands)
}

/// "list all buildings", "buildings".
#[must_use]
pub fn list_buildings(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();
    let listed = lower.contains("list") && contains_any(&lower, &["building", "all"]);
    (listed || lower == "buildings" || lower.contains("show all buildings"))
        .then_some(Intent::ListBuildings)
}

/// "switch to Tower", "use building Annex", "activate HQ".
#[must_use]
pub fn switch_building(text: &str) -> Option<Intent> {
    SWITCH
        .iter()
        .find_map(|pattern| pattern.captures(text).and_then(|caps| name(&caps, 1)))
        .map(|name| Intent::SwitchBuilding { name })
}

/// "rename all floors to [Ground, First]" and the per-floor restroom and
/// corridor variants.
#[must_use]
pub fn bulk_rename(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();
    if !lower.contains("rename all") && !lower.contains("change all") {
        return None;
    }

    if let Some(caps) = BULK_FLOORS.captures(text) {
        return Some(Intent::BulkRename {
            target: BulkTarget::Floors,
            names: bracket_names(&caps[1]),
        });
    }

    for (pattern, kind) in [
        (&*BULK_RESTROOMS, ComponentKind::Restroom),
        (&*BULK_CORRIDORS, ComponentKind::Corridor),
    ] {
        if let Some(caps) = pattern.captures(text) {
            let floor = number(&caps, 1)?;
            return Some(Intent::BulkRename {
                target: BulkTarget::Components { kind, floor },
                names: bracket_names(&caps[2]),
            });
        }
    }

    None
}

fn rename_component(text: &str, kind: ComponentKind, patterns: &[Regex; 2]) -> Option<Intent> {
    let [floor_first, name_first] = patterns;

    let (index, floor, new_name) = if let Some(caps) = floor_first.captures(text) {
        (number(&caps, 1)?, number(&caps, 2)?, name(&caps, 3)?)
    } else {
        let caps = name_first.captures(text)?;
        (number(&caps, 1)?, number(&caps, 3)?, name(&caps, 2)?)
    };

    Some(Intent::RenameComponent {
        kind,
        floor,
        index,
        name: new_name,
    })
}

/// "rename restroom 1 on floor 2 to Main" or "rename restroom 1 to Main on floor 2".
#[must_use]
pub fn rename_restroom(text: &str) -> Option<Intent> {
    rename_component(text, ComponentKind::Restroom, &RESTROOM_RENAME)
}

/// Corridor counterpart of [`rename_restroom`].
#[must_use]
pub fn rename_corridor(text: &str) -> Option<Intent> {
    rename_component(text, ComponentKind::Corridor, &CORRIDOR_RENAME)
}

/// "rename floor 1 to Lobby", "floor 1: Lobby", "call floor 1 Lobby".
#[must_use]
pub fn rename_floor(text: &str) -> Option<Intent> {
    FLOOR_RENAME.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        Some(Intent::RenameFloor {
            floor: number(&caps, 1)?,
            name: name(&caps, 2)?,
        })
    })
}

/// "change building name to HQ", "name: HQ", "call the building HQ".
#[must_use]
pub fn rename_building(text: &str) -> Option<Intent> {
    BUILDING_RENAME
        .iter()
        .find_map(|pattern| pattern.captures(text).and_then(|caps| name(&caps, 1)))
        .map(|name| Intent::RenameBuilding { name })
}

fn count(pattern: &Regex, text: &str) -> Option<usize> {
    pattern.captures(text).and_then(|caps| number(&caps, 1))
}

/// "create default building", "create Tower with 4 floors, 2 restrooms".
#[must_use]
pub fn create_building(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();

    if lower.contains("default") {
        return Some(Intent::CreateBuilding(BuildingSpec {
            name: Some(DEFAULT_BUILDING_NAME.to_string()),
            floors: 5,
            restrooms: 2,
            corridors: 2,
            lifts: 2,
        }));
    }

    let building_name = CREATE_NAME
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| name(&caps, 1));

    let floors = count(&FLOOR_COUNT, text);
    let restrooms = count(&RESTROOM_COUNT, text);
    let corridors = count(&CORRIDOR_COUNT, text);
    let lifts = count(&LIFT_COUNT, text);

    let is_creation = lower.contains("create")
        || lower.contains("build")
        || (lower.contains("add") && lower.contains("building"));
    if !is_creation {
        return None;
    }

    if let Some(floors) = floors.filter(|_| restrooms.is_some() || corridors.is_some()) {
        return Some(Intent::CreateBuilding(BuildingSpec {
            name: building_name,
            floors,
            restrooms: restrooms.unwrap_or(2),
            corridors: corridors.unwrap_or(1),
            lifts: lifts.unwrap_or(2),
        }));
    }

    building_name.map(|name| {
        Intent::CreateBuilding(BuildingSpec {
            name: Some(name),
            floors: 3,
            restrooms: 2,
            corridors: 2,
            lifts: 2,
        })
    })
}

/// First match of `pattern` whose remaining text does not start with `ahead`.
///
/// Patterns end in an optional plural `s`, so a match ending in `s` is also
/// accepted when `ahead` fails to match right after the singular stem:
/// "add 2 floors and a lift" still adds floors.
fn captures_not_followed_by<'t>(
    pattern: &Regex,
    ahead: &Regex,
    text: &'t str,
) -> Option<regex::Captures<'t>> {
    pattern.captures_iter(text).find(|caps| {
        let Some(m) = caps.get(0) else {
            return false;
        };
        let clear = |end: usize| !ahead.is_match(&text[end..]);
        clear(m.end()) || (m.as_str().ends_with('s') && clear(m.end() - 1))
    })
}

/// Structural edits on the active building: add floors, restrooms,
/// corridors (per floor or everywhere), combinations, and floor removal.
#[must_use]
pub fn edit_structure(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();

    if lower.contains("add") && lower.contains("building") && lower.contains("with") {
        return None;
    }

    for (pattern, kind) in [
        (&*ADD_RESTROOMS_TO_FLOOR, ComponentKind::Restroom),
        (&*ADD_CORRIDORS_TO_FLOOR, ComponentKind::Corridor),
    ] {
        if let Some(caps) = pattern.captures(&lower) {
            if let (Some(count), Some(floor)) = (number(&caps, 1), number(&caps, 2)) {
                return Some(Intent::AddComponents {
                    kind,
                    count,
                    floor: Some(floor),
                });
            }
        }
    }

    for (pattern, kind) in [
        (&*ADD_RESTROOMS, ComponentKind::Restroom),
        (&*ADD_CORRIDORS, ComponentKind::Corridor),
    ] {
        let found = captures_not_followed_by(pattern, &FLOOR_QUALIFIER_AHEAD, &lower)
            .and_then(|caps| number(&caps, 1));
        if let Some(count) = found {
            return Some(Intent::AddComponents {
                kind,
                count,
                floor: None,
            });
        }
    }

    if !lower.contains("restroom") && !lower.contains("corridor") {
        let found = captures_not_followed_by(&ADD_FLOORS, &CONJUNCTION_AHEAD, &lower)
            .and_then(|caps| number(&caps, 1));
        if let Some(count) = found {
            return Some(Intent::AddFloors { count });
        }
    }

    if lower.contains("add") && contains_any(&lower, &["corridor", "restroom", "floor"]) {
        let qualified = FLOOR_QUALIFIER.is_match(&lower);
        let counts = AddCounts {
            floors: count(&MULTI_FLOORS, &lower),
            restrooms: count(&MULTI_RESTROOMS, &lower).filter(|_| !qualified),
            corridors: count(&MULTI_CORRIDORS, &lower).filter(|_| !qualified),
        };
        if counts.detected() > 1 {
            return Some(Intent::AddMultiple(counts));
        }
    }

    if lower.contains("remove") && lower.contains("floor") {
        let count = REMOVE_FLOORS
            .captures(&lower)
            .and_then(|caps| caps.get(1))
            .map_or(1, |m| m.as_str().parse().unwrap_or(usize::MAX));
        return Some(Intent::RemoveFloors { count });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(name: Option<&str>, floors: usize, restrooms: usize, corridors: usize, lifts: usize) -> Intent {
        Intent::CreateBuilding(BuildingSpec {
            name: name.map(str::to_string),
            floors,
            restrooms,
            corridors,
            lifts,
        })
    }

    #[test]
    fn help_needs_both_keyword_groups() {
        assert_eq!(show_commands("Show available commands"), Some(Intent::ShowCommands));
        assert_eq!(show_commands("What can you do?"), Some(Intent::ShowCommands));
        assert_eq!(show_commands("help"), None);
    }

    #[test]
    fn list_buildings_variants() {
        assert_eq!(list_buildings("List all buildings"), Some(Intent::ListBuildings));
        assert_eq!(list_buildings("Buildings"), Some(Intent::ListBuildings));
        assert_eq!(list_buildings("buildings please"), None);
    }

    #[test]
    fn switch_strips_building_keyword_and_quotes() {
        assert_eq!(
            switch_building("Switch to building 'North Tower'"),
            Some(Intent::SwitchBuilding {
                name: "North Tower".to_string()
            })
        );
        assert_eq!(
            switch_building("use Annex"),
            Some(Intent::SwitchBuilding {
                name: "Annex".to_string()
            })
        );
    }

    #[test]
    fn bulk_rename_floors_and_per_floor_components() {
        assert_eq!(
            bulk_rename("Rename all floors to [Ground, First, Second]"),
            Some(Intent::BulkRename {
                target: BulkTarget::Floors,
                names: vec!["Ground".into(), "First".into(), "Second".into()],
            })
        );
        assert_eq!(
            bulk_rename("change all corridors on floor 2 to ['North Wing', 'South Wing']"),
            Some(Intent::BulkRename {
                target: BulkTarget::Components {
                    kind: ComponentKind::Corridor,
                    floor: 2
                },
                names: vec!["North Wing".into(), "South Wing".into()],
            })
        );
        assert_eq!(bulk_rename("rename all floors to Level"), None);
    }

    #[test]
    fn component_rename_clause_order_is_irrelevant() {
        let expected = Some(Intent::RenameComponent {
            kind: ComponentKind::Restroom,
            floor: 2,
            index: 1,
            name: "Main Restroom".to_string(),
        });
        assert_eq!(rename_restroom("rename restroom 1 in floor 2 to Main Restroom"), expected);
        assert_eq!(rename_restroom("rename restroom 1 to Main Restroom in floor 2"), expected);
        assert_eq!(
            rename_corridor("Change corridor 2 on floor 3 to \"East Wing\""),
            Some(Intent::RenameComponent {
                kind: ComponentKind::Corridor,
                floor: 3,
                index: 2,
                name: "East Wing".to_string(),
            })
        );
    }

    #[test]
    fn floor_rename_shorthands() {
        for text in ["rename floor 1 to Lobby", "floor 1: Lobby", "Floor 1 = Lobby", "call floor 1 \"Lobby\""] {
            assert_eq!(
                rename_floor(text),
                Some(Intent::RenameFloor {
                    floor: 1,
                    name: "Lobby".to_string()
                }),
                "{text}"
            );
        }
    }

    #[test]
    fn building_rename_shorthands() {
        for text in ["Change building name to HQ", "name: HQ", "call the building 'HQ'"] {
            assert_eq!(
                rename_building(text),
                Some(Intent::RenameBuilding {
                    name: "HQ".to_string()
                }),
                "{text}"
            );
        }
    }

    #[test]
    fn default_keyword_wins_inside_creation() {
        assert_eq!(
            create_building("create default building with 9 floors"),
            Some(spec(Some(DEFAULT_BUILDING_NAME), 5, 2, 2, 2))
        );
    }

    #[test]
    fn creation_with_explicit_counts_and_synonyms() {
        assert_eq!(
            create_building("Create Hospital with 3 Levels, 4 toilets, 2 hallways and 3 elevators"),
            Some(spec(Some("Hospital"), 3, 4, 2, 3))
        );
        assert_eq!(
            create_building("create with 4 floors and 1 restroom"),
            Some(spec(None, 4, 1, 1, 2))
        );
    }

    #[test]
    fn creation_name_patterns() {
        assert_eq!(create_building("create building called Annex"), Some(spec(Some("Annex"), 3, 2, 2, 2)));
        assert_eq!(create_building("Create building Tower 2"), Some(spec(Some("Tower 2"), 3, 2, 2, 2)));
        assert_eq!(create_building("add new building named as West"), Some(spec(Some("West"), 3, 2, 2, 2)));
        assert_eq!(create_building("Create Building A with 5 floors"), Some(spec(Some("A"), 3, 2, 2, 2)));
        assert_eq!(create_building("create"), None);
    }

    #[test]
    fn add_components_prefers_floor_qualified_forms() {
        assert_eq!(
            edit_structure("Add 3 restrooms in floor 5"),
            Some(Intent::AddComponents {
                kind: ComponentKind::Restroom,
                count: 3,
                floor: Some(5)
            })
        );
        assert_eq!(
            edit_structure("add 2 more corridors"),
            Some(Intent::AddComponents {
                kind: ComponentKind::Corridor,
                count: 2,
                floor: None
            })
        );
    }

    #[test]
    fn add_floors_and_combined_additions() {
        assert_eq!(edit_structure("Add 2 floors"), Some(Intent::AddFloors { count: 2 }));
        assert_eq!(
            edit_structure("Add 1 floor and 2 restrooms"),
            Some(Intent::AddMultiple(AddCounts {
                floors: Some(1),
                restrooms: Some(2),
                corridors: None,
            }))
        );
        assert_eq!(edit_structure("add 1 floor and a lift"), None);
    }

    #[test]
    fn plural_suffix_does_not_block_single_additions() {
        assert_eq!(edit_structure("add 2 floors and a lift"), Some(Intent::AddFloors { count: 2 }));
        assert_eq!(edit_structure("add 2 floors, please"), Some(Intent::AddFloors { count: 2 }));
        assert_eq!(
            edit_structure("add 2 restrooms to floor"),
            Some(Intent::AddComponents {
                kind: ComponentKind::Restroom,
                count: 2,
                floor: None
            })
        );
        assert_eq!(edit_structure("add 1 corridor on floor"), None);
    }

    #[test]
    fn remove_floors_defaults_to_one() {
        assert_eq!(edit_structure("remove 10 floors"), Some(Intent::RemoveFloors { count: 10 }));
        assert_eq!(edit_structure("please remove the top floor"), Some(Intent::RemoveFloors { count: 1 }));
    }

    #[test]
    fn edit_refuses_creation_phrasing() {
        assert_eq!(edit_structure("add building Annex with 2 floors"), None);
    }
}
