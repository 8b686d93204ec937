pub mod intent;
pub mod matchers;
pub mod text;

pub use intent::{AddCounts, BuildingSpec, BulkTarget, Intent};
pub use matchers::DEFAULT_BUILDING_NAME;

/// A command family: one matcher plus whether it only applies when a
/// building is active.
#[derive(Debug, Clone, Copy)]
pub struct Family {
    pub name: &'static str,
    pub needs_active: bool,
    pub matcher: fn(&str) -> Option<Intent>,
}

/// Command families in priority order. The first family whose matcher
/// succeeds decides the intent for the whole input; later families are not
/// attempted. Families that need an active building are skipped when there
/// is none.
pub const FAMILIES: &[Family] = &[
    Family {
        name: "show-commands",
        needs_active: false,
        matcher: matchers::show_commands,
    },
    Family {
        name: "list-buildings",
        needs_active: false,
        matcher: matchers::list_buildings,
    },
    Family {
        name: "switch-building",
        needs_active: false,
        matcher: matchers::switch_building,
    },
    Family {
        name: "bulk-rename",
        needs_active: true,
        matcher: matchers::bulk_rename,
    },
    Family {
        name: "restroom-rename",
        needs_active: true,
        matcher: matchers::rename_restroom,
    },
    Family {
        name: "corridor-rename",
        needs_active: true,
        matcher: matchers::rename_corridor,
    },
    Family {
        name: "floor-rename",
        needs_active: true,
        matcher: matchers::rename_floor,
    },
    Family {
        name: "building-rename",
        needs_active: true,
        matcher: matchers::rename_building,
    },
    Family {
        name: "create-building",
        needs_active: false,
        matcher: matchers::create_building,
    },
    Family {
        name: "edit-structure",
        needs_active: false,
        matcher: matchers::edit_structure,
    },
];

/// Run `text` through the priority table.
///
/// Returns the winning family's name with its intent, or `None` when no
/// family recognizes the input.
#[must_use]
pub fn parse_command(text: &str, has_active_building: bool) -> Option<(&'static str, Intent)> {
    FAMILIES
        .iter()
        .filter(|family| has_active_building || !family.needs_active)
        .find_map(|family| (family.matcher)(text).map(|intent| (family.name, intent)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn earlier_family_wins_over_later_one() {
        // "list" + "help" is a help request even though "list" + "all" would list buildings.
        let (family, intent) = parse_command("list all commands and help", true).unwrap();
        assert_eq!(family, "show-commands");
        assert_eq!(intent, Intent::ShowCommands);
    }

    #[test]
    fn switch_keyword_inside_a_rename_takes_priority() {
        // "set" in "set building name" is read as a switch request, kept as observed.
        let (family, intent) = parse_command("set building name to HQ", true).unwrap();
        assert_eq!(family, "switch-building");
        assert_eq!(
            intent,
            Intent::SwitchBuilding {
                name: "name to HQ".to_string()
            }
        );
    }

    #[test]
    fn renames_are_skipped_without_an_active_building() {
        assert_eq!(parse_command("rename restroom 1 on floor 2 to Main", false), None);

        let (family, intent) = parse_command("rename restroom 1 on floor 2 to Main", true).unwrap();
        assert_eq!(family, "restroom-rename");
        assert_eq!(
            intent,
            Intent::RenameComponent {
                kind: ComponentKind::Restroom,
                floor: 2,
                index: 1,
                name: "Main".to_string(),
            }
        );
    }

    #[test]
    fn edits_are_recognized_without_an_active_building() {
        let (family, _) = parse_command("add 2 floors", false).unwrap();
        assert_eq!(family, "edit-structure");
    }

    #[test]
    fn unknown_text_is_a_parse_miss() {
        assert_eq!(parse_command("good morning", true), None);
    }
}
