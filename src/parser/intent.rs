use crate::model::ComponentKind;

/// Counts extracted from a building-creation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingSpec {
    pub name: Option<String>,
    pub floors: usize,
    pub restrooms: usize,
    pub corridors: usize,
    pub lifts: usize,
}

/// What a bulk rename applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkTarget {
    Floors,
    Components { kind: ComponentKind, floor: usize },
}

/// Quantities of a combined "add X and Y" command. At least two are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddCounts {
    pub floors: Option<usize>,
    pub restrooms: Option<usize>,
    pub corridors: Option<usize>,
}

impl AddCounts {
    #[must_use]
    pub fn detected(&self) -> usize {
        [self.floors, self.restrooms, self.corridors]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

/// A recognized command with its typed parameters.
///
/// Floor and component numbers are 1-based, exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ShowCommands,
    ListBuildings,
    SwitchBuilding {
        name: String,
    },
    BulkRename {
        target: BulkTarget,
        names: Vec<String>,
    },
    RenameComponent {
        kind: ComponentKind,
        floor: usize,
        index: usize,
        name: String,
    },
    RenameFloor {
        floor: usize,
        name: String,
    },
    RenameBuilding {
        name: String,
    },
    CreateBuilding(BuildingSpec),
    AddFloors {
        count: usize,
    },
    AddComponents {
        kind: ComponentKind,
        count: usize,
        floor: Option<usize>,
    },
    AddMultiple(AddCounts),
    RemoveFloors {
        count: usize,
    },
}
