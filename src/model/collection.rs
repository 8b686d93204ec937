use super::Building;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingCollection {
    pub buildings: Vec<Building>,
    pub active_building: Option<String>,
}

impl BuildingCollection {
    #[must_use]
    pub fn active(&self) -> Option<&Building> {
        let id = self.active_building.as_deref()?;
        self.buildings.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// Case-insensitive name lookup.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Building> {
        let wanted = name.to_lowercase();
        self.buildings
            .iter()
            .find(|b| b.name.to_lowercase() == wanted)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.buildings.iter().map(|b| b.name.as_str()).collect()
    }

    /// Copy of the collection with one building replaced by id.
    #[must_use]
    pub fn with_building(&self, updated: Building) -> Self {
        Self {
            buildings: self
                .buildings
                .iter()
                .map(|b| {
                    if b.id == updated.id {
                        updated.clone()
                    } else {
                        b.clone()
                    }
                })
                .collect(),
            active_building: self.active_building.clone(),
        }
    }

    /// Copy of the collection with `building` appended and made active.
    #[must_use]
    pub fn with_new_active(&self, building: Building) -> Self {
        let active_building = Some(building.id.clone());
        let mut buildings = self.buildings.clone();
        buildings.push(building);
        Self {
            buildings,
            active_building,
        }
    }
}
