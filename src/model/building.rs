use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    pub id: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restroom {
    pub id: String,
    pub name: String,
    pub position: Position,
    #[serde(rename = "map2D", default, skip_serializing_if = "Option::is_none")]
    pub map_2d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub lifts: Vec<Lift>,
    #[serde(rename = "map2D", default, skip_serializing_if = "Option::is_none")]
    pub map_2d: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub restrooms: Vec<Restroom>,
    pub corridors: Vec<Corridor>,
}

impl Floor {
    /// Name shown to the user: the custom name, or "Floor N".
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Floor {}", self.number))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub name: String,
    pub total_floors: usize,
    pub floors: Vec<Floor>,
}

impl Building {
    #[must_use]
    pub fn floor_by_number(&self, number: usize) -> Option<&Floor> {
        self.floors.iter().find(|f| f.number == number)
    }

    #[must_use]
    pub fn floor_numbers(&self) -> Vec<usize> {
        self.floors.iter().map(|f| f.number).collect()
    }

    #[must_use]
    pub fn max_floor_number(&self) -> usize {
        self.floors.iter().map(|f| f.number).max().unwrap_or(0)
    }

    /// Returns a copy with `total_floors` matching the floor list.
    #[must_use]
    pub fn synced(mut self) -> Self {
        self.total_floors = self.floors.len();
        self
    }
}

/// The two component kinds that can be addressed by number or carry a 2D map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Restroom,
    Corridor,
}

impl ComponentKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Restroom => "Restroom",
            Self::Corridor => "Corridor",
        }
    }

    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Restroom => "restrooms",
            Self::Corridor => "corridors",
        }
    }

    #[must_use]
    pub fn count_on(self, floor: &Floor) -> usize {
        match self {
            Self::Restroom => floor.restrooms.len(),
            Self::Corridor => floor.corridors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn restroom_serializes_with_persisted_field_names() {
        let restroom = Restroom {
            id: "r1".to_string(),
            name: "Restroom 1".to_string(),
            position: Position::new(100.0, 50.0),
            map_2d: Some("data:image/png;base64,AA==".to_string()),
            fixture_details: None,
        };

        let json = serde_json::to_value(&restroom).unwrap();

        assert_eq!(json["map2D"], "data:image/png;base64,AA==");
        assert!(json.get("fixtureDetails").is_none());
    }

    #[test]
    fn floor_display_name_falls_back_to_number() {
        let floor = Floor {
            id: "f".to_string(),
            number: 4,
            name: None,
            restrooms: Vec::new(),
            corridors: Vec::new(),
        };
        assert_eq!(floor.display_name(), "Floor 4");
    }
}
