//! Assistant replies for every dispatcher outcome.

use crate::model::{BuildingCollection, ComponentKind};
use std::fmt;

/// "1 floor", "3 floors".
#[must_use]
pub fn counted(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListedBuilding {
    pub name: String,
    pub floors: usize,
    pub active: bool,
}

/// The outcome of one command, rendered with `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Welcome,
    Commands {
        buildings: usize,
        active: Option<String>,
    },
    BuildingList(Vec<ListedBuilding>),
    Switched {
        name: String,
        floors: usize,
    },
    BuildingNotFound {
        query: String,
        available: Vec<String>,
    },
    FloorsRenamed {
        count: usize,
        floors: Vec<(usize, String)>,
    },
    ComponentsRenamed {
        kind: ComponentKind,
        floor: usize,
        count: usize,
        names: Vec<String>,
    },
    ComponentRenamed {
        kind: ComponentKind,
        floor: usize,
        index: usize,
        name: String,
    },
    FloorRenamed {
        floor: usize,
        name: String,
    },
    BuildingRenamed {
        name: String,
    },
    FloorMissing {
        floor: usize,
        building: String,
        available: Vec<usize>,
    },
    ComponentMissing {
        kind: ComponentKind,
        index: usize,
        floor: usize,
        available: usize,
    },
    NameTaken {
        name: String,
        floors: usize,
    },
    Created {
        name: String,
        floors: usize,
        restrooms: usize,
        corridors: usize,
        lifts: usize,
        total_buildings: usize,
    },
    NoActiveBuilding,
    FloorsAdded {
        count: usize,
        building: String,
        total_floors: usize,
    },
    ComponentsAdded {
        kind: ComponentKind,
        count: usize,
        floor: Option<usize>,
    },
    UnknownFloor {
        floor: usize,
    },
    MultipleAdded {
        changes: Vec<String>,
        building: String,
        total_floors: usize,
    },
    FloorsRemoved {
        count: usize,
        total_floors: usize,
    },
    LastFloor,
    TooMany {
        requested: usize,
        limit: usize,
    },
    NotUnderstood {
        has_buildings: bool,
        current: Option<(String, usize)>,
    },
    ConfigurationUpdated,
}

impl Response {
    /// The fallback reply when no command family matched.
    #[must_use]
    pub fn not_understood(collection: &BuildingCollection) -> Self {
        Self::NotUnderstood {
            has_buildings: !collection.buildings.is_empty(),
            current: collection
                .active()
                .map(|b| (b.name.clone(), b.total_floors)),
        }
    }
}

const WELCOME: &str = "🏢 **Welcome to the SiteWise Building Assistant!**

I can help you manage your buildings with these commands:

**🏗️ Create Buildings:**
• \"Create Building A with 5 floors\"
• \"Create default building\"
• \"Create Office Complex with 3 floors, 2 restrooms, 1 corridor per floor\"

**➕ Add Components:**
• \"Add 2 floors\"
• \"Add 3 restrooms in floor 5\"
• \"Add 2 corridors to floor 3\"
• \"Add 1 floor and 2 restrooms\"

**✏️ Rename:**
• \"Change building name to Hospital\"
• \"Rename floor 1 to Lobby\"
• \"Rename restroom 1 in floor 2 to Main Restroom\"
• \"Rename corridor 2 on floor 3 to East Wing\"

**✨ Bulk Rename:**
• \"Rename all floors to [Ground, First, Second]\"
• \"Rename all restrooms in floor 1 to [Men, Women]\"
• \"Rename all corridors in floor 2 to [North Wing, South Wing]\"

**🔄 Manage Buildings:**
• \"Switch to Building A\"
• \"List all buildings\"

**💬 Help:** \"Show available commands\"";

const COMMANDS: &str = "📋 **Available Commands Reference**

**🏗️ CREATE BUILDINGS:**
• \"Create Building A with 5 floors\"
• \"Create default building\" (5 floors)
• \"Create Hospital with 3 floors, 2 restrooms, 1 corridor\"
• \"Build building called Annex\"

**➕ ADD COMPONENTS:**
• \"Add 2 floors\"
• \"Add 3 restrooms in floor 5\"
• \"Add 2 corridors to floor 3\"
• \"Add 2 restrooms\" (adds to every floor)
• \"Add 1 floor and 2 restrooms\" (several at once)

**✏️ RENAME SINGLE ITEM:**
• \"Change building name to Medical Center\"
• \"Call the building HQ\"
• \"Rename floor 1 to Lobby\" or \"Floor 1: Lobby\"
• \"Rename restroom 1 in floor 2 to Main Restroom\"
• \"Change corridor 2 on floor 3 to East Wing\"

**✨ BULK RENAME:**
• \"Rename all floors to [Ground, First, Second, Third]\"
• \"Rename all restrooms in floor 1 to [Men, Women, Accessible]\"
• \"Rename all corridors in floor 2 to [North Wing, South Wing]\"

**🔄 MANAGE BUILDINGS:**
• \"List all buildings\"
• \"Switch to Building Name\" or \"Use Hospital\"

**🗑️ REMOVE:**
• \"Remove 2 floors\" (at least one floor always stays)

**💡 TIPS:**
• Use [brackets] with comma-separated names for bulk renaming
• Leave a slot empty (\"[Ground, , Second]\") to keep a name
• All changes are saved automatically";

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => f.write_str(WELCOME),
            Self::Commands { buildings, active } => write!(
                f,
                "{COMMANDS}\n\n**Current Status:**\n• Buildings: {buildings}\n• Active: {}",
                active.as_deref().unwrap_or("None")
            ),
            Self::BuildingList(list) if list.is_empty() => f.write_str(
                "No buildings have been created yet. You can create one by saying \
                 \"Create default building\" or \"Create Building A with 5 floors\".",
            ),
            Self::BuildingList(list) => {
                writeln!(f, "**Available Buildings:**\n")?;
                for (i, b) in list.iter().enumerate() {
                    let marker = if b.active { " ← *Active*" } else { "" };
                    writeln!(f, "{}. **{}** ({} floors){marker}", i + 1, b.name, b.floors)?;
                }
                write!(
                    f,
                    "\n**Commands:**\n• \"Switch to Building Name\"\n\
                     • \"Create New Building with X floors\"\n\
                     • \"Change building name to New Name\""
                )
            }
            Self::Switched { name, floors } => write!(
                f,
                "✅ Switched to \"{name}\" ({floors} floors). You can now edit this building \
                 or upload maps to its components."
            ),
            Self::BuildingNotFound { query, available } => {
                let names = if available.is_empty() {
                    "None".to_string()
                } else {
                    available
                        .iter()
                        .map(|n| format!("\"{n}\""))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                write!(
                    f,
                    "❌ Building \"{query}\" not found.\n\n**Available buildings:** {names}\n\n\
                     Tip: Use \"List all buildings\" to see all available buildings."
                )
            }
            Self::FloorsRenamed { count, floors } => {
                writeln!(f, "✅ Successfully renamed {}!", counted(*count, "floor"))?;
                for (number, name) in floors {
                    write!(f, "\nFloor {number}: {name}")?;
                }
                Ok(())
            }
            Self::ComponentsRenamed {
                kind,
                floor,
                count,
                names,
            } => {
                writeln!(
                    f,
                    "✅ Successfully renamed {} on Floor {floor}!",
                    counted(*count, &kind.label().to_lowercase())
                )?;
                for (i, name) in names.iter().enumerate() {
                    write!(f, "\n{}. {name}", i + 1)?;
                }
                Ok(())
            }
            Self::ComponentRenamed {
                kind,
                floor,
                index,
                name,
            } => write!(
                f,
                "✅ Perfect! {} {index} on Floor {floor} has been renamed to \"{name}\".",
                kind.label()
            ),
            Self::FloorRenamed { floor, name } => {
                write!(f, "✅ Perfect! Floor {floor} has been renamed to \"{name}\".")
            }
            Self::BuildingRenamed { name } => {
                write!(f, "✅ Perfect! I've renamed your building to \"{name}\".")
            }
            Self::FloorMissing {
                floor,
                building,
                available,
            } => {
                let numbers: Vec<String> = available.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "❌ Floor {floor} doesn't exist in {building}. Available floors: {}",
                    numbers.join(", ")
                )
            }
            Self::ComponentMissing {
                kind,
                index,
                floor,
                available,
            } => write!(
                f,
                "❌ {} {index} doesn't exist on Floor {floor}. Available {}: 1-{available}",
                kind.label(),
                kind.plural()
            ),
            Self::NameTaken { name, floors } => write!(
                f,
                "⚠️ A building named \"{name}\" already exists!\n\n**Options:**\n\
                 • Switch to it: \"Switch to {name}\"\n\
                 • Create with a different name: \"Create {name} 2 with {floors} floors\"\n\
                 • List all buildings: \"List all buildings\""
            ),
            Self::Created {
                name,
                floors,
                restrooms,
                corridors,
                lifts,
                total_buildings,
            } => write!(
                f,
                "✅ Perfect! I've created \"{name}\" with:\n\n\
                 • {floors} floors\n\
                 • {restrooms} restrooms per floor\n\
                 • {corridors} corridors per floor\n\
                 • {lifts} lifts per corridor\n\n\
                 📊 **Total buildings in collection:** {total_buildings}\n\
                 🏗️ **Active building:** {name}\n\n\
                 You can now:\n\
                 • Select components to attach 2D maps\n\
                 • \"List all buildings\" to see all buildings\n\
                 • \"Switch to [building name]\" to work on another building\n\
                 • \"Add floors/restrooms/corridors\" to modify this building"
            ),
            Self::NoActiveBuilding => f.write_str(
                "❌ No building is currently active. Please create a building first or switch \
                 to an existing one.\n\n**Commands:**\n• \"Create default building\"\n\
                 • \"List all buildings\"",
            ),
            Self::FloorsAdded {
                count,
                building,
                total_floors,
            } => write!(
                f,
                "✅ Great! I've added {} to \"{building}\". You now have {total_floors} floors total.",
                counted(*count, "floor")
            ),
            Self::ComponentsAdded { kind, count, floor } => {
                let what = counted(*count, &kind.label().to_lowercase());
                match floor {
                    Some(n) => write!(f, "✅ Added {what} to Floor {n}."),
                    None => write!(f, "✅ Added {what} to each floor."),
                }
            }
            Self::UnknownFloor { floor } => write!(
                f,
                "❌ Floor {floor} doesn't exist. Please specify a valid floor number."
            ),
            Self::MultipleAdded {
                changes,
                building,
                total_floors,
            } => {
                let added = if changes.is_empty() {
                    "nothing".to_string()
                } else {
                    changes.join(", ")
                };
                write!(
                    f,
                    "✅ Great! I've added {added} to \"{building}\". You now have {total_floors} floors total."
                )
            }
            Self::FloorsRemoved {
                count,
                total_floors,
            } => write!(
                f,
                "✅ I've removed {} from your building. You now have {total_floors} floors total.",
                counted(*count, "floor")
            ),
            Self::LastFloor => f.write_str(
                "❌ I can't remove floors as you need at least one floor in your building.",
            ),
            Self::TooMany { requested, limit } => write!(
                f,
                "❌ {requested} is more than I can add at once. Please ask for at most {limit} at a time."
            ),
            Self::NotUnderstood {
                has_buildings: false,
                ..
            } => f.write_str(
                "❓ I couldn't understand your building requirements. Please specify:\n\n\
                 **📋 Create Your First Building:**\n\
                 • \"Create Building A with 5 floors\"\n\
                 • \"Create default building\"\n\
                 • \"Create Office Complex with 3 floors, 2 restrooms, 1 corridor per floor\"\n\n\
                 **💡 Tips:**\n\
                 • You can create multiple buildings and switch between them\n\
                 • Use \"Show available commands\" to see all options\n\
                 • Buildings are automatically saved",
            ),
            Self::NotUnderstood { current, .. } => {
                let current = match current {
                    Some((name, floors)) => format!("**Current Building:** {name} ({floors} floors)"),
                    None => "**No building selected**".to_string(),
                };
                write!(
                    f,
                    "❓ I couldn't understand your request. {current}\n\n\
                     **📋 Quick Commands:**\n\n\
                     **🏗️ Building Management:**\n\
                     • \"Create Building Name with X floors\"\n\
                     • \"Switch to Building Name\"\n\
                     • \"List all buildings\"\n\n\
                     **➕ Add Components:**\n\
                     • \"Add 2 more floors\"\n\
                     • \"Add 1 restroom to floor 3\"\n\
                     • \"Add 2 corridors\"\n\n\
                     **✏️ Rename:**\n\
                     • \"Change building name to New Name\"\n\
                     • \"Rename Floor 1 to Lobby\"\n\
                     • \"Rename all floors to [Ground, First, Second]\"\n\n\
                     **💬 Need Help?**\n\
                     • \"Show available commands\" - See all commands"
                )
            }
            Self::ConfigurationUpdated => f.write_str(
                "✅ Building configuration updated successfully! You can continue to modify \
                 components or upload 2D maps.",
            ),
        }
    }
}
