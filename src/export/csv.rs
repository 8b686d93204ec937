use crate::error::ExportError;
use crate::model::{BuildingCollection, ComponentKind};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 8] = [
    "Building",
    "Floor",
    "Floor Name",
    "Kind",
    "Component",
    "Lifts",
    "Has Map",
    "Has Fixture",
];

/// One row per restroom and corridor, in building and floor order.
pub fn write_csv<W: Write>(collection: &BuildingCollection, out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    for building in &collection.buildings {
        for floor in &building.floors {
            let number = floor.number.to_string();
            let floor_name = floor.display_name();

            for restroom in &floor.restrooms {
                writer.write_record([
                    building.name.as_str(),
                    number.as_str(),
                    floor_name.as_str(),
                    ComponentKind::Restroom.label(),
                    restroom.name.as_str(),
                    "",
                    yes_no(restroom.map_2d.is_some()),
                    yes_no(restroom.fixture_details.is_some()),
                ])?;
            }
            for corridor in &floor.corridors {
                let lifts = corridor.lifts.len().to_string();
                writer.write_record([
                    building.name.as_str(),
                    number.as_str(),
                    floor_name.as_str(),
                    ComponentKind::Corridor.label(),
                    corridor.name.as_str(),
                    lifts.as_str(),
                    yes_no(corridor.map_2d.is_some()),
                    "",
                ])?;
            }
        }
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(collection: &BuildingCollection, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    write_csv(collection, file)
}
