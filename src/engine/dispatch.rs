use super::mutate::{apply, Outcome};
use super::response::Response;
use super::synth::IdStamps;
use crate::model::BuildingCollection;
use crate::parser::parse_command;
use tracing::debug;

/// Interpret one line of user text against the current collection.
///
/// Always produces a reply; unrecognized text yields the help response.
pub fn dispatch(collection: &BuildingCollection, text: &str, stamps: &mut IdStamps) -> Outcome {
    match parse_command(text, collection.active().is_some()) {
        Some((family, intent)) => {
            debug!(family, ?intent, "command matched");
            apply(collection, intent, stamps)
        }
        None => {
            debug!(text, "no command family matched");
            Outcome {
                collection: None,
                response: Response::not_understood(collection),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_building_then_growth() {
        let mut stamps = IdStamps::new();
        let created = dispatch(&BuildingCollection::default(), "create default building", &mut stamps)
            .collection
            .unwrap();
        let b = created.active().unwrap();
        assert_eq!((b.name.as_str(), b.total_floors), ("My Building", 5));

        let grown = dispatch(&created, "add 2 floors", &mut stamps).collection.unwrap();
        assert_eq!(grown.active().unwrap().total_floors, 7);
    }

    #[test]
    fn gibberish_gets_help_and_no_change() {
        let mut stamps = IdStamps::new();
        let outcome = dispatch(&BuildingCollection::default(), "what's the weather", &mut stamps);
        assert_eq!(outcome.collection, None);
        assert!(matches!(
            outcome.response,
            Response::NotUnderstood {
                has_buildings: false,
                ..
            }
        ));
    }

    #[test]
    fn edits_without_a_building_ask_for_one() {
        let mut stamps = IdStamps::new();
        let outcome = dispatch(&BuildingCollection::default(), "add 3 restrooms to floor 2", &mut stamps);
        assert_eq!(outcome.response, Response::NoActiveBuilding);
    }
}
