//! End-to-end chat scenarios against an in-memory store.

use pretty_assertions::assert_eq;
use sitewise::model::{BuildingCollection, Sender};
use sitewise::session::Session;
use sitewise::store::{self, FileStore, MemoryStore, BUILDINGS_KEY};
use std::time::Duration;

fn session() -> Session<MemoryStore> {
    Session::new(MemoryStore::default(), Duration::ZERO)
}

fn run(session: &mut Session<MemoryStore>, commands: &[&str]) {
    for command in commands {
        session.send_message(command);
    }
}

#[test]
fn default_building_grows_and_shrinks() {
    let mut s = session();

    s.send_message("create default building");
    let b = s.active_building().unwrap();
    assert_eq!(b.name, "My Building");
    assert_eq!(b.total_floors, 5);
    assert!(b.floors.iter().all(|f| f.restrooms.len() == 2 && f.corridors.len() == 2));

    s.send_message("add 2 floors");
    let b = s.active_building().unwrap();
    assert_eq!(b.total_floors, 7);
    for floor in &b.floors[5..] {
        assert_eq!(floor.restrooms.len(), 2);
        assert_eq!(floor.corridors.len(), 2);
        assert!(floor.corridors.iter().all(|c| c.lifts.len() == 2));
    }

    s.send_message("remove 10 floors");
    let b = s.active_building().unwrap();
    assert_eq!(b.floors.len(), 1);
    assert_eq!(b.total_floors, 1);
    assert_eq!(b.floors[0].number, 1);
}

#[test]
fn explicit_counts_shape_the_building() {
    let mut s = session();
    s.send_message("Create Office Complex with 4 floors, 3 restrooms, 1 corridor, 5 lifts");

    let b = s.active_building().unwrap();
    assert_eq!(b.name, "Office Complex");
    assert_eq!(b.total_floors, 4);
    assert_eq!(b.floors.len(), 4);
    for floor in &b.floors {
        assert_eq!(floor.restrooms.len(), 3);
        assert_eq!(floor.corridors.len(), 1);
        assert_eq!(floor.corridors[0].lifts.len(), 5);
    }
}

#[test]
fn floor_removal_renumbers_and_keeps_ids() {
    let mut s = session();
    run(&mut s, &["create Tower with 4 floors, 2 restrooms"]);
    let ids: Vec<String> = s.active_building().unwrap().floors.iter().map(|f| f.id.clone()).collect();

    s.send_message("remove 2 floors");
    let b = s.active_building().unwrap();
    assert_eq!(b.floor_numbers(), vec![1, 2]);
    assert_eq!(b.floors.iter().map(|f| f.id.clone()).collect::<Vec<_>>(), ids[..2].to_vec());

    s.send_message("remove floor");
    s.send_message("remove floor");
    assert_eq!(s.active_building().unwrap().floors.len(), 1);
    assert!(s.messages().last().unwrap().content.contains("at least one floor"));
}

#[test]
fn bulk_floor_rename_is_positional() {
    let mut s = session();
    run(&mut s, &["create Tower with 3 floors", "rename all floors to [Ground, First]"]);

    let b = s.active_building().unwrap();
    let names: Vec<Option<&str>> = b.floors.iter().map(|f| f.name.as_deref()).collect();
    assert_eq!(names, vec![Some("Ground"), Some("First"), None]);
    assert!(s.messages().last().unwrap().content.contains("renamed 2 floors"));
}

#[test]
fn both_restroom_rename_shapes_agree() {
    let mut a = session();
    let mut b = session();
    run(&mut a, &["create Tower with 3 floors", "rename restroom 1 in floor 2 to Main Restroom"]);
    run(&mut b, &["create Tower with 3 floors", "rename restroom 1 to Main Restroom in floor 2"]);

    let name_a = &a.active_building().unwrap().floors[1].restrooms[0].name;
    let name_b = &b.active_building().unwrap().floors[1].restrooms[0].name;
    assert_eq!(name_a, "Main Restroom");
    assert_eq!(name_a, name_b);
}

#[test]
fn switching_to_a_missing_building_lists_names() {
    let mut s = session();
    run(&mut s, &["create Tower with 2 floors", "create Annex with 1 floor"]);
    let active = s.collection().active_building.clone();

    s.send_message("switch to Hospital");

    assert_eq!(s.collection().active_building, active);
    let reply = &s.messages().last().unwrap().content;
    assert!(reply.contains("\"Hospital\" not found"));
    assert!(reply.contains("\"Tower\", \"Annex\""));
}

#[test]
fn switching_by_name_is_case_insensitive() {
    let mut s = session();
    run(&mut s, &["create Tower with 2 floors", "create Annex with 1 floor", "switch to tower"]);
    assert_eq!(s.active_building().unwrap().name, "Tower");
}

#[test]
fn name_only_creation_uses_the_standard_shape() {
    let mut s = session();
    s.send_message("Create Building A with 5 floors");

    let b = s.active_building().unwrap();
    assert_eq!(b.name, "A");
    assert_eq!(b.total_floors, 3);
    assert!(b.floors.iter().all(|f| f.corridors.iter().all(|c| c.lifts.len() == 2)));
}

#[test]
fn duplicate_names_are_refused() {
    let mut s = session();
    s.send_message("create Tower with 2 floors");
    let before = s.collection().clone();

    s.send_message("create tower with 5 floors");

    assert_eq!(s.collection(), &before);
    assert!(s.messages().last().unwrap().content.contains("already exists"));
}

#[test]
fn every_command_gets_exactly_one_reply() {
    let mut s = session();
    let commands = [
        "good morning",
        "show available commands",
        "list all buildings",
        "rename floor 1 to Lobby",
        "create default building",
        "rename floor 9 to Roof",
        "add 3 restrooms to floor 2",
    ];
    run(&mut s, &commands);

    let messages = s.messages();
    assert_eq!(messages.len(), 1 + commands.len() * 2);
    for pair in messages[1..].chunks(2) {
        assert_eq!(pair[0].sender, Sender::User);
        assert_eq!(pair[1].sender, Sender::Assistant);
    }
}

#[test]
fn collection_round_trips_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let saved = {
        let mut s = Session::new(FileStore::new(dir.path()), Duration::ZERO);
        s.send_message("create default building");
        s.send_message("rename all floors to [Ground, , Second]");
        s.collection().clone()
    };

    let loaded: BuildingCollection = store::load_or(&FileStore::new(dir.path()), BUILDINGS_KEY, BuildingCollection::default());
    assert_eq!(loaded, saved);

    let reopened = Session::new(FileStore::new(dir.path()), Duration::ZERO);
    assert_eq!(reopened.collection(), &saved);
    assert_eq!(reopened.messages().len(), 5);
}

#[test]
fn corrupt_store_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{BUILDINGS_KEY}.json")), "{not json").unwrap();

    let s = Session::new(FileStore::new(dir.path()), Duration::ZERO);
    assert!(s.collection().buildings.is_empty());
    assert_eq!(s.messages().len(), 1);
}
