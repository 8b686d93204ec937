//! The stateful chat session: owns the collection and the transcript and
//! mirrors both to a [`BlobStore`] after every change.

use crate::engine::editor::{map_corridor, map_floor, map_restroom};
use crate::engine::{dispatch, IdStamps, Response};
use crate::model::{Building, BuildingCollection, ChatMessage, ComponentKind, Corridor, Restroom, Sender};
use crate::store::{self, BlobStore, BUILDINGS_KEY, MESSAGES_KEY};
use crate::upload;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// Transcript shown on first start and after a clear.
#[must_use]
pub fn default_messages() -> Vec<ChatMessage> {
    vec![ChatMessage::new(
        "welcome",
        Sender::Assistant,
        Response::Welcome.to_string(),
    )]
}

pub struct Session<S: BlobStore> {
    store: S,
    collection: BuildingCollection,
    messages: Vec<ChatMessage>,
    pending: Option<String>,
    stamps: IdStamps,
    delay: Duration,
}

impl<S: BlobStore> Session<S> {
    /// Restore state from `store`, falling back to an empty collection and
    /// the welcome transcript.
    pub fn new(store: S, delay: Duration) -> Self {
        let collection = store::load_or(&store, BUILDINGS_KEY, BuildingCollection::default());
        let messages = store::load_or(&store, MESSAGES_KEY, default_messages());
        info!(
            buildings = collection.buildings.len(),
            messages = messages.len(),
            "session restored"
        );

        Self {
            store,
            collection,
            messages,
            pending: None,
            stamps: IdStamps::new(),
            delay,
        }
    }

    #[must_use]
    pub fn collection(&self) -> &BuildingCollection {
        &self.collection
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn active_building(&self) -> Option<&Building> {
        self.collection.active()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Send one command and wait for its reply. Returns the reply text, or
    /// `None` when the text was blank or another command is in flight.
    pub fn send_message(&mut self, text: &str) -> Option<String> {
        if !self.begin(text) {
            return None;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.finish()
    }

    /// Append the user's message and mark the session busy.
    ///
    /// Returns `false`, without touching the transcript, for blank text or
    /// while a previous command has not finished.
    pub fn begin(&mut self, text: &str) -> bool {
        if self.pending.is_some() || text.trim().is_empty() {
            return false;
        }
        self.push_message(Sender::User, text.to_string());
        self.pending = Some(text.to_string());
        true
    }

    /// Answer the command started by [`Session::begin`].
    pub fn finish(&mut self) -> Option<String> {
        let text = self.pending.take()?;
        let outcome = dispatch(&self.collection, &text, &mut self.stamps);
        if let Some(collection) = outcome.collection {
            self.commit(collection);
        }
        let reply = outcome.response.to_string();
        self.push_message(Sender::Assistant, reply.clone());
        Some(reply)
    }

    /// Read `path` and attach it as the 2D map of a restroom or corridor in
    /// the active building. Read failures are logged and change nothing.
    pub fn upload_map(&mut self, kind: ComponentKind, floor_id: &str, component_id: &str, path: impl AsRef<Path>) {
        match upload::read_data_uri(path) {
            Ok(uri) => self.attach_map(kind, floor_id, component_id, uri),
            Err(err) => error!(%err, "error reading file"),
        }
    }

    /// Read `path` and attach it as a restroom's fixture photo.
    pub fn upload_fixture(&mut self, floor_id: &str, restroom_id: &str, path: impl AsRef<Path>) {
        match upload::read_data_uri(path) {
            Ok(uri) => self.attach_fixture(floor_id, restroom_id, uri),
            Err(err) => error!(%err, "error reading file"),
        }
    }

    pub fn attach_map(&mut self, kind: ComponentKind, floor_id: &str, component_id: &str, data_uri: String) {
        self.set_map(kind, floor_id, component_id, Some(data_uri));
    }

    pub fn attach_fixture(&mut self, floor_id: &str, restroom_id: &str, data_uri: String) {
        self.set_fixture(floor_id, restroom_id, Some(data_uri));
    }

    pub fn delete_map(&mut self, kind: ComponentKind, floor_id: &str, component_id: &str) {
        self.set_map(kind, floor_id, component_id, None);
    }

    pub fn delete_fixture(&mut self, floor_id: &str, restroom_id: &str) {
        self.set_fixture(floor_id, restroom_id, None);
    }

    /// Replace a building wholesale (matched by id) and confirm in the
    /// transcript.
    pub fn update_building(&mut self, building: Building) {
        if self.collection.find_by_id(&building.id).is_none() {
            warn!(building = %building.id, "update for unknown building");
        }
        let updated = self.collection.with_building(building.synced());
        self.commit(updated);
        self.push_message(Sender::Assistant, Response::ConfigurationUpdated.to_string());
    }

    /// Run a structural edit against the active building and commit it with
    /// [`Session::update_building`]. Returns `false` when there is no active
    /// building or the edit changed nothing.
    pub fn edit_structure(&mut self, edit: impl FnOnce(&Building, &mut IdStamps) -> Building) -> bool {
        let Some(building) = self.collection.active() else {
            return false;
        };
        let edited = edit(building, &mut self.stamps);
        if &edited == building {
            return false;
        }
        self.update_building(edited);
        true
    }

    /// Drop every building and reset the transcript to the welcome message.
    pub fn clear_building(&mut self) {
        info!("clearing all buildings");
        self.collection = BuildingCollection::default();
        self.messages = default_messages();
        self.pending = None;
        store::forget(&mut self.store, BUILDINGS_KEY);
        store::save(&mut self.store, MESSAGES_KEY, &self.messages);
    }

    /// Make the building with `id` active. Unknown ids are ignored.
    pub fn switch_to_building(&mut self, id: &str) {
        if self.collection.find_by_id(id).is_none() {
            warn!(building = id, "cannot switch to unknown building");
            return;
        }
        let switched = BuildingCollection {
            buildings: self.collection.buildings.clone(),
            active_building: Some(id.to_string()),
        };
        self.commit(switched);
    }

    fn set_map(&mut self, kind: ComponentKind, floor_id: &str, component_id: &str, map: Option<String>) {
        self.edit_active(|building| {
            map_floor(building, floor_id, |floor| match kind {
                ComponentKind::Restroom => map_restroom(floor, component_id, |r| Restroom {
                    map_2d: map.clone(),
                    ..r.clone()
                }),
                ComponentKind::Corridor => map_corridor(floor, component_id, |c| Corridor {
                    map_2d: map.clone(),
                    ..c.clone()
                }),
            })
        });
    }

    fn set_fixture(&mut self, floor_id: &str, restroom_id: &str, fixture: Option<String>) {
        self.edit_active(|building| {
            map_floor(building, floor_id, |floor| {
                map_restroom(floor, restroom_id, |r| Restroom {
                    fixture_details: fixture.clone(),
                    ..r.clone()
                })
            })
        });
    }

    /// Apply `edit` to the active building, if any, and persist.
    fn edit_active(&mut self, edit: impl FnOnce(&Building) -> Building) {
        let Some(building) = self.collection.active() else {
            warn!("no active building to edit");
            return;
        };
        let updated = self.collection.with_building(edit(building));
        self.commit(updated);
    }

    fn commit(&mut self, collection: BuildingCollection) {
        self.collection = collection;
        store::save(&mut self.store, BUILDINGS_KEY, &self.collection);
    }

    fn push_message(&mut self, sender: Sender, content: String) {
        let id = self.stamps.next().to_string();
        self.messages.push(ChatMessage::new(id, sender, content));
        store::save(&mut self.store, MESSAGES_KEY, &self.messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn session() -> Session<MemoryStore> {
        Session::new(MemoryStore::default(), Duration::ZERO)
    }

    #[test]
    fn fresh_session_starts_with_welcome() {
        let s = session();
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].sender, Sender::Assistant);
        assert!(s.collection().buildings.is_empty());
    }

    #[test]
    fn every_command_appends_user_and_assistant_messages() {
        let mut s = session();
        s.send_message("hello there");
        s.send_message("create default building");

        let senders: Vec<Sender> = s.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Assistant,
                Sender::User,
                Sender::Assistant,
                Sender::User,
                Sender::Assistant,
            ]
        );
    }

    #[test]
    fn only_one_command_in_flight() {
        let mut s = session();
        assert!(s.begin("list buildings"));
        assert!(s.is_processing());
        assert!(!s.begin("create default building"));

        s.finish();
        assert!(!s.is_processing());
        assert_eq!(s.finish(), None);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut s = session();
        assert_eq!(s.send_message("   "), None);
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn state_survives_a_restart() {
        let mut s = session();
        s.send_message("create Tower with 3 floors");
        let saved = s.collection().clone();

        let reopened = Session::new(s.store, Duration::ZERO);
        assert_eq!(reopened.collection(), &saved);
        assert_eq!(reopened.messages().len(), 3);
    }

    #[test]
    fn maps_and_fixtures_attach_to_the_active_building() {
        let mut s = session();
        s.send_message("create default building");
        let floor = s.active_building().unwrap().floors[0].clone();
        let restroom_id = floor.restrooms[0].id.clone();
        let corridor_id = floor.corridors[1].id.clone();

        s.attach_map(ComponentKind::Corridor, &floor.id, &corridor_id, "data:image/png;base64,AA==".into());
        s.attach_fixture(&floor.id, &restroom_id, "data:image/jpeg;base64,BB==".into());

        let f = &s.active_building().unwrap().floors[0];
        assert_eq!(f.corridors[1].map_2d.as_deref(), Some("data:image/png;base64,AA=="));
        assert_eq!(f.restrooms[0].fixture_details.as_deref(), Some("data:image/jpeg;base64,BB=="));

        s.delete_fixture(&floor.id, &restroom_id);
        s.delete_map(ComponentKind::Corridor, &floor.id, &corridor_id);
        let f = &s.active_building().unwrap().floors[0];
        assert_eq!(f.restrooms[0].fixture_details, None);
        assert_eq!(f.corridors[1].map_2d, None);
    }

    #[test]
    fn unreadable_upload_changes_nothing() {
        let mut s = session();
        s.send_message("create default building");
        let before = s.collection().clone();
        let floor = before.active().unwrap().floors[0].clone();

        s.upload_map(ComponentKind::Restroom, &floor.id, &floor.restrooms[0].id, "/nonexistent/map.png");
        assert_eq!(s.collection(), &before);
    }

    #[test]
    fn update_building_resyncs_floor_count_and_confirms() {
        let mut s = session();
        s.send_message("create Tower with 3 floors");
        let mut edited = s.active_building().unwrap().clone();
        edited.floors.pop();
        edited.total_floors = 99;

        s.update_building(edited);

        assert_eq!(s.active_building().unwrap().total_floors, 2);
        assert_eq!(
            s.messages().last().unwrap().content,
            Response::ConfigurationUpdated.to_string()
        );
    }

    #[test]
    fn structural_edits_go_through_update_building() {
        use crate::engine::editor;

        let mut s = session();
        assert!(!s.edit_structure(editor::add_floor));

        s.send_message("create Tower with 2 floors, 1 restroom");
        let messages = s.messages().len();
        assert!(s.edit_structure(editor::add_floor));
        assert_eq!(s.active_building().unwrap().total_floors, 3);
        assert_eq!(s.messages().len(), messages + 1);

        assert!(!s.edit_structure(|b, _| editor::remove_floor(b, "no-such-floor")));
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = session();
        s.send_message("create default building");
        s.clear_building();

        assert!(s.collection().buildings.is_empty());
        assert_eq!(s.messages().len(), 1);
        assert!(!s.store().contains(BUILDINGS_KEY));
        assert!(s.store().contains(MESSAGES_KEY));
    }

    #[test]
    fn switching_by_id_ignores_unknown_ids() {
        let mut s = session();
        s.send_message("create Tower with 2 floors");
        s.send_message("create Annex with 1 floors");
        let tower_id = s.collection().find_by_name("tower").unwrap().id.clone();

        s.switch_to_building("nope");
        assert_eq!(s.active_building().unwrap().name, "Annex");

        s.switch_to_building(&tower_id);
        assert_eq!(s.active_building().unwrap().name, "Tower");
    }
}
