//! Room aggregate: membership, admin pointer, reveal state.

use super::card::{toggle, Card};
use super::event::{Outbound, ServerEvent, UserView};
use super::stats::Stats;
use crate::util::id::ConnectionId;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ConnectionId,
    pub name: String,
    pub card: Option<Card>,
    pub card_index: Option<usize>,
}

impl User {
    pub fn new(id: ConnectionId, name: String) -> Self {
        Self { id, name, card: None, card_index: None }
    }

    /// Apply one selection. Both fields toggle against their own previous
    /// value, so a call can clear one and set the other.
    pub fn select(&mut self, card: Option<Card>, card_index: Option<usize>) {
        self.card = toggle(&self.card, card);
        self.card_index = toggle(&self.card_index, card_index);
    }

    pub fn clear_selection(&mut self) {
        self.card = None;
        self.card_index = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    /// Join order. Also the admin succession order.
    pub users: Vec<User>,
    pub admin_id: Option<ConnectionId>,
    pub card_set_index: Option<usize>,
    pub show_results: bool,
    pub stats: Option<Stats>,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            users: Vec::new(),
            admin_id: None,
            card_set_index: None,
            show_results: false,
            stats: None,
        }
    }

    pub fn is_admin(&self, id: &ConnectionId) -> bool {
        self.admin_id.as_ref() == Some(id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.users.iter().any(|u| &u.id == id)
    }

    pub fn user_mut(&mut self, id: &ConnectionId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| &u.id == id)
    }

    /// Remove every user with `id`. Returns whether anything was removed.
    pub fn remove_user(&mut self, id: &ConnectionId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| &u.id != id);
        self.users.len() != before
    }

    /// Point the admin at `candidate`, or clear it when there is none.
    ///
    /// Emits, in order: the room-wide announcement, the `admin` signal to the
    /// new admin's connection, and the refreshed user list.
    pub fn elect_admin(&mut self, candidate: Option<ConnectionId>) -> Vec<Outbound> {
        let mut out = Vec::new();
        let elected = candidate.and_then(|id| {
            self.users
                .iter()
                .find(|u| u.id == id)
                .map(|u| (u.id.clone(), u.name.clone()))
        });
        match elected {
            Some((id, name)) => {
                tracing::info!(room_id = %self.id, admin = %id, %name, "admin elected");
                out.push(Outbound::to_room(
                    &self.id,
                    ServerEvent::LogMessage { message: format!("{name} is now the Admin") },
                ));
                out.push(Outbound::to_connection(&id, ServerEvent::Admin));
                self.admin_id = Some(id);
            }
            None => self.admin_id = None,
        }
        out.push(self.user_list());
        out
    }

    /// Earliest-joined remaining user, if any.
    pub fn successor(&self) -> Option<ConnectionId> {
        self.users.first().map(|u| u.id.clone())
    }

    /// Numeric sample for the reveal. Index mode reads `card_index` minus
    /// the ignored positions; value mode reads cards that parse as numbers.
    pub fn sample(&self, use_index_mode: bool, ignored_indices: &[usize]) -> Vec<f64> {
        self.users
            .iter()
            .filter_map(|u| {
                if use_index_mode {
                    u.card_index
                        .filter(|i| !ignored_indices.contains(i))
                        .map(|i| i as f64)
                } else {
                    u.card.as_ref().and_then(Card::as_number)
                }
            })
            .collect()
    }

    pub fn views(&self) -> Vec<UserView> {
        self.users
            .iter()
            .map(|u| UserView {
                id: u.id.clone(),
                name: u.name.clone(),
                is_admin: self.is_admin(&u.id),
                has_selected: u.card.is_some() || u.card_index.is_some(),
                card: self.show_results.then(|| u.card.clone()).flatten(),
                card_index: self.show_results.then_some(u.card_index).flatten(),
            })
            .collect()
    }

    pub fn user_list(&self) -> Outbound {
        Outbound::to_room(&self.id, ServerEvent::UserList { users: self.views() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::event::Target;
    use pretty_assertions::assert_eq;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn room_with(names: &[&str]) -> Room {
        let mut room = Room::new("r");
        for name in names {
            room.users.push(User::new(conn(name), name.to_string()));
        }
        room
    }

    #[test]
    fn select_toggles_each_field_independently() {
        let mut user = User::new(conn("a"), "a".into());
        user.select(Some(Card::Numeric(3.0)), Some(2));
        assert_eq!(user.card, Some(Card::Numeric(3.0)));
        assert_eq!(user.card_index, Some(2));

        // Same card, different index: card clears, index moves.
        user.select(Some(Card::Numeric(3.0)), Some(4));
        assert_eq!(user.card, None);
        assert_eq!(user.card_index, Some(4));
    }

    #[test]
    fn elect_admin_emits_announcement_signal_and_list() {
        let mut room = room_with(&["ann", "bob"]);
        let out = room.elect_admin(Some(conn("bob")));
        assert_eq!(room.admin_id, Some(conn("bob")));
        assert_eq!(out.len(), 3);
        assert_eq!(
            out[0].event,
            ServerEvent::LogMessage { message: "bob is now the Admin".into() }
        );
        assert_eq!(out[1].target, Target::Connection(conn("bob")));
        assert_eq!(out[1].event, ServerEvent::Admin);
        assert!(matches!(out[2].event, ServerEvent::UserList { .. }));
    }

    #[test]
    fn admin_marker_is_derived_not_appended() {
        let mut room = room_with(&["ann"]);
        room.elect_admin(Some(conn("ann")));
        room.elect_admin(Some(conn("ann")));
        let views = room.views();
        assert_eq!(views[0].name, "ann");
        assert!(views[0].is_admin);
    }

    #[test]
    fn elect_none_clears_admin() {
        let mut room = room_with(&[]);
        room.admin_id = Some(conn("gone"));
        let out = room.elect_admin(None);
        assert_eq!(room.admin_id, None);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn sample_modes() {
        let mut room = room_with(&["a", "b", "c", "d"]);
        room.users[0].select(Some(Card::Numeric(5.0)), Some(4));
        room.users[1].select(Some(Card::Symbolic("?".into())), Some(9));
        room.users[2].select(Some(Card::Symbolic("8".into())), Some(5));

        assert_eq!(room.sample(false, &[]), vec![5.0, 8.0]);
        assert_eq!(room.sample(true, &[]), vec![4.0, 9.0, 5.0]);
        assert_eq!(room.sample(true, &[9]), vec![4.0, 5.0]);
    }

    #[test]
    fn views_hide_selection_until_reveal() {
        let mut room = room_with(&["a"]);
        room.users[0].select(Some(Card::Numeric(5.0)), Some(4));
        let hidden = room.views();
        assert!(hidden[0].has_selected);
        assert_eq!(hidden[0].card, None);
        assert_eq!(hidden[0].card_index, None);

        room.show_results = true;
        let shown = room.views();
        assert_eq!(shown[0].card, Some(Card::Numeric(5.0)));
        assert_eq!(shown[0].card_index, Some(4));
    }
}
