//! Encounter alerts and the queue that times them out.

use std::{collections::VecDeque, time::Duration};

use pixel_adventure_core::{Encounter, Npc};

/// Time an alert stays visible before it is dismissed.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Alert presented to the player when an encounter fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Headline of the alert.
    pub title: String,
    /// Body text shown beneath the headline.
    pub description: String,
    /// Time the alert stays on screen.
    pub duration: Duration,
}

impl Notification {
    /// Constructs a notification with the default display window.
    #[must_use]
    pub fn new<T, D>(title: T, description: D) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            title: title.into(),
            description: description.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Builds the alert announcing an encounter.
    ///
    /// NPC encounters are worded with the trainer's name looked up in `npcs`;
    /// trainers missing from the roster are announced generically.
    #[must_use]
    pub fn from_encounter(encounter: &Encounter, npcs: &[Npc]) -> Self {
        match encounter {
            Encounter::Wild => Self::new("Battle triggered!", "A wild Pokémon appeared!"),
            Encounter::Npc { npc } => {
                let name = npcs
                    .iter()
                    .find(|candidate| candidate.id == *npc)
                    .map_or("A trainer", |candidate| candidate.name.as_str());
                Self::new(
                    format!("{name} spotted you!"),
                    format!("{name} wants to battle!"),
                )
            }
        }
    }

    /// Overrides the display window.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Toast {
    notification: Notification,
    remaining: Duration,
}

/// Alerts currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a notification for its configured duration.
    pub fn push(&mut self, notification: Notification) {
        let remaining = notification.duration;
        self.toasts.push_back(Toast {
            notification,
            remaining,
        });
    }

    /// Advances every alert by `elapsed` and drops the ones that expired.
    pub fn advance(&mut self, elapsed: Duration) {
        for toast in &mut self.toasts {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
        }
        self.toasts.retain(|toast| !toast.remaining.is_zero());
    }

    /// Most recently pushed alert that is still visible.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.toasts.back().map(|toast| &toast.notification)
    }

    /// Iterates over the visible alerts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter().map(|toast| &toast.notification)
    }

    /// Number of visible alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Reports whether nothing is on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_adventure_core::{Direction, NpcId, Position};

    fn hiker() -> Npc {
        Npc {
            id: NpcId::new(3),
            name: "Hiker".to_owned(),
            position: Position::new(5, 15),
            facing: Direction::Left,
            detection_range: 2,
        }
    }

    #[test]
    fn wild_encounter_wording() {
        let notification = Notification::from_encounter(&Encounter::Wild, &[]);
        assert_eq!(notification.title, "Battle triggered!");
        assert_eq!(notification.description, "A wild Pokémon appeared!");
        assert_eq!(notification.duration, DEFAULT_TOAST_DURATION);
    }

    #[test]
    fn npc_encounter_uses_trainer_name() {
        let encounter = Encounter::Npc { npc: NpcId::new(3) };
        let notification = Notification::from_encounter(&encounter, &[hiker()]);
        assert_eq!(notification.title, "Hiker spotted you!");
        assert_eq!(notification.description, "Hiker wants to battle!");
    }

    #[test]
    fn unknown_trainer_is_announced_generically() {
        let encounter = Encounter::Npc { npc: NpcId::new(42) };
        let notification = Notification::from_encounter(&encounter, &[hiker()]);
        assert_eq!(notification.title, "A trainer spotted you!");
    }

    #[test]
    fn toasts_expire_after_three_seconds() {
        let mut queue = ToastQueue::new();
        queue.push(Notification::from_encounter(&Encounter::Wild, &[]));

        queue.advance(Duration::from_millis(2_800));
        assert_eq!(queue.len(), 1);

        queue.advance(Duration::from_millis(200));
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn newest_toast_is_current() {
        let mut queue = ToastQueue::new();
        queue.push(Notification::new("first", "older"));
        queue.advance(Duration::from_secs(1));
        queue.push(Notification::new("second", "newer"));

        assert_eq!(queue.current().map(|n| n.title.as_str()), Some("second"));

        queue.advance(Duration::from_secs(2));
        assert_eq!(queue.iter().count(), 1, "first toast expired");
        assert_eq!(queue.current().map(|n| n.title.as_str()), Some("second"));
    }
}
