//! Record collection port and its in-memory adapter.
//!
//! The collection is the session-wide list of robots shared by the create
//! form and the browse view, newest first. All writes go through the
//! [`RobotCollection`] port so the store stays the single writer, and
//! consumers learn about changes by subscribing to [`StoreEvent`]s.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::debug;

use crate::robot::{NewRobot, Robot, RobotId};

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 64;

/// Change notifications published by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The whole list was replaced.
    ListReplaced {
        /// Length of the new list.
        len: usize,
    },
    /// A robot was inserted at the front of the list.
    Prepended {
        /// Identifier of the new robot.
        id: RobotId,
    },
    /// The active selection changed.
    Selected {
        /// Identifier of the selected robot.
        id: RobotId,
    },
}

/// Port for the shared robot collection.
pub trait RobotCollection: Send + Sync {
    /// Returns a snapshot of the collection, newest first.
    fn current_list(&self) -> Vec<Robot>;

    /// Replaces the whole collection.
    fn replace_list(&self, robots: Vec<Robot>);

    /// Marks `robot` as the active selection.
    fn set_selected(&self, robot: Robot);

    /// Returns the active selection.
    fn selected(&self) -> Option<Robot>;

    /// Reserves the identifier for the next robot. Identifiers are never
    /// handed out twice.
    fn next_id(&self) -> RobotId;

    /// Inserts `robot` at the front of the collection.
    ///
    /// The default implementation replaces the list with
    /// `[robot, ...current]`.
    fn prepend(&self, robot: Robot) {
        let current = self.current_list();
        let mut robots = Vec::with_capacity(current.len() + 1);
        robots.push(robot);
        robots.extend(current);
        self.replace_list(robots);
    }

    /// Assigns the next identifier to `robot`, inserts it at the front and
    /// selects it.
    ///
    /// The default implementation chains [`Self::next_id`], [`Self::prepend`]
    /// and [`Self::set_selected`]. Adapters shared between threads override
    /// it so the three steps happen under one lock.
    fn insert_new(&self, robot: NewRobot) -> Robot {
        let created = robot.into_robot(self.next_id());
        self.prepend(created.clone());
        self.set_selected(created.clone());
        created
    }
}

#[derive(Debug)]
struct StoreState {
    robots: Vec<Robot>,
    selected: Option<Robot>,
    next_id: u64,
}

impl StoreState {
    fn reserve_past(&mut self, robots: &[Robot]) {
        let after_max = robots
            .iter()
            .map(|robot| robot.id().get().saturating_add(1))
            .max()
            .unwrap_or(1);
        self.next_id = self.next_id.max(after_max);
    }
}

/// Process-local collection guarded by a mutex.
///
/// Every mutation swaps the list as a whole while holding the lock, then
/// publishes an event once the lock is released.
///
/// # Example
///
/// ```
/// use robot_catalog::{InMemoryRobotStore, RobotCollection, RobotId, StoreEvent};
///
/// let store = InMemoryRobotStore::new();
/// let mut events = store.subscribe();
///
/// assert_eq!(store.next_id(), RobotId::new(1));
/// store.replace_list(Vec::new());
/// assert_eq!(events.try_recv().ok(), Some(StoreEvent::ListReplaced { len: 0 }));
/// ```
#[derive(Debug)]
pub struct InMemoryRobotStore {
    state: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

impl InMemoryRobotStore {
    /// Creates an empty store. The first identifier handed out is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_robots(Vec::new())
    }

    /// Creates a store holding `robots`, newest first.
    #[must_use]
    pub fn with_robots(robots: Vec<Robot>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut state = StoreState {
            robots: Vec::new(),
            selected: None,
            next_id: 1,
        };
        state.reserve_past(&robots);
        state.robots = robots;
        Self {
            state: Mutex::new(state),
            events,
        }
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Number of robots in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().robots.len()
    }

    /// Returns `true` if the collection holds no robots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().robots.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: StoreEvent) {
        // Sending only fails when nobody is subscribed.
        if let Err(err) = self.events.send(event) {
            drop(err);
        }
    }
}

impl Default for InMemoryRobotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotCollection for InMemoryRobotStore {
    fn current_list(&self) -> Vec<Robot> {
        self.lock().robots.clone()
    }

    fn replace_list(&self, robots: Vec<Robot>) {
        let len = robots.len();
        {
            let mut state = self.lock();
            state.reserve_past(&robots);
            state.robots = robots;
        }
        debug!(len, "robot list replaced");
        self.publish(StoreEvent::ListReplaced { len });
    }

    fn set_selected(&self, robot: Robot) {
        let id = robot.id();
        self.lock().selected = Some(robot);
        debug!(%id, "robot selected");
        self.publish(StoreEvent::Selected { id });
    }

    fn selected(&self) -> Option<Robot> {
        self.lock().selected.clone()
    }

    fn next_id(&self) -> RobotId {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id = id.saturating_add(1);
        RobotId::new(id)
    }

    fn prepend(&self, robot: Robot) {
        let id = robot.id();
        let len = {
            let mut state = self.lock();
            state.reserve_past(std::slice::from_ref(&robot));
            let mut robots = Vec::with_capacity(state.robots.len() + 1);
            robots.push(robot);
            robots.append(&mut state.robots);
            state.robots = robots;
            state.robots.len()
        };
        debug!(%id, len, "robot prepended");
        self.publish(StoreEvent::Prepended { id });
    }

    fn insert_new(&self, robot: NewRobot) -> Robot {
        let (created, len) = {
            let mut state = self.lock();
            let reserved = RobotId::new(state.next_id);
            state.next_id = state.next_id.saturating_add(1);
            let inserted = robot.into_robot(reserved);
            state.robots.insert(0, inserted.clone());
            state.selected = Some(inserted.clone());
            (inserted, state.robots.len())
        };
        let id = created.id();
        debug!(%id, len, "robot inserted and selected");
        self.publish(StoreEvent::Prepended { id });
        self.publish(StoreEvent::Selected { id });
        created
    }
}
