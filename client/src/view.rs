//! View-state reducer for the todo list.
//!
//! # Design
//! The dynamic UI state (list, pending input, loading flag, error message)
//! lives in an explicit `ViewState` record, and every change goes through
//! `update`, a reducer taking an `Event` and returning at most one
//! `Command` for the host to execute. Rendering layers hold no logic of
//! their own: they translate user input into events, run commands over
//! whatever transport they have, and feed the outcomes back as events.
//!
//! The list is a cache of the server's state, never the source of truth.
//! Success outcomes carry the server's values and are applied verbatim;
//! in particular a toggle applies the server-returned `completed`, not a
//! locally flipped boolean.
//!
//! # Overlapping requests
//! Refresh, toggle, and delete commands are stamped with a monotonic
//! sequence number, and the state remembers the newest sequence issued per
//! target (the refresh slot, or one todo id). An outcome older than the
//! newest issued for its target is discarded whole, so responses arriving
//! out of issue order cannot overwrite newer state. Create outcomes are
//! exempt: each successful create names a distinct item that now exists
//! server-side, and is appended in arrival order.

use std::collections::HashMap;

use uuid::Uuid;

use crate::types::Todo;

const FETCH_FAILED: &str = "Failed to load todos. Please try again later.";
const CREATE_FAILED: &str = "Failed to add todo. Please try again.";
const UPDATE_FAILED: &str = "Failed to update todo. Please try again.";
const DELETE_FAILED: &str = "Failed to delete todo. Please try again.";

/// What a sequence number was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Refresh,
    Todo(Uuid),
}

/// An input to the reducer: either a user intent or the outcome of a
/// previously issued `Command`.
///
/// Outcome events for refresh, toggle, and delete echo the sequence number
/// of the command they answer; the reducer uses it to drop stale responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The pending input text changed.
    InputChanged(String),
    /// The user submitted the pending input text.
    Submit,
    /// The user asked for a full list refresh.
    Refresh,
    /// The user toggled the completion state of one item.
    Toggle(Uuid),
    /// The user deleted one item.
    Delete(Uuid),

    Fetched { seq: u64, todos: Vec<Todo> },
    FetchFailed { seq: u64 },
    Created(Todo),
    CreateFailed,
    Updated { seq: u64, todo: Todo },
    UpdateFailed { seq: u64, id: Uuid },
    Deleted { seq: u64, id: Uuid },
    DeleteFailed { seq: u64, id: Uuid },
}

/// One HTTP operation the host must execute and answer with an outcome
/// event carrying the same sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch { seq: u64 },
    Create { title: String },
    Update { seq: u64, id: Uuid, completed: bool },
    Delete { seq: u64, id: Uuid },
}

/// The complete UI state of one todo list.
#[derive(Debug, Clone)]
pub struct ViewState {
    todos: Vec<Todo>,
    input: String,
    loading: bool,
    error: Option<String>,
    next_seq: u64,
    latest: HashMap<Target, u64>,
}

impl ViewState {
    /// Fresh state plus the initial fetch command: the view starts loading
    /// with an empty list and no error.
    pub fn init() -> (Self, Command) {
        let mut state = Self {
            todos: Vec::new(),
            input: String::new(),
            loading: true,
            error: None,
            next_seq: 0,
            latest: HashMap::new(),
        };
        let seq = state.issue(Target::Refresh);
        (state, Command::Fetch { seq })
    }

    /// The cached list, in server-assigned order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The pending input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while a refresh is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The visible error message, if any. Overwritten by the next failure,
    /// cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply one event, returning the command the host should run next.
    pub fn update(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::InputChanged(text) => {
                self.input = text;
                None
            }
            Event::Submit => {
                if self.input.trim().is_empty() {
                    return None;
                }
                Some(Command::Create {
                    title: self.input.clone(),
                })
            }
            Event::Refresh => {
                self.loading = true;
                let seq = self.issue(Target::Refresh);
                Some(Command::Fetch { seq })
            }
            Event::Toggle(id) => {
                let completed = self.todos.iter().find(|t| t.id == id)?.completed;
                let seq = self.issue(Target::Todo(id));
                Some(Command::Update {
                    seq,
                    id,
                    completed: !completed,
                })
            }
            Event::Delete(id) => {
                if !self.todos.iter().any(|t| t.id == id) {
                    return None;
                }
                let seq = self.issue(Target::Todo(id));
                Some(Command::Delete { seq, id })
            }

            Event::Fetched { seq, todos } => {
                if self.settle(Target::Refresh, seq) {
                    self.loading = false;
                    self.todos = todos;
                    self.error = None;
                }
                None
            }
            Event::FetchFailed { seq } => {
                if self.settle(Target::Refresh, seq) {
                    self.loading = false;
                    self.error = Some(FETCH_FAILED.to_string());
                }
                None
            }
            Event::Created(todo) => {
                self.todos.push(todo);
                self.input.clear();
                self.error = None;
                None
            }
            Event::CreateFailed => {
                self.error = Some(CREATE_FAILED.to_string());
                None
            }
            Event::Updated { seq, todo } => {
                if self.settle(Target::Todo(todo.id), seq) {
                    if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
                        *slot = todo;
                    }
                    self.error = None;
                }
                None
            }
            Event::UpdateFailed { seq, id } => {
                if self.settle(Target::Todo(id), seq) {
                    self.error = Some(UPDATE_FAILED.to_string());
                }
                None
            }
            Event::Deleted { seq, id } => {
                if self.settle(Target::Todo(id), seq) {
                    self.todos.retain(|t| t.id != id);
                    self.error = None;
                }
                None
            }
            Event::DeleteFailed { seq, id } => {
                if self.settle(Target::Todo(id), seq) {
                    self.error = Some(DELETE_FAILED.to_string());
                }
                None
            }
        }
    }

    /// Stamp a new command for `target`, superseding any in-flight one.
    fn issue(&mut self, target: Target) -> u64 {
        self.next_seq += 1;
        self.latest.insert(target, self.next_seq);
        self.next_seq
    }

    /// True if `seq` is the newest issued for `target`. Stale outcomes are
    /// dropped whole: neither the list nor the error message changes.
    fn settle(&mut self, target: Target, seq: u64) -> bool {
        if self.latest.get(&target) == Some(&seq) {
            self.latest.remove(&target);
            true
        } else {
            log::debug!("discarding stale response for {target:?} (seq {seq})");
            false
        }
    }
}
