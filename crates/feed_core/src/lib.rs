//! Feed core: queue, visibility trigger and the pure app state machine.
mod effect;
mod item;
mod msg;
mod queue;
mod state;
mod trigger;
mod update;
mod view_model;

pub use effect::Effect;
pub use item::{CatalogKey, MediaRef, WorkItem};
pub use msg::Msg;
pub use queue::{FeedQueue, QueueError};
pub use state::{AppState, Page, PageId};
pub use trigger::{
    ObserverStatus, OverlapPolicy, TriggerDecision, TriggerState, VisibilityEntry,
    VisibilityTrigger,
};
pub use update::update;
pub use view_model::{AppViewModel, CardView, PageView};
