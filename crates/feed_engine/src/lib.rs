//! Feed engine: catalog IO, batch loading and the page-view runtime.
mod catalog;
mod decode;
mod engine;
mod loader;
mod persist;
mod session;
mod types;

pub use catalog::{CatalogClient, CatalogSettings, ReqwestCatalogClient};
pub use decode::{decode_catalog, decode_media, DecodeError};
pub use engine::EngineHandle;
pub use loader::{BatchLoader, ChannelRenderSink, RenderSink};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use session::{FeedSession, FeedSettings};
pub use types::{BatchReport, EngineEvent, FailureKind, FeedEvent, FetchError};
