//! Fila core: volume-addressed virtual paths and the file handle contract.

pub mod codec;
pub mod config;
pub mod error;
pub mod handle;
pub mod path;
pub mod resolver;
pub mod types;

pub use config::{defaults, set_defaults, Defaults, FilaConfig, WritePolicy};
pub use error::{FilaError, Result};
pub use handle::{Fila, Unwatch, WatchCallback, WatchEvent, WriteTextOptions};
pub use path::FilaPath;
pub use resolver::{resolve, resolve_target};
pub use types::{Encoding, EntryType, ResolvedAddress, StatRecord, VolumeId};
