//! # osrsbox
//!
//! Schema-validated records for the OSRS monster and quest databases.
//!
//! Raw dictionaries produced by the wiki extraction tools are loaded into
//! [`Record`]s, where every field is coerced to its declared type, then
//! exported as JSON with keys in manifest order.
//!
//! ## Example
//!
//! ```no_run
//! use osrsbox::{export, ExportConfig, Monster};
//!
//! # fn main() -> Result<(), osrsbox::RecordError> {
//! let config = ExportConfig::load("osrsbox.toml".as_ref())?;
//! let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string("415.raw.json")?)?;
//!
//! let monster = Monster::from_value(&raw, config.null_policy)?;
//! osrsbox::serialize::print(monster.record(), true)?;
//!
//! export::export_all([monster.record()], &config)?;
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod export;
pub mod monster;
pub mod ordered;
pub mod quest;
pub mod record;
pub mod schema;
pub mod serialize;
pub mod value;

#[doc(inline)]
pub use coerce::{coerce, NullPolicy};
#[doc(inline)]
pub use config::ExportConfig;
#[doc(inline)]
pub use error::{RecordError, RecordResult};
#[doc(inline)]
pub use monster::{Monster, MONSTER, MONSTER_STATS};
#[doc(inline)]
pub use ordered::{Entry, OrderedStructure};
#[doc(inline)]
pub use quest::{Quest, QUEST, QUEST_METADATA};
#[doc(inline)]
pub use record::Record;
#[doc(inline)]
pub use schema::{Field, FieldKind, Schema};
#[doc(inline)]
pub use serialize::{to_file, to_text, RenderOptions};
#[doc(inline)]
pub use value::{FieldType, FieldValue, DATE_FORMAT};
