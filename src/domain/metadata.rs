use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Format of the collection date stored in [`MetaData`].
const DATE_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// The object used to issue requests to a bibliographic database.
///
/// Requesting is not part of this crate; anything that can be closed and
/// described as a map can be recorded in [`MetaData`].
pub trait Requester {
    /// Finish the requester's session.
    fn close(&mut self);

    /// The requester's state as a map.
    ///
    /// The map should include an `is_active` flag and a `log` entry.
    fn as_dict(&self) -> Map<String, Value>;
}

/// Metadata for a data collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    /// When the collection was run.
    pub date: String,
    /// Details of the requester used for the collection.
    pub requester: Option<Map<String, Value>>,
    /// Details of the database the data came from.
    pub db_info: Option<Map<String, Value>>,
    /// Requested URLs, if the requester logged them.
    pub log: Option<Vec<Value>>,
}

impl Default for MetaData {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaData {
    /// Metadata stamped with the current local time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            date: Local::now().format(DATE_FORMAT).to_string(),
            requester: None,
            db_info: None,
            log: None,
        }
    }

    /// Record the requester used for the collection.
    ///
    /// The requester is closed first. Its `is_active` flag is discarded, and
    /// its `log` is kept separately when it is a list.
    pub fn add_requester(&mut self, requester: &mut impl Requester) {
        requester.close();
        let mut details = requester.as_dict();

        details.remove("is_active");
        if let Some(Value::Array(log)) = details.remove("log") {
            self.log = Some(log);
        }

        self.requester = Some(details);
    }

    /// Record information about the database the data came from.
    pub fn add_db_info(&mut self, db_info: Map<String, Value>) {
        self.db_info = Some(db_info);
    }
}
