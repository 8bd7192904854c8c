//! Change detection over successive polls of an ordered collection.
//!
//! Only two scalars are compared between cycles: the identifier of the
//! leading item and the collection length. The leading identifier is the
//! change signal; the count is consulted only to size the slice of new items
//! once the leading identifier has changed.
//!
//! New items are taken positionally as the first `current - previous` entries.
//! This assumes items are only ever inserted at the front and nothing is
//! removed in the same cycle; a simultaneous insert and delete is reported as
//! [`Classification::Reordered`] or undercounted.

use std::fmt;

use crate::domain::NewsItem;

/// Comparison state carried from one cycle to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorState {
    last_seen_id: Option<String>,
    last_seen_count: usize,
    initialized: bool,
}

impl DetectorState {
    /// State as if a collection led by `id` with `count` items was already seen
    pub fn observed(id: Option<String>, count: usize) -> Self {
        Self {
            last_seen_id: id,
            last_seen_count: count,
            initialized: true,
        }
    }

    pub fn last_seen_id(&self) -> Option<&str> {
        self.last_seen_id.as_deref()
    }

    pub fn last_seen_count(&self) -> usize {
        self.last_seen_count
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoData,
    FirstObservation,
    NoChange,
    Reordered,
    NewItems,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::NoData => "no-data",
            Classification::FirstObservation => "first-observation",
            Classification::NoChange => "no-change",
            Classification::Reordered => "reordered",
            Classification::NewItems => "new-items",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Detection<'a> {
    pub classification: Classification,
    /// Leading slice of the snapshot; empty unless `classification` is `NewItems`
    pub new_items: &'a [NewsItem],
    pub previous: DetectorState,
    pub state: DetectorState,
}

impl Detection<'_> {
    pub fn has_new_items(&self) -> bool {
        self.classification == Classification::NewItems
    }

    /// Identifier of the leading item after this detection
    pub fn current_id(&self) -> Option<&str> {
        self.state.last_seen_id()
    }
}

pub struct ChangeDetector {
    id_field: String,
}

impl ChangeDetector {
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
        }
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn classify<'a>(&self, snapshot: &'a [NewsItem], state: &DetectorState) -> Detection<'a> {
        let unchanged = |classification| Detection {
            classification,
            new_items: &snapshot[..0],
            previous: state.clone(),
            state: state.clone(),
        };

        // An empty fetch means "nothing usable this cycle", never "the source
        // became empty", so it must not touch the comparison state.
        let Some(leading) = snapshot.first() else {
            return unchanged(Classification::NoData);
        };

        let latest_id = leading.id(&self.id_field);
        let current_count = snapshot.len();

        if !state.initialized {
            return Detection {
                classification: Classification::FirstObservation,
                new_items: &snapshot[..0],
                previous: state.clone(),
                state: DetectorState::observed(latest_id, current_count),
            };
        }

        if latest_id == state.last_seen_id {
            return unchanged(Classification::NoChange);
        }

        let (classification, new_items) = if current_count > state.last_seen_count {
            let delta = current_count - state.last_seen_count;
            (Classification::NewItems, &snapshot[..delta])
        } else {
            (Classification::Reordered, &snapshot[..0])
        };

        Detection {
            classification,
            new_items,
            previous: state.clone(),
            state: DetectorState::observed(latest_id, current_count),
        }
    }
}
