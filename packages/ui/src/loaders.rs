//! Data loading behind the views.
//!
//! Each step here takes the [`Client`] it talks through, so the views call
//! them with [`make_client`](crate::make_client) and the tests with a
//! [`MemoryBackend`](api::MemoryBackend).

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use api::{ApiResult, Backend, Client};
use model::{parse_horse_id, Ancestor, FamilyTree, GenerationLimit, Horse, HorseId, HorseSearch};

use crate::sleep;

/// Lets only the last of a burst of calls through.
///
/// Clones share one ticket counter. Every [`settle`](Self::settle) takes a new
/// ticket, waits out the delay and then reports whether its ticket is still
/// the latest one.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    latest: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Rc::new(Cell::new(0)),
        }
    }

    /// Wait for the delay. `false` when a later call superseded this one.
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        sleep(self.delay).await;
        self.latest.get() == ticket
    }
}

/// Run `search` once the debouncer settles.
///
/// Returns `None` without touching the backend when a later search took over.
pub async fn search_after_pause<B: Backend>(
    debouncer: &Debouncer,
    client: &Client<B>,
    search: HorseSearch,
) -> Option<ApiResult<Vec<Horse>>> {
    if !debouncer.settle().await {
        return None;
    }
    tracing::debug!("Searching horses: {:?}", search);
    Some(client.search_horses(&search).await)
}

/// What the detail page shows for one route segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HorseDetail {
    #[default]
    Loading,
    /// The segment is not a horse id; nothing was requested.
    NotAnId,
    Loaded(Horse),
    /// The request failed; holds the message for the user.
    Failed(String),
}

impl HorseDetail {
    pub async fn load<B: Backend>(client: &Client<B>, raw_id: &str) -> Self {
        let Some(id) = parse_horse_id(raw_id) else {
            tracing::warn!("Not a horse id: {}", raw_id);
            return Self::NotAnId;
        };
        match client.get_horse(id).await {
            Ok(horse) => Self::Loaded(horse),
            Err(e) => {
                tracing::error!("Error loading horse {}: {}", id, e);
                Self::Failed(e.user_message())
            }
        }
    }

    pub fn horse(&self) -> Option<&Horse> {
        match self {
            Self::Loaded(horse) => Some(horse),
            _ => None,
        }
    }
}

/// The family tree on screen and whether the last load failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FamilyTreeState {
    shown: Option<(HorseId, FamilyTree)>,
    failed: bool,
}

impl FamilyTreeState {
    /// Load the tree for a route and return the state to show next.
    ///
    /// A segment that is not a horse id sends no request. When the request
    /// fails the tree already shown stays, as long as it belongs to the same
    /// horse.
    pub async fn reload<B: Backend>(
        &self,
        client: &Client<B>,
        raw_id: &str,
        limit: GenerationLimit,
    ) -> Self {
        let Some(id) = parse_horse_id(raw_id) else {
            tracing::warn!("Not a horse id: {}", raw_id);
            return Self {
                shown: None,
                failed: true,
            };
        };
        match client.family_tree(id, limit).await {
            Ok(tree) => Self {
                shown: Some((id, tree)),
                failed: false,
            },
            Err(e) => {
                tracing::error!("Error getting family tree of horse {}: {}", id, e);
                Self {
                    shown: self.shown.clone().filter(|(root, _)| *root == id),
                    failed: true,
                }
            }
        }
    }

    pub fn ancestry(&self) -> Option<Ancestor> {
        self.shown
            .as_ref()
            .and_then(|(root, tree)| tree.ancestry(*root))
    }

    /// Whether a load has finished, with or without a tree to draw.
    pub fn is_settled(&self) -> bool {
        self.failed || self.shown.is_some()
    }
}
