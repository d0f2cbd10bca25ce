//! List/detail navigation state machine.
//!
//! # Design
//! `ViewCoordinator` owns the collection state, the selection and the current
//! detail activation. It never performs I/O: every operation returns the
//! `Effect`s the host must execute, and fetch outcomes come back through
//! `resolve` tagged with the `RequestToken` they were dispatched with.
//!
//! A result is applied only when its token is the latest one dispatched for a
//! live target. Responses for superseded activations, for activations the user
//! navigated away from, and for anything after `teardown` are dropped, so the
//! detail view always reflects the most recently *requested* id.

use std::sync::Arc;

use crate::client::PostsClient;
use crate::config::CoordinatorConfig;
use crate::effect::{CancelHandle, Effect, RequestToken};
use crate::error::{FetchError, NavigationError};
use crate::http::HttpResponse;
use crate::projection::LabelCache;
use crate::types::Post;
use crate::view::{ListEntry, View};

/// The loaded collection, tagged so "no posts" and "fetch failed" differ.
#[derive(Debug, Clone)]
pub enum CollectionState {
    /// `mount` has not been called yet.
    Idle,
    Loading { token: RequestToken },
    Loaded(Vec<Arc<Post>>),
    Failed(FetchError),
}

impl CollectionState {
    /// Posts to show in the list. Empty unless loaded.
    pub fn posts(&self) -> &[Arc<Post>] {
        match self {
            CollectionState::Loaded(posts) => posts,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CollectionState::Failed(_))
    }
}

/// One lifetime of the detail view, scoped to a single selected id.
#[derive(Debug, Clone)]
pub struct DetailActivation {
    id: u64,
    token: RequestToken,
    cancel: CancelHandle,
    pending: bool,
    post: Option<Arc<Post>>,
    failure: Option<FetchError>,
}

impl DetailActivation {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    pub fn post(&self) -> Option<&Arc<Post>> {
        self.post.as_ref()
    }

    /// Reason the detail fetch failed. The view keeps showing the loading
    /// state either way.
    pub fn failure(&self) -> Option<&FetchError> {
        self.failure.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// What happened to a fetch outcome handed to `resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome was a success and is now in state.
    Applied,
    /// The outcome was a failure; it was logged and recorded in state.
    Failed(FetchError),
    /// A newer request replaced this one; the outcome was discarded.
    Stale,
    /// The target was torn down before the outcome arrived.
    Cancelled,
    /// The token was never dispatched by this coordinator.
    Unknown,
}

#[derive(Debug)]
pub struct ViewCoordinator {
    client: PostsClient,
    config: CoordinatorConfig,
    next_token: u64,
    collection: CollectionState,
    collection_cancel: Option<CancelHandle>,
    activation: Option<DetailActivation>,
    /// In-flight token of the last activation left through `back`.
    backed_out: Option<RequestToken>,
    labels: LabelCache,
    torn_down: bool,
}

impl ViewCoordinator {
    pub fn new(client: PostsClient, config: CoordinatorConfig) -> Self {
        Self {
            client,
            config,
            next_token: 1,
            collection: CollectionState::Idle,
            collection_cancel: None,
            activation: None,
            backed_out: None,
            labels: LabelCache::new(),
            torn_down: false,
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn collection(&self) -> &CollectionState {
        &self.collection
    }

    /// Selected post id; `None` while the list is showing.
    pub fn selection(&self) -> Option<u64> {
        self.activation.as_ref().map(|a| a.id)
    }

    pub fn activation(&self) -> Option<&DetailActivation> {
        self.activation.as_ref()
    }

    pub fn labels(&self) -> &LabelCache {
        &self.labels
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Dispatch the collection fetch. Only the first call has an effect.
    pub fn mount(&mut self) -> Option<Effect> {
        if self.torn_down || !matches!(self.collection, CollectionState::Idle) {
            return None;
        }
        let token = self.issue_token();
        let cancel = CancelHandle::new();
        self.collection = CollectionState::Loading { token };
        self.collection_cancel = Some(cancel.clone());
        tracing::debug!(%token, "dispatching collection fetch");
        Some(Effect::Fetch {
            token,
            request: self.client.build_list_posts(),
            cancel,
        })
    }

    /// Show the detail view for `id`, replacing any current activation.
    pub fn select(&mut self, id: u64) -> Vec<Effect> {
        if self.torn_down {
            tracing::warn!(id, "select after teardown ignored");
            return Vec::new();
        }
        if self.selection() == Some(id) {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.activation.take() {
            effects.extend(Self::retire(previous));
        }

        let token = self.issue_token();
        let cancel = CancelHandle::new();
        self.activation = Some(DetailActivation {
            id,
            token,
            cancel: cancel.clone(),
            pending: true,
            post: None,
            failure: None,
        });
        tracing::debug!(%token, id, "dispatching detail fetch");
        effects.push(Effect::Fetch {
            token,
            request: self.client.build_get_post(id),
            cancel,
        });
        effects
    }

    /// Leave the detail view and return to the list.
    pub fn back(&mut self) -> Result<Vec<Effect>, NavigationError> {
        if !self.config.back_navigation {
            return Err(NavigationError::BackNavigationDisabled);
        }
        let activation = self.activation.take().ok_or(NavigationError::AlreadyAtList)?;
        let effect = Self::retire(activation);
        self.backed_out = effect.as_ref().map(Effect::token);
        Ok(effect.into_iter().collect())
    }

    /// Cancel every outstanding fetch. Later outcomes are all discarded.
    pub fn teardown(&mut self) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        self.torn_down = true;

        let mut effects = Vec::new();
        if let CollectionState::Loading { token } = self.collection {
            if let Some(cancel) = self.collection_cancel.take() {
                cancel.cancel();
            }
            effects.push(Effect::Cancel { token });
        }
        if let Some(activation) = self.activation.take() {
            effects.extend(Self::retire(activation));
        }
        effects
    }

    /// Feed back the outcome of a fetch dispatched with `token`.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<HttpResponse, FetchError>,
    ) -> Resolution {
        if token.value() == 0 || token.value() >= self.next_token {
            tracing::warn!(%token, "outcome for unknown request token");
            return Resolution::Unknown;
        }
        if self.torn_down {
            return Resolution::Cancelled;
        }

        if matches!(self.collection, CollectionState::Loading { token: t } if t == token) {
            return self.resolve_collection(outcome);
        }
        match &self.activation {
            Some(activation) if activation.token == token && activation.pending => {
                self.resolve_detail(outcome)
            }
            _ if self.backed_out == Some(token) => {
                self.backed_out = None;
                tracing::debug!(%token, "discarding outcome for cancelled request");
                Resolution::Cancelled
            }
            _ => {
                tracing::debug!(%token, "discarding outcome for stale request");
                Resolution::Stale
            }
        }
    }

    /// Build the view for the current state.
    pub fn render(&mut self) -> View {
        if let Some(activation) = &self.activation {
            return match &activation.post {
                Some(post) => View::Detail {
                    id: activation.id,
                    text: post.display_text(),
                },
                None => View::Loading { id: activation.id },
            };
        }

        let posts = self.collection.posts();
        self.labels.retain(posts);
        let entries = posts
            .iter()
            .map(|post| ListEntry {
                key: post.id.to_string(),
                id: post.id,
                label: self.labels.label(post),
            })
            .collect();
        View::List { entries }
    }

    fn issue_token(&mut self) -> RequestToken {
        let token = RequestToken::new(self.next_token);
        self.next_token += 1;
        token
    }

    /// Fire the activation's cancel handle; emit a cancel if it was in flight.
    fn retire(activation: DetailActivation) -> Option<Effect> {
        activation.cancel.cancel();
        if !activation.pending {
            return None;
        }
        Some(Effect::Cancel {
            token: activation.token,
        })
    }

    fn resolve_collection(&mut self, outcome: Result<HttpResponse, FetchError>) -> Resolution {
        self.collection_cancel = None;
        match outcome.and_then(|response| self.client.parse_list_posts(response)) {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "collection loaded");
                self.collection = CollectionState::Loaded(posts.into_iter().map(Arc::new).collect());
                Resolution::Applied
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching posts");
                self.collection = CollectionState::Failed(err.clone());
                Resolution::Failed(err)
            }
        }
    }

    fn resolve_detail(&mut self, outcome: Result<HttpResponse, FetchError>) -> Resolution {
        let parsed = outcome.and_then(|response| self.client.parse_get_post(response));
        let Some(activation) = self.activation.as_mut() else {
            return Resolution::Stale;
        };
        activation.pending = false;
        match parsed {
            Ok(post) => {
                if post.id != activation.id {
                    tracing::warn!(requested = activation.id, received = post.id, "post id mismatch");
                }
                activation.post = Some(Arc::new(post));
                Resolution::Applied
            }
            Err(err) => {
                tracing::error!(id = activation.id, error = %err, "error fetching post details");
                activation.failure = Some(err.clone());
                Resolution::Failed(err)
            }
        }
    }
}
