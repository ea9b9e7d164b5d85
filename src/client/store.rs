use serde::Deserialize;
use tokio::sync::RwLock;

use crate::models::commitments::Commitment;
use crate::models::gigs::Gig;
use crate::models::members::{LoginRequest, LoginResponse, MemberResponse};
use crate::push::protocol::{Collection, PushMessage};

/// The local collection caches one connected client holds.
///
/// These are transient, replaceable read caches with no independent source
/// of truth: a received broadcast replaces the named collection wholesale,
/// discarding any optimistic local state not yet confirmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub gigs: Vec<Gig>,
    pub members: Vec<MemberResponse>,
    pub commitments: Vec<Commitment>,
}

impl ClientState {
    /// Apply a push message: unconditional full replace of the named
    /// collection (last-message-wins).
    pub fn apply_update(&mut self, message: PushMessage) -> Result<(), serde_json::Error> {
        match message.collection {
            Collection::Gigs => self.gigs = serde_json::from_value(message.data)?,
            Collection::Members => self.members = serde_json::from_value(message.data)?,
            Collection::Commitments => self.commitments = serde_json::from_value(message.data)?,
        }
        Ok(())
    }

    /// Optimistic local upsert by (gigId, userId).
    pub fn upsert_commitment(&mut self, commitment: Commitment) {
        self.commitments
            .retain(|c| !c.matches(&commitment.gig_id, &commitment.user_id));
        self.commitments.push(commitment);
    }

    /// Optimistic local gig removal, cascading its commitments.
    pub fn remove_gig(&mut self, id: &str) {
        self.gigs.retain(|g| g.id != id);
        self.commitments.retain(|c| c.gig_id != id);
    }
}

/// Wire envelope of `GET /api/gigs`.
#[derive(Debug, Deserialize)]
struct GigsEnvelope {
    gigs: Vec<Gig>,
}

/// One browser-session-equivalent client: REST for mutations, optimistic
/// local application, full-collection replace on broadcast receipt.
///
/// Push transport is external: whatever reads the WebSocket feeds decoded
/// [`PushMessage`]s into [`ClientStore::apply_update`].
///
/// Mutations deliberately do not roll back on request failure — the error
/// string is recorded and the optimistic state stands until the next
/// broadcast or full fetch overwrites it.
pub struct ClientStore {
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
    user: RwLock<Option<MemberResponse>>,
    state: RwLock<ClientState>,
    last_error: RwLock<Option<String>>,
}

impl ClientStore {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            token: RwLock::new(None),
            user: RwLock::new(None),
            state: RwLock::new(ClientState::default()),
            last_error: RwLock::new(None),
        }
    }

    // ── accessors ──

    pub async fn gigs(&self) -> Vec<Gig> {
        self.state.read().await.gigs.clone()
    }

    pub async fn members(&self) -> Vec<MemberResponse> {
        self.state.read().await.members.clone()
    }

    pub async fn commitments(&self) -> Vec<Commitment> {
        self.state.read().await.commitments.clone()
    }

    pub async fn current_user(&self) -> Option<MemberResponse> {
        self.user.read().await.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    // ── session ──

    /// Authenticate and keep the session token for subsequent mutations.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&body)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<LoginResponse>().await {
                Ok(login) => {
                    *self.token.write().await = Some(login.token);
                    *self.user.write().await = Some(login.user);
                    *self.last_error.write().await = None;
                    true
                }
                Err(e) => {
                    self.record_error(format!("Login failed: {e}")).await;
                    false
                }
            },
            Ok(resp) => {
                self.record_error(format!("Login failed: HTTP {}", resp.status()))
                    .await;
                false
            }
            Err(e) => {
                self.record_error(format!("Failed to connect to server: {e}"))
                    .await;
                false
            }
        }
    }

    pub async fn logout(&self) {
        *self.token.write().await = None;
        *self.user.write().await = None;
        *self.state.write().await = ClientState::default();
        *self.last_error.write().await = None;
    }

    // ── initial load ──

    /// Fetch full snapshots of all three collections. Must run before the
    /// store can rely on broadcasts — the push channel carries no history.
    pub async fn load_initial(&self) -> Result<(), reqwest::Error> {
        let gigs: GigsEnvelope = self
            .http
            .get(format!("{}/api/gigs", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let members: Vec<MemberResponse> = self
            .http
            .get(format!("{}/api/members", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let commitments: Vec<Commitment> = self
            .http
            .get(format!("{}/api/commitments", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut state = self.state.write().await;
        state.gigs = gigs.gigs;
        state.members = members;
        state.commitments = commitments;
        Ok(())
    }

    // ── broadcast receipt ──

    /// Apply a decoded push message from the live-update channel.
    pub async fn apply_update(&self, message: PushMessage) {
        let collection = message.collection;
        if let Err(e) = self.state.write().await.apply_update(message) {
            self.record_error(format!(
                "Bad {} snapshot from server: {e}",
                collection.as_str()
            ))
            .await;
        }
    }

    // ── mutations (optimistic, no rollback) ──

    /// Add a gig: apply locally, then POST. The server echoes the single
    /// record, so on success the optimistic state stands as-is.
    pub async fn add_gig(&self, gig: Gig) {
        self.state.write().await.gigs.push(gig.clone());

        let request = self
            .http
            .post(format!("{}/api/gigs", self.base_url))
            .json(&gig);
        self.send(request, "Failed to add gig").await;
    }

    /// Update a gig: replace locally by id, then PUT.
    pub async fn update_gig(&self, gig: Gig) {
        {
            let mut state = self.state.write().await;
            for slot in state.gigs.iter_mut().filter(|g| g.id == gig.id) {
                *slot = gig.clone();
            }
        }

        let request = self
            .http
            .put(format!("{}/api/gigs/{}", self.base_url, gig.id))
            .json(&gig);
        self.send(request, "Failed to update gig").await;
    }

    /// Delete a gig: remove locally (cascading its commitments), then
    /// DELETE.
    pub async fn delete_gig(&self, id: &str) {
        self.state.write().await.remove_gig(id);

        let request = self
            .http
            .delete(format!("{}/api/gigs/{id}", self.base_url));
        self.send(request, "Failed to delete gig").await;
    }

    /// Submit a commitment: upsert locally by (gigId, userId), then POST
    /// the full array (the endpoint replaces the whole collection).
    pub async fn submit_commitment(&self, commitment: Commitment) {
        let snapshot = {
            let mut state = self.state.write().await;
            state.upsert_commitment(commitment);
            state.commitments.clone()
        };

        let request = self
            .http
            .post(format!("{}/api/commitments", self.base_url))
            .json(&snapshot);
        self.send(request, "Failed to update commitment").await;
    }

    // ── plumbing ──

    async fn send(&self, request: reqwest::RequestBuilder, context: &str) -> bool {
        let request = match self.token.read().await.clone() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                *self.last_error.write().await = None;
                true
            }
            Ok(resp) => {
                self.record_error(format!("{context}: HTTP {}", resp.status()))
                    .await;
                false
            }
            Err(e) => {
                self.record_error(format!("{context}: {e}")).await;
                false
            }
        }
    }

    async fn record_error(&self, message: String) {
        tracing::warn!("{message}");
        *self.last_error.write().await = Some(message);
    }
}
