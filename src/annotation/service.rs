//! Annotation service boundary.
//!
//! The service is the only asynchronous collaborator. Requests end in a
//! response or a [`ServiceError`]; nothing here retries or cancels. Callers
//! submitting several updates for the same feature must await each one before
//! sending the next, otherwise updates can be lost.

use std::sync::Mutex;

use futures::future::{self, BoxFuture, FutureExt};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::feature::{primitive_to_feature, Creator, Feature, FeaturePayload};
use crate::{config::AnnotationConfig, error::ServiceError, scene::Primitive};

/// Answer to an annotation submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResponse {
    /// Present when the service stored the annotation
    #[serde(default)]
    pub annotation_id: Option<String>,
}

/// Client of the external annotation service
pub trait AnnotationService {
    /// Profile of the signed-in user, `None` when signed out
    fn current_user(&self) -> Option<Creator>;

    fn add_annotation<'a>(
        &'a self,
        token: &'a str,
        payload: FeaturePayload,
    ) -> BoxFuture<'a, Result<AddResponse, ServiceError>>;

    /// Latest drawn features stored against `resource`
    fn drawn_features<'a>(
        &'a self,
        token: &'a str,
        resource: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Feature>, ServiceError>>;
}

/// Outcome of [`submit_feature_annotation`]
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Payload as built, creator included when one was stamped
    pub payload: FeaturePayload,
    /// Id assigned by the service, `None` if nothing was sent because no user
    /// is signed in
    pub annotation_id: Option<String>,
}

/// Add or update the stored drawing for `primitive`
///
/// `action` becomes the payload comment; pass
/// [`TOMBSTONE_COMMENT`](super::feature::TOMBSTONE_COMMENT) to delete. The
/// payload is only sent when a user is signed in. A creator without an ORCID
/// gets the configured placeholder.
///
/// # Errors
///
/// The service's error, or [`ServiceError::Rejected`] when it answered without
/// an annotation id. Both are logged.
pub async fn submit_feature_annotation<S: AnnotationService + ?Sized>(
    service: &S,
    token: &str,
    primitive: &Primitive,
    region: &str,
    group: &str,
    config: &AnnotationConfig,
    action: &str,
) -> Result<Submission, ServiceError> {
    let mut payload = primitive_to_feature(primitive, region, group, &config.resource, action);

    let Some(mut creator) = service.current_user() else {
        debug!("no signed-in user, {} not submitted", payload.item.id);
        return Ok(Submission {
            payload,
            annotation_id: None,
        });
    };
    if creator.orcid.is_none() {
        creator.orcid = Some(config.default_orcid.clone());
    }
    payload.creator = Some(creator);

    match service.add_annotation(token, payload.clone()).await {
        Ok(AddResponse {
            annotation_id: Some(id),
        }) => Ok(Submission {
            payload,
            annotation_id: Some(id),
        }),
        Ok(_) => {
            warn!("annotation service did not store {}", payload.item.id);
            Err(ServiceError::Rejected)
        }
        Err(err) => {
            warn!("submitting {} failed: {}", payload.item.id, err);
            Err(err)
        }
    }
}

/// Fetch the drawn features stored against `resource`
pub async fn fetch_drawn_features<S: AnnotationService + ?Sized>(
    service: &S,
    token: &str,
    resource: &str,
) -> Result<Vec<Feature>, ServiceError> {
    service
        .drawn_features(token, resource)
        .await
        .inspect_err(|err| warn!("fetching drawn features for {resource} failed: {err}"))
}

#[derive(Debug, Default)]
struct MemoryState {
    submissions: Vec<FeaturePayload>,
    next_id: u64,
    offline: bool,
}

/// In-process annotation service
///
/// Keeps every submission. [`AnnotationService::drawn_features`] reports the
/// latest feature per id, leaving out ids whose latest submission is a
/// tombstone.
#[derive(Debug, Default)]
pub struct MemoryAnnotationService {
    user: Option<Creator>,
    state: Mutex<MemoryState>,
}

impl MemoryAnnotationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: Creator) -> Self {
        self.user = Some(user);
        self
    }

    /// While offline every request fails with [`ServiceError::Request`]
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Every payload received so far, oldest first
    pub fn submissions(&self) -> Vec<FeaturePayload> {
        self.state
            .lock()
            .map(|state| state.submissions.clone())
            .unwrap_or_default()
    }

    fn store(&self, payload: FeaturePayload) -> Result<AddResponse, ServiceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ServiceError::Request("store lock poisoned".to_string()))?;
        if state.offline {
            return Err(ServiceError::Request("service offline".to_string()));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.submissions.push(payload);
        Ok(AddResponse {
            annotation_id: Some(id.to_string()),
        })
    }

    fn latest_features(&self, resource: &str) -> Result<Vec<Feature>, ServiceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| ServiceError::Request("store lock poisoned".to_string()))?;
        if state.offline {
            return Err(ServiceError::Request("service offline".to_string()));
        }
        let mut latest: Vec<(&str, Option<&Feature>)> = Vec::new();
        for payload in state.submissions.iter().filter(|p| p.resource == resource) {
            let feature = payload.feature.as_ref().filter(|_| !payload.is_tombstone());
            match latest.iter_mut().find(|(id, _)| *id == payload.item.id) {
                Some(entry) => entry.1 = feature,
                None => latest.push((payload.item.id.as_str(), feature)),
            }
        }
        Ok(latest
            .into_iter()
            .filter_map(|(_, feature)| feature.cloned())
            .collect())
    }
}

impl AnnotationService for MemoryAnnotationService {
    fn current_user(&self) -> Option<Creator> {
        self.user.clone()
    }

    fn add_annotation<'a>(
        &'a self,
        _token: &'a str,
        payload: FeaturePayload,
    ) -> BoxFuture<'a, Result<AddResponse, ServiceError>> {
        future::ready(self.store(payload)).boxed()
    }

    fn drawn_features<'a>(
        &'a self,
        _token: &'a str,
        resource: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Feature>, ServiceError>> {
        future::ready(self.latest_features(resource)).boxed()
    }
}
