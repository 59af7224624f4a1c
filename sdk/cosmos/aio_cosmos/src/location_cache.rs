// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::models::AccountRegion;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    writable: Vec<Url>,
    readable: Vec<Url>,
}

/// Chooses the regional endpoint for each request.
///
/// Until discovery runs, both sets hold only the configured account endpoint. Each call picks
/// uniformly at random; regions are not health-checked, so an unreachable region stays
/// selectable until the next refresh.
#[derive(Debug)]
pub(crate) struct LocationCache {
    default_endpoint: Url,
    endpoints: ArcSwap<Endpoints>,
}

impl LocationCache {
    pub fn new(default_endpoint: Url) -> Self {
        let endpoints = Endpoints {
            writable: vec![default_endpoint.clone()],
            readable: vec![default_endpoint.clone()],
        };
        Self {
            default_endpoint,
            endpoints: ArcSwap::from_pointee(endpoints),
        }
    }

    pub fn default_endpoint(&self) -> &Url {
        &self.default_endpoint
    }

    pub fn writable(&self) -> Url {
        choose(&self.endpoints.load().writable, &self.default_endpoint)
    }

    pub fn readable(&self) -> Url {
        choose(&self.endpoints.load().readable, &self.default_endpoint)
    }

    /// Replaces both endpoint sets in one swap, so readers never see a mix of old and new.
    ///
    /// An empty discovered set falls back to the account endpoint.
    pub fn update(&self, writable: &[AccountRegion], readable: &[AccountRegion]) {
        let collect = |regions: &[AccountRegion]| -> Vec<Url> {
            if regions.is_empty() {
                vec![self.default_endpoint.clone()]
            } else {
                regions
                    .iter()
                    .map(|r| r.database_account_endpoint.clone())
                    .collect()
            }
        };
        let endpoints = Endpoints {
            writable: collect(writable),
            readable: collect(readable),
        };
        debug!(
            writable = ?endpoints.writable,
            readable = ?endpoints.readable,
            "updated account endpoints"
        );
        self.endpoints.store(Arc::new(endpoints));
    }
}

fn choose(endpoints: &[Url], fallback: &Url) -> Url {
    match endpoints.len() {
        0 => fallback.clone(),
        1 => endpoints[0].clone(),
        n => endpoints[rand::random_range(0..n)].clone(),
    }
}
