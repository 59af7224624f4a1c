// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! The client's session token.

use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// The most recent session token observed by one client.
///
/// There is no ordering between concurrent requests: whichever response is processed last
/// wins. Callers that need a specific token for a request pass it as an explicit override.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    token: ArcSwapOption<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.token.load_full().map(|token| token.as_ref().clone())
    }

    /// Replaces the stored token. `None` clears it, matching a response without a token.
    pub fn set(&self, token: Option<String>) {
        self.token.store(token.map(Arc::new));
    }

    /// Returns `explicit` if given, otherwise the stored token.
    pub fn resolve(&self, explicit: Option<&str>) -> Option<String> {
        match explicit {
            Some(token) => Some(token.to_string()),
            None => self.get(),
        }
    }
}
