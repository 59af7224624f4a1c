// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use url::Url;

pub(crate) trait AppendPathSegments {
    fn append_path_segments<'a>(&mut self, segments: impl IntoIterator<Item = &'a str>);

    fn with_path_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Self;
}

impl AppendPathSegments for Url {
    fn append_path_segments<'a>(&mut self, segments: impl IntoIterator<Item = &'a str>) {
        // Endpoints are validated as base URLs when the client is built.
        if let Ok(mut path) = self.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
    }

    fn with_path_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut url = self.clone();
        url.append_path_segments(segments);
        url
    }
}
