// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use url::Url;

use crate::utils::AppendPathSegments;

/// The kind of resource a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    DatabaseAccount,
    Databases,
    Containers,
    Documents,
    Offers,
    Users,
    Permissions,
    Topology,
    PartitionKeyRanges,
}

impl ResourceType {
    /// The value used both as the URL path segment and in the signed string.
    ///
    /// The account itself has no path segment and signs as an empty type.
    pub fn path_segment(self) -> &'static str {
        match self {
            ResourceType::DatabaseAccount => "",
            ResourceType::Databases => "dbs",
            ResourceType::Containers => "colls",
            ResourceType::Documents => "docs",
            ResourceType::Offers => "offers",
            ResourceType::Users => "users",
            ResourceType::Permissions => "permissions",
            ResourceType::Topology => "topology",
            ResourceType::PartitionKeyRanges => "pkranges",
        }
    }

    /// Master resources live at account level and never take a session token.
    pub fn is_master_resource(self) -> bool {
        !matches!(self, ResourceType::Documents)
    }
}

/// Identifies a resource or resource feed, e.g. `dbs/db/colls` or `dbs/db/colls/coll`.
///
/// A feed link signs with its parent's link; an item link signs with its own full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResourceLink {
    parent: Option<String>,
    resource_type: ResourceType,
    item_id: Option<String>,
}

impl ResourceLink {
    /// The account root.
    pub fn account() -> Self {
        Self {
            parent: None,
            resource_type: ResourceType::DatabaseAccount,
            item_id: None,
        }
    }

    /// A feed directly under the account, such as `dbs`.
    pub fn root(resource_type: ResourceType) -> Self {
        Self {
            parent: None,
            resource_type,
            item_id: None,
        }
    }

    /// The feed of `resource_type` under this item, e.g. `dbs/db` -> `dbs/db/colls`.
    pub fn feed(&self, resource_type: ResourceType) -> Self {
        Self {
            parent: Some(self.path()),
            resource_type,
            item_id: None,
        }
    }

    /// A single item in this feed, e.g. `dbs` -> `dbs/db`.
    pub fn item(&self, id: impl Into<String>) -> Self {
        Self {
            parent: self.parent.clone(),
            resource_type: self.resource_type,
            item_id: Some(id.into()),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// The resource id or full name fed to the signer.
    pub fn link_for_signing(&self) -> String {
        match self.item_id {
            Some(_) => self.path(),
            None => self.parent.clone().unwrap_or_default(),
        }
    }

    /// The unescaped path, without a leading slash.
    pub fn path(&self) -> String {
        self.segments().collect::<Vec<_>>().join("/")
    }

    /// The absolute URL for this link under `endpoint`.
    pub fn url(&self, endpoint: &Url) -> Url {
        endpoint.with_path_segments(self.segments())
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.parent
            .iter()
            .flat_map(|p| p.split('/'))
            .chain(
                Some(self.resource_type.path_segment()).filter(|segment| !segment.is_empty()),
            )
            .chain(self.item_id.as_deref())
    }
}
