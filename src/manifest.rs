//! Keyed route manifest built from the reconciled route list.

use crate::error::{AuditError, Result};
use crate::extractor::{HttpMethod, RouteEntry};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// The value stored per handler in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub url: String,
    pub method: HttpMethod,
    pub auth: bool,
}

/// How repeated handler names are merged into the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// A later route replaces the value of an earlier one with the same handler name.
    /// The key keeps the position of its first occurrence.
    #[default]
    LastWriteWins,
    /// Two routes with the same handler name from different declarations are an error.
    /// Routes from stacked annotations on one declaration still merge last-write-wins.
    Deny,
}

/// Route manifest keyed by handler name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteManifest {
    entries: IndexMap<String, ManifestEntry>,
}

impl RouteManifest {
    /// Projects routes into the manifest in the given order.
    ///
    /// # Errors
    ///
    /// With [`CollisionPolicy::Deny`], returns [`AuditError::HandlerCollision`] for the first
    /// handler name claimed by two distinct source locations.
    pub fn build(routes: &[RouteEntry], policy: CollisionPolicy) -> Result<Self> {
        let mut entries = IndexMap::new();
        let mut first_seen: HashMap<&str, &str> = HashMap::new();

        for route in routes {
            let first = *first_seen
                .entry(route.handler_name.as_str())
                .or_insert(route.location.as_str());

            if first != route.location {
                match policy {
                    CollisionPolicy::Deny => {
                        return Err(AuditError::HandlerCollision {
                            handler: route.handler_name.clone(),
                            first: first.to_string(),
                            second: route.location.clone(),
                        });
                    }
                    CollisionPolicy::LastWriteWins => {
                        debug!(
                            "Handler '{}' at {} overwrites the entry from {}",
                            route.handler_name, route.location, first
                        );
                    }
                }
            }

            entries.insert(
                route.handler_name.clone(),
                ManifestEntry {
                    url: route.url.clone(),
                    method: route.method,
                    auth: route.uses_auth_context,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn get(&self, handler: &str) -> Option<&ManifestEntry> {
        self.entries.get(handler)
    }

    /// Handler names in manifest order.
    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
