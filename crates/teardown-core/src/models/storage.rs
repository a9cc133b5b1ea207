// ABOUTME: Object storage listing models with continuation-token pagination
// ABOUTME: Used to empty a bucket page by page before deleting it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,
}

/// A single page of a bucket listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPage {
    /// Objects on this page
    pub objects: Vec<ObjectSummary>,
    /// More pages follow
    pub is_truncated: bool,
    /// Token to request the next page
    pub next_continuation_token: Option<String>,
}

impl ObjectPage {
    /// Token for the next request, `None` once the listing is complete
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        if self.is_truncated {
            self.next_continuation_token.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_token_only_when_truncated() {
        let mut page = ObjectPage {
            objects: vec![],
            is_truncated: false,
            next_continuation_token: Some("t1".to_owned()),
        };
        assert_eq!(page.next_token(), None);
        page.is_truncated = true;
        assert_eq!(page.next_token(), Some("t1"));
    }
}
