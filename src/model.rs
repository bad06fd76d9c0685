//! Canonical Notification Model
//!
//! Every transport event, regardless of kind, is normalized into this single
//! representation before it reaches the store. The UI consumes nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Enumerated notification category.
///
/// `OrderStatus` and `Payment` are synthesized client-side from their raw
/// events; any other label the transport delivers verbatim is preserved
/// in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    OrderStatus,
    Payment,
    Other(String),
}

impl NotificationKind {
    /// The wire label for this kind
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::OrderStatus => "ORDER_STATUS",
            NotificationKind::Payment => "PAYMENT",
            NotificationKind::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for NotificationKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "ORDER_STATUS" => NotificationKind::OrderStatus,
            "PAYMENT" => NotificationKind::Payment,
            _ => NotificationKind::Other(label),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single canonical notification.
///
/// Immutable once created except for the `read` flag, which is flipped by
/// the store's mark-as-read operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Globally unique per logical event. Synthesized notifications derive
    /// this deterministically from the source event's kind and subject id
    /// (`order-42`, `payment-7`), so redelivery yields the same id.
    pub id: String,

    /// Owner of the notification; unset when the client cannot determine it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub title: String,

    pub message: String,

    pub read: bool,

    /// Timestamp of the triggering event when available, otherwise the time
    /// of receipt.
    pub created_at: DateTime<Utc>,

    /// Subject entity (order, transaction), used for identity derivation
    /// and deep-linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
}

impl Notification {
    /// Create an unread notification with no owner and no subject entity.
    pub fn new(
        id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at,
            related_id: None,
        }
    }

    /// Set the subject entity id.
    pub fn with_related(mut self, related_id: impl Into<String>) -> Self {
        self.related_id = Some(related_id.into());
        self
    }

    /// Set the owning user id.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
