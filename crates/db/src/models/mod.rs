//! Entity models.

pub mod notification;

pub use notification::{NewNotification, Notification, NotificationFilter};
