pub mod fcm;

pub use fcm::{Notification, NotificationPayload, PushGateway};
