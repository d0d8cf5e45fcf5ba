//! Notification module for flashkit
//!
//! Owns the lifecycle of flash banners: adopting the ones rendered with the
//! page, showing new ones, expiring them on a timer and dismissing them when
//! their close button is clicked.

mod notification_manager;
mod notification_state;

pub use notification_manager::{FlashTask, NotificationManager};
pub use notification_state::{ALERT_CLASS, CLOSE_BUTTON_CLASS, Category, Notification};
