//!
//! All roles used within application
//!

use strum::AsRefStr;

#[derive(AsRefStr)]
pub enum Role {
    /// Booking, review and messaging services that create notifications for users
    #[strum(serialize = "care_notifier_produce_notifications")]
    ProduceNotifications,
}
