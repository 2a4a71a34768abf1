pub mod models;
pub mod services;

pub use models::*;
pub use services::scheduler::{
    classify, ChannelSink, LogSink, NotificationSink, ReminderConfig, ReminderScheduler,
    SchedulerHandle,
};
pub use services::seen_set::SeenSetStore;
