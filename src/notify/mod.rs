pub mod calendar;
pub mod email;

pub use calendar::{
    quick_add_links, render_feed, render_setup_guide, CalendarConfig, QuickAddLink,
    REMINDER_OFFSETS,
};
pub use email::{
    dispatch, overdue_alert_email, renewal_alert_email, weekly_report_email, AlertTransport,
    DispatchSummary, InMemoryTransport, LoggingTransport, MessagePriority, OutboundEmail,
    TransportError,
};
