/// Counters about publisher usage, for monitoring.
#[derive(Debug, Default, Clone)]
pub struct PublisherStats {
    /// Subscribe calls that resulted in a registered (or replaced) binding.
    pub subscriptions: u64,
    /// Trigger calls that found at least one subscriber.
    pub events_triggered: u64,
    /// Triggered events at least one subscriber reported handling.
    pub events_handled: u64,
    /// Individual deliveries attempted across all triggers.
    pub deliveries: u64,
    /// Full registry resets (component class reloads).
    pub resets: u64,
}
