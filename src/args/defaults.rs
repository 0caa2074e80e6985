pub(crate) const DEFAULT_RESOLVER: &str = "127.0.0.1:53";
pub(crate) const DEFAULT_DNS_PORT: u16 = 53;
pub(crate) const DEFAULT_CONCURRENCY: usize = 50;
pub(crate) const DEFAULT_BATCH_SIZE: usize = 5;
pub(crate) const DEFAULT_DISPLAY_INTERVAL_MS: u64 = 1_000;
