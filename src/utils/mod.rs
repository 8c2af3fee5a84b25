pub mod ids;
pub mod latency;
pub mod slug;
pub mod time;
