pub use calculator::{
    average_inter_arrival_time, average_target_distance, filter_by_type, hit_rate,
    realtime_snapshot, session_statistics,
};
pub use models::{RealtimeSnapshot, SessionMetrics, SessionStatistics};

mod calculator;
pub mod models;
