mod task;

pub use task::{
    DATE_FORMAT, DEFAULT_PRIORITY, TIMESTAMP_FORMAT, Task, current_timestamp, generate_id, parse_date,
};
