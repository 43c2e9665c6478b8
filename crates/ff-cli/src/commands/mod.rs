pub mod analyze;
pub mod dispatch;
pub mod event;
pub mod export;
pub mod kb_search;
pub mod metrics;
pub mod plan;
pub mod qa;
pub mod run;
pub mod safety;
pub mod session;
pub mod shared;
pub mod similar;
pub mod work_order;
