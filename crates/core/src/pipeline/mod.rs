pub mod frame_analyzer;
pub mod overlay;
pub mod pipeline_logger;
pub mod watch_session_use_case;
