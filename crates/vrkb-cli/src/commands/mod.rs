pub mod config_ops;
pub mod convert_ops;
pub mod layout_ops;
pub mod memo_ops;
pub mod replay_ops;
