pub mod dispatch;
pub mod reporter;
