pub mod approval;
pub mod views;

pub use approval::ApprovalService;
pub use views::QueryViews;
