pub mod invitation_ops;
pub mod guest_ops;
pub mod table_ops;
pub mod assignment_ops;
