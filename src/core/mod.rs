pub mod action_item;
pub mod preferences;
pub mod task_list;
pub mod template;
