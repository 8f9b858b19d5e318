pub mod confirm_prompt;
pub mod dashboard;
pub mod entity_form;
pub mod entity_list;
pub mod loading;
pub mod sidebar;
pub mod status_bar;
pub mod text_input;

pub use crate::dispatch::Component;

pub use confirm_prompt::{centered_rect, ConfirmPrompt, ConfirmPromptProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use entity_form::{EntityForm, EntityFormProps};
pub use entity_list::{EntityList, EntityListProps};
pub use loading::{LoadingPanel, LoadingPanelProps};
pub use sidebar::{Sidebar, SidebarProps};
pub use status_bar::{StatusBar, StatusBarProps, SPINNERS};
pub use text_input::{TextInput, TextInputProps};
