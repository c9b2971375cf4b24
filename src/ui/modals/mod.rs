pub mod olympiad_form;
pub mod confirm_dialog;
pub mod participante_form;
pub mod school_config;
pub mod config_modal;
pub mod lembretes_modal;
pub mod search_modal;
pub mod pin_verify;

pub use olympiad_form::OlympiadFormModal;
pub use confirm_dialog::ConfirmDialog;
pub use participante_form::ParticipanteFormModal;
pub use school_config::SchoolConfigModal;
pub use config_modal::ConfigModal;
pub use lembretes_modal::{LembreteAlerta, LembretesModal};
pub use search_modal::SearchModal;
pub use pin_verify::PinVerifyModal;
