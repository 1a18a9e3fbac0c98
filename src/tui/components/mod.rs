// Components module - UI building blocks for the card screen
//
// - Profile card: avatar, name, links, copy-email button
// - Contact form: fields, send button, confirmation panel
// - Logs panel: captured log entries
// - Status bar: key hints
// - Help and toast overlays

pub mod contact_form;
pub mod help;
pub mod logs_panel;
pub mod profile_card;
pub mod status_bar;
pub mod toast;

pub use toast::Toast;
