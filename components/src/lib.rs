mod button;
mod card;
pub mod currency_input_panel;
mod loading_modal;
mod spinner;
mod text;
mod theme_provider;
pub mod transaction_settings;

pub use button::{Button, ButtonVariant};
pub use card::{Card, CardVariant};
pub use currency_input_panel::CurrencyInputPanel;
pub use loading_modal::LoadingModal;
pub use spinner::{Dots, Spinner};
pub use text::{Text, TextKind};
pub use theme_provider::ThemeProvider;
pub use transaction_settings::TransactionSettings;
