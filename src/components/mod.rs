// ABOUTME: UI components: screen renderers, the bottom-sheet picker, alert dialog and help overlay

pub mod account_ready;
pub mod alert_dialog;
pub mod carousel;
pub mod form_view;
pub mod help;
pub mod layout;
pub mod otp;
pub mod picker;
pub mod theme;

pub use account_ready::AccountReadyComponent;
pub use alert_dialog::AlertDialogComponent;
pub use carousel::CarouselComponent;
pub use form_view::FormComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use otp::OtpComponent;
pub use picker::{BottomSheetPicker, PickerComponent, PickerSpec};
