// ABOUTME: Contact person and delivery preferences screen

use tracing::{debug, info, warn};

use super::{edit_text, params, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::AlertRequest;
use crate::app::router::{Route, RouteParams};
use crate::components::picker::PickerSpec;
use crate::forms::{FieldValue, FocusRing, RequiredForm, TextField, ValidationErrors};
use crate::models::{CallingCode, ContactDetails, DeliveryFrequency, PaymentPreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    CallingCode,
    Phone,
    Frequency,
    Volume,
    Payment,
    Submit,
}

const ROWS: &[ContactField] = &[
    ContactField::FirstName,
    ContactField::LastName,
    ContactField::Email,
    ContactField::CallingCode,
    ContactField::Phone,
    ContactField::Frequency,
    ContactField::Volume,
    ContactField::Payment,
    ContactField::Submit,
];

#[derive(Debug, Clone)]
pub struct ContactPersonScreen {
    first_name: TextField,
    last_name: TextField,
    email: TextField,
    phone: TextField,
    calling_code: CallingCode,
    frequency: Option<DeliveryFrequency>,
    volume: String,
    payment: Option<PaymentPreference>,
    focus: FocusRing,
    errors: ValidationErrors<ContactField>,
    is_loading: bool,
}

impl ContactPersonScreen {
    pub fn new() -> Self {
        Self {
            first_name: TextField::new(),
            last_name: TextField::new(),
            email: TextField::new(),
            phone: TextField::new(),
            calling_code: CallingCode::default_code(),
            frequency: None,
            volume: String::new(),
            payment: None,
            focus: FocusRing::new(),
            errors: ValidationErrors::new(),
            is_loading: false,
        }
    }

    pub fn focused(&self) -> ContactField {
        ROWS[self.focus.index()]
    }

    pub fn focus(&mut self, field: ContactField) {
        if let Some(index) = ROWS.iter().position(|f| *f == field) {
            self.focus.set(index);
        }
    }

    pub fn frequency(&self) -> Option<DeliveryFrequency> {
        self.frequency
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    pub fn payment(&self) -> Option<PaymentPreference> {
        self.payment
    }

    fn text_mut(&mut self, field: ContactField) -> Option<&mut TextField> {
        match field {
            ContactField::FirstName => Some(&mut self.first_name),
            ContactField::LastName => Some(&mut self.last_name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Phone => Some(&mut self.phone),
            _ => None,
        }
    }

    fn picker_for(&self, field: ContactField) -> Option<PickerSpec> {
        let spec = match field {
            ContactField::CallingCode => PickerSpec::new(
                "Country Code",
                CallingCode::all().iter().map(CallingCode::option_label).collect(),
            )
            .current(&self.calling_code.option_label()),
            ContactField::Frequency => PickerSpec::new(
                "Delivery Frequency",
                DeliveryFrequency::all().iter().map(|f| f.label().to_string()).collect(),
            )
            .required(true)
            .current(self.frequency.map_or("", |f| f.label())),
            ContactField::Volume => {
                let options = self.frequency.map_or(&[][..], |f| f.volume_options());
                PickerSpec::from_static("Typical Delivery Volume", options)
                    .required(true)
                    .disabled(self.frequency.is_none())
                    .current(&self.volume)
            }
            ContactField::Payment => PickerSpec::new(
                "Preferred Payment Method",
                PaymentPreference::all().iter().map(|p| p.label().to_string()).collect(),
            )
            .required(true)
            .current(self.payment.map_or("", |p| p.label())),
            _ => return None,
        };
        Some(spec)
    }

    fn details(&self) -> Option<ContactDetails> {
        Some(ContactDetails {
            first_name: self.first_name.value().trim().to_string(),
            last_name: self.last_name.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            phone: self.calling_code.format_phone(self.phone.value()),
            delivery_frequency: self.frequency?,
            delivery_volume: self.volume.clone(),
            payment_preference: self.payment?,
        })
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        if !self.validate() {
            return ScreenCommand::Alert(AlertRequest::info(
                "Required Fields",
                "Please fill in all required information.",
            ));
        }
        let Some(details) = self.details() else {
            return ScreenCommand::None;
        };

        info!(frequency = %details.delivery_frequency, "Saving contact person");
        self.is_loading = true;
        ScreenCommand::Spawn(AsyncAction::SaveContactPerson(details))
    }

    fn forwarded_params(&self) -> RouteParams {
        RouteParams::new()
            .with(params::EMAIL, self.email.value().trim())
            .with(params::PHONE, &self.calling_code.format_phone(self.phone.value()))
            .with(params::FIRST_NAME, self.first_name.value().trim())
            .with(params::LAST_NAME, self.last_name.value().trim())
    }

    pub fn view(&self) -> FormView {
        let err = |field| self.errors.contains(field);
        FormView::new(
            "Contact Person & Preferences",
            "Tell us about your primary contact and how you'd like to work with us",
        )
        .row(FormRow::text("First Name", &self.first_name, "e.g. John").required().invalid(err(ContactField::FirstName)))
        .row(FormRow::text("Last Name", &self.last_name, "e.g. Doe").required().invalid(err(ContactField::LastName)))
        .row(
            FormRow::text("Email Address", &self.email, "e.g. contact@yourbusiness.com")
                .required()
                .invalid(err(ContactField::Email)),
        )
        .row(FormRow::picker("Country Code", &format!("+{}", self.calling_code.code), None))
        .row(FormRow::text("Phone Number", &self.phone, "701 234 5678").required().invalid(err(ContactField::Phone)))
        .row(
            FormRow::picker("Delivery Frequency", self.frequency.map_or("", |f| f.label()), None)
                .required()
                .invalid(err(ContactField::Frequency)),
        )
        .row(
            FormRow::picker("Typical Delivery Volume", &self.volume, None)
                .required()
                .invalid(err(ContactField::Volume))
                .disabled(self.frequency.is_none()),
        )
        .row(
            FormRow::picker("Preferred Payment Method", self.payment.map_or("", |p| p.label()), None)
                .required()
                .invalid(err(ContactField::Payment)),
        )
        .row(FormRow::button("Continue", self.all_required_present(), self.is_loading))
        .focused(self.focus.index())
    }
}

impl Default for ContactPersonScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RequiredForm for ContactPersonScreen {
    type Field = ContactField;

    fn required_values(&self) -> Vec<(ContactField, FieldValue<'_>)> {
        vec![
            (ContactField::FirstName, FieldValue::Text(self.first_name.value())),
            (ContactField::LastName, FieldValue::Text(self.last_name.value())),
            (ContactField::Email, FieldValue::Text(self.email.value())),
            (ContactField::Phone, FieldValue::Text(self.phone.value())),
            (ContactField::Frequency, FieldValue::Choice(self.frequency.map(|f| f.label()))),
            (ContactField::Volume, FieldValue::Text(&self.volume)),
            (ContactField::Payment, FieldValue::Choice(self.payment.map(|p| p.label()))),
        ]
    }

    fn errors(&self) -> &ValidationErrors<ContactField> {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors<ContactField> {
        &mut self.errors
    }
}

impl ScreenController for ContactPersonScreen {
    fn route(&self) -> Route {
        Route::ContactPerson
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        let field = self.focused();
        match input {
            FormInput::FocusNext => self.focus.next(ROWS.len(), |_| true),
            FormInput::FocusPrev => self.focus.prev(ROWS.len(), |_| true),
            FormInput::Activate => {
                if field == ContactField::Submit {
                    return self.submit();
                }
                if let Some(spec) = self.picker_for(field) {
                    return ScreenCommand::OpenPicker(spec);
                }
                self.focus.next(ROWS.len(), |_| true);
            }
            other => {
                if let Some(text) = self.text_mut(field) {
                    if edit_text(text, &other) {
                        self.errors.clear(field);
                    }
                }
            }
        }
        ScreenCommand::None
    }

    fn on_picker_selected(&mut self, value: String) -> ScreenCommand {
        let field = self.focused();
        match field {
            ContactField::CallingCode => {
                if let Some(code) = CallingCode::from_option_label(&value) {
                    self.calling_code = code;
                }
            }
            ContactField::Frequency => match DeliveryFrequency::from_label(&value) {
                Some(frequency) => {
                    if self.frequency != Some(frequency) {
                        self.volume.clear();
                    }
                    self.frequency = Some(frequency);
                    self.errors.clear(field);
                }
                None => warn!("Unknown delivery frequency {:?}", value),
            },
            ContactField::Volume => {
                let offered = self
                    .frequency
                    .is_some_and(|f| f.volume_options().contains(&value.as_str()));
                if offered {
                    self.volume = value;
                    self.errors.clear(field);
                } else {
                    warn!("Volume {:?} not offered for current frequency", value);
                }
            }
            ContactField::Payment => match PaymentPreference::from_label(&value) {
                Some(payment) => {
                    self.payment = Some(payment);
                    self.errors.clear(field);
                }
                None => warn!("Unknown payment preference {:?}", value),
            },
            other => debug!("Picker value for non-picker row {:?} dropped", other),
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::ContactSaved(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => ScreenCommand::Navigate(Route::AcceptTerms, self.forwarded_params()),
                    Err(e) => ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string())),
                }
            }
            other => {
                debug!("Contact person ignored outcome for {}", other.operation());
                ScreenCommand::None
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{alert_title, type_text};

    fn choose(screen: &mut ContactPersonScreen, field: ContactField, value: &str) {
        screen.focus(field);
        screen.on_picker_selected(value.to_string());
    }

    fn filled() -> ContactPersonScreen {
        let mut screen = ContactPersonScreen::new();
        type_text(&mut screen, "Ada");
        screen.focus(ContactField::LastName);
        type_text(&mut screen, "Obi");
        screen.focus(ContactField::Email);
        type_text(&mut screen, "ops@faithmed.ng");
        screen.focus(ContactField::Phone);
        type_text(&mut screen, "08031234567");
        choose(&mut screen, ContactField::Frequency, "Weekly");
        choose(&mut screen, ContactField::Volume, "20-50 deliveries per week");
        choose(&mut screen, ContactField::Payment, "Wallet System");
        screen
    }

    #[test]
    fn test_volume_locked_until_frequency_chosen() {
        let mut screen = ContactPersonScreen::new();
        screen.focus(ContactField::Volume);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::OpenPicker(spec) => {
                assert!(spec.disabled);
                assert!(spec.options.is_empty());
            }
            other => panic!("expected picker, got {other:?}"),
        }
    }

    #[test]
    fn test_new_frequency_clears_volume() {
        let mut screen = filled();
        assert_eq!(screen.volume(), "20-50 deliveries per week");
        choose(&mut screen, ContactField::Frequency, "Daily");
        assert_eq!(screen.volume(), "");

        screen.focus(ContactField::Volume);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::OpenPicker(spec) => assert_eq!(spec.options.len(), 3),
            other => panic!("expected picker, got {other:?}"),
        }
        // A weekly volume is not valid for daily deliveries
        screen.on_picker_selected("20-50 deliveries per week".to_string());
        assert_eq!(screen.volume(), "");
    }

    #[test]
    fn test_reselecting_same_frequency_keeps_volume() {
        let mut screen = filled();
        choose(&mut screen, ContactField::Frequency, "Weekly");
        assert_eq!(screen.volume(), "20-50 deliveries per week");
    }

    #[test]
    fn test_required_fields_alert() {
        let mut screen = ContactPersonScreen::new();
        screen.focus(ContactField::Submit);
        let cmd = screen.handle_input(FormInput::Activate);
        assert_eq!(alert_title(&cmd), Some("Required Fields"));
        assert_eq!(screen.errors().len(), 7);
    }

    #[test]
    fn test_saved_contact_forwards_identity() {
        let mut screen = filled();
        screen.focus(ContactField::Submit);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::Spawn(AsyncAction::SaveContactPerson(details)) => {
                assert_eq!(details.phone, "+2348031234567");
                assert_eq!(details.payment_preference, PaymentPreference::Wallet);
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        match screen.on_outcome(ActionOutcome::ContactSaved(Ok(()))) {
            ScreenCommand::Navigate(Route::AcceptTerms, params) => {
                assert_eq!(params.get("email").as_deref(), Some("ops@faithmed.ng"));
                assert_eq!(params.get("firstName").as_deref(), Some("Ada"));
                assert_eq!(params.len(), 4);
            }
            other => panic!("expected navigation, got {other:?}"),
        }
    }
}
