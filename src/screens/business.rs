// ABOUTME: Business classification screen: type, category, name and a cascading address
// Location pickers are driven by the shared LocationTable; choosing a parent clears every child

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{edit_text, FormInput, FormRow, FormView, ScreenCommand, ScreenController};
use crate::app::actions::{ActionOutcome, AsyncAction};
use crate::app::alert::AlertRequest;
use crate::app::router::{Route, RouteParams};
use crate::components::picker::PickerSpec;
use crate::forms::{
    FieldValue, FocusRing, LocationLevel, LocationSelection, LocationTable, RequiredForm, TextField,
    ValidationErrors, DEFAULT_COUNTRY,
};
use crate::models::{BusinessAddress, BusinessProfile, BusinessType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BusinessField {
    Type,
    Category,
    Name,
    LocationAlias,
    Location(LocationLevel),
    StreetAddress,
    PostalCode,
    Submit,
}

const ROWS: &[BusinessField] = &[
    BusinessField::Type,
    BusinessField::Category,
    BusinessField::Name,
    BusinessField::LocationAlias,
    BusinessField::Location(LocationLevel::Country),
    BusinessField::Location(LocationLevel::State),
    BusinessField::Location(LocationLevel::Lga),
    BusinessField::Location(LocationLevel::Town),
    BusinessField::StreetAddress,
    BusinessField::PostalCode,
    BusinessField::Submit,
];

#[derive(Debug, Clone)]
pub struct BusinessScreen {
    locations: Arc<LocationTable>,
    business_type: Option<BusinessType>,
    category: String,
    name: TextField,
    location_alias: TextField,
    address: LocationSelection,
    street_address: TextField,
    postal_code: TextField,
    focus: FocusRing,
    errors: ValidationErrors<BusinessField>,
    is_loading: bool,
}

impl BusinessScreen {
    pub fn new(locations: Arc<LocationTable>) -> Self {
        Self {
            locations,
            business_type: None,
            category: String::new(),
            name: TextField::new(),
            location_alias: TextField::new(),
            address: LocationSelection::with_country(DEFAULT_COUNTRY),
            street_address: TextField::new(),
            postal_code: TextField::new(),
            focus: FocusRing::new(),
            errors: ValidationErrors::new(),
            is_loading: false,
        }
    }

    pub fn focused(&self) -> BusinessField {
        ROWS[self.focus.index()]
    }

    pub fn focus(&mut self, field: BusinessField) {
        if let Some(index) = ROWS.iter().position(|f| *f == field) {
            self.focus.set(index);
        }
    }

    pub fn business_type(&self) -> Option<BusinessType> {
        self.business_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn address(&self) -> &LocationSelection {
        &self.address
    }

    pub fn select_type(&mut self, business_type: BusinessType) {
        if self.business_type != Some(business_type) {
            debug!("Business type set to {}", business_type);
            self.business_type = Some(business_type);
            self.category.clear();
        }
        self.errors.clear(BusinessField::Type);
    }

    fn cycle_type(&mut self, forward: bool) {
        let all = BusinessType::all();
        let next = match self.business_type.and_then(|t| all.iter().position(|a| *a == t)) {
            Some(i) if forward => (i + 1) % all.len(),
            Some(i) => (i + all.len() - 1) % all.len(),
            None => 0,
        };
        self.select_type(all[next]);
    }

    fn text_mut(&mut self, field: BusinessField) -> Option<&mut TextField> {
        match field {
            BusinessField::Name => Some(&mut self.name),
            BusinessField::LocationAlias => Some(&mut self.location_alias),
            BusinessField::StreetAddress => Some(&mut self.street_address),
            BusinessField::PostalCode => Some(&mut self.postal_code),
            _ => None,
        }
    }

    fn category_picker(&self) -> PickerSpec {
        let options = self.business_type.map_or(&[][..], |t| t.categories());
        PickerSpec::from_static("Business Category", options)
            .placeholder("Select category")
            .required(true)
            .disabled(self.business_type.is_none())
            .current(&self.category)
    }

    fn location_picker(&self, level: LocationLevel) -> PickerSpec {
        PickerSpec::new(level.label(), self.address.options(&self.locations, level).to_vec())
            .required(true)
            .disabled(self.address.is_disabled(level))
            .current(self.address.get(level))
    }

    fn profile(&self) -> Option<BusinessProfile> {
        let postal = self.postal_code.value().trim();
        Some(BusinessProfile {
            business_type: self.business_type?,
            category: self.category.clone(),
            name: self.name.value().trim().to_string(),
            location_alias: self.location_alias.value().trim().to_string(),
            address: BusinessAddress {
                country: self.address.get(LocationLevel::Country).to_string(),
                state: self.address.get(LocationLevel::State).to_string(),
                lga: self.address.get(LocationLevel::Lga).to_string(),
                town: self.address.get(LocationLevel::Town).to_string(),
                street_address: self.street_address.value().trim().to_string(),
                postal_code: (!postal.is_empty()).then(|| postal.to_string()),
            },
        })
    }

    fn submit(&mut self) -> ScreenCommand {
        if self.is_loading {
            return ScreenCommand::None;
        }
        if self.business_type.is_none() {
            self.errors.mark(BusinessField::Type);
            return ScreenCommand::Alert(AlertRequest::info(
                "Business Type Required",
                "Please select your business type (Pharmacy, Hospital, or Laboratory).",
            ));
        }
        if !self.validate() {
            return ScreenCommand::Alert(AlertRequest::info(
                "Incomplete Information",
                "Please fill in all required fields.",
            ));
        }
        let Some(profile) = self.profile() else {
            return ScreenCommand::None;
        };

        info!(business_type = %profile.business_type, "Registering business");
        self.is_loading = true;
        ScreenCommand::Spawn(AsyncAction::RegisterBusiness(profile))
    }

    fn activate(&mut self) -> ScreenCommand {
        match self.focused() {
            BusinessField::Type => {
                self.cycle_type(true);
                ScreenCommand::None
            }
            BusinessField::Category => ScreenCommand::OpenPicker(self.category_picker()),
            BusinessField::Location(level) => ScreenCommand::OpenPicker(self.location_picker(level)),
            BusinessField::Submit => self.submit(),
            _ => {
                self.focus.next(ROWS.len(), |_| true);
                ScreenCommand::None
            }
        }
    }

    pub fn view(&self) -> FormView {
        let err = |field| self.errors.contains(field);
        let labels: Vec<&str> = BusinessType::all().iter().map(BusinessType::label).collect();
        let selected = self
            .business_type
            .and_then(|t| BusinessType::all().iter().position(|a| *a == t));

        let mut view = FormView::new("Register your Business", "Business Classification")
            .row(
                FormRow::tabs("Business Type", &labels, selected)
                    .required()
                    .invalid(err(BusinessField::Type))
                    .hint("Left/Right to choose"),
            )
            .row(
                FormRow::picker("Business Category", &self.category, Some("Select category"))
                    .required()
                    .invalid(err(BusinessField::Category))
                    .disabled(self.business_type.is_none()),
            )
            .row(
                FormRow::text("Business Name", &self.name, "e.g. FaithMed Pharmacy")
                    .required()
                    .invalid(err(BusinessField::Name)),
            )
            .row(
                FormRow::text("Location Alias", &self.location_alias, "e.g. Lekki Branch / Head Office")
                    .required()
                    .invalid(err(BusinessField::LocationAlias)),
            );

        for level in LocationLevel::all() {
            view = view.row(
                FormRow::picker(level.label(), self.address.get(*level), None)
                    .required()
                    .invalid(err(BusinessField::Location(*level)))
                    .disabled(self.address.is_disabled(*level)),
            );
        }

        view.row(
            FormRow::text("Street Address", &self.street_address, "Enter street name")
                .required()
                .invalid(err(BusinessField::StreetAddress)),
        )
        .row(FormRow::text("Postal Code", &self.postal_code, "Enter postal code"))
        .row(FormRow::button("Continue", self.all_required_present(), self.is_loading))
        .focused(self.focus.index())
    }
}

impl RequiredForm for BusinessScreen {
    type Field = BusinessField;

    fn required_values(&self) -> Vec<(BusinessField, FieldValue<'_>)> {
        let level = |l| (BusinessField::Location(l), FieldValue::Text(self.address.get(l)));
        vec![
            (BusinessField::Type, FieldValue::Choice(self.business_type.map(|t| t.key()))),
            (BusinessField::Category, FieldValue::Text(&self.category)),
            (BusinessField::Name, FieldValue::Text(self.name.value())),
            (BusinessField::LocationAlias, FieldValue::Text(self.location_alias.value())),
            level(LocationLevel::Country),
            level(LocationLevel::State),
            level(LocationLevel::Lga),
            level(LocationLevel::Town),
            (BusinessField::StreetAddress, FieldValue::Text(self.street_address.value())),
        ]
    }

    fn errors(&self) -> &ValidationErrors<BusinessField> {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors<BusinessField> {
        &mut self.errors
    }
}

impl ScreenController for BusinessScreen {
    fn route(&self) -> Route {
        Route::BusinessClassification
    }

    fn handle_input(&mut self, input: FormInput) -> ScreenCommand {
        let field = self.focused();
        match (field, input) {
            (_, FormInput::FocusNext) => self.focus.next(ROWS.len(), |_| true),
            (_, FormInput::FocusPrev) => self.focus.prev(ROWS.len(), |_| true),
            (_, FormInput::Activate) => return self.activate(),
            (BusinessField::Type, FormInput::Right) => self.cycle_type(true),
            (BusinessField::Type, FormInput::Left) => self.cycle_type(false),
            (field, input) => {
                if let Some(text) = self.text_mut(field) {
                    if edit_text(text, &input) {
                        self.errors.clear(field);
                    }
                }
            }
        }
        ScreenCommand::None
    }

    fn on_picker_selected(&mut self, value: String) -> ScreenCommand {
        match self.focused() {
            BusinessField::Category => {
                let valid = self
                    .business_type
                    .is_some_and(|t| t.categories().contains(&value.as_str()));
                if valid {
                    self.category = value;
                    self.errors.clear(BusinessField::Category);
                } else {
                    warn!("Ignoring category {:?} for current business type", value);
                }
            }
            BusinessField::Location(level) => {
                match self.address.select(&self.locations, level, &value) {
                    Ok(()) => self.errors.clear(BusinessField::Location(level)),
                    Err(e) => warn!("Location selection rejected: {}", e),
                }
            }
            other => debug!("Picker value for non-picker row {:?} dropped", other),
        }
        ScreenCommand::None
    }

    fn on_outcome(&mut self, outcome: ActionOutcome) -> ScreenCommand {
        match outcome {
            ActionOutcome::BusinessRegistered(result) => {
                self.is_loading = false;
                match result {
                    Ok(()) => ScreenCommand::Navigate(Route::ContactPerson, RouteParams::new()),
                    Err(e) => ScreenCommand::Alert(AlertRequest::info("Error", &e.to_string())),
                }
            }
            other => {
                debug!("Business screen ignored outcome for {}", other.operation());
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
    use crate::screens::test_support::{alert_title, mount_context, type_text};
    use pretty_assertions::assert_eq;

    fn screen() -> BusinessScreen {
        BusinessScreen::new(mount_context().locations)
    }

    fn pick(screen: &mut BusinessScreen, field: BusinessField, value: &str) {
        screen.focus(field);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::OpenPicker(spec) => {
                assert!(spec.options.iter().any(|o| o == value), "{value} not offered");
            }
            other => panic!("expected picker, got {other:?}"),
        }
        screen.on_picker_selected(value.to_string());
    }

    fn type_into(screen: &mut BusinessScreen, field: BusinessField, text: &str) {
        screen.focus(field);
        type_text(screen, text);
    }

    fn fill_everything_but_type(screen: &mut BusinessScreen) {
        type_into(screen, BusinessField::Name, "FaithMed Pharmacy");
        type_into(screen, BusinessField::LocationAlias, "Head Office");
        pick(screen, BusinessField::Location(LocationLevel::State), "Lagos");
        pick(screen, BusinessField::Location(LocationLevel::Lga), "Ikeja");
        pick(screen, BusinessField::Location(LocationLevel::Town), "Allen");
        type_into(screen, BusinessField::StreetAddress, "12 Allen Avenue");
    }

    #[test]
    fn test_missing_type_reported_before_other_fields() {
        let mut screen = screen();
        fill_everything_but_type(&mut screen);
        screen.focus(BusinessField::Submit);
        let cmd = screen.handle_input(FormInput::Activate);
        assert_eq!(alert_title(&cmd), Some("Business Type Required"));
        assert!(screen.errors().contains(BusinessField::Type));
    }

    #[test]
    fn test_incomplete_information_after_type() {
        let mut screen = screen();
        screen.select_type(BusinessType::Hospital);
        screen.focus(BusinessField::Submit);
        let cmd = screen.handle_input(FormInput::Activate);
        assert_eq!(alert_title(&cmd), Some("Incomplete Information"));
        assert!(screen.errors().contains(BusinessField::Category));
        assert!(!screen.errors().contains(BusinessField::Location(LocationLevel::Country)));
    }

    #[test]
    fn test_changing_type_clears_category() {
        let mut screen = screen();
        screen.focus(BusinessField::Type);
        screen.handle_input(FormInput::Right);
        assert_eq!(screen.business_type(), Some(BusinessType::Pharmacy));
        pick(&mut screen, BusinessField::Category, "Online Pharmacy");
        assert_eq!(screen.category(), "Online Pharmacy");

        screen.focus(BusinessField::Type);
        screen.handle_input(FormInput::Right);
        assert_eq!(screen.business_type(), Some(BusinessType::Hospital));
        assert_eq!(screen.category(), "");
    }

    #[test]
    fn test_category_disabled_without_type() {
        let mut screen = screen();
        screen.focus(BusinessField::Category);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::OpenPicker(spec) => assert!(spec.disabled),
            other => panic!("expected picker, got {other:?}"),
        }
        assert!(screen.view().find("Business Category").is_some_and(|r| r.disabled));
    }

    #[test]
    fn test_new_country_clears_lower_levels() {
        let mut screen = screen();
        fill_everything_but_type(&mut screen);
        pick(&mut screen, BusinessField::Location(LocationLevel::Country), "Ghana");
        assert_eq!(screen.address().get(LocationLevel::State), "");
        assert_eq!(screen.address().get(LocationLevel::Lga), "");
        assert_eq!(screen.address().get(LocationLevel::Town), "");
        assert!(screen.view().find("LGA").is_some_and(|r| r.disabled));
    }

    #[test]
    fn test_valid_form_registers_profile() {
        let mut screen = screen();
        screen.select_type(BusinessType::Pharmacy);
        pick(&mut screen, BusinessField::Category, "Community Retail Pharmacy");
        fill_everything_but_type(&mut screen);
        assert!(screen.all_required_present());

        screen.focus(BusinessField::Submit);
        match screen.handle_input(FormInput::Activate) {
            ScreenCommand::Spawn(AsyncAction::RegisterBusiness(profile)) => {
                assert_eq!(profile.address.country, "Nigeria");
                assert_eq!(profile.address.town, "Allen");
                assert_eq!(profile.address.postal_code, None);
                assert_eq!(profile.name, "FaithMed Pharmacy");
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(
            screen.on_outcome(ActionOutcome::BusinessRegistered(Ok(()))),
            ScreenCommand::Navigate(Route::ContactPerson, RouteParams::new())
        );
    }
}
