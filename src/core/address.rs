//! Creditor and debtor address cleaning and validation.

use super::charset::{clean_text, clipped};
use super::countries::is_known_country_code;
use super::error::{AddressField, AddressRole, MessageKey, ValidationMessage};
use super::types::{Address, AddressKind};

/// Maximum length of name, street and combined address lines.
pub const MAX_NAME_LENGTH: usize = 70;
/// Maximum length of house number and postal code.
pub const MAX_HOUSE_NO_LENGTH: usize = 16;
/// Maximum length of the town.
pub const MAX_TOWN_LENGTH: usize = 35;

fn max_length(field: AddressField) -> usize {
    match field {
        AddressField::HouseNo | AddressField::PostalCode => MAX_HOUSE_NO_LENGTH,
        AddressField::Town => MAX_TOWN_LENGTH,
        _ => MAX_NAME_LENGTH,
    }
}

/// Clean and validate an address in the given role.
///
/// Returns the cleaned address (`None` if every field is blank) and the
/// messages found, in this order: character and length cleaning per field,
/// shape conflicts, missing mandatory fields, invalid country code.
///
/// A blank debtor is valid (the debtor is optional). A blank creditor
/// reports each mandatory field as missing.
pub fn validate_address(
    address: &Address,
    role: AddressRole,
) -> (Option<Address>, Vec<ValidationMessage>) {
    let mut messages = Vec::new();
    let mut clean = |value: &Option<String>, sub: AddressField| {
        clean_field(value.as_deref(), role, sub, &mut messages)
    };

    let cleaned = Address {
        name: clean(&address.name, AddressField::Name),
        address_line1: clean(&address.address_line1, AddressField::AddressLine1),
        address_line2: clean(&address.address_line2, AddressField::AddressLine2),
        street: clean(&address.street, AddressField::Street),
        house_no: clean(&address.house_no, AddressField::HouseNo),
        postal_code: clean(&address.postal_code, AddressField::PostalCode),
        town: clean(&address.town, AddressField::Town),
        country_code: address
            .country_code
            .as_deref()
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty()),
    };

    if cleaned.is_empty() && role == AddressRole::Debtor {
        return (None, messages);
    }

    let kind = cleaned.kind();
    if kind == AddressKind::Conflicting {
        let shape_fields = [
            (AddressField::AddressLine1, &cleaned.address_line1),
            (AddressField::AddressLine2, &cleaned.address_line2),
            (AddressField::Street, &cleaned.street),
            (AddressField::HouseNo, &cleaned.house_no),
            (AddressField::PostalCode, &cleaned.postal_code),
            (AddressField::Town, &cleaned.town),
        ];
        for (sub, value) in shape_fields {
            if value.is_some() {
                messages.push(ValidationMessage::error(
                    role.field(sub),
                    MessageKey::AddressTypeConflict,
                ));
            }
        }
    }

    let mut mandatory = vec![(AddressField::Name, &cleaned.name)];
    match kind {
        AddressKind::Structured | AddressKind::Undetermined => {
            mandatory.push((AddressField::PostalCode, &cleaned.postal_code));
            mandatory.push((AddressField::Town, &cleaned.town));
        }
        AddressKind::Combined => {
            mandatory.push((AddressField::AddressLine2, &cleaned.address_line2));
        }
        AddressKind::Conflicting => {}
    }
    mandatory.push((AddressField::CountryCode, &cleaned.country_code));
    for (sub, value) in mandatory {
        if value.is_none() {
            messages.push(ValidationMessage::error(
                role.field(sub),
                MessageKey::FieldValueMissing,
            ));
        }
    }

    if let Some(code) = &cleaned.country_code {
        if !is_known_country_code(code) {
            messages.push(
                ValidationMessage::error(
                    role.field(AddressField::CountryCode),
                    MessageKey::CountryCodeInvalid,
                )
                .with_param(code),
            );
        }
    }

    (Some(cleaned), messages)
}

/// Clean one text subfield: whitespace, character set, maximum length.
/// Blank values become `None`.
fn clean_field(
    value: Option<&str>,
    role: AddressRole,
    sub: AddressField,
    messages: &mut Vec<ValidationMessage>,
) -> Option<String> {
    let cleaned = clean_text(value?);
    let field = role.field(sub);

    if cleaned.replaced {
        messages.push(ValidationMessage::warning(
            field,
            MessageKey::ReplacedUnsupportedCharacters,
        ));
    }
    if !cleaned.unsupported.is_empty() {
        let chars: String = cleaned.unsupported.iter().collect();
        messages.push(
            ValidationMessage::error(field, MessageKey::UnsupportedCharacters).with_param(chars),
        );
    }

    let max = max_length(sub);
    let text = match clipped(&cleaned.value, max) {
        Some(short) => {
            messages.push(
                ValidationMessage::warning(field, MessageKey::FieldValueClipped).with_param(max),
            );
            short
        }
        None => cleaned.value,
    };

    (!text.is_empty()).then_some(text)
}
