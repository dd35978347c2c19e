//! Field-level validation of a submitted order form.
//!
//! Every rule is evaluated, so a customer sees all corrections at once
//! instead of fixing one field per round trip. Errors come back in form
//! order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pricing::TaxTable;
use crate::types::{DeliveryTier, ProvinceCode, Quantity, TaxRate};

/// `111-111-1111` or ten bare digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{3}-[0-9]{3}-[0-9]{4}|[0-9]{10})$").expect("Invalid regex")
});

/// Canadian postal code, `A1A 1A1` with the space optional.
static POSTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9][A-Z] ?[0-9][A-Z][0-9]$").expect("Invalid regex"));

/// Raw form fields exactly as posted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postcode: String,
    pub pot_small: String,
    pub pot_medium: String,
    pub pot_big: String,
    pub delivery_time: String,
}

impl OrderSubmission {
    /// Build a submission from decoded form pairs.
    ///
    /// The first value of a repeated field wins and unknown fields are
    /// ignored, so any urlencoded body reaches validation.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        let mut seen = [false; OrderField::ALL.len()];
        for (key, value) in pairs {
            let Some(field) = OrderField::from_form_name(key.as_ref()) else {
                continue;
            };
            let slot = field as usize;
            if let Some(seen) = seen.get_mut(slot)
                && !*seen
            {
                *seen = true;
                *submission.field_mut(field) = value.into();
            }
        }
        submission
    }

    fn field_mut(&mut self, field: OrderField) -> &mut String {
        match field {
            OrderField::Name => &mut self.name,
            OrderField::Email => &mut self.email,
            OrderField::Phone => &mut self.phone,
            OrderField::Address => &mut self.address,
            OrderField::City => &mut self.city,
            OrderField::Postcode => &mut self.postcode,
            OrderField::Province => &mut self.province,
            OrderField::PotSmall => &mut self.pot_small,
            OrderField::PotMedium => &mut self.pot_medium,
            OrderField::PotBig => &mut self.pot_big,
            OrderField::DeliveryTime => &mut self.delivery_time,
        }
    }
}

/// A field on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderField {
    Name,
    Email,
    Phone,
    Address,
    City,
    Postcode,
    Province,
    PotSmall,
    PotMedium,
    PotBig,
    DeliveryTime,
}

impl OrderField {
    /// Every field, in form order.
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::Postcode,
        Self::Province,
        Self::PotSmall,
        Self::PotMedium,
        Self::PotBig,
        Self::DeliveryTime,
    ];

    /// The form input name for this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::Postcode => "postcode",
            Self::Province => "province",
            Self::PotSmall => "potSmall",
            Self::PotMedium => "potMedium",
            Self::PotBig => "potBig",
            Self::DeliveryTime => "deliveryTime",
        }
    }

    /// Look up a field by its form input name.
    #[must_use]
    pub fn from_form_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: OrderField,
    pub message: &'static str,
}

/// All failed rules for one submission, in form order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Iterate over the errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for errors returned by [`validate`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages reported against `field`.
    pub fn for_field(&self, field: OrderField) -> impl Iterator<Item = &'static str> + '_ {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A submission that passed every rule, with the tax rate for its
/// province already resolved. Only [`validate`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) address: String,
    pub(crate) city: String,
    pub(crate) province: ProvinceCode,
    pub(crate) tax_rate: TaxRate,
    pub(crate) postcode: String,
    pub(crate) pot_small: Quantity,
    pub(crate) pot_medium: Quantity,
    pub(crate) pot_big: Quantity,
    pub(crate) delivery_tier: DeliveryTier,
}

type Checked<T> = Result<T, FieldError>;

fn check<T, E>(field: OrderField, result: Result<T, E>, message: &'static str) -> Checked<T> {
    result.map_err(|_| FieldError { field, message })
}

fn required(field: OrderField, raw: &str, message: &'static str) -> Checked<String> {
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        Err(())
    } else {
        Ok(trimmed.to_owned())
    };
    check(field, value, message)
}

fn pattern(field: OrderField, raw: &str, re: &Regex, message: &'static str) -> Checked<String> {
    let trimmed = raw.trim();
    let value = if re.is_match(trimmed) {
        Ok(trimmed.to_owned())
    } else {
        Err(())
    };
    check(field, value, message)
}

/// Province code plus the tax rate it resolves to.
fn province(raw: &str, tax_rates: &TaxTable) -> Checked<(ProvinceCode, TaxRate)> {
    let code = check(
        OrderField::Province,
        ProvinceCode::parse(raw.trim()),
        "Province is required",
    )?;
    let rate = check(
        OrderField::Province,
        tax_rates.rate_for(code).ok_or(()),
        "Province must be a Canadian province or territory",
    )?;
    Ok((code, rate))
}

/// Small, medium, and big quantities. Each unparsable field gets its own
/// error; the zero-total rule only applies once all three parse.
fn pots(submission: &OrderSubmission) -> Result<[Quantity; 3], Vec<FieldError>> {
    const MESSAGE: &str = "Pots purchased can be positive integers only";

    let parsed = [
        (OrderField::PotSmall, &submission.pot_small),
        (OrderField::PotMedium, &submission.pot_medium),
        (OrderField::PotBig, &submission.pot_big),
    ]
    .map(|(field, raw)| check(field, Quantity::parse(raw), MESSAGE));

    match parsed {
        [Ok(small), Ok(medium), Ok(big)] => {
            if small.is_zero() && medium.is_zero() && big.is_zero() {
                Err(vec![FieldError {
                    field: OrderField::PotSmall,
                    message: "At least one pot must be purchased",
                }])
            } else {
                Ok([small, medium, big])
            }
        }
        parsed => Err(parsed.into_iter().filter_map(Result::err).collect()),
    }
}

/// Check every rule against `submission`.
///
/// # Errors
///
/// Returns every failing field, in form order, when any rule fails.
pub fn validate(
    submission: &OrderSubmission,
    tax_rates: &TaxTable,
) -> Result<ValidatedOrder, ValidationErrors> {
    let name = required(OrderField::Name, &submission.name, "Name is required");
    let email = required(OrderField::Email, &submission.email, "Email is required");
    let phone = pattern(
        OrderField::Phone,
        &submission.phone,
        &PHONE_RE,
        "Phone must be formatted as xxx-xxx-xxxx",
    );
    let address = required(OrderField::Address, &submission.address, "Address is required");
    let city = required(OrderField::City, &submission.city, "City is required");
    let postcode = pattern(
        OrderField::Postcode,
        &submission.postcode,
        &POSTCODE_RE,
        "Postal Code must be formatted as A2A 2A2",
    );
    let province = province(&submission.province, tax_rates);
    let pots = pots(submission);
    let delivery_tier = check(
        OrderField::DeliveryTime,
        DeliveryTier::parse(submission.delivery_time.trim()),
        "Delivery Time must be a number",
    );

    match (name, email, phone, address, city, postcode, province, pots, delivery_tier) {
        (
            Ok(name),
            Ok(email),
            Ok(phone),
            Ok(address),
            Ok(city),
            Ok(postcode),
            Ok((province, tax_rate)),
            Ok([pot_small, pot_medium, pot_big]),
            Ok(delivery_tier),
        ) => Ok(ValidatedOrder {
            name,
            email,
            phone,
            address,
            city,
            province,
            tax_rate,
            postcode,
            pot_small,
            pot_medium,
            pot_big,
            delivery_tier,
        }),
        // At least one component failed, and every failure carries an error.
        (name, email, phone, address, city, postcode, province, pots, delivery_tier) => {
            let mut errors: Vec<FieldError> = [name, email, phone, address, city, postcode]
                .into_iter()
                .filter_map(Result::err)
                .collect();
            errors.extend(province.err());
            errors.extend(pots.err().into_iter().flatten());
            errors.extend(delivery_tier.err());
            Err(ValidationErrors(errors))
        }
    }
}
