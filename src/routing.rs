//! Routing-slot resolution.
//!
//! Payout routing identifiers are mutually exclusive on the wire: whichever
//! one wins is written to the generic `account_routing_type1/value1` slot, and
//! Canadian EFT and Japanese Zengin payouts also fill slot 2. The winner is
//! the first row of [`ROUTING_PRIORITY`] whose flag has a value.

use std::fmt;

use tracing::debug;

use crate::field_registry::*;
use crate::overrides::OverrideMap;
use crate::request_error::RequestError;
use crate::request_tree::FlatFieldMap;

/// One row of the priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingRule {
    pub flag: &'static str,
    pub routing_type: &'static str,
}

const fn row(flag: &'static str, routing_type: &'static str) -> RoutingRule {
    RoutingRule { flag, routing_type }
}

/// Slot-1 candidates, highest priority first.
pub const ROUTING_PRIORITY: &[RoutingRule] = &[
    row(FLAG_ROUTING_NUMBER, "aba"),
    row(FLAG_SORT_CODE, "sort_code"),
    row(FLAG_BSB, "bsb"),
    row(FLAG_IFSC, "ifsc"),
    row(FLAG_BANK_CODE, "bank_code"),
    row(FLAG_EMAIL, "email_address"),
    row(FLAG_PHONE, "phone_number"),
    row(FLAG_INSTITUTION_NUMBER, "institution_number"),
    row(FLAG_ZENGIN_BANK_CODE, "bank_code"),
    row(FLAG_CNAPS, "cnaps"),
    row(FLAG_KOREA_BANK_CODE, "bank_code"),
    row(FLAG_NRIC, "personal_id_number"),
    row(FLAG_UEN, "business_registration_number"),
    row(FLAG_PAYNOW_VPA, "virtual_payment_address"),
    row(FLAG_SG_BANK_CODE, "bank_code"),
    row(FLAG_CLEARING_NUMBER, "clearing_number"),
    row(FLAG_HK_BANK_CODE, "bank_code"),
    row(FLAG_FPS_ID, "fps_identifier"),
    row(FLAG_HKID, "personal_id_number"),
    row(FLAG_PAYID_PHONE, "phone_number"),
    row(FLAG_PAYID_EMAIL, "email_address"),
    row(FLAG_PAYID_ABN, "australian_business_number"),
];

/// Slot-2 companions: when `primary` wins slot 1, `secondary` fills slot 2.
pub const SECONDARY_SLOTS: &[(&str, RoutingRule)] = &[
    (FLAG_INSTITUTION_NUMBER, row(FLAG_TRANSIT_NUMBER, "transit_number")),
    (FLAG_ZENGIN_BANK_CODE, row(FLAG_ZENGIN_BRANCH_CODE, "branch_code")),
];

/// `(present, required)`: supplying the first flag requires the second.
pub const PAIRED_FLAGS: &[(&str, &str)] = &[
    (FLAG_INSTITUTION_NUMBER, FLAG_TRANSIT_NUMBER),
    (FLAG_ZENGIN_BANK_CODE, FLAG_ZENGIN_BRANCH_CODE),
    (FLAG_ZENGIN_BRANCH_CODE, FLAG_ZENGIN_BANK_CODE),
];

/// Independent bank identifiers written straight into the request.
pub const DIRECT_ROUTING_FLAGS: &[&str] = &[FLAG_SWIFT_CODE, FLAG_IBAN, FLAG_CLABE];

/// A `(type, value)` pair destined for one routing slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    pub routing_type: String,
    pub value: String,
    pub flag: &'static str,
}

impl fmt::Display for SlotAssignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={} (--{})", self.routing_type, self.value, self.flag)
    }
}

/// Outcome of resolution. `secondary` is only set alongside a primary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingDecision {
    pub primary: Option<SlotAssignment>,
    pub secondary: Option<SlotAssignment>,
}

/// Pick the slot assignments for the supplied flags.
pub fn resolve(values: &FlagValues) -> RoutingDecision {
    let winner = ROUTING_PRIORITY
        .iter()
        .find_map(|rule| values.get(rule.flag).map(|value| assign(rule, value)));

    let secondary = winner.as_ref().and_then(|primary| {
        SECONDARY_SLOTS
            .iter()
            .find(|(flag, _)| *flag == primary.flag)
            .and_then(|(_, rule)| values.get(rule.flag).map(|value| assign(rule, value)))
    });

    RoutingDecision {
        primary: winner,
        secondary,
    }
}

fn assign(rule: &RoutingRule, value: &str) -> SlotAssignment {
    SlotAssignment {
        routing_type: rule.routing_type.to_string(),
        value: value.to_string(),
        flag: rule.flag,
    }
}

/// Enforce flags that are only meaningful together.
pub fn check_paired_flags(values: &FlagValues) -> Result<(), RequestError> {
    for (present, required) in PAIRED_FLAGS {
        if values.has(present) && !values.has(required) {
            return Err(RequestError::user_input(format!(
                "--{} is required when --{} is provided",
                required, present
            )));
        }
    }
    Ok(())
}

/// True when any flag that can route a payout was supplied. Slot-2
/// companions never route on their own.
pub fn has_routing_method(values: &FlagValues) -> bool {
    DIRECT_ROUTING_FLAGS.iter().any(|flag| values.has(flag))
        || ROUTING_PRIORITY.iter().any(|rule| values.has(rule.flag))
}

/// Creation needs at least one routing identifier, either as a flag or as a
/// raw override on a routing path.
pub fn require_routing_method(
    values: &FlagValues,
    overrides: &OverrideMap,
) -> Result<(), RequestError> {
    if has_routing_method(values) || overrides.touches_routing() {
        Ok(())
    } else {
        Err(RequestError::user_input(format!(
            "must provide at least one routing method (e.g. --{}, --{}, --{}, --{}) or a --field override on {}*",
            FLAG_SWIFT_CODE, FLAG_IBAN, FLAG_ROUTING_NUMBER, FLAG_SORT_CODE, ROUTING_FIELD_PREFIX
        )))
    }
}

/// Write the decision into the flat map. Slots with a raw override are left
/// to the override.
pub fn apply(decision: &RoutingDecision, overrides: &OverrideMap, flat: &mut FlatFieldMap) {
    if let Some(primary) = &decision.primary {
        if overrides.overrides_slot(1) {
            debug!("Routing slot 1 overridden by --field, ignoring {}", primary);
        } else {
            debug!("Routing slot 1: {}", primary);
            flat.insert(PATH_ROUTING_TYPE_1, primary.routing_type.clone());
            flat.insert(PATH_ROUTING_VALUE_1, primary.value.clone());
        }
    }
    if let Some(secondary) = &decision.secondary {
        if overrides.overrides_slot(2) {
            debug!("Routing slot 2 overridden by --field, ignoring {}", secondary);
        } else {
            debug!("Routing slot 2: {}", secondary);
            flat.insert(PATH_ROUTING_TYPE_2, secondary.routing_type.clone());
            flat.insert(PATH_ROUTING_VALUE_2, secondary.value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::parse_field_overrides;

    fn values(pairs: &[(&str, &str)]) -> FlagValues {
        pairs.iter().map(|(f, v)| (*f, *v)).collect()
    }

    #[test]
    fn test_canada_eft_fills_both_slots() {
        let decision = resolve(&values(&[
            (FLAG_ENTITY_TYPE, "PERSONAL"),
            (FLAG_BANK_COUNTRY, "CA"),
            (FLAG_INSTITUTION_NUMBER, "001"),
            (FLAG_TRANSIT_NUMBER, "12345"),
        ]));
        let primary = decision.primary.unwrap();
        let secondary = decision.secondary.unwrap();
        assert_eq!((primary.routing_type.as_str(), primary.value.as_str()), ("institution_number", "001"));
        assert_eq!((secondary.routing_type.as_str(), secondary.value.as_str()), ("transit_number", "12345"));
    }

    #[test]
    fn test_institution_requires_transit() {
        let err = check_paired_flags(&values(&[(FLAG_INSTITUTION_NUMBER, "001")])).unwrap_err();
        assert_eq!(err.to_string(), "--transit-number is required when --institution-number is provided");
        assert!(check_paired_flags(&values(&[(FLAG_TRANSIT_NUMBER, "12345")])).is_ok());
    }

    #[test]
    fn test_zengin_requires_both() {
        let err = check_paired_flags(&values(&[(FLAG_ZENGIN_BANK_CODE, "0001")])).unwrap_err();
        assert_eq!(err.to_string(), "--zengin-branch-code is required when --zengin-bank-code is provided");
        let err = check_paired_flags(&values(&[(FLAG_ZENGIN_BRANCH_CODE, "123")])).unwrap_err();
        assert_eq!(err.to_string(), "--zengin-bank-code is required when --zengin-branch-code is provided");

        let decision = resolve(&values(&[
            (FLAG_ZENGIN_BANK_CODE, "0001"),
            (FLAG_ZENGIN_BRANCH_CODE, "123"),
        ]));
        assert_eq!(decision.primary.unwrap().routing_type, "bank_code");
        assert_eq!(decision.secondary.unwrap().routing_type, "branch_code");
    }

    #[test]
    fn test_every_pair_picks_higher_priority() {
        for (i, high) in ROUTING_PRIORITY.iter().enumerate() {
            for low in &ROUTING_PRIORITY[i + 1..] {
                let decision = resolve(&values(&[(high.flag, "1"), (low.flag, "2")]));
                let primary = decision.primary.unwrap();
                assert_eq!(primary.flag, high.flag, "{} vs {}", high.flag, low.flag);
                assert_eq!(primary.value, "1");
            }
        }
    }

    #[test]
    fn test_all_flags_present_picks_first_row() {
        let all: Vec<(&str, &str)> = ROUTING_PRIORITY.iter().map(|r| (r.flag, "v")).collect();
        let decision = resolve(&values(&all));
        assert_eq!(decision.primary.unwrap().flag, FLAG_ROUTING_NUMBER);
        assert!(decision.secondary.is_none());
    }

    #[test]
    fn test_secondary_only_follows_its_primary() {
        let decision = resolve(&values(&[
            (FLAG_SORT_CODE, "123456"),
            (FLAG_INSTITUTION_NUMBER, "001"),
            (FLAG_TRANSIT_NUMBER, "12345"),
        ]));
        assert_eq!(decision.primary.unwrap().routing_type, "sort_code");
        assert!(decision.secondary.is_none());
    }

    #[test]
    fn test_swift_and_iban_are_not_slot_candidates() {
        let decision = resolve(&values(&[(FLAG_SWIFT_CODE, "X"), (FLAG_IBAN, "GB00")]));
        assert_eq!(decision, RoutingDecision::default());
        assert!(has_routing_method(&values(&[(FLAG_SWIFT_CODE, "X")])));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let decision = resolve(&values(&[(FLAG_ROUTING_NUMBER, ""), (FLAG_BSB, "062000")]));
        assert_eq!(decision.primary.unwrap().routing_type, "bsb");
    }

    #[test]
    fn test_routing_method_required() {
        let none = parse_field_overrides::<String>(&[]).unwrap();
        let err = require_routing_method(&values(&[(FLAG_ACCOUNT_NAME, "x")]), &none).unwrap_err();
        assert!(err.to_string().starts_with("must provide at least one routing method"));

        let overrides =
            parse_field_overrides(&["beneficiary.bank_details.account_routing_value1=1".to_string()]).unwrap();
        assert!(require_routing_method(&FlagValues::new(), &overrides).is_ok());
    }

    #[test]
    fn test_secondary_flag_alone_is_not_a_routing_method() {
        assert!(!has_routing_method(&values(&[(FLAG_TRANSIT_NUMBER, "12345")])));
        assert!(!has_routing_method(&values(&[(FLAG_ZENGIN_BRANCH_CODE, "001")])));
    }

    #[test]
    fn test_apply_respects_slot_overrides() {
        let decision = resolve(&values(&[
            (FLAG_INSTITUTION_NUMBER, "001"),
            (FLAG_TRANSIT_NUMBER, "12345"),
        ]));
        let overrides =
            parse_field_overrides(&["beneficiary.bank_details.account_routing_value1=OVERRIDE".to_string()])
                .unwrap();
        let mut flat = FlatFieldMap::new();
        apply(&decision, &overrides, &mut flat);
        assert!(flat.get(PATH_ROUTING_TYPE_1).is_none());
        assert!(flat.get(PATH_ROUTING_VALUE_1).is_none());
        assert_eq!(flat.get(PATH_ROUTING_TYPE_2), Some("transit_number"));
        assert_eq!(flat.get(PATH_ROUTING_VALUE_2), Some("12345"));
    }

    #[test]
    fn test_priority_table_matches_registry() {
        let registry = FlagRegistry::beneficiary();
        for rule in ROUTING_PRIORITY.iter().chain(SECONDARY_SLOTS.iter().map(|(_, r)| r)) {
            let mapping = registry.lookup(rule.flag).unwrap();
            assert_eq!(mapping.routing_type, Some(rule.routing_type), "{}", rule.flag);
        }
    }
}
