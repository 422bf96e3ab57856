//! Flag-to-path registry for request building.
//!
//! Every request flag accepted by `beneficiary create`, `beneficiary update`
//! and `transfer create` is declared here exactly once, together with the
//! dot-delimited path it populates in the request body. Flags carrying a
//! routing type are not written directly; the routing resolver decides which
//! of them lands in the generic routing slots.

use std::collections::BTreeMap;

pub const BANK_DETAILS_PREFIX: &str = "beneficiary.bank_details.";
pub const ROUTING_FIELD_PREFIX: &str = "beneficiary.bank_details.account_routing_";

pub const PATH_ROUTING_TYPE_1: &str = "beneficiary.bank_details.account_routing_type1";
pub const PATH_ROUTING_VALUE_1: &str = "beneficiary.bank_details.account_routing_value1";
pub const PATH_ROUTING_TYPE_2: &str = "beneficiary.bank_details.account_routing_type2";
pub const PATH_ROUTING_VALUE_2: &str = "beneficiary.bank_details.account_routing_value2";

pub const PATH_SWIFT_CODE: &str = "beneficiary.bank_details.swift_code";
pub const PATH_IBAN: &str = "beneficiary.bank_details.iban";
pub const PATH_CLABE: &str = "beneficiary.bank_details.clabe";
pub const PATH_BANK_CODE: &str = "beneficiary.bank_details.bank_code";
pub const PATH_BRANCH_CODE: &str = "beneficiary.bank_details.branch_code";
pub const PATH_BANK_BRANCH: &str = "beneficiary.bank_details.bank_branch";

pub const PATH_ENTITY_TYPE: &str = "beneficiary.entity_type";
pub const PATH_BANK_COUNTRY: &str = "beneficiary.bank_details.bank_country_code";
pub const PATH_ACCOUNT_CURRENCY: &str = "beneficiary.bank_details.account_currency";
pub const PATH_TRANSFER_METHODS: &str = "transfer_methods";

// Beneficiary flags
pub const FLAG_ENTITY_TYPE: &str = "entity-type";
pub const FLAG_BANK_COUNTRY: &str = "bank-country";
pub const FLAG_ACCOUNT_CURRENCY: &str = "account-currency";
pub const FLAG_ACCOUNT_NAME: &str = "account-name";
pub const FLAG_ACCOUNT_NUMBER: &str = "account-number";
pub const FLAG_BANK_NAME: &str = "bank-name";
pub const FLAG_BANK_BRANCH: &str = "bank-branch";
pub const FLAG_FIRST_NAME: &str = "first-name";
pub const FLAG_LAST_NAME: &str = "last-name";
pub const FLAG_COMPANY_NAME: &str = "company-name";
pub const FLAG_DATE_OF_BIRTH: &str = "date-of-birth";
pub const FLAG_NICKNAME: &str = "nickname";
pub const FLAG_TRANSFER_METHOD: &str = "transfer-method";
pub const FLAG_STREET_ADDRESS: &str = "street-address";
pub const FLAG_CITY: &str = "city";
pub const FLAG_STATE: &str = "state";
pub const FLAG_POSTCODE: &str = "postcode";
pub const FLAG_ADDRESS_COUNTRY: &str = "address-country";
pub const FLAG_CPF: &str = "cpf";
pub const FLAG_CNPJ: &str = "cnpj";
pub const FLAG_LEGAL_REP_ID: &str = "legal-rep-id";

// Independent bank identifiers
pub const FLAG_SWIFT_CODE: &str = "swift-code";
pub const FLAG_IBAN: &str = "iban";
pub const FLAG_CLABE: &str = "clabe";

// Routing identifiers
pub const FLAG_ROUTING_NUMBER: &str = "routing-number";
pub const FLAG_SORT_CODE: &str = "sort-code";
pub const FLAG_BSB: &str = "bsb";
pub const FLAG_IFSC: &str = "ifsc";
pub const FLAG_BANK_CODE: &str = "bank-code";
pub const FLAG_EMAIL: &str = "email";
pub const FLAG_PHONE: &str = "phone";
pub const FLAG_INSTITUTION_NUMBER: &str = "institution-number";
pub const FLAG_TRANSIT_NUMBER: &str = "transit-number";
pub const FLAG_ZENGIN_BANK_CODE: &str = "zengin-bank-code";
pub const FLAG_ZENGIN_BRANCH_CODE: &str = "zengin-branch-code";
pub const FLAG_CNAPS: &str = "cnaps";
pub const FLAG_KOREA_BANK_CODE: &str = "korea-bank-code";
pub const FLAG_NRIC: &str = "nric";
pub const FLAG_UEN: &str = "uen";
pub const FLAG_PAYNOW_VPA: &str = "paynow-vpa";
pub const FLAG_SG_BANK_CODE: &str = "sg-bank-code";
pub const FLAG_CLEARING_NUMBER: &str = "clearing-number";
pub const FLAG_HK_BANK_CODE: &str = "hk-bank-code";
pub const FLAG_FPS_ID: &str = "fps-id";
pub const FLAG_HKID: &str = "hkid";
pub const FLAG_PAYID_PHONE: &str = "payid-phone";
pub const FLAG_PAYID_EMAIL: &str = "payid-email";
pub const FLAG_PAYID_ABN: &str = "payid-abn";

// Transfer flags
pub const FLAG_BENEFICIARY_ID: &str = "beneficiary-id";
pub const FLAG_SOURCE_CURRENCY: &str = "source-currency";
pub const FLAG_TRANSFER_CURRENCY: &str = "transfer-currency";
pub const FLAG_TRANSFER_AMOUNT: &str = "transfer-amount";
pub const FLAG_SOURCE_AMOUNT: &str = "source-amount";
pub const FLAG_REASON: &str = "reason";
pub const FLAG_REFERENCE: &str = "reference";
pub const FLAG_REQUEST_ID: &str = "request-id";
pub const FLAG_TRANSFER_DATE: &str = "transfer-date";

/// A single CLI flag and the request path it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMapping {
    pub flag_name: &'static str,
    pub schema_path: &'static str,
    pub routing_type: Option<&'static str>,
    pub description: &'static str,
}

const fn field(
    flag_name: &'static str,
    schema_path: &'static str,
    description: &'static str,
) -> FlagMapping {
    FlagMapping {
        flag_name,
        schema_path,
        routing_type: None,
        description,
    }
}

const fn routing(
    flag_name: &'static str,
    schema_path: &'static str,
    routing_type: &'static str,
    description: &'static str,
) -> FlagMapping {
    FlagMapping {
        flag_name,
        schema_path,
        routing_type: Some(routing_type),
        description,
    }
}

const BENEFICIARY_FLAGS: &[FlagMapping] = &[
    field(FLAG_ENTITY_TYPE, PATH_ENTITY_TYPE, "Beneficiary entity type (COMPANY or PERSONAL)"),
    field(FLAG_BANK_COUNTRY, PATH_BANK_COUNTRY, "Bank country code (ISO 3166-1 alpha-2)"),
    field(FLAG_ACCOUNT_CURRENCY, PATH_ACCOUNT_CURRENCY, "Account currency (ISO 4217)"),
    field(FLAG_ACCOUNT_NAME, "beneficiary.bank_details.account_name", "Bank account holder name"),
    field(FLAG_ACCOUNT_NUMBER, "beneficiary.bank_details.account_number", "Bank account number"),
    field(FLAG_BANK_NAME, "beneficiary.bank_details.bank_name", "Bank name"),
    field(FLAG_BANK_BRANCH, PATH_BANK_BRANCH, "Bank branch name"),
    field(FLAG_FIRST_NAME, "beneficiary.first_name", "First name (PERSONAL beneficiaries)"),
    field(FLAG_LAST_NAME, "beneficiary.last_name", "Last name (PERSONAL beneficiaries)"),
    field(FLAG_COMPANY_NAME, "beneficiary.company_name", "Company name (COMPANY beneficiaries)"),
    field(FLAG_DATE_OF_BIRTH, "beneficiary.date_of_birth", "Date of birth (YYYY-MM-DD)"),
    field(FLAG_NICKNAME, "nickname", "Nickname for the beneficiary"),
    field(FLAG_TRANSFER_METHOD, PATH_TRANSFER_METHODS, "Transfer method (LOCAL or SWIFT)"),
    field(FLAG_STREET_ADDRESS, "beneficiary.address.street_address", "Street address"),
    field(FLAG_CITY, "beneficiary.address.city", "City"),
    field(FLAG_STATE, "beneficiary.address.state", "State or province"),
    field(FLAG_POSTCODE, "beneficiary.address.postcode", "Postal code"),
    field(FLAG_ADDRESS_COUNTRY, "beneficiary.address.country_code", "Address country code"),
    field(FLAG_CPF, "beneficiary.additional_info.personal_id_number", "Brazil CPF (11 digits)"),
    field(FLAG_CNPJ, "beneficiary.additional_info.business_registration_number", "Brazil CNPJ (14 digits)"),
    field(FLAG_LEGAL_REP_ID, "beneficiary.additional_info.legal_rep_id_number", "Legal representative ID (15 or 18 characters)"),
    field(FLAG_SWIFT_CODE, PATH_SWIFT_CODE, "SWIFT/BIC code"),
    field(FLAG_IBAN, PATH_IBAN, "IBAN"),
    field(FLAG_CLABE, PATH_CLABE, "Mexico CLABE (18 digits)"),
    routing(FLAG_ROUTING_NUMBER, PATH_ROUTING_VALUE_1, "aba", "US ABA routing number (9 digits)"),
    routing(FLAG_SORT_CODE, PATH_ROUTING_VALUE_1, "sort_code", "UK sort code (6 digits)"),
    routing(FLAG_BSB, PATH_ROUTING_VALUE_1, "bsb", "Australia BSB (6 digits)"),
    routing(FLAG_IFSC, PATH_ROUTING_VALUE_1, "ifsc", "India IFSC code"),
    routing(FLAG_BANK_CODE, PATH_ROUTING_VALUE_1, "bank_code", "Generic bank code"),
    routing(FLAG_EMAIL, PATH_ROUTING_VALUE_1, "email_address", "Canada Interac e-Transfer email"),
    routing(FLAG_PHONE, PATH_ROUTING_VALUE_1, "phone_number", "Canada Interac e-Transfer phone (+1-dddddddddd)"),
    routing(FLAG_INSTITUTION_NUMBER, PATH_ROUTING_VALUE_1, "institution_number", "Canada institution number (3 digits)"),
    routing(FLAG_TRANSIT_NUMBER, PATH_ROUTING_VALUE_2, "transit_number", "Canada transit number (5 digits)"),
    routing(FLAG_ZENGIN_BANK_CODE, PATH_ROUTING_VALUE_1, "bank_code", "Japan Zengin bank code (4 digits)"),
    routing(FLAG_ZENGIN_BRANCH_CODE, PATH_ROUTING_VALUE_2, "branch_code", "Japan Zengin branch code (3 digits)"),
    routing(FLAG_CNAPS, PATH_ROUTING_VALUE_1, "cnaps", "China CNAPS code (12 digits)"),
    routing(FLAG_KOREA_BANK_CODE, PATH_ROUTING_VALUE_1, "bank_code", "Korea bank code (3 digits)"),
    routing(FLAG_NRIC, PATH_ROUTING_VALUE_1, "personal_id_number", "Singapore PayNow NRIC"),
    routing(FLAG_UEN, PATH_ROUTING_VALUE_1, "business_registration_number", "Singapore PayNow UEN"),
    routing(FLAG_PAYNOW_VPA, PATH_ROUTING_VALUE_1, "virtual_payment_address", "Singapore PayNow VPA"),
    routing(FLAG_SG_BANK_CODE, PATH_ROUTING_VALUE_1, "bank_code", "Singapore bank code (7 digits)"),
    routing(FLAG_CLEARING_NUMBER, PATH_ROUTING_VALUE_1, "clearing_number", "Sweden clearing number (4-5 digits)"),
    routing(FLAG_HK_BANK_CODE, PATH_ROUTING_VALUE_1, "bank_code", "Hong Kong bank code (3 digits)"),
    routing(FLAG_FPS_ID, PATH_ROUTING_VALUE_1, "fps_identifier", "Hong Kong FPS identifier (7-9 digits)"),
    routing(FLAG_HKID, PATH_ROUTING_VALUE_1, "personal_id_number", "Hong Kong identity card number"),
    routing(FLAG_PAYID_PHONE, PATH_ROUTING_VALUE_1, "phone_number", "Australia PayID phone (+61-ddddddddd)"),
    routing(FLAG_PAYID_EMAIL, PATH_ROUTING_VALUE_1, "email_address", "Australia PayID email"),
    routing(FLAG_PAYID_ABN, PATH_ROUTING_VALUE_1, "australian_business_number", "Australia PayID ABN (9 or 11 digits)"),
];

const TRANSFER_FLAGS: &[FlagMapping] = &[
    field(FLAG_BENEFICIARY_ID, "beneficiary_id", "Existing beneficiary ID"),
    field(FLAG_SOURCE_CURRENCY, "source_currency", "Currency debited from the wallet"),
    field(FLAG_TRANSFER_CURRENCY, "transfer_currency", "Currency the beneficiary receives"),
    field(FLAG_TRANSFER_AMOUNT, "transfer_amount", "Amount the beneficiary receives"),
    field(FLAG_SOURCE_AMOUNT, "source_amount", "Amount debited from the wallet"),
    field(FLAG_REASON, "reason", "Reason for the transfer"),
    field(FLAG_REFERENCE, "reference", "Reference shown to the beneficiary"),
    field(FLAG_REQUEST_ID, "request_id", "Idempotency key (defaults to a random UUID)"),
    field(FLAG_TRANSFER_DATE, "transfer_date", "Transfer date (YYYY-MM-DD)"),
];

/// Immutable lookup table from flag name to request path.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    mappings: Vec<FlagMapping>,
}

impl FlagRegistry {
    /// Build a registry from an explicit table. The first mapping registered
    /// for a flag name wins.
    pub fn new(mappings: Vec<FlagMapping>) -> FlagRegistry {
        let mut unique: Vec<FlagMapping> = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            if !unique.iter().any(|m| m.flag_name == mapping.flag_name) {
                unique.push(mapping);
            }
        }
        FlagRegistry { mappings: unique }
    }

    /// Flags accepted by the beneficiary commands.
    pub fn beneficiary() -> FlagRegistry {
        FlagRegistry::new(BENEFICIARY_FLAGS.to_vec())
    }

    /// Flags accepted by `transfer create`, including an inline beneficiary.
    ///
    /// The beneficiary's transfer-method and nickname flags are left out; a
    /// transfer carries its own scalar `transfer_method`.
    pub fn transfer() -> FlagRegistry {
        let mut mappings = TRANSFER_FLAGS.to_vec();
        mappings.push(field(FLAG_TRANSFER_METHOD, "transfer_method", "Transfer method (LOCAL or SWIFT)"));
        mappings.extend(
            BENEFICIARY_FLAGS
                .iter()
                .filter(|m| m.flag_name != FLAG_TRANSFER_METHOD && m.flag_name != FLAG_NICKNAME)
                .cloned(),
        );
        FlagRegistry::new(mappings)
    }

    pub fn lookup(&self, flag_name: &str) -> Option<&FlagMapping> {
        self.mappings.iter().find(|m| m.flag_name == flag_name)
    }

    /// Reverse lookup used to render missing schema fields as flag names.
    ///
    /// Routing flags share the generic slot paths and are skipped, so a slot
    /// path has no single flag.
    pub fn flag_for_path(&self, path: &str) -> Option<&FlagMapping> {
        self.mappings
            .iter()
            .find(|m| m.routing_type.is_none() && m.schema_path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Values supplied on the command line, keyed by flag name.
///
/// Empty values are treated as absent everywhere in request building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    values: BTreeMap<String, String>,
}

impl FlagValues {
    pub fn new() -> FlagValues {
        FlagValues::default()
    }

    pub fn set(&mut self, flag_name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(flag_name.into(), value.into());
    }

    /// The value of a flag, if it was supplied and is non-empty.
    pub fn get(&self, flag_name: &str) -> Option<&str> {
        self.values
            .get(flag_name)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn has(&self, flag_name: &str) -> bool {
        self.get(flag_name).is_some()
    }

    pub fn remove(&mut self, flag_name: &str) -> Option<String> {
        self.values.remove(flag_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlagValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FlagValues::new();
        for (flag, value) in iter {
            values.set(flag, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_flag_names_are_unique() {
        let mut seen = HashSet::new();
        for mapping in BENEFICIARY_FLAGS.iter().chain(TRANSFER_FLAGS) {
            assert!(seen.insert(mapping.flag_name), "duplicate flag {}", mapping.flag_name);
        }
    }

    #[test]
    fn test_lookup() {
        let registry = FlagRegistry::beneficiary();
        let mapping = registry.lookup(FLAG_SWIFT_CODE).unwrap();
        assert_eq!(mapping.schema_path, PATH_SWIFT_CODE);
        assert!(mapping.routing_type.is_none());

        let mapping = registry.lookup(FLAG_TRANSIT_NUMBER).unwrap();
        assert_eq!(mapping.schema_path, PATH_ROUTING_VALUE_2);
        assert_eq!(mapping.routing_type, Some("transit_number"));

        assert!(registry.lookup("no-such-flag").is_none());
    }

    #[test]
    fn test_reverse_lookup_skips_routing_slots() {
        let registry = FlagRegistry::beneficiary();
        assert_eq!(
            registry.flag_for_path("beneficiary.bank_details.account_name").map(|m| m.flag_name),
            Some(FLAG_ACCOUNT_NAME)
        );
        assert!(registry.flag_for_path(PATH_ROUTING_VALUE_1).is_none());
    }

    #[test]
    fn test_transfer_registry_embeds_beneficiary() {
        let registry = FlagRegistry::transfer();
        assert!(registry.lookup(FLAG_SOURCE_AMOUNT).is_some());
        assert!(registry.lookup(FLAG_ROUTING_NUMBER).is_some());
        assert!(registry.lookup(FLAG_NICKNAME).is_none());
        assert_eq!(
            registry.lookup(FLAG_TRANSFER_METHOD).unwrap().schema_path,
            "transfer_method"
        );
    }

    #[test]
    fn test_first_mapping_wins() {
        let registry = FlagRegistry::new(vec![
            field("a", "x.a", ""),
            field("a", "y.a", ""),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("a").unwrap().schema_path, "x.a");
    }
}
