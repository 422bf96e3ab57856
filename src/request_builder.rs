//! Request pipeline for beneficiary and transfer bodies.
//!
//! Building a request runs in three phases that can be exercised on their
//! own:
//!
//! 1. **gather**: [`RequestBuilder::build`] turns flag values and `--field`
//!    overrides into a nested [`RequestTree`], failing fast on the first
//!    inconsistent or malformed input;
//! 2. **validate**: [`validate_request`] fetches the server schema and reports
//!    every missing field and rejected value;
//! 3. **submit**: [`submit_request`] sends the tree to the payments API.
//!
//! Only the last two touch the network, and both go through the
//! [`PaymentsApi`] trait.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::field_registry::*;
use crate::overrides::{parse_field_overrides, OverrideMap};
use crate::payments_api::{ApiError, PaymentsApi, ResourceKind, SchemaQuery};
use crate::request_error::RequestError;
use crate::request_tree::{build_nested_map, merge_request, FlatFieldMap, RequestTree};
use crate::{routing, schema, validators};

pub const DEFAULT_TRANSFER_METHOD: &str = "LOCAL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update { id: String },
}

/// A gathered request, ready for validation or submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub kind: ResourceKind,
    pub operation: Operation,
    /// The body as it would be sent.
    pub tree: RequestTree,
    /// Every provided path, overrides included; what the schema is checked against.
    pub provided: FlatFieldMap,
}

impl BuiltRequest {
    pub fn body(&self) -> Value {
        Value::Object(self.tree.clone())
    }
}

pub struct RequestBuilder<'a> {
    registry: &'a FlagRegistry,
    kind: ResourceKind,
    operation: Operation,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(registry: &'a FlagRegistry, kind: ResourceKind, operation: Operation) -> Self {
        Self {
            registry,
            kind,
            operation,
        }
    }

    pub fn registry(&self) -> &FlagRegistry {
        self.registry
    }

    /// Gather flag values and `--field` entries into a request body.
    ///
    /// Override entries are parsed before anything else is looked at, so a
    /// malformed entry is always the error reported.
    pub fn build<S: AsRef<str>>(
        &self,
        raw: &FlagValues,
        field_entries: &[S],
    ) -> Result<BuiltRequest, RequestError> {
        let overrides = parse_field_overrides(field_entries)?;
        let values = self.normalize(raw);

        self.check_preconditions(&values, &overrides)?;
        validators::validate_formats(&values)?;

        let mut flat = FlatFieldMap::new();
        for mapping in self.registry.iter().filter(|m| m.routing_type.is_none()) {
            if let Some(value) = values.get(mapping.flag_name) {
                flat.insert(mapping.schema_path, value);
            }
        }

        let decision = routing::resolve(&values);
        routing::apply(&decision, &overrides, &mut flat);

        let tree = merge_request(build_nested_map(&flat), overrides.to_tree());
        let tree = self.shape_transfer_methods(tree);
        let body = Value::Object(tree.clone());
        trace!("Request body: {}", body);

        let mut provided = flat;
        provided.extend_from(overrides.fields());

        Ok(BuiltRequest {
            kind: self.kind,
            operation: self.operation.clone(),
            tree,
            provided,
        })
    }

    /// Trim and case-fold every value; a transfer without `--request-id`
    /// gets a fresh idempotency key.
    fn normalize(&self, raw: &FlagValues) -> FlagValues {
        let mut values: FlagValues = raw
            .iter()
            .map(|(flag, value)| (flag, validators::normalize(flag, value)))
            .collect();

        if self.kind == ResourceKind::Transfer
            && self.operation == Operation::Create
            && !values.has(FLAG_REQUEST_ID)
        {
            let request_id = uuid::Uuid::new_v4().to_string();
            debug!("Generated request id {}", request_id);
            values.set(FLAG_REQUEST_ID, request_id);
        }
        values
    }

    fn check_preconditions(
        &self,
        values: &FlagValues,
        overrides: &OverrideMap,
    ) -> Result<(), RequestError> {
        let creating = self.operation == Operation::Create;

        if self.kind == ResourceKind::Transfer && creating {
            check_amounts(values)?;
        }

        // a transfer to an existing beneficiary carries no payout details
        let inline_beneficiary =
            self.kind == ResourceKind::Beneficiary || !values.has(FLAG_BENEFICIARY_ID);

        if creating && inline_beneficiary {
            routing::require_routing_method(values, overrides)?;
        }
        routing::check_paired_flags(values)?;
        if creating && inline_beneficiary {
            check_entity_names(values, overrides)?;
        }

        if values.has(FLAG_TRANSIT_NUMBER) && !values.has(FLAG_INSTITUTION_NUMBER) {
            warn!(
                "--{} is ignored without --{}",
                FLAG_TRANSIT_NUMBER, FLAG_INSTITUTION_NUMBER
            );
        }
        Ok(())
    }

    /// Beneficiaries carry a list of transfer methods on the wire.
    fn shape_transfer_methods(&self, mut tree: RequestTree) -> RequestTree {
        if self.kind != ResourceKind::Beneficiary {
            return tree;
        }
        if let Some(Value::String(method)) = tree.get(PATH_TRANSFER_METHODS) {
            let methods = Value::Array(vec![Value::String(method.clone())]);
            tree.insert(PATH_TRANSFER_METHODS.to_string(), methods);
        }
        tree
    }

    /// Work out which schema applies to a built request.
    pub fn schema_query(&self, request: &BuiltRequest) -> Result<SchemaQuery, RequestError> {
        let provided = &request.provided;
        let required = |path: &str, flag: &str| -> Result<String, RequestError> {
            provided
                .get(path)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    RequestError::user_input(format!("--{} is required with --validate", flag))
                })
        };

        let entity_type = required(PATH_ENTITY_TYPE, FLAG_ENTITY_TYPE)?;
        let (country_or_pair, method_path) = match self.kind {
            ResourceKind::Beneficiary => (
                required(PATH_BANK_COUNTRY, FLAG_BANK_COUNTRY)?,
                PATH_TRANSFER_METHODS,
            ),
            ResourceKind::Transfer => (
                format!(
                    "{}/{}",
                    required("source_currency", FLAG_SOURCE_CURRENCY)?,
                    required("transfer_currency", FLAG_TRANSFER_CURRENCY)?
                ),
                "transfer_method",
            ),
        };
        let payment_method = provided
            .get(method_path)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TRANSFER_METHOD)
            .to_string();

        Ok(SchemaQuery {
            kind: self.kind,
            country_or_pair,
            entity_type,
            payment_method,
            account_currency: provided
                .get(PATH_ACCOUNT_CURRENCY)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        })
    }
}

fn check_amounts(values: &FlagValues) -> Result<(), RequestError> {
    match (values.has(FLAG_TRANSFER_AMOUNT), values.has(FLAG_SOURCE_AMOUNT)) {
        (true, true) => Err(RequestError::user_input(format!(
            "--{} and --{} are mutually exclusive",
            FLAG_TRANSFER_AMOUNT, FLAG_SOURCE_AMOUNT
        ))),
        (false, false) => Err(RequestError::user_input(format!(
            "one of --{} or --{} is required",
            FLAG_TRANSFER_AMOUNT, FLAG_SOURCE_AMOUNT
        ))),
        _ => Ok(()),
    }
}

fn check_entity_names(values: &FlagValues, overrides: &OverrideMap) -> Result<(), RequestError> {
    let supplied = |flag: &str, path: &str| values.has(flag) || overrides.fields().has_value(path);

    let required: &[(&str, &str)] = match values.get(FLAG_ENTITY_TYPE) {
        Some("PERSONAL") => &[
            (FLAG_FIRST_NAME, "beneficiary.first_name"),
            (FLAG_LAST_NAME, "beneficiary.last_name"),
        ],
        Some("COMPANY") => &[(FLAG_COMPANY_NAME, "beneficiary.company_name")],
        _ => &[],
    };

    match required.iter().find(|(flag, path)| !supplied(flag, path)) {
        Some((flag, _)) => Err(RequestError::user_input(format!(
            "--{} is required for {} beneficiaries",
            flag,
            values.get(FLAG_ENTITY_TYPE).unwrap_or_default()
        ))),
        None => Ok(()),
    }
}

/// Fetch the schema for `request` and check it, reporting every problem.
pub async fn validate_request<A>(
    api: &A,
    builder: &RequestBuilder<'_>,
    request: &BuiltRequest,
) -> Result<(), RequestError>
where
    A: PaymentsApi + ?Sized,
{
    let query = builder.schema_query(request)?;
    let fetched = api
        .fetch_schema(&query)
        .await
        .map_err(RequestError::SchemaFetch)?;
    debug!("Schema declares {} fields", fetched.fields.len());
    schema::validate(&fetched, &request.provided).into_result(builder.registry())
}

/// Send a built request.
pub async fn submit_request<A>(api: &A, request: &BuiltRequest) -> Result<Value, ApiError>
where
    A: PaymentsApi + ?Sized,
{
    match &request.operation {
        Operation::Create => api.create_resource(request.kind, &request.tree).await,
        Operation::Update { id } => api.update_resource(request.kind, id, &request.tree).await,
    }
}
