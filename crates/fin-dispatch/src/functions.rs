use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::args::Args;
use crate::envelope::Envelope;
use crate::error::DispatchError;
use crate::schema::Schema;
use crate::validate::{validate, Validation};

pub type FunctionImpl = fn(&Args<'_>) -> Result<f64, DispatchError>;

/// A catalog entry: the request contract and the routine that evaluates it.
///
/// Implementations return a bare scalar; any backend result held in a container is unwrapped
/// before it reaches the envelope.
pub struct FunctionSpec {
    pub name: &'static str,
    pub schema: &'static Schema,
    pub implementation: FunctionImpl,
}

inventory::collect!(FunctionSpec);

/// Iterate all [`FunctionSpec`] registrations, sorted by name.
pub fn iter_function_specs() -> impl Iterator<Item = &'static FunctionSpec> {
    let mut specs: Vec<&'static FunctionSpec> = registry().values().copied().collect();
    specs.sort_by_key(|spec| spec.name);
    specs.into_iter()
}

fn registry() -> &'static HashMap<&'static str, &'static FunctionSpec> {
    static REGISTRY: OnceLock<HashMap<&'static str, &'static FunctionSpec>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let force_link: fn() = crate::builtins::__force_link;
        std::hint::black_box(force_link)();

        let mut map = HashMap::new();
        for spec in inventory::iter::<FunctionSpec> {
            map.insert(spec.name, spec);
        }
        map
    })
}

/// Exact, case-sensitive lookup by catalog name.
pub fn lookup_function(name: &str) -> Option<&'static FunctionSpec> {
    registry().get(name).copied()
}

/// Evaluates `function_name` against `request` and wraps the outcome.
///
/// `context` belongs to the hosting environment and is never inspected. No failure escapes:
/// unknown names, schema violations, domain checks and solver failures all become
/// [`Envelope::Error`].
pub fn dispatch<C: ?Sized>(function_name: &str, request: &Value, _context: &C) -> Envelope {
    Envelope::from(evaluate(function_name, request))
}

/// Same as [`dispatch`] without the envelope.
pub fn evaluate(function_name: &str, request: &Value) -> Result<f64, DispatchError> {
    let spec = lookup_function(function_name)
        .ok_or_else(|| DispatchError::unknown_function(function_name))?;
    let label = function_name.to_ascii_uppercase();
    log::info!("{label} request: {request}");

    if let Validation::Invalid(message) = validate(spec.schema, request) {
        log::error!("Invalid {label} request with args: {request}. {message}");
        return Err(DispatchError::Shape(message));
    }

    let fields = request
        .as_object()
        .ok_or_else(|| DispatchError::Shape("request is not of type 'object'".to_string()))?;
    let args = Args::new(spec.schema, fields);

    log::debug!("calling {} with args: {request}", spec.name);
    let result = (spec.implementation)(&args);
    match &result {
        Ok(value) => log::debug!("{} returned {value}", spec.name),
        Err(err) => log::warn!("{label} failed: {err}"),
    }
    result
}
