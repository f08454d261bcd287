use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::DispatchError;
use crate::functions::dispatch;
use crate::schema::WRAPPER;
use crate::validate::{validate, Validation};

/// Accepts `{"function_name": ..., "args": {...}}` and forwards `args` to [`dispatch`].
pub fn dispatch_wrapped<C: ?Sized>(request: &Value, context: &C) -> Envelope {
    log::info!("financial function request: {request}");

    if let Validation::Invalid(message) = validate(&WRAPPER, request) {
        log::error!("Invalid wrapped request: {request}. {message}");
        return Envelope::Error(message);
    }

    let Some(function_name) = request.get("function_name").and_then(Value::as_str) else {
        return Envelope::from(Err(DispatchError::required_property("function_name")));
    };
    let Some(args) = request.get("args") else {
        return Envelope::from(Err(DispatchError::required_property("args")));
    };

    dispatch(function_name, args, context)
}
