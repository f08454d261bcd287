use fin_formulas as ff;

use crate::args::Args;
use crate::error::DispatchError;
use crate::functions::FunctionSpec;
use crate::schema;

/// Referenced from the registry so the linker keeps this module's `inventory` registrations.
pub(crate) fn __force_link() {}

const LENGTH_MISMATCH: &str = "values and dates must have the same length";

/// Requires one strictly positive value and one value at or below zero.
fn require_sign_mix(label: &str, values: &[f64]) -> Result<(), DispatchError> {
    let has_positive = values.iter().any(|v| *v > 0.0);
    let has_non_positive = values.iter().any(|v| *v <= 0.0);
    if has_positive && has_non_positive {
        Ok(())
    } else {
        Err(DispatchError::Domain(format!(
            "{label} requires at least one positive and one negative value"
        )))
    }
}

fn require_same_length(args: &Args<'_>) -> Result<(), DispatchError> {
    if args.count("values")? != args.count("dates")? {
        return Err(DispatchError::CrossField(LENGTH_MISMATCH.to_string()));
    }
    Ok(())
}

/// Compounding periods are whole numbers; fractional inputs are truncated toward zero.
fn periods_per_year(args: &Args<'_>) -> Result<i32, DispatchError> {
    let npery = args.number("npery")?.trunc();
    if npery > f64::from(i32::MAX) {
        return Err(DispatchError::Domain(format!(
            "npery must be at most {}",
            i32::MAX
        )));
    }
    Ok(npery as i32)
}

inventory::submit! {
    FunctionSpec {
        name: "fv",
        schema: &schema::FV,
        implementation: fv_fn,
    }
}

fn fv_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::fv(
        args.number("rate")?,
        args.number("nper")?,
        args.number("pmt")?,
        args.number("pv")?,
        args.number("type")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "fvschedule",
        schema: &schema::FVSCHEDULE,
        implementation: fvschedule_fn,
    }
}

fn fvschedule_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::fvschedule(
        args.number("principal")?,
        &args.numbers("schedule")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "pv",
        schema: &schema::PV,
        implementation: pv_fn,
    }
}

fn pv_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::pv(
        args.number("rate")?,
        args.number("nper")?,
        args.number("pmt")?,
        args.number("fv")?,
        args.number("type")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "npv",
        schema: &schema::NPV,
        implementation: npv_fn,
    }
}

fn npv_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    // A leading zero flow moves the first value one period out, matching spreadsheet NPV.
    let mut values = vec![0.0];
    values.extend(args.numbers("values")?);
    Ok(ff::npv(args.number("rate")?, &values)?)
}

inventory::submit! {
    FunctionSpec {
        name: "xnpv",
        schema: &schema::XNPV,
        implementation: xnpv_fn,
    }
}

fn xnpv_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    require_same_length(args)?;
    Ok(ff::xnpv(
        args.number("rate")?,
        &args.numbers("values")?,
        &args.dates("dates")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "pmt",
        schema: &schema::PMT,
        implementation: pmt_fn,
    }
}

fn pmt_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::pmt(
        args.number("rate")?,
        args.number("nper")?,
        args.number("pv")?,
        args.number("fv")?,
        args.number("type")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "ppmt",
        schema: &schema::PPMT,
        implementation: ppmt_fn,
    }
}

fn ppmt_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::ppmt(
        args.number("rate")?,
        args.number("per")?,
        args.number("nper")?,
        args.number("pv")?,
        args.number("fv")?,
        args.number("type")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "irr",
        schema: &schema::IRR,
        implementation: irr_fn,
    }
}

fn irr_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    let values = args.numbers("values")?;
    require_sign_mix("IRR", &values)?;
    Ok(ff::irr(&values)?)
}

inventory::submit! {
    FunctionSpec {
        name: "mirr",
        schema: &schema::MIRR,
        implementation: mirr_fn,
    }
}

fn mirr_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    let values = args.numbers("values")?;
    require_sign_mix("MIRR", &values)?;
    Ok(ff::mirr(
        &values,
        args.number("finance_rate")?,
        args.number("reinvest_rate")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "xirr",
        schema: &schema::XIRR,
        implementation: xirr_fn,
    }
}

fn xirr_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    let values = args.numbers("values")?;
    require_sign_mix("XIRR", &values)?;
    require_same_length(args)?;
    Ok(ff::xirr(
        &values,
        &args.dates("dates")?,
        Some(args.number("guess")?),
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "nper",
        schema: &schema::NPER,
        implementation: nper_fn,
    }
}

fn nper_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::nper(
        args.number("rate")?,
        args.number("pmt")?,
        args.number("pv")?,
        args.number("fv")?,
        args.number("type")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "rate",
        schema: &schema::RATE,
        implementation: rate_fn,
    }
}

fn rate_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::rate(
        args.number("nper")?,
        args.number("pmt")?,
        args.number("pv")?,
        args.number("fv")?,
        args.number("type")?,
        args.number("guess")?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "effect",
        schema: &schema::EFFECT,
        implementation: effect_fn,
    }
}

fn effect_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::effect(
        args.number("nominal_rate")?,
        periods_per_year(args)?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "nominal",
        schema: &schema::NOMINAL,
        implementation: nominal_fn,
    }
}

fn nominal_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    Ok(ff::nominal(
        args.number("effect_rate")?,
        periods_per_year(args)?,
    )?)
}

inventory::submit! {
    FunctionSpec {
        name: "sln",
        schema: &schema::SLN,
        implementation: sln_fn,
    }
}

fn sln_fn(args: &Args<'_>) -> Result<f64, DispatchError> {
    let life = args.number("life")?;
    if life == 0.0 {
        return Err(DispatchError::Domain("life cannot be zero".to_string()));
    }
    Ok(ff::sln(args.number("cost")?, args.number("salvage")?, life)?)
}
