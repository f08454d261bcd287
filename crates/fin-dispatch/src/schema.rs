//! Declarative argument contracts, one per catalog function.
//!
//! Schemas are plain `static` data: a closed set of fields with their primitive types and
//! constraints, plus the alternative required-sets that model spreadsheet arguments where one
//! of several inputs may be omitted.

/// ISO-like calendar date accepted in date lists; month and day may have one or two digits.
pub const DATE_PATTERN: &str = "^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$";

const PAYMENT_TIMING: &[i64] = &[0, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    /// An integral number restricted to `allowed`.
    Integer { allowed: &'static [i64] },
    Text,
    Object,
    NumberList,
    /// Strings matching [`DATE_PATTERN`].
    DateList,
}

impl FieldType {
    /// Type name used in violation messages.
    pub fn json_name(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Integer { .. } => "integer",
            FieldType::Text => "string",
            FieldType::Object => "object",
            FieldType::NumberList | FieldType::DateList => "array",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    /// Minimum element count for list fields.
    pub min_items: usize,
    /// Inclusive lower bound for numeric fields.
    pub minimum: Option<f64>,
    /// Value used when the field is absent.
    pub default: Option<f64>,
}

impl Field {
    const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            min_items: 0,
            minimum: None,
            default: None,
        }
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub const fn numbers(name: &'static str) -> Self {
        Self::new(name, FieldType::NumberList)
    }

    pub const fn dates(name: &'static str) -> Self {
        Self::new(name, FieldType::DateList)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub const fn object(name: &'static str) -> Self {
        Self::new(name, FieldType::Object)
    }

    /// The `type` flag: 0 for payments at period end, 1 for period start.
    pub const fn payment_timing() -> Self {
        Self::new(
            "type",
            FieldType::Integer {
                allowed: PAYMENT_TIMING,
            },
        )
        .or(0.0)
    }

    pub const fn or(self, default: f64) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn at_least(self, minimum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            ..self
        }
    }

    pub const fn min_items(self, min_items: usize) -> Self {
        Self { min_items, ..self }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
    /// At least one of these sets must be fully present.
    pub required: &'static [&'static [&'static str]],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub static FV: Schema = Schema {
    name: "fv",
    fields: &[
        Field::number("rate"),
        Field::number("nper"),
        Field::number("pmt").or(0.0),
        Field::number("pv").or(0.0),
        Field::payment_timing(),
    ],
    required: &[&["rate", "nper", "pmt"], &["rate", "nper", "pv"]],
};

pub static FVSCHEDULE: Schema = Schema {
    name: "fvschedule",
    fields: &[Field::number("principal"), Field::numbers("schedule")],
    required: &[&["principal", "schedule"]],
};

pub static PV: Schema = Schema {
    name: "pv",
    fields: &[
        Field::number("rate"),
        Field::number("nper"),
        Field::number("pmt").or(0.0),
        Field::number("fv").or(0.0),
        Field::payment_timing(),
    ],
    required: &[&["rate", "nper", "pmt"], &["rate", "nper", "fv"]],
};

pub static NPV: Schema = Schema {
    name: "npv",
    fields: &[Field::number("rate"), Field::numbers("values")],
    required: &[&["rate", "values"]],
};

pub static XNPV: Schema = Schema {
    name: "xnpv",
    fields: &[
        Field::number("rate"),
        Field::numbers("values"),
        Field::dates("dates"),
    ],
    required: &[&["rate", "values", "dates"]],
};

pub static PMT: Schema = Schema {
    name: "pmt",
    fields: &[
        Field::number("rate"),
        Field::number("nper"),
        Field::number("pv"),
        Field::number("fv").or(0.0),
        Field::payment_timing(),
    ],
    required: &[&["rate", "nper", "pv"]],
};

pub static PPMT: Schema = Schema {
    name: "ppmt",
    fields: &[
        Field::number("rate"),
        Field::number("per").at_least(1.0),
        Field::number("nper"),
        Field::number("pv"),
        Field::number("fv").or(0.0),
        Field::payment_timing(),
    ],
    required: &[&["rate", "per", "nper", "pv"]],
};

pub static IRR: Schema = Schema {
    name: "irr",
    fields: &[Field::numbers("values").min_items(2)],
    required: &[&["values"]],
};

pub static MIRR: Schema = Schema {
    name: "mirr",
    fields: &[
        Field::numbers("values").min_items(2),
        Field::number("finance_rate"),
        Field::number("reinvest_rate"),
    ],
    required: &[&["values", "finance_rate", "reinvest_rate"]],
};

pub static XIRR: Schema = Schema {
    name: "xirr",
    fields: &[
        Field::numbers("values").min_items(2),
        Field::dates("dates"),
        Field::number("guess").or(fin_formulas::DEFAULT_XIRR_GUESS),
    ],
    required: &[&["values", "dates"]],
};

pub static NPER: Schema = Schema {
    name: "nper",
    fields: &[
        Field::number("rate"),
        Field::number("pmt").or(0.0),
        Field::number("pv"),
        Field::number("fv").or(0.0),
        Field::payment_timing(),
    ],
    required: &[&["rate", "pmt", "pv"], &["rate", "pv", "fv"]],
};

pub static RATE: Schema = Schema {
    name: "rate",
    fields: &[
        Field::number("nper"),
        Field::number("pmt").or(0.0),
        Field::number("pv"),
        Field::number("fv").or(0.0),
        Field::payment_timing(),
        Field::number("guess").or(fin_formulas::DEFAULT_RATE_GUESS),
    ],
    required: &[&["nper", "pmt", "pv"], &["nper", "pv", "fv"]],
};

pub static EFFECT: Schema = Schema {
    name: "effect",
    fields: &[
        Field::number("nominal_rate"),
        Field::number("npery").at_least(1.0),
    ],
    required: &[&["nominal_rate", "npery"]],
};

pub static NOMINAL: Schema = Schema {
    name: "nominal",
    fields: &[
        Field::number("effect_rate"),
        Field::number("npery").at_least(1.0),
    ],
    required: &[&["effect_rate", "npery"]],
};

pub static SLN: Schema = Schema {
    name: "sln",
    fields: &[
        Field::number("cost"),
        Field::number("salvage"),
        Field::number("life"),
    ],
    required: &[&["cost", "salvage", "life"]],
};

/// Envelope accepted by [`crate::dispatch_wrapped`].
pub static WRAPPER: Schema = Schema {
    name: "wrapper",
    fields: &[Field::text("function_name"), Field::object("args")],
    required: &[&["function_name", "args"]],
};
