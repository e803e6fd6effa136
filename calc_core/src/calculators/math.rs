//! Math calculators.

use crate::errors::CalcResult;
use crate::form::{ComputationRequest, FieldSpec};
use crate::formulas::arithmetic::{self, AngleUnit, TrigFunction};
use crate::result::{FormatHints, Output, Value};

use super::{choice_as, count_output, whole, whole_list, CalculatorDef, Category, Compute};

fn whole_numbers(label: &str, default: &str) -> FieldSpec {
    FieldSpec::numbers("values", label)
        .required()
        .min(1.0)
        .integer()
        .min_items(2)
        .default_value(default)
        .help("Separate numbers with commas or spaces")
}

fn real_numbers(min_items: usize, default: &str) -> FieldSpec {
    FieldSpec::numbers("values", "Numbers")
        .required()
        .min_items(min_items)
        .default_value(default)
        .help("Separate numbers with commas or spaces")
}

pub fn definitions() -> Vec<CalculatorDef> {
    vec![
        CalculatorDef::new(
            "lcm",
            "Least Common Multiple",
            Category::Math,
            "Smallest positive integer divisible by every input.",
            "LCM(a, b) = |a·b| / GCD(a, b), folded left over the list",
            vec![whole_numbers("Numbers", "4, 6")],
            Compute::Pure(lcm),
        ),
        CalculatorDef::new(
            "gcd",
            "Greatest Common Divisor",
            Category::Math,
            "Largest integer dividing every input.",
            "GCD(a, b) = GCD(b, a mod b), GCD(a, 0) = a",
            vec![whole_numbers("Numbers", "12, 18")],
            Compute::Pure(gcd),
        ),
        CalculatorDef::new(
            "factorial",
            "Factorial",
            Category::Math,
            "Exact n! for n up to 170.",
            "n! = 1 · 2 · … · n, 0! = 1",
            vec![FieldSpec::number("n", "n")
                .required()
                .range(0.0, arithmetic::MAX_FACTORIAL_N as f64)
                .integer()
                .default_value("10")],
            Compute::Pure(factorial),
        )
        .note("Computed with arbitrary-precision integers; 170! has 307 digits"),
        CalculatorDef::new(
            "median",
            "Median",
            Category::Math,
            "Middle value of a data set.",
            "sort ascending; odd count → middle value, even count → mean of the two middle values",
            vec![real_numbers(1, "1, 3, 5")],
            Compute::Pure(median),
        ),
        CalculatorDef::new(
            "mean",
            "Mean",
            Category::Math,
            "Arithmetic average with sum and count.",
            "mean = Σx / n",
            vec![real_numbers(1, "2, 4, 6")],
            Compute::Pure(mean),
        ),
        CalculatorDef::new(
            "standard-deviation",
            "Standard Deviation",
            Category::Math,
            "Spread of a data set around its mean.",
            "σ = √(Σ(x − mean)² / d), d = n − 1 for a sample, n for a population",
            vec![
                real_numbers(2, "2, 4, 4, 4, 5, 5, 7, 9"),
                FieldSpec::flag("sample", "Sample (n − 1)", true),
            ],
            Compute::Pure(standard_deviation),
        ),
        CalculatorDef::new(
            "modulo",
            "Modulo",
            Category::Math,
            "Remainder and truncated quotient of a division.",
            "remainder = a − b·trunc(a / b)",
            vec![
                FieldSpec::number("dividend", "Dividend").required().default_value("17"),
                FieldSpec::number("divisor", "Divisor").required().nonzero().default_value("5"),
            ],
            Compute::Pure(modulo),
        )
        .note("The remainder takes the sign of the dividend"),
        CalculatorDef::new(
            "power",
            "Exponent",
            Category::Math,
            "Raise a base to a power.",
            "x^y",
            vec![
                FieldSpec::number("base", "Base").required().default_value("2"),
                FieldSpec::number("exponent", "Exponent").required().default_value("10"),
            ],
            Compute::Pure(power),
        ),
        CalculatorDef::new(
            "root",
            "Nth Root",
            Category::Math,
            "Real n-th root of a number.",
            "x^(1/n); odd roots of negative x are −(|x|^(1/n))",
            vec![
                FieldSpec::number("x", "Number").required().default_value("27"),
                FieldSpec::number("n", "Degree").required().nonzero().default_value("3"),
            ],
            Compute::Pure(root),
        ),
        CalculatorDef::new(
            "logarithm",
            "Logarithm",
            Category::Math,
            "Logarithm of a positive number in any valid base.",
            "log_b(x) = ln(x) / ln(b)",
            vec![
                FieldSpec::number("x", "Number").required().default_value("100"),
                FieldSpec::number("base", "Base").required().default_value("10"),
            ],
            Compute::Pure(logarithm),
        ),
        CalculatorDef::new(
            "percentage",
            "Percentage",
            Category::Math,
            "What is P percent of a value.",
            "result = P / 100 × value",
            vec![
                FieldSpec::number("percent", "Percent").required().default_value("15"),
                FieldSpec::number("value", "Of value").required().default_value("200"),
            ],
            Compute::Pure(percentage),
        ),
        CalculatorDef::new(
            "percent-change",
            "Percent Change",
            Category::Math,
            "Relative increase or decrease between two values.",
            "change = (new − old) / |old| × 100",
            vec![
                FieldSpec::number("from", "Old value").required().nonzero().default_value("80"),
                FieldSpec::number("to", "New value").required().default_value("100"),
            ],
            Compute::Pure(percent_change),
        ),
        CalculatorDef::new(
            "trigonometry",
            "Trigonometry",
            Category::Math,
            "Sine, cosine, tangent and their inverses.",
            "sin, cos, tan of an angle; asin, acos, atan return an angle",
            vec![
                FieldSpec::choice("function", "Function", TrigFunction::KEYS),
                FieldSpec::number("x", "Value").required().default_value("30"),
                FieldSpec::choice("unit", "Angle unit", &["degrees", "radians"]),
            ],
            Compute::Pure(trigonometry),
        )
        .note("tan is undefined at odd multiples of 90°"),
    ]
}

fn lcm(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let values = whole_list(request, "values")?;
    Ok(vec![count_output("lcm", "LCM", arithmetic::lcm_all(&values)?)])
}

fn gcd(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let values = whole_list(request, "values")?;
    Ok(vec![count_output("gcd", "GCD", arithmetic::gcd_all(&values)?)])
}

fn factorial(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let n = whole(request, "n")?;
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    let digits = arithmetic::factorial(n)?.to_string();
    let digit_count = digits.len() as i64;
    Ok(vec![
        Output::new("factorial", "n!", Value::BigInteger(digits), FormatHints::default()),
        Output::integer("digits", "Digits", digit_count),
    ])
}

fn median(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let m = arithmetic::median(request.numbers("values")?)?;
    Ok(vec![Output::number("median", "Median", m, FormatHints::default())])
}

fn mean(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let values = request.numbers("values")?;
    Ok(vec![
        Output::number("mean", "Mean", arithmetic::mean(values)?, FormatHints::default()),
        Output::number("sum", "Sum", values.iter().sum(), FormatHints::default()),
        Output::integer("count", "Count", values.len() as i64),
    ])
}

fn standard_deviation(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let values = request.numbers("values")?;
    let sd = arithmetic::standard_deviation(values, request.flag("sample"))?;
    Ok(vec![
        Output::number("std_dev", "Standard deviation", sd, FormatHints::default()),
        Output::number("variance", "Variance", sd * sd, FormatHints::default()),
        Output::number("mean", "Mean", arithmetic::mean(values)?, FormatHints::default()),
    ])
}

fn modulo(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let (remainder, quotient) = arithmetic::modulo(request.number("dividend")?, request.number("divisor")?)?;
    Ok(vec![
        Output::number("remainder", "Remainder", remainder, FormatHints::default()),
        Output::number("quotient", "Quotient", quotient, FormatHints::default()),
    ])
}

fn power(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let result = arithmetic::power(request.number("base")?, request.number("exponent")?)?;
    Ok(vec![Output::number("result", "Result", result, FormatHints::default())])
}

fn root(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let result = arithmetic::root(request.number("x")?, request.number("n")?)?;
    Ok(vec![Output::number("result", "Root", result, FormatHints::default())])
}

fn logarithm(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let result = arithmetic::logarithm(request.number("x")?, request.number("base")?)?;
    Ok(vec![Output::number("result", "Logarithm", result, FormatHints::default())])
}

fn percentage(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let result = arithmetic::percentage_of(request.number("percent")?, request.number("value")?);
    Ok(vec![Output::number("result", "Result", result, FormatHints::default())])
}

fn percent_change(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let from = request.number("from")?;
    let to = request.number("to")?;
    let change = arithmetic::percent_change(from, to)?;
    Ok(vec![
        Output::number("change", "Change", change, FormatHints::percent(2)),
        Output::number("difference", "Difference", to - from, FormatHints::default()),
    ])
}

fn trigonometry(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let function = choice_as(request, "function", TrigFunction::from_key)?;
    let unit = choice_as(request, "unit", AngleUnit::from_key)?;
    let value = arithmetic::trig(function, request.number("x")?, unit)?;
    let hints = match (function.is_inverse(), unit) {
        (true, AngleUnit::Degrees) => FormatHints::default().with_suffix("°"),
        (true, AngleUnit::Radians) => FormatHints::default().with_suffix("rad"),
        (false, _) => FormatHints::default(),
    };
    Ok(vec![Output::number("result", "Result", value, hints)])
}
