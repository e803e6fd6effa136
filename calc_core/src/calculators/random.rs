//! Random generator calculators. Every compute function here draws from
//! the RNG the page hands in.

use rand::RngCore;

use crate::errors::{CalcResult, FieldError};
use crate::form::{ComputationRequest, FieldSpec};
use crate::formulas::random::{self, PasswordOptions};
use crate::result::Output;

use super::{whole, CalculatorDef, Category, Compute};

fn count(label: &str, max: f64, default: &str) -> FieldSpec {
    FieldSpec::number("count", label)
        .required()
        .range(1.0, max)
        .integer()
        .default_value(default)
}

pub fn definitions() -> Vec<CalculatorDef> {
    vec![
        CalculatorDef::new(
            "password",
            "Password Generator",
            Category::Random,
            "Random password from the selected character types.",
            "each character drawn uniformly from the union of enabled classes",
            vec![
                FieldSpec::number("length", "Length")
                    .required()
                    .range(4.0, 128.0)
                    .integer()
                    .default_value("16"),
                FieldSpec::flag("lowercase", "Lowercase (a-z)", true),
                FieldSpec::flag("uppercase", "Uppercase (A-Z)", true),
                FieldSpec::flag("digits", "Digits (0-9)", true),
                FieldSpec::flag("symbols", "Symbols (!@#...)", true),
            ],
            Compute::Random(password),
        )
        .rule(at_least_one_class)
        .note("Uses a general-purpose PRNG; strength reflects character-set coverage only"),
        CalculatorDef::new(
            "random-number",
            "Random Number",
            Category::Random,
            "Whole numbers drawn uniformly from a range.",
            "uniform integer in [min, max]",
            vec![
                FieldSpec::number("min", "Minimum").required().integer().default_value("1"),
                FieldSpec::number("max", "Maximum").required().integer().default_value("100"),
                count("How many", 1000.0, "1"),
                FieldSpec::flag("unique", "No repeats", false),
            ],
            Compute::Random(random_number),
        )
        .rule(min_not_above_max),
        CalculatorDef::new(
            "random-color",
            "Random Color",
            Category::Random,
            "Random RGB colors as hex and CSS values.",
            "r, g, b each uniform in 0..=255",
            vec![count("How many", 50.0, "1")],
            Compute::Random(random_color),
        ),
        CalculatorDef::new(
            "random-name",
            "Random Name",
            Category::Random,
            "Placeholder full names.",
            "first and last name drawn independently from fixed lists",
            vec![count("How many", 100.0, "5")],
            Compute::Random(random_name),
        ),
        CalculatorDef::new(
            "lorem-ipsum",
            "Lorem Ipsum",
            Category::Random,
            "Placeholder paragraphs.",
            "sentences of 6-14 words drawn from the classic lorem ipsum vocabulary",
            vec![
                FieldSpec::number("paragraphs", "Paragraphs")
                    .required()
                    .range(1.0, 20.0)
                    .integer()
                    .default_value("3"),
                FieldSpec::number("sentences", "Sentences per paragraph")
                    .required()
                    .range(1.0, 20.0)
                    .integer()
                    .default_value("5"),
            ],
            Compute::Random(lorem_ipsum),
        ),
        CalculatorDef::new(
            "choice-picker",
            "Choice Picker",
            Category::Random,
            "Pick one option at random.",
            "uniform choice among the entered options",
            vec![FieldSpec::text("options", "Options")
                .required()
                .help("Separate options with commas or new lines")],
            Compute::Random(choice_picker),
        )
        .rule(has_options),
        CalculatorDef::new(
            "dice-roller",
            "Dice Roller",
            Category::Random,
            "Roll several dice and add them up.",
            "each die uniform in 1..=sides",
            vec![
                count("Dice", 100.0, "2"),
                FieldSpec::choice("sides", "Sides", &["6", "4", "8", "10", "12", "20", "100"]),
            ],
            Compute::Random(dice_roller),
        ),
        CalculatorDef::new(
            "coin-flip",
            "Coin Flip",
            Category::Random,
            "Flip coins and tally heads and tails.",
            "each flip heads with probability 1/2",
            vec![count("Flips", 1000.0, "1")],
            Compute::Random(coin_flip),
        ),
    ]
}

// ============================================================================
// Rules
// ============================================================================

fn at_least_one_class(request: &ComputationRequest) -> Option<FieldError> {
    let any = ["lowercase", "uppercase", "digits", "symbols"]
        .iter()
        .any(|name| request.flag(name));
    (!any).then(|| FieldError::new("lowercase", "Enable at least one character type"))
}

fn min_not_above_max(request: &ComputationRequest) -> Option<FieldError> {
    match (request.opt_number("min"), request.opt_number("max")) {
        (Some(min), Some(max)) if min > max => {
            Some(FieldError::new("max", "Maximum must be at least the minimum"))
        }
        _ => None,
    }
}

fn split_options(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn has_options(request: &ComputationRequest) -> Option<FieldError> {
    split_options(request.text_or_empty("options"))
        .is_empty()
        .then(|| FieldError::new("options", "Enter at least one option"))
}

// ============================================================================
// Compute
// ============================================================================

fn password(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let options = PasswordOptions {
        length: whole(request, "length")? as usize,
        lowercase: request.flag("lowercase"),
        uppercase: request.flag("uppercase"),
        digits: request.flag("digits"),
        symbols: request.flag("symbols"),
    };
    let password = random::generate_password(rng, &options)?;
    let strength = random::password_strength(&options);
    Ok(vec![
        Output::text("password", "Password", password),
        Output::text("strength", "Strength", strength),
    ])
}

fn random_number(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let count = whole(request, "count")? as usize;
    let values = random::random_integers(
        rng,
        request.integer("min")?,
        request.integer("max")?,
        count,
        request.flag("unique"),
    )?;
    Ok(vec![Output::list(
        "numbers",
        "Numbers",
        values.iter().map(|v| v.to_string()).collect(),
    )])
}

fn random_color(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let colors: Vec<_> = (0..whole(request, "count")?).map(|_| random::random_color(rng)).collect();
    Ok(vec![
        Output::list("hex", "Hex", colors.iter().map(|c| c.hex()).collect()),
        Output::list("rgb", "RGB", colors.iter().map(|c| c.css()).collect()),
    ])
}

fn random_name(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let names = random::random_names(rng, whole(request, "count")? as usize);
    Ok(vec![Output::list("names", "Names", names)])
}

fn lorem_ipsum(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let paragraphs = random::lorem_ipsum(
        rng,
        whole(request, "paragraphs")? as usize,
        whole(request, "sentences")? as usize,
    );
    Ok(vec![Output::text("text", "Text", paragraphs.join("\n\n"))])
}

fn choice_picker(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let options = split_options(request.text("options")?);
    let pick = random::pick_choice(rng, &options)?;
    Ok(vec![Output::text("choice", "Picked", pick)])
}

fn dice_roller(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let sides: u32 = request.choice("sides")?.parse().unwrap_or(6);
    let count = u32::try_from(whole(request, "count")?).unwrap_or(u32::MAX);
    let roll = random::roll_dice(rng, count, sides)?;
    Ok(vec![
        Output::list("rolls", "Rolls", roll.rolls.iter().map(|r| r.to_string()).collect()),
        Output::integer("total", "Total", roll.total as i64),
    ])
}

fn coin_flip(request: &ComputationRequest, rng: &mut dyn RngCore) -> CalcResult<Vec<Output>> {
    let flips = random::flip_coins(rng, whole(request, "count")? as usize);
    Ok(vec![
        Output::text("sequence", "Flips", flips.sequence.join(" ")),
        Output::integer("heads", "Heads", flips.heads as i64),
        Output::integer("tails", "Tails", flips.tails as i64),
    ])
}
