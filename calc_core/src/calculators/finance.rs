//! Finance calculators.

use crate::errors::CalcResult;
use crate::form::{ComputationRequest, FieldSpec};
use crate::formulas::finance::{self, CompoundFrequency};
use crate::result::{FormatHints, Output};

use super::{choice_as, whole, CalculatorDef, Category, Compute};

fn money(name: &str, label: &str, default: &str) -> FieldSpec {
    FieldSpec::number(name, label).required().min(0.0).default_value(default)
}

fn rate(name: &str, label: &str, default: &str) -> FieldSpec {
    FieldSpec::number(name, label).required().range(0.0, 100.0).default_value(default)
}

pub fn definitions() -> Vec<CalculatorDef> {
    vec![
        CalculatorDef::new(
            "discount",
            "Discount",
            Category::Finance,
            "Sale price after a percentage discount.",
            "discount = price × pct / 100; final = price − discount",
            vec![money("price", "Original price", "100"), rate("percent", "Discount %", "20")],
            Compute::Pure(discount),
        ),
        CalculatorDef::new(
            "tip",
            "Tip",
            Category::Finance,
            "Tip, total and per-person share of a bill.",
            "tip = bill × pct / 100; per person = (bill + tip) / people",
            vec![
                money("bill", "Bill amount", "50"),
                rate("percent", "Tip %", "15"),
                FieldSpec::number("people", "Split between")
                    .required()
                    .range(1.0, 100.0)
                    .integer()
                    .default_value("1"),
            ],
            Compute::Pure(tip),
        ),
        CalculatorDef::new(
            "sales-tax",
            "Sales Tax",
            Category::Finance,
            "Tax owed and price including tax.",
            "tax = price × rate / 100; total = price + tax",
            vec![money("price", "Price before tax", "100"), rate("rate", "Tax rate %", "8")],
            Compute::Pure(sales_tax),
        ),
        CalculatorDef::new(
            "simple-interest",
            "Simple Interest",
            Category::Finance,
            "Interest without compounding.",
            "I = P × r × t",
            vec![
                money("principal", "Principal", "1000"),
                rate("rate", "Annual rate %", "5"),
                FieldSpec::number("years", "Years").required().min(0.0).default_value("3"),
            ],
            Compute::Pure(simple_interest),
        ),
        CalculatorDef::new(
            "compound-interest",
            "Compound Interest",
            Category::Finance,
            "Growth of a deposit with periodic compounding.",
            "A = P(1 + r/n)^(n·t)",
            vec![
                money("principal", "Principal", "1000"),
                rate("rate", "Annual rate %", "5"),
                FieldSpec::number("years", "Years").required().range(0.0, 200.0).default_value("10"),
                FieldSpec::choice("frequency", "Compounded", CompoundFrequency::KEYS),
            ],
            Compute::Pure(compound_interest),
        )
        .note("Daily compounding uses 365 periods per year"),
        CalculatorDef::new(
            "loan-payment",
            "Loan Payment",
            Category::Finance,
            "Monthly payment on an amortized loan.",
            "M = P·i / (1 − (1 + i)^−n), i = annual rate / 12",
            vec![
                money("principal", "Loan amount", "200000"),
                rate("rate", "Annual rate %", "6"),
                FieldSpec::number("years", "Term (years)")
                    .required()
                    .range(1.0, 50.0)
                    .integer()
                    .default_value("30"),
            ],
            Compute::Pure(loan_payment),
        )
        .note("A 0% rate divides the principal evenly"),
        CalculatorDef::new(
            "profit-margin",
            "Profit Margin",
            Category::Finance,
            "Gross profit, margin and markup.",
            "margin = (revenue − cost) / revenue × 100; markup = (revenue − cost) / cost × 100",
            vec![money("cost", "Cost", "60"), money("revenue", "Revenue", "100")],
            Compute::Pure(profit_margin),
        ),
    ]
}

fn discount(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let d = finance::discount(request.number("price")?, request.number("percent")?);
    Ok(vec![
        Output::number("discount_amount", "You save", d.discount_amount, FormatHints::money()),
        Output::number("final_price", "Final price", d.final_price, FormatHints::money()),
    ])
}

fn tip(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let people = u32::try_from(whole(request, "people")?).unwrap_or(u32::MAX);
    let t = finance::tip(request.number("bill")?, request.number("percent")?, people)?;
    Ok(vec![
        Output::number("tip", "Tip", t.tip_amount, FormatHints::money()),
        Output::number("total", "Total", t.total, FormatHints::money()),
        Output::number("per_person", "Per person", t.per_person, FormatHints::money()),
    ])
}

fn sales_tax(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let (tax, total) = finance::sales_tax(request.number("price")?, request.number("rate")?);
    Ok(vec![
        Output::number("tax", "Tax", tax, FormatHints::money()),
        Output::number("total", "Total", total, FormatHints::money()),
    ])
}

fn simple_interest(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let (interest, total) = finance::simple_interest(
        request.number("principal")?,
        request.number("rate")?,
        request.number("years")?,
    );
    Ok(vec![
        Output::number("interest", "Interest", interest, FormatHints::money()),
        Output::number("total", "Total", total, FormatHints::money()),
    ])
}

fn compound_interest(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let frequency = choice_as(request, "frequency", CompoundFrequency::from_key)?;
    let (amount, interest) = finance::compound_interest(
        request.number("principal")?,
        request.number("rate")?,
        request.number("years")?,
        frequency,
    )?;
    Ok(vec![
        Output::number("amount", "Final amount", amount, FormatHints::money()),
        Output::number("interest", "Interest earned", interest, FormatHints::money()),
    ])
}

fn loan_payment(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let months = u32::try_from(whole(request, "years")? * 12).unwrap_or(u32::MAX);
    let loan = finance::loan_payment(request.number("principal")?, request.number("rate")?, months)?;
    Ok(vec![
        Output::number("monthly_payment", "Monthly payment", loan.monthly_payment, FormatHints::money()),
        Output::number("total_paid", "Total paid", loan.total_paid, FormatHints::money()),
        Output::number("total_interest", "Total interest", loan.total_interest, FormatHints::money()),
    ])
}

fn profit_margin(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let m = finance::profit_margin(request.number("cost")?, request.number("revenue")?)?;
    let mut outputs = vec![
        Output::number("profit", "Profit", m.profit, FormatHints::money()),
        Output::number("margin", "Margin", m.margin_percent, FormatHints::percent(2)),
    ];
    if let Some(markup) = m.markup_percent {
        outputs.push(Output::number("markup", "Markup", markup, FormatHints::percent(2)));
    }
    Ok(outputs)
}
