use super::domain::{ManagementFee, RiskLevel, UnderwritingInput, UnderwritingOutput};
use super::UnderwritingError;

/// Compute investment metrics for one deal.
///
/// NOI excludes debt service by definition, so the math keeps two expense
/// totals: operating (taxes, insurance, management, vacancy) and total
/// (operating plus mortgage). Cash-on-cash here is annual operating NOI
/// over total cash invested; that convention is fixed by the contract.
pub fn underwrite(input: &UnderwritingInput) -> Result<UnderwritingOutput, UnderwritingError> {
    validate(input)?;

    let monthly_mortgage =
        monthly_payment(input.loan_amount, input.interest_rate, input.loan_term_years);

    let vacancy_loss = input.monthly_rent * input.vacancy_rate / 100.0;
    let management = input.property_management.monthly_cost(input.monthly_rent);
    let operating_expenses =
        input.property_taxes / 12.0 + input.insurance / 12.0 + management + vacancy_loss;
    let monthly_expenses = operating_expenses + monthly_mortgage;

    let monthly_noi = input.monthly_rent - operating_expenses;
    let annual_noi = monthly_noi * 12.0;

    let cap_rate = if input.after_repair_value > 0.0 {
        annual_noi / input.after_repair_value * 100.0
    } else {
        0.0
    };

    let total_investment = input.purchase_price + input.rehab_cost + input.closing_costs;
    let cash_on_cash = annual_noi / total_investment * 100.0;

    let annual_debt_service = monthly_mortgage * 12.0;
    let dscr = if annual_debt_service > 0.0 {
        annual_noi / annual_debt_service
    } else {
        f64::INFINITY
    };

    // One computation behind two output labels.
    let flip = (input.after_repair_value - total_investment) / total_investment * 100.0;

    Ok(UnderwritingOutput {
        total_investment,
        monthly_mortgage,
        operating_expenses,
        monthly_expenses,
        monthly_noi,
        annual_noi,
        cap_rate,
        cash_on_cash,
        dscr,
        flip_margin: flip,
        flip_roi: flip,
        risk_level: RiskLevel::classify(dscr, cap_rate),
    })
}

/// Standard amortization: M = L·r / (1 − (1+r)^−n), with the zero-interest
/// degenerate case paying straight principal. The negative-exponent form
/// stays finite for arbitrarily long terms, converging on interest-only.
pub fn monthly_payment(loan_amount: f64, annual_rate: f64, term_years: u32) -> f64 {
    if loan_amount <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let payments = f64::from(term_years) * 12.0;
    let monthly_rate = annual_rate / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return loan_amount / payments;
    }

    let discount = (1.0 + monthly_rate).powf(-payments);
    loan_amount * monthly_rate / (1.0 - discount)
}

fn validate(input: &UnderwritingInput) -> Result<(), UnderwritingError> {
    if input.purchase_price <= 0.0 {
        return Err(UnderwritingError::NonPositivePurchasePrice {
            value: input.purchase_price,
        });
    }
    if input.loan_term_years == 0 {
        return Err(UnderwritingError::NonPositiveLoanTerm);
    }

    for (field, value) in [
        ("rehab_cost", input.rehab_cost),
        ("after_repair_value", input.after_repair_value),
        ("monthly_rent", input.monthly_rent),
        ("property_taxes", input.property_taxes),
        ("insurance", input.insurance),
        ("loan_amount", input.loan_amount),
        ("closing_costs", input.closing_costs),
    ] {
        if value < 0.0 {
            return Err(UnderwritingError::NegativeAmount { field, value });
        }
    }

    for (field, value) in [
        ("interest_rate", input.interest_rate),
        ("vacancy_rate", input.vacancy_rate),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(UnderwritingError::PercentageOutOfRange { field, value });
        }
    }

    match input.property_management {
        ManagementFee::FlatMonthly(amount) if amount < 0.0 => {
            Err(UnderwritingError::NegativeAmount {
                field: "property_management",
                value: amount,
            })
        }
        ManagementFee::PercentOfRent(percent) if !(0.0..=100.0).contains(&percent) => {
            Err(UnderwritingError::PercentageOutOfRange {
                field: "property_management",
                value: percent,
            })
        }
        _ => Ok(()),
    }
}
