use serde::{Deserialize, Serialize};

/// Property management compensation, disambiguated at the type level: the
/// source forms used one number as both a flat fee and a percent of rent,
/// so the contract makes the caller say which. Flat monthly is the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementFee {
    FlatMonthly(f64),
    PercentOfRent(f64),
}

impl Default for ManagementFee {
    fn default() -> Self {
        ManagementFee::FlatMonthly(0.0)
    }
}

impl ManagementFee {
    pub(crate) fn monthly_cost(self, monthly_rent: f64) -> f64 {
        match self {
            ManagementFee::FlatMonthly(amount) => amount,
            ManagementFee::PercentOfRent(percent) => monthly_rent * percent / 100.0,
        }
    }
}

/// Deal economics entered in the calculator form. Monetary fields are
/// dollars; rate fields are percentages in [0, 100]. Optional cost fields
/// default to zero at the serde boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingInput {
    pub purchase_price: f64,
    #[serde(default)]
    pub rehab_cost: f64,
    #[serde(default)]
    pub after_repair_value: f64,
    #[serde(default)]
    pub monthly_rent: f64,
    /// Annual property taxes.
    #[serde(default)]
    pub property_taxes: f64,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub property_management: ManagementFee,
    #[serde(default)]
    pub vacancy_rate: f64,
    #[serde(default)]
    pub loan_amount: f64,
    /// Annual interest rate percentage.
    #[serde(default)]
    pub interest_rate: f64,
    pub loan_term_years: u32,
    #[serde(default)]
    pub closing_costs: f64,
}

/// Investment metrics computed from one input set. Pure output; recomputed
/// on every form change, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingOutput {
    /// Cash actually deployed: purchase + rehab + closing.
    pub total_investment: f64,
    pub monthly_mortgage: f64,
    /// Taxes, insurance, management, and vacancy loss; excludes debt service.
    pub operating_expenses: f64,
    /// Operating expenses plus debt service.
    pub monthly_expenses: f64,
    pub monthly_noi: f64,
    pub annual_noi: f64,
    /// Annual NOI over after-repair value, as a percentage.
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    /// Infinite when there is no debt service.
    pub dscr: f64,
    pub flip_margin: f64,
    /// Same computation as flip_margin; kept as a second field for UI labels.
    pub flip_roi: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Fixed classification bands over DSCR and cap rate. The three bands
    /// are mutually exclusive and exhaustive.
    pub(crate) fn classify(dscr: f64, cap_rate: f64) -> Self {
        if dscr >= 1.25 && cap_rate >= 8.0 {
            RiskLevel::Low
        } else if dscr >= 1.0 && cap_rate >= 6.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}
