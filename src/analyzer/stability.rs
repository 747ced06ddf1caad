// Advisory stability flag from company fundamentals
use crate::model::Fundamentals;

const MIN_MARKET_CAP: i64 = 10_000_000_000;
const MAX_PE_RATIO: f64 = 30.0;
const MIN_REVENUE_GROWTH: f64 = 0.05;
const MAX_DEBT_TO_EQUITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum StabilityConcern {
    SmallCap(i64),
    HighPe(f64),
    NetLoss(i64),
    SlowGrowth(f64),
    HighLeverage(f64),
}

/// Lists every violated condition. A condition is skipped when its field is absent
/// (a zero P/E or net income can never violate its bound either).
pub fn stability_concerns(f: &Fundamentals) -> Vec<StabilityConcern> {
    let mut concerns = Vec::new();

    if let Some(cap) = f.market_cap.filter(|&c| c < MIN_MARKET_CAP) {
        concerns.push(StabilityConcern::SmallCap(cap));
    }
    if let Some(pe) = f.pe_ratio.filter(|&p| p > MAX_PE_RATIO) {
        concerns.push(StabilityConcern::HighPe(pe));
    }
    if let Some(income) = f.net_income.filter(|&n| n < 0) {
        concerns.push(StabilityConcern::NetLoss(income));
    }
    if let Some(growth) = f.revenue_growth.filter(|&g| g < MIN_REVENUE_GROWTH) {
        concerns.push(StabilityConcern::SlowGrowth(growth));
    }
    if let Some(de) = f.debt_to_equity.filter(|&d| d > MAX_DEBT_TO_EQUITY) {
        concerns.push(StabilityConcern::HighLeverage(de));
    }

    concerns
}

pub fn is_stable(f: &Fundamentals) -> bool {
    stability_concerns(f).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid() -> Fundamentals {
        Fundamentals {
            name: Some("Solid Inc".into()),
            sector: Some("Utilities".into()),
            market_cap: Some(50_000_000_000),
            pe_ratio: Some(15.0),
            net_income: Some(2_000_000_000),
            revenue_growth: Some(0.08),
            debt_to_equity: Some(0.5),
        }
    }

    #[test]
    fn all_absent_is_stable() {
        assert!(is_stable(&Fundamentals::default()));
    }

    #[test]
    fn solid_company_is_stable() {
        assert!(is_stable(&solid()));
    }

    #[test]
    fn each_condition_flags_instability() {
        let cases = [
            Fundamentals { market_cap: Some(9_999_999_999), ..solid() },
            Fundamentals { pe_ratio: Some(30.5), ..solid() },
            Fundamentals { net_income: Some(-1), ..solid() },
            Fundamentals { revenue_growth: Some(0.0), ..solid() },
            Fundamentals { debt_to_equity: Some(1.01), ..solid() },
        ];
        for f in cases {
            assert_eq!(stability_concerns(&f).len(), 1, "{:?}", f);
        }
    }

    #[test]
    fn zero_pe_and_income_are_treated_as_absent() {
        let f = Fundamentals {
            pe_ratio: Some(0.0),
            net_income: Some(0),
            ..solid()
        };
        assert!(is_stable(&f));
    }

    #[test]
    fn zero_revenue_growth_still_counts() {
        let f = Fundamentals {
            revenue_growth: Some(0.0),
            ..Fundamentals::default()
        };
        assert_eq!(stability_concerns(&f), vec![StabilityConcern::SlowGrowth(0.0)]);
    }
}
