// Yahoo quoteSummary payload -> Fundamentals
use crate::model::{FetchError, Fundamentals};
use crate::parser::Parser;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
    error: Option<SummaryError>,
}

#[derive(Debug, Deserialize)]
struct SummaryError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: PriceModule,
    #[serde(default)]
    summary_profile: ProfileModule,
    #[serde(default)]
    summary_detail: DetailModule,
    #[serde(default)]
    default_key_statistics: KeyStatisticsModule,
    #[serde(default)]
    financial_data: FinancialDataModule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    #[serde(default)]
    market_cap: RawValue,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileModule {
    sector: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailModule {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: RawValue,
    #[serde(default)]
    market_cap: RawValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    #[serde(default)]
    net_income_to_common: RawValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    #[serde(default)]
    revenue_growth: RawValue,
    #[serde(default)]
    debt_to_equity: RawValue,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}` and sends `{}` when absent.
/// Non-numeric raws such as `"Infinity"` are read as absent.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<Value>,
}

impl RawValue {
    fn value(&self) -> Option<f64> {
        self.raw
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    fn integer(&self) -> Option<i64> {
        self.value().map(|v| v.round() as i64)
    }
}

/// Maps the modules requested by `YahooClient` onto a `Fundamentals` record.
pub struct SummaryParser;

impl SummaryParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for SummaryParser {
    type Output = Fundamentals;

    fn parse(&self, body: &str) -> Result<Fundamentals, FetchError> {
        let envelope: SummaryEnvelope = serde_json::from_str(body)?;
        if let Some(err) = envelope.quote_summary.error {
            return Err(FetchError::Decode(format!(
                "{}: {}",
                err.code,
                err.description.unwrap_or_default()
            )));
        }
        let mut results = envelope.quote_summary.result.unwrap_or_default();
        let result = match results.len() {
            0 => return Err(FetchError::NoData),
            1 => results.remove(0),
            n => {
                return Err(FetchError::MalformedShape(format!("{} summary results, expected 1", n)));
            }
        };

        let market_cap = result
            .price
            .market_cap
            .integer()
            .or_else(|| result.summary_detail.market_cap.integer());

        Ok(Fundamentals {
            name: result.price.long_name.filter(|s| !s.is_empty()),
            sector: result.summary_profile.sector.filter(|s| !s.is_empty()),
            market_cap,
            pe_ratio: result.summary_detail.trailing_pe.value(),
            net_income: result.default_key_statistics.net_income_to_common.integer(),
            revenue_growth: result.financial_data.revenue_growth.value(),
            debt_to_equity: result.financial_data.debt_to_equity.value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_populated_modules() {
        let body = r#"{"quoteSummary":{"result":[{
            "price":{"longName":"Acme Corp","marketCap":{"raw":12500000000,"fmt":"12.5B"}},
            "summaryProfile":{"sector":"Industrials"},
            "summaryDetail":{"trailingPE":{"raw":18.4,"fmt":"18.40"}},
            "defaultKeyStatistics":{"netIncomeToCommon":{"raw":-2500000,"fmt":"-2.5M"}},
            "financialData":{"revenueGrowth":{"raw":0.071},"debtToEquity":{}}
        }],"error":null}}"#;

        let f = SummaryParser::new().parse(body).unwrap();
        assert_eq!(f.name.as_deref(), Some("Acme Corp"));
        assert_eq!(f.sector.as_deref(), Some("Industrials"));
        assert_eq!(f.market_cap, Some(12_500_000_000));
        assert_eq!(f.pe_ratio, Some(18.4));
        assert_eq!(f.net_income, Some(-2_500_000));
        assert_eq!(f.revenue_growth, Some(0.071));
        assert_eq!(f.debt_to_equity, None);
    }

    #[test]
    fn high_trailing_pe_is_read() {
        let body = r#"{"quoteSummary":{"result":[{
            "price":{"marketCap":{"raw":50000000000}},
            "summaryDetail":{"trailingPE":{"raw":45.0,"fmt":"45.00"}}
        }],"error":null}}"#;

        let f = SummaryParser::new().parse(body).unwrap();
        assert_eq!(f.pe_ratio, Some(45.0));
        assert!(!crate::analyzer::is_stable(&f));
    }

    #[test]
    fn non_numeric_raw_drops_only_that_field() {
        let body = r#"{"quoteSummary":{"result":[{
            "price":{"longName":"Acme Corp","marketCap":{"raw":12500000000,"fmt":"12.5B"}},
            "summaryDetail":{"trailingPE":{"raw":"Infinity","fmt":"∞"}},
            "financialData":{"revenueGrowth":{"raw":0.071}}
        }],"error":null}}"#;

        let f = SummaryParser::new().parse(body).unwrap();
        assert_eq!(f.name.as_deref(), Some("Acme Corp"));
        assert_eq!(f.market_cap, Some(12_500_000_000));
        assert_eq!(f.pe_ratio, None);
        assert_eq!(f.revenue_growth, Some(0.071));
    }

    #[test]
    fn absent_modules_leave_fields_empty() {
        let body = r#"{"quoteSummary":{"result":[{}],"error":null}}"#;
        assert_eq!(SummaryParser::new().parse(body).unwrap(), Fundamentals::default());
    }

    #[test]
    fn provider_error_is_reported() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        assert!(matches!(SummaryParser::new().parse(body), Err(FetchError::Decode(_))));
    }
}
