use rust_decimal::Decimal;
use tracing::warn;

use super::models::{DataSection, DerivedMetrics, MonthRange, PeriodSummary};
use crate::account::AccountService;
use crate::errors::UpstreamError;
use crate::plaid::{Aggregator, TransactionRecord};
use crate::transaction::models::DateRange;
use crate::transaction::TransactionService;

/// Percent change from `previous` to `current`.
///
/// Returns zero when there is no prior value, when it is zero, or when the
/// result does not fit in a `Decimal`.
pub fn percentage_delta(current: Decimal, previous: Option<Decimal>) -> Decimal {
    match previous {
        Some(previous) if !previous.is_zero() => current
            .checked_sub(previous)
            .and_then(|diff| diff.checked_div(previous))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Stand-in prior balance (95% of the current one).
///
/// There is no historical balance series yet, so the balance change shown on
/// the dashboard is measured against this value rather than real history.
pub fn placeholder_prior_balance(current_balance: Decimal) -> Decimal {
    current_balance
        .checked_mul(Decimal::new(95, 2))
        .unwrap_or(Decimal::ZERO)
}

/// Derive display metrics from the current and an optional prior period.
pub fn compute_summary(current: &PeriodSummary, prior: Option<&PeriodSummary>) -> DerivedMetrics {
    DerivedMetrics {
        income: current.income,
        expenses: current.expenses,
        savings: current.savings,
        balance: current.balance,
        income_change: percentage_delta(current.income, prior.map(|p| p.income)),
        expenses_change: percentage_delta(current.expenses, prior.map(|p| p.expenses)),
        savings_change: percentage_delta(current.savings, prior.map(|p| p.savings)),
        balance_change: percentage_delta(
            current.balance,
            Some(placeholder_prior_balance(current.balance)),
        ),
    }
}

impl DerivedMetrics {
    /// Replace the balance with an independently queried total.
    pub fn with_total_balance(self, total_balance: Decimal) -> Self {
        Self {
            balance: total_balance,
            balance_change: percentage_delta(
                total_balance,
                Some(placeholder_prior_balance(total_balance)),
            ),
            ..self
        }
    }
}

/// Aggregate settled transactions into income, expenses and savings.
///
/// Negative amounts are inflows and count as income; positive amounts are
/// expenses. The balance is left at zero.
pub fn summarize_month(transactions: &[TransactionRecord]) -> PeriodSummary {
    let (income, expenses) = transactions
        .iter()
        .filter(|t| !t.pending)
        .fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), t| {
            if t.amount.is_sign_negative() {
                (income.saturating_sub(t.amount), expenses)
            } else {
                (income, expenses.saturating_add(t.amount))
            }
        });

    PeriodSummary {
        income,
        expenses,
        savings: income.saturating_sub(expenses),
        balance: Decimal::ZERO,
    }
}

/// Service layer for period summaries and dashboard metrics.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Summarize one calendar month across every given item.
    pub async fn monthly_summary(
        aggregator: &dyn Aggregator,
        access_tokens: &[String],
        month: MonthRange,
    ) -> Result<PeriodSummary, UpstreamError> {
        let range = DateRange {
            start: month.start,
            end: month.end,
        };

        let mut transactions = Vec::new();
        for token in access_tokens {
            transactions.extend(TransactionService::fetch_range(aggregator, token, range).await?);
        }

        Ok(summarize_month(&transactions))
    }

    /// Build dashboard metrics for a month.
    ///
    /// Inputs that fail to load stay at zero and are reported in the returned
    /// list instead of failing the whole dashboard. Period changes are only
    /// computed when both months loaded; otherwise they stay at zero.
    pub async fn dashboard(
        aggregator: &dyn Aggregator,
        access_tokens: &[String],
        month: MonthRange,
        prior_month: MonthRange,
    ) -> (DerivedMetrics, Vec<DataSection>) {
        let mut unavailable = Vec::new();

        let current = match Self::monthly_summary(aggregator, access_tokens, month).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Current period summary unavailable");
                unavailable.push(DataSection::CurrentPeriod);
                PeriodSummary::default()
            }
        };

        let prior = match Self::monthly_summary(aggregator, access_tokens, prior_month).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(error = %e, "Prior period summary unavailable");
                unavailable.push(DataSection::PriorPeriod);
                None
            }
        };

        // A zeroed current period compared against real prior data is not a change
        let comparable_prior = if unavailable.contains(&DataSection::CurrentPeriod) {
            None
        } else {
            prior.as_ref()
        };
        let mut metrics = compute_summary(&current, comparable_prior);

        match AccountService::total_balance(aggregator, access_tokens).await {
            Ok(total) => metrics = metrics.with_total_balance(total),
            Err(e) => {
                warn!(error = %e, "Total balance unavailable");
                unavailable.push(DataSection::TotalBalance);
            }
        }

        (metrics, unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plaid::mock::{sample_account, sample_transaction, MockAggregator};
    use chrono::NaiveDate;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_delta_positive_and_negative() {
        assert_eq!(percentage_delta(dec(110), Some(dec(100))), dec(10));
        assert_eq!(percentage_delta(dec(90), Some(dec(100))), dec(-10));
    }

    #[test]
    fn test_delta_without_prior_is_zero() {
        for a in [dec(0), dec(42), dec(-17), Decimal::new(12345, 2)] {
            assert_eq!(percentage_delta(a, Some(Decimal::ZERO)), Decimal::ZERO);
            assert_eq!(percentage_delta(a, None), Decimal::ZERO);
        }
    }

    #[test]
    fn test_delta_from_negative_prior() {
        // (-50 - -100) / -100 * 100
        assert_eq!(percentage_delta(dec(-50), Some(dec(-100))), dec(-50));
    }

    #[test]
    fn test_delta_overflow_falls_back_to_zero() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(percentage_delta(Decimal::MAX, Some(tiny)), Decimal::ZERO);
        assert_eq!(percentage_delta(Decimal::MIN, Some(dec(1))), Decimal::ZERO);
    }

    #[test]
    fn test_placeholder_prior_balance_at_extremes() {
        assert!(placeholder_prior_balance(Decimal::MAX) < Decimal::MAX);
        assert_eq!(
            compute_summary(&PeriodSummary::default(), None)
                .with_total_balance(Decimal::MAX)
                .balance,
            Decimal::MAX
        );
    }

    #[test]
    fn test_compute_summary_with_prior() {
        let current = PeriodSummary {
            income: dec(5500),
            expenses: dec(2700),
            savings: dec(2800),
            balance: dec(1000),
        };
        let prior = PeriodSummary {
            income: dec(5000),
            expenses: dec(3000),
            savings: dec(2000),
            balance: dec(0),
        };

        let metrics = compute_summary(&current, Some(&prior));

        assert_eq!(metrics.income_change, dec(10));
        assert_eq!(metrics.expenses_change, dec(-10));
        assert_eq!(metrics.savings_change, dec(40));
        assert_eq!(metrics.income, dec(5500));
    }

    #[test]
    fn test_compute_summary_without_prior() {
        let current = PeriodSummary {
            income: dec(5500),
            expenses: dec(2700),
            savings: dec(2800),
            balance: Decimal::ZERO,
        };

        let metrics = compute_summary(&current, None);

        assert_eq!(metrics.income_change, Decimal::ZERO);
        assert_eq!(metrics.expenses_change, Decimal::ZERO);
        assert_eq!(metrics.savings_change, Decimal::ZERO);
        assert_eq!(metrics.balance_change, Decimal::ZERO);
    }

    #[test]
    fn test_balance_change_uses_placeholder() {
        assert_eq!(placeholder_prior_balance(dec(1000)), dec(950));

        let metrics = compute_summary(&PeriodSummary::default(), None).with_total_balance(dec(950));

        assert_eq!(metrics.balance, dec(950));
        // 950 against 902.5
        assert_eq!(metrics.balance_change.round_dp(4), Decimal::new(52632, 4));
    }

    #[test]
    fn test_total_balance_overwrites_period_balance() {
        let current = PeriodSummary {
            balance: dec(10),
            ..PeriodSummary::default()
        };

        let metrics = compute_summary(&current, None).with_total_balance(dec(2500));
        assert_eq!(metrics.balance, dec(2500));
    }

    #[test]
    fn test_summarize_month_splits_inflows_and_outflows() {
        let mut pending = sample_transaction("pending", dec(999), date(2026, 10, 3));
        pending.pending = true;

        let transactions = vec![
            sample_transaction("salary", dec(-3000), date(2026, 10, 1)),
            sample_transaction("rent", dec(1200), date(2026, 10, 2)),
            sample_transaction("coffee", Decimal::new(450, 2), date(2026, 10, 2)),
            pending,
        ];

        let summary = summarize_month(&transactions);

        assert_eq!(summary.income, dec(3000));
        assert_eq!(summary.expenses, Decimal::new(120450, 2));
        assert_eq!(summary.savings, Decimal::new(179550, 2));
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[actix_rt::test]
    async fn test_monthly_summary_only_counts_the_month() {
        let mock = MockAggregator::new().with_transactions(vec![
            sample_transaction("sep", dec(-100), date(2026, 9, 30)),
            sample_transaction("oct-in", dec(-2000), date(2026, 10, 1)),
            sample_transaction("oct-out", dec(500), date(2026, 10, 31)),
        ]);

        let summary = AnalyticsService::monthly_summary(
            &mock,
            &["access-one".to_string()],
            MonthRange::new(2026, 10).unwrap(),
        )
        .await
        .expect("Should summarize");

        assert_eq!(summary.income, dec(2000));
        assert_eq!(summary.expenses, dec(500));
        assert_eq!(summary.savings, dec(1500));

        let request = &mock.transaction_requests()[0];
        assert_eq!(request.start_date, date(2026, 10, 1));
        assert_eq!(request.end_date, date(2026, 10, 31));
    }

    #[actix_rt::test]
    async fn test_dashboard_combines_periods_and_total_balance() {
        let mock = MockAggregator::new()
            .with_transactions(vec![
                sample_transaction("sep-in", dec(-1000), date(2026, 9, 5)),
                sample_transaction("sep-out", dec(400), date(2026, 9, 6)),
                sample_transaction("oct-in", dec(-1100), date(2026, 10, 5)),
                sample_transaction("oct-out", dec(360), date(2026, 10, 6)),
            ])
            .with_accounts("access-one", vec![sample_account("a", Some(dec(5000)))]);

        let month = MonthRange::new(2026, 10).unwrap();
        let (metrics, unavailable) = AnalyticsService::dashboard(
            &mock,
            &["access-one".to_string()],
            month,
            month.previous().unwrap(),
        )
        .await;

        assert!(unavailable.is_empty());
        assert_eq!(metrics.income_change, dec(10));
        assert_eq!(metrics.expenses_change, dec(-10));
        assert_eq!(metrics.balance, dec(5000));
    }

    fn two_month_mock() -> MockAggregator {
        MockAggregator::new()
            .with_transactions(vec![
                sample_transaction("sep-in", dec(-1000), date(2026, 9, 5)),
                sample_transaction("sep-out", dec(400), date(2026, 9, 6)),
                sample_transaction("oct-in", dec(-1100), date(2026, 10, 5)),
                sample_transaction("oct-out", dec(360), date(2026, 10, 6)),
            ])
            .with_accounts("access-one", vec![sample_account("a", Some(dec(5000)))])
    }

    #[actix_rt::test]
    async fn test_dashboard_current_period_unavailable() {
        // The current month is requested first
        let mock = two_month_mock().failing_transactions_at(0);

        let month = MonthRange::new(2026, 10).unwrap();
        let (metrics, unavailable) = AnalyticsService::dashboard(
            &mock,
            &["access-one".to_string()],
            month,
            month.previous().unwrap(),
        )
        .await;

        assert_eq!(unavailable, vec![DataSection::CurrentPeriod]);
        assert_eq!(metrics.income, Decimal::ZERO);
        assert_eq!(metrics.expenses, Decimal::ZERO);
        assert_eq!(metrics.income_change, Decimal::ZERO);
        assert_eq!(metrics.expenses_change, Decimal::ZERO);
        assert_eq!(metrics.savings_change, Decimal::ZERO);
        assert_eq!(metrics.balance, dec(5000));
    }

    #[actix_rt::test]
    async fn test_dashboard_prior_period_unavailable() {
        let mock = two_month_mock().failing_transactions_at(1);

        let month = MonthRange::new(2026, 10).unwrap();
        let (metrics, unavailable) = AnalyticsService::dashboard(
            &mock,
            &["access-one".to_string()],
            month,
            month.previous().unwrap(),
        )
        .await;

        assert_eq!(unavailable, vec![DataSection::PriorPeriod]);
        assert_eq!(metrics.income, dec(1100));
        assert_eq!(metrics.expenses, dec(360));
        assert_eq!(metrics.income_change, Decimal::ZERO);
        assert_eq!(metrics.expenses_change, Decimal::ZERO);
        assert_eq!(metrics.savings_change, Decimal::ZERO);
    }

    #[actix_rt::test]
    async fn test_dashboard_degrades_when_balance_fails() {
        let mock = MockAggregator::new()
            .with_transactions(vec![sample_transaction("oct-in", dec(-1100), date(2026, 10, 5))])
            .failing_balances();

        let month = MonthRange::new(2026, 10).unwrap();
        let (metrics, unavailable) = AnalyticsService::dashboard(
            &mock,
            &["access-one".to_string()],
            month,
            month.previous().unwrap(),
        )
        .await;

        assert_eq!(unavailable, vec![DataSection::TotalBalance]);
        assert_eq!(metrics.balance, Decimal::ZERO);
        assert_eq!(metrics.income, dec(1100));
        // No prior income: change falls back to zero
        assert_eq!(metrics.income_change, Decimal::ZERO);
    }
}
