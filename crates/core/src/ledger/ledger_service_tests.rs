#[cfg(test)]
mod tests {
    use crate::employees::{Employee, EmployeeRole, EmployeeServiceTrait, NewEmployee};
    use crate::errors::{DatabaseError, Error, Result};
    use crate::ledger::ledger_model::*;
    use crate::ledger::recalculation::Replay;
    use crate::ledger::{HourTransactionRepositoryTrait, LedgerService, LedgerServiceTrait};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Mock EmployeeService ---
    #[derive(Clone)]
    struct MockEmployeeService {
        employees: Arc<Mutex<Vec<Employee>>>,
    }

    impl MockEmployeeService {
        fn new() -> Self {
            Self {
                employees: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn add_employee(&self, id: &str) {
            let now = Utc::now();
            self.employees.lock().unwrap().push(Employee {
                id: id.to_string(),
                first_name: "Test".to_string(),
                last_name: "Employee".to_string(),
                email: None,
                role: EmployeeRole::Employee,
                is_active: true,
                created_at: now,
                updated_at: now,
            });
        }
    }

    #[async_trait]
    impl EmployeeServiceTrait for MockEmployeeService {
        fn get_employee(&self, employee_id: &str) -> Result<Employee> {
            self.employees
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == employee_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(employee_id.to_string()))
                })
        }

        fn list_employees(&self, _active_only: bool) -> Result<Vec<Employee>> {
            Ok(self.employees.lock().unwrap().clone())
        }

        async fn create_employee(&self, _new_employee: NewEmployee) -> Result<Employee> {
            unimplemented!()
        }

        async fn delete_employee(&self, _employee_id: &str) -> Result<()> {
            unimplemented!()
        }
    }

    // --- Mock HourTransactionRepository ---
    //
    // In-memory store mirroring the repository contract: listing returns
    // (date, id) order, apply_replay overwrites balances and replaces the
    // summary rows of the touched employee wholesale.
    #[derive(Default)]
    struct MockTransactionRepository {
        transactions: Mutex<Vec<HourTransaction>>,
        summaries: Mutex<HashMap<(String, String, i32), YearlySummary>>,
    }

    impl MockTransactionRepository {
        fn summary_key(ledger: LedgerType, employee_id: &str, year: i32) -> (String, String, i32) {
            (employee_id.to_string(), ledger.as_str().to_string(), year)
        }

        fn corrupt_balances(&self) {
            for transaction in self.transactions.lock().unwrap().iter_mut() {
                transaction.balance_after = dec!(-999);
            }
        }
    }

    #[async_trait]
    impl HourTransactionRepositoryTrait for MockTransactionRepository {
        fn get_transaction(
            &self,
            ledger: LedgerType,
            transaction_id: &str,
        ) -> Result<HourTransaction> {
            self.transactions
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.ledger == ledger && t.id == transaction_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(transaction_id.to_string()))
                })
        }

        fn get_transactions_by_employee(
            &self,
            ledger: LedgerType,
            employee_id: &str,
            year: Option<i32>,
        ) -> Result<Vec<HourTransaction>> {
            let mut result: Vec<HourTransaction> = self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.ledger == ledger && t.employee_id == employee_id)
                .filter(|t| year.map_or(true, |y| t.year == y))
                .cloned()
                .collect();
            result.sort_by(|a, b| {
                (a.transaction_date, a.id.as_str()).cmp(&(b.transaction_date, b.id.as_str()))
            });
            Ok(result)
        }

        async fn create_transaction(
            &self,
            transaction: HourTransaction,
        ) -> Result<HourTransaction> {
            self.transactions.lock().unwrap().push(transaction.clone());
            Ok(transaction)
        }

        async fn delete_transaction(
            &self,
            ledger: LedgerType,
            transaction_id: &str,
        ) -> Result<HourTransaction> {
            let mut transactions = self.transactions.lock().unwrap();
            let position = transactions
                .iter()
                .position(|t| t.ledger == ledger && t.id == transaction_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(transaction_id.to_string()))
                })?;
            Ok(transactions.remove(position))
        }

        async fn apply_replay(
            &self,
            ledger: LedgerType,
            employee_id: &str,
            replay: Replay,
        ) -> Result<()> {
            let mut transactions = self.transactions.lock().unwrap();
            for (id, balance) in &replay.balances {
                if let Some(transaction) = transactions.iter_mut().find(|t| t.id == *id) {
                    transaction.balance_after = *balance;
                }
            }

            let mut summaries = self.summaries.lock().unwrap();
            summaries.retain(|(emp, led, year), _| {
                emp != employee_id
                    || led != ledger.as_str()
                    || replay.year_totals.contains_key(year)
            });
            for (year, totals) in replay.year_totals {
                summaries.insert(
                    Self::summary_key(ledger, employee_id, year),
                    totals.into_summary(employee_id, ledger, year),
                );
            }
            Ok(())
        }

        fn get_summary(
            &self,
            ledger: LedgerType,
            employee_id: &str,
            year: i32,
        ) -> Result<Option<YearlySummary>> {
            Ok(self
                .summaries
                .lock()
                .unwrap()
                .get(&Self::summary_key(ledger, employee_id, year))
                .cloned())
        }

        fn get_summaries_by_employee(
            &self,
            ledger: LedgerType,
            employee_id: &str,
        ) -> Result<Vec<YearlySummary>> {
            let mut result: Vec<YearlySummary> = self
                .summaries
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.ledger == ledger && s.employee_id == employee_id)
                .cloned()
                .collect();
            result.sort_by(|a, b| b.year.cmp(&a.year));
            Ok(result)
        }
    }

    fn setup(ledger: LedgerType) -> (LedgerService, Arc<MockTransactionRepository>) {
        let repository = Arc::new(MockTransactionRepository::default());
        let employees = MockEmployeeService::new();
        employees.add_employee("emp-1");
        employees.add_employee("emp-2");
        let service = LedgerService::new(ledger, repository.clone(), Arc::new(employees));
        (service, repository)
    }

    fn input(date: &str, kind: &str, hours: &str) -> NewHourTransaction {
        NewHourTransaction {
            employee_id: "emp-1".to_string(),
            year: None,
            transaction_date: date.to_string(),
            kind: kind.to_string(),
            hours: hours.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn add_transaction_fills_balance_and_summary() {
        let (service, _) = setup(LedgerType::Vacation);

        let first = service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        assert_eq!(first.transaction.balance_after, dec!(120));
        assert_eq!(
            first.summary.totals(),
            SummaryTotals::Vacation {
                available_hours: dec!(120),
                used_hours: dec!(0),
            }
        );

        let second = service
            .add_transaction(input("2025-02-14", "USED", "8"))
            .await
            .unwrap();
        assert_eq!(second.transaction.balance_after, dec!(112));
        assert_eq!(
            second.summary.totals(),
            SummaryTotals::Vacation {
                available_hours: dec!(120),
                used_hours: dec!(8),
            }
        );
    }

    #[tokio::test]
    async fn delete_recomputes_remaining_history() {
        let (service, _) = setup(LedgerType::Vacation);

        let added = service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        let used = service
            .add_transaction(input("2025-02-14", "USED", "8"))
            .await
            .unwrap();

        let employee_id = service
            .delete_transaction(&added.transaction.id)
            .await
            .unwrap();
        assert_eq!(employee_id, "emp-1");

        // The remaining "used" transaction is now first in line.
        let remaining = service.get_transactions("emp-1", None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, used.transaction.id);
        assert_eq!(remaining[0].balance_after, dec!(-8));

        let summary = service.get_summary("emp-1", 2025).unwrap();
        assert_eq!(
            summary.totals(),
            SummaryTotals::Vacation {
                available_hours: dec!(0),
                used_hours: dec!(8),
            }
        );
    }

    #[tokio::test]
    async fn delete_then_recompute_matches_never_inserted() {
        let (service, _) = setup(LedgerType::Vacation);

        // History A: the three transactions, minus the middle one later.
        service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        let middle = service
            .add_transaction(input("2025-03-01", "USED", "16"))
            .await
            .unwrap();
        service
            .add_transaction(input("2025-06-01", "USED", "8"))
            .await
            .unwrap();
        service
            .delete_transaction(&middle.transaction.id)
            .await
            .unwrap();

        let balances_after_delete: Vec<Decimal> = service
            .get_transactions("emp-1", None)
            .unwrap()
            .iter()
            .map(|t| t.balance_after)
            .collect();
        assert_eq!(balances_after_delete, vec![dec!(120), dec!(112)]);

        let summary = service.get_summary("emp-1", 2025).unwrap();
        assert_eq!(summary.added_hours, dec!(120));
        assert_eq!(summary.used_hours, dec!(8));
    }

    #[tokio::test]
    async fn final_state_is_insertion_order_independent() {
        // Same two movements, opposite insertion order: identical final
        // balance sequences, because replay order is (date, id), not
        // insertion sequence.
        let (forward, _) = setup(LedgerType::Vacation);
        forward
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        forward
            .add_transaction(input("2025-02-14", "USED", "8"))
            .await
            .unwrap();

        let (backward, _) = setup(LedgerType::Vacation);
        backward
            .add_transaction(input("2025-02-14", "USED", "8"))
            .await
            .unwrap();
        backward
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();

        let forward_balances: Vec<Decimal> = forward
            .get_transactions("emp-1", None)
            .unwrap()
            .iter()
            .map(|t| t.balance_after)
            .collect();
        let backward_balances: Vec<Decimal> = backward
            .get_transactions("emp-1", None)
            .unwrap()
            .iter()
            .map(|t| t.balance_after)
            .collect();

        assert_eq!(forward_balances, vec![dec!(120), dec!(112)]);
        assert_eq!(forward_balances, backward_balances);
    }

    #[tokio::test]
    async fn unknown_employee_is_rejected_before_any_write() {
        let (service, repository) = setup(LedgerType::Vacation);

        let result = service
            .add_transaction(NewHourTransaction {
                employee_id: "ghost".to_string(),
                ..input("2025-01-01", "ADDED", "120")
            })
            .await;

        assert!(result.unwrap_err().is_not_found());
        assert!(repository.transactions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_leaves_no_partial_state() {
        let (service, repository) = setup(LedgerType::Overtime);

        // USED does not belong to the overtime vocabulary.
        assert!(service
            .add_transaction(input("2025-01-01", "USED", "8"))
            .await
            .is_err());
        // Unparseable hours.
        assert!(service
            .add_transaction(input("2025-01-01", "ADDED", "eight"))
            .await
            .is_err());

        assert!(repository.transactions.lock().unwrap().is_empty());
        assert!(repository.summaries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_transaction_is_not_found() {
        let (service, _) = setup(LedgerType::Vacation);
        let result = service.delete_transaction("no-such-id").await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn summary_defaults_to_zero_for_untouched_years() {
        let (service, _) = setup(LedgerType::Overtime);

        let summary = service.get_summary("emp-1", 2031).unwrap();
        assert_eq!(
            summary.totals(),
            SummaryTotals::Overtime {
                total_hours: dec!(0),
                converted_hours: dec!(0),
                paid_hours: dec!(0),
            }
        );
    }

    #[tokio::test]
    async fn yearly_summaries_come_newest_first() {
        let (service, _) = setup(LedgerType::Vacation);

        service
            .add_transaction(input("2024-01-01", "ADDED", "100"))
            .await
            .unwrap();
        service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        service
            .add_transaction(input("2023-01-01", "ADDED", "80"))
            .await
            .unwrap();

        let years: Vec<i32> = service
            .get_yearly_summaries("emp-1")
            .unwrap()
            .iter()
            .map(|s| s.year)
            .collect();
        assert_eq!(years, vec![2025, 2024, 2023]);
    }

    #[tokio::test]
    async fn emptied_year_loses_its_summary_row() {
        let (service, repository) = setup(LedgerType::Vacation);

        let only = service
            .add_transaction(input("2024-07-01", "ADDED", "40"))
            .await
            .unwrap();
        service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();

        service.delete_transaction(&only.transaction.id).await.unwrap();

        assert_eq!(repository.summaries.lock().unwrap().len(), 1);
        // The emptied year reads back as all-zero.
        let summary = service.get_summary("emp-1", 2024).unwrap();
        assert_eq!(summary.added_hours, dec!(0));
        assert_eq!(summary.used_hours, dec!(0));
    }

    #[tokio::test]
    async fn recalculate_heals_corrupted_balances() {
        let (service, repository) = setup(LedgerType::Vacation);

        service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        service
            .add_transaction(input("2025-02-14", "USED", "8"))
            .await
            .unwrap();

        repository.corrupt_balances();
        service.recalculate("emp-1").await.unwrap();

        let balances: Vec<Decimal> = service
            .get_transactions("emp-1", None)
            .unwrap()
            .iter()
            .map(|t| t.balance_after)
            .collect();
        assert_eq!(balances, vec![dec!(120), dec!(112)]);
    }

    #[tokio::test]
    async fn ledgers_are_independent_per_employee() {
        let repository = Arc::new(MockTransactionRepository::default());
        let employees = MockEmployeeService::new();
        employees.add_employee("emp-1");
        let employees = Arc::new(employees);

        let vacation = LedgerService::new(
            LedgerType::Vacation,
            repository.clone(),
            employees.clone(),
        );
        let overtime =
            LedgerService::new(LedgerType::Overtime, repository.clone(), employees);

        vacation
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();
        overtime
            .add_transaction(input("2025-01-01", "ADDED", "12"))
            .await
            .unwrap();

        assert_eq!(
            vacation.get_summary("emp-1", 2025).unwrap().added_hours,
            dec!(120)
        );
        assert_eq!(
            overtime.get_summary("emp-1", 2025).unwrap().added_hours,
            dec!(12)
        );
    }

    #[tokio::test]
    async fn year_filter_restricts_listing() {
        let (service, _) = setup(LedgerType::Vacation);

        service
            .add_transaction(input("2024-06-01", "ADDED", "40"))
            .await
            .unwrap();
        service
            .add_transaction(input("2025-01-01", "ADDED", "120"))
            .await
            .unwrap();

        let all = service.get_transactions("emp-1", None).unwrap();
        assert_eq!(all.len(), 2);
        let only_2025 = service.get_transactions("emp-1", Some(2025)).unwrap();
        assert_eq!(only_2025.len(), 1);
        assert_eq!(only_2025[0].year, 2025);
    }
}
