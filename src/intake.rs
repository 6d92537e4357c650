//! The receipt intake flow: from a selected image to a stored expense and receipt.
//!
//! The steps are: copy the image into the receipts directory, recognize its
//! text, find the total (or ask for it when it cannot be found), ask for the
//! category and date, then write the expense and receipt together.

use std::path::Path;

use time::Date;

use crate::{
    Error,
    alert::Alert,
    amount::Amount,
    details::{Collected, DetailCoordinator, Prompt},
    ledger::{Expense, LedgerStore, NewExpense, Receipt},
    parser::AmountParser,
    receipt_storage::ReceiptStorage,
    recognizer::TextRecognizer,
};

/// Shown when the total could not be read from the receipt.
pub const MANUAL_AMOUNT_REASON: &str =
    "Could not extract amount from receipt. Please enter it manually.";

/// Where the recorded amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSource {
    /// Read from the receipt text.
    Recognized,
    /// Typed in by the user.
    Manual,
}

/// How an intake ended.
#[derive(Debug, PartialEq)]
pub enum IntakeOutcome {
    /// The expense and its receipt were written.
    Recorded {
        /// The new expense.
        expense: Expense,
        /// The receipt linked to `expense`.
        receipt: Receipt,
        /// Where the amount came from.
        source: AmountSource,
    },
    /// No image was selected. Nothing was changed.
    NoImageSelected,
    /// The amount could not be read and the user did not type one in.
    NoAmount,
    /// The user cancelled the detail form.
    Cancelled,
    /// A step failed. Nothing was written to the ledger.
    Failed(Error),
}

impl IntakeOutcome {
    /// The single notification to show the user, if any.
    pub fn alert(&self) -> Option<Alert> {
        match self {
            IntakeOutcome::Recorded {
                expense, receipt, ..
            } => Some(Alert::success(
                "Receipt uploaded and expense added successfully!",
                &format!(
                    "{} {} {} ({})",
                    expense.date,
                    expense.category,
                    expense.amount,
                    receipt.image_path.display()
                ),
            )),
            IntakeOutcome::NoImageSelected => None,
            IntakeOutcome::NoAmount => Some(Alert::warning("No amount entered", "")),
            IntakeOutcome::Cancelled => Some(Alert::warning("Cancelled", "")),
            IntakeOutcome::Failed(error) => {
                Some(Alert::error("An error occurred", &error.to_string()))
            }
        }
    }
}

/// Orchestrates one receipt intake at a time.
///
/// The flow borrows the [LedgerStore] mutably for its whole run, so no other
/// ledger write can happen while the user is being prompted.
#[derive(Debug)]
pub struct ReceiptIntake<R, P> {
    storage: ReceiptStorage,
    recognizer: R,
    parser: AmountParser,
    coordinator: DetailCoordinator<P>,
}

impl<R: TextRecognizer, P: Prompt> ReceiptIntake<R, P> {
    /// Create the flow from its collaborators.
    pub fn new(storage: ReceiptStorage, recognizer: R, parser: AmountParser, prompt: P) -> Self {
        Self {
            storage,
            recognizer,
            parser,
            coordinator: DetailCoordinator::new(prompt),
        }
    }

    /// Run the intake for the `selected` image.
    ///
    /// `today` is the default date offered to the user. All errors are caught
    /// here and returned as [IntakeOutcome::Failed]; nothing is retried.
    pub fn run(
        &mut self,
        store: &mut LedgerStore,
        selected: Option<&Path>,
        today: Date,
    ) -> IntakeOutcome {
        match self.try_run(store, selected, today) {
            Ok(outcome) => outcome,
            Err(Error::NoImageSelected) => {
                tracing::debug!("No receipt image selected");
                IntakeOutcome::NoImageSelected
            }
            Err(error) => {
                tracing::error!("Receipt intake failed: {error}");
                IntakeOutcome::Failed(error)
            }
        }
    }

    fn try_run(
        &mut self,
        store: &mut LedgerStore,
        selected: Option<&Path>,
        today: Date,
    ) -> Result<IntakeOutcome, Error> {
        let image_path = self.storage.import(selected)?;
        tracing::info!("Processing receipt {image_path:?}");

        let (amount, source) = match self.recognize_amount(&image_path) {
            Some(amount) => (amount, AmountSource::Recognized),
            None => match self.coordinator.collect_amount(MANUAL_AMOUNT_REASON)? {
                Some(amount) => (amount, AmountSource::Manual),
                None => {
                    tracing::info!("No amount entered for {image_path:?}");
                    return Ok(IntakeOutcome::NoAmount);
                }
            },
        };

        let details = match self.coordinator.collect_details(amount, today)? {
            Collected::Details(details) => details,
            Collected::Cancelled => return Ok(IntakeOutcome::Cancelled),
        };

        let new_expense = NewExpense {
            date: details.date,
            category: details.category,
            amount,
        };
        let (expense, receipt) = store.create_expense_with_receipt(&new_expense, &image_path)?;

        Ok(IntakeOutcome::Recorded {
            expense,
            receipt,
            source,
        })
    }

    /// Recognize the receipt text and look for the total.
    ///
    /// A failed recognition is treated the same as text without a total.
    fn recognize_amount(&self, image_path: &Path) -> Option<Amount> {
        let text = match self.recognizer.recognize(image_path) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!("Could not recognize text in {image_path:?}: {error}");
                return None;
            }
        };
        tracing::debug!("Recognized text: {text:?}");

        self.parser.parse(&text)
    }
}

#[cfg(test)]
mod receipt_intake_tests {
    use std::{
        cell::RefCell,
        fs,
        path::{Path, PathBuf},
    };

    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        Error,
        alert::AlertType,
        amount::Amount,
        category::Category,
        details::test_prompt::ScriptedPrompt,
        intake::{AmountSource, IntakeOutcome, MANUAL_AMOUNT_REASON, ReceiptIntake},
        ledger::LedgerStore,
        parser::AmountParser,
        receipt_storage::ReceiptStorage,
        recognizer::TextRecognizer,
    };

    /// Returns fixed text, or fails, and records which images it was given.
    struct FakeRecognizer {
        text: Result<String, Error>,
        seen: RefCell<Vec<PathBuf>>,
    }

    impl FakeRecognizer {
        fn returning(text: &str) -> Self {
            Self {
                text: Ok(text.to_owned()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                text: Err(Error::Recognition("engine crashed".to_owned())),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextRecognizer for FakeRecognizer {
        fn recognize(&self, image_path: &Path) -> Result<String, Error> {
            self.seen.borrow_mut().push(image_path.to_owned());
            match &self.text {
                Ok(text) => Ok(text.clone()),
                Err(error) => Err(Error::Recognition(error.to_string())),
            }
        }
    }

    struct Fixture {
        root: TempDir,
        image: PathBuf,
        store: LedgerStore,
    }

    impl Fixture {
        fn new() -> Self {
            let root = tempfile::tempdir().unwrap();
            let image = root.path().join("lunch.png");
            fs::write(&image, b"not really a png").unwrap();

            Self {
                root,
                image,
                store: LedgerStore::open_in_memory().unwrap(),
            }
        }

        fn intake(
            &self,
            recognizer: FakeRecognizer,
            prompt: ScriptedPrompt,
        ) -> ReceiptIntake<FakeRecognizer, ScriptedPrompt> {
            let storage = ReceiptStorage::new(self.root.path().join("receipts")).unwrap();
            ReceiptIntake::new(storage, recognizer, AmountParser::default(), prompt)
        }
    }

    #[test]
    fn recognized_total_is_recorded_with_receipt() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default().submit("Food", "2025-08-01");
        let mut intake = fixture.intake(FakeRecognizer::returning("Total $12.34"), prompt);

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        let IntakeOutcome::Recorded {
            expense,
            receipt,
            source,
        } = outcome
        else {
            panic!("expected the expense to be recorded");
        };
        assert_eq!(source, AmountSource::Recognized);
        assert_eq!(expense.amount, Amount::from_cents(1234).unwrap());
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.date, date!(2025 - 08 - 01));
        assert_eq!(receipt.expense_id, expense.id);
        assert_eq!(
            receipt.image_path,
            fixture.root.path().join("receipts").join("lunch.png")
        );
        assert!(receipt.image_path.is_file());
        assert_eq!(fixture.store.count_expenses(), Ok(1));
        assert_eq!(fixture.store.count_receipts(), Ok(1));
    }

    #[test]
    fn recognizer_reads_the_copied_image() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default().cancel();
        let mut intake = fixture.intake(FakeRecognizer::returning("Total 1.00"), prompt);

        intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        assert_eq!(
            *intake.recognizer.seen.borrow(),
            vec![fixture.root.path().join("receipts").join("lunch.png")]
        );
    }

    #[test]
    fn parse_miss_falls_back_to_manual_amount() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default()
            .amount(Some("7.50"))
            .submit("Transport", "2025-08-02");
        let mut intake = fixture.intake(FakeRecognizer::returning("blurry nonsense"), prompt);

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        let IntakeOutcome::Recorded { expense, source, .. } = outcome else {
            panic!("expected the expense to be recorded");
        };
        assert_eq!(source, AmountSource::Manual);
        assert_eq!(expense.amount, Amount::from_cents(750).unwrap());
        assert_eq!(
            intake.coordinator.into_inner().amount_reasons,
            vec![MANUAL_AMOUNT_REASON.to_owned()]
        );
    }

    #[test]
    fn recognition_failure_is_treated_as_a_parse_miss() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default()
            .amount(Some("3.20"))
            .submit("Food", "2025-08-01");
        let mut intake = fixture.intake(FakeRecognizer::failing(), prompt);

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        assert!(matches!(
            outcome,
            IntakeOutcome::Recorded {
                source: AmountSource::Manual,
                ..
            }
        ));
    }

    #[test]
    fn no_manual_amount_aborts_without_writing() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default().amount(None);
        let mut intake = fixture.intake(FakeRecognizer::returning(""), prompt);

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        assert_eq!(outcome, IntakeOutcome::NoAmount);
        assert_eq!(fixture.store.count_expenses(), Ok(0));
        assert_eq!(fixture.store.count_receipts(), Ok(0));
    }

    #[test]
    fn cancelling_details_leaves_the_ledger_unchanged() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default().cancel();
        let mut intake = fixture.intake(FakeRecognizer::returning("Total $12.34"), prompt);

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        assert_eq!(outcome, IntakeOutcome::Cancelled);
        assert_eq!(fixture.store.count_expenses(), Ok(0));
        assert_eq!(fixture.store.count_receipts(), Ok(0));
    }

    #[test]
    fn no_image_selected_changes_nothing_and_shows_nothing() {
        let mut fixture = Fixture::new();
        let mut intake = fixture.intake(
            FakeRecognizer::returning("Total $12.34"),
            ScriptedPrompt::default(),
        );

        let outcome = intake.run(&mut fixture.store, None, date!(2025 - 08 - 02));

        assert_eq!(outcome, IntakeOutcome::NoImageSelected);
        assert_eq!(outcome.alert(), None);
        assert!(intake.recognizer.seen.borrow().is_empty());
        assert_eq!(fixture.store.count_expenses(), Ok(0));
    }

    #[test]
    fn unsupported_file_fails_with_an_error_alert() {
        let mut fixture = Fixture::new();
        let document = fixture.root.path().join("receipt.pdf");
        fs::write(&document, b"%PDF").unwrap();
        let mut intake = fixture.intake(
            FakeRecognizer::returning("Total $12.34"),
            ScriptedPrompt::default(),
        );

        let outcome = intake.run(
            &mut fixture.store,
            Some(document.as_path()),
            date!(2025 - 08 - 02),
        );

        assert_eq!(
            outcome,
            IntakeOutcome::Failed(Error::UnsupportedImageType("receipt.pdf".to_owned()))
        );
        let alert = outcome.alert().unwrap();
        assert_eq!(alert.alert_type, AlertType::Error);
        assert_eq!(fixture.store.count_expenses(), Ok(0));
    }

    #[test]
    fn prompt_failure_is_caught_at_the_boundary() {
        let mut fixture = Fixture::new();
        let mut intake = fixture.intake(
            FakeRecognizer::returning("Total $12.34"),
            ScriptedPrompt::default(),
        );

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        assert!(matches!(outcome, IntakeOutcome::Failed(Error::Prompt(_))));
        assert_eq!(fixture.store.count_expenses(), Ok(0));
    }

    #[test]
    fn recorded_outcome_has_a_success_alert() {
        let mut fixture = Fixture::new();
        let prompt = ScriptedPrompt::default().submit("Rent", "2025-08-01");
        let mut intake = fixture.intake(FakeRecognizer::returning("TOTAL 950.00"), prompt);

        let outcome = intake.run(
            &mut fixture.store,
            Some(fixture.image.as_path()),
            date!(2025 - 08 - 02),
        );

        let alert = outcome.alert().unwrap();
        assert_eq!(alert.alert_type, AlertType::Success);
        assert!(alert.details.starts_with("2025-08-01 Rent 950.00"));
    }
}
