use chrono::{Duration, NaiveDate, TimeZone, Utc};
use lendtrack_rs::{
    CompletionReason, CompoundingFrequency, Event, LoanBook, LoanDirection, LoanFilter, LoanStatus,
    LoanTerms, LoanView, Money, NetPosition, Rate, SafeTimeProvider, TimeSource, DEFAULT_RECENT_LIMIT,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn loan_book_lifecycle() {
    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()));
    let mut book = LoanBook::new(time);

    let rahul = book.add_loan(
        LoanTerms::builder()
            .person_name("Rahul Kumar")
            .contact_info("+91 98765 43210")
            .amount(Money::from_major(50_000))
            .lent()
            .rate(Rate::from_percentage(12))
            .start_date(date(2024, 1, 15))
            .duration_months(24)
            .notes("business expansion")
            .build()
            .unwrap(),
    );

    book.time().test_control().unwrap().advance(Duration::days(46));
    let priya = book.add_loan(LoanTerms::compound(
        "Priya Sharma",
        LoanDirection::Borrowed,
        Money::from_major(25_000),
        Rate::from_percentage(8),
        CompoundingFrequency::Monthly,
        date(2024, 3, 1),
        12,
    ));

    book.time().test_control().unwrap().advance(Duration::days(1));
    let asha = book.add_loan(LoanTerms::simple(
        "Asha",
        LoanDirection::Lent,
        Money::from_major(1_000),
        Rate::ZERO,
        date(2024, 3, 2),
        6,
    ));
    book.add_loan(LoanTerms::simple(
        "Asha",
        LoanDirection::Borrowed,
        Money::from_major(400),
        Rate::ZERO,
        date(2024, 3, 2),
        6,
    ));

    // maturity projections
    let dashboard = book.dashboard(book.today()).unwrap();
    assert_eq!(dashboard.total_lent, Money::from_major(51_000));
    assert_eq!(dashboard.total_borrowed, Money::from_major(25_400));
    assert_eq!(dashboard.expected_returns, Money::from_major(63_000));
    assert_eq!(dashboard.active_loan_count, 4);

    let stats = book.statistics().unwrap();
    assert_eq!(stats.interest_earned, Money::from_major(12_000));
    assert_eq!(stats.interest_paid.round_dp(2), Money::from_str_exact("2074.99").unwrap());

    // person view
    let summary = book.person_summary("Asha", book.today()).unwrap();
    assert_eq!(summary.net_outstanding, Money::from_major(600));
    assert_eq!(summary.net_position, NetPosition::OwesYou);

    // a preview leaves the ledger alone
    let preview = book.preview_payment(rahul, Money::from_major(1_000), date(2024, 7, 15)).unwrap();
    assert!(preview.to_interest.is_positive());
    assert!(book.get(rahul).unwrap().payments().is_empty());

    // paying off the zero-rate loan completes it
    book.time().test_control().unwrap().advance(Duration::days(30));
    let receipt = book.record_payment_now(asha, Money::from_major(1_000), Some("cash".into())).unwrap();
    assert!(receipt.completed_loan);
    assert_eq!(book.get(asha).unwrap().status, LoanStatus::Completed);

    let summary = book.person_summary("Asha", book.today()).unwrap();
    assert_eq!(summary.net_position, NetPosition::YouOwe);
    assert_eq!(summary.net_outstanding, Money::from_major(400));

    // a partial payment on an accruing loan
    let receipt = book
        .record_payment(priya, Money::from_major(5_000), date(2024, 4, 1), None, date(2024, 4, 1))
        .unwrap();
    assert!(!receipt.completed_loan);
    assert!(receipt.allocation.to_interest.is_positive());
    assert_eq!(receipt.allocation.total_applied(), Money::from_major(5_000));

    let recent = book.recent_loans(DEFAULT_RECENT_LIMIT);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].person_name(), "Asha");
    assert_eq!(recent[2].person_name(), "Rahul Kumar");

    assert_eq!(book.search("a", LoanFilter::Completed).len(), 1);
    assert_eq!(book.search("kumar", LoanFilter::Lent).len(), 1);

    let view = LoanView::from_loan(book.get(priya).unwrap(), date(2024, 4, 1)).unwrap();
    assert_eq!(view.payments.payment_count, 1);
    assert_eq!(view.financial.outstanding, receipt.outstanding_after);

    // explicit completion, then export and reimport
    assert!(book.mark_completed(rahul).unwrap());

    let completions: Vec<CompletionReason> = book
        .events
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::LoanCompleted { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(completions, vec![CompletionReason::PaidInFull, CompletionReason::MarkedByUser]);

    let exported = book.export_json().unwrap();
    let mut restored = LoanBook::new(SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
    )));
    assert_eq!(restored.import_json(&exported).unwrap(), 4);
    assert_eq!(restored.loans(), book.loans());
    assert_eq!(
        restored.statistics().unwrap(),
        book.statistics().unwrap()
    );

    book.delete_loan(priya).unwrap();
    assert_eq!(book.len(), 3);
    assert_eq!(book.clear(), 3);
    assert!(book.is_empty());
}

#[test]
fn imports_hand_written_json() {
    let json = r#"[
        {
            "id": "9b2f6c1e-3a4d-4e0b-9f57-2c8d1a6e4b11",
            "personName": "Meera",
            "type": "borrowed",
            "amount": 20000,
            "interestRate": 10,
            "interestType": "compound",
            "paymentFrequency": "quarterly",
            "startDate": "2024-01-01",
            "durationMonths": 12,
            "createdAt": "2024-01-01T10:00:00Z"
        }
    ]"#;

    let mut book = LoanBook::with_system_time();
    assert_eq!(book.import_json(json).unwrap(), 1);

    let loan = &book.loans()[0];
    assert_eq!(loan.terms.compound_frequency, CompoundingFrequency::Quarterly);
    assert_eq!(loan.status, LoanStatus::Active);
    assert!(loan.payments().is_empty());
    assert_eq!(loan.terms.interest_rate, Rate::from_percentage(10));
}
